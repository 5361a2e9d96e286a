use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// 校验邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
    });

    if email.len() > 100 || !re.is_match(email) {
        return Err(AppError::ValidationError("Invalid email format".to_string()));
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> AppResult<()> {
    let len = nickname.chars().count();
    if len < 2 || len > 50 {
        return Err(AppError::ValidationError(
            "Nickname length must be between 2 and 50 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("detox@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.domain.co").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("도파민파이터").is_ok());
        assert!(validate_nickname("a").is_err());
        assert!(validate_nickname(&"x".repeat(51)).is_err());
    }
}
