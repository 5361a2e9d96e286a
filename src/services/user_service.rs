use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{UpdateProfileRequest, UserResponse};
use crate::utils::{validate_email, validate_nickname};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(UserResponse::from(user))
    }

    /// 更新个人资料；昵称/邮箱变更时重查唯一性
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let birth_date = match &request.birth_date {
            Some(raw) => Some(parse_birth_date(raw)?),
            None => None,
        };

        if let Some(nickname) = &request.nickname
            && *nickname != user.nickname
        {
            validate_nickname(nickname)?;
            let taken = users::Entity::find()
                .filter(users::Column::Nickname.eq(nickname.clone()))
                .filter(users::Column::Id.ne(user_id))
                .one(&self.pool)
                .await?;
            if taken.is_some() {
                return Err(AppError::Conflict("Nickname already in use".to_string()));
            }
        }

        if let Some(email) = &request.email
            && *email != user.email
        {
            validate_email(email)?;
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .filter(users::Column::Id.ne(user_id))
                .one(&self.pool)
                .await?;
            if taken.is_some() {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }

        let mut am = user.into_active_model();
        if let Some(nickname) = request.nickname {
            am.nickname = Set(nickname);
        }
        if let Some(email) = request.email {
            am.email = Set(email);
        }
        if let Some(status_message) = request.status_message {
            am.status_message = Set(Some(status_message));
        }
        if let Some(detox_goal) = request.detox_goal {
            am.detox_goal = Set(Some(detox_goal));
        }
        if let Some(date) = birth_date {
            am.birth_date = Set(Some(date));
        }
        if let Some(url) = request.profile_image_url {
            am.profile_image_url = Set(Some(url));
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(UserResponse::from(updated))
    }
}

fn parse_birth_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError("Invalid birth date format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birth_date() {
        assert!(parse_birth_date("1999-01-01").is_ok());
        assert!(parse_birth_date("1999/01/01").is_err());
        assert!(parse_birth_date("not-a-date").is_err());
    }
}
