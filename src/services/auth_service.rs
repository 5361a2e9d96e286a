use crate::entities::{UserRole, UserStatus, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};
use crate::utils::{
    JwtService, hash_password, validate_email, validate_nickname, validate_password,
    verify_password,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 注册。邮箱/昵称唯一，新用户从最低等级、零积分起步。
    pub async fn signup(&self, request: SignUpRequest) -> AppResult<UserResponse> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;
        validate_nickname(&request.nickname)?;

        if self.is_email_duplicate(&request.email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if self.is_nickname_duplicate(&request.nickname).await? {
            return Err(AppError::Conflict("Nickname already in use".to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            email: Set(request.email),
            password_hash: Set(Some(password_hash)),
            nickname: Set(request.nickname),
            remaining_point: Set(0),
            total_point: Set(0),
            role: Set(UserRole::Sprout),
            status: Set(UserStatus::Active),
            streak_days: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("New user signed up: {}", user.id);
        Ok(UserResponse::from(user))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::AuthError("Invalid password".to_string()))?;
        if !verify_password(&request.password, password_hash)? {
            return Err(AppError::AuthError("Invalid password".to_string()));
        }

        if user.status == UserStatus::Suspended {
            return Err(AppError::AuthError("Account is suspended".to_string()));
        }

        self.issue_tokens(user).await
    }

    /// 刷新令牌轮换：校验 refresh JWT 且须与库中持有的一致
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::AuthError("Invalid refresh token".to_string()));
        }
        if user.status == UserStatus::Suspended {
            return Err(AppError::AuthError("Account is suspended".to_string()));
        }

        self.issue_tokens(user).await
    }

    pub async fn logout(&self, user_id: i64) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut am = user.into_active_model();
        am.refresh_token = Set(None);
        am.update(&self.pool).await?;

        log::info!("User {user_id} logged out");
        Ok(())
    }

    pub async fn is_email_duplicate(&self, email: &str) -> AppResult<bool> {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?;
        Ok(existing.is_some())
    }

    pub async fn is_nickname_duplicate(&self, nickname: &str) -> AppResult<bool> {
        let existing = users::Entity::find()
            .filter(users::Column::Nickname.eq(nickname))
            .one(&self.pool)
            .await?;
        Ok(existing.is_some())
    }

    // 签发 access/refresh 并把 refresh 落库
    async fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(user.id, user.role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, user.role)?;

        let mut am = user.clone().into_active_model();
        am.refresh_token = Set(Some(refresh_token.clone()));
        let user = am.update(&self.pool).await?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
