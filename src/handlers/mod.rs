pub mod admin;
pub mod auth;
pub mod comment;
pub mod follow;
pub mod point;
pub mod post;
pub mod report;
pub mod user;
pub mod verification;

pub use admin::admin_config;
pub use auth::auth_config;
pub use comment::comment_config;
pub use follow::follow_config;
pub use point::point_config;
pub use post::post_config;
pub use report::report_config;
pub use user::user_config;
pub use verification::verification_config;

use crate::error::AppError;
use crate::middlewares::AuthenticatedUser;
use actix_web::{HttpMessage, HttpRequest};

pub(crate) fn current_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>().copied()
}

pub(crate) fn require_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    current_user(req).ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

pub(crate) fn require_admin(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let user = require_user(req)?;
    if !user.role.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}
