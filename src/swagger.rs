use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{ReportStatus, UserRole, UserStatus, VerificationStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::auth::check_email,
        handlers::auth::check_nickname,
        handlers::user::get_me,
        handlers::user::update_me,
        handlers::user::get_user,
        handlers::user::get_user_posts,
        handlers::user::get_user_comments,
        handlers::user::get_followers,
        handlers::user::get_followings,
        handlers::post::get_categories,
        handlers::post::create_post,
        handlers::post::get_posts,
        handlers::post::get_posts_by_category,
        handlers::post::get_following_posts,
        handlers::post::search_posts,
        handlers::post::get_post,
        handlers::post::update_post,
        handlers::post::delete_post,
        handlers::post::add_like,
        handlers::post::delete_like,
        handlers::post::check_like,
        handlers::comment::get_comments,
        handlers::comment::write_comment,
        handlers::comment::update_comment,
        handlers::comment::delete_comment,
        handlers::follow::follow,
        handlers::follow::unfollow,
        handlers::follow::is_following,
        handlers::verification::get_verifications,
        handlers::verification::get_weekly_verifications,
        handlers::verification::get_streak,
        handlers::verification::get_verification,
        handlers::point::get_point_history,
        handlers::point::get_items,
        handlers::point::purchase_item,
        handlers::point::get_my_purchases,
        handlers::report::create_report,
        handlers::admin::get_users,
        handlers::admin::get_user_detail,
        handlers::admin::update_user_status,
        handlers::admin::update_user_role,
        handlers::admin::get_pending_verifications,
        handlers::admin::approve_verification,
        handlers::admin::reject_verification,
        handlers::admin::get_pending_reports,
        handlers::admin::update_report_status,
        handlers::admin::get_dashboard_stats,
    ),
    components(
        schemas(
            SignUpRequest,
            LoginRequest,
            UpdateProfileRequest,
            UserResponse,
            AuthResponse,
            DuplicateCheckResponse,
            UserRole,
            UserStatus,
            CategoryResponse,
            PostCreateRequest,
            PostPatchRequest,
            PostResponse,
            LikeResponse,
            CommentRequest,
            CommentResponse,
            FollowRequest,
            FollowResponse,
            FollowStatusResponse,
            VerificationStatus,
            VerificationResponse,
            WeeklyVerificationResponse,
            StreakResponse,
            PointHistoryResponse,
            PointItemResponse,
            PurchaseRequest,
            PurchaseResultResponse,
            PurchasedItemResponse,
            ReportStatus,
            ReportCreateRequest,
            ReportCreateResponse,
            ReportStatusUpdateRequest,
            AdminReportResponse,
            AdminUserInfoResponse,
            AdminUserDetailResponse,
            UserStatusUpdateRequest,
            UserRoleUpdateRequest,
            DashboardStatsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "注册登录与令牌"),
        (name = "user", description = "用户资料"),
        (name = "post", description = "帖子与板块"),
        (name = "comment", description = "评论"),
        (name = "follow", description = "关注关系"),
        (name = "verification", description = "戒断认证"),
        (name = "point", description = "积分流水"),
        (name = "pointstore", description = "积分商店"),
        (name = "report", description = "举报"),
        (name = "admin", description = "管理后台")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
