pub mod categories;
pub mod comments;
pub mod follows;
pub mod point_histories;
pub mod point_item_purchases;
pub mod point_items;
pub mod post_likes;
pub mod posts;
pub mod reports;
pub mod users;
pub mod verifications;

pub use categories as category_entity;
pub use comments as comment_entity;
pub use follows as follow_entity;
pub use point_histories as point_history_entity;
pub use point_item_purchases as point_item_purchase_entity;
pub use point_items as point_item_entity;
pub use post_likes as post_like_entity;
pub use posts as post_entity;
pub use reports as report_entity;
pub use users as user_entity;
pub use verifications as verification_entity;

pub use reports::ReportStatus;
pub use users::{UserRole, UserStatus};
pub use verifications::VerificationStatus;
