pub mod admin;
pub mod birthday;
pub mod calendar;
pub mod holiday;
pub mod user;
pub mod vacation;

pub use admin::admin_config;
pub use birthday::birthday_config;
pub use calendar::calendar_config;
pub use holiday::holiday_config;
pub use user::user_config;
pub use vacation::vacation_config;

use crate::error::AppResult;
use crate::middlewares::current_owner_id;
use crate::models::OwnerContext;
use crate::services::ProfileService;
use actix_web::HttpRequest;

/// 每个请求都重新加载资料和角色，角色变更立即生效
pub(crate) async fn load_owner(
    req: &HttpRequest,
    profile_service: &ProfileService,
) -> AppResult<OwnerContext> {
    let owner_id = current_owner_id(req)?;
    profile_service.owner_context(owner_id).await
}
