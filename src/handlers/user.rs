use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use super::load_owner;
use crate::models::*;
use crate::services::ProfileService;

#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当前用户资料与角色", body = OwnerContext),
        (status = 401, description = "未授权或资料不存在")
    )
)]
pub async fn get_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    match load_owner(&req, &profile_service).await {
        Ok(ctx) => Ok(HttpResponse::Ok().json(ApiResponse::success(ctx))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/user").route("/profile", web::get().to(get_profile)));
}
