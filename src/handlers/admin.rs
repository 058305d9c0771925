use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use super::load_owner;
use crate::error::AppResult;
use crate::models::*;
use crate::services::{HolidayService, ProfileService};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "所有用户及角色，按姓名排序", body = [UserWithRole]),
        (status = 403, description = "不是管理员")
    )
)]
pub async fn list_users(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<Vec<UserWithRole>> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        profile_service.list_users_with_roles(&ctx).await
    }
    .await;

    match result {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(users))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}/role",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "用户 id")
    ),
    request_body = UpdateRoleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "角色已更新", body = UserWithRole),
        (status = 403, description = "不是管理员"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn update_role(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let result: AppResult<UserWithRole> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        profile_service
            .update_role(&ctx, user_id, request.role)
            .await
    }
    .await;

    match result {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}/birth-date",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "用户 id")
    ),
    request_body = UpdateBirthDateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "生日已更新", body = UserWithRole),
        (status = 403, description = "不是管理员"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn update_birth_date(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateBirthDateRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let result: AppResult<UserWithRole> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        profile_service
            .update_birth_date(&ctx, user_id, request.birth_date)
            .await
    }
    .await;

    match result {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/holiday-options",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "所有年份的圣诞周选项", body = [HolidayWeekOption]),
        (status = 403, description = "不是管理员")
    )
)]
pub async fn list_holiday_options(
    profile_service: web::Data<ProfileService>,
    holiday_service: web::Data<HolidayService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<Vec<HolidayWeekOption>> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        holiday_service.all_options(&ctx).await
    }
    .await;

    match result {
        Ok(options) => Ok(HttpResponse::Ok().json(ApiResponse::success(options))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/holiday-options/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "选项 id")
    ),
    request_body = UpdateHolidayOptionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "选项已更新", body = HolidayWeekOption),
        (status = 400, description = "结束日期早于开始日期"),
        (status = 403, description = "不是管理员"),
        (status = 404, description = "选项不存在")
    )
)]
pub async fn update_holiday_option(
    profile_service: web::Data<ProfileService>,
    holiday_service: web::Data<HolidayService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateHolidayOptionRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result: AppResult<HolidayWeekOption> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        holiday_service
            .update_option(&ctx, id, request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(option) => Ok(HttpResponse::Ok().json(ApiResponse::success(option))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(list_users))
            .route("/users/{id}/role", web::put().to(update_role))
            .route("/users/{id}/birth-date", web::put().to(update_birth_date))
            .route("/holiday-options", web::get().to(list_holiday_options))
            .route("/holiday-options/{id}", web::put().to(update_holiday_option)),
    );
}
