use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use super::load_owner;
use crate::error::AppResult;
use crate::models::*;
use crate::services::{BirthdayService, ProfileService};

#[utoipa::path(
    get,
    path = "/birthday-days/me",
    tag = "birthdays",
    params(YearQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "自己当年的生日假，可能为空", body = UserBirthdayDay),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_my_birthday_day(
    profile_service: web::Data<ProfileService>,
    birthday_service: web::Data<BirthdayService>,
    req: HttpRequest,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse> {
    let year = query.year_or_current();
    let result: AppResult<Option<UserBirthdayDay>> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        birthday_service.day_for(ctx.owner_id, year).await
    }
    .await;

    match result {
        Ok(day) => Ok(HttpResponse::Ok().json(ApiResponse::success(day))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/birthday-days/me",
    tag = "birthdays",
    request_body = SaveBirthdayDayRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已保存", body = UserBirthdayDay),
        (status = 400, description = "日期不在所选年份内"),
        (status = 401, description = "未授权")
    )
)]
pub async fn save_my_birthday_day(
    profile_service: web::Data<ProfileService>,
    birthday_service: web::Data<BirthdayService>,
    req: HttpRequest,
    request: web::Json<SaveBirthdayDayRequest>,
) -> Result<HttpResponse> {
    let result: AppResult<UserBirthdayDay> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        birthday_service
            .save_day(ctx.owner_id, request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(day) => Ok(HttpResponse::Ok().json(ApiResponse::success(day))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn birthday_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/birthday-days")
            .route("/me", web::get().to(get_my_birthday_day))
            .route("/me", web::put().to(save_my_birthday_day)),
    );
}
