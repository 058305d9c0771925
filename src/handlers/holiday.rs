use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use super::load_owner;
use crate::error::AppResult;
use crate::models::*;
use crate::services::{HolidayService, ProfileService};

#[utoipa::path(
    get,
    path = "/holiday-options",
    tag = "holidays",
    params(YearQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当年的圣诞周选项，按标签排序", body = [HolidayWeekOption])
    )
)]
pub async fn list_options(
    holiday_service: web::Data<HolidayService>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse> {
    match holiday_service.options_for_year(query.year_or_current()).await {
        Ok(options) => Ok(HttpResponse::Ok().json(ApiResponse::success(options))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/holiday-choices/me",
    tag = "holidays",
    params(YearQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "自己当年的选择，可能为空", body = UserHolidayChoice),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_my_choice(
    profile_service: web::Data<ProfileService>,
    holiday_service: web::Data<HolidayService>,
    req: HttpRequest,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse> {
    let year = query.year_or_current();
    let result: AppResult<Option<UserHolidayChoice>> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        holiday_service.choice_for(ctx.owner_id, year).await
    }
    .await;

    match result {
        Ok(choice) => Ok(HttpResponse::Ok().json(ApiResponse::success(choice))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/holiday-choices/me",
    tag = "holidays",
    request_body = SaveHolidayChoiceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已保存", body = UserHolidayChoice),
        (status = 400, description = "当年没有这个选项"),
        (status = 401, description = "未授权")
    )
)]
pub async fn save_my_choice(
    profile_service: web::Data<ProfileService>,
    holiday_service: web::Data<HolidayService>,
    req: HttpRequest,
    request: web::Json<SaveHolidayChoiceRequest>,
) -> Result<HttpResponse> {
    let result: AppResult<UserHolidayChoice> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        holiday_service
            .save_choice(ctx.owner_id, request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(choice) => Ok(HttpResponse::Ok().json(ApiResponse::success(choice))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn holiday_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/holiday-options", web::get().to(list_options))
        .service(
            web::scope("/holiday-choices")
                .route("/me", web::get().to(get_my_choice))
                .route("/me", web::put().to(save_my_choice)),
        );
}
