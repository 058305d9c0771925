use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

use super::load_owner;
use crate::error::AppResult;
use crate::models::*;
use crate::services::{ProfileService, VacationService, YearViewService};
use crate::vacation::DefaultedYears;

#[utoipa::path(
    get,
    path = "/vacations/my",
    tag = "vacations",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "自己的申请，最新的在前", body = [TimeOffRecord]),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_my_requests(
    profile_service: web::Data<ProfileService>,
    vacation_service: web::Data<VacationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let result: AppResult<Vec<TimeOffRecord>> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        vacation_service.list_for_owner(ctx.owner_id).await
    }
    .await;

    match result {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(records))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/vacations/balance",
    tag = "vacations",
    params(YearQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当年的假期余额", body = Balance),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_balance(
    profile_service: web::Data<ProfileService>,
    vacation_service: web::Data<VacationService>,
    req: HttpRequest,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse> {
    let year = query.year_or_current();
    let result: AppResult<Balance> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        vacation_service.balance(ctx.owner_id, year).await
    }
    .await;

    match result {
        Ok(balance) => Ok(HttpResponse::Ok().json(ApiResponse::success(balance))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/vacations",
    tag = "vacations",
    request_body = CreateVacationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "申请已创建并自动批准", body = CreateVacationResponse),
        (status = 400, description = "日期范围无效或余额不足"),
        (status = 401, description = "未授权")
    )
)]
pub async fn create_request(
    profile_service: web::Data<ProfileService>,
    vacation_service: web::Data<VacationService>,
    req: HttpRequest,
    request: web::Json<CreateVacationRequest>,
) -> Result<HttpResponse> {
    let result: AppResult<CreateVacationResponse> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        vacation_service
            .create_request(&ctx, request.into_inner())
            .await
    }
    .await;

    match result {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/vacations/{id}",
    tag = "vacations",
    params(
        ("id" = String, Path, description = "申请 id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已删除"),
        (status = 400, description = "圣诞周或生日条目不能在这里删除"),
        (status = 403, description = "不是自己的申请"),
        (status = 404, description = "申请不存在")
    )
)]
pub async fn delete_request(
    profile_service: web::Data<ProfileService>,
    vacation_service: web::Data<VacationService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result: AppResult<()> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        vacation_service.delete_request(&ctx, &id).await
    }
    .await;

    match result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            id,
            "Vacation request deleted",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/vacations/summary/{year}",
    tag = "vacations",
    params(
        ("year" = i32, Path, description = "年份")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "年视图；必要时自动补齐默认选择", body = YearSummary),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_year_summary(
    profile_service: web::Data<ProfileService>,
    year_view_service: web::Data<YearViewService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let year = path.into_inner();
    let result: AppResult<YearSummary> = async {
        let ctx = load_owner(&req, &profile_service).await?;
        // 每个请求一份，用户之间不共享
        let mut defaulted = DefaultedYears::new();
        year_view_service.summary(&ctx, year, &mut defaulted).await
    }
    .await;

    match result {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn vacation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vacations")
            .route("", web::post().to(create_request))
            .route("/my", web::get().to(list_my_requests))
            .route("/balance", web::get().to(get_balance))
            .route("/summary/{year}", web::get().to(get_year_summary))
            .route("/{id}", web::delete().to(delete_request)),
    );
}
