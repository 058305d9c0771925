use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::CalendarService;

#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    params(CalendarQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "整个团队某个月的日历", body = MonthOverlay),
        (status = 400, description = "月份无效"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_month(
    calendar_service: web::Data<CalendarService>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse> {
    match calendar_service.month(query.year, query.month).await {
        Ok(overlay) => Ok(HttpResponse::Ok().json(ApiResponse::success(overlay))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn calendar_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/calendar", web::get().to(get_month));
}
