use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{AppRole, VacationCategory, VacationStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::get_profile,
        handlers::vacation::list_my_requests,
        handlers::vacation::get_balance,
        handlers::vacation::create_request,
        handlers::vacation::delete_request,
        handlers::vacation::get_year_summary,
        handlers::holiday::list_options,
        handlers::holiday::get_my_choice,
        handlers::holiday::save_my_choice,
        handlers::birthday::get_my_birthday_day,
        handlers::birthday::save_my_birthday_day,
        handlers::calendar::get_month,
        handlers::admin::list_users,
        handlers::admin::update_role,
        handlers::admin::update_birth_date,
        handlers::admin::list_holiday_options,
        handlers::admin::update_holiday_option,
    ),
    components(
        schemas(
            AppRole,
            VacationCategory,
            VacationStatus,
            OwnerContext,
            UserWithRole,
            UpdateRoleRequest,
            UpdateBirthDateRequest,
            TimeOffRecord,
            Balance,
            DateRange,
            CreateVacationRequest,
            CreateVacationResponse,
            AutoAssigned,
            YearSummary,
            HolidayWeekOption,
            UserHolidayChoice,
            UserBirthdayDay,
            FixedHoliday,
            SaveHolidayChoiceRequest,
            SaveBirthdayDayRequest,
            UpdateHolidayOptionRequest,
            CalendarEntry,
            DayCell,
            MonthOverlay,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Current user"),
        (name = "vacations", description = "Vacation requests and balance"),
        (name = "holidays", description = "Christmas week options and choices"),
        (name = "birthdays", description = "Birthday day off"),
        (name = "calendar", description = "Team calendar"),
        (name = "admin", description = "Administration"),
    ),
    info(
        title = "Descanso Backend API",
        version = "0.1.0",
        description = "Team vacation tracking REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_vacation_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/vacations"));
        assert!(doc.paths.paths.contains_key("/calendar"));
        assert!(doc.paths.paths.contains_key("/admin/holiday-options/{id}"));
    }
}
