pub mod christmas_options;
pub mod profiles;
pub mod user_birthday_days;
pub mod user_christmas_choices;
pub mod user_roles;
pub mod vacation_requests;

pub use christmas_options as holiday_option_entity;
pub use profiles as profile_entity;
pub use user_birthday_days as birthday_day_entity;
pub use user_christmas_choices as holiday_choice_entity;
pub use user_roles as user_role_entity;
pub use vacation_requests as vacation_request_entity;

pub use user_roles::AppRole;
pub use vacation_requests::{VacationCategory, VacationStatus};
