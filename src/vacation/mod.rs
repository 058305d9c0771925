//! 休假领域的纯计算部分，不访问数据库。

pub mod balance;
pub mod business_days;
pub mod defaults;
pub mod display;
pub mod holidays;
pub mod overlay;
pub mod submission;

pub use balance::compute_balance;
pub use business_days::{count_business_days, is_weekend};
pub use defaults::{DefaultKind, DefaultedYears, plan_birthday_default, plan_holiday_default};
pub use holidays::fixed_holidays_for_year;
pub use overlay::{into_month_overlay, month_bounds, overlay_for_month, synthetic_entries};
pub use submission::validate_submission;

#[cfg(test)]
pub mod test_support {
    use crate::entities::{VacationCategory, VacationStatus};
    use crate::models::TimeOffRecord;
    use chrono::NaiveDate;
    use uuid::Uuid;

    pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// 已批准的普通假期
    pub fn record(year: i32, start: (u32, u32), end: (u32, u32), day_count: i32) -> TimeOffRecord {
        TimeOffRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            owner_name: None,
            start_date: d(year, start.0, start.1),
            end_date: d(year, end.0, end.1),
            category: VacationCategory::Regular,
            status: VacationStatus::Approved,
            day_count,
            created_at: None,
        }
    }
}
