use crate::entities::{VacationCategory, VacationStatus, vacation_request_entity as requests};
use crate::models::{CalendarEntry, HolidayWeekOption, UserBirthdayDay, UserHolidayChoice};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 一条已持久化的休假记录；`end_date` 含当天
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TimeOffRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: VacationCategory,
    pub status: VacationStatus,
    pub day_count: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<requests::Model> for TimeOffRecord {
    fn from(m: requests::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.user_id,
            owner_name: None,
            start_date: m.start_date,
            end_date: m.end_date,
            category: m.category,
            status: m.status,
            day_count: m.days_count,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Balance {
    pub year: i32,
    pub base_days: i32,
    pub used_days: i32,
    /// 可以为负数
    pub remaining_days: i32,
}

/// 日期选择器的输入，两端都可能缺失
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateVacationRequest {
    #[schema(example = "2026-07-01")]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2026-07-15")]
    pub end_date: Option<NaiveDate>,
}

impl CreateVacationRequest {
    pub fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateVacationResponse {
    pub request: TimeOffRecord,
    pub balance: Balance,
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AutoAssigned {
    pub birthday: bool,
    pub holiday_week: bool,
}

/// “我的假期”页面一次性需要的数据
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct YearSummary {
    pub year: i32,
    pub balance: Balance,
    pub requests: Vec<TimeOffRecord>,
    pub holiday_options: Vec<HolidayWeekOption>,
    pub holiday_choice: Option<UserHolidayChoice>,
    pub birthday_day: Option<UserBirthdayDay>,
    /// 圣诞周与生日假展开后的条目，id 形如 `christmas-<owner>-<year>`
    pub synthetic: Vec<CalendarEntry>,
    pub auto_assigned: AutoAssigned,
}
