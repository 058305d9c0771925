use crate::entities::{
    birthday_day_entity as birthdays, holiday_choice_entity as choices,
    holiday_option_entity as options,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 管理员为某一年配置的圣诞周选项（A / B）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HolidayWeekOption {
    pub id: Uuid,
    pub year: i32,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<options::Model> for HolidayWeekOption {
    fn from(m: options::Model) -> Self {
        Self {
            id: m.id,
            year: m.year,
            label: m.option_label,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserHolidayChoice {
    pub owner_id: Uuid,
    pub year: i32,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<choices::Model> for UserHolidayChoice {
    fn from(m: choices::Model) -> Self {
        Self {
            owner_id: m.user_id,
            year: m.year,
            label: m.option_label,
            owner_name: None,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserBirthdayDay {
    pub owner_id: Uuid,
    pub year: i32,
    pub selected_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<birthdays::Model> for UserBirthdayDay {
    fn from(m: birthdays::Model) -> Self {
        Self {
            owner_id: m.user_id,
            year: m.year,
            selected_date: m.selected_date,
            owner_name: None,
            created_at: m.created_at,
        }
    }
}

/// 公司或国家法定假日，对所有人相同
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FixedHoliday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveHolidayChoiceRequest {
    pub year: i32,
    #[schema(example = "A")]
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveBirthdayDayRequest {
    pub year: i32,
    #[schema(value_type = String, example = "2026-05-17")]
    pub selected_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateHolidayOptionRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
