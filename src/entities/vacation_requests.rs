use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 假期类别；数据库里的取值沿用前端的 regular / birthday / holiday / christmas
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vacation_type")]
pub enum VacationCategory {
    #[sea_orm(string_value = "regular")]
    #[serde(rename = "regular")]
    Regular,
    #[sea_orm(string_value = "birthday")]
    #[serde(rename = "birthday")]
    Birthday,
    #[sea_orm(string_value = "holiday")]
    #[serde(rename = "holiday")]
    CompanyHoliday,
    #[sea_orm(string_value = "christmas")]
    #[serde(rename = "christmas")]
    ChristmasWeek,
}

impl std::fmt::Display for VacationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacationCategory::Regular => write!(f, "regular"),
            VacationCategory::Birthday => write!(f, "birthday"),
            VacationCategory::CompanyHoliday => write!(f, "holiday"),
            VacationCategory::ChristmasWeek => write!(f, "christmas"),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vacation_status")]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    #[sea_orm(string_value = "approved")]
    Approved,
    // 目前没有审批流程，以下两种状态不会被写入
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacationStatus::Approved => write!(f, "approved"),
            VacationStatus::Pending => write!(f, "pending"),
            VacationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "vacation_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sea_orm(column_name = "type")]
    pub category: VacationCategory,
    pub status: VacationStatus,
    pub days_count: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
