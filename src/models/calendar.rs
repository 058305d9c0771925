use crate::entities::VacationCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// 每个日历格子最多直接显示的条目数，其余折叠成 “+N”
pub const VISIBLE_ENTRIES_PER_CELL: usize = 3;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

/// 日历上的一条显示条目（已存储的或合成的）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CalendarEntry {
    /// 合成条目的 id 形如 `christmas-<owner>-<year>` / `birthday-<owner>-<year>`
    pub id: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub display_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: VacationCategory,
    pub color_slot: usize,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    /// 完整列表，顺序稳定
    pub entries: Vec<CalendarEntry>,
    pub hidden_count: usize,
}

impl DayCell {
    pub fn visible(&self) -> &[CalendarEntry] {
        let end = self.entries.len().min(VISIBLE_ENTRIES_PER_CELL);
        &self.entries[..end]
    }

    pub fn overflow(&self) -> usize {
        self.entries.len().saturating_sub(VISIBLE_ENTRIES_PER_CELL)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthOverlay {
    pub year: i32,
    pub month: u32,
    /// 周一为一周第一天时，月初需要空出的格子数
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}
