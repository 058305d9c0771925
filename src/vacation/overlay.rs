use crate::entities::{VacationCategory, VacationStatus};
use crate::error::{AppError, AppResult};
use crate::models::{
    CalendarEntry, DayCell, FixedHoliday, HolidayWeekOption, MonthOverlay, TimeOffRecord,
    UserBirthdayDay, UserHolidayChoice,
};
use crate::vacation::business_days::is_weekend;
use crate::vacation::display::{
    DisplayNames, PLACEHOLDER_NAME, UNKNOWN_NAME, color_name, color_slot,
};
use crate::vacation::holidays::holiday_on;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 不以行存储、按需从选择记录展开的条目
#[derive(Debug, Clone, Copy)]
pub enum SyntheticEntry<'a> {
    /// 圣诞周选择，按标签匹配到当年的选项后覆盖整段日期
    HolidayWeek {
        choice: &'a UserHolidayChoice,
        option: &'a HolidayWeekOption,
    },
    /// 生日假，只占一天
    Birthday(&'a UserBirthdayDay),
}

impl<'a> SyntheticEntry<'a> {
    /// 所有圣诞周选择（找不到对应选项的丢弃）加上所有生日假
    pub fn materialize(
        holiday_choices: &'a [UserHolidayChoice],
        birthday_days: &'a [UserBirthdayDay],
        holiday_options: &'a [HolidayWeekOption],
    ) -> Vec<SyntheticEntry<'a>> {
        let weeks = holiday_choices.iter().filter_map(|choice| {
            holiday_options
                .iter()
                .find(|o| o.year == choice.year && o.label == choice.label)
                .map(|option| SyntheticEntry::HolidayWeek { choice, option })
        });
        let birthdays = birthday_days.iter().map(SyntheticEntry::Birthday);
        weeks.chain(birthdays).collect()
    }

    pub fn id(&self) -> String {
        match self {
            SyntheticEntry::HolidayWeek { choice, .. } => {
                format!("christmas-{}-{}", choice.owner_id, choice.year)
            }
            SyntheticEntry::Birthday(day) => format!("birthday-{}-{}", day.owner_id, day.year),
        }
    }

    pub fn owner_id(&self) -> Uuid {
        match self {
            SyntheticEntry::HolidayWeek { choice, .. } => choice.owner_id,
            SyntheticEntry::Birthday(day) => day.owner_id,
        }
    }

    pub fn owner_name(&self) -> Option<&'a str> {
        match self {
            SyntheticEntry::HolidayWeek { choice, .. } => choice.owner_name.as_deref(),
            SyntheticEntry::Birthday(day) => day.owner_name.as_deref(),
        }
    }

    pub fn category(&self) -> VacationCategory {
        match self {
            SyntheticEntry::HolidayWeek { .. } => VacationCategory::ChristmasWeek,
            SyntheticEntry::Birthday(_) => VacationCategory::Birthday,
        }
    }

    /// 展开后的显示区间（含两端）
    pub fn display_interval(&self) -> (NaiveDate, NaiveDate) {
        match self {
            SyntheticEntry::HolidayWeek { option, .. } => (option.start_date, option.end_date),
            SyntheticEntry::Birthday(day) => (day.selected_date, day.selected_date),
        }
    }

    fn into_entry(self) -> RawEntry {
        let (start_date, end_date) = self.display_interval();
        RawEntry {
            id: self.id(),
            owner_id: self.owner_id(),
            owner_name: non_blank(self.owner_name())
                .unwrap_or(PLACEHOLDER_NAME)
                .to_string(),
            start_date,
            end_date,
            category: self.category(),
        }
    }
}

/// 参与叠加计算的统一条目，名字尚未做消歧
#[derive(Debug, Clone)]
struct RawEntry {
    id: String,
    owner_id: Uuid,
    owner_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    category: VacationCategory,
}

impl RawEntry {
    fn from_record(record: &TimeOffRecord) -> Self {
        Self {
            id: record.id.to_string(),
            owner_id: record.owner_id,
            owner_name: non_blank(record.owner_name.as_deref())
                .unwrap_or(UNKNOWN_NAME)
                .to_string(),
            start_date: record.start_date,
            end_date: record.end_date,
            category: record.category,
        }
    }

    fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start_date <= last && first <= self.end_date
    }

    fn labeled(self, names: &DisplayNames) -> CalendarEntry {
        let slot = color_slot(&self.owner_id);
        CalendarEntry {
            display_name: names.display_name(&self.owner_name),
            id: self.id,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
            color_slot: slot,
            color: color_name(slot).to_string(),
        }
    }
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::ValidationError(format!("Invalid month: {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::ValidationError(format!("Invalid month: {year}-{month}")))?;
    Ok((first, last))
}

/// 计算某个月每一天的日历格子。
///
/// 只有 `Approved` 的已存储记录参与；合成条目总是视为已批准。
/// 条目顺序：已存储记录按 (created_at, id)，然后是圣诞周，最后是生日假，
/// 同类按 id 排序，保证 “+N” 折叠的结果在多次渲染间一致。
pub fn overlay_for_month(
    records: &[TimeOffRecord],
    holiday_choices: &[UserHolidayChoice],
    birthday_days: &[UserBirthdayDay],
    holiday_options: &[HolidayWeekOption],
    fixed_holidays: &[FixedHoliday],
    month: u32,
    year: i32,
) -> AppResult<BTreeMap<NaiveDate, DayCell>> {
    let (first, last) = month_bounds(year, month)?;

    let mut stored: Vec<&TimeOffRecord> = records
        .iter()
        .filter(|r| r.status == VacationStatus::Approved)
        .collect();
    stored.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

    let synthetic = ordered_synthetic(holiday_choices, birthday_days, holiday_options);

    // 只保留本月实际出现的条目，名字消歧也只基于这些条目
    let shown: Vec<RawEntry> = stored
        .into_iter()
        .map(RawEntry::from_record)
        .chain(synthetic.into_iter().map(SyntheticEntry::into_entry))
        .filter(|e| e.overlaps(first, last))
        .collect();

    let names = DisplayNames::from_entries(shown.iter().map(|e| e.owner_name.as_str()));
    let shown: Vec<CalendarEntry> = shown.into_iter().map(|e| e.labeled(&names)).collect();

    let mut cells = BTreeMap::new();
    for day in first.iter_days().take_while(|d| *d <= last) {
        let entries: Vec<CalendarEntry> = shown
            .iter()
            .filter(|e| e.start_date <= day && day <= e.end_date)
            .cloned()
            .collect();
        let holiday = holiday_on(fixed_holidays, day);
        let cell = DayCell {
            date: day,
            is_weekend: is_weekend(day),
            is_holiday: holiday.is_some(),
            holiday_name: holiday.map(|h| h.name.clone()),
            hidden_count: 0,
            entries,
        };
        let hidden_count = cell.overflow();
        cells.insert(day, DayCell { hidden_count, ..cell });
    }
    Ok(cells)
}

// 圣诞周在前，生日假在后，同类按 id
fn ordered_synthetic<'a>(
    holiday_choices: &'a [UserHolidayChoice],
    birthday_days: &'a [UserBirthdayDay],
    holiday_options: &'a [HolidayWeekOption],
) -> Vec<SyntheticEntry<'a>> {
    let mut synthetic = SyntheticEntry::materialize(holiday_choices, birthday_days, holiday_options);
    synthetic.sort_by_cached_key(|e| (e.category() == VacationCategory::Birthday, e.id()));
    synthetic
}

/// 合成条目的完整列表，不按月份裁剪；年视图用它展示圣诞周和生日假
pub fn synthetic_entries(
    holiday_choices: &[UserHolidayChoice],
    birthday_days: &[UserBirthdayDay],
    holiday_options: &[HolidayWeekOption],
) -> Vec<CalendarEntry> {
    let raw: Vec<RawEntry> = ordered_synthetic(holiday_choices, birthday_days, holiday_options)
        .into_iter()
        .map(SyntheticEntry::into_entry)
        .collect();
    let names = DisplayNames::from_entries(raw.iter().map(|e| e.owner_name.as_str()));
    raw.into_iter().map(|e| e.labeled(&names)).collect()
}

/// 周一为第一列时，月初空白格子的数量
pub fn leading_blanks(first_of_month: NaiveDate) -> u32 {
    first_of_month.weekday().num_days_from_monday()
}

pub fn into_month_overlay(
    year: i32,
    month: u32,
    cells: BTreeMap<NaiveDate, DayCell>,
) -> AppResult<MonthOverlay> {
    let (first, _) = month_bounds(year, month)?;
    Ok(MonthOverlay {
        year,
        month,
        leading_blanks: leading_blanks(first),
        days: cells.into_values().collect(),
    })
}
