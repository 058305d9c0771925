//! 每年生日假与圣诞周选择的默认值。
//!
//! 用户第一次打开某一年时，如果还没有显式选择，就根据资料里的生日
//! 和管理员配置的选项自动生成一条记录。同一个 (owner, year) 只会写一次：
//! 数据库里已存在的记录优先，`DefaultedYears` 记录本会话已经自动写过的年份。

use crate::models::{HolidayWeekOption, OwnerContext, UserBirthdayDay, UserHolidayChoice};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use uuid::Uuid;

pub const PREFERRED_HOLIDAY_LABEL: &str = "A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKind {
    Birthday,
    HolidayWeek,
}

/// 已经自动写入默认值的 (owner, year)，由调用方（会话 / 请求作用域）持有
#[derive(Debug, Default, Clone)]
pub struct DefaultedYears {
    done: HashSet<(DefaultKind, Uuid, i32)>,
}

impl DefaultedYears {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: DefaultKind, owner_id: Uuid, year: i32) -> bool {
        self.done.contains(&(kind, owner_id, year))
    }

    /// 只应在写入成功之后调用
    pub fn mark(&mut self, kind: DefaultKind, owner_id: Uuid, year: i32) {
        self.done.insert((kind, owner_id, year));
    }
}

/// 把出生日期的月日套到目标年份；2 月 29 日在非闰年顺延到 3 月 1 日
pub fn birthday_in_year(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// 需要自动写入的生日日期；已有记录、资料没有生日、或本会话已写过时返回 `None`
pub fn plan_birthday_default(
    ctx: &OwnerContext,
    year: i32,
    existing: Option<&UserBirthdayDay>,
    defaulted: &DefaultedYears,
) -> Option<NaiveDate> {
    if existing.is_some() || defaulted.contains(DefaultKind::Birthday, ctx.owner_id, year) {
        return None;
    }
    ctx.birth_date.and_then(|birth| birthday_in_year(birth, year))
}

/// 需要自动写入的圣诞周选项：优先 “A”，否则取传入顺序的第一个
pub fn plan_holiday_default<'a>(
    ctx: &OwnerContext,
    year: i32,
    existing: Option<&UserHolidayChoice>,
    options: &'a [HolidayWeekOption],
    defaulted: &DefaultedYears,
) -> Option<&'a HolidayWeekOption> {
    if existing.is_some() || defaulted.contains(DefaultKind::HolidayWeek, ctx.owner_id, year) {
        return None;
    }
    let mut for_year = options.iter().filter(|o| o.year == year);
    let first = for_year.clone().next()?;
    Some(
        for_year
            .find(|o| o.label == PREFERRED_HOLIDAY_LABEL)
            .unwrap_or(first),
    )
}
