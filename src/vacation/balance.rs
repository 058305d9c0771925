use crate::entities::{VacationCategory, VacationStatus};
use crate::models::{Balance, TimeOffRecord};

/// 计算某一年的假期余额。
///
/// 只统计 `Regular` 且 `Approved` 的记录；年份过滤由调用方在查询时完成，
/// 这里对传入的记录一律求和。`remaining_days` 可以为负。
pub fn compute_balance(records: &[TimeOffRecord], year: i32, base_days: i32) -> Balance {
    let used_days = records
        .iter()
        .filter(|r| counts_against_allowance(r))
        .map(|r| r.day_count)
        .sum::<i32>();

    Balance {
        year,
        base_days,
        used_days,
        remaining_days: base_days - used_days,
    }
}

pub fn counts_against_allowance(record: &TimeOffRecord) -> bool {
    record.category == VacationCategory::Regular && record.status == VacationStatus::Approved
}
