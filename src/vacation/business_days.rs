use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 统计闭区间 [start, end] 内的工作日（周一至周五）
///
/// 结束日期早于开始日期时返回 0。法定假日不扣除。
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> i32 {
    if end < start {
        return 0;
    }
    let total = (end - start).num_days() + 1;
    let full_weeks = total / 7;
    let mut count = full_weeks * 5;
    // 剩余不足一周的天数逐日判断
    let tail_start = start + Duration::days(full_weeks * 7);
    for offset in 0..(total % 7) {
        if !is_weekend(tail_start + Duration::days(offset)) {
            count += 1;
        }
    }
    count as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_monday_to_friday_is_five() {
        // 2026-07-06 是周一
        assert_eq!(count_business_days(d(2026, 7, 6), d(2026, 7, 10)), 5);
    }

    #[test]
    fn test_weekend_only_is_zero() {
        assert_eq!(count_business_days(d(2026, 7, 4), d(2026, 7, 5)), 0);
        assert_eq!(count_business_days(d(2026, 7, 4), d(2026, 7, 4)), 0);
        assert_eq!(count_business_days(d(2026, 7, 5), d(2026, 7, 5)), 0);
    }

    #[test]
    fn test_single_weekday() {
        assert_eq!(count_business_days(d(2026, 7, 8), d(2026, 7, 8)), 1);
    }

    #[test]
    fn test_both_endpoints_inclusive() {
        // 7 月 1 日（周三）到 7 月 15 日（周三）
        assert_eq!(count_business_days(d(2026, 7, 1), d(2026, 7, 15)), 11);
    }

    #[test]
    fn test_range_spanning_weekend() {
        // 周五到下周一
        assert_eq!(count_business_days(d(2026, 7, 10), d(2026, 7, 13)), 2);
    }

    #[test]
    fn test_reversed_range_is_zero() {
        assert_eq!(count_business_days(d(2026, 7, 10), d(2026, 7, 6)), 0);
    }

    #[test]
    fn test_matches_day_by_day_count() {
        let start = d(2026, 1, 1);
        for len in 0..60 {
            let end = start + Duration::days(len);
            let expected = start
                .iter_days()
                .take_while(|day| *day <= end)
                .filter(|day| !is_weekend(*day))
                .count() as i32;
            assert_eq!(count_business_days(start, end), expected, "len {len}");
        }
    }
}
