use crate::error::{AppError, AppResult};
use crate::models::DateRange;
use crate::vacation::business_days::count_business_days;

/// 提交前的本地校验，成功时返回应记录的工作日数。
///
/// 不会重新查询余额：同一用户在两个标签页同时提交可能超出额度，
/// 这是已知的限制。
pub fn validate_submission(range: &DateRange, remaining_days: i32) -> AppResult<i32> {
    let (start, end) = match (range.start_date, range.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(AppError::MissingRange),
    };
    if end < start {
        return Err(AppError::InvalidRange);
    }

    let day_count = count_business_days(start, end);
    if day_count == 0 {
        return Err(AppError::EmptyBusinessDayRange);
    }
    if day_count > remaining_days {
        return Err(AppError::InsufficientBalance {
            remaining: remaining_days,
        });
    }
    Ok(day_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[test]
    fn test_missing_endpoint() {
        let range = DateRange {
            start_date: Some(d(7, 1)),
            end_date: None,
        };
        assert!(matches!(validate_submission(&range, 22), Err(AppError::MissingRange)));
        assert!(matches!(
            validate_submission(&DateRange::default(), 22),
            Err(AppError::MissingRange)
        ));
    }

    #[test]
    fn test_weekend_range_is_rejected() {
        let range = DateRange::new(d(7, 4), d(7, 5));
        assert!(matches!(
            validate_submission(&range, 22),
            Err(AppError::EmptyBusinessDayRange)
        ));
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let range = DateRange::new(d(7, 10), d(7, 6));
        assert!(matches!(validate_submission(&range, 22), Err(AppError::InvalidRange)));
    }

    #[test]
    fn test_insufficient_balance_reports_remaining() {
        // 15 个工作日，但只剩 11 天
        let range = DateRange::new(d(9, 1), d(9, 21));
        match validate_submission(&range, 11) {
            Err(AppError::InsufficientBalance { remaining }) => assert_eq!(remaining, 11),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_exact_remaining_is_accepted() {
        let range = DateRange::new(d(7, 6), d(7, 10));
        assert_eq!(validate_submission(&range, 5).unwrap(), 5);
    }

    #[test]
    fn test_negative_remaining_blocks_everything() {
        let range = DateRange::new(d(7, 6), d(7, 6));
        assert!(matches!(
            validate_submission(&range, -3),
            Err(AppError::InsufficientBalance { remaining: -3 })
        ));
    }
}
