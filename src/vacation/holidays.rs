use crate::models::FixedHoliday;
use chrono::NaiveDate;

// (月, 日, 名称)；复活节相关的“耶稣受难日”每年不同，其余固定
const NATIONAL_HOLIDAYS: &[(i32, &[(u32, u32, &str)])] = &[
    (2026, &[
        (1, 1, "Año Nuevo"),
        (1, 6, "Epifanía del Señor"),
        (4, 3, "Viernes Santo"),
        (5, 1, "Fiesta del Trabajo"),
        (8, 15, "Asunción de la Virgen"),
        (10, 12, "Fiesta Nacional de España"),
        (11, 1, "Todos los Santos"),
        (12, 6, "Día de la Constitución"),
        (12, 8, "Inmaculada Concepción"),
        (12, 25, "Navidad"),
    ]),
    (2027, &[
        (1, 1, "Año Nuevo"),
        (1, 6, "Epifanía del Señor"),
        (3, 26, "Viernes Santo"),
        (5, 1, "Fiesta del Trabajo"),
        (8, 15, "Asunción de la Virgen"),
        (10, 12, "Fiesta Nacional de España"),
        (11, 1, "Todos los Santos"),
        (12, 6, "Día de la Constitución"),
        (12, 8, "Inmaculada Concepción"),
        (12, 25, "Navidad"),
    ]),
    (2028, &[
        (1, 1, "Año Nuevo"),
        (1, 6, "Epifanía del Señor"),
        (4, 14, "Viernes Santo"),
        (5, 1, "Fiesta del Trabajo"),
        (8, 15, "Asunción de la Virgen"),
        (10, 12, "Fiesta Nacional de España"),
        (11, 1, "Todos los Santos"),
        (12, 6, "Día de la Constitución"),
        (12, 8, "Inmaculada Concepción"),
        (12, 25, "Navidad"),
    ]),
    (2029, &[
        (1, 1, "Año Nuevo"),
        (1, 6, "Epifanía del Señor"),
        (3, 30, "Viernes Santo"),
        (5, 1, "Fiesta del Trabajo"),
        (8, 15, "Asunción de la Virgen"),
        (10, 12, "Fiesta Nacional de España"),
        (11, 1, "Todos los Santos"),
        (12, 6, "Día de la Constitución"),
        (12, 8, "Inmaculada Concepción"),
        (12, 25, "Navidad"),
    ]),
    (2030, &[
        (1, 1, "Año Nuevo"),
        (1, 6, "Epifanía del Señor"),
        (4, 19, "Viernes Santo"),
        (5, 1, "Fiesta del Trabajo"),
        (8, 15, "Asunción de la Virgen"),
        (10, 12, "Fiesta Nacional de España"),
        (11, 1, "Todos los Santos"),
        (12, 6, "Día de la Constitución"),
        (12, 8, "Inmaculada Concepción"),
        (12, 25, "Navidad"),
    ]),
];

fn holiday(year: i32, month: u32, day: u32, name: &str) -> Option<FixedHoliday> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| FixedHoliday {
        date,
        name: name.to_string(),
    })
}

/// 公司固定休息日：12 月 24 日和 12 月 31 日
pub fn company_holidays(year: i32) -> Vec<FixedHoliday> {
    [(12, 24, "24 Diciembre"), (12, 31, "31 Diciembre")]
        .into_iter()
        .filter_map(|(m, d, name)| holiday(year, m, d, name))
        .collect()
}

/// 国家法定假日；表中没有的年份返回空列表
pub fn national_holidays(year: i32) -> Vec<FixedHoliday> {
    NATIONAL_HOLIDAYS
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, days)| {
            days.iter()
                .filter_map(|(m, d, name)| holiday(year, *m, *d, name))
                .collect()
        })
        .unwrap_or_default()
}

/// 公司假日在前，国家假日在后；同一天命中多个时取第一个名称
pub fn fixed_holidays_for_year(year: i32) -> Vec<FixedHoliday> {
    let mut all = company_holidays(year);
    all.extend(national_holidays(year));
    all
}

pub fn holiday_on(holidays: &[FixedHoliday], date: NaiveDate) -> Option<&FixedHoliday> {
    holidays.iter().find(|h| h.date == date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_holidays_every_year() {
        for year in [2020, 2026, 2045] {
            let days = company_holidays(year);
            assert_eq!(days.len(), 2);
            assert_eq!(days[0].date, NaiveDate::from_ymd_opt(year, 12, 24).unwrap());
            assert_eq!(days[1].date, NaiveDate::from_ymd_opt(year, 12, 31).unwrap());
        }
    }

    #[test]
    fn test_national_table_coverage() {
        for year in 2026..=2030 {
            assert_eq!(national_holidays(year).len(), 10, "year {year}");
        }
        assert!(national_holidays(2031).is_empty());
    }

    #[test]
    fn test_good_friday_2027() {
        let all = fixed_holidays_for_year(2027);
        let h = holiday_on(&all, NaiveDate::from_ymd_opt(2027, 3, 26).unwrap()).unwrap();
        assert_eq!(h.name, "Viernes Santo");
    }

    #[test]
    fn test_non_holiday() {
        let all = fixed_holidays_for_year(2026);
        assert!(holiday_on(&all, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()).is_none());
    }
}
