use crate::error::AppResult;
use crate::models::*;
use crate::services::{BirthdayService, HolidayService, ProfileService, VacationService};
use crate::vacation::{fixed_holidays_for_year, into_month_overlay, month_bounds, overlay_for_month};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// 团队日历：读取当月涉及的全部数据后交给叠加引擎计算
#[derive(Clone)]
pub struct CalendarService {
    vacation_service: VacationService,
    holiday_service: HolidayService,
    birthday_service: BirthdayService,
    profile_service: ProfileService,
}

impl CalendarService {
    pub fn new(
        vacation_service: VacationService,
        holiday_service: HolidayService,
        birthday_service: BirthdayService,
        profile_service: ProfileService,
    ) -> Self {
        Self {
            vacation_service,
            holiday_service,
            birthday_service,
            profile_service,
        }
    }

    pub async fn month(&self, year: i32, month: u32) -> AppResult<MonthOverlay> {
        let (first, last) = month_bounds(year, month)?;

        let mut records = self.vacation_service.approved_overlapping(first, last).await?;
        // 上一年的 B 周可能延续到一月
        let years = [year - 1, year];
        let options = self.holiday_service.options_for_years(&years).await?;
        let mut choices = self.holiday_service.choices_for_years(&years).await?;
        let mut birthdays = self.birthday_service.days_for_year(year).await?;

        let owner_ids: Vec<Uuid> = records
            .iter()
            .map(|r| r.owner_id)
            .chain(choices.iter().map(|c| c.owner_id))
            .chain(birthdays.iter().map(|b| b.owner_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        // 姓名查询失败时日历照常显示，名字用占位
        let names = match self.profile_service.names_for(&owner_ids).await {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Failed to load owner names for {}-{}: {}", year, month, e);
                HashMap::new()
            }
        };
        attach_names(&mut records, &mut choices, &mut birthdays, &names);

        let fixed = fixed_holidays_for_year(year);
        let cells = overlay_for_month(&records, &choices, &birthdays, &options, &fixed, month, year)?;
        into_month_overlay(year, month, cells)
    }
}

// 查不到的名字保持为空，由叠加引擎填占位
fn attach_names(
    records: &mut [TimeOffRecord],
    choices: &mut [UserHolidayChoice],
    birthdays: &mut [UserBirthdayDay],
    names: &HashMap<Uuid, String>,
) {
    for r in records.iter_mut() {
        r.owner_name = names.get(&r.owner_id).cloned();
    }
    for c in choices.iter_mut() {
        c.owner_name = names.get(&c.owner_id).cloned();
    }
    for b in birthdays.iter_mut() {
        b.owner_name = names.get(&b.owner_id).cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        VacationCategory, VacationStatus, birthday_day_entity as birthdays,
        holiday_choice_entity as choices, holiday_option_entity as options,
        profile_entity as profiles, vacation_request_entity as requests,
    };
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
    use std::sync::Arc;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn service(pool: DatabaseConnection) -> CalendarService {
        let pool = Arc::new(pool);
        CalendarService::new(
            VacationService::new(Arc::clone(&pool), 22),
            HolidayService::new(Arc::clone(&pool)),
            BirthdayService::new(Arc::clone(&pool)),
            ProfileService::new(pool),
        )
    }

    fn december_request(owner: Uuid) -> requests::Model {
        requests::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            start_date: d(2026, 12, 28),
            end_date: d(2026, 12, 30),
            category: VacationCategory::Regular,
            status: VacationStatus::Approved,
            days_count: 3,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_month_combines_sources_with_names() {
        let luis = Uuid::new_v4();
        let marta = Uuid::new_v4();
        let request = requests::Model {
            id: Uuid::new_v4(),
            user_id: luis,
            start_date: d(2026, 12, 28),
            end_date: d(2026, 12, 30),
            category: VacationCategory::Regular,
            status: VacationStatus::Approved,
            days_count: 3,
            created_at: None,
        };
        let option = options::Model {
            id: Uuid::new_v4(),
            year: 2026,
            option_label: "A".to_string(),
            start_date: d(2026, 12, 21),
            end_date: d(2026, 12, 27),
            created_at: None,
        };
        let choice = choices::Model {
            id: Uuid::new_v4(),
            user_id: marta,
            year: 2026,
            option_label: "A".to_string(),
            created_at: None,
        };
        let profile = profiles::Model {
            id: luis,
            email: "luis@example.com".to_string(),
            name: "Luis Pérez".to_string(),
            birth_date: None,
            created_at: None,
            updated_at: None,
        };
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![request]])
            .append_query_results([vec![option]])
            .append_query_results([vec![choice]])
            .append_query_results([Vec::<birthdays::Model>::new()])
            .append_query_results([vec![profile]])
            .into_connection();

        let overlay = service(pool).month(2026, 12).await.unwrap();
        assert_eq!(overlay.days.len(), 31);
        // 2026-12-01 是周二
        assert_eq!(overlay.leading_blanks, 1);

        let dec_22 = &overlay.days[21];
        assert_eq!(dec_22.entries.len(), 1);
        assert_eq!(dec_22.entries[0].owner_name, "Usuario");

        let dec_28 = &overlay.days[27];
        assert_eq!(dec_28.entries[0].display_name, "Luis");
        assert!(overlay.days[23].is_holiday);
    }

    #[tokio::test]
    async fn test_month_renders_placeholders_when_name_lookup_fails() {
        let luis = Uuid::new_v4();
        let marta = Uuid::new_v4();
        let birthday = birthdays::Model {
            id: Uuid::new_v4(),
            user_id: marta,
            year: 2026,
            selected_date: d(2026, 12, 3),
            created_at: None,
        };
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![december_request(luis)]])
            .append_query_results([Vec::<options::Model>::new()])
            .append_query_results([Vec::<choices::Model>::new()])
            .append_query_results([vec![birthday]])
            .append_query_errors([DbErr::Custom("profiles unavailable".to_string())])
            .into_connection();

        let overlay = service(pool).month(2026, 12).await.unwrap();
        let dec_3 = &overlay.days[2];
        assert_eq!(dec_3.entries[0].owner_name, "Usuario");
        let dec_28 = &overlay.days[27];
        assert_eq!(dec_28.entries[0].owner_name, "Unknown");
        assert_eq!(dec_28.entries[0].owner_id, luis);
    }
}
