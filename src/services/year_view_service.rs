use crate::error::AppResult;
use crate::models::*;
use crate::services::{BirthdayService, HolidayService, VacationService};
use crate::vacation::{
    DefaultKind, DefaultedYears, compute_balance, plan_birthday_default, plan_holiday_default,
    synthetic_entries,
};

/// “我的假期”年视图。打开某一年时顺带补齐生日假与圣诞周的默认选择。
///
/// 默认值用 `ON CONFLICT DO NOTHING` 写入后重新读取，并发的显式选择总是保留；
/// `DefaultedYears` 由调用方持有（每个请求一份），不在用户之间共享。
#[derive(Clone)]
pub struct YearViewService {
    vacation_service: VacationService,
    holiday_service: HolidayService,
    birthday_service: BirthdayService,
    base_days: i32,
}

impl YearViewService {
    pub fn new(
        vacation_service: VacationService,
        holiday_service: HolidayService,
        birthday_service: BirthdayService,
        base_days: i32,
    ) -> Self {
        Self {
            vacation_service,
            holiday_service,
            birthday_service,
            base_days,
        }
    }

    pub async fn summary(
        &self,
        ctx: &OwnerContext,
        year: i32,
        defaulted: &mut DefaultedYears,
    ) -> AppResult<YearSummary> {
        let requests = self
            .vacation_service
            .records_for_year(ctx.owner_id, year)
            .await?;
        let balance = compute_balance(&requests, year, self.base_days);
        let holiday_options = self.holiday_service.options_for_year(year).await?;

        let mut auto_assigned = AutoAssigned::default();

        let mut birthday_day = self.birthday_service.day_for(ctx.owner_id, year).await?;
        if let Some(date) = plan_birthday_default(ctx, year, birthday_day.as_ref(), defaulted) {
            let inserted = self
                .birthday_service
                .insert_default_day(ctx.owner_id, year, date)
                .await?;
            defaulted.mark(DefaultKind::Birthday, ctx.owner_id, year);
            if inserted {
                log::info!("Default birthday day {} assigned to {}", date, ctx.owner_id);
                auto_assigned.birthday = true;
            }
            birthday_day = self.birthday_service.day_for(ctx.owner_id, year).await?;
        }

        let mut holiday_choice = self.holiday_service.choice_for(ctx.owner_id, year).await?;
        if let Some(option) = plan_holiday_default(
            ctx,
            year,
            holiday_choice.as_ref(),
            &holiday_options,
            defaulted,
        ) {
            let inserted = self
                .holiday_service
                .insert_default_choice(ctx.owner_id, year, &option.label)
                .await?;
            defaulted.mark(DefaultKind::HolidayWeek, ctx.owner_id, year);
            if inserted {
                log::info!(
                    "Default holiday week {} {} assigned to {}",
                    year,
                    option.label,
                    ctx.owner_id
                );
                auto_assigned.holiday_week = true;
            }
            holiday_choice = self.holiday_service.choice_for(ctx.owner_id, year).await?;
        }

        let choices: Vec<UserHolidayChoice> = holiday_choice
            .iter()
            .cloned()
            .map(|c| UserHolidayChoice {
                owner_name: Some(ctx.name.clone()),
                ..c
            })
            .collect();
        let birthdays: Vec<UserBirthdayDay> = birthday_day
            .iter()
            .cloned()
            .map(|b| UserBirthdayDay {
                owner_name: Some(ctx.name.clone()),
                ..b
            })
            .collect();
        let synthetic = synthetic_entries(&choices, &birthdays, &holiday_options);

        Ok(YearSummary {
            year,
            balance,
            requests,
            holiday_options,
            holiday_choice,
            birthday_day,
            synthetic,
            auto_assigned,
        })
    }
}
