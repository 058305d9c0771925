use crate::entities::{holiday_choice_entity as choices, holiday_option_entity as options};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 圣诞周选项（管理员维护）与每个人每年的选择
#[derive(Clone)]
pub struct HolidayService {
    pool: Arc<DatabaseConnection>,
}

impl HolidayService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// 某一年的选项，按标签排序
    pub async fn options_for_year(&self, year: i32) -> AppResult<Vec<HolidayWeekOption>> {
        self.options_for_years(&[year]).await
    }

    pub async fn options_for_years(&self, years: &[i32]) -> AppResult<Vec<HolidayWeekOption>> {
        let rows = options::Entity::find()
            .filter(options::Column::Year.is_in(years.iter().copied()))
            .order_by_asc(options::Column::Year)
            .order_by_asc(options::Column::OptionLabel)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(HolidayWeekOption::from).collect())
    }

    pub async fn all_options(&self, ctx: &OwnerContext) -> AppResult<Vec<HolidayWeekOption>> {
        ctx.require_admin()?;
        let rows = options::Entity::find()
            .order_by_asc(options::Column::Year)
            .order_by_asc(options::Column::OptionLabel)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(HolidayWeekOption::from).collect())
    }

    pub async fn update_option(
        &self,
        ctx: &OwnerContext,
        id: Uuid,
        request: UpdateHolidayOptionRequest,
    ) -> AppResult<HolidayWeekOption> {
        ctx.require_admin()?;
        let current = options::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Holiday option not found".to_string()))?;

        let start_date = request.start_date.unwrap_or(current.start_date);
        let end_date = request.end_date.unwrap_or(current.end_date);
        if end_date < start_date {
            return Err(AppError::InvalidRange);
        }

        let mut am = current.into_active_model();
        am.start_date = Set(start_date);
        am.end_date = Set(end_date);
        let updated = am.update(self.pool.as_ref()).await?;

        log::info!(
            "Holiday option {} {} set to {} ~ {} by {}",
            updated.year,
            updated.option_label,
            start_date,
            end_date,
            ctx.owner_id
        );
        Ok(updated.into())
    }

    pub async fn choice_for(&self, owner_id: Uuid, year: i32) -> AppResult<Option<UserHolidayChoice>> {
        let row = choices::Entity::find()
            .filter(choices::Column::UserId.eq(owner_id))
            .filter(choices::Column::Year.eq(year))
            .one(self.pool.as_ref())
            .await?;
        Ok(row.map(UserHolidayChoice::from))
    }

    /// 所有人在这些年份的选择；姓名由调用方补齐
    pub async fn choices_for_years(&self, years: &[i32]) -> AppResult<Vec<UserHolidayChoice>> {
        let rows = choices::Entity::find()
            .filter(choices::Column::Year.is_in(years.iter().copied()))
            .order_by_asc(choices::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(UserHolidayChoice::from).collect())
    }

    /// 显式选择：标签必须是当年已配置的选项
    pub async fn save_choice(
        &self,
        owner_id: Uuid,
        request: SaveHolidayChoiceRequest,
    ) -> AppResult<UserHolidayChoice> {
        let available = self.options_for_year(request.year).await?;
        if !available.iter().any(|o| o.label == request.label) {
            return Err(AppError::ValidationError(format!(
                "No holiday week option {} for {}",
                request.label, request.year
            )));
        }
        self.upsert_choice(owner_id, request.year, &request.label).await
    }

    /// (user_id, year) 唯一，已存在则覆盖标签
    async fn upsert_choice(
        &self,
        owner_id: Uuid,
        year: i32,
        label: &str,
    ) -> AppResult<UserHolidayChoice> {
        let row = choices::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            year: Set(year),
            option_label: Set(label.to_string()),
            created_at: Set(Some(Utc::now())),
        };
        let saved = choices::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([choices::Column::UserId, choices::Column::Year])
                    .update_column(choices::Column::OptionLabel)
                    .to_owned(),
            )
            .exec_with_returning(self.pool.as_ref())
            .await?;
        log::info!("Holiday week {} {} saved for {}", year, label, owner_id);
        Ok(saved.into())
    }

    /// 自动默认值：不覆盖已有的选择，返回是否真的写入了一行
    pub(crate) async fn insert_default_choice(
        &self,
        owner_id: Uuid,
        year: i32,
        label: &str,
    ) -> AppResult<bool> {
        let row = choices::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            year: Set(year),
            option_label: Set(label.to_string()),
            created_at: Set(Some(Utc::now())),
        };
        let inserted = choices::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([choices::Column::UserId, choices::Column::Year])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;
        Ok(inserted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppRole;
    use crate::services::test_support::transaction_log;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn option_row(label: &str) -> options::Model {
        options::Model {
            id: Uuid::new_v4(),
            year: 2026,
            option_label: label.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 12, 21).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 27).unwrap(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_label_is_rejected_without_write() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![option_row("A"), option_row("B")]])
            .into_connection();
        let pool = Arc::new(pool);
        let service = HolidayService::new(Arc::clone(&pool));

        let err = service
            .save_choice(
                Uuid::new_v4(),
                SaveHolidayChoiceRequest {
                    year: 2026,
                    label: "C".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        drop(service);
        assert_eq!(transaction_log(pool).len(), 1);
    }

    #[tokio::test]
    async fn test_update_option_rejects_reversed_range() {
        let current = option_row("A");
        let id = current.id;
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current]])
            .into_connection();
        let pool = Arc::new(pool);
        let service = HolidayService::new(pool);
        let admin = OwnerContext {
            owner_id: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            birth_date: None,
            role: AppRole::Admin,
        };

        let err = service
            .update_option(
                &admin,
                id,
                UpdateHolidayOptionRequest {
                    start_date: None,
                    end_date: NaiveDate::from_ymd_opt(2026, 12, 20),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRange));
    }

    #[tokio::test]
    async fn test_explicit_save_overwrites_but_default_does_not() {
        let owner = Uuid::new_v4();
        let stored = choices::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            year: 2026,
            option_label: "B".to_string(),
            created_at: None,
        };
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![option_row("A"), option_row("B")]])
            .append_query_results([vec![stored]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let pool = Arc::new(pool);
        let service = HolidayService::new(Arc::clone(&pool));

        let saved = service
            .save_choice(
                owner,
                SaveHolidayChoiceRequest {
                    year: 2026,
                    label: "B".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.label, "B");
        let inserted = service.insert_default_choice(owner, 2026, "A").await.unwrap();
        assert!(!inserted);

        drop(service);
        let log = transaction_log(pool);
        assert_eq!(log.len(), 3);
        assert!(format!("{:?}", log[1]).contains("DO UPDATE"));
        assert!(format!("{:?}", log[2]).contains("DO NOTHING"));
    }
}
