use crate::entities::birthday_day_entity as birthdays;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct BirthdayService {
    pool: Arc<DatabaseConnection>,
}

impl BirthdayService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    pub async fn day_for(&self, owner_id: Uuid, year: i32) -> AppResult<Option<UserBirthdayDay>> {
        let row = birthdays::Entity::find()
            .filter(birthdays::Column::UserId.eq(owner_id))
            .filter(birthdays::Column::Year.eq(year))
            .one(self.pool.as_ref())
            .await?;
        Ok(row.map(UserBirthdayDay::from))
    }

    pub async fn days_for_year(&self, year: i32) -> AppResult<Vec<UserBirthdayDay>> {
        let rows = birthdays::Entity::find()
            .filter(birthdays::Column::Year.eq(year))
            .order_by_asc(birthdays::Column::SelectedDate)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(UserBirthdayDay::from).collect())
    }

    /// 生日假必须落在所选年份内
    pub async fn save_day(
        &self,
        owner_id: Uuid,
        request: SaveBirthdayDayRequest,
    ) -> AppResult<UserBirthdayDay> {
        if request.selected_date.year() != request.year {
            return Err(AppError::ValidationError(format!(
                "{} is not in {}",
                request.selected_date, request.year
            )));
        }
        self.upsert_day(owner_id, request.year, request.selected_date)
            .await
    }

    async fn upsert_day(
        &self,
        owner_id: Uuid,
        year: i32,
        selected_date: NaiveDate,
    ) -> AppResult<UserBirthdayDay> {
        let row = birthdays::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            year: Set(year),
            selected_date: Set(selected_date),
            created_at: Set(Some(Utc::now())),
        };
        let saved = birthdays::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([birthdays::Column::UserId, birthdays::Column::Year])
                    .update_column(birthdays::Column::SelectedDate)
                    .to_owned(),
            )
            .exec_with_returning(self.pool.as_ref())
            .await?;
        log::info!("Birthday day {} saved for {}", selected_date, owner_id);
        Ok(saved.into())
    }

    /// 自动默认值：已有记录时什么都不做，返回是否真的写入了一行
    pub(crate) async fn insert_default_day(
        &self,
        owner_id: Uuid,
        year: i32,
        selected_date: NaiveDate,
    ) -> AppResult<bool> {
        let row = birthdays::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            year: Set(year),
            selected_date: Set(selected_date),
            created_at: Set(Some(Utc::now())),
        };
        let inserted = birthdays::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([birthdays::Column::UserId, birthdays::Column::Year])
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
    use crate::services::test_support::transaction_log;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_date_outside_year_is_rejected() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = Arc::new(pool);
        let service = BirthdayService::new(pool);

        let err = service
            .save_day(
                Uuid::new_v4(),
                SaveBirthdayDayRequest {
                    year: 2026,
                    selected_date: NaiveDate::from_ymd_opt(2027, 5, 17).unwrap(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_save_returns_stored_row() {
        let owner = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();
        let stored = birthdays::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            year: 2026,
            selected_date: date,
            created_at: None,
        };
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored]])
            .into_connection();
        let pool = Arc::new(pool);
        let service = BirthdayService::new(pool);

        let saved = service
            .save_day(
                owner,
                SaveBirthdayDayRequest {
                    year: 2026,
                    selected_date: date,
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.owner_id, owner);
        assert_eq!(saved.selected_date, date);
    }

    #[tokio::test]
    async fn test_default_day_does_not_overwrite_existing_row() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let pool = Arc::new(pool);
        let service = BirthdayService::new(Arc::clone(&pool));

        let inserted = service
            .insert_default_day(
                Uuid::new_v4(),
                2026,
                NaiveDate::from_ymd_opt(2026, 5, 17).unwrap(),
            )
            .await
            .unwrap();
        assert!(!inserted);

        drop(service);
        let log = transaction_log(pool);
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("DO NOTHING"));
        assert!(!sql.contains("DO UPDATE"));
    }
}
