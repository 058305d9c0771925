use crate::entities::{VacationCategory, VacationStatus, vacation_request_entity as requests};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::vacation::{compute_balance, validate_submission};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 合成条目的 id 前缀，这些条目没有对应的行，不能删除
const SYNTHETIC_ID_PREFIXES: [&str; 2] = ["christmas-", "birthday-"];

#[derive(Clone)]
pub struct VacationService {
    pool: Arc<DatabaseConnection>,
    base_days: i32,
}

impl VacationService {
    pub fn new(pool: Arc<DatabaseConnection>, base_days: i32) -> Self {
        Self { pool, base_days }
    }

    /// 自己的全部申请，最新的在前
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<TimeOffRecord>> {
        let rows = requests::Entity::find()
            .filter(requests::Column::UserId.eq(owner_id))
            .order_by_desc(requests::Column::CreatedAt)
            .order_by_desc(requests::Column::StartDate)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(TimeOffRecord::from).collect())
    }

    /// 按开始日期所在年份归属
    pub async fn records_for_year(&self, owner_id: Uuid, year: i32) -> AppResult<Vec<TimeOffRecord>> {
        let (first, last) = year_bounds(year)?;
        let rows = requests::Entity::find()
            .filter(requests::Column::UserId.eq(owner_id))
            .filter(requests::Column::StartDate.between(first, last))
            .order_by_asc(requests::Column::StartDate)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(TimeOffRecord::from).collect())
    }

    pub async fn balance(&self, owner_id: Uuid, year: i32) -> AppResult<Balance> {
        let records = self.records_for_year(owner_id, year).await?;
        Ok(compute_balance(&records, year, self.base_days))
    }

    /// 与 [first, last] 有交集的已批准申请（所有人），按 (created_at, id) 排序
    pub async fn approved_overlapping(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> AppResult<Vec<TimeOffRecord>> {
        let rows = requests::Entity::find()
            .filter(requests::Column::Status.eq(VacationStatus::Approved))
            .filter(requests::Column::StartDate.lte(last))
            .filter(requests::Column::EndDate.gte(first))
            .order_by_asc(requests::Column::CreatedAt)
            .order_by_asc(requests::Column::Id)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(TimeOffRecord::from).collect())
    }

    /// 校验后写入一条已批准的普通假期；校验失败时不写库
    pub async fn create_request(
        &self,
        ctx: &OwnerContext,
        request: CreateVacationRequest,
    ) -> AppResult<CreateVacationResponse> {
        let range = request.range();
        // 缺少起止日期时不查余额
        let (Some(start_date), Some(end_date)) = (range.start_date, range.end_date) else {
            return Err(AppError::MissingRange);
        };
        let balance = self.balance(ctx.owner_id, start_date.year()).await?;
        let day_count = validate_submission(&range, balance.remaining_days)?;

        let row = requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(ctx.owner_id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            category: Set(VacationCategory::Regular),
            status: Set(VacationStatus::Approved),
            days_count: Set(day_count),
            created_at: Set(Some(Utc::now())),
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!(
            "Vacation {} created for {}: {} ~ {} ({} days)",
            row.id,
            ctx.owner_id,
            start_date,
            end_date,
            day_count
        );

        Ok(CreateVacationResponse {
            request: TimeOffRecord::from(row),
            balance: Balance {
                used_days: balance.used_days + day_count,
                remaining_days: balance.remaining_days - day_count,
                ..balance
            },
        })
    }

    pub async fn delete_request(&self, ctx: &OwnerContext, id: &str) -> AppResult<()> {
        if SYNTHETIC_ID_PREFIXES.iter().any(|p| id.starts_with(p)) {
            return Err(AppError::ValidationError(
                "Holiday week and birthday entries are changed through their own choice"
                    .to_string(),
            ));
        }
        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("Invalid request id: {id}")))?;

        let row = requests::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Vacation request not found".to_string()))?;
        if row.user_id != ctx.owner_id {
            return Err(AppError::Forbidden);
        }

        row.delete(self.pool.as_ref()).await?;
        log::info!("Vacation {} deleted by {}", id, ctx.owner_id);
        Ok(())
    }
}

pub(crate) fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .ok_or_else(|| AppError::ValidationError(format!("Invalid year: {year}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppRole;
    use crate::services::test_support::transaction_log;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ctx() -> OwnerContext {
        OwnerContext {
            owner_id: Uuid::new_v4(),
            name: "Marta Ruiz".to_string(),
            email: "marta@example.com".to_string(),
            birth_date: None,
            role: AppRole::Employee,
        }
    }

    fn row(owner: Uuid, start: NaiveDate, end: NaiveDate, days: i32) -> requests::Model {
        requests::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            start_date: start,
            end_date: end,
            category: VacationCategory::Regular,
            status: VacationStatus::Approved,
            days_count: days,
            created_at: None,
        }
    }

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_insufficient_balance_does_not_insert() {
        let ctx = ctx();
        let used = row(ctx.owner_id, d(2026, 2, 2), d(2026, 2, 27), 20);
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![used]])
            .into_connection();
        let pool = Arc::new(pool);
        let service = VacationService::new(Arc::clone(&pool), 22);

        let request = CreateVacationRequest {
            start_date: Some(d(2026, 7, 6)),
            end_date: Some(d(2026, 7, 10)),
        };
        let err = service.create_request(&ctx, request).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientBalance { remaining: 2 }));

        // 只有读余额的一次查询
        drop(service);
        assert_eq!(transaction_log(pool).len(), 1);
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_rejected_before_any_query() {
        let pool = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = VacationService::new(Arc::clone(&pool), 22);

        let request = CreateVacationRequest {
            start_date: Some(d(2026, 7, 6)),
            end_date: None,
        };
        let err = service.create_request(&ctx(), request).await.unwrap_err();
        assert!(matches!(err, AppError::MissingRange));

        let request = CreateVacationRequest {
            start_date: None,
            end_date: None,
        };
        let err = service.create_request(&ctx(), request).await.unwrap_err();
        assert!(matches!(err, AppError::MissingRange));

        drop(service);
        assert!(transaction_log(pool).is_empty());
    }

    #[tokio::test]
    async fn test_create_request_returns_updated_balance() {
        let ctx = ctx();
        let inserted = row(ctx.owner_id, d(2026, 7, 1), d(2026, 7, 15), 11);
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<requests::Model>::new()])
            .append_query_results([vec![inserted.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let pool = Arc::new(pool);
        let service = VacationService::new(pool, 22);

        let request = CreateVacationRequest {
            start_date: Some(d(2026, 7, 1)),
            end_date: Some(d(2026, 7, 15)),
        };
        let created = service.create_request(&ctx, request).await.unwrap();
        assert_eq!(created.request.day_count, 11);
        assert_eq!(created.balance.used_days, 11);
        assert_eq!(created.balance.remaining_days, 11);
    }

    #[tokio::test]
    async fn test_synthetic_ids_cannot_be_deleted() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = Arc::new(pool);
        let service = VacationService::new(pool, 22);
        let ctx = ctx();

        let id = format!("christmas-{}-2026", ctx.owner_id);
        let err = service.delete_request(&ctx, &id).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let id = format!("birthday-{}-2026", ctx.owner_id);
        assert!(service.delete_request(&ctx, &id).await.is_err());
    }

    #[tokio::test]
    async fn test_cannot_delete_someone_elses_request() {
        let other = row(Uuid::new_v4(), d(2026, 3, 2), d(2026, 3, 2), 1);
        let id = other.id.to_string();
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![other]])
            .into_connection();
        let pool = Arc::new(pool);
        let service = VacationService::new(pool, 22);

        let err = service.delete_request(&ctx(), &id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
