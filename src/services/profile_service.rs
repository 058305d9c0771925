use crate::entities::{AppRole, profile_entity as profiles, user_role_entity as user_roles};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileService {
    pool: Arc<DatabaseConnection>,
}

impl ProfileService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// 当前登录用户的上下文；资料不存在视为没有活动用户
    pub async fn owner_context(&self, owner_id: Uuid) -> AppResult<OwnerContext> {
        let profile = profiles::Entity::find_by_id(owner_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::NoActiveOwner)?;
        let role = self.role_of(owner_id).await?;
        Ok(UserWithRole::from_profile(profile, role).into())
    }

    async fn role_of(&self, user_id: Uuid) -> AppResult<Option<AppRole>> {
        let row = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .one(self.pool.as_ref())
            .await?;
        Ok(row.map(|r| r.role))
    }

    /// id -> 姓名；查不到的 id 不出现在结果里，由调用方决定占位
    pub async fn names_for(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = profiles::Entity::find()
            .filter(profiles::Column::Id.is_in(ids.iter().copied()))
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(|p| (p.id, p.name)).collect())
    }

    /// 所有用户及其角色，按姓名排序
    pub async fn list_users_with_roles(&self, ctx: &OwnerContext) -> AppResult<Vec<UserWithRole>> {
        ctx.require_admin()?;

        let rows = profiles::Entity::find()
            .order_by_asc(profiles::Column::Name)
            .all(self.pool.as_ref())
            .await?;
        let roles: HashMap<Uuid, AppRole> = user_roles::Entity::find()
            .all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(|r| (r.user_id, r.role))
            .collect();

        Ok(rows
            .into_iter()
            .map(|p| {
                let role = roles.get(&p.id).copied();
                UserWithRole::from_profile(p, role)
            })
            .collect())
    }

    pub async fn update_role(
        &self,
        ctx: &OwnerContext,
        user_id: Uuid,
        role: AppRole,
    ) -> AppResult<UserWithRole> {
        ctx.require_admin()?;
        let profile = self.find_profile(user_id).await?;

        // 每个用户只有一条角色记录，存在即更新
        let row = user_roles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(role),
            created_at: Set(Some(Utc::now())),
        };
        user_roles::Entity::insert(row)
            .on_conflict(
                OnConflict::column(user_roles::Column::UserId)
                    .update_column(user_roles::Column::Role)
                    .to_owned(),
            )
            .exec_without_returning(self.pool.as_ref())
            .await?;

        log::info!("Role of user {} set to {} by {}", user_id, role, ctx.owner_id);
        Ok(UserWithRole::from_profile(profile, Some(role)))
    }

    pub async fn update_birth_date(
        &self,
        ctx: &OwnerContext,
        user_id: Uuid,
        birth_date: NaiveDate,
    ) -> AppResult<UserWithRole> {
        ctx.require_admin()?;
        let profile = self.find_profile(user_id).await?;

        let mut am = profile.into_active_model();
        am.birth_date = Set(Some(birth_date));
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(self.pool.as_ref()).await?;

        let role = self.role_of(user_id).await?;
        log::info!("Birth date of user {} updated by {}", user_id, ctx.owner_id);
        Ok(UserWithRole::from_profile(updated, role))
    }

    async fn find_profile(&self, user_id: Uuid) -> AppResult<profiles::Model> {
        profiles::Entity::find_by_id(user_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn profile(name: &str) -> profiles::Model {
        profiles::Model {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            birth_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_no_active_owner() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profiles::Model>::new()])
            .into_connection();
        let pool = Arc::new(pool);
        let service = ProfileService::new(pool);

        let err = service.owner_context(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NoActiveOwner));
    }

    #[tokio::test]
    async fn test_profile_without_role_is_employee() {
        let p = profile("Marta");
        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![p.clone()]])
            .append_query_results([Vec::<user_roles::Model>::new()])
            .into_connection();
        let pool = Arc::new(pool);
        let service = ProfileService::new(pool);

        let ctx = service.owner_context(p.id).await.unwrap();
        assert_eq!(ctx.role, AppRole::Employee);
        assert_eq!(ctx.name, "Marta");
    }

    #[tokio::test]
    async fn test_admin_operations_require_admin() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = Arc::new(pool);
        let service = ProfileService::new(pool);
        let ctx = OwnerContext {
            owner_id: Uuid::new_v4(),
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            birth_date: None,
            role: AppRole::Employee,
        };

        let err = service.list_users_with_roles(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        let err = service
            .update_role(&ctx, Uuid::new_v4(), AppRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_names_for_empty_ids_skips_query() {
        let pool = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = Arc::new(pool);
        let service = ProfileService::new(pool);
        assert!(service.names_for(&[]).await.unwrap().is_empty());
    }
}
