use crate::entities::{AppRole, profile_entity as profiles};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 当前登录用户的显式上下文，替代全局的“当前用户”状态
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerContext {
    pub owner_id: Uuid,
    pub name: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub role: AppRole,
}

impl OwnerContext {
    pub fn is_admin(&self) -> bool {
        self.role == AppRole::Admin
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserWithRole {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub role: AppRole,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserWithRole {
    /// 没有角色记录的用户按普通员工处理
    pub fn from_profile(profile: profiles::Model, role: Option<AppRole>) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            birth_date: profile.birth_date,
            role: role.unwrap_or(AppRole::Employee),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<UserWithRole> for OwnerContext {
    fn from(user: UserWithRole) -> Self {
        Self {
            owner_id: user.id,
            name: user.name,
            email: user.email,
            birth_date: user.birth_date,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: AppRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateBirthDateRequest {
    #[schema(value_type = String, example = "1990-05-17")]
    pub birth_date: NaiveDate,
}
