use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// 统一响应包裹：`{ "success": true, "data": ... }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// `?year=2026`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, IntoParams)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    /// 未指定年份时使用本地当前年份
    pub fn year_or_current(&self) -> i32 {
        use chrono::Datelike;
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }
}
