pub mod birthday_service;
pub mod calendar_service;
pub mod holiday_service;
pub mod profile_service;
pub mod vacation_service;
pub mod year_view_service;

pub use birthday_service::*;
pub use calendar_service::*;
pub use holiday_service::*;
pub use profile_service::*;
pub use vacation_service::*;
pub use year_view_service::*;

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{DatabaseConnection, Transaction};
    use std::sync::Arc;

    /// 服务全部释放后取出 mock 连接执行过的语句
    pub fn transaction_log(pool: Arc<DatabaseConnection>) -> Vec<Transaction> {
        match Arc::try_unwrap(pool) {
            Ok(db) => db.into_transaction_log(),
            Err(_) => panic!("connection is still held by a service"),
        }
    }
}
