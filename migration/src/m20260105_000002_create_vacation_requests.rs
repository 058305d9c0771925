use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum VacationRequests {
    Table,
    Id,
    UserId,
    StartDate,
    EndDate,
    Type,
    Status,
    DaysCount,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("vacation_type"))
                    .values(vec![
                        Alias::new("regular"),
                        Alias::new("birthday"),
                        Alias::new("holiday"),
                        Alias::new("christmas"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("vacation_status"))
                    .values(vec![
                        Alias::new("approved"),
                        Alias::new("pending"),
                        Alias::new("rejected"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VacationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VacationRequests::Id)
                            .uuid()
                            .not_null()
                            .default(Expr::cust("gen_random_uuid()"))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VacationRequests::UserId).uuid().not_null())
                    .col(ColumnDef::new(VacationRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(VacationRequests::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(VacationRequests::Type)
                            .custom(Alias::new("vacation_type"))
                            .not_null()
                            .default(Expr::cust("'regular'::vacation_type")),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::Status)
                            .custom(Alias::new("vacation_status"))
                            .not_null()
                            .default(Expr::cust("'approved'::vacation_status")),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::DaysCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(VacationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .check(
                        Expr::col(VacationRequests::StartDate)
                            .lte(Expr::col(VacationRequests::EndDate)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vacation_requests_user")
                    .table(VacationRequests::Table)
                    .col(VacationRequests::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VacationRequests::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("vacation_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("vacation_type")).to_owned())
            .await?;
        Ok(())
    }
}
