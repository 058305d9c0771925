use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum ChristmasOptions {
    Table,
    Id,
    Year,
    OptionLabel,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChristmasOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChristmasOptions::Id)
                            .uuid()
                            .not_null()
                            .default(Expr::cust("gen_random_uuid()"))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChristmasOptions::Year).integer().not_null())
                    .col(ColumnDef::new(ChristmasOptions::OptionLabel).string_len(1).not_null())
                    .col(ColumnDef::new(ChristmasOptions::StartDate).date().not_null())
                    .col(ColumnDef::new(ChristmasOptions::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(ChristmasOptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .check(
                        Expr::col(ChristmasOptions::StartDate)
                            .lte(Expr::col(ChristmasOptions::EndDate)),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (year, option_label)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_christmas_options_year_label")
                    .table(ChristmasOptions::Table)
                    .col(ChristmasOptions::Year)
                    .col(ChristmasOptions::OptionLabel)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChristmasOptions::Table).to_owned())
            .await?;
        Ok(())
    }
}
