use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum UserChristmasChoices {
    Table,
    Id,
    UserId,
    Year,
    OptionLabel,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserBirthdayDays {
    Table,
    Id,
    UserId,
    Year,
    SelectedDate,
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
                    .table(UserChristmasChoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserChristmasChoices::Id)
                            .uuid()
                            .not_null()
                            .default(Expr::cust("gen_random_uuid()"))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserChristmasChoices::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserChristmasChoices::Year).integer().not_null())
                    .col(
                        ColumnDef::new(UserChristmasChoices::OptionLabel)
                            .string_len(1)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserChristmasChoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // upsert 冲突键 (user_id, year)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_christmas_choices_user_year")
                    .table(UserChristmasChoices::Table)
                    .col(UserChristmasChoices::UserId)
                    .col(UserChristmasChoices::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserBirthdayDays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBirthdayDays::Id)
                            .uuid()
                            .not_null()
                            .default(Expr::cust("gen_random_uuid()"))
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBirthdayDays::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserBirthdayDays::Year).integer().not_null())
                    .col(ColumnDef::new(UserBirthdayDays::SelectedDate).date().not_null())
                    .col(
                        ColumnDef::new(UserBirthdayDays::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_birthday_days_user_year")
                    .table(UserBirthdayDays::Table)
                    .col(UserBirthdayDays::UserId)
                    .col(UserBirthdayDays::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBirthdayDays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserChristmasChoices::Table).to_owned())
            .await?;
        Ok(())
    }
}
