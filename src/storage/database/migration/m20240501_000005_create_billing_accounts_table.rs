use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BillingAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillingAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One account per user is an application rule, not a constraint
                    .col(ColumnDef::new(BillingAccounts::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(BillingAccounts::AccountNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BillingAccounts::BillingAddress)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BillingAccounts::PaymentMethod)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BillingAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BillingAccounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_billing_accounts_user_id")
                            .from(BillingAccounts::Table, BillingAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_billing_accounts_user_id")
                    .table(BillingAccounts::Table)
                    .col(BillingAccounts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BillingAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BillingAccounts {
    Table,
    Id,
    UserId,
    AccountNumber,
    BillingAddress,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
