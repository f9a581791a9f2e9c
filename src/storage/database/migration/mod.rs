use sea_orm_migration::prelude::*;

mod m20240501_000001_create_users_table;
mod m20240501_000002_create_user_sessions_table;
mod m20240501_000003_create_projects_table;
mod m20240501_000004_create_project_members_table;
mod m20240501_000005_create_billing_accounts_table;
mod m20240501_000006_create_invoices_table;
mod m20240501_000007_create_subscriptions_table;
mod m20240501_000008_create_transactions_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_users_table::Migration),
            Box::new(m20240501_000002_create_user_sessions_table::Migration),
            Box::new(m20240501_000003_create_projects_table::Migration),
            Box::new(m20240501_000004_create_project_members_table::Migration),
            Box::new(m20240501_000005_create_billing_accounts_table::Migration),
            Box::new(m20240501_000006_create_invoices_table::Migration),
            Box::new(m20240501_000007_create_subscriptions_table::Migration),
            Box::new(m20240501_000008_create_transactions_table::Migration),
        ]
    }
}
