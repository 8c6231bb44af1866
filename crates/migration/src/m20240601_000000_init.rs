//! Initial schema migration.
//!
//! - `budgets`: capped allocations, optionally bounded in time
//! - `incomes`: fixed and variable inflows
//! - `expenses`: recurring, single and credit card outflows
//! - `budget_movements`: the monthly ledger derived from the records above

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    Amount,
    Description,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    Description,
    Amount,
    Type,
    DueDay,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Description,
    Amount,
    Type,
    BudgetId,
    Recurrency,
    Method,
    Installments,
    DueDay,
    Weekday,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BudgetMovements {
    Table,
    Id,
    BudgetId,
    Origin,
    Month,
    Year,
    Type,
    Amount,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Budgets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::Amount).double().not_null())
                    .col(ColumnDef::new(Budgets::Description).string().not_null())
                    .col(ColumnDef::new(Budgets::EndDate).date())
                    .col(
                        ColumnDef::new(Budgets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Incomes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Incomes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Incomes::Description).string().not_null())
                    .col(ColumnDef::new(Incomes::Amount).double().not_null())
                    .col(ColumnDef::new(Incomes::Type).string().not_null())
                    .col(ColumnDef::new(Incomes::DueDay).integer().not_null())
                    .col(ColumnDef::new(Incomes::StartDate).date().not_null())
                    .col(ColumnDef::new(Incomes::EndDate).date())
                    .col(
                        ColumnDef::new(Incomes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Incomes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::Type).string().not_null())
                    .col(ColumnDef::new(Expenses::BudgetId).string())
                    .col(ColumnDef::new(Expenses::Recurrency).string())
                    .col(ColumnDef::new(Expenses::Method).string().not_null())
                    .col(ColumnDef::new(Expenses::Installments).integer())
                    .col(ColumnDef::new(Expenses::DueDay).integer().not_null())
                    .col(ColumnDef::new(Expenses::Weekday).integer())
                    .col(ColumnDef::new(Expenses::StartDate).date().not_null())
                    .col(ColumnDef::new(Expenses::EndDate).date())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-budget_id")
                            .from(Expenses::Table, Expenses::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-type-start_date")
                    .table(Expenses::Table)
                    .col(Expenses::Type)
                    .col(Expenses::StartDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Budget movements
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(BudgetMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetMovements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BudgetMovements::BudgetId).string().not_null())
                    .col(ColumnDef::new(BudgetMovements::Origin).string().not_null())
                    .col(ColumnDef::new(BudgetMovements::Month).integer().not_null())
                    .col(ColumnDef::new(BudgetMovements::Year).integer().not_null())
                    .col(ColumnDef::new(BudgetMovements::Type).string().not_null())
                    .col(
                        ColumnDef::new(BudgetMovements::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetMovements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget_movements-budget_id")
                            .from(BudgetMovements::Table, BudgetMovements::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: a weekly expense owns several movements per period.
        manager
            .create_index(
                Index::create()
                    .name("idx-budget_movements-origin-period-type")
                    .table(BudgetMovements::Table)
                    .col(BudgetMovements::Origin)
                    .col(BudgetMovements::Month)
                    .col(BudgetMovements::Year)
                    .col(BudgetMovements::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budget_movements-budget_id-period")
                    .table(BudgetMovements::Table)
                    .col(BudgetMovements::BudgetId)
                    .col(BudgetMovements::Year)
                    .col(BudgetMovements::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BudgetMovements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await
    }
}
