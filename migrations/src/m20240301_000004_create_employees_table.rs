use sea_orm_migration::prelude::*;

use super::m20240301_000002_create_departments_table::Departments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::EmployeeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department_id")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::DepartmentId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Employees {
    #[sea_orm(iden = "Employees")]
    Table,
    EmployeeId,
    FirstName,
    LastName,
    DepartmentId,
}
