use sea_orm_migration::prelude::*;

use super::m20240301_000003_create_customers_table::Customers;
use super::m20240301_000004_create_employees_table::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Junction rows carry no identity beyond the pair
        manager
            .create_table(
                Table::create()
                    .table(EmployeeCustomer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeCustomer::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeCustomer::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_employee_customer")
                            .col(EmployeeCustomer::EmployeeId)
                            .col(EmployeeCustomer::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_customer_employee_id")
                            .from(EmployeeCustomer::Table, EmployeeCustomer::EmployeeId)
                            .to(Employees::Table, Employees::EmployeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_customer_customer_id")
                            .from(EmployeeCustomer::Table, EmployeeCustomer::CustomerId)
                            .to(Customers::Table, Customers::CustomerId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_customer_customer_id")
                    .table(EmployeeCustomer::Table)
                    .col(EmployeeCustomer::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeCustomer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmployeeCustomer {
    #[sea_orm(iden = "EmployeeCustomer")]
    Table,
    EmployeeId,
    CustomerId,
}
