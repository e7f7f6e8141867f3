use sea_orm_migration::prelude::*;

use super::m20240301_000003_create_customers_table::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::SaleId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::CustomerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_customer_id")
                            .from(Sales::Table, Sales::CustomerId)
                            .to(Customers::Table, Customers::CustomerId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sales {
    #[sea_orm(iden = "Sales")]
    Table,
    SaleId,
    CustomerId,
}
