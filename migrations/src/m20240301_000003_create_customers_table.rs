use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_companies_table::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::CustomerId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Customers::Rating)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Customers::CompanyId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customers_company_id")
                            .from(Customers::Table, Customers::CompanyId)
                            .to(Companies::Table, Companies::CompanyId),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters on exact first/last name matches
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_names")
                    .table(Customers::Table)
                    .col(Customers::FirstName)
                    .col(Customers::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Customers {
    #[sea_orm(iden = "Customers")]
    Table,
    CustomerId,
    FirstName,
    LastName,
    Rating,
    CompanyId,
}
