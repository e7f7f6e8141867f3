pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_companies_table;
mod m20240301_000002_create_departments_table;
mod m20240301_000003_create_customers_table;
mod m20240301_000004_create_employees_table;
mod m20240301_000005_create_employee_customer_table;
mod m20240301_000006_create_sales_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_companies_table::Migration),
            Box::new(m20240301_000002_create_departments_table::Migration),
            Box::new(m20240301_000003_create_customers_table::Migration),
            Box::new(m20240301_000004_create_employees_table::Migration),
            Box::new(m20240301_000005_create_employee_customer_table::Migration),
            Box::new(m20240301_000006_create_sales_table::Migration),
        ]
    }
}
