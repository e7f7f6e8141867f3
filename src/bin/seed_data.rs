//! Seed data script - populates the database with demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 3 companies
//! - 3 departments
//! - 6 employees
//! - 5 customers with employee assignments
//! - a few sales per customer

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use tracing::info;

use crm_portal::{
    config, db,
    entities::{company, customer, department, employee, employee_customer, sale},
};

const COMPANIES: &[&str] = &["Acme Corp", "Globex", "Initech"];
const DEPARTMENTS: &[&str] = &["Sales", "Support", "Accounts"];
const EMPLOYEES: &[(&str, &str, usize)] = &[
    ("Alice", "Tan", 0),
    ("Bala", "Kumar", 0),
    ("Chen", "Wei", 1),
    ("Dana", "Lim", 1),
    ("Eli", "Ong", 2),
    ("Fatimah", "Ismail", 2),
];
/// first name, last name, rating, company index, employee indexes, sales count
const CUSTOMERS: &[(&str, &str, i32, usize, &[usize], usize)] = &[
    ("Ahmad", "Yusof", 4, 0, &[0, 2], 2),
    ("Beatrice", "Ng", 5, 0, &[1], 1),
    ("Carlos", "Reyes", 3, 1, &[0, 4, 5], 3),
    ("Deepa", "Rao", 2, 2, &[], 0),
    ("Edmund", "Koh", 4, 2, &[3], 1),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== CRM Portal Seed Data ===");

    let cfg = config::load_config().context("failed to load configuration")?;
    let db = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;
    db::run_migrations(&db).await?;

    if seed_if_empty(db).await? {
        info!("=== Seed Data Complete ===");
        info!("Browse the portal at http://{}:{}/customers", cfg.host, cfg.port);
    }

    Ok(())
}

/// Seeds an empty database and closes the pool on every exit path.
/// Returns `false` when companies already exist.
async fn seed_if_empty(db: db::DbPool) -> anyhow::Result<bool> {
    if company::Entity::find().count(&db).await? > 0 {
        info!("Database already has companies; skipping seed");
        db::close_pool(db).await?;
        return Ok(false);
    }

    seed(&db).await?;
    db::close_pool(db).await?;
    Ok(true)
}

async fn seed(db: &DatabaseConnection) -> anyhow::Result<()> {
    let txn = db.begin().await?;

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for name in COMPANIES {
        let company = company::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        company_ids.push(company.company_id);
    }
    info!("  Created {} companies", company_ids.len());

    let mut department_ids = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        let department = department::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        department_ids.push(department.department_id);
    }
    info!("  Created {} departments", department_ids.len());

    let mut employee_ids = Vec::with_capacity(EMPLOYEES.len());
    for (first_name, last_name, department) in EMPLOYEES {
        let employee = employee::ActiveModel {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            department_id: Set(department_ids[*department]),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        employee_ids.push(employee.employee_id);
    }
    info!("  Created {} employees", employee_ids.len());

    let mut sales = 0;
    for (first_name, last_name, rating, company, assigned, sale_count) in CUSTOMERS {
        let customer = customer::ActiveModel {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            rating: Set(*rating),
            company_id: Set(company_ids[*company]),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !assigned.is_empty() {
            let rows = assigned.iter().map(|&idx| employee_customer::ActiveModel {
                employee_id: Set(employee_ids[idx]),
                customer_id: Set(customer.customer_id),
            });
            employee_customer::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        for _ in 0..*sale_count {
            sale::ActiveModel {
                customer_id: Set(customer.customer_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            sales += 1;
        }
    }
    info!("  Created {} customers and {} sales", CUSTOMERS.len(), sales);

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect(url: &str) -> db::DbPool {
        let mut cfg = config::AppConfig::new(
            url.to_string(),
            "127.0.0.1".to_string(),
            18_081,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        let pool = db::establish_connection_from_app_config(&cfg).await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn second_run_skips_and_still_closes() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("seed.db").display());

        assert!(seed_if_empty(connect(&url).await).await.unwrap());
        assert!(!seed_if_empty(connect(&url).await).await.unwrap());

        let pool = connect(&url).await;
        assert_eq!(
            company::Entity::find().count(&pool).await.unwrap(),
            COMPANIES.len() as u64
        );
        assert_eq!(
            customer::Entity::find().count(&pool).await.unwrap(),
            CUSTOMERS.len() as u64
        );
        db::close_pool(pool).await.unwrap();
    }
}
