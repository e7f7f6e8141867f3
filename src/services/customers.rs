use crate::{
    db::{with_transaction, DbPool},
    entities::{company, customer, employee, employee_customer, sale},
    errors::{ServiceError, DELETE_BLOCKED_MESSAGE},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Optional exact-match filters for the customer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CustomerFilter {
    /// Blank values impose no constraint.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.filter(|v| !v.is_empty()),
            last_name: self.last_name.filter(|v| !v.is_empty()),
        }
    }

    pub fn condition(&self) -> Condition {
        Condition::all()
            .add_option(
                non_blank(&self.first_name).map(|v| customer::Column::FirstName.eq(v)),
            )
            .add_option(non_blank(&self.last_name).map(|v| customer::Column::LastName.eq(v)))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Customer row joined with its company for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerListing {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub rating: i32,
    pub company_id: i32,
    pub company_name: Option<String>,
}

impl From<(customer::Model, Option<company::Model>)> for CustomerListing {
    fn from((customer, company): (customer::Model, Option<company::Model>)) -> Self {
        Self {
            customer_id: customer.customer_id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            rating: customer.rating,
            company_id: customer.company_id,
            company_name: company.map(|c| c.name),
        }
    }
}

/// Validated values for creating or updating a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub rating: i32,
    pub company_id: i32,
    /// Employees assigned to the customer; a set, so duplicates collapse.
    pub employee_ids: BTreeSet<i32>,
}

/// Reference data the create and update forms choose from.
#[derive(Debug, Clone, Default)]
pub struct CustomerFormOptions {
    pub companies: Vec<company::Model>,
    pub employees: Vec<employee::Model>,
}

/// Service for managing customers and their employee assignments
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists customers with their company, ordered by id
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<CustomerListing>, ServiceError> {
        let db = &*self.db_pool;
        let rows = customer::Entity::find()
            .filter(filter.condition())
            .find_also_related(company::Entity)
            .order_by_asc(customer::Column::CustomerId)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(CustomerListing::from).collect())
    }

    /// Gets a customer by ID
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: i32) -> Result<customer::Model, ServiceError> {
        let db = &*self.db_pool;
        customer::Entity::find_by_id(customer_id)
            .one(db)
            .await?
            .ok_or_else(|| customer_not_found(customer_id))
    }

    /// Ids of the employees currently assigned to a customer
    #[instrument(skip(self))]
    pub async fn assigned_employee_ids(
        &self,
        customer_id: i32,
    ) -> Result<BTreeSet<i32>, ServiceError> {
        let db = &*self.db_pool;
        let rows = employee_customer::Entity::find()
            .filter(employee_customer::Column::CustomerId.eq(customer_id))
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|row| row.employee_id).collect())
    }

    /// Companies and employees offered by the customer forms
    #[instrument(skip(self))]
    pub async fn form_options(&self) -> Result<CustomerFormOptions, ServiceError> {
        let db = &*self.db_pool;
        let companies = company::Entity::find()
            .order_by_asc(company::Column::CompanyId)
            .all(db)
            .await?;
        let employees = employee::Entity::find()
            .order_by_asc(employee::Column::EmployeeId)
            .all(db)
            .await?;

        Ok(CustomerFormOptions {
            companies,
            employees,
        })
    }

    /// Creates a customer and its employee assignments in one transaction
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        input: CustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let created = with_transaction(&self.db_pool, "create_customer", move |txn| {
            Box::pin(async move {
                let customer = customer::ActiveModel {
                    first_name: Set(input.first_name),
                    last_name: Set(input.last_name),
                    rating: Set(input.rating),
                    company_id: Set(input.company_id),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                insert_assignments(txn, customer.customer_id, &input.employee_ids).await?;
                Ok(customer)
            })
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "customer create failed");
            e
        })?;

        info!(customer_id = created.customer_id, "Customer created");
        Ok(created)
    }

    /// Updates a customer and replaces its employee assignments in one transaction
    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        customer_id: i32,
        input: CustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let updated = with_transaction(&self.db_pool, "update_customer", move |txn| {
            Box::pin(async move {
                let existing = customer::Entity::find_by_id(customer_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| customer_not_found(customer_id))?;

                let mut active: customer::ActiveModel = existing.into();
                active.first_name = Set(input.first_name);
                active.last_name = Set(input.last_name);
                active.rating = Set(input.rating);
                active.company_id = Set(input.company_id);
                let updated = active.update(txn).await?;

                replace_assignments(txn, customer_id, &input.employee_ids).await?;
                Ok(updated)
            })
        })
        .await
        .map_err(|e| {
            warn!(customer_id, error = %e, "customer update failed");
            e
        })?;

        info!(customer_id, "Customer updated");
        Ok(updated)
    }

    /// Deletes a customer together with its sales and assignments
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        with_transaction(&self.db_pool, "delete_customer", move |txn| {
            Box::pin(async move {
                sale::Entity::delete_many()
                    .filter(sale::Column::CustomerId.eq(customer_id))
                    .exec(txn)
                    .await?;
                employee_customer::Entity::delete_many()
                    .filter(employee_customer::Column::CustomerId.eq(customer_id))
                    .exec(txn)
                    .await?;
                let result = customer::Entity::delete_by_id(customer_id)
                    .exec(txn)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(customer_not_found(customer_id));
                }
                Ok(())
            })
        })
        .await
        .map_err(|e| match e {
            ServiceError::Conflict(detail) => {
                warn!(customer_id, %detail, "customer delete blocked by related rows");
                ServiceError::Conflict(DELETE_BLOCKED_MESSAGE.to_string())
            }
            other => other,
        })?;

        info!(customer_id, "Customer deleted");
        Ok(())
    }
}

fn customer_not_found(customer_id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Customer {} not found", customer_id))
}

async fn insert_assignments<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
    employee_ids: &BTreeSet<i32>,
) -> Result<(), ServiceError> {
    if employee_ids.is_empty() {
        return Ok(());
    }

    let rows = employee_ids
        .iter()
        .map(|&employee_id| employee_customer::ActiveModel {
            employee_id: Set(employee_id),
            customer_id: Set(customer_id),
        });
    employee_customer::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Junction rows are replaced, never merged.
async fn replace_assignments<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
    employee_ids: &BTreeSet<i32>,
) -> Result<(), ServiceError> {
    employee_customer::Entity::delete_many()
        .filter(employee_customer::Column::CustomerId.eq(customer_id))
        .exec(conn)
        .await?;

    insert_assignments(conn, customer_id, employee_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(filter: &CustomerFilter) -> String {
        customer::Entity::find()
            .filter(filter.condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_filter_constrains_nothing() {
        assert!(!sql_for(&CustomerFilter::default()).contains("_name\" ="));

        let blank = CustomerFilter {
            first_name: Some(String::new()),
            last_name: Some(String::new()),
        };
        assert!(!sql_for(&blank).contains("_name\" ="));
    }

    #[test]
    fn filter_combines_fields_with_and() {
        let filter = CustomerFilter {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
        };
        let sql = sql_for(&filter);
        assert!(sql.contains(r#""Customers"."first_name" = 'Ada'"#));
        assert!(sql.contains(" AND "));
        assert!(sql.contains(r#""Customers"."last_name" = 'Lovelace'"#));
    }

    #[test]
    fn normalized_drops_blank_values() {
        let filter = CustomerFilter {
            first_name: Some(String::new()),
            last_name: Some("Hopper".into()),
        }
        .normalized();
        assert_eq!(filter.first_name, None);
        assert_eq!(filter.last_name.as_deref(), Some("Hopper"));
    }

    #[test]
    fn listing_takes_company_name() {
        let listing = CustomerListing::from((
            customer::Model {
                customer_id: 7,
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                rating: 5,
                company_id: 2,
            },
            Some(company::Model {
                company_id: 2,
                name: "Navy".into(),
            }),
        ));
        assert_eq!(listing.company_name.as_deref(), Some("Navy"));
        assert_eq!(listing.customer_id, 7);
    }
}
