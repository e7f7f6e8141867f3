use crate::{
    db::DbPool,
    entities::{department, employee},
    errors::ServiceError,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Employee row joined with its department for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeListing {
    pub employee_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub department_id: i32,
    pub department_name: Option<String>,
}

impl From<(employee::Model, Option<department::Model>)> for EmployeeListing {
    fn from((employee, department): (employee::Model, Option<department::Model>)) -> Self {
        Self {
            employee_id: employee.employee_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            department_id: employee.department_id,
            department_name: department.map(|d| d.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub department_id: i32,
}

/// Service for managing employees
#[derive(Clone)]
pub struct EmployeeService {
    db_pool: Arc<DbPool>,
}

impl EmployeeService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists employees with their department, ordered by id
    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<EmployeeListing>, ServiceError> {
        let db = &*self.db_pool;
        let rows = employee::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(employee::Column::EmployeeId)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(EmployeeListing::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> Result<Vec<department::Model>, ServiceError> {
        let db = &*self.db_pool;
        let departments = department::Entity::find()
            .order_by_asc(department::Column::DepartmentId)
            .all(db)
            .await?;

        Ok(departments)
    }

    /// Creates a new employee
    #[instrument(skip(self))]
    pub async fn create_employee(
        &self,
        input: EmployeeInput,
    ) -> Result<employee::Model, ServiceError> {
        let db = &*self.db_pool;
        let created = employee::ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            department_id: Set(input.department_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create employee");
            ServiceError::from(e)
        })?;

        info!(employee_id = created.employee_id, "Employee created");
        Ok(created)
    }
}
