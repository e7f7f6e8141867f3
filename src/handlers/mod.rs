//! HTTP handlers. Each submodule owns the routes of one area of the portal.

pub mod customers;
pub mod employees;
pub mod extract;
pub mod forms;
pub mod pages;

use crate::db::DbPool;
use crate::services::{CustomerService, EmployeeService};
use std::sync::Arc;

/// Services shared by the handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub employees: Arc<EmployeeService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            employees: Arc::new(EmployeeService::new(db_pool)),
        }
    }
}
