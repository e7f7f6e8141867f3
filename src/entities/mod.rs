//! Relational schema of the portal.
//!
//! Table names keep their legacy capitalisation (`Customers`, `EmployeeCustomer`, ...)
//! so that the entities line up with the `migrations` crate and with databases created
//! before the migrations existed.

pub mod company;
pub mod customer;
pub mod department;
pub mod employee;
pub mod employee_customer;
pub mod sale;

pub mod prelude {
    pub use super::company::Entity as Company;
    pub use super::customer::Entity as Customer;
    pub use super::department::Entity as Department;
    pub use super::employee::Entity as Employee;
    pub use super::employee_customer::Entity as EmployeeCustomer;
    pub use super::sale::Entity as Sale;
}
