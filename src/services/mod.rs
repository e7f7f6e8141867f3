pub mod customers;
pub mod employees;

pub use customers::{CustomerFilter, CustomerInput, CustomerListing, CustomerService};
pub use employees::{EmployeeInput, EmployeeListing, EmployeeService};
