use super::extract::{ValidForm, ValidPath, ValidQuery};
use super::forms::{CustomerForm, FormFields};
use crate::{
    entities::{company, employee},
    errors::ServiceError,
    services::{customers::CustomerFormOptions, CustomerFilter},
    AppState,
};
use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

/// Company choice in the customer forms.
#[derive(Debug, Serialize)]
struct CompanyOption {
    company_id: i32,
    name: String,
    selected: bool,
}

/// Employee choice in the customer forms.
#[derive(Debug, Serialize)]
struct EmployeeOption {
    employee_id: i32,
    first_name: String,
    last_name: String,
    selected: bool,
}

fn company_options(companies: Vec<company::Model>, selected: Option<i32>) -> Vec<CompanyOption> {
    companies
        .into_iter()
        .map(|c| CompanyOption {
            selected: Some(c.company_id) == selected,
            company_id: c.company_id,
            name: c.name,
        })
        .collect()
}

fn employee_options(
    employees: Vec<employee::Model>,
    selected: &BTreeSet<i32>,
) -> Vec<EmployeeOption> {
    employees
        .into_iter()
        .map(|e| EmployeeOption {
            selected: selected.contains(&e.employee_id),
            employee_id: e.employee_id,
            first_name: e.first_name,
            last_name: e.last_name,
        })
        .collect()
}

async fn list_customers(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<CustomerFilter>,
) -> Result<Html<String>, ServiceError> {
    let filter = filter.normalized();
    let customers = state.customer_service().list_customers(&filter).await?;

    state.render(
        "customers/index",
        "Customers",
        json!({ "customers": customers, "search": filter }),
    )
}

async fn create_customer_form(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let CustomerFormOptions {
        companies,
        employees,
    } = state.customer_service().form_options().await?;

    state.render(
        "customers/create",
        "Add customer",
        json!({
            "companies": company_options(companies, None),
            "employees": employee_options(employees, &BTreeSet::new()),
        }),
    )
}

async fn create_customer(
    State(state): State<AppState>,
    ValidForm(pairs): ValidForm<Vec<(String, String)>>,
) -> Result<Redirect, ServiceError> {
    let form = CustomerForm::parse(&FormFields::new(pairs))?;
    state.customer_service().create_customer(form.into()).await?;
    Ok(Redirect::to("/customers"))
}

async fn update_customer_form(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Html<String>, ServiceError> {
    let service = state.customer_service();
    let customer = service.get_customer(id).await?;
    let assigned = service.assigned_employee_ids(id).await?;
    let CustomerFormOptions {
        companies,
        employees,
    } = service.form_options().await?;

    state.render(
        "customers/update",
        "Edit customer",
        json!({
            "companies": company_options(companies, Some(customer.company_id)),
            "employees": employee_options(employees, &assigned),
            "customer": customer,
        }),
    )
}

async fn update_customer(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
    ValidForm(pairs): ValidForm<Vec<(String, String)>>,
) -> Result<Redirect, ServiceError> {
    let form = CustomerForm::parse(&FormFields::new(pairs))?;
    state
        .customer_service()
        .update_customer(id, form.into())
        .await?;
    Ok(Redirect::to("/customers"))
}

async fn delete_customer_form(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Html<String>, ServiceError> {
    let customer = state.customer_service().get_customer(id).await?;

    state.render(
        "customers/delete",
        "Delete customer",
        json!({ "customer": customer }),
    )
}

async fn delete_customer(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Redirect, ServiceError> {
    state.customer_service().delete_customer(id).await?;
    Ok(Redirect::to("/customers"))
}

/// Creates the router for customer pages
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route(
            "/customers/create",
            get(create_customer_form).post(create_customer),
        )
        .route(
            "/customers/:id/update",
            get(update_customer_form).post(update_customer),
        )
        .route(
            "/customers/:id/delete",
            get(delete_customer_form).post(delete_customer),
        )
}
