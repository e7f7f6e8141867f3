use super::extract::ValidForm;
use super::forms::{EmployeeForm, FormFields};
use crate::{errors::ServiceError, AppState};
use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use serde_json::json;

async fn list_employees(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let employees = state.employee_service().list_employees().await?;
    state.render(
        "employees/index",
        "Employees",
        json!({ "employees": employees }),
    )
}

async fn create_employee_form(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let departments = state.employee_service().list_departments().await?;
    state.render(
        "employees/create",
        "Add employee",
        json!({ "departments": departments }),
    )
}

async fn create_employee(
    State(state): State<AppState>,
    ValidForm(pairs): ValidForm<Vec<(String, String)>>,
) -> Result<Redirect, ServiceError> {
    let form = EmployeeForm::parse(&FormFields::new(pairs))?;
    state.employee_service().create_employee(form.into()).await?;
    Ok(Redirect::to("/employees"))
}

/// Creates the router for employee pages
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route(
            "/employees/create",
            get(create_employee_form).post(create_employee),
        )
}
