#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use crm_portal::{
    config::AppConfig,
    db::{self, DbPool},
    entities::{company, customer, department, employee, employee_customer, sale},
    middleware_helpers::REQUEST_ID_HEADER,
    AppState,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness running the full router against a throwaway SQLite file.
///
/// Seeded reference data:
/// - companies `Acme` (1) and `Globex` (2)
/// - departments `Sales` (1) and `Support` (2)
/// - employees `Alice Tan` (1), `Bala Kumar` (2), `Chen Wei` (3)
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_file = db_dir.path().join("crm_portal_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        seed_reference_data(&pool).await;

        let state = AppState::new(Arc::new(pool), cfg).expect("views should compile");
        let router = crm_portal::app_router(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
        }
    }

    pub fn db(&self) -> &DbPool {
        &self.state.db
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should not fail")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    pub async fn get_with_request_id(&self, uri: &str, request_id: &str) -> Response {
        self.request(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .header(REQUEST_ID_HEADER, request_id)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// Posts an urlencoded form; repeated keys are kept in order.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();

        self.request(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }

    pub async fn insert_customer(&self, first_name: &str, last_name: &str, company_id: i32) -> i32 {
        customer::ActiveModel {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            rating: Set(3),
            company_id: Set(company_id),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("insert customer")
        .customer_id
    }

    pub async fn assign(&self, customer_id: i32, employee_id: i32) {
        employee_customer::ActiveModel {
            employee_id: Set(employee_id),
            customer_id: Set(customer_id),
        }
        .insert(self.db())
        .await
        .expect("insert assignment");
    }

    pub async fn insert_sale(&self, customer_id: i32) {
        sale::ActiveModel {
            customer_id: Set(customer_id),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("insert sale");
    }

    pub async fn customers(&self) -> Vec<customer::Model> {
        customer::Entity::find()
            .order_by_asc(customer::Column::CustomerId)
            .all(self.db())
            .await
            .expect("list customers")
    }

    /// Employee ids assigned to `customer_id`, ascending.
    pub async fn assignments(&self, customer_id: i32) -> Vec<i32> {
        employee_customer::Entity::find()
            .filter(employee_customer::Column::CustomerId.eq(customer_id))
            .order_by_asc(employee_customer::Column::EmployeeId)
            .all(self.db())
            .await
            .expect("list assignments")
            .into_iter()
            .map(|row| row.employee_id)
            .collect()
    }

    pub async fn assignment_count(&self) -> u64 {
        employee_customer::Entity::find()
            .count(self.db())
            .await
            .expect("count assignments")
    }

    pub async fn sale_count(&self, customer_id: i32) -> u64 {
        sale::Entity::find()
            .filter(sale::Column::CustomerId.eq(customer_id))
            .count(self.db())
            .await
            .expect("count sales")
    }

    pub async fn employees(&self) -> Vec<employee::Model> {
        employee::Entity::find()
            .order_by_asc(employee::Column::EmployeeId)
            .all(self.db())
            .await
            .expect("list employees")
    }
}

async fn seed_reference_data(pool: &DbPool) {
    for name in ["Acme", "Globex"] {
        company::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(pool)
        .await
        .expect("seed company");
    }

    for name in ["Sales", "Support"] {
        department::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(pool)
        .await
        .expect("seed department");
    }

    for (first_name, last_name, department_id) in
        [("Alice", "Tan", 1), ("Bala", "Kumar", 1), ("Chen", "Wei", 2)]
    {
        employee::ActiveModel {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            department_id: Set(department_id),
            ..Default::default()
        }
        .insert(pool)
        .await
        .expect("seed employee");
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

pub fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
