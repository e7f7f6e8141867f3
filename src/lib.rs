//! CRM Portal Library
//!
//! Server-rendered CRUD portal for customers, employees, companies and departments
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod services;
pub mod tracing;
pub mod views;

use axum::{middleware, response::Html, Router};
use serde_json::Value;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::{CustomerService, EmployeeService};
use crate::views::{HandlebarsViews, ViewRenderer};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub views: Arc<dyn ViewRenderer>,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Builds the state with the embedded Handlebars views
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Result<Self, ServiceError> {
        let views: Arc<dyn ViewRenderer> = Arc::new(HandlebarsViews::new()?);
        Ok(Self::with_views(db, config, views))
    }

    pub fn with_views(
        db: Arc<DbPool>,
        config: config::AppConfig,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            views,
            services,
        }
    }

    pub fn customer_service(&self) -> Arc<CustomerService> {
        self.services.customers.clone()
    }

    pub fn employee_service(&self) -> Arc<EmployeeService> {
        self.services.employees.clone()
    }

    /// Renders a full page through the configured view renderer
    pub fn render(&self, view: &str, title: &str, model: Value) -> Result<Html<String>, ServiceError> {
        views::render_page(self.views.as_ref(), view, title, model)
    }
}

/// Full application router with its middleware stack
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::pages::page_routes())
        .merge(handlers::customers::customer_routes())
        .merge(handlers::employees::employee_routes())
        .merge(health::health_routes())
        .layer(middleware::from_fn(
            middleware_helpers::security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(middleware::from_fn(middleware_helpers::request_id_middleware))
        .with_state(state)
}
