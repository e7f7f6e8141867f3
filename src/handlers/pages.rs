use crate::{errors::ServiceError, AppState};
use axum::{extract::State, response::Html, routing::get, Router};
use rand::Rng;
use serde_json::json;

/// Upper bound (inclusive) of the home page's lucky number.
pub const LUCKY_MAX: u32 = 1000;

pub fn lucky_number() -> u32 {
    rand::thread_rng().gen_range(1..=LUCKY_MAX)
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    state.render("index", "CRM Portal", json!({ "lucky": lucky_number() }))
}

async fn about_us(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    state.render("about-us", "About Us", json!({}))
}

async fn contact_us(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    state.render("contact-us", "Contact Us", json!({}))
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about-us", get(about_us))
        .route("/contact-us", get(contact_us))
}
