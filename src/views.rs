//! Server-side views.
//!
//! Templates are Handlebars files under `templates/`, compiled into the binary
//! and registered once at startup. Every page wraps itself in the `layout`
//! partial block so navigation and styling live in one place.

use crate::errors::ServiceError;
use axum::response::Html;
use handlebars::Handlebars;
use serde_json::Value;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layouts/base.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("about-us", include_str!("../templates/about-us.hbs")),
    ("contact-us", include_str!("../templates/contact-us.hbs")),
    ("customers/index", include_str!("../templates/customers/index.hbs")),
    ("customers/create", include_str!("../templates/customers/create.hbs")),
    ("customers/update", include_str!("../templates/customers/update.hbs")),
    ("customers/delete", include_str!("../templates/customers/delete.hbs")),
    ("employees/index", include_str!("../templates/employees/index.hbs")),
    ("employees/create", include_str!("../templates/employees/create.hbs")),
];

/// Turns a named view and its view-model into HTML.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, model: &Value) -> Result<String, ServiceError>;
}

pub struct HandlebarsViews {
    registry: Handlebars<'static>,
}

impl HandlebarsViews {
    pub fn new() -> Result<Self, ServiceError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ServiceError::RenderError(format!("template {}: {}", name, e)))?;
        }

        Ok(Self { registry })
    }

    pub fn has_view(&self, view: &str) -> bool {
        self.registry.has_template(view)
    }
}

impl ViewRenderer for HandlebarsViews {
    fn render(&self, view: &str, model: &Value) -> Result<String, ServiceError> {
        if !self.has_view(view) {
            return Err(ServiceError::RenderError(format!("unknown view {}", view)));
        }

        self.registry
            .render(view, model)
            .map_err(|e| ServiceError::RenderError(format!("view {}: {}", view, e)))
    }
}

/// Renders `view` as a full page, adding `title` to the view-model.
pub fn render_page(
    views: &dyn ViewRenderer,
    view: &str,
    title: &str,
    mut model: Value,
) -> Result<Html<String>, ServiceError> {
    if let Value::Object(map) = &mut model {
        map.entry("title")
            .or_insert_with(|| Value::String(title.to_string()));
    }

    views.render(view, &model).map(Html)
}
