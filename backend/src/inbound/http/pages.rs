//! Askama page templates and their view models.
//!
//! Templates live under `templates/` and share the Bootstrap layout. Handlers
//! build the view models here and hand them to [`render`]; domain types never
//! reach a template directly.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;
use pagination::{Page, PageNumber};

use crate::domain::{Error, Product};

use super::flash::FlashMessage;
use super::forms::{ProductForm, ValidationErrors};

/// Row-level view of a product.
#[derive(Debug, Clone)]
pub struct ProductView {
    /// Storage identifier, used to build resource links.
    pub id: i32,
    /// Product name.
    pub name: String,
    /// Product detail text.
    pub detail: String,
    /// Creation timestamp, preformatted for display.
    pub created_at: String,
    /// Last-update timestamp, preformatted for display.
    pub updated_at: String,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().get(),
            name: product.name().as_str().to_owned(),
            detail: product.detail().as_str().to_owned(),
            created_at: product.created_at().format(TIMESTAMP_FORMAT).to_string(),
            updated_at: product.updated_at().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Pagination controls derived from a page envelope.
#[derive(Debug, Clone)]
pub struct PaginationView {
    /// 1-based current page.
    pub current: u32,
    /// Total number of pages (at least one).
    pub total_pages: u32,
    /// Total number of records across all pages.
    pub total_items: u64,
    /// Preceding page number, when one exists.
    pub previous: Option<u32>,
    /// Following page number, when one exists.
    pub next: Option<u32>,
}

impl PaginationView {
    /// Derive the controls from any page envelope.
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            current: page.number().get(),
            total_pages: page.total_pages(),
            total_items: page.total_items(),
            previous: page.previous().map(PageNumber::get),
            next: page.next().map(PageNumber::get),
        }
    }
}

/// Submitted values echoed back into a form render.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    /// Name input value.
    pub name: String,
    /// Detail textarea value.
    pub detail: String,
}

impl FormView {
    /// Echo a submitted form exactly as the user typed it.
    pub fn from_form(form: &ProductForm) -> Self {
        Self {
            name: form.name.clone().unwrap_or_default(),
            detail: form.detail.clone().unwrap_or_default(),
        }
    }

    /// Pre-fill from a stored record for the edit form.
    pub fn from_product(product: &ProductView) -> Self {
        Self {
            name: product.name.clone(),
            detail: product.detail.clone(),
        }
    }
}

/// Paginated product listing.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct IndexPage {
    /// Pending flash message consumed by this render.
    pub flash: Option<FlashMessage>,
    /// Products on the current page, newest first.
    pub products: Vec<ProductView>,
    /// Pagination controls.
    pub pagination: PaginationView,
}

/// Single-product detail view.
#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ShowPage {
    /// The displayed product.
    pub product: ProductView,
}

/// Creation form, empty or re-rendered with messages.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct NewPage {
    /// Current input values.
    pub form: FormView,
    /// Field messages from the last submission.
    pub errors: ValidationErrors,
}

/// Edit form pre-filled with the stored record or the last submission.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct EditPage {
    /// Identifier of the record being edited.
    pub id: i32,
    /// Current input values.
    pub form: FormView,
    /// Field messages from the last submission.
    pub errors: ValidationErrors,
}

/// Shared error page for not-found and server failures.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    /// Numeric HTTP status.
    pub status: u16,
    /// Canonical reason phrase for the status.
    pub title: String,
    /// Message shown to the user.
    pub message: String,
}

impl ErrorPage {
    /// Build the page for a status code and user-facing message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_owned(),
            message: message.into(),
        }
    }

    /// Render to a body string; the caller decides the fallback on failure.
    pub fn render_body(&self) -> Result<String, askama::Error> {
        self.render()
    }
}

/// Render a template into an HTML response with the given status.
pub(crate) fn render<T: Template>(template: &T, status: StatusCode) -> Result<HttpResponse, Error> {
    let body = template
        .render()
        .map_err(|error| Error::internal(format!("template render failed: {error}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}
