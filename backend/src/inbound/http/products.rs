//! Product resource handlers.
//!
//! ```text
//! GET    /products            paginated listing (?page=N)
//! GET    /products/create     creation form
//! POST   /products            create
//! GET    /products/{id}       detail view
//! GET    /products/{id}/edit  edit form
//! PUT    /products/{id}       update (PATCH accepted)
//! DELETE /products/{id}       delete
//! ```
//!
//! Identifier handling is explicit: each id-addressed handler parses the path
//! segment and checks existence itself, so a malformed id and a lookup miss
//! both surface as the generic not-found page.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, Scope, delete, get, post, route, web};
use serde::Deserialize;
use tracing::info;

use pagination::{PageNumber, PageRequest, PageSize};

use crate::domain::{Error, Product, ProductId};

use super::error::{PageResult, map_repository_error};
use super::flash::{Flash, FlashMessage};
use super::forms::{CreateProductRules, ProductForm, UpdateProductRules};
use super::pages::{
    EditPage, FormView, IndexPage, NewPage, PaginationView, ProductView, ShowPage, render,
};
use super::state::HttpState;

/// Items rendered per listing page.
const LISTING_PAGE_SIZE: PageSize = match PageSize::new(5) {
    Ok(size) => size,
    Err(_) => panic!("listing page size must satisfy pagination bounds"),
};

/// Query parameters accepted by the listing.
///
/// The page is kept as raw text so a malformed value degrades to page 1
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
}

/// Register the product resource under its `/products` scope.
///
/// Registration order matters: the literal `create` path must precede the
/// `{id}` matcher.
pub fn scope() -> Scope {
    web::scope("/products")
        .service(index)
        .service(new_form)
        .service(create)
        .service(edit_form)
        .service(show)
        .service(update)
        .service(destroy)
}

fn requested_page(query: &ListQuery) -> PageNumber {
    // The listing is forgiving: absent, zero, or unparsable pages read as 1.
    query
        .page
        .as_deref()
        .and_then(|raw| raw.parse::<u32>().ok())
        .and_then(|value| PageNumber::new(value).ok())
        .unwrap_or(PageNumber::FIRST)
}

fn parse_id(raw: &str) -> Result<ProductId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("product not found"))
}

async fn fetch_product(state: &HttpState, id: ProductId) -> Result<Product, Error> {
    state
        .products
        .find(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found("product not found"))
}

fn redirect_to_listing() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/products"))
        .finish()
}

#[get("")]
async fn index(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
    flash: Flash,
) -> PageResult<HttpResponse> {
    let request = PageRequest::new(requested_page(&query), LISTING_PAGE_SIZE);
    let page = state
        .products
        .list_recent(request)
        .await
        .map_err(map_repository_error)?
        .map(ProductView::from);

    let pagination = PaginationView::from_page(&page);
    let template = IndexPage {
        flash: flash.take()?,
        products: page.into_items(),
        pagination,
    };
    Ok(render(&template, StatusCode::OK)?)
}

#[get("/create")]
async fn new_form() -> PageResult<HttpResponse> {
    let template = NewPage {
        form: FormView::default(),
        errors: Default::default(),
    };
    Ok(render(&template, StatusCode::OK)?)
}

#[post("")]
async fn create(
    state: web::Data<HttpState>,
    flash: Flash,
    form: web::Form<ProductForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();
    match CreateProductRules::validate(&form) {
        Ok(draft) => {
            let product = state
                .products
                .create(draft)
                .await
                .map_err(map_repository_error)?;
            info!(id = %product.id(), "product created");
            flash.set(FlashMessage::success("Product created successfully."))?;
            Ok(redirect_to_listing())
        }
        Err(errors) => {
            let template = NewPage {
                form: FormView::from_form(&form),
                errors,
            };
            Ok(render(&template, StatusCode::UNPROCESSABLE_ENTITY)?)
        }
    }
}

#[get("/{id}")]
async fn show(state: web::Data<HttpState>, path: web::Path<String>) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    let product = fetch_product(&state, id).await?;
    let template = ShowPage {
        product: ProductView::from(product),
    };
    Ok(render(&template, StatusCode::OK)?)
}

#[get("/{id}/edit")]
async fn edit_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    let product = ProductView::from(fetch_product(&state, id).await?);
    let template = EditPage {
        id: product.id,
        form: FormView::from_product(&product),
        errors: Default::default(),
    };
    Ok(render(&template, StatusCode::OK)?)
}

#[route("/{id}", method = "PUT", method = "PATCH")]
async fn update(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<String>,
    form: web::Form<ProductForm>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    fetch_product(&state, id).await?;

    let form = form.into_inner();
    match UpdateProductRules::validate(&form) {
        Ok(draft) => {
            state
                .products
                .update(id, draft)
                .await
                .map_err(map_repository_error)?;
            info!(id = %id, "product updated");
            flash.set(FlashMessage::success("Product updated successfully."))?;
            Ok(redirect_to_listing())
        }
        Err(errors) => {
            let template = EditPage {
                id: id.get(),
                form: FormView::from_form(&form),
                errors,
            };
            Ok(render(&template, StatusCode::UNPROCESSABLE_ENTITY)?)
        }
    }
}

#[delete("/{id}")]
async fn destroy(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id = parse_id(&path)?;
    state
        .products
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    info!(id = %id, "product deleted");
    flash.set(FlashMessage::success("Product deleted successfully."))?;
    Ok(redirect_to_listing())
}
