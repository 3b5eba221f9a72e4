//! End-to-end coverage for the product pages: routing, validation re-renders,
//! redirects, flash messages, and pagination, against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};

use backend::MethodOverride;
use backend::domain::ports::{InMemoryProductRepository, ProductRepository};
use backend::domain::{Product, ProductDetail, ProductDraft, ProductId, ProductName};
use backend::inbound::http::products;
use backend::inbound::http::state::HttpState;

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

fn test_app(
    repository: Arc<InMemoryProductRepository>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let products_port: Arc<dyn ProductRepository> = repository;
    App::new()
        .app_data(web::Data::new(HttpState::new(products_port)))
        .wrap(MethodOverride)
        .service(products::scope().wrap(session_middleware()))
}

fn draft(name: &str, detail: &str) -> ProductDraft {
    ProductDraft {
        name: ProductName::new(name).expect("fixture name"),
        detail: ProductDetail::new(detail).expect("fixture detail"),
    }
}

async fn seed(repository: &InMemoryProductRepository, name: &str, detail: &str) -> Product {
    repository.create(draft(name, detail)).await.expect("seed product")
}

async fn body_text<B>(res: ServiceResponse<B>) -> String
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[actix_web::test]
async fn listing_starts_empty() {
    let app = test::init_service(test_app(Arc::new(InMemoryProductRepository::new()))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("No products yet"));
}

#[actix_web::test]
async fn create_persists_redirects_and_flashes_once() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products")
            .set_form([("name", "Widget"), ("detail", "A small widget")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/products"));
    let cookie = session_cookie(&res);

    let created = repository
        .find(ProductId::new(1))
        .await
        .expect("find")
        .expect("created record");
    assert_eq!(created.name().as_str(), "Widget");

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(listing.status(), StatusCode::OK);
    let cookie = session_cookie(&listing);
    let body = body_text(listing).await;
    assert!(body.contains("Widget"));
    assert!(body.contains("Product created successfully."));

    let second = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_text(second).await;
    assert!(body.contains("Widget"));
    assert!(!body.contains("Product created successfully."));
}

#[actix_web::test]
async fn create_ignores_fields_outside_the_allowlist() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products")
            .set_form([
                ("id", "999"),
                ("name", "Widget"),
                ("detail", "A small widget"),
                ("role", "admin"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let created = repository
        .find(ProductId::new(1))
        .await
        .expect("find")
        .expect("created record");
    assert_eq!(created.id().get(), 1);
    assert_eq!(repository.find(ProductId::new(999)).await.expect("find"), None);
}

#[actix_web::test]
async fn create_with_blank_name_rerenders_with_a_field_error() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products")
            .set_form([("name", ""), ("detail", "A small widget")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("name must not be empty"));
    assert!(body.contains("A small widget"));

    let listing =
        test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;
    let body = body_text(listing).await;
    assert!(body.contains("No products yet"));
}

#[actix_web::test]
async fn unknown_and_malformed_ids_render_the_not_found_page() {
    let app = test::init_service(test_app(Arc::new(InMemoryProductRepository::new()))).await;

    for uri in ["/products/999", "/products/not-a-number", "/products/999/edit"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_text(res).await;
        assert!(body.contains("product not found"), "{uri}");
    }
}

#[actix_web::test]
async fn show_renders_the_record() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/products/{}", created.id()))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Widget"));
    assert!(body.contains("A small widget"));
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/products/{}/edit", created.id()))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("value=\"Widget\""));
    assert!(body.contains(&format!("/products/{}?_method=PUT", created.id())));
}

#[actix_web::test]
async fn update_applies_via_the_post_override() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/products/{}?_method=PUT", created.id()))
            .set_form([("name", "Sprocket"), ("detail", "A better widget")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/products"));
    let cookie = session_cookie(&res);

    let updated = repository
        .find(created.id())
        .await
        .expect("find")
        .expect("record still present");
    assert_eq!(updated.name().as_str(), "Sprocket");
    assert_eq!(updated.created_at(), created.created_at());

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_text(listing).await;
    assert!(body.contains("Product updated successfully."));
}

#[actix_web::test]
async fn update_accepts_a_direct_put_as_well() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/products/{}", created.id()))
            .set_form([("name", "Sprocket"), ("detail", "A better widget")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn update_with_blank_detail_rerenders_and_changes_nothing() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/products/{}?_method=PUT", created.id()))
            .set_form([("name", "Sprocket"), ("detail", "  ")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(res).await;
    assert!(body.contains("detail must not be empty"));

    let unchanged = repository
        .find(created.id())
        .await
        .expect("find")
        .expect("record still present");
    assert_eq!(unchanged.name().as_str(), "Widget");
}

#[actix_web::test]
async fn update_of_a_missing_record_is_not_found() {
    let app = test::init_service(test_app(Arc::new(InMemoryProductRepository::new()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/999?_method=PUT")
            .set_form([("name", "Sprocket"), ("detail", "A better widget")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_removes_the_record_and_flashes() {
    let repository = Arc::new(InMemoryProductRepository::new());
    let created = seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository.clone())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/products/{}?_method=DELETE", created.id()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let cookie = session_cookie(&res);

    assert_eq!(repository.find(created.id()).await.expect("find"), None);

    let listing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body = body_text(listing).await;
    assert!(body.contains("Product deleted successfully."));
    assert!(body.contains("No products yet"));
}

#[actix_web::test]
async fn listing_is_newest_first_and_capped_at_five_per_page() {
    let repository = Arc::new(InMemoryProductRepository::new());
    for n in 1..=7 {
        seed(&repository, &format!("Product {n:02}"), "stock item").await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    let app = test::init_service(test_app(repository)).await;

    let first =
        test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;
    let body = body_text(first).await;
    assert!(body.contains("Product 07"));
    assert!(body.contains("Product 03"));
    assert!(!body.contains("Product 02"));
    assert!(body.contains("Page 1 of 2"));

    let second = test::call_service(
        &app,
        test::TestRequest::get().uri("/products?page=2").to_request(),
    )
    .await;
    let body = body_text(second).await;
    assert!(body.contains("Product 02"));
    assert!(body.contains("Product 01"));
    assert!(!body.contains("Product 03"));
    assert!(body.contains("Page 2 of 2"));
}

#[actix_web::test]
async fn out_of_range_page_parameters_fall_back_to_the_first_page() {
    let repository = Arc::new(InMemoryProductRepository::new());
    seed(&repository, "Widget", "A small widget").await;
    let app = test::init_service(test_app(repository)).await;

    for uri in ["/products?page=0", "/products?page=two"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        let body = body_text(res).await;
        assert!(body.contains("Widget"), "{uri}");
        assert!(body.contains("Page 1 of 1"), "{uri}");
    }
}
