//! Method-override middleware for HTML form submissions.
//!
//! Browser forms submit only GET and POST. A POST whose query string carries
//! `_method=PUT|PATCH|DELETE` is rewritten to that verb before routing, so
//! the resource routes can declare the conventional REST verbs and the
//! templates stay plain HTML. Only those three verbs are honoured, and only
//! on POST requests.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};

/// Rewrites `POST ...?_method=VERB` requests to the declared verb.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::MethodOverride;
///
/// let app = App::new().wrap(MethodOverride);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
///
/// Applications should not use this type directly.
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_from_query(req.query_string()) {
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}

fn override_from_query(query: &str) -> Option<Method> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))
        .and_then(|raw| match raw.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}
