//! One-shot flash messages carried in the session cookie.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! setting a message or consuming the pending one. A message survives exactly
//! one read: `take` clears the stored value, so it renders on the next page
//! and never again.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Visual severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// Bootstrap alert class suffix for this level.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
        }
    }
}

/// A message displayed on the next rendered response only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    level: FlashLevel,
    text: String,
}

impl FlashMessage {
    /// A success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    /// An error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }

    /// The message severity.
    pub fn level(&self) -> FlashLevel {
        self.level
    }

    /// The message text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Bootstrap alert class suffix, forwarded from the level for templates.
    pub fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

/// Newtype wrapper exposing flash operations over the session.
#[derive(Clone)]
pub struct Flash(Session);

impl Flash {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a message for the next rendered response.
    pub fn set(&self, message: FlashMessage) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|error| Error::internal(format!("failed to persist flash message: {error}")))
    }

    /// Consume the pending message, if any, clearing it from the session.
    ///
    /// A value that fails to deserialise (e.g. a tampered cookie) is dropped
    /// and treated as no message.
    pub fn take(&self) -> Result<Option<FlashMessage>, Error> {
        match self.0.get::<FlashMessage>(FLASH_KEY) {
            Ok(Some(message)) => {
                self.0.remove(FLASH_KEY);
                Ok(Some(message))
            }
            Ok(None) => Ok(None),
            Err(error) => {
                tracing::warn!("invalid flash message in session cookie: {error}");
                self.0.remove(FLASH_KEY);
                Ok(None)
            }
        }
    }
}

impl FromRequest for Flash {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Flash::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::error::PageError;

    fn flash_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set",
                web::get().to(|flash: Flash| async move {
                    flash.set(FlashMessage::success("saved"))?;
                    Ok::<_, PageError>(HttpResponse::Ok().finish())
                }),
            )
            .route(
                "/take",
                web::get().to(|flash: Flash| async move {
                    let body = flash
                        .take()?
                        .map(|message| message.text().to_owned())
                        .unwrap_or_default();
                    Ok::<_, PageError>(HttpResponse::Ok().body(body))
                }),
            )
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn message_renders_once_then_clears() {
        let app = test::init_service(flash_test_app()).await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let first = test::call_service(
            &app,
            test::TestRequest::get().uri("/take").cookie(cookie).to_request(),
        )
        .await;
        let cookie = session_cookie(&first);
        let body = test::read_body(first).await;
        assert_eq!(body, "saved");

        let second = test::call_service(
            &app,
            test::TestRequest::get().uri("/take").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(second).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn missing_message_reads_as_none() {
        let app = test::init_service(flash_test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/take").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert!(body.is_empty());
    }
}
