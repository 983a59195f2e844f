// src/session.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::user::{Session, User};

/// Holder for the live sessions, keyed by bearer token.
///
/// Sessions are deliberately transient: they live in process memory only and
/// die with it, while the user/quiz/result collections are durable on disk.
/// The lifecycle is explicit (`begin`, `current`, `end`) instead of the
/// ambient mutable current-user the original kept in session storage.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establishes a session for the user and returns its bearer token.
    pub fn begin(&self, user: &User) -> (String, Session) {
        let token = Uuid::new_v4().simple().to_string();
        let session = Session::for_user(user);
        self.inner
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), session.clone());

        tracing::debug!("session began for user {}", user.id);
        (token, session)
    }

    /// Resolves a token to its live session, if any.
    pub fn current(&self, token: &str) -> Option<Session> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    /// Destroys the session behind the token. Ending an unknown or already
    /// ended token is a no-op.
    pub fn end(&self, token: &str) {
        self.inner
            .write()
            .expect("session lock poisoned")
            .remove(token);
    }
}

/// Pulls the token out of an 'Authorization: Bearer <token>' header value.
pub fn bearer_token(req_headers: &axum::http::HeaderMap) -> Option<&str> {
    let value = req_headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}

/// Axum Middleware: Authentication.
///
/// Validates the bearer token against the session holder. If a session is
/// live, injects it into the request extensions for handlers to use;
/// otherwise returns 401 Unauthorized.
pub async fn auth_middleware(
    State(sessions): State<Sessions>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = bearer_token(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    match sessions.current(token) {
        Some(session) => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}
