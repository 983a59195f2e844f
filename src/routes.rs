// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{attempt, auth, quiz, scores},
    session,
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quizzes, attempts, scores).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, sessions, config).
///
/// This is the single initialization entry point: every handler is
/// registered exactly once, here.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/session", get(auth::current_session))
        .route("/logout", post(auth::logout));

    let quiz_routes = Router::new()
        // Public: shared quizzes are taken by participants with no account.
        .route("/{id}", get(quiz::get_quiz))
        .route("/{id}/submit", post(attempt::submit_attempt))
        .route("/{id}/results", post(attempt::save_result))
        .route("/{id}/leaderboard", get(scores::leaderboard))
        // Protected: authoring needs a live session.
        .merge(
            Router::new()
                .route("/", post(quiz::create_quiz).get(quiz::list_my_quizzes))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    session::auth_middleware,
                )),
        );

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quizzes", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
