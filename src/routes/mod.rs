pub mod admin;
pub mod auth;
pub mod content;
pub mod gangs;
pub mod giveaways;
pub mod notifications;
pub mod tickets;
pub mod users;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The full `/api` surface with tracing and CORS applied.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(tickets::router())
        .merge(gangs::router())
        .merge(giveaways::router())
        .merge(content::router())
        .merge(notifications::router())
        .merge(users::router())
        .merge(auth::router())
        .merge(admin::router());

    serve_api(api, state)
}

/// Mount `api` under `/api`. A panicking handler becomes a 500 with the
/// usual JSON error body.
fn serve_api(api: Router<AppState>, state: AppState) -> Router {
    Router::new()
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Reject the first blank field by name.
pub(crate) fn require(fields: &[(&str, &str)]) -> AppResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AppError::BadRequest(format!("{} is required", name))),
        None => Ok(()),
    }
}

/// First `max` characters, never splitting a code point.
pub(crate) fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DiscordProvider;
    use crate::config::Config;
    use crate::notify::RecordingNotifier;
    use crate::store::clock::ManualClock;
    use crate::store::Store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let config = Config::default();
        AppState {
            store: Store::shared(Arc::new(ManualClock::at_millis(0))),
            notifier: Arc::new(RecordingNotifier::new()),
            identity: Arc::new(DiscordProvider::new(config.discord.clone())),
            config,
        }
    }

    async fn explode() -> &'static str {
        panic!("store invariant broken")
    }

    #[tokio::test]
    async fn handler_panic_becomes_json_500() {
        let api = Router::new().route("/explode", get(explode));
        let app = serve_api(api, state());

        let response = app
            .oneshot(Request::get("/api/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn unknown_route_is_not_caught_as_panic() {
        let app = router(state());
        let response = app
            .oneshot(Request::get("/api/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn require_names_the_blank_field() {
        assert!(require(&[("title", "x"), ("user", "y")]).is_ok());

        let err = require(&[("title", "x"), ("user", "  ")]).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: user is required");
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
        assert_eq!(excerpt("hi", 100), "hi");
    }
}
