use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{cookie::CookiePolicy, SessionIssuer, SessionVerifier};
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{self, protected, public};
use crate::middleware::require_session;

/// Process-wide state shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub issuer: Arc<SessionIssuer>,
    pub verifier: Arc<SessionVerifier>,
    pub cookies: Arc<CookiePolicy>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            issuer: Arc::new(SessionIssuer::from_config(&config.security)),
            verifier: Arc::new(SessionVerifier::from_config(&config.security)),
            cookies: Arc::new(CookiePolicy::from_config(&config.security)),
            config: Arc::new(config),
            store,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        // Session management
        .route("/jwt", post(public::issue_session))
        .route("/logout", post(public::logout))
        // Blogs
        .route("/blogs", get(public::list_blogs))
        .route("/blog/:id", get(public::get_blog))
        // Comments
        .route("/comments", get(public::list_comments))
        .route("/comment", post(public::create_comment))
        // Wishlist
        .route("/wishlist", post(public::add_to_wishlist))
        .route("/wishlist/item/:id", delete(public::remove_from_wishlist))
}

/// Gated routes. The session layer sits on each method route, so an
/// unsupported method still answers 405 rather than 401.
fn protected_routes(state: AppState) -> Router<AppState> {
    let gate = middleware::from_fn_with_state(state, require_session);

    Router::new()
        .route("/blog", post(protected::create_blog).route_layer(gate.clone()))
        .route("/blog/:id", put(protected::update_blog).route_layer(gate.clone()))
        .route("/update", get(protected::blog_for_update).route_layer(gate.clone()))
        .route("/wishlist/:email", get(protected::user_wishlist).route_layer(gate))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn wildcard_origin_is_dropped_from_cors_list() {
        let mut config = AppConfig::new(Environment::Development, "s3cret").unwrap();
        config.security.cors_origins = vec!["*".to_string(), "http://a.test".to_string()];

        // Building the layer with a wildcard in a credentialed list must not panic
        let _ = cors_layer(&config);
    }
}
