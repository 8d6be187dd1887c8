use crate::config::Config;
use crate::middleware::auth::auth_middleware;
use crate::routes::{health::healthz, simulate::simulate_lufft, sms::ingest_lufft_sms};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub pool: PgPool,
}

pub fn build_router(cfg: Config, pool: PgPool) -> Router {
    let enable_simulator = cfg.enable_simulator;
    let state = AppState { cfg, pool };

    // Public routes (no auth)
    let public = Router::new().route("/healthz", get(healthz));

    // Gateway routes (bearer token)
    let mut protected = Router::new().route("/api/v1/sms/lufft", post(ingest_lufft_sms));
    if enable_simulator {
        protected = protected.route("/api/v1/simulate/lufft", post(simulate_lufft));
    }
    let protected = protected.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;

    pub const TOKEN: &str = "test-token";

    /// Router backed by a pool that never connects; handlers under test must
    /// finish before touching the database.
    pub fn router(enable_simulator: bool) -> Router {
        let cfg = Config {
            database_url: "postgres://localhost:1/unused".to_string(),
            api_token: TOKEN.to_string(),
            port: 0,
            enable_simulator,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy(&cfg.database_url)
            .unwrap();
        build_router(cfg, pool)
    }

    pub fn post_json(
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> axum::http::Request<Body> {
        let mut req = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {token}"));
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
