mod error;
mod navigate;
mod state;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::{Router, serve};
use cairn_graphhopper::client::{
    GRAPHHOPPER_ROUTE_API_URL, RouteClient, RouteClientParams,
};
use cairn_navigation::translation::StaticTranslations;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::navigate::navigate_handler;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let route_service_url = std::env::var("GRAPHHOPPER_ROUTE_URL")
        .unwrap_or_else(|_| GRAPHHOPPER_ROUTE_API_URL.to_string());

    let state = Arc::new(AppState {
        engine: RouteClient::new(RouteClientParams {
            route_service_url,
            ..RouteClientParams::default()
        }),
        translations: Arc::new(StaticTranslations::default()),
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route(
            "/navigate/directions/v5/gh/{profile}/{coordinates}",
            get(navigate_handler::<RouteClient>),
        )
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("cairn api listening on {}", listener.local_addr()?);
    serve(listener, app).await?;

    Ok(())
}
