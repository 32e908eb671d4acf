mod assets;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use assets::DataTables;

/// What the index handler needs: the tables to inject and where the built page lives.
#[derive(Clone)]
struct Site {
    tables: Arc<DataTables>,
    dist_dir: PathBuf,
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(site: Site, assets_dir: &Path) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest("/static", cached_static_router(assets_dir, CACHE_1DAY))
        .nest(
            "/assets",
            cached_static_router(&site.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/", get(serve_index))
        .route("/location/{id}", get(serve_index))
        .with_state(site)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(std::env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let assets_dir = env_path("ASSETS_DIR", "assets");
    let site = Site {
        tables: Arc::new(DataTables::load(&assets_dir)),
        dist_dir: env_path("DIST_DIR", "dist"),
    };
    let app = build_app(site, &assets_dir);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server running at http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>City Map</title></head>
<body>
<h1>City Map</h1>
<p>Frontend not built yet. Run <code>dx build</code> in crates/frontend and point DIST_DIR at the output.</p>
</body>
</html>"#;

async fn serve_index(State(site): State<Site>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    let html = match tokio::fs::read_to_string(site.dist_dir.join("index.html")).await {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!("No built index.html: {}", e);
            FALLBACK_INDEX.to_string()
        }
    };
    Html(site.tables.inject(&html))
}
