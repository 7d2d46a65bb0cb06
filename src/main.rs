use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, get_service},
    Router,
};
use serde::Deserialize;
use tokio::{
    net::TcpListener,
    sync::{broadcast, RwLock},
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod chrome;
mod config;
mod content_loader;
mod hot_reload;
mod listing;
mod markdown;
mod models;
mod render;
mod state;

use catalog::Catalog;
use config::ServerEnv;
use listing::{listing_page, ListingState};
use render::{post_page, post_view, render_with_layout};
use state::{AppState, RouterState};

#[derive(Deserialize)]
struct ListingQuery {
    tab: Option<String>,
}

#[derive(Deserialize)]
struct PostQuery {
    slug: Option<String>,
}

async fn listing_handler(
    Query(query): Query<ListingQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let shells = state.shells.read().await;
    let config = state.site.read().await;

    let mut listing_state = ListingState::new(
        &config.listing.tabs,
        &config.listing.cards,
        &config.listing.default_tab,
    );
    if let Some(tab) = query.tab.as_deref() {
        // The tab set is closed; anything else keeps the default filter.
        if listing_state.has_tab(tab) {
            listing_state.select(tab);
        } else {
            debug!(%tab, "unknown tab requested, keeping default");
        }
    }

    let content = listing_page(&shells.listing, &listing_state, &shells.about_html);
    let page = render_with_layout(
        &shells.layout,
        &shells.banner,
        &config.site.title,
        &content,
        state.is_development,
    );
    Html(page)
}

async fn post_handler(
    Query(query): Query<PostQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let shells = state.shells.read().await;
    let config = state.site.read().await;

    // An absent slug parameter renders the same way as an unmatched one.
    let slug = query.slug.as_deref().unwrap_or_default();
    let post = state.catalog.find_by_slug(slug);
    if post.is_none() {
        debug!(%slug, "post lookup missed");
    }

    let view = post_view(post);
    let title = view
        .page_title
        .clone()
        .unwrap_or_else(|| config.site.title.clone());
    let content = post_page(&shells.post, &view);
    let page = render_with_layout(
        &shells.layout,
        &shells.banner,
        &title,
        &content,
        state.is_development,
    );
    Html(page)
}

#[tokio::main]
async fn main() {
    let env = ServerEnv::from_env();

    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("RUST_ENV is set to development: {}", env.is_development);

    let catalog = Catalog::builtin().expect("post catalog failed validation");
    info!(posts = catalog.posts().len(), "catalog ready");

    let content = content_loader::load_content()
        .await
        .expect("Failed to load initial content files");

    let state = Arc::new(AppState {
        shells: RwLock::new(content.shells),
        site: RwLock::new(content.config),
        catalog,
        is_development: env.is_development,
    });

    let (tx, _rx) = broadcast::channel(1);
    if env.is_development {
        info!("Hot reload enabled. Check logs for file change events.");
        hot_reload::start_content_watcher(tx.clone(), state.clone());
    }

    let router_state = RouterState {
        app_state: state,
        broadcaster: tx,
    };

    let static_dir = get_service(ServeDir::new("content/static"));
    let favicon = get_service(ServeFile::new("content/static/favicon.png"));

    let app = Router::new()
        .route("/", get(listing_handler))
        .route("/post", get(post_handler))
        .nest_service("/static", static_dir)
        .route_service("/favicon.ico", favicon.clone())
        .route_service("/favicon.png", favicon)
        .route("/ws", get(hot_reload::ws_handler))
        .with_state(router_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], env.port));

    info!(%addr, "listening");
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
