use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

use crate::config::{ConfigError, SiteConfig};
use crate::markdown::render_markdown_to_html;
use crate::state::AppState;

pub const CONTENT_DIR: &str = "content";

/// Page shells and the rendered about body. These are the reloadable half
/// of the site; post bodies are compiled into the catalog and are not here.
pub struct PageShells {
    pub layout: String,
    pub banner: String,
    pub listing: String,
    pub post: String,
    pub about_html: String,
}

pub struct SiteContent {
    pub shells: PageShells,
    pub config: SiteConfig,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub async fn load_content() -> Result<SiteContent, ContentError> {
    let layout = fs::read_to_string(format!("{CONTENT_DIR}/layout.html")).await?;
    let banner = fs::read_to_string(format!("{CONTENT_DIR}/banner.html")).await?;
    let listing = fs::read_to_string(format!("{CONTENT_DIR}/listing.html")).await?;
    let post = fs::read_to_string(format!("{CONTENT_DIR}/post.html")).await?;

    let about_md = fs::read_to_string(format!("{CONTENT_DIR}/about.md")).await?;
    let about_html = render_markdown_to_html(&about_md);

    let raw_config = fs::read_to_string(format!("{CONTENT_DIR}/site.toml")).await?;
    let config = SiteConfig::from_toml(&raw_config)?;

    Ok(SiteContent {
        shells: PageShells {
            layout,
            banner,
            listing,
            post,
            about_html,
        },
        config,
    })
}

/// Swap freshly loaded shells and config into the running state. A failed
/// reload keeps whatever was being served before.
pub async fn reload_content(app_state: &AppState) {
    info!("Reloading site content...");
    match load_content().await {
        Ok(content) => {
            *app_state.shells.write().await = content.shells;
            *app_state.site.write().await = content.config;
            info!("Content successfully reloaded.");
        }
        Err(e) => {
            error!("Failed to reload content: {e}");
        }
    }
}
