use serde::Deserialize;
use thiserror::Error;

use crate::listing::{Card, Tab};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read site config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse site config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("default tab `{0}` is not declared in [[listing.tabs]]")]
    UnknownDefaultTab(String),
}

/// Everything the listing author controls: site identity plus the tab and
/// card sets. Lives in `content/site.toml` and reloads with the rest of the
/// content in development.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteMeta {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    pub default_tab: String,
    pub tabs: Vec<Tab>,
    pub cards: Vec<Card>,
}

impl SiteConfig {
    /// The default tab must name a declared tab; a typo here would
    /// otherwise ship a listing page with every card hidden.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(raw)?;
        let default = &config.listing.default_tab;
        if !config.listing.tabs.iter().any(|tab| &tab.tag == default) {
            return Err(ConfigError::UnknownDefaultTab(default.clone()));
        }
        Ok(config)
    }
}

/// Process-level knobs, read from the environment the same way every
/// deployment of this server has set them.
#[derive(Debug, Clone, Copy)]
pub struct ServerEnv {
    pub port: u16,
    pub is_development: bool,
}

impl ServerEnv {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("PORT").ok(),
            std::env::var("RUST_ENV").ok(),
        )
    }

    fn from_vars(port: Option<String>, rust_env: Option<String>) -> Self {
        Self {
            port: port
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            is_development: rust_env.map(|v| v == "development").unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[site]
title = "Ola Oke"
author = "Olaoluwa Oke"

[listing]
default_tab = "research"

[[listing.tabs]]
tag = "research"
label = "Research"

[[listing.tabs]]
tag = "apps"
label = "Apps"

[[listing.cards]]
title = "Manitoba wells"
blurb = "Province-scale GIS analytics"
category = "research"
slug = "manitoba-gis-oil-well"

[[listing.cards]]
title = "Work in progress"
category = "apps"
"#;

    #[test]
    fn parses_site_tabs_and_cards() {
        let config = SiteConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.site.title, "Ola Oke");
        assert_eq!(config.listing.default_tab, "research");
        assert_eq!(config.listing.tabs.len(), 2);
        assert_eq!(config.listing.cards.len(), 2);
        assert_eq!(
            config.listing.cards[0].slug.as_deref(),
            Some("manitoba-gis-oil-well")
        );
    }

    #[test]
    fn card_slug_and_blurb_are_optional() {
        let config = SiteConfig::from_toml(SAMPLE).unwrap();
        let draft = &config.listing.cards[1];
        assert_eq!(draft.slug, None);
        assert_eq!(draft.blurb, "");
    }

    #[test]
    fn default_tab_must_exist() {
        let raw = SAMPLE.replace("default_tab = \"research\"", "default_tab = \"reserch\"");
        let err = SiteConfig::from_toml(&raw).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDefaultTab(tag) if tag == "reserch"));
    }

    #[test]
    fn env_defaults_apply_when_unset() {
        let env = ServerEnv::from_vars(None, None);
        assert_eq!(env.port, DEFAULT_PORT);
        assert!(!env.is_development);
    }

    #[test]
    fn env_overrides_are_parsed() {
        let env = ServerEnv::from_vars(Some("3000".into()), Some("development".into()));
        assert_eq!(env.port, 3000);
        assert!(env.is_development);

        let env = ServerEnv::from_vars(Some("not-a-port".into()), Some("production".into()));
        assert_eq!(env.port, DEFAULT_PORT);
        assert!(!env.is_development);
    }
}
