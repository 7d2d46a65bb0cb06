use htmlescape::encode_minimal;
use serde::Deserialize;
use thiserror::Error;

use crate::chrome::Disclosure;
use crate::render::encode_attr;

/// One category tab. `tag` is the filter value cards are matched against,
/// `label` is what the tab displays.
#[derive(Debug, Clone, Deserialize)]
pub struct Tab {
    pub tag: String,
    pub label: String,
}

/// One project card on the listing page. Cards belong to the page author,
/// not the catalogue: `slug` is optional and is never validated against the
/// post table, so a stale slug is a dead link and a missing one fails loud
/// on activation.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub blurb: String,
    pub category: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivationError {
    #[error("card “{0}” has no slug to navigate to")]
    MissingSlug(String),
}

impl Card {
    /// Navigation target for an activated card, with the slug carried as a
    /// percent-encoded query parameter.
    pub fn activation_target(&self) -> Result<String, ActivationError> {
        match self.slug.as_deref() {
            Some(slug) => Ok(format!("/post?slug={}", urlencoding::encode(slug))),
            None => Err(ActivationError::MissingSlug(self.title.clone())),
        }
    }
}

/// Which category is active, and the card set that visibility is computed
/// over. Selecting a tab recomputes visibility in the same step; there is
/// no partial application and no animation state.
#[derive(Debug)]
pub struct ListingState<'a> {
    tabs: &'a [Tab],
    cards: &'a [Card],
    active: String,
}

impl<'a> ListingState<'a> {
    /// The default tag is selected unconditionally; initial state never
    /// comes from the URL or a persisted preference.
    pub fn new(tabs: &'a [Tab], cards: &'a [Card], default_tag: &str) -> Self {
        Self {
            tabs,
            cards,
            active: default_tag.to_owned(),
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn has_tab(&self, tag: &str) -> bool {
        self.tabs.iter().any(|tab| tab.tag == tag)
    }

    pub fn select(&mut self, tag: &str) {
        self.active = tag.to_owned();
    }

    /// A card is visible iff its category equals the active tag.
    pub fn is_visible(&self, card: &Card) -> bool {
        card.category == self.active
    }

    pub fn visible_cards(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| self.is_visible(card))
            .collect()
    }

    fn tabs_html(&self) -> String {
        let mut out = String::new();
        for tab in self.tabs {
            let class = if tab.tag == self.active { "tab active" } else { "tab" };
            out.push_str(&format!(
                "<a class=\"{class}\" data-filter=\"{}\" href=\"/?tab={}\">{}</a>\n",
                encode_attr(&tab.tag),
                urlencoding::encode(&tab.tag),
                encode_minimal(&tab.label),
            ));
        }
        out
    }

    fn cards_html(&self) -> String {
        let mut out = String::new();
        for card in self.cards {
            let hidden = if self.is_visible(card) { "" } else { " hidden" };
            let title = match card.activation_target() {
                Ok(target) => format!(
                    "<a href=\"{}\">{}</a>",
                    encode_attr(&target),
                    encode_minimal(&card.title)
                ),
                // No slug, nothing to link; activation stays loud client-side.
                Err(_) => encode_minimal(&card.title),
            };
            let slug_attr = card
                .slug
                .as_deref()
                .map(|slug| format!(" data-slug=\"{}\"", encode_attr(slug)))
                .unwrap_or_default();
            out.push_str(&format!(
                "<article class=\"card\" data-category=\"{}\"{slug_attr}{hidden}>\n  <h3>{title}</h3>\n  <p class=\"card-blurb\">{}</p>\n</article>\n",
                encode_attr(&card.category),
                encode_minimal(&card.blurb),
            ));
        }
        out
    }
}

pub const FOLD_TAG: &str = "<!-- more -->";

/// Split the about body at the read-more fold. Everything after the fold
/// starts collapsed; a body without a fold has no collapsed block at all.
pub fn split_at_fold(html: &str) -> (&str, Option<&str>) {
    match html.find(FOLD_TAG) {
        Some(i) => (&html[..i], Some(&html[i + FOLD_TAG.len()..])),
        None => (html, None),
    }
}

/// Fill the listing shell: intro, read-more block, tabs, cards. The
/// read-more control is painted from the disclosure state machine's
/// collapsed initial state.
pub fn listing_page(shell: &str, state: &ListingState<'_>, about_html: &str) -> String {
    let (intro, more) = split_at_fold(about_html);
    let disclosure = Disclosure::default();
    shell
        .replace("{{ intro }}", intro)
        .replace("{{ more }}", more.unwrap_or_default())
        .replace(
            "{{ more_hidden }}",
            if disclosure.is_expanded() { "" } else { "hidden" },
        )
        .replace("{{ read_toggle_label }}", disclosure.label())
        .replace("{{ tabs }}", &state.tabs_html())
        .replace("{{ cards }}", &state.cards_html())
}
