use htmlescape::encode_minimal;

use crate::chrome::NavMenu;
use crate::hot_reload::HOT_RELOAD_SCRIPT;
use crate::models::{ExternalRef, Post};

pub const NOT_FOUND_HEADING: &str = "Post not found";
pub const NOT_FOUND_BODY: &str =
    "<p>That article doesn’t exist (yet). Go back and pick another.</p>";

pub const DEFAULT_REPO_LABEL: &str = "Link";
pub const DEFAULT_LIVE_LABEL: &str = "Live";

/// A link affordance that made it into the page. Absent from the view means
/// absent from the page, never an anchor with an empty href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub href: String,
    pub label: String,
}

/// Everything the post page needs, as plain data. Produced by [`post_view`]
/// and painted into the shell afterwards, so the resolution contract is
/// testable without a server or markup in sight.
#[derive(Debug, Clone)]
pub struct PostView {
    /// `None` leaves the document title alone (the not-found case).
    pub page_title: Option<String>,
    pub heading: String,
    pub author: String,
    pub date: String,
    pub repo_link: Option<LinkView>,
    pub live_link: Option<LinkView>,
    pub content_html: String,
}

fn link_view(external: &ExternalRef, default_label: &str) -> LinkView {
    LinkView {
        href: external.url.to_owned(),
        label: external.label.unwrap_or(default_label).to_owned(),
    }
}

/// Total over `{Found, NotFound}`; there is no error path. A missing slug
/// parameter upstream shows up here as `None` and renders the same two
/// fixed outcomes as an unmatched one.
pub fn post_view(post: Option<&Post>) -> PostView {
    match post {
        Some(post) => PostView {
            page_title: Some(post.title.to_owned()),
            heading: post.title.to_owned(),
            author: post.author.unwrap_or_default().to_owned(),
            date: post.date.unwrap_or_default().to_owned(),
            repo_link: post.repo.as_ref().map(|r| link_view(r, DEFAULT_REPO_LABEL)),
            live_link: post.live.as_ref().map(|r| link_view(r, DEFAULT_LIVE_LABEL)),
            content_html: post.content_html.to_owned(),
        },
        None => PostView {
            page_title: None,
            heading: NOT_FOUND_HEADING.to_owned(),
            author: String::new(),
            date: String::new(),
            repo_link: None,
            live_link: None,
            content_html: NOT_FOUND_BODY.to_owned(),
        },
    }
}

/// Escape a value headed into a double-quoted attribute. `encode_minimal`
/// covers text content but leaves quotes alone.
pub(crate) fn encode_attr(value: &str) -> String {
    encode_minimal(value).replace('"', "&quot;")
}

fn link_html(link: Option<&LinkView>, id: &str) -> String {
    match link {
        Some(link) => format!(
            "<a id=\"{id}\" class=\"post-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            encode_attr(&link.href),
            encode_minimal(&link.label),
        ),
        None => String::new(),
    }
}

/// Fill the post shell from a view. Placeholder substitution only, the same
/// way the layout is assembled; a shell missing a slot just renders without
/// it. Text fields are escaped, the body goes in verbatim.
pub fn post_page(shell: &str, view: &PostView) -> String {
    shell
        .replace("{{ heading }}", &encode_minimal(&view.heading))
        .replace("{{ author }}", &encode_minimal(&view.author))
        .replace("{{ date }}", &encode_minimal(&view.date))
        .replace("{{ repo_link }}", &link_html(view.repo_link.as_ref(), "postLink"))
        .replace("{{ live_link }}", &link_html(view.live_link.as_ref(), "postLive"))
        .replace("{{ content }}", &view.content_html)
}

/// Wrap page content in the outer layout. The mobile nav panel is painted
/// closed, matching the chrome state machine's initial state.
pub fn render_with_layout(
    layout: &str,
    banner: &str,
    title: &str,
    content: &str,
    is_development: bool,
) -> String {
    let nav = NavMenu::default();
    let banner = banner.replace(
        "{{ nav_hidden }}",
        if nav.is_open() { "" } else { "hidden" },
    );

    let mut page = layout
        .replace("{{ title }}", &encode_minimal(title))
        .replace("{{ banner }}", &banner)
        .replace("{{ content }}", content);

    if is_development {
        page = page.replace("</body>", &format!("{HOT_RELOAD_SCRIPT}</body>"));
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            slug: "awa-app",
            title: "Awa – Roommates Communication App",
            author: Some("Ola Oke"),
            date: Some("2025"),
            repo: Some(ExternalRef {
                url: "https://github.com/x/Awa",
                label: Some("GitHub"),
            }),
            live: None,
            content_html: "<p>body</p>",
        }
    }

    #[test]
    fn found_post_reproduces_every_field() {
        let post = sample_post();
        let view = post_view(Some(&post));
        assert_eq!(view.page_title.as_deref(), Some(post.title));
        assert_eq!(view.heading, post.title);
        assert_eq!(view.author, "Ola Oke");
        assert_eq!(view.date, "2025");
        let repo = view.repo_link.unwrap();
        assert_eq!(repo.href, "https://github.com/x/Awa");
        assert_eq!(repo.label, "GitHub");
        assert!(view.live_link.is_none());
        assert_eq!(view.content_html, "<p>body</p>");
    }

    #[test]
    fn absent_author_and_date_render_empty_not_literal_none() {
        let mut post = sample_post();
        post.author = None;
        post.date = None;
        let view = post_view(Some(&post));
        assert_eq!(view.author, "");
        assert_eq!(view.date, "");
    }

    #[test]
    fn link_without_label_gets_fixed_default() {
        let mut post = sample_post();
        post.repo = Some(ExternalRef {
            url: "https://github.com/x/Awa",
            label: None,
        });
        post.live = Some(ExternalRef {
            url: "https://demo.example",
            label: None,
        });
        let view = post_view(Some(&post));
        assert_eq!(view.repo_link.unwrap().label, DEFAULT_REPO_LABEL);
        assert_eq!(view.live_link.unwrap().label, DEFAULT_LIVE_LABEL);
    }

    #[test]
    fn missing_post_renders_fixed_fallback() {
        let view = post_view(None);
        assert_eq!(view.page_title, None);
        assert_eq!(view.heading, NOT_FOUND_HEADING);
        assert_eq!(view.content_html, NOT_FOUND_BODY);
        assert!(view.repo_link.is_none());
        assert!(view.live_link.is_none());
        assert_eq!(view.author, "");
        assert_eq!(view.date, "");
    }

    #[test]
    fn painted_page_omits_absent_affordances() {
        let shell = "<h1>{{ heading }}</h1>{{ repo_link }}{{ live_link }}<div>{{ content }}</div>";
        let post = sample_post();
        let page = post_page(shell, &post_view(Some(&post)));
        assert!(page.contains("id=\"postLink\""));
        assert!(page.contains("href=\"https://github.com/x/Awa\""));
        assert!(page.contains(">GitHub</a>"));
        assert!(!page.contains("id=\"postLive\""));
    }

    #[test]
    fn painted_page_escapes_text_but_not_body() {
        let mut post = sample_post();
        post.title = "Tips & <tricks>";
        post.content_html = "<p>1 < 2 &amp; so on</p>";
        let shell = "<h1>{{ heading }}</h1><div>{{ content }}</div>";
        let page = post_page(shell, &post_view(Some(&post)));
        assert!(page.contains("Tips &amp; &lt;tricks&gt;"));
        assert!(page.contains("<p>1 < 2 &amp; so on</p>"));
    }

    #[test]
    fn shell_missing_a_slot_is_left_alone() {
        let shell = "<h1>{{ heading }}</h1>";
        let post = sample_post();
        let page = post_page(shell, &post_view(Some(&post)));
        assert_eq!(page, "<h1>Awa – Roommates Communication App</h1>");
    }

    #[test]
    fn layout_paints_title_banner_and_content() {
        let layout = "<title>{{ title }}</title>{{ banner }}<main>{{ content }}</main></body>";
        let banner = "<nav {{ nav_hidden }}>links</nav>";
        let page = render_with_layout(layout, banner, "Site", "<p>hi</p>", false);
        assert!(page.contains("<title>Site</title>"));
        assert!(page.contains("<nav hidden>links</nav>"));
        assert!(page.contains("<main><p>hi</p></main>"));
        assert!(!page.contains("WebSocket"));
    }

    #[test]
    fn dev_layout_injects_reload_script() {
        let layout = "<body>{{ content }}</body>";
        let page = render_with_layout(layout, "", "Site", "x", true);
        assert!(page.contains("WebSocket"));
        assert!(page.ends_with("</body>"));
    }
}
