/// One catalogued project write-up.
///
/// Everything is `&'static str` because the catalogue is compiled into the
/// binary; there is no runtime creation of posts.
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: &'static str,
    pub title: &'static str,
    pub author: Option<&'static str>,
    /// Free-form display string, never parsed as a calendar date.
    pub date: Option<&'static str>,
    /// Source-code repository reference, usually a GitHub URL.
    pub repo: Option<ExternalRef>,
    /// Running-demo reference.
    pub live: Option<ExternalRef>,
    /// Pre-rendered body, injected verbatim. Authored by the site owner.
    pub content_html: &'static str,
}

/// An external link a post may carry. A missing `label` falls back to a
/// fixed default at render time; a reference with no URL cannot exist.
#[derive(Debug, Clone, Copy)]
pub struct ExternalRef {
    pub url: &'static str,
    pub label: Option<&'static str>,
}
