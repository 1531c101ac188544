/**
 * Render Context
 *
 * Side channel a page writes to while it renders: a redirect request and
 * the document head tags. A fresh context is created for every pass and
 * read exactly once after the pass completes.
 */

/// Escape text for use in HTML element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Head tags collected during a render pass
///
/// Each group renders to a string of complete tags, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadTags {
    title: Option<String>,
    scripts: Vec<String>,
    links: Vec<String>,
    metas: Vec<String>,
}

impl HeadTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title; the last call wins
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn add_meta(&mut self, name: &str, content: &str) {
        self.metas.push(format!(
            r#"<meta name="{}" content="{}">"#,
            escape_html(name),
            escape_html(content)
        ));
    }

    pub fn add_link(&mut self, rel: &str, href: &str) {
        self.links.push(format!(
            r#"<link rel="{}" href="{}">"#,
            escape_html(rel),
            escape_html(href)
        ));
    }

    pub fn add_script_src(&mut self, src: &str) {
        self.scripts.push(format!(
            r#"<script src="{}" type="text/javascript"></script>"#,
            escape_html(src)
        ));
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_html(&self) -> String {
        self.title
            .as_deref()
            .map(|title| format!("<title>{}</title>", escape_html(title)))
            .unwrap_or_default()
    }

    pub fn scripts_html(&self) -> String {
        self.scripts.concat()
    }

    pub fn links_html(&self) -> String {
        self.links.concat()
    }

    pub fn metas_html(&self) -> String {
        self.metas.concat()
    }
}

/// Per-pass out-parameter
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    redirect: Option<String>,
    pub head: HeadTags,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the client to navigate elsewhere; the last call wins
    pub fn redirect(&mut self, location: impl Into<String>) {
        self.redirect = Some(location.into());
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Split into redirect target and head tags once the pass is done
    pub fn finish(self) -> (Option<String>, HeadTags) {
        (self.redirect, self.head)
    }
}
