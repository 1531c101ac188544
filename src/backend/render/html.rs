/**
 * HTML Document Assembly
 *
 * Wraps the rendered page markup into a complete document:
 *
 * - head tags collected during the final render pass
 * - favicon markup (verbatim)
 * - the bootstrap script carrying the application state
 * - the asset partial from the frontend build (verbatim)
 * - analytics markup (verbatim)
 *
 * The state is embedded as percent-encoded JSON decoded at runtime with
 * `decodeURIComponent`, which keeps arbitrary state text from ending the
 * script element early. Output is a pure function of its inputs.
 */

use crate::backend::error::BackendError;
use crate::backend::render::context::HeadTags;
use crate::backend::render::partial::PartialCache;
use crate::shared::embed::encode_state;
use crate::shared::{AppState, RenderConfig};

/// Global the client bundle reads its initial state from
pub const INITIAL_STATE_GLOBAL: &str = "window.__INITIAL_STATE__";

/// Static pieces spliced into every document
#[derive(Debug, Clone, Copy)]
pub struct DocumentParts<'a> {
    pub head: &'a HeadTags,
    pub favicon_html: &'a str,
    pub partial: &'a str,
    pub analytics_html: &'a str,
}

/// Build the document string
pub fn render_document(
    content: &str,
    state: &AppState,
    parts: &DocumentParts<'_>,
) -> Result<String, BackendError> {
    let encoded = encode_state(state)?;

    Ok(format!(
        r#"
  <!DOCTYPE html>
  <!--[if IE 8]> <html lang="en" class="ie8"> <![endif]-->
  <!--[if IE 9]> <html lang="en" class="ie9"> <![endif]-->
  <!--[if !IE]><!-->
  <html lang="ru">
    <!--<![endif]-->
    <head>
      {title}
      {scripts}
      {links}
      {metas}

      {favicon}

      <script>
        {global} = JSON.parse(decodeURIComponent("{encoded}"));
      </script>

      {partial}

      {analytics}
    </head>
    <body data-spy="scroll"><div id="react-app">{content}</div></body>
  </html>"#,
        title = parts.head.title_html(),
        scripts = parts.head.scripts_html(),
        links = parts.head.links_html(),
        metas = parts.head.metas_html(),
        favicon = parts.favicon_html,
        global = INITIAL_STATE_GLOBAL,
        encoded = encoded,
        partial = parts.partial,
        analytics = parts.analytics_html,
        content = content,
    ))
}

/// Document assembler owning the lazily loaded partial
#[derive(Debug)]
pub struct HtmlAssembler {
    partial: PartialCache,
    favicon_html: String,
    analytics_html: String,
}

impl HtmlAssembler {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            partial: PartialCache::new(config.partial.clone()),
            favicon_html: config.favicon_html.clone(),
            analytics_html: config.analytics_html.clone(),
        }
    }

    pub fn partial(&self) -> &PartialCache {
        &self.partial
    }

    pub async fn assemble(
        &self,
        content: &str,
        state: &AppState,
        head: &HeadTags,
    ) -> Result<String, BackendError> {
        let partial = self.partial.get_or_load().await?;
        render_document(
            content,
            state,
            &DocumentParts {
                head,
                favicon_html: &self.favicon_html,
                partial: &*partial,
                analytics_html: &self.analytics_html,
            },
        )
    }
}

/// Pull the encoded state out of a document produced by [`render_document`]
///
/// Returns `None` unless the document carries exactly one bootstrap script.
pub fn extract_encoded_state(document: &str) -> Option<&str> {
    let marker = format!("{} = JSON.parse(decodeURIComponent(\"", INITIAL_STATE_GLOBAL);
    let mut found = document.match_indices(&marker);
    let (start, _) = found.next()?;
    if found.next().is_some() {
        return None;
    }
    let rest = &document[start + marker.len()..];
    rest.find('"').map(|end| &rest[..end])
}
