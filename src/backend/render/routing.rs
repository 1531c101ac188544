/**
 * Route Tree
 *
 * The application being rendered is described by an [`Application`] that
 * builds a [`RouteTree`]: an ordered list of URL patterns, each bound to a
 * [`Page`]. The first matching pattern wins; a fallback page answers when
 * nothing matches.
 *
 * # Patterns
 *
 * Patterns are `/`-separated segments:
 *
 * - `repos` matches the literal segment
 * - `:owner` captures one segment as the `owner` parameter
 * - `*` as the last segment matches whatever remains (including nothing)
 *
 * # Pages
 *
 * A page takes part in both phases of a render:
 *
 * - `effects` (phase 1) starts the asynchronous work it needs
 * - `render` (phase 2) produces markup from the settled state and may ask
 *   for a redirect or add head tags through the [`RenderContext`]
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::render::context::RenderContext;
use crate::backend::render::effects::EffectScope;
use crate::backend::render::request::QueryMap;
use crate::shared::{Action, AppState, SharedError};

/// Parameters captured from the URL path
pub type Params = BTreeMap<String, String>;

/// What a page sees during either phase
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Request path without the query string
    pub path: &'a str,
    pub query: &'a QueryMap,
    pub params: &'a Params,
    pub state: &'a AppState,
}

impl PageContext<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// One screen of the application
pub trait Page: Send + Sync {
    /// Phase 1: start the effects this page depends on
    fn effects(&self, _cx: &PageContext<'_>, _scope: &mut EffectScope) {}

    /// Phase 2: produce the page markup
    fn render(&self, cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError>;
}

/// The application rendered by the pipeline
pub trait Application: Send + Sync {
    fn routes(&self) -> Result<RouteTree, SharedError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Rest,
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Self, SharedError> {
        if !pattern.starts_with('/') {
            return Err(SharedError::validation(
                "pattern",
                format!("route pattern '{}' must start with '/'", pattern),
            ));
        }

        let raw: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(raw.len());
        for (i, segment) in raw.iter().enumerate() {
            let parsed = if *segment == "*" {
                if i + 1 != raw.len() {
                    return Err(SharedError::validation(
                        "pattern",
                        format!("'*' must be the last segment of '{}'", pattern),
                    ));
                }
                Segment::Rest
            } else if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(SharedError::validation(
                        "pattern",
                        format!("empty parameter name in '{}'", pattern),
                    ));
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(segment.to_string())
            };
            segments.push(parsed);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a request path, returning the captured parameters
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut parts = split_path(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return Some(params),
                Segment::Literal(literal) => {
                    if parts.next()? != literal.as_str() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.next()?;
                    let value = urlencoding::decode(value)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| value.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// Fill `:name` placeholders of a target path from captured parameters
pub fn expand(target: &str, params: &Params) -> String {
    let expanded: Vec<String> = target
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .get(name)
                .map(|value| urlencoding::encode(value).into_owned())
                .unwrap_or_default(),
            None => segment.to_string(),
        })
        .collect();
    expanded.join("/")
}

/// Page that only redirects
pub struct RedirectPage {
    target: String,
}

impl RedirectPage {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Page for RedirectPage {
    fn render(&self, cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError> {
        out.redirect(expand(&self.target, cx.params));
        Ok(String::new())
    }
}

/// Fallback used when no route matches: reports 404 through the state
pub struct NotFoundPage;

impl Page for NotFoundPage {
    fn effects(&self, _cx: &PageContext<'_>, scope: &mut EffectScope) {
        scope.dispatch_later("not_found", vec![Action::SetResult(404)]);
    }

    fn render(&self, _cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError> {
        out.head.set_title("Not Found");
        Ok("<h1>Not Found</h1>".to_string())
    }
}

/// A pattern bound to a page
pub struct Route {
    pattern: Pattern,
    page: Arc<dyn Page>,
}

impl Route {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Result of resolving a path
pub struct Resolved {
    pub page: Arc<dyn Page>,
    pub params: Params,
    /// Pattern that matched, `None` for the fallback
    pub pattern: Option<String>,
}

/// Ordered routes plus a fallback page
pub struct RouteTree {
    routes: Vec<Route>,
    fallback: Arc<dyn Page>,
}

impl RouteTree {
    pub fn builder() -> RouteTreeBuilder {
        RouteTreeBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn resolve(&self, path: &str) -> Resolved {
        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.matches(path).map(|params| Resolved {
                    page: route.page.clone(),
                    params,
                    pattern: Some(route.pattern.as_str().to_string()),
                })
            })
            .unwrap_or_else(|| Resolved {
                page: self.fallback.clone(),
                params: Params::new(),
                pattern: None,
            })
    }
}

/// Builder for RouteTree
///
/// Pattern errors are collected and reported by `build`.
#[derive(Default)]
pub struct RouteTreeBuilder {
    routes: Vec<(String, Arc<dyn Page>)>,
    fallback: Option<Arc<dyn Page>>,
}

impl RouteTreeBuilder {
    pub fn page(mut self, pattern: &str, page: impl Page + 'static) -> Self {
        self.routes.push((pattern.to_string(), Arc::new(page)));
        self
    }

    pub fn shared_page(mut self, pattern: &str, page: Arc<dyn Page>) -> Self {
        self.routes.push((pattern.to_string(), page));
        self
    }

    pub fn redirect(self, pattern: &str, target: &str) -> Self {
        self.page(pattern, RedirectPage::new(target))
    }

    pub fn fallback(mut self, page: impl Page + 'static) -> Self {
        self.fallback = Some(Arc::new(page));
        self
    }

    pub fn build(self) -> Result<RouteTree, SharedError> {
        let routes = self
            .routes
            .into_iter()
            .map(|(pattern, page)| {
                Ok(Route {
                    pattern: Pattern::parse(&pattern)?,
                    page,
                })
            })
            .collect::<Result<Vec<_>, SharedError>>()?;

        Ok(RouteTree {
            routes,
            fallback: self.fallback.unwrap_or_else(|| Arc::new(NotFoundPage)),
        })
    }
}
