//! Bundled Site
//!
//! The application served by the binary: a home page and a repository page
//! backed by the upstream API, plus a legacy short link.
//!
//! | Path                  | Page                                        |
//! |-----------------------|---------------------------------------------|
//! | `/`                   | [`HomePage`]                                |
//! | `/repos/:owner/:name` | [`RepoPage`], loads the `repo` slice         |
//! | `/r/:owner/:name`     | redirect to `/repos/:owner/:name`           |
//! | anything else         | not found (404)                             |

use std::sync::Arc;

use serde_json::Value;

use crate::backend::api::ApiClient;
use crate::backend::error::BackendError;
use crate::backend::render::context::{escape_html, RenderContext};
use crate::backend::render::effects::{EffectError, EffectScope};
use crate::backend::render::routing::{Application, Page, PageContext, RouteTree};
use crate::shared::{Action, SharedError};

/// State slice the repository page loads into
pub const REPO_SLICE: &str = "repo";

/// Toggle that expands the repository description on the home page
pub const INTRO_TOGGLE: &str = "intro";

pub struct Site {
    api: Arc<ApiClient>,
}

impl Site {
    pub fn new(api: ApiClient) -> Self {
        Self { api: Arc::new(api) }
    }
}

impl Application for Site {
    fn routes(&self) -> Result<RouteTree, SharedError> {
        RouteTree::builder()
            .page("/", HomePage)
            .page("/repos/:owner/:name", RepoPage { api: self.api.clone() })
            .redirect("/r/:owner/:name", "/repos/:owner/:name")
            .build()
    }
}

pub struct HomePage;

impl Page for HomePage {
    fn render(&self, cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError> {
        out.head.set_title("GolangCI");
        out.head
            .add_meta("description", "Automated code review for Go repositories");

        let mut html = String::from("<main class=\"home\"><h1>GolangCI</h1>");
        if cx.state.toggle.store.is_on(INTRO_TOGGLE) {
            html.push_str("<p class=\"intro\">Linters run on every pull request.</p>");
        }
        html.push_str("</main>");
        Ok(html)
    }
}

pub struct RepoPage {
    api: Arc<ApiClient>,
}

impl RepoPage {
    fn api_path(owner: &str, name: &str) -> String {
        format!(
            "/v1/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        )
    }
}

impl Page for RepoPage {
    fn effects(&self, cx: &PageContext<'_>, scope: &mut EffectScope) {
        let (Some(owner), Some(name)) = (cx.param("owner"), cx.param("name")) else {
            scope.dispatch_later("repo", vec![Action::SetResult(404)]);
            return;
        };

        let api = self.api.clone();
        let path = Self::api_path(owner, name);
        let cookie = cx.state.auth.cookie.clone();
        scope.spawn("repo", async move {
            let repo: Value = api.get_json(&path, &cookie).await?;
            Ok::<_, EffectError>(vec![Action::set_slice(REPO_SLICE, repo)])
        });
    }

    fn render(&self, cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError> {
        let Some(repo) = cx.state.slice(REPO_SLICE) else {
            return Ok(String::new());
        };

        // Renamed repositories answer with their new full name.
        if let Some(moved_to) = repo.get("movedTo").and_then(Value::as_str) {
            let target = moved_to
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| urlencoding::encode(segment).into_owned())
                .collect::<Vec<_>>()
                .join("/");
            out.redirect(format!("/repos/{}", target));
            return Ok(String::new());
        }

        let full_name = match (cx.param("owner"), cx.param("name")) {
            (Some(owner), Some(name)) => format!("{}/{}", owner, name),
            _ => return Err(BackendError::render("repository page without parameters")),
        };
        out.head.set_title(format!("{} | GolangCI", full_name));

        let mut html = format!("<main class=\"repo\"><h1>{}</h1>", escape_html(&full_name));
        if let Some(description) = repo.get("description").and_then(Value::as_str) {
            html.push_str(&format!("<p>{}</p>", escape_html(description)));
        }
        if let Some(issues) = repo.get("issues").and_then(Value::as_u64) {
            html.push_str(&format!("<span class=\"issues\">{} issues</span>", issues));
        }
        html.push_str("</main>");
        Ok(html)
    }
}
