/**
 * Template Partial Cache
 *
 * The asset partial (script and stylesheet tags emitted by the frontend
 * build) is loaded on first use and then kept for the life of the process.
 * It is immutable build output, so the cache is never invalidated.
 *
 * Concurrent first renders share one initializer: exactly one read happens
 * and every caller observes the same value. A failed read leaves the cache
 * empty and the error reaches the render that triggered it.
 */

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::backend::error::BackendError;
use crate::shared::PartialSource;

#[derive(Debug)]
pub struct PartialCache {
    source: PartialSource,
    cell: OnceCell<Arc<str>>,
}

impl PartialCache {
    pub fn new(source: PartialSource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &PartialSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Cached partial, loading it on the first call
    pub async fn get_or_load(&self) -> Result<Arc<str>, BackendError> {
        let partial = self
            .cell
            .get_or_try_init(|| async {
                match &self.source {
                    PartialSource::Inline(html) => Ok::<Arc<str>, BackendError>(Arc::from(html.as_str())),
                    PartialSource::File(path) => {
                        let html = tokio::fs::read_to_string(path)
                            .await
                            .map_err(|e| BackendError::partial(path, e))?;
                        tracing::info!(path = %path.display(), bytes = html.len(), "loaded template partial");
                        Ok(Arc::from(html))
                    }
                }
            })
            .await?;
        Ok(partial.clone())
    }
}
