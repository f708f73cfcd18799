use crate::config::DashboardConfig;
use crate::core::document::Document;
use crate::domain::ports::ScoreService;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the router and pages share, built once at startup and passed
/// down explicitly. Clones share the same document, service and config.
#[derive(Clone)]
pub struct AppContext {
    document: Arc<Mutex<Document>>,
    scores: Arc<dyn ScoreService>,
    config: Arc<DashboardConfig>,
}

impl AppContext {
    pub fn new(document: Document, scores: Arc<dyn ScoreService>, config: DashboardConfig) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            scores,
            config: Arc::new(config),
        }
    }

    /// Lock the document. Guards must not be held across an `.await`.
    pub fn doc(&self) -> MutexGuard<'_, Document> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn scores(&self) -> &dyn ScoreService {
        self.scores.as_ref()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fire `event` on element `target`, running every registered handler to
    /// completion in registration order. Returns how many handlers ran.
    pub async fn dispatch(&self, target: &str, event: &str) -> usize {
        let handlers = self.doc().listeners_for(target, event);
        if handlers.is_empty() {
            tracing::debug!("No '{}' listener on #{}", event, target);
        }
        let count = handlers.len();
        for handler in handlers {
            handler(self.clone()).await;
        }
        count
    }
}
