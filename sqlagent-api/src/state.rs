//! Shared handler state.

use std::sync::Arc;

use sqlagent_core::ConnectionProvider;
use sqlagent_llm::QueryTranslator;

/// Long-lived collaborators built once at startup.
///
/// Nothing in here is mutated by requests; connections are opened per call
/// through `db`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn ConnectionProvider>,
    pub translator: Arc<QueryTranslator>,
}

impl AppState {
    pub fn new(db: Arc<dyn ConnectionProvider>, translator: QueryTranslator) -> Self {
        Self {
            db,
            translator: Arc::new(translator),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}
