//! Application state for the API server

use crate::report::DocumentAssembler;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone). Handlers reach the
/// configuration through [`DocumentAssembler::config`].
#[derive(Clone)]
pub struct AppState {
    /// Builds and stores report documents
    pub assembler: Arc<DocumentAssembler>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(assembler: Arc<DocumentAssembler>) -> Self {
        Self { assembler }
    }
}
