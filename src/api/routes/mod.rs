//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - `reports` - Report generation
//! - `download` - Streaming generated documents
//! - `system` - Health, OpenAPI

mod download;
mod reports;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use download::*;
pub use reports::*;
pub use system::*;
