//! Report assembly engine.
//!
//! Leaf first: [`builders`] make individual blocks, [`adapters`] map records to table
//! rows, [`sections`] compose whole entity sections and [`assembler`] turns them into a
//! stored document.

pub mod adapters;
pub mod assembler;
pub mod builders;
pub mod sections;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use adapters::{EventMetadata, EventShell, TableRows};
pub use assembler::DocumentAssembler;
pub use sections::SectionComposer;
