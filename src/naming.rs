//! Document naming
//!
//! Every generated document gets a `(folder, documentName)` pair. The folder is the
//! report kind; the name is `report-<owner>-<date>-<suffix>.<ext>` where `<date>` is the
//! calendar date in `Www Mmm DD YYYY` form. Path separators and `..` in the owner are
//! replaced with `_` so the name always stays a single path segment.
//!
//! The suffix comes from the configured [`NamingStrategy`]. The `Counter` strategy never
//! repeats within a process. The `Legacy` strategy (milliseconds + day of month) is kept
//! for compatibility with older clients that parse names; two calls in the same
//! millisecond for the same owner produce the same name under it.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::NamingStrategy;
use crate::types::{GeneratedDocumentInfo, RecordId, ReportKind};

/// Upper bound of the random counter seed
const SEED_RANGE: u64 = 1_000_000;

/// Derives unique document names per report kind and owner
#[derive(Debug)]
pub struct NamingService {
    strategy: NamingStrategy,
    counter: AtomicU64,
    extension: String,
}

impl NamingService {
    /// Create a naming service; the counter starts at a random value
    pub fn new(strategy: NamingStrategy) -> Self {
        let seed = rand::thread_rng().gen_range(0..SEED_RANGE);
        Self::with_seed(strategy, seed)
    }

    /// Create a naming service whose counter starts at `seed`
    pub fn with_seed(strategy: NamingStrategy, seed: u64) -> Self {
        Self {
            strategy,
            counter: AtomicU64::new(seed),
            extension: "docx".to_string(),
        }
    }

    /// Set the file extension (without dot) and return the updated service
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Name a new document of `kind` owned by `owner`, using the current local time
    pub fn name_for(&self, kind: ReportKind, owner: &RecordId) -> GeneratedDocumentInfo {
        self.name_for_at(kind, owner, Local::now().naive_local())
    }

    /// Name a new document as if generated at `now`
    pub fn name_for_at(
        &self,
        kind: ReportKind,
        owner: &RecordId,
        now: NaiveDateTime,
    ) -> GeneratedDocumentInfo {
        let owner = file_safe(owner.as_str());
        let date = now.format("%a %b %d %Y");
        let suffix = self.suffix(now);

        GeneratedDocumentInfo {
            document_name: format!("report-{owner}-{date}-{suffix}.{}", self.extension),
            folder: kind.folder().to_string(),
        }
    }

    fn suffix(&self, now: NaiveDateTime) -> u64 {
        match self.strategy {
            NamingStrategy::Counter => self.counter.fetch_add(1, Ordering::Relaxed),
            NamingStrategy::Legacy => {
                let millis = u64::from(now.nanosecond() / 1_000_000);
                millis + u64::from(now.day())
            }
        }
    }
}

fn file_safe(owner: &str) -> String {
    owner.replace(['/', '\\'], "_").replace("..", "_")
}

impl Default for NamingService {
    fn default() -> Self {
        Self::new(NamingStrategy::default())
    }
}
