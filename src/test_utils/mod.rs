//! Test utilities for user-secrets-id
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`init_test_logging`] - tracing output inside `cargo test`
//! - [`RecordingReporter`] - a [`Reporter`] that remembers what it was told
//! - [`fixtures`] - project directories, tool assets and fake `dotnet` muxers
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use user_secrets_id::reporter::Reporter;
//! use user_secrets_id::test_utils::RecordingReporter;
//!
//! let reporter = Arc::new(RecordingReporter::new());
//! reporter.error("boom");
//! assert_eq!(reporter.errors(), vec!["boom"]);
//! ```

pub mod fixtures;

use std::sync::{Mutex, Once, PoisonError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::reporter::Reporter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None` logging is enabled only
/// when `RUST_LOG` is set:
///
/// ```bash
/// RUST_LOG=msbuild=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Level a [`RecordingReporter`] message was reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Verbose,
    Error,
}

/// [`Reporter`] that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<(ReportLevel, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn messages(&self) -> Vec<(ReportLevel, String)> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Messages reported at `level`, in order.
    pub fn at_level(&self, level: ReportLevel) -> Vec<String> {
        self.messages().into_iter().filter(|(l, _)| *l == level).map(|(_, message)| message).collect()
    }

    pub fn verbose_messages(&self) -> Vec<String> {
        self.at_level(ReportLevel::Verbose)
    }

    pub fn errors(&self) -> Vec<String> {
        self.at_level(ReportLevel::Error)
    }

    fn record(&self, level: ReportLevel, message: &str) {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn verbose(&self, message: &str) {
        self.record(ReportLevel::Verbose, message);
    }

    fn error(&self, message: &str) {
        self.record(ReportLevel::Error, message);
    }
}
