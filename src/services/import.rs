use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::models::Registration;

/// Receiver for files that should be bundled.
///
/// Implemented by the host build pipeline; the resolver never consults a return value.
#[cfg_attr(test, mockall::automock)]
pub trait ImportSink {
    /// Register a single file path for bundling.
    fn register_import(&mut self, path: &Utf8Path);
}

/// Sink that keeps every registered path in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRecorder {
    paths: Vec<Utf8PathBuf>,
}

impl ImportRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[Utf8PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<Utf8PathBuf> {
        self.paths
    }
}

impl ImportSink for ImportRecorder {
    fn register_import(&mut self, path: &Utf8Path) {
        self.paths.push(path.to_path_buf());
    }
}

/// Ordered list of registrations produced by a successful resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportPlan {
    registrations: Vec<Registration>,
}

impl ImportPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: impl Into<String>, path: impl Into<Utf8PathBuf>) {
        self.registrations.push(Registration::new(category, path));
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.registrations.iter().map(|r| r.path.as_path())
    }

    /// Paths registered under one category label.
    pub fn for_category(&self, category: &str) -> Vec<&Utf8Path> {
        self.registrations
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.path.as_path())
            .collect()
    }

    /// Hand every path to `sink`, once each, in plan order.
    ///
    /// # Returns
    /// The number of registered paths
    pub fn register_all(&self, sink: &mut dyn ImportSink) -> usize {
        for registration in &self.registrations {
            tracing::debug!("Importing [{}] {}", registration.category, registration.path);
            sink.register_import(&registration.path);
        }
        self.registrations.len()
    }
}
