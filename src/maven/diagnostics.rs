use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, error, trace, warn};

/// Events emitted while collecting versions from an artifact directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorEvent {
    DescriptorMissing {
        version_directory: PathBuf,
    },
    DescriptorCorrupt {
        version_directory: PathBuf,
        pom_path: PathBuf,
        reason: String,
    },
    VersionMissing {
        version_directory: PathBuf,
        pom_path: PathBuf,
    },
    DirectoryUnreadable {
        version_directory: PathBuf,
        reason: String,
    },
    VersionResolved {
        version_directory: PathBuf,
        version: String,
    },
    PluginDetected {
        artifact_id: String,
        prefix: String,
    },
}

/// Receives collector events. Passed into each collection call, so every caller decides where
///  events go.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: CollectorEvent);
}

/// Forwards events to `tracing`
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, event: CollectorEvent) {
        match event {
            CollectorEvent::DescriptorMissing { version_directory } => {
                debug!("no POM in version directory {} - skipping", version_directory.display());
            }
            CollectorEvent::DescriptorCorrupt { version_directory, pom_path, reason } => {
                error!("POM file '{}' in version directory {} appears to be corrupt: {}", pom_path.display(), version_directory.display(), reason);
            }
            CollectorEvent::VersionMissing { version_directory, pom_path } => {
                warn!("POM file '{}' in version directory {} declares no version - skipping", pom_path.display(), version_directory.display());
            }
            CollectorEvent::DirectoryUnreadable { version_directory, reason } => {
                error!("failed to read version directory {}: {}", version_directory.display(), reason);
            }
            CollectorEvent::VersionResolved { version_directory, version } => {
                trace!("resolved version {} from {}", version, version_directory.display());
            }
            CollectorEvent::PluginDetected { artifact_id, prefix } => {
                debug!("artifact {} is a plugin with goal prefix '{}'", artifact_id, prefix);
            }
        }
    }
}

pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _event: CollectorEvent) {}
}

/// Keeps all events for later inspection
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CollectorEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<CollectorEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, event: CollectorEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
