//! Sequential organize loop: walk, resolve, copy.

use super::executor::CopyExecutor;
use super::types::{FileDisposition, OrganizeConfig};
use crate::core::resolver::{PathResolver, ResolutionOutcome};
use crate::core::scanner::{ScanConfig, SourceWalker, WalkEntry};
use crate::error::{CopyError, SortError};
use crate::events::{
    null_sender, CopyEvent, Event, EventSender, ResolveEvent, RunEvent, RunSummary, WalkEvent,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Builder for organizer configuration
pub struct OrganizerBuilder {
    config: OrganizeConfig,
    resolver: Option<PathResolver>,
}

impl OrganizerBuilder {
    /// Create a new organizer builder
    pub fn new() -> Self {
        Self {
            config: OrganizeConfig::default(),
            resolver: None,
        }
    }

    /// Tree to read media from
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_root = path.into();
        self
    }

    /// Tree to sort media into
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.destination_root = path.into();
        self
    }

    /// Resolve without copying
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Set walker configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Prune dot-files and dot-directories
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.config.scan_config.skip_hidden = skip;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.scan_config.follow_symlinks = follow;
        self
    }

    /// Use a custom resolver
    pub fn resolver(mut self, resolver: PathResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the organizer
    pub fn build(self) -> Result<Organizer, SortError> {
        if self.config.source_root.as_os_str().is_empty() {
            return Err(SortError::Config("source directory is required".to_string()));
        }
        if self.config.destination_root.as_os_str().is_empty() {
            return Err(SortError::Config(
                "destination directory is required".to_string(),
            ));
        }

        Ok(Organizer {
            walker: SourceWalker::new(self.config.scan_config.clone()),
            resolver: self.resolver.unwrap_or_default(),
            config: self.config,
        })
    }
}

impl Default for OrganizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts a source tree into dated folders, one file at a time
pub struct Organizer {
    config: OrganizeConfig,
    walker: SourceWalker,
    resolver: PathResolver,
}

impl Organizer {
    /// Create a new organizer builder
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new()
    }

    pub fn config(&self) -> &OrganizeConfig {
        &self.config
    }

    /// Run without event reporting
    pub fn run(&self) -> RunSummary {
        self.run_with_events(&null_sender())
    }

    /// Walk the source tree and organize every regular file.
    ///
    /// Per-file problems are reported and counted; none of them stop the run.
    pub fn run_with_events(&self, events: &EventSender) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        events.send(Event::Run(RunEvent::Started {
            source_root: self.config.source_root.clone(),
            destination_root: self.config.destination_root.clone(),
            dry_run: self.config.dry_run,
        }));

        match self.walker.walk(&self.config.source_root) {
            Ok(entries) => {
                for entry in entries {
                    self.handle_entry(entry, events, &mut summary);
                }
            }
            Err(e) => {
                summary.errors += 1;
                events.send(Event::Walk(WalkEvent::Error {
                    path: self.config.source_root.clone(),
                    message: e.to_string(),
                }));
            }
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Run(RunEvent::Completed {
            summary: summary.clone(),
        }));

        summary
    }

    fn handle_entry(&self, entry: WalkEntry, events: &EventSender, summary: &mut RunSummary) {
        match entry {
            WalkEntry::File(path) => {
                summary.files_seen += 1;
                match self.process_file(&path, events) {
                    FileDisposition::Copied { bytes, .. } => {
                        summary.copied += 1;
                        summary.bytes_written += bytes;
                    }
                    FileDisposition::Duplicate { .. } => summary.duplicates += 1,
                    FileDisposition::NoTimestamp => summary.timestamp_unavailable += 1,
                    FileDisposition::Exhausted => summary.probe_exhausted += 1,
                    FileDisposition::Refused => summary.refused += 1,
                    FileDisposition::Failed => summary.errors += 1,
                }
            }
            WalkEntry::Directory(path) => {
                events.send(Event::Walk(WalkEvent::Directory { path }));
            }
            WalkEntry::Other(path) => {
                events.send(Event::Walk(WalkEvent::Skipped { path }));
            }
            WalkEntry::Error(e) => {
                summary.errors += 1;
                events.send(Event::Walk(WalkEvent::Error {
                    path: e.path().to_path_buf(),
                    message: e.to_string(),
                }));
            }
        }
    }

    /// Resolve one source file and copy it if it has a free destination
    pub fn process_file(&self, source: &Path, events: &EventSender) -> FileDisposition {
        let outcome = match self
            .resolver
            .resolve(source, &self.config.destination_root)
        {
            Ok(outcome) => outcome,
            Err(e) => {
                events.send(Event::Resolve(ResolveEvent::Failed {
                    source: source.to_path_buf(),
                    message: e.to_string(),
                }));
                return FileDisposition::Failed;
            }
        };

        match outcome {
            ResolutionOutcome::Resolved(destination) => {
                events.send(Event::Resolve(ResolveEvent::Resolved {
                    source: source.to_path_buf(),
                    destination: destination.clone(),
                }));
                self.copy(source, destination, events)
            }
            ResolutionOutcome::Duplicate(existing) => {
                events.send(Event::Resolve(ResolveEvent::Duplicate {
                    source: source.to_path_buf(),
                    existing: existing.clone(),
                }));
                FileDisposition::Duplicate { existing }
            }
            ResolutionOutcome::TimestampUnavailable(reason) => {
                events.send(Event::Resolve(ResolveEvent::TimestampUnavailable {
                    source: source.to_path_buf(),
                    reason: reason.to_string(),
                }));
                FileDisposition::NoTimestamp
            }
            ResolutionOutcome::ProbeExhausted {
                directory,
                attempts,
            } => {
                events.send(Event::Resolve(ResolveEvent::ProbeExhausted {
                    source: source.to_path_buf(),
                    directory,
                    attempts,
                }));
                FileDisposition::Exhausted
            }
        }
    }

    fn copy(&self, source: &Path, destination: PathBuf, events: &EventSender) -> FileDisposition {
        if self.config.dry_run {
            let bytes = planned_size(source);
            events.send(Event::Copy(CopyEvent::Planned {
                source: source.to_path_buf(),
                destination: destination.clone(),
            }));
            return FileDisposition::Copied { destination, bytes };
        }

        match CopyExecutor::copy(source, &destination) {
            Ok(bytes) => {
                events.send(Event::Copy(CopyEvent::Copied {
                    source: source.to_path_buf(),
                    destination: destination.clone(),
                    bytes_written: bytes,
                }));
                FileDisposition::Copied { destination, bytes }
            }
            Err(e @ CopyError::SourceIsDestination { .. }) => {
                events.send(Event::Copy(CopyEvent::Refused {
                    source: source.to_path_buf(),
                    message: e.to_string(),
                }));
                FileDisposition::Refused
            }
            Err(e) => {
                events.send(Event::Copy(CopyEvent::Failed {
                    source: source.to_path_buf(),
                    destination,
                    message: e.to_string(),
                }));
                FileDisposition::Failed
            }
        }
    }
}

/// Size a dry-run copy would write, or 0 with a warning if it cannot be read
fn planned_size(source: &Path) -> u64 {
    match std::fs::metadata(source) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::warn!(path = %source.display(), error = %e, "cannot size planned copy");
            0
        }
    }
}
