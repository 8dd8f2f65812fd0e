use serde::Serialize;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::maintenance::MaintenanceAction;
use super::removal::force_remove;
use crate::catalog::{Catalog, Category, Environment};
use crate::common::config::Config;
use crate::common::format::format_size;
use crate::scanner::size::entry_size;

/// Outcome of one category (or one maintenance action) in a clean pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutcome {
    pub category: String,
    pub freed: u64,
    pub freed_human: String,
    pub items: u64,
    pub errors: u64,
}

impl CategoryOutcome {
    fn new(category: &str, tally: Tally) -> Self {
        Self {
            category: category.to_string(),
            freed: tally.freed,
            freed_human: format_size(tally.freed),
            items: tally.items,
            errors: tally.errors,
        }
    }
}

/// Terminal record of a clean pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoneSummary {
    /// Always true; lets clients tell this record from a category event
    pub done: bool,
    pub total_freed: u64,
    pub total_freed_human: String,
    pub errors: u64,
    /// Set when the consumer went away before every category was processed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

/// One record of the clean event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CleanEvent {
    Category(CategoryOutcome),
    Done(DoneSummary),
}

impl CleanEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, CleanEvent::Done(_))
    }
}

/// Result of deleting one top-level entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalAttempt {
    pub removed: bool,
    /// Size measured before deletion
    pub size: u64,
}

impl RemovalAttempt {
    pub fn run(path: &Path) -> Self {
        let size = entry_size(path);
        Self {
            removed: force_remove(path),
            size,
        }
    }
}

/// Running counters for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub freed: u64,
    pub items: u64,
    pub errors: u64,
}

impl Tally {
    fn record(&mut self, attempt: RemovalAttempt) {
        if attempt.removed {
            self.freed += attempt.size;
            self.items += 1;
        } else {
            self.errors += 1;
        }
    }

    fn absorb(&mut self, other: Tally) {
        self.freed += other.freed;
        self.items += other.items;
        self.errors += other.errors;
    }
}

/// Shared flag a transport trips when its consumer disconnects
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Empty one candidate location, keeping the location itself.
///
/// Every top-level entry is sized, then force-removed. A candidate that is a
/// plain file is removed as a single item. A location that cannot be listed
/// counts one error; one that has vanished counts nothing.
pub fn empty_location(path: &Path) -> Tally {
    let mut tally = Tally::default();

    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return tally,
        Err(e) => {
            tracing::debug!("cannot stat {}: {}", path.display(), e);
            tally.errors += 1;
            return tally;
        }
    };

    if !meta.is_dir() {
        tally.record(RemovalAttempt::run(path));
        return tally;
    }

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("cannot list {}: {}", path.display(), e);
            tally.errors += 1;
            return tally;
        }
    };

    for entry in entries {
        match entry {
            Ok(entry) => tally.record(RemovalAttempt::run(&entry.path())),
            Err(e) => {
                tracing::debug!("bad entry in {}: {}", path.display(), e);
                tally.errors += 1;
            }
        }
    }

    tally
}

/// Clean every existing candidate path of `category`.
pub fn clean_category(category: &Category) -> CategoryOutcome {
    let mut tally = Tally::default();
    for path in category.existing_paths() {
        tally.absorb(empty_location(path));
    }
    tracing::debug!(
        "cleaned {}: {} freed, {} items, {} errors",
        category.name,
        tally.freed,
        tally.items,
        tally.errors
    );
    CategoryOutcome::new(&category.name, tally)
}

/// Configures and starts a clean pass
pub struct Cleaner {
    catalog: Catalog,
    maintenance: Vec<Box<dyn MaintenanceAction>>,
    pacing: Duration,
    cancel: CancelToken,
}

impl Cleaner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            maintenance: Vec::new(),
            pacing: Duration::ZERO,
            cancel: CancelToken::new(),
        }
    }

    pub fn maintenance(mut self, actions: Vec<Box<dyn MaintenanceAction>>) -> Self {
        self.maintenance = actions;
        self
    }

    /// Pause between category events
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn stream(self) -> CleanStream {
        CleanStream {
            categories: self.catalog.into_iter(),
            maintenance: self.maintenance.into_iter(),
            pacing: self.pacing,
            cancel: self.cancel,
            totals: Tally::default(),
            phase: Phase::Categories,
            emitted_any: false,
            cancelled: false,
        }
    }
}

/// Build the catalog for `env` and start a clean pass over it.
pub fn clean(env: &Environment, config: &Config, cancel: CancelToken) -> CleanStream {
    let profile = env.platform().profile();
    let catalog = profile.catalog(env).excluding(config);

    let mut cleaner = Cleaner::new(catalog)
        .pacing(config.pacing())
        .cancel_token(cancel);
    if config.maintenance {
        cleaner = cleaner.maintenance(profile.maintenance());
    }
    cleaner.stream()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Categories,
    Maintenance,
    Done,
    Finished,
}

/// Lazy, ordered clean pass.
///
/// Each `next()` call processes exactly one category (or maintenance action)
/// before returning its event, so nothing is deleted ahead of the consumer.
/// The last item is always a single [`CleanEvent::Done`].
pub struct CleanStream {
    categories: std::vec::IntoIter<Category>,
    maintenance: std::vec::IntoIter<Box<dyn MaintenanceAction>>,
    pacing: Duration,
    cancel: CancelToken,
    totals: Tally,
    phase: Phase,
    emitted_any: bool,
    cancelled: bool,
}

impl CleanStream {
    /// Stop before the next category; the Done event still follows.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            tracing::debug!("clean pass cancelled by consumer");
            self.cancelled = true;
            self.phase = Phase::Done;
            return true;
        }
        false
    }

    fn emit(&mut self, outcome: CategoryOutcome) -> CleanEvent {
        self.totals.freed += outcome.freed;
        self.totals.errors += outcome.errors;
        self.emitted_any = true;
        CleanEvent::Category(outcome)
    }
}

impl Iterator for CleanStream {
    type Item = CleanEvent;

    fn next(&mut self) -> Option<CleanEvent> {
        loop {
            match self.phase {
                Phase::Categories => {
                    if self.emitted_any && !self.pacing.is_zero() {
                        std::thread::sleep(self.pacing);
                    }
                    if self.check_cancelled() {
                        continue;
                    }
                    match self.categories.next() {
                        Some(category) => {
                            let outcome = clean_category(&category);
                            return Some(self.emit(outcome));
                        }
                        None => self.phase = Phase::Maintenance,
                    }
                }
                Phase::Maintenance => {
                    if self.check_cancelled() {
                        continue;
                    }
                    match self.maintenance.next() {
                        Some(action) => match action.run() {
                            Ok(()) => {
                                let tally = Tally {
                                    items: 1,
                                    ..Tally::default()
                                };
                                let outcome = CategoryOutcome::new(action.label(), tally);
                                return Some(self.emit(outcome));
                            }
                            Err(e) => tracing::debug!("maintenance skipped: {}", e),
                        },
                        None => self.phase = Phase::Done,
                    }
                }
                Phase::Done => {
                    self.phase = Phase::Finished;
                    return Some(CleanEvent::Done(DoneSummary {
                        done: true,
                        total_freed: self.totals.freed,
                        total_freed_human: format_size(self.totals.freed),
                        errors: self.totals.errors,
                        cancelled: self.cancelled,
                    }));
                }
                Phase::Finished => return None,
            }
        }
    }
}

impl FusedIterator for CleanStream {}
