use serde::Serialize;
use std::sync::Arc;

use crate::attributes::ProfileAttributes;
use crate::error::ProfileError;

/// Handle for one upload, ordered by when the upload started
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Error state shown in place of a profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub code: String,
    pub message: String,
}

/// What happened to a finished upload
#[derive(Debug)]
pub enum UploadOutcome {
    /// The snapshot was installed
    Installed(Arc<ProfileAttributes>),
    /// The upload failed and its error is now shown
    Failed(UploadFailure),
    /// A newer upload started meanwhile; the result was dropped
    Stale,
}

/// Owner of the current profile snapshot and the loading flag
///
/// Every upload takes a ticket from [`Session::begin_upload`]. Only the
/// latest ticket may install its result, so an older upload finishing late
/// never replaces a newer one.
#[derive(Debug, Default)]
pub struct Session {
    snapshot: Option<Arc<ProfileAttributes>>,
    failure: Option<UploadFailure>,
    loading: bool,
    latest: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest += 1;
        self.loading = true;
        log::debug!("upload {} started", self.latest);
        UploadTicket(self.latest)
    }

    pub fn complete(
        &mut self,
        ticket: UploadTicket,
        result: Result<ProfileAttributes, ProfileError>,
    ) -> UploadOutcome {
        if ticket.0 != self.latest {
            log::info!(
                "discarding upload {} superseded by upload {}",
                ticket.0,
                self.latest
            );
            return UploadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(attributes) => {
                let snapshot = Arc::new(attributes);
                self.snapshot = Some(snapshot.clone());
                self.failure = None;
                log::info!(
                    "upload {} installed with {} attributes",
                    ticket.0,
                    snapshot.len()
                );
                UploadOutcome::Installed(snapshot)
            }
            Err(e) => {
                let failure = UploadFailure {
                    code: e.code().to_string(),
                    message: e.to_string(),
                };
                log::warn!("upload {} failed: {}", ticket.0, failure.message);
                self.snapshot = None;
                self.failure = Some(failure.clone());
                UploadOutcome::Failed(failure)
            }
        }
    }

    /// Gives up on an upload that will never complete.
    ///
    /// Clears the loading flag if `ticket` is still the latest upload and
    /// leaves the snapshot untouched. Returns whether anything changed.
    pub fn abandon(&mut self, ticket: UploadTicket) -> bool {
        if ticket.0 != self.latest || !self.loading {
            return false;
        }
        self.loading = false;
        log::info!("upload {} abandoned before completing", ticket.0);
        true
    }

    /// Discards the current snapshot, as the Back action does.
    pub fn back(&mut self) {
        self.snapshot = None;
        self.failure = None;
        self.loading = false;
    }

    pub fn snapshot(&self) -> Option<Arc<ProfileAttributes>> {
        self.snapshot.clone()
    }

    pub fn failure(&self) -> Option<&UploadFailure> {
        self.failure.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
