//! "Save contact" action.
//!
//! `ContactSaver` is what the card's button is wired to: it runs one vCard
//! generation at a time and rejects presses while a save (and its photo
//! fetch) is still running. Rejected presses are not queued.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::image::{ImageReference, ImageResolver};
use crate::profile::ProfileRecord;
use crate::types::{Error, Language, Result};
use crate::vcard::{generate_vcard, DownloadSink, SaveReport, VCardOptions};

pub struct ContactSaver {
    profile: Arc<ProfileRecord>,
    resolver: Arc<dyn ImageResolver>,
    sink: Arc<dyn DownloadSink>,
    include_phone: bool,
    in_flight: AtomicBool,
}

impl fmt::Debug for ContactSaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactSaver")
            .field("profile", &self.profile.full_name())
            .field("include_phone", &self.include_phone)
            .field("in_flight", &self.is_saving())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when the save ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ContactSaver {
    pub fn new(
        profile: Arc<ProfileRecord>,
        resolver: Arc<dyn ImageResolver>,
        sink: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            profile,
            resolver,
            sink,
            include_phone: false,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_phone(mut self, include_phone: bool) -> Self {
        self.include_phone = include_phone;
        self
    }

    pub fn profile(&self) -> &ProfileRecord {
        &self.profile
    }

    /// True while a save is running; the button should be disabled.
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generate and deliver the card in `language`.
    ///
    /// Returns [`Error::Busy`] immediately if another save is in flight.
    pub async fn save_contact(
        &self,
        language: Language,
        image: Option<&ImageReference>,
    ) -> Result<SaveReport> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("save_contact ignored: previous save still running");
            return Err(Error::busy("a contact save is already in progress"));
        }
        let _guard = InFlightGuard(&self.in_flight);

        let options = VCardOptions::new(language).with_phone(self.include_phone);
        let result = generate_vcard(
            &self.profile,
            image,
            &options,
            self.resolver.as_ref(),
            self.sink.as_ref(),
        )
        .await;

        if let Err(e) = &result {
            tracing::error!("save_contact_failed: {}", e);
        }
        result
    }
}
