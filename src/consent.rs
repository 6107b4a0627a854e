//! Cookie-consent state machine.
//!
//! The user's choice is persisted in localStorage under `cookieConsent` as a
//! versioned JSON record. A record with an unknown version or one that fails
//! to parse counts as no consent at all, which re-shows the banner. The
//! machine itself is generic over its storage and analytics sink so it can
//! be driven in tests without a browser.

use std::cell::Cell;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

pub const CONSENT_KEY: &str = "cookieConsent";
pub const CONSENT_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub version: String,
    pub timestamp: String,
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentRecord {
    /// A fresh record for the given analytics choice. `necessary` is always
    /// true and `marketing` is reserved and always false.
    pub fn new(analytics: bool) -> Self {
        Self {
            version: CONSENT_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            necessary: true,
            analytics,
            marketing: false,
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == CONSENT_VERSION
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentStatus {
    NoConsent,
    AnalyticsGranted,
    AnalyticsDenied,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("reading consent record failed: {0}")]
    Read(String),
    #[error("writing consent record failed: {0}")]
    Write(String),
    #[error("serializing consent record failed: {0}")]
    Serialize(String),
}

pub trait ConsentStorage {
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, raw: &str) -> Result<(), StorageError>;
}

/// Opaque consent-aware reporting sink. Pushing the same grant value twice
/// must be harmless; the manager additionally deduplicates repeat pushes.
pub trait AnalyticsSink {
    fn update_consent(&self, granted: bool);
}

pub struct ConsentManager<S: ConsentStorage, A: AnalyticsSink> {
    storage: S,
    sink: A,
    applied: Cell<Option<bool>>,
}

impl<S: ConsentStorage, A: AnalyticsSink> ConsentManager<S, A> {
    pub fn new(storage: S, sink: A) -> Self {
        Self {
            storage,
            sink,
            applied: Cell::new(None),
        }
    }

    /// The persisted record, if it exists and carries the current schema
    /// version. Anything else degrades to `None` with a diagnostic.
    pub fn stored(&self) -> Option<ConsentRecord> {
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("consent record unreadable, treating as absent: {err}");
                return None;
            }
        };
        match serde_json::from_str::<ConsentRecord>(&raw) {
            Ok(record) if record.is_current() => Some(record),
            Ok(record) => {
                log::info!(
                    "discarding consent record with stale version {}",
                    record.version
                );
                None
            }
            Err(err) => {
                log::warn!("malformed consent record, treating as absent: {err}");
                None
            }
        }
    }

    pub fn status(&self) -> ConsentStatus {
        match self.stored() {
            None => ConsentStatus::NoConsent,
            Some(record) if record.analytics => ConsentStatus::AnalyticsGranted,
            Some(_) => ConsentStatus::AnalyticsDenied,
        }
    }

    /// Whether the banner has to be shown on page load.
    pub fn needs_banner(&self) -> bool {
        self.status() == ConsentStatus::NoConsent
    }

    /// Re-applies a previously persisted choice, e.g. on page load.
    pub fn apply_stored(&self) {
        if let Some(record) = self.stored() {
            self.apply(record.analytics);
        }
    }

    pub fn accept_all(&self) -> Result<ConsentRecord, StorageError> {
        self.commit(true)
    }

    pub fn accept_selected(&self, analytics: bool) -> Result<ConsentRecord, StorageError> {
        self.commit(analytics)
    }

    pub fn reject_all(&self) -> Result<ConsentRecord, StorageError> {
        self.commit(false)
    }

    // Persist first, then apply; the write is atomic from the page's point
    // of view and always overwrites any prior record whole.
    fn commit(&self, analytics: bool) -> Result<ConsentRecord, StorageError> {
        let record = ConsentRecord::new(analytics);
        let raw =
            serde_json::to_string(&record).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.write(&raw)?;
        self.apply(record.analytics);
        Ok(record)
    }

    fn apply(&self, granted: bool) {
        if self.applied.get() == Some(granted) {
            return;
        }
        self.sink.update_consent(granted);
        self.applied.set(Some(granted));
    }
}

/// localStorage-backed record storage, scoped to the page origin.
pub struct LocalStorageConsent;

impl LocalStorageConsent {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl ConsentStorage for LocalStorageConsent {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(CONSENT_KEY)
            .map_err(|e| StorageError::Read(format!("{e:?}")))
    }

    fn write(&self, raw: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(CONSENT_KEY, raw)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// Google Analytics consent-mode sink. The gtag bootstrap lives in the page
/// head; when it is missing (e.g. blocked) the update is skipped silently,
/// which is the correct outcome for a blocked tracker.
pub struct GtagSink {
    tracking_id: &'static str,
}

impl GtagSink {
    pub fn new(tracking_id: &'static str) -> Self {
        Self { tracking_id }
    }

    fn gtag(&self) -> Option<js_sys::Function> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }
}

impl AnalyticsSink for GtagSink {
    fn update_consent(&self, granted: bool) {
        let state = if granted { "granted" } else { "denied" };

        if let Some(gtag) = self.gtag() {
            let params = js_sys::Object::new();
            let _ = js_sys::Reflect::set(
                &params,
                &JsValue::from_str("analytics_storage"),
                &JsValue::from_str(state),
            );
            let _ = gtag.call3(
                &JsValue::NULL,
                &JsValue::from_str("consent"),
                &JsValue::from_str("update"),
                &params,
            );
            if granted {
                let _ = gtag.call2(
                    &JsValue::NULL,
                    &JsValue::from_str("config"),
                    &JsValue::from_str(self.tracking_id),
                );
            }
            log::info!("analytics consent {state}");
        }

        // CSS hook, mirrors the stored choice onto the document.
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let _ = body.set_attribute("data-cookie-consent", state);
        }
    }
}
