//! The audit context container.
//!
//! An [`AuditContext`] records the metadata of one logical operation: the
//! acting user, the originating process and module, and the access date and
//! timestamp. This is a plain mutable record with no concurrency concerns of
//! its own; it is created by application code, filled in, and handed to the
//! registry for the duration of the operation.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Lazily provides the access date when no direct value is set.
pub type DateProvider = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Lazily provides the access timestamp when no direct value is set.
pub type TimestampProvider = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Lazily provides a string field (user, process, module) when no direct
/// value is set.
pub type StringProvider = Box<dyn Fn() -> String + Send + Sync>;

/// Per-operation audit metadata record.
///
/// Each of the five built-in fields has an optional direct value and an
/// optional provider. At resolution time the direct value wins; otherwise
/// the provider is invoked, fresh on every call. Results are never cached
/// back onto the container. Both being unset is a valid state, as is a
/// fully empty container.
///
/// Auxiliary values are ad hoc named entries with no provider slot.
#[derive(Default)]
pub struct AuditContext {
    date: Option<NaiveDate>,
    date_provider: Option<DateProvider>,
    timestamp: Option<DateTime<Utc>>,
    timestamp_provider: Option<TimestampProvider>,
    user: Option<String>,
    user_provider: Option<StringProvider>,
    process: Option<String>,
    process_provider: Option<StringProvider>,
    module: Option<String>,
    module_provider: Option<StringProvider>,
    values: HashMap<String, Value>,
}

impl AuditContext {
    /// Create an empty context. All fields unset, no auxiliary values.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Date
    // ========================================================================

    /// The directly set access date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Set the access date directly.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Set a provider invoked when no direct date is set.
    pub fn set_date_provider(&mut self, provider: impl Fn() -> NaiveDate + Send + Sync + 'static) {
        self.date_provider = Some(Box::new(provider));
    }

    /// Resolve the access date: direct value, else provider result.
    pub fn resolve_date(&self) -> Option<NaiveDate> {
        self.date.or_else(|| self.date_provider.as_ref().map(|p| p()))
    }

    // ========================================================================
    // Timestamp
    // ========================================================================

    /// The directly set access timestamp, if any.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Set the access timestamp directly.
    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = Some(timestamp);
    }

    /// Set a provider invoked when no direct timestamp is set.
    pub fn set_timestamp_provider(
        &mut self,
        provider: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) {
        self.timestamp_provider = Some(Box::new(provider));
    }

    /// Resolve the access timestamp: direct value, else provider result.
    pub fn resolve_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .or_else(|| self.timestamp_provider.as_ref().map(|p| p()))
    }

    // ========================================================================
    // User
    // ========================================================================

    /// The directly set acting user, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Set the acting user directly.
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = Some(user.into());
    }

    /// Set a provider invoked when no direct user is set.
    pub fn set_user_provider(&mut self, provider: impl Fn() -> String + Send + Sync + 'static) {
        self.user_provider = Some(Box::new(provider));
    }

    /// Resolve the acting user: direct value, else provider result.
    pub fn resolve_user(&self) -> Option<String> {
        self.user
            .clone()
            .or_else(|| self.user_provider.as_ref().map(|p| p()))
    }

    // ========================================================================
    // Process
    // ========================================================================

    /// The directly set originating process, if any.
    pub fn process(&self) -> Option<&str> {
        self.process.as_deref()
    }

    /// Set the originating process directly.
    pub fn set_process(&mut self, process: impl Into<String>) {
        self.process = Some(process.into());
    }

    /// Set a provider invoked when no direct process is set.
    pub fn set_process_provider(&mut self, provider: impl Fn() -> String + Send + Sync + 'static) {
        self.process_provider = Some(Box::new(provider));
    }

    /// Resolve the originating process: direct value, else provider result.
    pub fn resolve_process(&self) -> Option<String> {
        self.process
            .clone()
            .or_else(|| self.process_provider.as_ref().map(|p| p()))
    }

    // ========================================================================
    // Module
    // ========================================================================

    /// The directly set originating module, if any.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Set the originating module directly.
    pub fn set_module(&mut self, module: impl Into<String>) {
        self.module = Some(module.into());
    }

    /// Set a provider invoked when no direct module is set.
    pub fn set_module_provider(&mut self, provider: impl Fn() -> String + Send + Sync + 'static) {
        self.module_provider = Some(Box::new(provider));
    }

    /// Resolve the originating module: direct value, else provider result.
    pub fn resolve_module(&self) -> Option<String> {
        self.module
            .clone()
            .or_else(|| self.module_provider.as_ref().map(|p| p()))
    }

    // ========================================================================
    // Auxiliary values
    // ========================================================================

    /// Register a named auxiliary value, replacing any previous entry for
    /// the key. Auxiliary values have no provider slot.
    pub fn register_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up an auxiliary value by key.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// All auxiliary values.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Whether nothing at all has been set on this context.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.date_provider.is_none()
            && self.timestamp.is_none()
            && self.timestamp_provider.is_none()
            && self.user.is_none()
            && self.user_provider.is_none()
            && self.process.is_none()
            && self.process_provider.is_none()
            && self.module.is_none()
            && self.module_provider.is_none()
            && self.values.is_empty()
    }
}

// Hand-written: provider closures are not Debug. Providers render as a
// set/unset flag.
impl fmt::Debug for AuditContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditContext")
            .field("date", &self.date)
            .field("date_provider", &self.date_provider.is_some())
            .field("timestamp", &self.timestamp)
            .field("timestamp_provider", &self.timestamp_provider.is_some())
            .field("user", &self.user)
            .field("user_provider", &self.user_provider.is_some())
            .field("process", &self.process)
            .field("process_provider", &self.process_provider.is_some())
            .field("module", &self.module)
            .field("module_provider", &self.module_provider.is_some())
            .field("values", &self.values)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
