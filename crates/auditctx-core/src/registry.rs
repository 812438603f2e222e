//! The process-wide execution-scoped registry.
//!
//! Free functions over a hidden global, in the style of the `log`/`tracing`
//! facades: application code installs an [`AuditContext`] at the start of a
//! logical operation, reads fields through the accessors while it runs, and
//! clears at the end. The registry stores, resolves, and tears down; it
//! never inspects the business meaning of the values.
//!
//! Resolution is asymmetric by contract. Identity fields (user, process,
//! module, auxiliary values) fail with [`ContextError`] when missing, since
//! silently defaulting them would corrupt audit data. Date and timestamp
//! degrade to the system clock instead: "now" is always a meaningful stamp.
//!
//! The active [`ContextStore`] can be substituted exactly once per unlock,
//! at startup, through [`unlock`] + [`use_store`]. The lock re-arms after
//! every successful substitution so a late or concurrent swap cannot race
//! in-flight reads under the previous store.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use serde_json::Value;

use auditctx_types::AuditContext;

use crate::error::ContextError;
use crate::store::{ContextStore, ThreadLocalStore};

/// The only cross-execution state: the active store and the substitution
/// lock. `store: None` means the built-in thread-local store.
struct RegistryState {
    store: Option<Arc<dyn ContextStore>>,
    locked: bool,
}

static REGISTRY: RwLock<RegistryState> = RwLock::new(RegistryState {
    store: None,
    locked: true,
});

/// Snapshot the active store without holding the registry lock across the
/// store call, so a store implementation may call back into the registry.
fn active_store() -> Option<Arc<dyn ContextStore>> {
    REGISTRY.read().store.clone()
}

fn with_store<R>(f: impl FnOnce(&dyn ContextStore) -> R) -> R {
    match active_store() {
        Some(store) => f(store.as_ref()),
        None => f(&ThreadLocalStore),
    }
}

// ============================================================================
// Install / clear
// ============================================================================

/// Associate a context with the current execution, replacing any prior
/// association. Contents are not validated; an empty context is legal.
pub fn install(ctx: AuditContext) {
    install_shared(Arc::new(ctx));
}

/// [`install`] for a context that the caller already shares.
pub fn install_shared(ctx: Arc<AuditContext>) {
    tracing::debug!(context = ?ctx, "installing audit context on current execution");
    with_store(|store| store.save(Some(ctx)));
}

/// Remove the association for the current execution. Idempotent.
pub fn clear() {
    tracing::trace!("clearing audit context on current execution");
    with_store(|store| store.save(None));
}

/// Whether a context is installed for the current execution.
pub fn exists() -> bool {
    with_store(|store| store.load()).is_some()
}

/// The context installed for the current execution.
pub fn current() -> Result<Arc<AuditContext>, ContextError> {
    lookup("audit context")
}

fn lookup(wanted: &str) -> Result<Arc<AuditContext>, ContextError> {
    with_store(|store| store.load()).ok_or_else(|| ContextError::NotFound {
        wanted: wanted.to_string(),
    })
}

// ============================================================================
// Identity accessors: fail when unresolved
// ============================================================================

/// The acting user for the current execution.
pub fn current_user() -> Result<String, ContextError> {
    let ctx = lookup("user")?;
    ctx.resolve_user().ok_or_else(|| ContextError::NoValue {
        wanted: "user".to_string(),
    })
}

/// The originating process for the current execution.
pub fn current_process() -> Result<String, ContextError> {
    let ctx = lookup("process")?;
    ctx.resolve_process().ok_or_else(|| ContextError::NoValue {
        wanted: "process".to_string(),
    })
}

/// The originating module for the current execution.
pub fn current_module() -> Result<String, ContextError> {
    let ctx = lookup("module")?;
    ctx.resolve_module().ok_or_else(|| ContextError::NoValue {
        wanted: "module".to_string(),
    })
}

/// An auxiliary value by key for the current execution.
pub fn current_value(key: &str) -> Result<Value, ContextError> {
    let wanted = format!("value '{key}'");
    let ctx = lookup(&wanted)?;
    ctx.value(key)
        .cloned()
        .ok_or(ContextError::NoValue { wanted })
}

// ============================================================================
// Time accessors: degrade to the clock
// ============================================================================

/// The access date for the current execution.
///
/// Falls back to today (UTC) when no context is installed or the field is
/// unresolved. Never fails.
pub fn current_date() -> NaiveDate {
    with_store(|store| store.load())
        .and_then(|ctx| ctx.resolve_date())
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// The access timestamp for the current execution.
///
/// Falls back to the current instant (UTC) when no context is installed or
/// the field is unresolved. Never fails.
pub fn current_timestamp() -> DateTime<Utc> {
    with_store(|store| store.load())
        .and_then(|ctx| ctx.resolve_timestamp())
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// Store substitution
// ============================================================================

/// Whether store substitution is currently locked.
pub fn is_locked() -> bool {
    REGISTRY.read().locked
}

/// Arm the substitution lock. No precondition.
pub fn lock() {
    let mut state = REGISTRY.write();
    if !state.locked {
        tracing::debug!("locking context store configuration");
    }
    state.locked = true;
}

/// Disarm the substitution lock, announcing intent to call [`use_store`].
/// No precondition.
pub fn unlock() {
    let mut state = REGISTRY.write();
    if state.locked {
        tracing::debug!("unlocking context store configuration");
    }
    state.locked = false;
}

/// Substitute the active store; `None` resets to the built-in
/// [`ThreadLocalStore`]. Fails with [`ContextError::Locked`] unless
/// [`unlock`] was called first, and re-locks on success either way.
///
/// Contexts saved under the previous store stay in that store's own
/// storage; substitution is meant to happen once, at startup, before any
/// context is installed.
pub fn use_store(store: Option<Arc<dyn ContextStore>>) -> Result<(), ContextError> {
    let mut state = REGISTRY.write();
    if state.locked {
        return Err(ContextError::Locked);
    }
    match &store {
        Some(_) => tracing::debug!("substituting custom context store"),
        None => tracing::debug!("resetting to built-in thread-local context store"),
    }
    state.store = store;
    state.locked = true;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
//
// Everything here runs against the built-in thread-local store, so tests
// stay isolated per test thread. Lock-protocol and substitution tests live
// in tests/lock_protocol.rs because their state is process-global.
