//! Pluggable storage for "the current execution's context".
//!
//! The registry never hard-wires a thread-local primitive into its public
//! contract. It goes through a [`ContextStore`], so that environments where
//! plain thread identity is the wrong execution model (pooled workers,
//! managed containers) can substitute their own association mechanism at
//! startup. The built-in [`ThreadLocalStore`] keys by calling thread.

use std::cell::RefCell;
use std::sync::Arc;

use auditctx_types::AuditContext;

/// Stores and retrieves the audit context for the current execution.
///
/// Contract: `save` followed by `load` on the same execution observes the
/// saved value, and a context saved on one execution is not visible from
/// another, unless an implementation intentionally shares more broadly
/// (e.g. between a pool's submitter and its workers). The registry does
/// not enforce isolation; it trusts the store.
pub trait ContextStore: Send + Sync {
    /// The context associated with the current execution, if any.
    fn load(&self) -> Option<Arc<AuditContext>>;

    /// Associate a context with the current execution; `None` clears.
    fn save(&self, ctx: Option<Arc<AuditContext>>);
}

thread_local! {
    static CURRENT: RefCell<Option<Arc<AuditContext>>> = const { RefCell::new(None) };
}

/// Built-in store keyed by calling-thread identity.
///
/// This is the registry's default: each thread sees only its own context.
#[derive(Debug, Default)]
pub struct ThreadLocalStore;

impl ContextStore for ThreadLocalStore {
    fn load(&self) -> Option<Arc<AuditContext>> {
        CURRENT.with(|cell| cell.borrow().clone())
    }

    fn save(&self, ctx: Option<Arc<AuditContext>>) {
        CURRENT.with(|cell| *cell.borrow_mut() = ctx);
    }
}

// ============================================================================
// Tests
// ============================================================================
