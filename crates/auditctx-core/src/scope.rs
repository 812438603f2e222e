//! Scoped installation with guaranteed teardown.
//!
//! Leaking a stale context into a reused pooled thread is the classic
//! failure mode of execution-scoped state. [`ContextScope`] ties the
//! clear to ownership: the context is installed on entry and the
//! association is removed when the scope drops, panic or not.

use std::marker::PhantomData;

use auditctx_types::AuditContext;

use crate::registry;

/// Installs a context for the current execution and clears it on drop.
///
/// Dropping clears the association unconditionally; scopes do not stack.
/// Entering a new scope while one is live replaces the prior association,
/// exactly like a repeated [`registry::install`].
#[must_use = "dropping the scope immediately clears the audit context"]
pub struct ContextScope {
    // Clearing must happen on the installing thread.
    _not_send: PhantomData<*mut ()>,
}

impl ContextScope {
    /// Install `ctx` for the current execution until the scope drops.
    pub fn enter(ctx: AuditContext) -> Self {
        registry::install(ctx);
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        registry::clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
