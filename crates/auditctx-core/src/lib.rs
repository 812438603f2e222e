//! Execution-scoped audit context propagation.
//!
//! Lets application code (typically a persistence layer, right before it
//! writes a record) ask "who is acting, from where, and when" without
//! threading those values through every call. An [`AuditContext`] is
//! installed for the current logical execution (normally the calling
//! thread) at the start of an operation, read through the registry
//! accessors while it runs, and cleared at the end:
//!
//! ```
//! use auditctx_core::{AuditContext, ContextScope};
//!
//! let mut ctx = AuditContext::new();
//! ctx.set_user("amy");
//! ctx.set_process("checkout");
//! let _scope = ContextScope::enter(ctx);
//!
//! assert_eq!(auditctx_core::current_user().unwrap(), "amy");
//! // Time fields always resolve, falling back to the clock.
//! let _stamp = auditctx_core::current_timestamp();
//! ```
//!
//! # Resolution contract
//!
//! Identity fields (user, process, module, auxiliary values) resolve from
//! the direct value, else a provider invoked fresh per call, else they
//! fail; there is no safe default for "who". Date and timestamp instead
//! degrade to the system clock, because "now" is always a meaningful stamp.
//! See
//! [`registry`] for the full policy and [`error::ContextError`] for the
//! taxonomy.
//!
//! # Custom execution models
//!
//! How "current execution" is stored is pluggable through
//! [`store::ContextStore`]. The built-in store keys by calling thread;
//! environments where that is wrong (pooled workers, managed containers)
//! substitute their own store once at startup via the lock-guarded
//! [`registry::unlock`] + [`registry::use_store`] protocol.

pub mod error;
pub mod registry;
pub mod scope;
pub mod store;

// Re-export the value model and the registry surface at crate root.
pub use auditctx_types::{AuditContext, DateProvider, StringProvider, TimestampProvider};
pub use error::ContextError;
pub use registry::{
    clear, current, current_date, current_module, current_process, current_timestamp,
    current_user, current_value, exists, install, install_shared, is_locked, lock, unlock,
    use_store,
};
pub use scope::ContextScope;
pub use store::{ContextStore, ThreadLocalStore};
