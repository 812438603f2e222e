//! Value model for execution-scoped audit metadata.
//!
//! This crate is the leaf of the auditctx workspace: it defines
//! [`AuditContext`], the per-operation record of "who/when/where" metadata
//! that a persistence layer stamps onto written rows. It has **no internal
//! dependencies**; the registry crate builds on it.
//!
//! An `AuditContext` carries five built-in audit fields (user, process,
//! module, date, timestamp), each with an optional direct value and an
//! optional provider closure, plus an open-ended map of named auxiliary
//! values. Resolution precedence is a property of the container itself:
//! a direct value always wins over a provider, and providers are invoked
//! fresh on every resolution, never cached.

pub mod context;

// Re-export primary types at crate root for convenience.
pub use context::{AuditContext, DateProvider, StringProvider, TimestampProvider};
