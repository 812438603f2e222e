//! Store-substitution protocol tests.
//!
//! The substitution lock and the active store are process-global, so this
//! binary owns them: tests here are serialized and every test restores the
//! built-in store and the locked state before returning.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serial_test::serial;

use auditctx_core::{
    AuditContext, ContextError, ContextStore, clear, current, current_user, install, is_locked,
    lock, unlock, use_store,
};

/// Store double: records load/save traffic and keeps a single shared slot,
/// deliberately not execution-isolated.
#[derive(Default)]
struct RecordingStore {
    slot: Mutex<Option<Arc<AuditContext>>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl ContextStore for RecordingStore {
    fn load(&self) -> Option<Arc<AuditContext>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.slot.lock().clone()
    }

    fn save(&self, ctx: Option<Arc<AuditContext>>) {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock() = ctx;
    }
}

/// Reset to the built-in thread-local store and leave the registry locked.
fn restore_default_store() {
    unlock();
    use_store(None).expect("resetting the store after unlock");
    assert!(is_locked());
}

#[test]
#[serial]
fn test_initially_locked_and_substitution_rearms() {
    assert!(is_locked());
    unlock();
    assert!(!is_locked());
    use_store(Some(Arc::new(RecordingStore::default()))).unwrap();
    assert!(is_locked());

    restore_default_store();
}

#[test]
#[serial]
fn test_use_store_while_locked_fails_without_transition() {
    assert!(is_locked());
    let err = use_store(Some(Arc::new(RecordingStore::default()))).unwrap_err();
    assert!(matches!(err, ContextError::Locked));
    assert!(is_locked());
}

#[test]
#[serial]
fn test_lock_rearms_without_substitution() {
    unlock();
    assert!(!is_locked());
    lock();
    assert!(is_locked());

    // Lock again from the locked state: no precondition, no change.
    lock();
    assert!(is_locked());
}

#[test]
#[serial]
fn test_substituted_store_mediates_all_traffic() {
    let store = Arc::new(RecordingStore::default());
    unlock();
    use_store(Some(Arc::clone(&store) as Arc<dyn ContextStore>)).unwrap();

    let mut ctx = AuditContext::new();
    ctx.set_user("foo");
    install(ctx);
    assert!(store.saves.load(Ordering::SeqCst) >= 1);

    let fetched = current().unwrap();
    assert_eq!(fetched.user(), Some("foo"));
    assert!(store.loads.load(Ordering::SeqCst) >= 1);
    assert_eq!(current_user().unwrap(), "foo");

    clear();
    assert!(store.slot.lock().is_none());

    restore_default_store();
}

#[test]
#[serial]
fn test_shared_store_spans_threads_by_its_own_policy() {
    let store = Arc::new(RecordingStore::default());
    unlock();
    use_store(Some(store)).unwrap();

    let mut ctx = AuditContext::new();
    ctx.set_user("pool-submitter");
    install(ctx);

    // Isolation is the store's policy, not the registry's: this store
    // shares one slot, so a worker thread observes the submitter's context.
    let seen = std::thread::spawn(|| current_user().unwrap())
        .join()
        .unwrap();
    assert_eq!(seen, "pool-submitter");

    clear();
    restore_default_store();
}
