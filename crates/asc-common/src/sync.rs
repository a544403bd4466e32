use std::sync::Mutex;
use std::sync::MutexGuard;

/// Locks a mutex, taking the inner value back if a previous holder panicked.
pub fn mutex_lock_or_recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        eprintln!("Warning: recovering from poisoned mutex");
        poisoned.into_inner()
    })
}
