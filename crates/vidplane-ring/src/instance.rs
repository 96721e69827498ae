//! Single-instance registry
//!
//! Exactly one overlay display may drive the hardware per process. The
//! registry hands out at most one [`InstanceToken`] at a time through a
//! non-blocking acquire; the slot frees itself when the token drops.

use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{Result, RingError};

static SINGLE_INSTANCE: Mutex<()> = Mutex::new(());

/// Proof that this display owns the process-wide overlay slot
///
/// Held by the open display for its whole lifetime. Dropping the token
/// (normally as the last step of display teardown) frees the slot for the
/// next instantiation.
pub struct InstanceToken {
    _slot: MutexGuard<'static, ()>,
}

impl std::fmt::Debug for InstanceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceToken").finish_non_exhaustive()
    }
}

impl Drop for InstanceToken {
    fn drop(&mut self) {
        debug!("overlay instance slot freed");
    }
}

/// Claim the process-wide overlay slot without blocking
///
/// Fails immediately with [`RingError::AlreadyRunning`] while another token
/// is alive; it neither queues nor retries, and the running instance is
/// unaffected.
pub fn try_acquire() -> Result<InstanceToken> {
    match SINGLE_INSTANCE.try_lock() {
        Some(slot) => {
            debug!("overlay instance slot claimed");
            Ok(InstanceToken { _slot: slot })
        }
        None => Err(RingError::AlreadyRunning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(overlay_instance)]
    fn test_second_acquire_fails() {
        let token = try_acquire().expect("first acquire");
        assert!(matches!(try_acquire(), Err(RingError::AlreadyRunning)));
        drop(token);
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_slot_frees_on_drop() {
        drop(try_acquire().expect("first acquire"));
        let token = try_acquire().expect("slot should be free again");
        drop(token);
    }
}
