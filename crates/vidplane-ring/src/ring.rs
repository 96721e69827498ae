//! Overlay buffer ring
//!
//! Owns the fixed set of buffer slots the driver allocated for the overlay
//! and runs the queue/dequeue state machine over them. The write index
//! advances circularly; a saturated ring refuses further queueing until a
//! buffer is reclaimed, which callers treat as backpressure rather than an
//! error.
//!
//! Single-writer contract: all methods are invoked strictly sequentially by
//! the presentation path. The type does not enforce this; callers must not
//! share a ring across threads.

use std::ptr::NonNull;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::driver::{DequeueOutcome, OverlayDriver, OverlayId, QueueOutcome};
use crate::error::{Result, RingError};

/// One fixed-address buffer in the overlay's set
#[derive(Debug)]
pub(crate) struct BufferSlot {
    /// Mapped address, owned by the driver and borrowed here
    pub(crate) address: NonNull<u8>,

    /// Whether the slot is currently submitted for presentation
    pub(crate) queued: bool,
}

/// Outcome of one queue attempt on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAdvance {
    /// The slot at this index was submitted; the write target advanced
    Queued(usize),

    /// Every slot is already queued; nothing was submitted
    ///
    /// A backpressure signal, not an error. The frame that would have gone
    /// out is dropped from the presentation ring.
    Saturated,
}

/// Fixed-size ring of overlay buffers
///
/// Constructed from a freshly created overlay; owns the overlay handle from
/// that point on and destroys it on drop (or on construction failure).
pub struct BufferRing {
    driver: Arc<dyn OverlayDriver>,
    overlay: OverlayId,
    slots: Vec<BufferSlot>,
    write_index: usize,
    queued_count: usize,
}

impl std::fmt::Debug for BufferRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferRing")
            .field("overlay", &self.overlay)
            .field("slots", &self.slots)
            .field("write_index", &self.write_index)
            .field("queued_count", &self.queued_count)
            .finish_non_exhaustive()
    }
}

impl BufferRing {
    /// Bind the ring to a created overlay
    ///
    /// Queries the buffer count and snapshots every mapped address. Fails
    /// with [`RingError::Config`] when the driver reports no buffers or a
    /// buffer without a mapping; the overlay handle is destroyed before
    /// returning the error.
    pub fn new(driver: Arc<dyn OverlayDriver>, overlay: OverlayId) -> Result<Self> {
        let reported = driver.buffer_count(overlay);
        let count = match usize::try_from(reported) {
            Ok(n) if n > 0 => n,
            _ => {
                driver.destroy(overlay);
                return Err(RingError::config(format!(
                    "overlay reports {reported} buffers"
                )));
            }
        };

        let mut slots = Vec::with_capacity(count);
        for index in 0..count {
            let Some(address) = NonNull::new(driver.buffer_address(overlay, index)) else {
                driver.destroy(overlay);
                return Err(RingError::config(format!(
                    "overlay buffer {index} has no mapping"
                )));
            };
            slots.push(BufferSlot {
                address,
                queued: false,
            });
        }

        debug!(buffers = count, "overlay buffer ring ready");
        Ok(Self {
            driver,
            overlay,
            slots,
            write_index: 0,
            queued_count: 0,
        })
    }

    /// Number of slots in the ring
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a ring never has zero slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many slots are currently queued for presentation
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queued_count
    }

    /// Index of the slot the decoder writes next
    #[must_use]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Mapped address of the current write target
    #[must_use]
    pub fn write_address(&self) -> NonNull<u8> {
        self.slots[self.write_index].address
    }

    /// Submit the current write target for presentation and advance
    ///
    /// A saturated ring is a no-op: no driver call is issued and neither
    /// `write_index` nor `queued_count` changes. A driver-side `NotReady`
    /// likewise leaves the ring state untouched.
    pub fn advance_and_queue(&mut self) -> QueueAdvance {
        if self.queued_count == self.slots.len() {
            trace!("ring saturated, frame dropped from presentation");
            return QueueAdvance::Saturated;
        }

        debug_assert!(
            !self.slots[self.write_index].queued,
            "write target is still queued"
        );
        match self.driver.queue(self.overlay, self.write_index) {
            QueueOutcome::Queued => {
                let index = self.write_index;
                self.slots[index].queued = true;
                self.queued_count += 1;
                self.write_index = (self.write_index + 1) % self.slots.len();
                trace!(slot = index, queued = self.queued_count, "buffer queued");
                QueueAdvance::Queued(index)
            }
            QueueOutcome::NotReady => {
                trace!(slot = self.write_index, "driver not ready to queue");
                QueueAdvance::Saturated
            }
        }
    }

    /// Try to reclaim a buffer whose presentation cycle completed
    ///
    /// Returns the reclaimed slot index, or `None` when nothing is queued
    /// or the driver reports nothing finished yet. Never blocks.
    pub fn try_reclaim(&mut self) -> Option<usize> {
        if self.queued_count == 0 {
            return None;
        }

        match self.driver.dequeue(self.overlay) {
            DequeueOutcome::Reclaimed(index) => {
                self.queued_count -= 1;
                if let Some(slot) = self.slots.get_mut(index) {
                    slot.queued = false;
                }
                trace!(slot = index, queued = self.queued_count, "buffer reclaimed");
                Some(index)
            }
            DequeueOutcome::NotReady => None,
        }
    }
}

impl Drop for BufferRing {
    fn drop(&mut self) {
        debug!("destroying overlay");
        self.driver.destroy(self.overlay);
    }
}
