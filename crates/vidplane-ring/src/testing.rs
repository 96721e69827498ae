//! In-memory collaborators for unit tests

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::driver::{DequeueOutcome, OverlayDriver, OverlayId, QueueOutcome};
use crate::error::{Result, RingError};
use crate::surface::{SurfaceHandle, SurfaceProvider};

struct FakeDriverState {
    queued: VecDeque<usize>,
    finished: VecDeque<usize>,
    queue_calls: u32,
    dequeue_calls: u32,
    destroyed: u32,
    display_targets: Vec<i32>,
}

/// Driver backed by plain heap buffers
///
/// Presentation completion is explicit: tests call `finish_presentation`
/// (or `finish_oldest`) to make a queued buffer reclaimable.
pub(crate) struct FakeDriver {
    buffers: Vec<Mutex<Vec<u8>>>,
    refuse_create: bool,
    state: Mutex<FakeDriverState>,
}

impl FakeDriver {
    pub(crate) fn new(buffers: usize) -> Self {
        Self {
            buffers: (0..buffers).map(|_| Mutex::new(vec![0u8; 256])).collect(),
            refuse_create: false,
            state: Mutex::new(FakeDriverState {
                queued: VecDeque::new(),
                finished: VecDeque::new(),
                queue_calls: 0,
                dequeue_calls: 0,
                destroyed: 0,
                display_targets: Vec::new(),
            }),
        }
    }

    pub(crate) fn refusing_create() -> Self {
        Self {
            refuse_create: true,
            ..Self::new(0)
        }
    }

    pub(crate) fn finish_presentation(&self, index: usize) {
        let mut state = self.state.lock();
        if let Some(pos) = state.queued.iter().position(|&i| i == index) {
            state.queued.remove(pos);
            state.finished.push_back(index);
        }
    }

    pub(crate) fn finish_oldest(&self) {
        let mut state = self.state.lock();
        if let Some(index) = state.queued.pop_front() {
            state.finished.push_back(index);
        }
    }

    pub(crate) fn queue_calls(&self) -> u32 {
        self.state.lock().queue_calls
    }

    pub(crate) fn dequeue_calls(&self) -> u32 {
        self.state.lock().dequeue_calls
    }

    pub(crate) fn destroyed(&self) -> u32 {
        self.state.lock().destroyed
    }

    pub(crate) fn display_targets(&self) -> Vec<i32> {
        self.state.lock().display_targets.clone()
    }
}

impl OverlayDriver for FakeDriver {
    fn create(
        &self,
        _surface: SurfaceHandle,
        _width: u32,
        _height: u32,
        _pixel_format: u32,
        _orientation: i32,
    ) -> Option<OverlayId> {
        if self.refuse_create {
            None
        } else {
            Some(OverlayId::new(1))
        }
    }

    fn buffer_count(&self, _overlay: OverlayId) -> i32 {
        i32::try_from(self.buffers.len()).unwrap_or(i32::MAX)
    }

    fn buffer_address(&self, _overlay: OverlayId, index: usize) -> *mut u8 {
        match self.buffers.get(index) {
            Some(buffer) => buffer.lock().as_mut_ptr(),
            None => std::ptr::null_mut(),
        }
    }

    fn queue(&self, _overlay: OverlayId, index: usize) -> QueueOutcome {
        let mut state = self.state.lock();
        state.queue_calls += 1;
        state.queued.push_back(index);
        QueueOutcome::Queued
    }

    fn dequeue(&self, _overlay: OverlayId) -> DequeueOutcome {
        let mut state = self.state.lock();
        state.dequeue_calls += 1;
        match state.finished.pop_front() {
            Some(index) => DequeueOutcome::Reclaimed(index),
            None => DequeueOutcome::NotReady,
        }
    }

    fn destroy(&self, _overlay: OverlayId) {
        self.state.lock().destroyed += 1;
    }

    fn set_display_target(&self, _surface: SurfaceHandle, display_id: i32) {
        self.state.lock().display_targets.push(display_id);
    }
}

/// Provider handing out one fixed surface token
pub(crate) struct FakeSurfaceProvider {
    pub(crate) fail: bool,
    pub(crate) releases: Mutex<u32>,
}

impl FakeSurfaceProvider {
    pub(crate) fn new() -> Self {
        Self {
            fail: false,
            releases: Mutex::new(0),
        }
    }
}

impl SurfaceProvider for FakeSurfaceProvider {
    fn acquire(&self) -> Result<SurfaceHandle> {
        if self.fail {
            Err(RingError::surface("no native window"))
        } else {
            Ok(SurfaceHandle::new(42))
        }
    }

    fn release(&self) {
        *self.releases.lock() += 1;
    }
}
