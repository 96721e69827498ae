//! Basic overlay display example
//!
//! This example demonstrates:
//! - Implementing the driver and surface capabilities in memory
//! - Opening the overlay display
//! - Running a few presentation cycles and watching the ring state
//!
//! Run with: cargo run --example basic

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use vidplane_ring::{
    DequeueOutcome, FourCc, OverlayConfig, OverlayDisplay, OverlayDriver, OverlayId,
    PackedPictureAllocator, QueueOutcome, SurfaceHandle, SurfaceProvider, VideoFormat,
};

/// Driver backed by plain heap memory; every queued buffer "finishes"
/// presenting immediately.
struct MemoryDriver {
    buffers: Vec<Mutex<Vec<u8>>>,
    presented: Mutex<VecDeque<usize>>,
}

impl MemoryDriver {
    fn new(count: usize, bytes: usize) -> Self {
        Self {
            buffers: (0..count).map(|_| Mutex::new(vec![0u8; bytes])).collect(),
            presented: Mutex::new(VecDeque::new()),
        }
    }
}

impl OverlayDriver for MemoryDriver {
    fn create(
        &self,
        _surface: SurfaceHandle,
        width: u32,
        height: u32,
        pixel_format: u32,
        _orientation: i32,
    ) -> Option<OverlayId> {
        println!("driver: create {}x{} format {:#x}", width, height, pixel_format);
        Some(OverlayId::new(1))
    }

    fn buffer_count(&self, _overlay: OverlayId) -> i32 {
        self.buffers.len() as i32
    }

    fn buffer_address(&self, _overlay: OverlayId, index: usize) -> *mut u8 {
        self.buffers[index].lock().as_mut_ptr()
    }

    fn queue(&self, _overlay: OverlayId, index: usize) -> QueueOutcome {
        self.presented.lock().push_back(index);
        QueueOutcome::Queued
    }

    fn dequeue(&self, _overlay: OverlayId) -> DequeueOutcome {
        match self.presented.lock().pop_front() {
            Some(index) => DequeueOutcome::Reclaimed(index),
            None => DequeueOutcome::NotReady,
        }
    }

    fn destroy(&self, _overlay: OverlayId) {
        println!("driver: overlay destroyed");
    }

    fn set_display_target(&self, _surface: SurfaceHandle, display_id: i32) {
        println!("driver: routed to display {}", display_id);
    }
}

struct StaticSurface;

impl SurfaceProvider for StaticSurface {
    fn acquire(&self) -> vidplane_ring::Result<SurfaceHandle> {
        Ok(SurfaceHandle::new(0x5150))
    }

    fn release(&self) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== vidplane-ring Basic Example ===\n");

    let format = VideoFormat::new(320, 240, FourCc::UYVY);
    let driver = Arc::new(MemoryDriver::new(3, (320 * 240 * 2) as usize));

    let mut display = OverlayDisplay::open(
        driver,
        &StaticSurface,
        Box::new(PackedPictureAllocator),
        format,
        OverlayConfig::default(),
    )?;

    println!(
        "✓ Overlay open: {} buffers, chroma {}\n",
        display.ring().len(),
        display.format().chroma
    );

    for n in 0..5 {
        let outcome = display.frame(|picture| {
            // A real decoder would write a frame through picture.plane();
            // here we only show where it would land.
            if let Some(pixels) = picture.pixels() {
                println!(
                    "frame {}: writing {} lines of {} bytes at {:p}",
                    n,
                    picture.plane().lines,
                    picture.plane().pitch,
                    pixels.as_ptr()
                );
            }
        })?;
        println!(
            "frame {}: {:?} (queued {}/{})\n",
            n,
            outcome,
            display.ring().queued_count(),
            display.ring().len()
        );
    }

    println!("Shutting down...");
    drop(display);
    Ok(())
}
