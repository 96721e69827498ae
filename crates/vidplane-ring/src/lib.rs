//! # vidplane-ring
//!
//! Hardware overlay buffer lifecycle for a video output backend: driver
//! capability traits, the queue/dequeue buffer ring, the single-picture
//! decoder pool, and the per-frame display orchestration.
//!
//! This crate is part of the [vidplane](https://github.com/vidplane/vidplane)
//! workspace and pairs with [`vidplane-control`](https://crates.io/crates/vidplane-control),
//! which drives the presentation parameters at runtime.
//!
//! # Features
//!
//! - **Injected Driver Capability**: the native overlay library is consumed
//!   through the [`OverlayDriver`] trait, resolved once by an external loader
//! - **Fixed Buffer Ring**: queue/dequeue state machine over the
//!   driver-reported buffer set, with saturation as backpressure
//! - **Single-Picture Pool**: lock-on-acquire / unlock-on-release binding of
//!   the decoder frame to the next overlay buffer
//! - **Scoped Surface Access**: the native surface is held only during setup
//!   and released on every exit path
//! - **Single-Instance Guard**: non-blocking process-wide slot so exactly one
//!   display drives the hardware
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vidplane_ring::{
//!     FourCc, OverlayConfig, OverlayDisplay, PackedPictureAllocator, VideoFormat,
//! };
//!
//! // driver and surfaces come from the platform loader
//! let display = OverlayDisplay::open(
//!     Arc::clone(&driver),
//!     &surfaces,
//!     Box::new(PackedPictureAllocator),
//!     VideoFormat::new(1280, 720, FourCc::UYVY),
//!     OverlayConfig::builder().display_id(2).build(),
//! )?;
//!
//! // once per decoded frame
//! display.frame(|picture| {
//!     // write pixels through picture.plane()
//! })?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   acquire/release   ┌──────────────────┐
//! │   decoder    │ ───────────────────▶│   PicturePool    │
//! └──────────────┘     (lease)         │  (one Picture)   │
//!                                      └────────┬─────────┘
//!                                               │ bind to write target
//!                                               ▼
//! ┌──────────────┐   queue/dequeue     ┌──────────────────┐
//! │ OverlayDriver│ ◀───────────────────│    BufferRing    │
//! │ (capability) │                     │ write_index, N   │
//! └──────────────┘                     └──────────────────┘
//! ```
//!
//! # Threading
//!
//! The ring, pool, and display are a single-writer state machine: the
//! presentation path calls them strictly sequentially. This is a documented
//! contract, not a type-system guarantee. The only cross-thread state is the
//! process-wide instance slot.
//!
//! # Error Handling
//!
//! The crate uses typed errors via [`RingError`]. Steady-state driver
//! conditions (nothing ready to queue or dequeue) are ordinary outcomes,
//! not errors, and are never logged as failures.

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod instance;
pub mod picture;
pub mod ring;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// RE-EXPORTS - PRIMARY API
// =============================================================================

// Display (primary entry point)
pub use display::{DisplayRequest, FrameOutcome, OverlayDisplay, RequestOutcome};

// Configuration
pub use config::{FourCc, OverlayConfig, OverlayConfigBuilder, VideoFormat};

// Errors
pub use error::{Result, RingError};

// Driver capability
pub use driver::{DequeueOutcome, OverlayDriver, OverlayId, QueueOutcome};

// =============================================================================
// RE-EXPORTS - ADVANCED API
// =============================================================================

// Ring state machine
pub use ring::{BufferRing, QueueAdvance};

// Picture pool
pub use picture::{
    PackedPictureAllocator, Picture, PictureAllocator, PictureLease, PicturePlane, PicturePool,
};

// Surface scope
pub use surface::{SurfaceHandle, SurfaceProvider, SurfaceScope};

// Instance registry
pub use instance::{try_acquire, InstanceToken};

// =============================================================================
// CRATE-LEVEL ITEMS
// =============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }
}
