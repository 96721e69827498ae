//! # vidplane
//!
//! Hardware overlay video output core for Rust.
//!
//! This crate provides a unified interface to the vidplane libraries:
//!
//! - **[`ring`]** - Overlay buffer lifecycle (driver capability, buffer ring, picture pool)
//! - **[`control`]** - Runtime control plane (variables, pipeline commands, snapshots)
//!
//! # Features
//!
//! All features are enabled by default. You can selectively enable only what you need:
//!
//! ```toml
//! # Use everything (default)
//! vidplane = "0.1"
//!
//! # Buffer ring only
//! vidplane = { version = "0.1", default-features = false, features = ["ring"] }
//!
//! # Control plane only
//! vidplane = { version = "0.1", default-features = false, features = ["control"] }
//! ```
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `ring` | Yes | Overlay buffer lifecycle |
//! | `control` | Yes | Runtime control plane |
//! | `full` | No | Everything |
//!
//! # Quick Start
//!
//! ## Driving the overlay
//!
//! ```rust,ignore
//! use vidplane::ring::{
//!     FourCc, OverlayConfig, OverlayDisplay, PackedPictureAllocator, VideoFormat,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // driver and surfaces come from the platform loader
//!     let mut display = OverlayDisplay::open(
//!         driver,
//!         &surfaces,
//!         Box::new(PackedPictureAllocator),
//!         VideoFormat::new(1280, 720, FourCc::UYVY),
//!         OverlayConfig::default(),
//!     )?;
//!
//!     // once per decoded frame
//!     display.frame(|picture| {
//!         // decoder writes through picture.plane()
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! ## Full pipeline: control plane feeding the display
//!
//! ```rust,ignore
//! use vidplane::{
//!     control::{command_channel, ControlConfig, ControlDispatcher, PendingCommand, VarId},
//!     ring::{DisplayRequest, RequestOutcome},
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Wire the command queue between dispatcher and pipeline
//!     let (commands, pipeline) = command_channel();
//!     let dispatcher = ControlDispatcher::new(ControlConfig::default(), commands)?;
//!
//!     // 2. The host flips variables from its own threads
//!     dispatcher.set_string(VarId::Crop, "16:9")?;
//!
//!     // 3. The presentation side drains commands between frames
//!     while let Some(command) = pipeline.try_next() {
//!         match command {
//!             PendingCommand::ChangeCropRatio { num, den } => { /* apply */ }
//!             _ => { /* apply the rest */ }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        vidplane                         │
//! ├───────────────────────────┬─────────────────────────────┤
//! │      vidplane-ring        │      vidplane-control       │
//! │                           │                             │
//! │  OverlayDisplay           │  ControlDispatcher          │
//! │  BufferRing, PicturePool  │  PendingCommand queue       │
//! │  OverlayDriver (trait)    │  SnapshotService            │
//! └─────────────┬─────────────┴──────────────┬──────────────┘
//!               │                            │
//!               ▼                            ▼
//!      native overlay library        display pipeline / host UI
//! ```
//!
//! # Platform Support
//!
//! The core is platform-neutral: the native overlay library and the display
//! surface are consumed through capability traits resolved by an external
//! loader. Exactly one hardware overlay target is driven at a time.
//!
//! # Related Crates
//!
//! You can also use the individual crates directly:
//!
//! - [`vidplane-ring`](https://crates.io/crates/vidplane-ring) - Buffer lifecycle only
//! - [`vidplane-control`](https://crates.io/crates/vidplane-control) - Control plane only

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// RE-EXPORTS
// =============================================================================

/// Overlay buffer lifecycle.
///
/// This module provides the hardware-facing half of the backend:
/// - The injected overlay driver capability
/// - The fixed queue/dequeue buffer ring
/// - The single-picture decoder pool
/// - Per-frame display orchestration and the single-instance guard
///
/// See [`vidplane_ring`] documentation for details.
#[cfg(feature = "ring")]
#[cfg_attr(docsrs, doc(cfg(feature = "ring")))]
pub use vidplane_ring as ring;

/// Runtime control plane.
///
/// This module provides the host-facing half of the backend:
/// - Typed control variables with choice sets
/// - Crop/aspect/zoom grammar parsing and command translation
/// - Filter chain membership
/// - Snapshot capture with preview and file-name events
///
/// See [`vidplane_control`] documentation for details.
#[cfg(feature = "control")]
#[cfg_attr(docsrs, doc(cfg(feature = "control")))]
pub use vidplane_control as control;

// =============================================================================
// PRELUDE - Common types for convenience
// =============================================================================

/// Prelude module with commonly used types.
///
/// ```rust
/// use vidplane::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "ring")]
    pub use vidplane_ring::{
        FourCc, OverlayConfig, OverlayDisplay, OverlayDriver, RingError, VideoFormat,
    };

    #[cfg(feature = "control")]
    pub use vidplane_control::{
        command_channel, ControlConfig, ControlDispatcher, ControlError, PendingCommand,
        SnapshotService, VarId,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    #[cfg(feature = "ring")]
    fn test_ring_reexport() {
        // Just verify the re-export works
        let _ = ring::OverlayConfig::default();
    }

    #[test]
    #[cfg(feature = "control")]
    fn test_control_reexport() {
        // Just verify the re-export works
        let _ = control::ControlConfig::default();
    }
}
