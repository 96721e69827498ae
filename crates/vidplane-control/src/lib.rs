//! # vidplane-control
//!
//! Runtime control plane for a video output backend: named, typed,
//! runtime-mutable variables (crop, aspect ratio, zoom, on-top, fullscreen,
//! filter chains, snapshot) translated into display-pipeline commands
//! without ever stalling playback.
//!
//! This crate is part of the [vidplane](https://github.com/vidplane/vidplane)
//! workspace and pairs with [`vidplane-ring`](https://crates.io/crates/vidplane-ring),
//! which owns the overlay buffers the pipeline presents.
//!
//! # Features
//!
//! - **Typed Variable Table**: a closed enumeration of variables with
//!   exhaustive dispatch instead of stringly-typed callbacks
//! - **Strict Value Grammars**: `NUM:DEN`, `WxH+X+Y`, and `L+T+R+B` crop
//!   forms with defined precedence; malformed input never clobbers state
//! - **Pipeline Command Queue**: single-producer/single-consumer handoff of
//!   [`PendingCommand`]s to the presentation side
//! - **Filter Chain Toggling**: duplicate-free, order-preserving membership
//!   edits with exact round-trips
//! - **Snapshot Service**: bounded-wait frame grabs, sequential naming, a
//!   process-wide file-name observable, and fading on-screen previews
//!
//! # Quick Start
//!
//! ```rust
//! use vidplane_control::{
//!     command_channel, ControlConfig, ControlDispatcher, PendingCommand, VarId,
//! };
//!
//! let (commands, pipeline) = command_channel();
//! let dispatcher = ControlDispatcher::new(ControlConfig::default(), commands).unwrap();
//! let _ = pipeline.drain(); // initial state replay
//!
//! // any host thread may flip variables...
//! dispatcher.set_string(VarId::AspectRatio, "16:9").unwrap();
//! dispatcher.set_bool(VarId::Fullscreen, true).unwrap();
//!
//! // ...and the pipeline drains the translated commands on its own thread
//! assert_eq!(
//!     pipeline.drain(),
//!     vec![
//!         PendingCommand::ChangeAspectRatio { num: 16, den: 9 },
//!         PendingCommand::ChangeFullscreen(true),
//!     ]
//! );
//! ```
//!
//! # Architecture
//!
//! ```text
//! UI / CLI / IPC threads                presentation thread
//!          │                                    ▲
//!          ▼                                    │ drain()
//! ┌──────────────────┐   PendingCommand  ┌─────┴──────────┐
//! │ ControlDispatcher│ ─────────────────▶│ CommandReceiver│
//! │  (typed table)   │      (queue)      └────────────────┘
//! └────────┬─────────┘
//!          │ TakeSnapshot
//!          ▼
//! ┌──────────────────┐    grab ≤ 500ms   ┌────────────────┐
//! │  SnapshotService │ ─────────────────▶│  FrameGrabber  │
//! │ (seq counter,    │    save           │ SnapshotWriter │
//! │  name observable)│ ─────────────────▶│  PreviewSink   │
//! └──────────────────┘                   └────────────────┘
//! ```
//!
//! # Threading
//!
//! Dispatcher callbacks run synchronously on whichever thread calls `set`,
//! before `set` returns. All dispatcher state sits behind one mutex, and
//! commands reach the presentation side through the queue, so the
//! presentation path is never blocked by a control change. The snapshot
//! grab is the only bounded blocking point in the crate.

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod chain;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod snapshot;
pub mod variables;

// =============================================================================
// RE-EXPORTS - PRIMARY API
// =============================================================================

// Dispatcher (primary entry point)
pub use dispatcher::{ControlConfig, ControlConfigBuilder, ControlDispatcher};

// Commands
pub use command::{command_channel, CommandReceiver, CommandSender, PendingCommand};

// Errors
pub use error::{ControlError, Result};

// Variables
pub use variables::{Choice, VarId, VarType, VarValue};

// =============================================================================
// RE-EXPORTS - ADVANCED API
// =============================================================================

// Filter chains
pub use chain::{append_module, remove_module, ChainKind, ConfigStore, FilterRegistry};

// Snapshots
pub use snapshot::{
    FrameGrabber, GrabError, PreviewSink, SaveRequest, SavedSnapshot, SnapshotConfig,
    SnapshotConfigBuilder, SnapshotFrame, SnapshotPreview, SnapshotService, SnapshotWriter,
    DEFAULT_CAPTURE_TIMEOUT,
};

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
    fn test_default_configs_are_valid() {
        assert!(ControlConfig::default().validate().is_ok());
        assert!(SnapshotConfig::default().validate().is_ok());
    }
}
