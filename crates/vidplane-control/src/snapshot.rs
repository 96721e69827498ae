//! Snapshot capture
//!
//! Grabs the frame currently going through the pipeline, hands the encoded
//! image to an external writer, publishes the resulting file name as a
//! process-wide observable, and optionally puts a short-lived preview of the
//! shot on screen.
//!
//! The frame grab is the single bounded blocking point of the control
//! plane: the [`FrameGrabber`] collaborator must return within the
//! configured timeout, and a timeout is recovered locally: nothing is
//! written, no event is published.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vidplane_control::{SnapshotConfig, SnapshotService};
//!
//! let service = SnapshotService::new(SnapshotConfig::default());
//! let mut names = service.subscribe();
//!
//! match service.take(&grabber, &writer, Some(&preview_sink)) {
//!     Ok(saved) => println!("wrote {}", saved.filename),
//!     Err(e) => eprintln!("snapshot failed: {e}"),
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{ControlError, Result};

/// How long a frame grab may take before it is abandoned
///
/// Too short for sources below 2 fps, which cannot deliver a frame inside
/// the window.
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_millis(500);

/// How long the on-screen preview stays up
const PREVIEW_DURATION: Duration = Duration::from_secs(4);

/// The preview advertises its picture at this multiple of the captured
/// frame's display dimensions, shrinking the overlay to a corner thumbnail.
const PREVIEW_SCALE: u32 = 4;

/// Snapshot behavior configuration
///
/// Use [`SnapshotConfig::builder()`] or struct literal syntax with
/// [`Default::default()`].
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory snapshots are written to (default: None)
    ///
    /// When unset, the writer collaborator's default directory is used; if
    /// it has none either, taking a snapshot fails.
    pub path: Option<PathBuf>,

    /// Image container format (default: "png")
    pub format: String,

    /// File name prefix (default: "snap-")
    pub prefix: String,

    /// Use sequential numbering instead of timestamps (default: false)
    pub sequential: bool,

    /// Show an on-screen preview of the shot (default: true)
    pub preview: bool,

    /// Bound on the frame grab (default: 500 ms)
    pub timeout: Duration,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: "png".to_string(),
            prefix: "snap-".to_string(),
            sequential: false,
            preview: true,
            timeout: DEFAULT_CAPTURE_TIMEOUT,
        }
    }
}

impl SnapshotConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> SnapshotConfigBuilder {
        SnapshotConfigBuilder::default()
    }

    /// Validate configuration and return any issues
    ///
    /// Returns `Ok(())` if configuration is valid, or a list of issues.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.format.is_empty() {
            issues.push("format cannot be empty".to_string());
        }

        if self.timeout.is_zero() {
            issues.push("timeout must be non-zero".to_string());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Builder for [`SnapshotConfig`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotConfigBuilder {
    path: Option<PathBuf>,
    format: Option<String>,
    prefix: Option<String>,
    sequential: Option<bool>,
    preview: Option<bool>,
    timeout: Option<Duration>,
}

impl SnapshotConfigBuilder {
    /// Set the snapshot directory
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the image container format
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the file name prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Use sequential numbering
    #[must_use]
    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = Some(sequential);
        self
    }

    /// Show an on-screen preview
    #[must_use]
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Bound the frame grab
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> SnapshotConfig {
        let defaults = SnapshotConfig::default();

        SnapshotConfig {
            path: self.path.or(defaults.path),
            format: self.format.unwrap_or(defaults.format),
            prefix: self.prefix.unwrap_or(defaults.prefix),
            sequential: self.sequential.unwrap_or(defaults.sequential),
            preview: self.preview.unwrap_or(defaults.preview),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        }
    }
}

/// A captured frame, encoded and ready to persist
#[derive(Debug, Clone)]
pub struct SnapshotFrame {
    /// Encoded image bytes in the requested container format
    pub image: Vec<u8>,

    /// Decoded picture bytes, used for the on-screen preview
    pub picture: Vec<u8>,

    /// Display width the frame advertises
    pub display_width: u32,

    /// Display height the frame advertises
    pub display_height: u32,
}

/// Why a frame grab produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabError {
    /// The pipeline did not deliver a frame within the bound
    Timeout,
    /// The pipeline failed outright
    Failed(String),
}

/// Grabs the current frame out of the display pipeline
///
/// External collaborator seam. Implementations must honor `timeout`
/// deterministically: return [`GrabError::Timeout`] rather than blocking
/// past the bound.
pub trait FrameGrabber {
    /// Grab the current frame, encoded as `format`
    fn grab(
        &self,
        format: &str,
        timeout: Duration,
    ) -> std::result::Result<SnapshotFrame, GrabError>;
}

/// Everything the writer needs to persist one snapshot
#[derive(Debug, Clone)]
pub struct SaveRequest<'a> {
    /// Encoded image bytes
    pub image: &'a [u8],

    /// Target directory
    pub directory: &'a Path,

    /// Image container format
    pub format: &'a str,

    /// File name prefix
    pub prefix: &'a str,

    /// Whether to use sequential numbering
    pub sequential: bool,

    /// Sequence number to use when `sequential` is set
    pub sequence: u32,
}

/// A snapshot the writer persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    /// Full name of the written file
    pub filename: String,

    /// Sequence number actually used
    pub sequence: u32,
}

/// Persists encoded snapshots
///
/// External collaborator seam over image encoding and storage.
pub trait SnapshotWriter {
    /// Directory to use when the configuration names none
    fn default_directory(&self) -> Option<PathBuf>;

    /// Write the image and return the file name used
    fn save(&self, request: &SaveRequest<'_>) -> std::io::Result<SavedSnapshot>;
}

/// On-screen preview of a snapshot
///
/// Ephemeral and fading; the advertised dimensions are inflated so the
/// presentation layer renders the picture at a fraction of the screen.
#[derive(Debug, Clone)]
pub struct SnapshotPreview {
    /// Decoded picture bytes
    pub picture: Vec<u8>,

    /// Advertised width (4x the captured width)
    pub width: u32,

    /// Advertised height
    pub height: u32,

    /// How long the preview stays up
    pub duration: Duration,

    /// Fade out instead of vanishing
    pub fade: bool,
}

/// Accepts preview overlays for display
///
/// External collaborator seam into the presentation layer.
pub trait PreviewSink {
    /// Submit the preview; an error only costs the preview, not the snapshot
    fn submit(&self, preview: SnapshotPreview) -> std::result::Result<(), String>;
}

/// The snapshot service
///
/// Owns the sequence counter (starting at 1) and the file-name observable.
/// Thread-safe; `take` may be called from any host thread.
pub struct SnapshotService {
    config: SnapshotConfig,
    sequence: AtomicU32,
    events: watch::Sender<Option<String>>,
}

impl SnapshotService {
    /// Create the service
    #[must_use]
    pub fn new(config: SnapshotConfig) -> Self {
        let (events, _) = watch::channel(None);
        Self {
            config,
            sequence: AtomicU32::new(1),
            events,
        }
    }

    /// Observe written file names
    ///
    /// The channel holds the most recent name; `None` until the first
    /// successful snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.events.subscribe()
    }

    /// Next sequence number to be used
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Grab, persist, announce, and optionally preview the current frame
    ///
    /// Every failure path releases all intermediate resources and publishes
    /// nothing. A preview failure is only a warning; the snapshot itself
    /// already succeeded.
    pub fn take(
        &self,
        grabber: &dyn FrameGrabber,
        writer: &dyn SnapshotWriter,
        preview: Option<&dyn PreviewSink>,
    ) -> Result<SavedSnapshot> {
        let frame = grabber
            .grab(&self.config.format, self.config.timeout)
            .map_err(|e| match e {
                GrabError::Timeout => ControlError::CaptureTimeout,
                GrabError::Failed(reason) => ControlError::Capture(reason),
            })?;

        let directory = match self.config.path.clone() {
            Some(path) => path,
            None => writer.default_directory().ok_or(ControlError::NoSnapshotPath)?,
        };

        let request = SaveRequest {
            image: &frame.image,
            directory: &directory,
            format: &self.config.format,
            prefix: &self.config.prefix,
            sequential: self.config.sequential,
            sequence: self.sequence.load(Ordering::Relaxed),
        };
        let saved = writer
            .save(&request)
            .map_err(|e| ControlError::SnapshotWrite(e.to_string()))?;

        if self.config.sequential {
            self.sequence.store(saved.sequence + 1, Ordering::Relaxed);
        }

        debug!("snapshot taken ({})", saved.filename);

        if self.config.preview {
            if let Some(sink) = preview {
                let shot = SnapshotPreview {
                    picture: frame.picture,
                    width: frame.display_width * PREVIEW_SCALE,
                    height: frame.display_height * PREVIEW_SCALE,
                    duration: PREVIEW_DURATION,
                    fade: true,
                };
                if sink.submit(shot).is_err() {
                    warn!("failed to display snapshot");
                }
            }
        }

        // announce the new file process-wide
        self.events.send_replace(Some(saved.filename.clone()));

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct StaticGrabber;

    impl FrameGrabber for StaticGrabber {
        fn grab(
            &self,
            _format: &str,
            _timeout: Duration,
        ) -> std::result::Result<SnapshotFrame, GrabError> {
            Ok(SnapshotFrame {
                image: vec![1, 2, 3],
                picture: vec![9, 9],
                display_width: 320,
                display_height: 240,
            })
        }
    }

    struct TimingOutGrabber;

    impl FrameGrabber for TimingOutGrabber {
        fn grab(
            &self,
            _format: &str,
            _timeout: Duration,
        ) -> std::result::Result<SnapshotFrame, GrabError> {
            Err(GrabError::Timeout)
        }
    }

    #[derive(Default)]
    struct MemoryWriter {
        saved: Mutex<Vec<(PathBuf, u32)>>,
        no_default_dir: bool,
    }

    impl SnapshotWriter for MemoryWriter {
        fn default_directory(&self) -> Option<PathBuf> {
            if self.no_default_dir {
                None
            } else {
                Some(PathBuf::from("/shots"))
            }
        }

        fn save(&self, request: &SaveRequest<'_>) -> std::io::Result<SavedSnapshot> {
            let filename = format!(
                "{}/{}{:05}.{}",
                request.directory.display(),
                request.prefix,
                request.sequence,
                request.format
            );
            self.saved
                .lock()
                .push((request.directory.to_path_buf(), request.sequence));
            Ok(SavedSnapshot {
                filename,
                sequence: request.sequence,
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        previews: Mutex<Vec<SnapshotPreview>>,
    }

    impl PreviewSink for RecordingSink {
        fn submit(&self, preview: SnapshotPreview) -> std::result::Result<(), String> {
            self.previews.lock().push(preview);
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_publishes_filename() {
        let service = SnapshotService::new(SnapshotConfig::default());
        let names = service.subscribe();
        let writer = MemoryWriter::default();

        let saved = service.take(&StaticGrabber, &writer, None).expect("snapshot");
        assert_eq!(saved.filename, "/shots/snap-00001.png");
        assert_eq!(
            names.borrow().as_deref(),
            Some("/shots/snap-00001.png")
        );
    }

    #[test]
    fn test_timeout_publishes_nothing() {
        let service = SnapshotService::new(SnapshotConfig::default());
        let names = service.subscribe();
        let writer = MemoryWriter::default();

        let err = service
            .take(&TimingOutGrabber, &writer, None)
            .expect_err("timeout");
        assert!(matches!(err, ControlError::CaptureTimeout));
        assert!(writer.saved.lock().is_empty());
        assert!(names.borrow().is_none());
    }

    #[test]
    fn test_sequence_advances_only_when_sequential() {
        let sequential = SnapshotService::new(
            SnapshotConfig::builder().sequential(true).build(),
        );
        let writer = MemoryWriter::default();
        sequential.take(&StaticGrabber, &writer, None).expect("first");
        sequential.take(&StaticGrabber, &writer, None).expect("second");
        assert_eq!(sequential.sequence(), 3);

        let timestamped = SnapshotService::new(SnapshotConfig::default());
        timestamped.take(&StaticGrabber, &writer, None).expect("shot");
        assert_eq!(timestamped.sequence(), 1);
    }

    #[test]
    fn test_configured_path_wins_over_default() {
        let service = SnapshotService::new(
            SnapshotConfig::builder().path("/custom").build(),
        );
        let writer = MemoryWriter::default();
        service.take(&StaticGrabber, &writer, None).expect("snapshot");
        assert_eq!(writer.saved.lock()[0].0, PathBuf::from("/custom"));
    }

    #[test]
    fn test_missing_path_everywhere_fails() {
        let service = SnapshotService::new(SnapshotConfig::default());
        let writer = MemoryWriter {
            no_default_dir: true,
            ..Default::default()
        };
        let err = service
            .take(&StaticGrabber, &writer, None)
            .expect_err("no path");
        assert!(matches!(err, ControlError::NoSnapshotPath));
    }

    #[test]
    fn test_preview_is_scaled_and_ephemeral() {
        let service = SnapshotService::new(SnapshotConfig::default());
        let writer = MemoryWriter::default();
        let sink = RecordingSink::default();

        service
            .take(&StaticGrabber, &writer, Some(&sink))
            .expect("snapshot");

        let previews = sink.previews.lock();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].width, 320 * 4);
        assert_eq!(previews[0].height, 240 * 4);
        assert_eq!(previews[0].duration, Duration::from_secs(4));
        assert!(previews[0].fade);
    }

    #[test]
    fn test_preview_disabled_by_config() {
        let service = SnapshotService::new(
            SnapshotConfig::builder().preview(false).build(),
        );
        let writer = MemoryWriter::default();
        let sink = RecordingSink::default();

        service
            .take(&StaticGrabber, &writer, Some(&sink))
            .expect("snapshot");
        assert!(sink.previews.lock().is_empty());
    }

    #[test]
    fn test_preview_failure_is_not_fatal() {
        struct RefusingSink;
        impl PreviewSink for RefusingSink {
            fn submit(&self, _preview: SnapshotPreview) -> std::result::Result<(), String> {
                Err("no subpicture channel".to_string())
            }
        }

        let service = SnapshotService::new(SnapshotConfig::default());
        let names = service.subscribe();
        let writer = MemoryWriter::default();

        service
            .take(&StaticGrabber, &writer, Some(&RefusingSink))
            .expect("snapshot still succeeds");
        assert!(names.borrow().is_some());
    }

    #[test]
    fn test_config_validation() {
        assert!(SnapshotConfig::default().validate().is_ok());

        let config = SnapshotConfig {
            format: String::new(),
            timeout: Duration::ZERO,
            ..Default::default()
        };
        let issues = config.validate().expect_err("two issues");
        assert_eq!(issues.len(), 2);
    }
}
