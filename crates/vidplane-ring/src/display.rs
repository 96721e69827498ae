//! Overlay display orchestration
//!
//! [`OverlayDisplay`] ties the pieces together: it claims the process-wide
//! instance slot, creates the overlay against the native surface, builds the
//! buffer ring and picture pool, and then runs the per-frame presentation
//! cycle.
//!
//! # Per-frame cycle
//!
//! [`OverlayDisplay::frame`] performs, in order:
//!
//! 1. lease the pool picture bound to the current write target and let the
//!    decoder fill it,
//! 2. queue that buffer (a saturated ring silently drops the frame from the
//!    presentation ring; the decoder is never stalled),
//! 3. try to reclaim one finished buffer,
//! 4. release the picture (the plane unbinds).
//!
//! A buffer is therefore never dequeued before it was queued within a frame.
//!
//! # Threading
//!
//! The whole type is a single-writer state machine: the presentation path
//! calls `frame` strictly sequentially, and teardown is externally
//! serialized against in-flight calls. Nothing here takes locks beyond the
//! instance slot held for the display's lifetime.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vidplane_ring::{FourCc, OverlayConfig, OverlayDisplay, PackedPictureAllocator, VideoFormat};
//!
//! let display = OverlayDisplay::open(
//!     driver,                                  // Arc<dyn OverlayDriver> from the loader
//!     &surfaces,                               // platform surface provider
//!     Box::new(PackedPictureAllocator),
//!     VideoFormat::new(1280, 720, FourCc::UYVY),
//!     OverlayConfig::default(),
//! )?;
//!
//! loop {
//!     let outcome = display.frame(|picture| {
//!         // decoder writes picture.plane() here
//!     })?;
//! }
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{FourCc, OverlayConfig, VideoFormat};
use crate::driver::OverlayDriver;
use crate::error::{Result, RingError};
use crate::instance::{self, InstanceToken};
use crate::picture::{Picture, PictureAllocator, PicturePool};
use crate::ring::{BufferRing, QueueAdvance};
use crate::surface::{SurfaceProvider, SurfaceScope};

/// What happened to one presented frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame went out through the slot at `slot`
    Presented {
        /// Slot index that was queued
        slot: usize,
        /// Slot reclaimed this cycle, if any
        reclaimed: Option<usize>,
    },

    /// The ring was saturated; the frame was dropped from presentation
    Dropped {
        /// Slot reclaimed this cycle, if any
        reclaimed: Option<usize>,
    },
}

/// Host queries against the display
///
/// Replaces an untyped query switch: every request is enumerated, and
/// anything this backend cannot honor gets an explicit
/// [`RequestOutcome::Unsupported`] instead of falling through a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRequest {
    /// Hide the pointer over the video area
    HideMouse,
    /// Switch fullscreen on or off
    ChangeFullscreen(bool),
    /// Change the window stacking state
    ChangeWindowState(u32),
    /// Resize the display area
    ChangeDisplaySize {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// Fill the display area instead of fitting it
    ChangeDisplayFilled(bool),
    /// Scale the video by `num/den`
    ChangeZoom {
        /// Zoom numerator
        num: u32,
        /// Zoom denominator
        den: u32,
    },
    /// Override the source aspect ratio
    ChangeSourceAspect {
        /// Aspect numerator
        num: u32,
        /// Aspect denominator
        den: u32,
    },
    /// Crop the source to a window
    ChangeSourceCrop {
        /// Left edge of the crop window
        x: u32,
        /// Top edge of the crop window
        y: u32,
        /// Crop window width
        width: u32,
        /// Crop window height
        height: u32,
    },
}

/// Outcome of a [`DisplayRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request was honored
    Handled,
    /// This backend cannot honor the request; the pipeline must handle it
    Unsupported,
}

/// The open overlay display
///
/// Owns the buffer ring (and through it the overlay handle), the picture
/// pool, and the process-wide instance slot. Dropping the display tears all
/// of that down in order: ring first (destroying the overlay), then the
/// pool, then the instance slot.
pub struct OverlayDisplay {
    // field order is drop order: the overlay must be destroyed and the pool
    // released before the instance slot frees
    ring: BufferRing,
    pool: PicturePool,
    format: VideoFormat,
    source_sar: (u32, u32),
    fullscreen: bool,
    _instance: InstanceToken,
}

impl OverlayDisplay {
    /// Open the overlay display
    ///
    /// Claims the single-instance slot, locks the native surface for the
    /// duration of setup, creates the overlay, binds the buffer ring, and
    /// routes the overlay to the configured display. The surface is
    /// released on every exit path; a failure after overlay creation
    /// destroys the overlay handle before returning.
    pub fn open(
        driver: Arc<dyn OverlayDriver>,
        surfaces: &dyn SurfaceProvider,
        allocator: Box<dyn PictureAllocator>,
        source: VideoFormat,
        config: OverlayConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|issues| RingError::config(issues.join(", ")))?;
        if source.width == 0 || source.height == 0 {
            return Err(RingError::config(format!(
                "source format is {}x{}",
                source.width, source.height
            )));
        }

        let instance = instance::try_acquire()?;

        let mut format = source;
        format.chroma = config.chroma.unwrap_or(FourCc::UYVY);
        debug!(chroma = %format.chroma, "output chroma selected");

        let surface = SurfaceScope::acquire(surfaces)?;

        debug!(
            width = format.width,
            height = format.height,
            "creating overlay"
        );
        let overlay = driver
            .create(
                surface.handle(),
                format.width,
                format.height,
                config.pixel_format,
                config.orientation,
            )
            .ok_or_else(|| RingError::driver("overlay creation refused"))?;

        // the ring owns the overlay handle from here on, including on failure
        let ring = BufferRing::new(Arc::clone(&driver), overlay)?;

        driver.set_display_target(surface.handle(), config.display_id);
        info!(display = config.display_id, "display target bound");
        drop(surface);

        let pool = PicturePool::new(allocator, format);

        // the host starts windowed; it learns about later changes through
        // the control plane
        info!("overlay display open, fullscreen off");
        Ok(Self {
            ring,
            pool,
            format,
            source_sar: (source.sar_num, source.sar_den),
            fullscreen: false,
            _instance: instance,
        })
    }

    /// Run one presentation cycle
    ///
    /// `fill` receives the pool picture bound to the current write target;
    /// the decoder writes the frame there. The buffer is then queued and a
    /// finished buffer reclaimed. Ring saturation yields
    /// [`FrameOutcome::Dropped`], never an error.
    pub fn frame<F>(&mut self, fill: F) -> Result<FrameOutcome>
    where
        F: FnOnce(&mut Picture),
    {
        let target = self.ring.write_address();
        let mut lease = self.pool.acquire(target)?;
        fill(&mut lease);

        let queued = self.ring.advance_and_queue();
        let reclaimed = self.ring.try_reclaim();
        drop(lease);

        Ok(match queued {
            QueueAdvance::Queued(slot) => FrameOutcome::Presented { slot, reclaimed },
            QueueAdvance::Saturated => FrameOutcome::Dropped { reclaimed },
        })
    }

    /// Answer a host query
    pub fn request(&mut self, request: DisplayRequest) -> RequestOutcome {
        debug!(?request, "display request");
        match request {
            DisplayRequest::HideMouse => RequestOutcome::Handled,
            DisplayRequest::ChangeFullscreen(_)
            | DisplayRequest::ChangeWindowState(_)
            | DisplayRequest::ChangeDisplaySize { .. }
            | DisplayRequest::ChangeDisplayFilled(_)
            | DisplayRequest::ChangeZoom { .. }
            | DisplayRequest::ChangeSourceAspect { .. }
            | DisplayRequest::ChangeSourceCrop { .. } => RequestOutcome::Unsupported,
        }
    }

    /// The buffer ring
    #[must_use]
    pub fn ring(&self) -> &BufferRing {
        &self.ring
    }

    /// The format the overlay presents
    #[must_use]
    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    /// Sample aspect ratio captured from the source at open
    #[must_use]
    pub fn source_aspect(&self) -> (u32, u32) {
        self.source_sar
    }

    /// Whether the host window is fullscreen (always starts off)
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::PackedPictureAllocator;
    use crate::testing::{FakeDriver, FakeSurfaceProvider};
    use serial_test::serial;

    fn source() -> VideoFormat {
        VideoFormat {
            width: 64,
            height: 32,
            sar_num: 4,
            sar_den: 3,
            chroma: FourCc::new(*b"I420"),
        }
    }

    fn open_display(driver: Arc<FakeDriver>) -> Result<OverlayDisplay> {
        OverlayDisplay::open(
            driver,
            &FakeSurfaceProvider::new(),
            Box::new(PackedPictureAllocator),
            source(),
            OverlayConfig::default(),
        )
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_open_defaults() {
        let driver = Arc::new(FakeDriver::new(3));
        let display = open_display(driver.clone()).expect("display");

        // source chroma is overridden by the fixed output chroma
        assert_eq!(display.format().chroma, FourCc::UYVY);
        assert_eq!(display.source_aspect(), (4, 3));
        assert!(!display.is_fullscreen());
        assert_eq!(display.ring().len(), 3);
        assert_eq!(driver.display_targets(), vec![2]);
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_second_instance_rejected_first_unaffected() {
        let driver = Arc::new(FakeDriver::new(2));
        let mut first = open_display(driver.clone()).expect("first");
        first.frame(|_| {}).expect("frame");

        let second = open_display(Arc::new(FakeDriver::new(2)));
        assert!(matches!(second, Err(RingError::AlreadyRunning)));

        // the first instance's ring state is untouched
        assert_eq!(first.ring().queued_count(), 1);
        assert_eq!(first.ring().write_index(), 1);
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_create_refusal_is_fatal_and_releases_surface() {
        let surfaces = FakeSurfaceProvider::new();
        let result = OverlayDisplay::open(
            Arc::new(FakeDriver::refusing_create()),
            &surfaces,
            Box::new(PackedPictureAllocator),
            source(),
            OverlayConfig::default(),
        );
        assert!(matches!(result, Err(RingError::Driver(_))));
        assert_eq!(*surfaces.releases.lock(), 1);
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_zero_buffers_fatal_and_slot_freed() {
        let driver = Arc::new(FakeDriver::new(0));
        let result = open_display(driver.clone());
        assert!(matches!(result, Err(RingError::Config(_))));
        assert_eq!(driver.destroyed(), 1);

        // the instance slot must have been freed by the failed open
        let driver = Arc::new(FakeDriver::new(2));
        assert!(open_display(driver).is_ok());
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_frame_cycle_and_saturation_drop() {
        let driver = Arc::new(FakeDriver::new(2));
        let mut display = open_display(driver.clone()).expect("display");

        assert!(matches!(
            display.frame(|_| {}),
            Ok(FrameOutcome::Presented { slot: 0, reclaimed: None })
        ));
        assert!(matches!(
            display.frame(|_| {}),
            Ok(FrameOutcome::Presented { slot: 1, reclaimed: None })
        ));

        // ring full, nothing finished: the frame is dropped
        assert!(matches!(
            display.frame(|_| {}),
            Ok(FrameOutcome::Dropped { reclaimed: None })
        ));

        // a finished buffer unblocks the next cycle
        driver.finish_oldest();
        assert!(matches!(
            display.frame(|_| {}),
            Ok(FrameOutcome::Dropped { reclaimed: Some(0) })
        ));
        assert!(matches!(
            display.frame(|_| {}),
            Ok(FrameOutcome::Presented { slot: 0, reclaimed: None })
        ));
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_decoder_sees_write_target() {
        let driver = Arc::new(FakeDriver::new(2));
        let mut display = open_display(driver).expect("display");

        let mut seen = None;
        display
            .frame(|picture| {
                seen = picture.pixels();
                assert_eq!(picture.plane().pitch, 64 * 2);
            })
            .expect("frame");
        assert!(seen.is_some());
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_requests_are_exhaustive() {
        let driver = Arc::new(FakeDriver::new(2));
        let mut display = open_display(driver).expect("display");

        assert_eq!(
            display.request(DisplayRequest::HideMouse),
            RequestOutcome::Handled
        );
        assert_eq!(
            display.request(DisplayRequest::ChangeZoom { num: 500, den: 1000 }),
            RequestOutcome::Unsupported
        );
        assert_eq!(
            display.request(DisplayRequest::ChangeFullscreen(true)),
            RequestOutcome::Unsupported
        );
    }

    #[test]
    #[serial(overlay_instance)]
    fn test_drop_destroys_overlay_exactly_once() {
        let driver = Arc::new(FakeDriver::new(2));
        let display = open_display(driver.clone()).expect("display");
        drop(display);
        assert_eq!(driver.destroyed(), 1);
    }
}
