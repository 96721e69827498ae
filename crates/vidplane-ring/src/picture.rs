//! Decoder-facing picture pool
//!
//! The pool holds exactly one reusable [`Picture`], matching the hardware
//! overlay semantics: the decoder always writes into the buffer the overlay
//! will present next. Acquiring the picture binds its writable plane to the
//! ring's current write target; releasing it (the lease dropping) unbinds
//! the plane on every path, error or not. The overlay memory itself stays
//! owned by the driver throughout.

use std::ptr::NonNull;

use tracing::debug;

use crate::config::VideoFormat;
use crate::error::{Result, RingError};

/// The writable plane of the pool picture
///
/// `pixels` is bound to an overlay buffer only while the picture is leased;
/// between leases it is `None` and the decoder must not write.
#[derive(Debug)]
pub struct PicturePlane {
    pixels: Option<NonNull<u8>>,

    /// Lines the decoder may write this cycle
    pub lines: u32,

    /// Bytes per line the decoder may write this cycle
    pub pitch: u32,

    /// Visible line count of the format
    pub visible_lines: u32,

    /// Visible bytes per line of the format
    pub visible_pitch: u32,
}

/// The single reusable frame object
///
/// Created lazily on the first pool acquisition and destroyed with the
/// pool. Exactly one instance exists per display.
#[derive(Debug)]
pub struct Picture {
    plane: PicturePlane,
    format: VideoFormat,
}

impl Picture {
    /// Construct an unbound picture for `format`
    ///
    /// Meant for [`PictureAllocator`] implementations; `visible_pitch` and
    /// `visible_lines` describe the geometry the decoder fills each cycle.
    #[must_use]
    pub fn new(format: VideoFormat, visible_lines: u32, visible_pitch: u32) -> Self {
        Self {
            plane: PicturePlane {
                pixels: None,
                lines: 0,
                pitch: 0,
                visible_lines,
                visible_pitch,
            },
            format,
        }
    }

    /// The format this picture was allocated for
    #[must_use]
    pub fn format(&self) -> &VideoFormat {
        &self.format
    }

    /// The writable plane
    #[must_use]
    pub fn plane(&self) -> &PicturePlane {
        &self.plane
    }

    /// Where the decoder writes, while leased
    #[must_use]
    pub fn pixels(&self) -> Option<NonNull<u8>> {
        self.plane.pixels
    }

    /// Bind the plane to an overlay buffer
    ///
    /// Sets line/pitch to the visible geometry. Idempotent within one
    /// acquisition.
    fn bind(&mut self, target: NonNull<u8>) {
        self.plane.pixels = Some(target);
        self.plane.lines = self.plane.visible_lines;
        self.plane.pitch = self.plane.visible_pitch;
    }

    /// Drop the plane binding; the overlay memory remains valid
    fn unbind(&mut self) {
        self.plane.pixels = None;
    }
}

/// Constructs the reusable frame object
///
/// External collaborator seam: the host decides how pictures come to exist
/// (geometry rules, padding, debug instrumentation). A failure here is an
/// [`RingError::Allocation`] and shuts the presentation attempt down.
pub trait PictureAllocator {
    /// Construct the picture for `format`
    fn allocate(&self, format: &VideoFormat) -> Result<Picture>;
}

/// Allocator for the packed 4:2:2 layouts the overlay hardware presents
///
/// Visible pitch is `width * bytes_per_pixel`, visible lines equal the
/// frame height. Planar chromas are refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackedPictureAllocator;

impl PictureAllocator for PackedPictureAllocator {
    fn allocate(&self, format: &VideoFormat) -> Result<Picture> {
        let Some(bpp) = format.chroma.bytes_per_pixel() else {
            return Err(RingError::Allocation(format!(
                "no packed layout for chroma {}",
                format.chroma
            )));
        };
        Ok(Picture::new(*format, format.height, format.width * bpp))
    }
}

/// Pool owning the single picture
///
/// Lock-on-acquire / unlock-on-release semantics: [`PicturePool::acquire`]
/// binds the picture to the supplied write target and returns a
/// [`PictureLease`] whose `Drop` unbinds it.
pub struct PicturePool {
    allocator: Box<dyn PictureAllocator>,
    format: VideoFormat,
    picture: Option<Picture>,
}

impl PicturePool {
    /// Create an empty pool; the picture is allocated on first acquire
    #[must_use]
    pub fn new(allocator: Box<dyn PictureAllocator>, format: VideoFormat) -> Self {
        Self {
            allocator,
            format,
            picture: None,
        }
    }

    /// Whether the lazy picture has been constructed yet
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.picture.is_some()
    }

    /// Lease the picture, bound to `target`
    ///
    /// Allocates the picture on the first call. The returned lease unbinds
    /// the plane when dropped, on every release path.
    pub fn acquire(&mut self, target: NonNull<u8>) -> Result<PictureLease<'_>> {
        let mut picture = match self.picture.take() {
            Some(picture) => picture,
            None => {
                debug!("allocating the pool picture");
                self.allocator.allocate(&self.format)?
            }
        };
        picture.bind(target);
        Ok(PictureLease {
            picture: self.picture.insert(picture),
        })
    }
}

/// Scoped access to the pool picture
///
/// Dereferences to [`Picture`]; unbinds the writable plane on drop.
#[derive(Debug)]
pub struct PictureLease<'pool> {
    picture: &'pool mut Picture,
}

impl std::ops::Deref for PictureLease<'_> {
    type Target = Picture;

    fn deref(&self) -> &Picture {
        self.picture
    }
}

impl std::ops::DerefMut for PictureLease<'_> {
    fn deref_mut(&mut self) -> &mut Picture {
        self.picture
    }
}

impl Drop for PictureLease<'_> {
    fn drop(&mut self) {
        self.picture.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FourCc;

    fn format() -> VideoFormat {
        VideoFormat::new(64, 32, FourCc::UYVY)
    }

    fn target(buffer: &mut [u8]) -> NonNull<u8> {
        NonNull::new(buffer.as_mut_ptr()).expect("buffer address")
    }

    #[test]
    fn test_lazy_allocation_happens_once() {
        let mut backing = vec![0u8; 64 * 32 * 2];
        let mut pool = PicturePool::new(Box::new(PackedPictureAllocator), format());
        assert!(!pool.is_allocated());

        {
            let lease = pool.acquire(target(&mut backing)).expect("lease");
            assert_eq!(lease.plane().pitch, 64 * 2);
            assert_eq!(lease.plane().lines, 32);
        }
        assert!(pool.is_allocated());

        // second acquire reuses the same picture
        let lease = pool.acquire(target(&mut backing)).expect("lease");
        assert!(lease.pixels().is_some());
    }

    #[test]
    fn test_lease_unbinds_on_drop() {
        let mut backing = vec![0u8; 64 * 32 * 2];
        let mut pool = PicturePool::new(Box::new(PackedPictureAllocator), format());

        {
            let lease = pool.acquire(target(&mut backing)).expect("lease");
            assert_eq!(lease.pixels(), Some(target(&mut backing)));
        }

        let picture = pool.picture.as_ref().expect("allocated");
        assert!(picture.pixels().is_none());
    }

    #[test]
    fn test_rebind_is_idempotent() {
        let mut a = vec![0u8; 16];
        let mut pool = PicturePool::new(Box::new(PackedPictureAllocator), format());

        let first = pool.acquire(target(&mut a)).map(|l| l.pixels()).expect("lease");
        let second = pool.acquire(target(&mut a)).map(|l| l.pixels()).expect("lease");
        assert_eq!(first, second);
    }

    #[test]
    fn test_planar_chroma_fails_allocation() {
        let mut backing = vec![0u8; 16];
        let planar = VideoFormat::new(64, 32, FourCc::new(*b"I420"));
        let mut pool = PicturePool::new(Box::new(PackedPictureAllocator), planar);

        let err = pool.acquire(target(&mut backing)).expect_err("planar");
        assert!(matches!(err, RingError::Allocation(_)));
        assert!(!pool.is_allocated());
    }

    #[test]
    fn test_allocator_failure_propagates() {
        struct RefusingAllocator;
        impl PictureAllocator for RefusingAllocator {
            fn allocate(&self, _format: &VideoFormat) -> Result<Picture> {
                Err(RingError::Allocation("out of frame objects".into()))
            }
        }

        let mut backing = vec![0u8; 16];
        let mut pool = PicturePool::new(Box::new(RefusingAllocator), format());
        assert!(pool.acquire(target(&mut backing)).is_err());
    }
}
