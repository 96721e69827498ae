//! Native display surface acquisition
//!
//! The platform hands out its window/surface object through the
//! [`SurfaceProvider`] capability. Acquisition is scoped: the surface is
//! held only while the overlay is being created and routed, and released
//! on every exit path through [`SurfaceScope`]'s `Drop`.

use tracing::debug;

use crate::error::Result;

/// Opaque token for a locked native surface
///
/// Minted by the provider; valid only between a successful
/// [`SurfaceProvider::acquire`] and the matching release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wrap a provider-chosen token
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The provider-chosen token
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Capability interface for locking the native display surface
///
/// A failed `acquire` needs no balancing `release`; a successful one is
/// balanced exactly once, which [`SurfaceScope`] guarantees.
pub trait SurfaceProvider {
    /// Lock the native surface and return its handle
    fn acquire(&self) -> Result<SurfaceHandle>;

    /// Unlock the surface acquired earlier
    fn release(&self);
}

/// Scoped surface acquisition
///
/// Holds the locked surface for the duration of overlay setup and releases
/// it when dropped, including on error paths that unwind out of setup.
pub struct SurfaceScope<'a> {
    provider: &'a dyn SurfaceProvider,
    handle: SurfaceHandle,
}

impl<'a> SurfaceScope<'a> {
    /// Acquire the surface from `provider`
    pub fn acquire(provider: &'a dyn SurfaceProvider) -> Result<Self> {
        let handle = provider.acquire()?;
        debug!(surface = handle.raw(), "native surface locked");
        Ok(Self { provider, handle })
    }

    /// The locked surface handle
    #[must_use]
    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        debug!(surface = self.handle.raw(), "native surface released");
        self.provider.release();
    }
}
