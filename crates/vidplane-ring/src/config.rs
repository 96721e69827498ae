//! Overlay output configuration
//!
//! Provides the video format description consumed at open time and the
//! tunable overlay options with a builder pattern for ergonomic construction.
//!
//! # Examples
//!
//! ```rust
//! use vidplane_ring::{FourCc, OverlayConfig};
//!
//! // Using builder pattern
//! let config = OverlayConfig::builder()
//!     .chroma(FourCc::UYVY)
//!     .display_id(2)
//!     .build();
//!
//! // Using struct literal with defaults
//! let config = OverlayConfig {
//!     orientation: 0,
//!     ..Default::default()
//! };
//! ```

use std::fmt;

/// Four-character pixel format tag
///
/// Identifies the chroma the decoder writes and the overlay presents.
/// The core selects a fixed output chroma at open time and performs no
/// conversion itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Packed 4:2:2, the overlay hardware's native layout
    pub const UYVY: Self = Self(*b"UYVY");

    /// Packed 4:2:2 with swapped luma/chroma ordering
    pub const YUY2: Self = Self(*b"YUY2");

    /// Wrap an arbitrary four-character tag
    #[must_use]
    pub const fn new(tag: [u8; 4]) -> Self {
        Self(tag)
    }

    /// Bytes per pixel for packed formats this crate can describe
    ///
    /// Returns `None` for planar or otherwise unsupported chromas; the
    /// picture allocator turns that into an allocation failure.
    #[must_use]
    pub fn bytes_per_pixel(self) -> Option<u32> {
        match &self.0 {
            b"UYVY" | b"YUY2" => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            // Tags are conventionally printable ASCII; escape anything else.
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", char::from(byte))?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc({self})")
    }
}

/// Video format of the source feeding the overlay
///
/// Captured once at open time. The sample aspect ratio travels with the
/// format so the presentation layer can report it to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Sample aspect ratio numerator
    pub sar_num: u32,

    /// Sample aspect ratio denominator
    pub sar_den: u32,

    /// Pixel layout the decoder writes
    pub chroma: FourCc,
}

impl VideoFormat {
    /// Describe a source frame with square pixels
    #[must_use]
    pub fn new(width: u32, height: u32, chroma: FourCc) -> Self {
        Self {
            width,
            height,
            sar_num: 1,
            sar_den: 1,
            chroma,
        }
    }
}

/// Configuration for the overlay display
///
/// Use [`OverlayConfig::builder()`] for ergonomic construction or struct
/// literal syntax with [`Default::default()`].
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Forced output chroma (default: None, meaning UYVY)
    ///
    /// When set, overrides the source chroma for the overlay buffers.
    /// The overlay hardware presents exactly this layout.
    pub chroma: Option<FourCc>,

    /// Native pixel format code passed to the driver's `create` (default: 0x16)
    ///
    /// Opaque to the core; the value is whatever the driver's overlay
    /// factory expects for the selected chroma.
    pub pixel_format: u32,

    /// Overlay orientation code (default: 0)
    pub orientation: i32,

    /// Display the overlay is routed to (default: 2)
    ///
    /// Forwarded verbatim to the driver's `set_display_target`.
    pub display_id: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            chroma: None,
            pixel_format: 0x16,
            orientation: 0,
            display_id: 2,
        }
    }
}

impl OverlayConfig {
    /// Create a new configuration builder
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vidplane_ring::OverlayConfig;
    ///
    /// let config = OverlayConfig::builder()
    ///     .display_id(1)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> OverlayConfigBuilder {
        OverlayConfigBuilder::default()
    }

    /// Validate configuration and return any issues
    ///
    /// Returns `Ok(())` if configuration is valid, or a list of issues.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if let Some(chroma) = self.chroma {
            if chroma.bytes_per_pixel().is_none() {
                issues.push(format!("chroma {chroma} is not a packed layout"));
            }
        }

        if self.pixel_format == 0 {
            issues.push("pixel_format must be a non-zero driver code".to_string());
        }

        if self.display_id < 0 {
            issues.push("display_id cannot be negative".to_string());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Builder for [`OverlayConfig`]
///
/// Provides a fluent interface for constructing configuration.
#[derive(Debug, Clone, Default)]
pub struct OverlayConfigBuilder {
    chroma: Option<FourCc>,
    pixel_format: Option<u32>,
    orientation: Option<i32>,
    display_id: Option<i32>,
}

impl OverlayConfigBuilder {
    /// Force the output chroma
    #[must_use]
    pub fn chroma(mut self, chroma: FourCc) -> Self {
        self.chroma = Some(chroma);
        self
    }

    /// Set the native pixel format code
    #[must_use]
    pub fn pixel_format(mut self, code: u32) -> Self {
        self.pixel_format = Some(code);
        self
    }

    /// Set the overlay orientation code
    #[must_use]
    pub fn orientation(mut self, orientation: i32) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the target display
    #[must_use]
    pub fn display_id(mut self, display_id: i32) -> Self {
        self.display_id = Some(display_id);
        self
    }

    /// Build the configuration
    ///
    /// Returns an [`OverlayConfig`] with builder values overriding defaults.
    #[must_use]
    pub fn build(self) -> OverlayConfig {
        let defaults = OverlayConfig::default();

        OverlayConfig {
            chroma: self.chroma.or(defaults.chroma),
            pixel_format: self.pixel_format.unwrap_or(defaults.pixel_format),
            orientation: self.orientation.unwrap_or(defaults.orientation),
            display_id: self.display_id.unwrap_or(defaults.display_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();

        assert_eq!(config.chroma, None);
        assert_eq!(config.pixel_format, 0x16);
        assert_eq!(config.orientation, 0);
        assert_eq!(config.display_id, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = OverlayConfig::builder()
            .chroma(FourCc::YUY2)
            .pixel_format(0x17)
            .display_id(1)
            .build();

        assert_eq!(config.chroma, Some(FourCc::YUY2));
        assert_eq!(config.pixel_format, 0x17);
        assert_eq!(config.display_id, 1);
    }

    #[test]
    fn test_config_validation() {
        let valid_config = OverlayConfig::default();
        assert!(valid_config.validate().is_ok());

        let invalid_config = OverlayConfig {
            pixel_format: 0,
            display_id: -1,
            ..Default::default()
        };
        let issues = invalid_config.validate().expect_err("two issues");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_planar_chroma_rejected() {
        let config = OverlayConfig {
            chroma: Some(FourCc::new(*b"I420")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fourcc_display() {
        assert_eq!(FourCc::UYVY.to_string(), "UYVY");
        assert_eq!(FourCc::UYVY.bytes_per_pixel(), Some(2));
        assert_eq!(FourCc::new(*b"I420").bytes_per_pixel(), None);
    }
}
