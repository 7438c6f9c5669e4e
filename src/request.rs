//! The parsed, normalized form of an image request.
//!
//! An [`ImageRequest`] is produced only by [`parse`](crate::parser::parse) and
//! is immutable afterwards. Each path segment is one tagged variant, so
//! combinations such as "pixel region and percent region at once" cannot be
//! expressed.
//!
//! Consumers written against the older flat field layout can still read it
//! through the legacy accessors ([`ImageRequest::region_px`],
//! [`ImageRequest::size_pct`], [`ImageRequest::mirror`], ...), which are
//! computed from the variants.

use serde::Serialize;
use thiserror::Error;

/// Why a request path was rejected.
///
/// The `Display` form is the message handed back to clients:
/// `Invalid IIIF Image API Request: <detail>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A size percentage of zero or above one hundred without the `^` flag.
    #[error("Invalid IIIF Image API Request: disallowed percentage value")]
    InvalidPercentage,
    /// Segments left over after all four stages ran.
    #[error("Invalid IIIF Image API Request: failed to parse '{remainder}'")]
    UnparsedSegment {
        /// The leftover segments joined with `/` and prefixed with `/`.
        remainder: String,
    },
}

/// Discriminant of [`ParseError`], for callers that branch on the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    InvalidPercentage,
    UnparsedSegment,
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidPercentage => ParseErrorKind::InvalidPercentage,
            Self::UnparsedSegment { .. } => ParseErrorKind::UnparsedSegment,
        }
    }

    /// The message without the `Invalid IIIF Image API Request:` prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidPercentage => "disallowed percentage value".to_string(),
            Self::UnparsedSegment { remainder } => format!("failed to parse '{remainder}'"),
        }
    }
}

/// Sub-rectangle of the source image to extract.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    #[default]
    Full,
    Square,
    /// Pixel box. `w` and `h` are always positive.
    Pixel { x: u32, y: u32, w: u32, h: u32 },
    /// Percent box, every value in `(0, 100]`.
    Percent { x: f64, y: f64, w: f64, h: f64 },
}

/// Target dimensions, before the upscale flag is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SizeKind {
    #[default]
    Max,
    Percent { value: f64 },
    /// `w,` — height follows the aspect ratio.
    Width { w: u32 },
    /// `,h` — width follows the aspect ratio.
    Height { h: u32 },
    /// `w,h` — both given, aspect ratio may change.
    Exact { w: u32, h: u32 },
    /// `!w,h` — fit within `w×h`, aspect ratio preserved.
    Confined { w: u32, h: u32 },
}

/// Output size: a [`SizeKind`] plus the `^` upscale permission.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub kind: SizeKind,
    pub upscale: bool,
}

impl Size {
    /// `^max`: the largest size the server allows, upscaling permitted.
    pub fn is_upscale_max(&self) -> bool {
        self.upscale && self.kind == SizeKind::Max
    }

    /// Whether the `!` confine marker was present.
    pub fn limit(&self) -> bool {
        matches!(self.kind, SizeKind::Confined { .. })
    }
}

/// Rotation in degrees, applied after an optional horizontal mirror.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rotation {
    /// Always in `[0, 360)`, rounded to six decimal places.
    pub degree: f64,
    pub mirror: bool,
}

/// Color rendering mode of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Color,
    Gray,
    Bitonal,
    #[default]
    Default,
}

impl Quality {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "color" => Some(Self::Color),
            "gray" => Some(Self::Gray),
            "bitonal" => Some(Self::Bitonal),
            "default" => Some(Self::Default),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Gray => "gray",
            Self::Bitonal => "bitonal",
            Self::Default => "default",
        }
    }
}

/// A fully parsed IIIF image request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImageRequest {
    region: Region,
    size: Size,
    rotation: Rotation,
    quality: Quality,
    format: Option<String>,
}

impl ImageRequest {
    /// Assemble a request from already-validated parts.
    ///
    /// Only the parser calls this; `format` must be non-empty and dot-free.
    pub(crate) fn from_parts(
        region: Region,
        size: Size,
        rotation: Rotation,
        quality: Quality,
        format: Option<String>,
    ) -> Self {
        Self {
            region,
            size,
            rotation,
            quality,
            format,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Requested file extension, absent when the client sent none.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    // -------------------------------------------------------------------------
    // Legacy flat accessors
    // -------------------------------------------------------------------------

    /// `[x, y, w, h]` when the region was given in pixels.
    pub fn region_px(&self) -> Option<[u32; 4]> {
        match self.region {
            Region::Pixel { x, y, w, h } => Some([x, y, w, h]),
            _ => None,
        }
    }

    /// `[x, y, w, h]` when the region was given in percent.
    pub fn region_pct(&self) -> Option<[f64; 4]> {
        match self.region {
            Region::Percent { x, y, w, h } => Some([x, y, w, h]),
            _ => None,
        }
    }

    /// `[width, height]` when the size was given in pixels.
    ///
    /// The dimension the client left out is `None`: `90,` yields
    /// `[Some(90), None]`.
    pub fn size_px(&self) -> Option<[Option<u32>; 2]> {
        match self.size.kind {
            SizeKind::Width { w } => Some([Some(w), None]),
            SizeKind::Height { h } => Some([None, Some(h)]),
            SizeKind::Exact { w, h } | SizeKind::Confined { w, h } => Some([Some(w), Some(h)]),
            SizeKind::Max | SizeKind::Percent { .. } => None,
        }
    }

    pub fn size_pct(&self) -> Option<f64> {
        match self.size.kind {
            SizeKind::Percent { value } => Some(value),
            _ => None,
        }
    }

    pub fn upscale(&self) -> bool {
        self.size.upscale
    }

    pub fn limit(&self) -> bool {
        self.size.limit()
    }

    pub fn mirror(&self) -> bool {
        self.rotation.mirror
    }

    pub fn degree(&self) -> f64 {
        self.rotation.degree
    }
}
