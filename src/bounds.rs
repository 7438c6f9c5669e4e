//! Post-parse bounds check against the source image.
//!
//! Parsing never looks at the image. Once the server knows the dimensions it
//! calls [`ImageRequest::fits`] to reject requests that point outside the
//! picture.

use crate::request::{ImageRequest, Region};
use log::trace;
use serde::Serialize;

/// Dimensions of the source image, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ImageRequest {
    /// Whether the request can be served from an image of the given size.
    ///
    /// Only the *offset* of a pixel region is checked: `x < width` and
    /// `y < height`. A box that starts inside the image but runs past its
    /// edge still fits. `full`, `square` and percent regions always fit.
    ///
    /// Size is not checked against the region, so a non-upscale size larger
    /// than the region passes.
    pub fn fits(&self, info: &ImageInfo) -> bool {
        if let Region::Pixel { x, y, .. } = self.region() {
            if x >= info.width || y >= info.height {
                trace!(
                    "region offset {x},{y} outside {}x{} image",
                    info.width, info.height
                );
                return false;
            }
        }
        true
    }
}
