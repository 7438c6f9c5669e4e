//! Pure dimension math for serving a parsed request.
//!
//! Image backends need concrete pixel numbers: which box to cut out of the
//! source and how large the output should be. All functions here are pure and
//! testable without any image.
//!
//! These helpers do not enforce size limits. A non-upscale size larger than
//! the region resolves to the larger size, the same way [`ImageRequest::fits`]
//! lets it through.

use crate::bounds::ImageInfo;
use crate::request::{ImageRequest, Region, Size, SizeKind};
use serde::Serialize;

/// A concrete crop box in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Region and output size of a request resolved against one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub region: PixelBox,
    pub width: u32,
    pub height: u32,
}

/// Turn a region into a crop box clipped to the image.
///
/// Returns `None` when nothing of the region lies inside the image.
///
/// # Examples
/// ```
/// # use iiif_request::{ImageInfo, Region};
/// # use iiif_request::calculations::{resolve_region, PixelBox};
/// // Square of a landscape image is centered horizontally
/// let square = resolve_region(&Region::Square, &ImageInfo::new(400, 300)).unwrap();
/// assert_eq!(square, PixelBox { x: 50, y: 0, width: 300, height: 300 });
/// ```
pub fn resolve_region(region: &Region, info: &ImageInfo) -> Option<PixelBox> {
    let (img_w, img_h) = (info.width, info.height);

    let (x, y, w, h) = match *region {
        Region::Full => (0, 0, img_w, img_h),
        Region::Square => {
            let side = img_w.min(img_h);
            ((img_w - side) / 2, (img_h - side) / 2, side, side)
        }
        Region::Pixel { x, y, w, h } => (x, y, w, h),
        Region::Percent { x, y, w, h } => (
            scale(img_w, x / 100.0),
            scale(img_h, y / 100.0),
            scale(img_w, w / 100.0),
            scale(img_h, h / 100.0),
        ),
    };

    if x >= img_w || y >= img_h {
        return None;
    }
    // Clip the far edge to the image
    let width = w.min(img_w - x);
    let height = h.min(img_h - y);
    if width == 0 || height == 0 {
        return None;
    }

    Some(PixelBox {
        x,
        y,
        width,
        height,
    })
}

/// Output dimensions for a region of `region_w × region_h` pixels.
///
/// Aspect-preserving variants round to the nearest pixel and never go below
/// one pixel in either direction.
pub fn resolve_size(size: &Size, region_w: u32, region_h: u32) -> (u32, u32) {
    let (rw, rh) = (region_w as f64, region_h as f64);

    match size.kind {
        SizeKind::Max => (region_w, region_h),
        SizeKind::Percent { value } => {
            let ratio = value / 100.0;
            (at_least_one(rw * ratio), at_least_one(rh * ratio))
        }
        SizeKind::Width { w } => (w, at_least_one(rh * w as f64 / rw)),
        SizeKind::Height { h } => (at_least_one(rw * h as f64 / rh), h),
        SizeKind::Exact { w, h } => (w, h),
        SizeKind::Confined { w, h } => {
            // Scale by the tighter of the two bounds
            let ratio = (w as f64 / rw).min(h as f64 / rh);
            (
                at_least_one(rw * ratio).min(w),
                at_least_one(rh * ratio).min(h),
            )
        }
    }
}

impl ImageRequest {
    /// Resolve region and size against an image. `None` when the region
    /// misses the image entirely.
    pub fn resolve(&self, info: &ImageInfo) -> Option<Resolved> {
        let region = resolve_region(&self.region(), info)?;
        let (width, height) = resolve_size(&self.size(), region.width, region.height);
        Some(Resolved {
            region,
            width,
            height,
        })
    }
}

fn scale(extent: u32, ratio: f64) -> u32 {
    (extent as f64 * ratio).round() as u32
}

fn at_least_one(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn image(width: u32, height: u32) -> ImageInfo {
        ImageInfo::new(width, height)
    }

    // =========================================================================
    // resolve_region tests
    // =========================================================================

    #[test]
    fn full_covers_image() {
        assert_eq!(
            resolve_region(&Region::Full, &image(800, 600)),
            Some(PixelBox { x: 0, y: 0, width: 800, height: 600 })
        );
    }

    #[test]
    fn square_portrait_centered_vertically() {
        // 300x500 → 300x300 starting 100px down
        assert_eq!(
            resolve_region(&Region::Square, &image(300, 500)),
            Some(PixelBox { x: 0, y: 100, width: 300, height: 300 })
        );
    }

    #[test]
    fn pixel_region_clipped_to_image() {
        let region = Region::Pixel { x: 50, y: 50, w: 100, h: 100 };
        assert_eq!(
            resolve_region(&region, &image(120, 80)),
            Some(PixelBox { x: 50, y: 50, width: 70, height: 30 })
        );
    }

    #[test]
    fn pixel_region_outside_image() {
        let region = Region::Pixel { x: 200, y: 0, w: 10, h: 10 };
        assert_eq!(resolve_region(&region, &image(100, 100)), None);
    }

    #[test]
    fn percent_region_scales_and_rounds() {
        // 25% of 1000 = 250, 50% of 333 = 166.5 → 167
        let region = Region::Percent { x: 25.0, y: 0.5, w: 50.0, h: 50.0 };
        assert_eq!(
            resolve_region(&region, &image(1000, 333)),
            Some(PixelBox { x: 250, y: 2, width: 500, height: 167 })
        );
    }

    #[test]
    fn percent_region_rounding_to_zero_is_empty() {
        let region = Region::Percent { x: 1.0, y: 1.0, w: 0.1, h: 0.1 };
        assert_eq!(resolve_region(&region, &image(100, 100)), None);
    }

    // =========================================================================
    // resolve_size tests
    // =========================================================================

    fn size(kind: SizeKind) -> Size {
        Size { kind, upscale: false }
    }

    #[test]
    fn max_keeps_region_size() {
        assert_eq!(resolve_size(&size(SizeKind::Max), 640, 480), (640, 480));
    }

    #[test]
    fn percent_scales_both_edges() {
        assert_eq!(
            resolve_size(&size(SizeKind::Percent { value: 50.0 }), 640, 480),
            (320, 240)
        );
    }

    #[test]
    fn width_only_preserves_aspect() {
        // 2000x1500 → 1000 wide, 750 high
        assert_eq!(
            resolve_size(&size(SizeKind::Width { w: 1000 }), 2000, 1500),
            (1000, 750)
        );
    }

    #[test]
    fn height_only_preserves_aspect() {
        assert_eq!(
            resolve_size(&size(SizeKind::Height { h: 1000 }), 1500, 2000),
            (750, 1000)
        );
    }

    #[test]
    fn exact_ignores_aspect() {
        assert_eq!(
            resolve_size(&size(SizeKind::Exact { w: 100, h: 400 }), 800, 600),
            (100, 400)
        );
    }

    #[test]
    fn confined_fits_inside_bounds() {
        // 800x600 (4:3) inside 400x400 → width-bound: 400x300
        assert_eq!(
            resolve_size(&size(SizeKind::Confined { w: 400, h: 400 }), 800, 600),
            (400, 300)
        );
        // 600x800 (3:4) inside 400x400 → height-bound: 300x400
        assert_eq!(
            resolve_size(&size(SizeKind::Confined { w: 400, h: 400 }), 600, 800),
            (300, 400)
        );
    }

    #[test]
    fn extreme_aspect_never_collapses() {
        assert_eq!(
            resolve_size(&size(SizeKind::Width { w: 10 }), 10000, 10),
            (10, 1)
        );
    }

    // =========================================================================
    // ImageRequest::resolve tests
    // =========================================================================

    #[test]
    fn resolve_combines_region_and_size() {
        let req = parse("square/,100/!90/gray.png").unwrap();
        let resolved = req.resolve(&image(400, 200)).unwrap();
        assert_eq!(resolved.region, PixelBox { x: 100, y: 0, width: 200, height: 200 });
        assert_eq!((resolved.width, resolved.height), (100, 100));
    }

    #[test]
    fn resolve_misses_image() {
        let req = parse("500,500,10,10").unwrap();
        assert_eq!(req.resolve(&image(100, 100)), None);
    }
}
