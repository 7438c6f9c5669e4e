//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines, for testability,
//! and a `print_*` wrapper that writes them to stdout. JSON reports are plain
//! `serde` structs rendered with `serde_json`.
//!
//! ## Text output
//!
//! ```text
//! Request   125,15,120,140/90,/!345/gray.jpg
//!     Region:   pixels 125,15 120x140
//!     Size:     90 wide
//!     Rotation: 345° mirrored
//!     Quality:  gray
//!     Format:   jpg
//! ```

use crate::bounds::ImageInfo;
use crate::calculations::Resolved;
use crate::request::{ImageRequest, Region, SizeKind};
use serde::Serialize;

/// JSON view of a parsed request, with the legacy flat fields alongside the
/// structured ones.
#[derive(Debug, Serialize)]
pub struct RequestReport<'a> {
    pub canonical: String,
    pub is_default: bool,
    pub request: &'a ImageRequest,
    pub region_px: Option<[u32; 4]>,
    pub region_pct: Option<[f64; 4]>,
    pub size_px: Option<[Option<u32>; 2]>,
    pub size_pct: Option<f64>,
    pub upscale: bool,
    pub limit: bool,
    pub mirror: bool,
    pub degree: f64,
}

impl<'a> RequestReport<'a> {
    pub fn new(request: &'a ImageRequest) -> Self {
        Self {
            canonical: request.as_string(),
            is_default: request.is_default(),
            request,
            region_px: request.region_px(),
            region_pct: request.region_pct(),
            size_px: request.size_px(),
            size_pct: request.size_pct(),
            upscale: request.upscale(),
            limit: request.limit(),
            mirror: request.mirror(),
            degree: request.degree(),
        }
    }
}

/// JSON view of a bounds check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub canonical: String,
    pub image: ImageInfo,
    pub fits: bool,
    pub resolved: Option<Resolved>,
}

impl CheckReport {
    pub fn new(request: &ImageRequest, image: ImageInfo) -> Self {
        Self {
            canonical: request.as_string(),
            image,
            fits: request.fits(&image),
            resolved: request.resolve(&image),
        }
    }
}

// ============================================================================
// Text formatting
// ============================================================================

fn describe_region(region: &Region) -> String {
    match region {
        Region::Full => "full image".to_string(),
        Region::Square => "centered square".to_string(),
        Region::Pixel { x, y, w, h } => format!("pixels {x},{y} {w}x{h}"),
        Region::Percent { x, y, w, h } => format!("percent {x},{y} {w}x{h}"),
    }
}

fn describe_size(request: &ImageRequest) -> String {
    let size = request.size();
    let body = match size.kind {
        SizeKind::Max => "max".to_string(),
        SizeKind::Percent { value } => format!("{value}%"),
        SizeKind::Width { w } => format!("{w} wide"),
        SizeKind::Height { h } => format!("{h} high"),
        SizeKind::Exact { w, h } => format!("exactly {w}x{h}"),
        SizeKind::Confined { w, h } => format!("within {w}x{h}"),
    };
    if size.upscale {
        format!("{body}, upscaling allowed")
    } else {
        body
    }
}

/// Summary of a parsed request.
pub fn format_request(request: &ImageRequest) -> Vec<String> {
    let rotation = request.rotation();
    let mut lines = vec![
        format!("Request   {}", request.as_string()),
        format!("    Region:   {}", describe_region(&request.region())),
        format!("    Size:     {}", describe_size(request)),
        format!(
            "    Rotation: {}°{}",
            rotation.degree,
            if rotation.mirror { " mirrored" } else { "" }
        ),
        format!("    Quality:  {}", request.quality().as_str()),
    ];
    if let Some(format) = request.format() {
        lines.push(format!("    Format:   {format}"));
    }
    if request.is_default() {
        lines.push("    (default request)".to_string());
    }
    lines
}

/// Verdict of `check`, with resolved dimensions when the region hits the image.
pub fn format_check(report: &CheckReport) -> Vec<String> {
    let verdict = if report.fits { "fits" } else { "does not fit" };
    let mut lines = vec![format!(
        "{} {} {}x{}",
        report.canonical, verdict, report.image.width, report.image.height
    )];
    if let Some(resolved) = &report.resolved {
        let r = &resolved.region;
        lines.push(format!("    Crop:   {},{} {}x{}", r.x, r.y, r.width, r.height));
        lines.push(format!("    Output: {}x{}", resolved.width, resolved.height));
    }
    lines
}

pub fn print_request(request: &ImageRequest) {
    for line in format_request(request) {
        println!("{}", line);
    }
}

pub fn print_check(report: &CheckReport) {
    for line in format_check(report) {
        println!("{}", line);
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
