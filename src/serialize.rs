//! Canonical text form of a parsed request.
//!
//! Serialization is explicit: call [`ImageRequest::as_string`]. The output
//! always spells out all four segments, so re-parsing it yields a request
//! equal to the original field by field, even when the client's text did not
//! (`pct:050` comes back as `pct:50`, rotation `405` as `45`).

use crate::request::{ImageRequest, Region, Rotation, Size, SizeKind};

/// Canonical path of a request with every segment at its default.
pub const DEFAULT_REQUEST: &str = "full/max/0/default";

impl Region {
    pub fn canonical(&self) -> String {
        match self {
            Self::Full => "full".to_string(),
            Self::Square => "square".to_string(),
            Self::Pixel { x, y, w, h } => format!("{x},{y},{w},{h}"),
            Self::Percent { x, y, w, h } => format!("pct:{x},{y},{w},{h}"),
        }
    }
}

impl Size {
    pub fn canonical(&self) -> String {
        let upscale = if self.upscale { "^" } else { "" };
        let body = match self.kind {
            SizeKind::Max => "max".to_string(),
            SizeKind::Percent { value } => format!("pct:{value}"),
            SizeKind::Width { w } => format!("{w},"),
            SizeKind::Height { h } => format!(",{h}"),
            SizeKind::Exact { w, h } => format!("{w},{h}"),
            SizeKind::Confined { w, h } => format!("!{w},{h}"),
        };
        format!("{upscale}{body}")
    }
}

impl Rotation {
    pub fn canonical(&self) -> String {
        if self.mirror {
            format!("!{}", self.degree)
        } else {
            self.degree.to_string()
        }
    }
}

impl ImageRequest {
    /// `region/size/rotation/quality[.format]` in canonical spelling.
    ///
    /// ```
    /// # use iiif_request::parse;
    /// let req = parse("pct:050,10,10,10/^pct:150/720.5/.png").unwrap();
    /// assert_eq!(req.as_string(), "pct:50,10,10,10/^pct:150/0.5/default.png");
    /// ```
    pub fn as_string(&self) -> String {
        match self.format() {
            Some(format) => format!("{}.{format}", self.canonical_path()),
            None => self.canonical_path(),
        }
    }

    /// Whether region, size, rotation and quality are all defaults.
    ///
    /// The format is ignored: `full/max/0/default.png` is a default request.
    pub fn is_default(&self) -> bool {
        self.canonical_path() == DEFAULT_REQUEST
    }

    fn canonical_path(&self) -> String {
        [
            self.region().canonical(),
            self.size().canonical(),
            self.rotation().canonical(),
            self.quality().as_str().to_string(),
        ]
        .join("/")
    }
}
