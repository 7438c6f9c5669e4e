//! Ordered, optional-segment tokenizer for request paths.
//!
//! The path is split on `/` and offered to four stages in fixed order:
//!
//! ```text
//! region → size → rotation → quality[.format]
//! ```
//!
//! A stage consumes the *first remaining* segment only if that segment matches
//! its grammar. Otherwise the stage is skipped, its default applies, and the
//! same segment is offered to the next stage. Consumed segments are never
//! revisited, so `gray.jpg/full` fails even though both segments are valid on
//! their own.
//!
//! | Stage | Default when skipped |
//! |---|---|
//! | region | `full` |
//! | size | `max` |
//! | rotation | `0` |
//! | quality | `default`, no format |
//!
//! Anything left after the last stage is an error carrying the remainder.

use crate::grammar::GRAMMAR;
use crate::normalize;
use crate::request::{ImageRequest, ParseError, Quality, Region, Rotation, Size, SizeKind};
use log::{debug, trace};
use std::str::FromStr;

/// Parse the part of a request URL that follows the image identifier.
///
/// Empty segments are ignored, so `""` yields the all-default request and a
/// trailing `/` is harmless.
///
/// # Examples
/// ```
/// # use iiif_request::{parse, Quality};
/// let req = parse("125,15,120,140/90,/!345/gray.jpg").unwrap();
/// assert_eq!(req.region_px(), Some([125, 15, 120, 140]));
/// assert_eq!(req.size_px(), Some([Some(90), None]));
/// assert_eq!(req.degree(), 345.0);
/// assert!(req.mirror());
/// assert_eq!(req.quality(), Quality::Gray);
/// assert_eq!(req.format(), Some("jpg"));
///
/// assert!(parse("full/max/0/default.jpg/extra").is_err());
/// ```
pub fn parse(path: &str) -> Result<ImageRequest, ParseError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut rest = segments.as_slice();

    let region = consume(&mut rest, "region", |s| Ok(match_region(s)))?.unwrap_or_default();
    let size = consume(&mut rest, "size", match_size)?.unwrap_or_default();
    let rotation = consume(&mut rest, "rotation", |s| Ok(match_rotation(s)))?.unwrap_or_default();
    let (quality, format) =
        consume(&mut rest, "quality", |s| Ok(match_quality_format(s)))?.unwrap_or_default();

    if !rest.is_empty() {
        let remainder = format!("/{}", rest.join("/"));
        debug!("unparsed request remainder {remainder:?} in {path:?}");
        return Err(ParseError::UnparsedSegment { remainder });
    }

    Ok(ImageRequest::from_parts(region, size, rotation, quality, format))
}

impl FromStr for ImageRequest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Offer the head of `rest` to one stage, advancing past it on a match.
fn consume<T>(
    rest: &mut &[&str],
    stage: &str,
    matcher: impl Fn(&str) -> Result<Option<T>, ParseError>,
) -> Result<Option<T>, ParseError> {
    let remaining: &[&str] = *rest;
    let Some((&segment, tail)) = remaining.split_first() else {
        return Ok(None);
    };
    match matcher(segment)? {
        Some(value) => {
            debug!("{stage} <- {segment:?}");
            *rest = tail;
            Ok(Some(value))
        }
        None => {
            trace!("{stage} skipped, {segment:?} offered to next stage");
            Ok(None)
        }
    }
}

fn match_region(segment: &str) -> Option<Region> {
    let caps = GRAMMAR.region.captures(segment)?;
    if caps.name("full").is_some() {
        Some(Region::Full)
    } else if caps.name("square").is_some() {
        Some(Region::Square)
    } else if let Some(px) = caps.name("px") {
        let [x, y, w, h] = normalize::quad::<u32>(px.as_str())?;
        Some(Region::Pixel { x, y, w, h })
    } else {
        // Far below one, a percentage can underflow to zero
        let [x, y, w, h] = normalize::quad::<f64>(caps.name("pct")?.as_str())
            .filter(|values| values.iter().all(|v| *v > 0.0))?;
        Some(Region::Percent { x, y, w, h })
    }
}

/// Size is the only stage that can fail outright: a `pct:` value outside
/// `(0, 100]`, or too large to represent, is rejected unless `^` allows it.
fn match_size(segment: &str) -> Result<Option<Size>, ParseError> {
    let Some(caps) = GRAMMAR.size.captures(segment) else {
        return Ok(None);
    };
    let upscale = normalize::marker(&caps, "upscale");
    let pixels = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    let kind = if caps.name("max").is_some() {
        Some(SizeKind::Max)
    } else if let Some(pct) = caps.name("pct") {
        match normalize::number(pct.as_str()) {
            Some(value) if upscale || (value > 0.0 && value <= 100.0) => {
                Some(SizeKind::Percent { value })
            }
            Some(_) => return Err(ParseError::InvalidPercentage),
            // Digits that overflow to infinity are far above one hundred
            None if !upscale => return Err(ParseError::InvalidPercentage),
            None => None,
        }
    } else if caps.name("w").is_some() {
        pixels("w").map(|w| SizeKind::Width { w })
    } else if caps.name("h").is_some() {
        pixels("h").map(|h| SizeKind::Height { h })
    } else {
        match (pixels("cw"), pixels("ch")) {
            (Some(w), Some(h)) if normalize::marker(&caps, "confine") => {
                Some(SizeKind::Confined { w, h })
            }
            (Some(w), Some(h)) => Some(SizeKind::Exact { w, h }),
            _ => None,
        }
    };

    Ok(kind.map(|kind| Size { kind, upscale }))
}

fn match_rotation(segment: &str) -> Option<Rotation> {
    let caps = GRAMMAR.rotation.captures(segment)?;
    let raw = normalize::number(caps.name("degree")?.as_str())?;
    Some(Rotation {
        degree: normalize::degree(raw),
        mirror: normalize::marker(&caps, "mirror"),
    })
}

fn match_quality_format(segment: &str) -> Option<(Quality, Option<String>)> {
    let caps = GRAMMAR.quality_format.captures(segment)?;
    let quality = match caps.name("quality") {
        Some(keyword) => Quality::from_keyword(keyword.as_str())?,
        None => Quality::Default,
    };
    let format = caps
        .name("format")
        .or_else(|| caps.name("bare_format"))
        .map(|m| m.as_str().to_string());
    Some((quality, format))
}
