//! # iiif-request
//!
//! Parse, validate and canonically re-serialize IIIF Image API requests.
//! A request is the part of an image URL that follows the identifier:
//!
//! ```text
//! {region}/{size}/{rotation}/{quality}.{format}
//! ```
//!
//! The crate never touches pixels, files or the network. Image servers hand it
//! the request text, get back a typed [`ImageRequest`] or a [`ParseError`], and
//! later ask [`ImageRequest::fits`] once they know the image dimensions.
//!
//! # Pipeline
//!
//! ```text
//! grammar → parser → normalize → { bounds, serialize }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`grammar`] | Segment patterns, compiled once and shared |
//! | [`parser`] | Ordered optional-segment tokenizer, [`parse`] |
//! | [`normalize`] | Text to numbers: percentages, degrees, flags |
//! | [`request`] | [`ImageRequest`] and its segment types |
//! | [`bounds`] | [`ImageInfo`] and the region offset check |
//! | [`serialize`] | Canonical string form and default detection |
//! | [`calculations`] | Crop box and output size for a known image |
//! | [`config`] | `iiif.toml` for the command-line tool |
//! | [`output`] | Command-line output formatting |
//!
//! # Forgiving Parsing
//!
//! Every segment is optional. Stages run in fixed order and a segment that
//! does not fit one stage is offered to the next, so `90/gray.png` is a valid
//! request (full region, max size, rotated 90°). Numbers are accepted with
//! leading zeros and trailing decimal zeros and come back normalized:
//!
//! ```
//! # use iiif_request::parse;
//! let req = parse("90/gray.png").unwrap();
//! assert_eq!(req.as_string(), "full/max/90/gray.png");
//! assert!(!req.is_default());
//! ```
//!
//! # Concurrency
//!
//! Parsing is a pure function and an [`ImageRequest`] is immutable, so both are
//! freely shared across threads. The only global is the compiled grammar,
//! which is initialized once and read-only afterwards.

pub mod bounds;
pub mod calculations;
pub mod config;
pub mod grammar;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod request;
pub mod serialize;

pub use bounds::ImageInfo;
pub use parser::parse;
pub use request::{
    ImageRequest, ParseError, ParseErrorKind, Quality, Region, Rotation, Size, SizeKind,
};
pub use serialize::DEFAULT_REQUEST;
