//! Segment grammar for IIIF Image API request paths.
//!
//! A request path has the shape `{region}/{size}/{rotation}/{quality}.{format}`.
//! Each segment type is described here once, as a regular expression composed
//! from a handful of shared numeric fragments:
//!
//! | Fragment | Matches |
//! |---|---|
//! | [`NON_NEG_INT`] | `0`, `7`, `0042` |
//! | [`POS_INT`] | any integer except zero (`1`, `010`) |
//! | [`PERCENT`] | a number in `(0, 100]`: `0.5`, `50`, `100.000` |
//! | [`NON_NEG_FLOAT`] | `0`, `12.5`, `.25`, `720` |
//!
//! The compiled segment patterns live in [`GRAMMAR`], built on first use and
//! read-only afterwards. The parser consults nothing else to decide whether a
//! segment belongs to a stage.

use regex::Regex;
use std::sync::LazyLock;

/// Non-negative integer (pixel offsets). ASCII digits only, unlike `\d`.
pub const NON_NEG_INT: &str = r"[0-9]+";

/// Strictly positive integer (pixel extents). Leading zeros are tolerated.
pub const POS_INT: &str = r"0*[1-9][0-9]*";

/// Percentage in `(0, 100]` with an optional fractional part.
///
/// Three alternatives: exactly one hundred (with optional zero decimals),
/// `1` to `99.x`, and pure fractions below one. Zero in any spelling and
/// anything above one hundred fall through all three.
pub const PERCENT: &str = r"(?:0*100(?:\.0+)?|0*[1-9][0-9]?(?:\.[0-9]+)?|0*\.[0-9]*[1-9][0-9]*)";

/// Non-negative decimal of arbitrary precision. No sign, exponent, `inf` or `NaN`.
pub const NON_NEG_FLOAT: &str = r"(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)";

/// Quality keywords, case-sensitive.
pub const QUALITY: &str = "color|gray|bitonal|default";

/// Format extension: any non-empty run without a dot.
pub const FORMAT_TOKEN: &str = r"[^.]+";

/// Compiled segment patterns, one per parser stage.
///
/// Capture group names are part of the contract with the parser:
///
/// - `region`: `full`, `square`, `px` (the `x,y,w,h` text), `pct` (the four
///   percentages after `pct:`)
/// - `size`: `upscale`, `max`, `pct`, `w`, `h`, `confine`, `cw`, `ch`
/// - `rotation`: `mirror`, `degree`
/// - `quality_format`: `quality`, `format`, `bare_format`
#[derive(Debug)]
pub struct Grammar {
    pub region: Regex,
    pub size: Regex,
    pub rotation: Regex,
    pub quality_format: Regex,
}

impl Grammar {
    fn build() -> Self {
        let px_quad = format!("{NON_NEG_INT},{NON_NEG_INT},{POS_INT},{POS_INT}");
        let pct_quad = format!("{PERCENT},{PERCENT},{PERCENT},{PERCENT}");

        Self {
            region: whole(&format!(
                "(?P<full>full)|(?P<square>square)|(?P<px>{px_quad})|pct:(?P<pct>{pct_quad})"
            )),
            size: whole(&format!(
                r"(?P<upscale>\^)?(?:(?P<max>max)|pct:(?P<pct>{NON_NEG_FLOAT})|(?P<w>{POS_INT}),|,(?P<h>{POS_INT})|(?P<confine>!)?(?P<cw>{POS_INT}),(?P<ch>{POS_INT}))"
            )),
            rotation: whole(&format!("(?P<mirror>!)?(?P<degree>{NON_NEG_FLOAT})")),
            quality_format: whole(&format!(
                r"(?P<quality>{QUALITY})(?:\.(?P<format>{FORMAT_TOKEN}))?|\.(?P<bare_format>{FORMAT_TOKEN})"
            )),
        }
    }
}

/// Anchor `pattern` so it must span the entire segment.
pub fn whole(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("segment grammar must compile")
}

/// The segment grammar, compiled once per process.
pub static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::build);

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Numeric fragments
    // =========================================================================

    #[test]
    fn percent_accepts_open_zero_closed_hundred() {
        let re = whole(PERCENT);
        for ok in ["0.5", ".5", "00.05", "1", "50", "99.999", "100", "100.000", "050"] {
            assert!(re.is_match(ok), "expected {ok} to match");
        }
    }

    #[test]
    fn percent_rejects_zero_and_above_hundred() {
        let re = whole(PERCENT);
        for bad in ["0", "00", "0.0", ".000", "100.5", "101", "250", "-5", "", "1e2"] {
            assert!(!re.is_match(bad), "expected {bad} to be rejected");
        }
    }

    #[test]
    fn pos_int_rejects_zero() {
        let re = whole(POS_INT);
        assert!(re.is_match("1"));
        assert!(re.is_match("010"));
        assert!(!re.is_match("0"));
        assert!(!re.is_match("000"));
    }

    #[test]
    fn digits_are_ascii_only() {
        assert!(!whole(NON_NEG_INT).is_match("\u{0663}"));
        assert!(!whole(NON_NEG_FLOAT).is_match("1.\u{0663}"));
    }

    #[test]
    fn non_neg_float_shapes() {
        let re = whole(NON_NEG_FLOAT);
        for ok in ["0", "720", "12.5", ".25", "0001.10"] {
            assert!(re.is_match(ok), "expected {ok} to match");
        }
        for bad in ["-1", "1.", "inf", "NaN", "1e3", ""] {
            assert!(!re.is_match(bad), "expected {bad} to be rejected");
        }
    }

    // =========================================================================
    // Segment patterns
    // =========================================================================

    #[test]
    fn region_variants() {
        let re = &GRAMMAR.region;
        assert!(re.is_match("full"));
        assert!(re.is_match("square"));
        assert!(re.is_match("0,0,10,10"));
        assert!(re.is_match("pct:10,20.5,30,100"));
        assert!(!re.is_match("0,0,0,10"));
        assert!(!re.is_match("pct:0,10,10,10"));
        assert!(!re.is_match("Full"));
        assert!(!re.is_match("1,2,3"));
    }

    #[test]
    fn region_captures_raw_quads() {
        let caps = GRAMMAR.region.captures("125,15,120,140").unwrap();
        assert_eq!(&caps["px"], "125,15,120,140");
        let caps = GRAMMAR.region.captures("pct:1,2,3,4").unwrap();
        assert_eq!(&caps["pct"], "1,2,3,4");
    }

    #[test]
    fn size_variants() {
        let re = &GRAMMAR.size;
        for ok in [
            "max", "^max", "pct:50", "^pct:150", "90,", ",90", "90,60", "!90,60", "^!90,60",
            "^90,",
        ] {
            assert!(re.is_match(ok), "expected {ok} to match");
        }
        for bad in ["full", "0,", ",0", "!90,", "pct:", "90", "!max", "^^max"] {
            assert!(!re.is_match(bad), "expected {bad} to be rejected");
        }
    }

    #[test]
    fn rotation_variants() {
        let re = &GRAMMAR.rotation;
        assert!(re.is_match("0"));
        assert!(re.is_match("!345"));
        assert!(re.is_match("22.5"));
        assert!(re.is_match("7200"));
        assert!(!re.is_match("-90"));
        assert!(!re.is_match("!!90"));
    }

    #[test]
    fn quality_format_variants() {
        let re = &GRAMMAR.quality_format;
        let caps = re.captures("gray.jpg").unwrap();
        assert_eq!(&caps["quality"], "gray");
        assert_eq!(&caps["format"], "jpg");

        let caps = re.captures("bitonal").unwrap();
        assert!(caps.name("format").is_none());

        let caps = re.captures(".png").unwrap();
        assert!(caps.name("quality").is_none());
        assert_eq!(&caps["bare_format"], "png");

        assert!(!re.is_match("gray."));
        assert!(!re.is_match("gray.tar.gz"));
        assert!(!re.is_match("grey.jpg"));
        assert!(!re.is_match("."));
    }
}
