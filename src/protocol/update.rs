//! Display update types and frame decoding.
//!
//! Inbound frames deserialize against a closed set of recognized keys; each
//! present key becomes one [`DisplayUpdate`] variant. Unrecognized keys are
//! ignored. A frame that does not deserialize - not a JSON object, or a
//! recognized key carrying a non-string value - is returned whole as
//! [`Decoded::Fallback`] for verbatim rendering.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::from_str;

// ============================================================================
// DisplayUpdate
// ============================================================================

/// One dispatchable display update decoded from an inbound frame.
///
/// Dispatch order within a frame is fixed: `Svg`, `Style`, `TermLine`,
/// `Term2Line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    /// Replace the entire visual surface content.
    Svg(String),

    /// Append a rule set to the document-wide style surface.
    Style(String),

    /// Append a line to the primary text stream.
    TermLine(String),

    /// Append a line to the secondary text stream.
    Term2Line(String),
}

impl DisplayUpdate {
    /// Returns the wire key this update was decoded from.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Svg(_) => "svg",
            Self::Style(_) => "style",
            Self::TermLine(_) => "term",
            Self::Term2Line(_) => "term2",
        }
    }

    /// Returns the update's text payload.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &str {
        match self {
            Self::Svg(s) | Self::Style(s) | Self::TermLine(s) | Self::Term2Line(s) => s,
        }
    }
}

// ============================================================================
// Decoded
// ============================================================================

/// Result of decoding one raw inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Frame decoded; zero or more updates were recognized.
    Updates(Vec<DisplayUpdate>),

    /// Frame did not decode; the raw payload is rendered verbatim on the
    /// visual surface. Not an error condition.
    Fallback(String),
}

// ============================================================================
// RawFrame
// ============================================================================

/// Wire shape of one inbound frame. All keys optional; extras ignored.
#[derive(Debug, Deserialize)]
struct RawFrame {
    svg: Option<String>,
    style: Option<String>,
    term: Option<String>,
    term2: Option<String>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes one raw text frame into display updates.
///
/// Recognized keys are extracted in a fixed order so multi-key frames
/// dispatch deterministically.
#[must_use]
pub fn decode_frame(raw: &str) -> Decoded {
    let Ok(frame) = from_str::<RawFrame>(raw) else {
        return Decoded::Fallback(raw.to_string());
    };

    let mut updates = Vec::new();

    if let Some(svg) = frame.svg {
        updates.push(DisplayUpdate::Svg(svg));
    }
    if let Some(style) = frame.style {
        updates.push(DisplayUpdate::Style(style));
    }
    if let Some(term) = frame.term {
        updates.push(DisplayUpdate::TermLine(term));
    }
    if let Some(term2) = frame.term2 {
        updates.push(DisplayUpdate::Term2Line(term2));
    }

    Decoded::Updates(updates)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_term() {
        let decoded = decode_frame(r#"{"term": "hello   "}"#);

        assert_eq!(
            decoded,
            Decoded::Updates(vec![DisplayUpdate::TermLine("hello   ".into())])
        );
    }

    #[test]
    fn test_decode_svg_and_style() {
        let decoded = decode_frame(r#"{"svg": "<rect/>", "style": ".x{color:red}"}"#);

        assert_eq!(
            decoded,
            Decoded::Updates(vec![
                DisplayUpdate::Svg("<rect/>".into()),
                DisplayUpdate::Style(".x{color:red}".into()),
            ])
        );
    }

    #[test]
    fn test_decode_all_keys_fixed_order() {
        // Key order in the frame must not affect dispatch order.
        let decoded =
            decode_frame(r#"{"term2": "b", "term": "a", "style": "s", "svg": "v"}"#);

        assert_eq!(
            decoded,
            Decoded::Updates(vec![
                DisplayUpdate::Svg("v".into()),
                DisplayUpdate::Style("s".into()),
                DisplayUpdate::TermLine("a".into()),
                DisplayUpdate::Term2Line("b".into()),
            ])
        );
    }

    #[test]
    fn test_decode_unrecognized_keys_ignored() {
        let decoded = decode_frame(r#"{"foo": "bar", "term": "line"}"#);

        assert_eq!(
            decoded,
            Decoded::Updates(vec![DisplayUpdate::TermLine("line".into())])
        );
    }

    #[test]
    fn test_decode_empty_object() {
        let decoded = decode_frame("{}");
        assert_eq!(decoded, Decoded::Updates(vec![]));
    }

    #[test]
    fn test_decode_non_string_value_falls_back() {
        // A recognized key with a non-string value fails the frame whole,
        // matching the all-or-nothing decode contract.
        let decoded = decode_frame(r#"{"term": 42, "svg": "<g/>"}"#);
        assert_eq!(
            decoded,
            Decoded::Fallback(r#"{"term": 42, "svg": "<g/>"}"#.into())
        );
    }

    #[test]
    fn test_decode_non_json_falls_back() {
        let decoded = decode_frame("plain text");
        assert_eq!(decoded, Decoded::Fallback("plain text".into()));
    }

    #[test]
    fn test_decode_json_array_falls_back() {
        // Arrays are valid JSON but not tagged objects.
        let decoded = decode_frame(r#"["term", "hello"]"#);
        assert_eq!(decoded, Decoded::Fallback(r#"["term", "hello"]"#.into()));
    }

    #[test]
    fn test_update_key_and_payload() {
        let update = DisplayUpdate::Term2Line("x".into());
        assert_eq!(update.key(), "term2");
        assert_eq!(update.payload(), "x");
    }
}
