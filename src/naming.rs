//! Filename parsing for media labels and ordering.
//!
//! Files in the public directory may carry an optional numeric prefix
//! (`NNN-`) that controls their position in the gallery. Whatever follows
//! the prefix becomes the label shown under the tile and used as `alt` text:
//!
//! - `010-celik-cati.jpg` → number 10, label "celik cati"
//! - `kaynak_atolye.mp4` → unnumbered, label "kaynak atolye"
//! - `001.jpg` → number 1, label "001" (nothing after the prefix, stem kept)

/// Result of parsing a numbered entry name like `020-Celik-Kapi`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Celik-Kapi`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-Celik-Kapi"` → number=Some(20), name="Celik-Kapi", display_title="Celik Kapi"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"dukkan"` → number=None, name="dukkan", display_title="dukkan"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, raw)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: raw.to_string(),
            display_title: raw.replace('-', " "),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Human-readable label for a media file stem.
///
/// Strips the numeric prefix, turns dashes and underscores into spaces and
/// collapses runs of whitespace. Falls back to the raw stem when nothing
/// readable remains.
pub fn display_label(stem: &str) -> String {
    let parsed = parse_entry_name(stem);
    let label = parsed
        .display_title
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if label.is_empty() {
        stem.to_string()
    } else {
        label
    }
}
