//! Ordering prefixes on documentation file and directory names.
//!
//! Docs may be ordered on disk with an optional numeric prefix (`NNN-`). The
//! prefix sets the default sidebar order and is stripped from document ids and
//! routes:
//!
//! - `010-getting-started.md` → id `getting-started`, label "getting started"
//! - `020-packages/` → route segment `packages`, category "packages"
//! - `faq.md` → id `faq`, unordered (sorted after numbered siblings by name)

/// Result of parsing a name like `020-image-pipeline`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-image-pipeline`)
    pub number: Option<u32>,
    /// Name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Fallback label: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse a file stem or directory name following the `NNN-name` convention.
///
/// - `"020-image-pipeline"` → number=Some(20), name="image-pipeline", display_title="image pipeline"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"faq"` → number=None, name="faq", display_title="faq"
/// - `"zh-Hans"` → number=None, name="zh-Hans", display_title="zh Hans"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-') {
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedName {
                number: Some(num),
                name: rest.to_string(),
                display_title: rest.replace('-', " "),
            };
        }
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

/// Strip ordering prefixes from every segment of a slash-separated path.
///
/// `"010-packages/020-pipeline"` → `"packages/pipeline"`. Segments that are
/// number-only keep their number.
pub fn strip_prefixes(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            let parsed = parse_entry_name(segment);
            if parsed.name.is_empty() {
                segment.to_string()
            } else {
                parsed.name
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
