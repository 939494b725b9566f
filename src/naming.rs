//! File naming for generated puzzles.
//!
//! Every puzzle gets a title of the form `<subject>_s<seed>_r<direction>`.
//! The same string is handed to the generator as `-title`, used as the base
//! name of the generated file, and written into the index page's `href`, so
//! all three always match byte-for-byte:
//!
//! - `italian_basic` / seed `1000` / source-clued → `italian_basic_s1000_r0.html`
//! - `all_lists` / seed `2610190042` / target-clued → `all_lists_s2610190042_r1.html`
//!
//! Seeds are unique within a run, so titles are too.

use crate::types::Direction;

/// Name of the index page in the output directory.
pub const INDEX_FILENAME: &str = "index.html";

const PAGE_EXTENSION: &str = "html";

/// Build the title of a puzzle variant.
pub fn variant_title(subject: &str, seed: u64, direction: Direction) -> String {
    format!("{}_s{}_r{}", subject, seed, direction.flag())
}

/// File name a title is written to.
pub fn page_filename(title: &str) -> String {
    format!("{}.{}", title, PAGE_EXTENSION)
}

/// Result of parsing a variant title like `italian_basic_s1000_r0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTitle {
    pub subject: String,
    pub seed: u64,
    pub direction: Direction,
}

/// Parse a variant title back into its parts.
///
/// Subject names may themselves contain underscores, so the seed and
/// direction suffixes are split off from the right. Returns `None` for
/// anything [`variant_title`] could not have produced.
pub fn parse_variant_title(title: &str) -> Option<ParsedTitle> {
    let (rest, direction) = title.rsplit_once("_r")?;
    let direction = Direction::from_flag(parse_digits(direction)?.try_into().ok()?)?;
    let (subject, seed) = rest.rsplit_once("_s")?;
    if subject.is_empty() {
        return None;
    }
    Some(ParsedTitle {
        subject: subject.to_string(),
        seed: parse_digits(seed)?,
        direction,
    })
}

/// Whether a file name in the output directory belongs to a previous build.
pub fn is_generated_page(filename: &str) -> bool {
    let Some(stem) = filename.strip_suffix(".html") else {
        return false;
    };
    filename == INDEX_FILENAME || parse_variant_title(stem).is_some()
}

// `u64::from_str` accepts a leading `+`, which never appears in a title.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_for_source_clued() {
        assert_eq!(
            variant_title("italian_basic", 1000, Direction::SourceClued),
            "italian_basic_s1000_r0"
        );
    }

    #[test]
    fn title_for_target_clued() {
        assert_eq!(
            variant_title("all_lists", 2610190042, Direction::TargetClued),
            "all_lists_s2610190042_r1"
        );
    }

    #[test]
    fn filename_appends_extension() {
        assert_eq!(
            page_filename("italian_basic_s1001_r0"),
            "italian_basic_s1001_r0.html"
        );
    }

    #[test]
    fn parse_subject_with_underscores() {
        let parsed = parse_variant_title("italian_passato_remoto_s42_r1").unwrap();
        assert_eq!(parsed.subject, "italian_passato_remoto");
        assert_eq!(parsed.seed, 42);
        assert_eq!(parsed.direction, Direction::TargetClued);
    }

    #[test]
    fn parse_inverts_variant_title() {
        let title = variant_title("italian_vulgar", 77, Direction::SourceClued);
        let parsed = parse_variant_title(&title).unwrap();
        assert_eq!(parsed.subject, "italian_vulgar");
        assert_eq!(parsed.seed, 77);
        assert_eq!(parsed.direction, Direction::SourceClued);
    }

    #[test]
    fn parse_rejects_foreign_names() {
        assert_eq!(parse_variant_title("index"), None);
        assert_eq!(parse_variant_title("notes_s12"), None);
        assert_eq!(parse_variant_title("_s12_r0"), None);
        assert_eq!(parse_variant_title("basic_s12_r2"), None);
        assert_eq!(parse_variant_title("basic_s+12_r0"), None);
        assert_eq!(parse_variant_title("basic_sx_r0"), None);
    }

    #[test]
    fn generated_pages_include_index() {
        assert!(is_generated_page("index.html"));
        assert!(is_generated_page("italian_basic_s1000_r0.html"));
    }

    #[test]
    fn other_files_are_not_generated_pages() {
        assert!(!is_generated_page("style.css"));
        assert!(!is_generated_page("about.html"));
        assert!(!is_generated_page("italian_basic_s1000_r0.txt"));
    }
}
