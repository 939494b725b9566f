//! Shared test utilities.
//!
//! Provides small site fixtures and extractors for rendered HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = small_site();
//! let html = IndexPage::from_config(&site).render().into_string();
//! assert!(hrefs(&html, "_s").is_empty());
//! ```

use crate::config::SiteConfig;
use crate::types::Subject;

// =========================================================================
// Fixtures
// =========================================================================

/// Two subjects and the aggregate: `italian_basic` (recent),
/// `italian_vulgar`, `all_lists`.
pub fn small_subjects() -> Vec<Subject> {
    vec![
        Subject::new("italian_basic", "#a99887", true),
        Subject::new("italian_vulgar", "#95b8e3", false),
        Subject::aggregate("all_lists", "#c095e3"),
    ]
}

/// Stock site config over [`small_subjects`], without a generator build step.
pub fn small_site() -> SiteConfig {
    let mut site = SiteConfig {
        subjects: small_subjects(),
        ..SiteConfig::default()
    };
    site.generator.build = Vec::new();
    site
}

// =========================================================================
// HTML extractors
// =========================================================================

/// All `href` values containing `needle`, in document order.
pub fn hrefs(html: &str, needle: &str) -> Vec<String> {
    html.split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter(|href| href.contains(needle))
        .map(str::to_string)
        .collect()
}

#[test]
fn hrefs_in_order() {
    let html = r#"<a href="a_s1.html">1</a><link href="x.css"><a href="b_s2.html">2</a>"#;
    assert_eq!(hrefs(html, "_s"), vec!["a_s1.html", "b_s2.html"]);
}
