//! Shared types used across the build.
//!
//! [`Subject`] is deserialized straight from the `[[subjects]]` tables of the
//! site config; the rest are produced by the orchestrator while it enumerates
//! puzzle variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile offset into a subject's entry list used for the "most recent"
/// bucket. The generator samples entries from this point to the end.
pub const RECENT_START_PCT: u32 = 85;

/// A named content category from which puzzles are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subject {
    /// Word list name, passed verbatim to the generator.
    pub name: String,
    /// CSS colour of the puzzle tiles on the index page.
    pub color: String,
    /// Whether a "most recent entries" bucket is generated.
    #[serde(default)]
    pub recent: bool,
    /// The aggregate subject covers every other subject in the catalog.
    #[serde(default, skip_serializing_if = "is_false")]
    pub aggregate: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Subject {
    pub fn new(name: &str, color: &str, recent: bool) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            recent,
            aggregate: false,
        }
    }

    pub fn aggregate(name: &str, color: &str) -> Self {
        Self {
            aggregate: true,
            ..Self::new(name, color, false)
        }
    }

    /// Recency buckets generated for this subject, in generation order.
    pub fn recency_buckets(&self) -> &'static [Recency] {
        if self.recent {
            &[Recency::All, Recency::MostRecent]
        } else {
            &[Recency::All]
        }
    }
}

/// Which language the clues are phrased in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Clues in the word list's source language (`-reverse 0`).
    SourceClued,
    /// Clues in the glossed language (`-reverse 1`).
    TargetClued,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::SourceClued, Direction::TargetClued];

    /// Value of the generator's `-reverse` flag.
    pub fn flag(self) -> u8 {
        match self {
            Direction::SourceClued => 0,
            Direction::TargetClued => 1,
        }
    }

    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Direction::SourceClued),
            1 => Some(Direction::TargetClued),
            _ => None,
        }
    }
}

/// Which slice of a subject's entries a puzzle samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recency {
    All,
    MostRecent,
}

impl Recency {
    pub fn start_pct(self) -> u32 {
        match self {
            Recency::All => 0,
            Recency::MostRecent => RECENT_START_PCT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recency::All => "all entries",
            Recency::MostRecent => "most recent entries",
        }
    }
}

/// One concrete puzzle to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Catalog subject this variant belongs to.
    pub subject: String,
    /// Subjects argument handed to the generator: the subject's own name, or
    /// the comma-joined list for the aggregate subject.
    pub specifier: String,
    pub side: u32,
    pub seed: u64,
    pub direction: Direction,
    pub recency: Recency,
    pub start_pct: u32,
    /// Position within its (direction, recency) group.
    pub index: usize,
    /// Generator title and base name of the generated file.
    pub title: String,
}

impl Variant {
    pub fn filename(&self) -> String {
        crate::naming::page_filename(&self.title)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SourceClued => f.write_str("source-clued"),
            Direction::TargetClued => f.write_str("target-clued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_subject_gets_both_buckets() {
        let subject = Subject::new("italian_basic", "#a99887", true);
        assert_eq!(
            subject.recency_buckets(),
            &[Recency::All, Recency::MostRecent]
        );
    }

    #[test]
    fn non_recent_subject_gets_all_bucket_only() {
        let subject = Subject::new("italian_vulgar", "#95b8e3", false);
        assert_eq!(subject.recency_buckets(), &[Recency::All]);
    }

    #[test]
    fn start_pct_per_bucket() {
        assert_eq!(Recency::All.start_pct(), 0);
        assert_eq!(Recency::MostRecent.start_pct(), 85);
    }

    #[test]
    fn direction_flags() {
        assert_eq!(Direction::SourceClued.flag(), 0);
        assert_eq!(Direction::TargetClued.flag(), 1);
        assert_eq!(Direction::from_flag(1), Some(Direction::TargetClued));
        assert_eq!(Direction::from_flag(2), None);
    }

    #[test]
    fn subject_deserializes_with_defaults() {
        let subject: Subject = toml::from_str(
            r##"
name = "italian_basic"
color = "#a99887"
"##,
        )
        .unwrap();
        assert!(!subject.recent);
        assert!(!subject.aggregate);
    }
}
