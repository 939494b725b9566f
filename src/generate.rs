//! Index page assembly.
//!
//! The orchestrator appends one [`SubjectSection`] per subject, in catalog
//! order, each holding one [`LinkGroup`] per (direction, recency) bucket with
//! the puzzle links in generation order. Nothing is re-sorted. At the end of
//! a run the page is rendered once and written to `index.html`.
//!
//! ## Page Structure
//!
//! ```text
//! <h1>Italian-English Crossword Puzzles</h1>
//! intro (markdown)
//! section  italian_basic (2311 entries)        ← heading links to the word list
//!   section  Italian (all entries):            ← one per (direction, recency)
//!            [0] [1] [2] ...                   ← coloured tiles → puzzle pages
//!   section  Italian (most recent entries):
//!   ...
//! section  all_lists (9832 entries)            ← aggregate, never linked
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! with automatic escaping of names, labels, and URLs. The stylesheet is
//! embedded from `static/style.css`.

use crate::config::{LanguagesConfig, SiteConfig};
use crate::naming::INDEX_FILENAME;
use crate::types::{Direction, Recency, Subject};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};

const CSS: &str = include_str!("../static/style.css");

/// A link to one generated puzzle page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleLink {
    /// Position within the group, shown on the tile.
    pub index: usize,
    pub href: String,
}

/// Puzzles of one (direction, recency) bucket.
#[derive(Debug, Clone)]
pub struct LinkGroup {
    pub label: String,
    pub links: Vec<PuzzleLink>,
}

impl LinkGroup {
    pub fn push(&mut self, index: usize, href: String) {
        self.links.push(PuzzleLink { index, href });
    }
}

/// Everything the index page shows for one subject.
#[derive(Debug, Clone)]
pub struct SubjectSection {
    pub name: String,
    pub color: String,
    /// `None` when the generator could not be asked (dry run).
    pub entries: Option<usize>,
    pub list_url: Option<String>,
    pub groups: Vec<LinkGroup>,
}

impl SubjectSection {
    pub fn new(subject: &Subject, entries: Option<usize>, list_url: Option<String>) -> Self {
        Self {
            name: subject.name.clone(),
            color: subject.color.clone(),
            entries,
            list_url,
            groups: Vec::new(),
        }
    }

    /// Start a new group and return it for appending links.
    pub fn begin_group(&mut self, label: String) -> &mut LinkGroup {
        self.groups.push(LinkGroup {
            label,
            links: Vec::new(),
        });
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn link_count(&self) -> usize {
        self.groups.iter().map(|g| g.links.len()).sum()
    }
}

/// Label of a group: `Italian (most recent entries)`.
pub fn group_label(languages: &LanguagesConfig, direction: Direction, recency: Recency) -> String {
    format!(
        "{} ({})",
        languages.clue_language(direction),
        recency.label()
    )
}

/// Append-only model of the index page.
#[derive(Debug, Clone)]
pub struct IndexPage {
    title: String,
    intro: String,
    sections: Vec<SubjectSection>,
}

impl IndexPage {
    pub fn new(title: &str, intro: &str) -> Self {
        Self {
            title: title.to_string(),
            intro: intro.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.title, &config.intro)
    }

    pub fn push_section(&mut self, section: SubjectSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[SubjectSection] {
        &self.sections
    }

    pub fn link_count(&self) -> usize {
        self.sections.iter().map(SubjectSection::link_count).sum()
    }

    pub fn render(&self) -> Markup {
        let mut intro_html = String::new();
        md_html::push_html(&mut intro_html, Parser::new(&self.intro));

        let content = html! {
            h1 { (self.title) }
            @if !intro_html.is_empty() {
                div.intro { (PreEscaped(intro_html)) }
            }
            @for section in &self.sections {
                (render_section(section))
            }
            section { br; }
        };
        base_document(&self.title, content)
    }

    /// Render and write `index.html`, replacing any previous version.
    pub fn write(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(INDEX_FILENAME);
        fs::write(&path, self.render().into_string())?;
        Ok(path)
    }
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn render_section(section: &SubjectSection) -> Markup {
    let entries = match section.entries {
        Some(n) => n.to_string(),
        None => "?".to_string(),
    };
    let tile_style = format!("background-color: {}", section.color);

    html! {
        section.subject id=(section.name) {
            br;
            h2 {
                @if let Some(url) = &section.list_url {
                    a href=(url) { (section.name) }
                } @else {
                    (section.name)
                }
                " (" (entries) " entries)"
            }
            @for group in &section.groups {
                section.group {
                    b { (group.label) ":" }
                    br;
                    @for link in &group.links {
                        a href=(link.href) {
                            div.rectangle style=(tile_style) { (link.index) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
