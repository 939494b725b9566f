//! CLI output formatting for a site build.
//!
//! # Output Format
//!
//! ```text
//! ==> Cleaned 2 stale pages
//! $ make gen_puz
//! ==> Built generator: make gen_puz
//! $ ./gen_puz italian_basic -print_entry_cnt_and_exit 1
//! italian_basic (2311 entries)
//!     Italian (all entries)
//! $ ./gen_puz italian_basic -side 17 -seed 2610190000 ... > www/italian_basic_s2610190000_r0.html
//!         000 italian_basic_s2610190000_r0
//!     ...
//! ==> Wrote www/index.html (700 puzzles)
//!
//! Generated 700 puzzles for 7 subjects
//!     italian_basic: 2311 entries, 200 puzzles
//!     ...
//! Seeds 2610190000..=2610190699 (next: 2610190700)
//! ```
//!
//! Every generator command line is echoed with a `$ ` prefix before it runs,
//! so a hung or failing command is the last line shown. Subjects lead, with
//! groups and puzzles indented under them.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*`
//! wrappers write them to stdout.

use crate::orchestrate::{BuildEvent, BuildSummary};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `italian_basic (2311 entries)`, or `(? entries)` when unknown.
fn subject_header(name: &str, entries: Option<usize>) -> String {
    match entries {
        Some(n) => format!("{} ({} entries)", name, n),
        None => format!("{} (? entries)", name),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Progress events
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::OutputCleaned { removed } => {
            vec![format!("==> Cleaned {}", plural(*removed, "stale page"))]
        }
        BuildEvent::Invoking { command } => vec![format!("$ {}", command)],
        BuildEvent::GeneratorBuilt { command } => {
            vec![format!("==> Built generator: {}", command)]
        }
        BuildEvent::SubjectStarted {
            name,
            specifier,
            entries,
        } => {
            let mut lines = vec![subject_header(name, *entries)];
            if specifier != name {
                lines.push(format!("{}Subjects: {}", indent(1), specifier));
            }
            lines
        }
        BuildEvent::EntryCountUnavailable { subject, reason } => {
            vec![format!("{}: entry count unavailable ({})", subject, reason)]
        }
        BuildEvent::GroupStarted { label } => vec![format!("{}{}", indent(1), label)],
        BuildEvent::VariantRendered { index, title, .. } => {
            vec![format!("{}{} {}", indent(2), format_index(*index), title)]
        }
        BuildEvent::IndexWritten { path, links } => {
            vec![format!(
                "==> Wrote {} ({})",
                path.display(),
                plural(*links, "puzzle")
            )]
        }
        BuildEvent::DryRun { output_dir, links } => {
            vec![format!(
                "==> Dry run: {} planned, nothing written to {}",
                plural(*links, "puzzle"),
                output_dir.display()
            )]
        }
    }
}

pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the end-of-build summary: per-subject counts and the seed range.
pub fn format_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();
    let verb = if summary.index.is_some() {
        "Generated"
    } else {
        "Planned"
    };
    lines.push(format!(
        "{} {} for {}",
        verb,
        plural(summary.variant_count(), "puzzle"),
        plural(summary.subjects.len(), "subject")
    ));

    for subject in &summary.subjects {
        let entries = match subject.entries {
            Some(1) => "1 entry".to_string(),
            Some(n) => format!("{} entries", n),
            None => "? entries".to_string(),
        };
        lines.push(format!(
            "{}{}: {}, {}",
            indent(1),
            subject.name,
            entries,
            plural(subject.variants, "puzzle")
        ));
    }

    if summary.next_seed > summary.first_seed {
        lines.push(format!(
            "Seeds {}..={} (next: {})",
            summary.first_seed,
            summary.next_seed - 1,
            summary.next_seed
        ));
    } else {
        lines.push(format!("No seeds used (next: {})", summary.next_seed));
    }
    lines
}

pub fn print_summary(summary: &BuildSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}
