//! # crossword-www
//!
//! Builds a static website of crossword puzzles. The puzzles themselves come
//! from an external generator program; this crate decides which puzzles to
//! make, runs the generator once per puzzle, and writes an `index.html` that
//! links them all, grouped by subject, clue direction, and recency.
//!
//! # Build Flow
//!
//! ```text
//! 1. Resolve   CLI tokens + crossword-www.toml  →  RunConfig, SiteConfig
//! 2. Clean     www/*.html from the previous run  →  removed
//! 3. Generate  for each subject: entry count, then one page per variant
//! 4. Index     IndexPage (assembled during 3)   →  www/index.html
//! ```
//!
//! Generation is sequential and all-or-nothing: the first failing generator
//! call aborts the build before the index is written. With `-cmd_en 0` the
//! whole plan is walked and echoed but nothing is spawned, deleted, or
//! written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Command-line parsing into [`config::RunConfig`]; `crossword-www.toml` loading, merging, and validation |
//! | [`catalog`] | The ordered subject inventory and its invariants |
//! | [`types`] | Shared types: `Subject`, `Direction`, `Recency`, `Variant` |
//! | [`naming`] | Variant titles and page file names, and their parser |
//! | [`seed`] | Date-derived default seed and the per-run seed counter |
//! | [`generator`] | External generator requests behind the `CommandRunner` trait |
//! | [`orchestrate`] | Puzzle enumeration, stale cleanup, and the build loop |
//! | [`generate`] | Index page model and HTML rendering with Maud |
//! | [`output`] | CLI output formatting for build events and the summary |
//!
//! # Design Decisions
//!
//! ## Explicit Run State
//!
//! The seed counter and the list of subjects feeding the aggregate subject
//! are owned by [`orchestrate::RunState`] and passed along explicitly. Every
//! puzzle of a run has a distinct seed: the N-th puzzle gets `seed + N`.
//!
//! ## Generator Behind a Trait
//!
//! All process spawning goes through [`generator::CommandRunner`]. The
//! production [`generator::ProcessRunner`] knows about dry runs; tests swap in
//! a recording mock so the build loop is exercised without a generator.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error and every interpolated name, label, and URL is escaped.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod generator;
pub mod naming;
pub mod orchestrate;
pub mod output;
pub mod seed;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
