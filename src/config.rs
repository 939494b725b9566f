//! Configuration.
//!
//! Two layers feed a build:
//!
//! - **Site config** (`crossword-www.toml`): the deployment's content
//!   inventory and page text. Sparse files are merged onto the stock
//!   defaults, unknown keys are rejected, and the result is validated.
//! - **Run config** (command line): puzzle side, variants per group, starting
//!   seed, and whether the generator is actually executed.
//!
//! ## Command Line
//!
//! ```text
//! crossword-www [-side N] [-count N] [-seed N] [-cmd_en 0|1]
//!               [-config PATH] [-output DIR] [-gen_config]
//! ```
//!
//! Flags use a single dash. They are rewritten to clap's `--flag` form
//! before parsing, and errors are reported with the token as it was typed.
//!
//! ## Config File
//!
//! ```toml
//! title = "Italian-English Crossword Puzzles"
//! output_dir = "www"
//!
//! [generator]
//! command = ["./gen_puz"]
//! build = ["make", "gen_puz"]
//!
//! [[subjects]]
//! name = "italian_basic"
//! color = "#a99887"
//! recent = true
//!
//! [[subjects]]
//! name = "all_lists"
//! color = "#c095e3"
//! aggregate = true
//! ```
//!
//! A `[[subjects]]` list in a user file replaces the stock list entirely.

use crate::catalog::{self, CatalogError, SubjectCatalog};
use crate::seed;
use crate::types::{Direction, Subject};
use chrono::NaiveDate;
use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when `-config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "crossword-www.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("{0}")]
    Usage(String),
    /// Not a failure: `-help` or `-version` was requested.
    #[error("{0}")]
    Help(String),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Subject catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// =============================================================================
// Run config (command line)
// =============================================================================

/// Settings for one run. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Side length of each puzzle grid.
    pub side: u32,
    /// Variants per (direction, recency) group.
    pub count: usize,
    /// Seed of the first generated variant.
    pub seed: u64,
    /// When false, nothing is spawned, deleted, or written.
    pub execute_externally: bool,
}

impl RunConfig {
    pub const DEFAULT_SIDE: u32 = 17;
    pub const DEFAULT_COUNT: usize = 50;

    /// Defaults for a run started on `today`.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            side: Self::DEFAULT_SIDE,
            count: Self::DEFAULT_COUNT,
            seed: seed::date_seed(today),
            execute_externally: true,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "crossword-www")]
#[command(about = "Generate a static website of crossword puzzles")]
#[command(long_about = "\
Generate a static website of crossword puzzles

For every subject in the catalog, the external puzzle generator is asked for
the subject's entry count and then run once per puzzle. Each subject gets
source-clued and target-clued puzzles, over all entries and (for subjects
marked `recent`) over the most recent 15% of entries. Puzzles are written as
<subject>_s<seed>_r<direction>.html next to an index.html linking them all.

Seeds start at -seed (default: today's date as YYMMDD * 10000) and increase
by one per puzzle.")]
#[command(version)]
struct RunArgs {
    // `-seed -5` is an invalid value, not an unknown flag `-5`.
    /// Side length of each puzzle grid [default: 17]
    #[arg(long, allow_negative_numbers = true)]
    side: Option<u32>,

    /// Puzzles per clue direction and recency group [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    count: Option<usize>,

    /// Seed of the first puzzle [default: YYMMDD * 10000]
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<u64>,

    /// 0 prints the generator commands without running anything [default: 1]
    #[arg(
        long = "cmd_en",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    cmd_en: Option<u8>,

    /// Site config file [default: ./crossword-www.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides `output_dir` from the site config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long = "gen_config")]
    gen_config: bool,
}

/// Everything the command line asks for.
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub run: RunConfig,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub gen_config: bool,
}

/// Resolve command-line tokens (program name excluded) into run options.
///
/// Unset values fall back to [`RunConfig::for_date`] with `today`.
pub fn resolve_cli<I, T>(tokens: I, today: NaiveDate) -> Result<CliOptions, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let tokens: Vec<OsString> = tokens.into_iter().map(Into::into).collect();
    let argv = std::iter::once(OsString::from("crossword-www"))
        .chain(tokens.iter().map(|t| normalize_flag(t)));
    let args = RunArgs::try_parse_from(argv).map_err(|e| config_error(&e, &tokens))?;

    let defaults = RunConfig::for_date(today);
    Ok(CliOptions {
        run: RunConfig {
            side: args.side.unwrap_or(defaults.side),
            count: args.count.unwrap_or(defaults.count),
            seed: args.seed.unwrap_or(defaults.seed),
            execute_externally: args.cmd_en.map_or(defaults.execute_externally, |v| v == 1),
        },
        config: args.config,
        output: args.output,
        gen_config: args.gen_config,
    })
}

/// `-side` → `--side`. Short flags, `--long` flags, numbers, and values are
/// passed through.
fn normalize_flag(token: &OsString) -> OsString {
    match token.to_str() {
        Some(s) if is_single_dash_long(s) => OsString::from(format!("-{s}")),
        _ => token.clone(),
    }
}

fn is_single_dash_long(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('-')
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next().is_some()
}

/// Map a clap error back to the token the user typed.
fn config_error(err: &clap::Error, tokens: &[OsString]) -> ConfigError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ConfigError::Help(err.to_string()),
        ErrorKind::UnknownArgument => match context_string(err, ContextKind::InvalidArg) {
            Some(arg) => ConfigError::UnknownOption(as_typed(&arg, tokens)),
            None => ConfigError::Usage(first_line(err)),
        },
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
            let flag = context_string(err, ContextKind::InvalidArg)
                .and_then(|arg| arg.split_whitespace().next().map(str::to_string))
                .map(|flag| as_typed(&flag, tokens));
            match (flag, context_string(err, ContextKind::InvalidValue)) {
                (Some(flag), Some(value)) if !value.is_empty() => {
                    ConfigError::InvalidValue { flag, value }
                }
                (Some(flag), _) => ConfigError::MissingValue(flag),
                (None, _) => ConfigError::Usage(first_line(err)),
            }
        }
        _ => ConfigError::Usage(first_line(err)),
    }
}

fn context_string(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Undo [`normalize_flag`] for reporting.
fn as_typed(arg: &str, tokens: &[OsString]) -> String {
    match arg.strip_prefix('-') {
        Some(single) if tokens.iter().any(|t| t.to_str() == Some(single)) => single.to_string(),
        _ => arg.to_string(),
    }
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

// =============================================================================
// Site config (file)
// =============================================================================

/// Site configuration loaded from `crossword-www.toml`.
///
/// All fields have defaults matching the stock deployment. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page `<title>` and `<h1>` of the index page.
    pub title: String,
    /// Markdown shown under the heading of the index page.
    pub intro: String,
    /// Where the index and puzzle pages are written.
    pub output_dir: String,
    /// Link target for subject headings; `{subject}` is replaced by the name.
    /// The aggregate subject is never linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_url: Option<String>,
    /// Clue language labels.
    pub languages: LanguagesConfig,
    /// External puzzle generator.
    pub generator: GeneratorConfig,
    /// Content inventory, in generation order.
    pub subjects: Vec<Subject>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Italian-English Crossword Puzzles".to_string(),
            intro: "### [Click here for some Italian food recipes (because words are not enough)](https://www.imustcook.com)".to_string(),
            output_dir: "www".to_string(),
            list_url: Some(
                "https://github.com/balfieri/study/blob/master/{subject}.txt".to_string(),
            ),
            languages: LanguagesConfig::default(),
            generator: GeneratorConfig::default(),
            subjects: catalog::default_subjects(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.command.is_empty() || self.generator.command[0].is_empty() {
            return Err(ConfigError::Validation(
                "generator.command must name a program".into(),
            ));
        }
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.languages.source.is_empty() || self.languages.target.is_empty() {
            return Err(ConfigError::Validation(
                "languages.source and languages.target must not be empty".into(),
            ));
        }
        catalog::validate_subjects(&self.subjects)?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<SubjectCatalog, ConfigError> {
        Ok(SubjectCatalog::new(self.subjects.clone())?)
    }

    /// Word list link for a subject heading, if any.
    pub fn list_url_for(&self, subject: &Subject) -> Option<String> {
        if subject.aggregate {
            return None;
        }
        self.list_url
            .as_ref()
            .map(|template| template.replace("{subject}", &subject.name))
    }
}

/// Clue language labels shown on the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguagesConfig {
    /// Language of the word lists' entries (clues of source-clued puzzles).
    pub source: String,
    /// Language of the glosses (clues of target-clued puzzles).
    pub target: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            source: "Italian".to_string(),
            target: "English".to_string(),
        }
    }
}

impl LanguagesConfig {
    pub fn clue_language(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceClued => &self.source,
            Direction::TargetClued => &self.target,
        }
    }
}

/// External puzzle generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Program and leading arguments; subject and options are appended.
    pub command: Vec<String>,
    /// Run once before generation (e.g. to compile the generator). Empty to skip.
    pub build: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: vec!["./gen_puz".to_string()],
            build: vec!["make".to_string(), "gen_puz".to_string()],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `[[subjects]]` list replaces the stock catalog.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config.
///
/// An explicit path must exist; otherwise [`DEFAULT_CONFIG_FILE`] in `dir`
/// is used when present, and the stock config when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(
            load_raw_config(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?,
        ),
        None => load_raw_config(&dir.join(DEFAULT_CONFIG_FILE))?,
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock config file.
///
/// Printed by the `-gen_config` flag.
pub fn stock_config_toml() -> &'static str {
    r####"# crossword-www configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Page title and heading of index.html.
title = "Italian-English Crossword Puzzles"

# Markdown shown under the heading.
intro = "### [Click here for some Italian food recipes (because words are not enough)](https://www.imustcook.com)"

# Directory receiving index.html and the puzzle pages (-output overrides).
output_dir = "www"

# Subject headings link here; {subject} is replaced by the subject name.
# Remove to leave headings unlinked. The aggregate subject is never linked.
list_url = "https://github.com/balfieri/study/blob/master/{subject}.txt"

# ---------------------------------------------------------------------------
# Clue languages
# ---------------------------------------------------------------------------
[languages]
source = "Italian"    # source-clued puzzles (-reverse 0)
target = "English"    # target-clued puzzles (-reverse 1)

# ---------------------------------------------------------------------------
# Puzzle generator
# ---------------------------------------------------------------------------
[generator]
# Program plus leading arguments. The subjects argument and options follow.
command = ["./gen_puz"]

# Run once before generating. Use [] to skip.
build = ["make", "gen_puz"]

# ---------------------------------------------------------------------------
# Subjects, in generation order
# ---------------------------------------------------------------------------
# recent = true adds a "most recent entries" group (last 15% of the list).
# Exactly one subject must be the aggregate, and it must come last: its
# puzzles draw from all subjects listed before it.

[[subjects]]
name = "italian_basic"
color = "#a99887"
recent = true

[[subjects]]
name = "italian_advanced"
color = "#53af8b"
recent = true

[[subjects]]
name = "italian_passato_remoto"
color = "#929195"

[[subjects]]
name = "italian_expressions_common"
color = "#587a8f"

[[subjects]]
name = "italian_expressions_other"
color = "#008080"

[[subjects]]
name = "italian_vulgar"
color = "#95b8e3"

[[subjects]]
name = "all_lists"
color = "#c095e3"
aggregate = true
"####
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn resolve(tokens: &[&str]) -> Result<CliOptions, ConfigError> {
        resolve_cli(tokens.iter().copied(), today())
    }

    // =========================================================================
    // Command line
    // =========================================================================

    #[test]
    fn defaults_when_no_flags() {
        let opts = resolve(&[]).unwrap();
        assert_eq!(
            opts.run,
            RunConfig {
                side: 17,
                count: 50,
                seed: 2_610_190_000,
                execute_externally: true,
            }
        );
        assert!(opts.config.is_none());
        assert!(opts.output.is_none());
        assert!(!opts.gen_config);
    }

    #[test]
    fn single_dash_flags_override_defaults() {
        let opts = resolve(&["-side", "13", "-count", "2", "-seed", "1000", "-cmd_en", "0"]).unwrap();
        assert_eq!(
            opts.run,
            RunConfig {
                side: 13,
                count: 2,
                seed: 1000,
                execute_externally: false,
            }
        );
    }

    #[test]
    fn double_dash_flags_also_accepted() {
        let opts = resolve(&["--count", "3"]).unwrap();
        assert_eq!(opts.run.count, 3);
    }

    #[test]
    fn cmd_en_one_executes() {
        let opts = resolve(&["-cmd_en", "1"]).unwrap();
        assert!(opts.run.execute_externally);
    }

    #[test]
    fn path_flags() {
        let opts = resolve(&["-config", "site.toml", "-output", "public", "-gen_config"]).unwrap();
        assert_eq!(opts.config, Some(PathBuf::from("site.toml")));
        assert_eq!(opts.output, Some(PathBuf::from("public")));
        assert!(opts.gen_config);
    }

    #[test]
    fn unknown_flag_named_as_typed() {
        let err = resolve(&["-count", "2", "-bogus", "1"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(ref t) if t == "-bogus"));
        assert_eq!(err.to_string(), "unknown option: -bogus");
    }

    #[test]
    fn stray_token_is_unknown_option() {
        let err = resolve(&["stray"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(ref t) if t == "stray"));
    }

    #[test]
    fn malformed_number_rejected() {
        let err = resolve(&["-side", "abc"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "abc"));
    }

    #[test]
    fn negative_seed_is_invalid_value() {
        let err = resolve(&["-seed", "-5"]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref flag, ref value } if flag == "-seed" && value == "-5"
        ));
        assert_eq!(err.to_string(), "invalid value '-5' for -seed");
    }

    #[test]
    fn negative_side_and_cmd_en_are_invalid_values() {
        for (flag, value) in [("-side", "-1"), ("-count", "-2"), ("-cmd_en", "-1")] {
            let err = resolve(&[flag, value]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { flag: ref f, value: ref v } if f == flag && v == value),
                "{flag} {value}: {err:?}"
            );
        }
    }

    #[test]
    fn cmd_en_out_of_range_rejected() {
        let err = resolve(&["-cmd_en", "2"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "2"));
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = resolve(&["-help"]).unwrap_err();
        assert!(matches!(err, ConfigError::Help(ref text) if text.contains("-cmd_en")));
    }

    #[test]
    fn normalize_only_rewrites_single_dash_words() {
        let norm = |s: &str| normalize_flag(&OsString::from(s)).into_string().unwrap();
        assert_eq!(norm("-side"), "--side");
        assert_eq!(norm("--side"), "--side");
        assert_eq!(norm("-h"), "-h");
        assert_eq!(norm("-5"), "-5");
        assert_eq!(norm("17"), "17");
    }

    // =========================================================================
    // TOML merging
    // =========================================================================

    fn toml_value(text: &str) -> toml::Value {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn merge_toml_overlay_scalar_wins() {
        let base = toml_value("title = \"a\"\noutput_dir = \"www\"\n");
        let overlay = toml_value("title = \"b\"\n");
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["title"].as_str(), Some("b"));
        assert_eq!(merged["output_dir"].as_str(), Some("www"));
    }

    #[test]
    fn merge_toml_nested_tables_merge_by_key() {
        let base = toml_value("[languages]\nsource = \"Italian\"\ntarget = \"English\"\n");
        let overlay = toml_value("[languages]\nsource = \"French\"\n");
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["languages"]["source"].as_str(), Some("French"));
        assert_eq!(merged["languages"]["target"].as_str(), Some("English"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base = toml_value("[generator]\nbuild = [\"make\", \"gen_puz\"]\n");
        let overlay = toml_value("[generator]\nbuild = []\n");
        let merged = merge_toml(base, overlay);
        let build = merged["generator"]["build"].as_array().unwrap();
        assert!(build.is_empty());
    }

    #[test]
    fn merge_toml_adds_new_keys() {
        let base = toml_value("title = \"a\"\n");
        let overlay = toml_value("intro = \"hello\"\n");
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["title"].as_str(), Some("a"));
        assert_eq!(merged["intro"].as_str(), Some("hello"));
    }

    #[test]
    fn merge_toml_table_replaces_scalar() {
        let base = toml_value("languages = \"none\"\n");
        let overlay = toml_value("[languages]\nsource = \"French\"\n");
        let merged = merge_toml(base, overlay);
        assert!(merged["languages"].is_table());
    }

    // =========================================================================
    // Site config
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.output_dir, "www");
        assert_eq!(config.generator.command, vec!["./gen_puz"]);
        assert_eq!(config.subjects.len(), 7);
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.intro, defaults.intro);
        assert_eq!(parsed.list_url, defaults.list_url);
        assert_eq!(parsed.generator.build, defaults.generator.build);
        assert_eq!(parsed.subjects, defaults.subjects);
        assert!(stock_config_toml().trim_end().ends_with("aggregate = true"));
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r##"
title = "Puzzles"

[languages]
source = "French"
"##,
        )
        .unwrap();
        assert_eq!(config.title, "Puzzles");
        assert_eq!(config.languages.source, "French");
        assert_eq!(config.languages.target, "English");
        assert_eq!(config.subjects.len(), 7);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("colour = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn subjects_list_replaces_stock_catalog() {
        let overlay: toml::Value = toml::from_str(
            r##"
[[subjects]]
name = "french_basic"
color = "#123456"
recent = true

[[subjects]]
name = "everything"
color = "#654321"
aggregate = true
"##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value().unwrap(), Some(overlay)).unwrap();
        let names: Vec<&str> = config.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["french_basic", "everything"]);
    }

    #[test]
    fn invalid_catalog_fails_validation() {
        let overlay: toml::Value = toml::from_str(
            r##"
[[subjects]]
name = "french_basic"
color = "#123456"
"##,
        )
        .unwrap();
        let result = resolve_config(stock_defaults_value().unwrap(), Some(overlay));
        assert!(matches!(
            result,
            Err(ConfigError::Catalog(CatalogError::AggregateCount(0)))
        ));
    }

    #[test]
    fn empty_generator_command_rejected() {
        let config = SiteConfig {
            generator: GeneratorConfig {
                command: vec![],
                build: vec![],
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn list_url_substitutes_subject() {
        let config = SiteConfig::default();
        let basic = Subject::new("italian_basic", "#a99887", true);
        assert_eq!(
            config.list_url_for(&basic).as_deref(),
            Some("https://github.com/balfieri/study/blob/master/italian_basic.txt")
        );
        let all = Subject::aggregate("all_lists", "#c095e3");
        assert_eq!(config.list_url_for(&all), None);
    }

    #[test]
    fn clue_language_per_direction() {
        let languages = LanguagesConfig::default();
        assert_eq!(languages.clue_language(Direction::SourceClued), "Italian");
        assert_eq!(languages.clue_language(Direction::TargetClued), "English");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.title, "Italian-English Crossword Puzzles");
    }

    #[test]
    fn load_config_reads_default_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "output_dir = \"public\"\n",
        )
        .unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.output_dir, "public");
        assert_eq!(config.subjects.len(), 7);
    }

    #[test]
    fn load_config_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "[generator]\nbuild = []\n").unwrap();
        let config = load_config(Some(&path), Path::new("/nonexistent")).unwrap();
        assert!(config.generator.build.is_empty());
        assert_eq!(config.generator.command, vec!["./gen_puz"]);
    }

    #[test]
    fn load_config_explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        let result = load_config(Some(&missing), tmp.path());
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == missing));
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "title = [").unwrap();
        let result = load_config(None, tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
