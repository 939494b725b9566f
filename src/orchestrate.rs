//! Puzzle enumeration and site build.
//!
//! For each subject, in catalog order:
//!
//! 1. Work out the subjects argument: the subject's own name, or for the
//!    aggregate subject the comma-joined names of every subject before it.
//! 2. Ask the generator for the entry count.
//! 3. For each direction (source-clued, target-clued) and each recency
//!    bucket the subject allows (all entries, plus most recent entries when
//!    `recent` is set), render `count` puzzles, one seed each.
//!
//! ```text
//! italian_basic  recent   → 2 directions × 2 buckets × count puzzles
//! italian_vulgar          → 2 directions × 1 bucket  × count puzzles
//! all_lists      aggregate→ subjects "italian_basic,...,italian_vulgar"
//! ```
//!
//! ## Run State
//!
//! The seed counter and the aggregate name list are the only mutable state
//! of a run. Both live in [`RunState`], owned by the build and threaded
//! through explicitly; the N-th puzzle rendered gets seed `initial + N`.
//!
//! ## Failure Policy
//!
//! Generation is all-or-nothing. A starting seed without room for every
//! planned puzzle is rejected before any work. Stale pages are deleted up
//! front, and the first failing generator call aborts the build before
//! `index.html` is written. With external execution disabled nothing is
//! deleted, spawned, or written, and the page is assembled only to report
//! what would be done. Every generator command is announced with
//! [`BuildEvent::Invoking`] before it runs.

use crate::catalog::SubjectCatalog;
use crate::config::{ConfigError, RunConfig, SiteConfig};
use crate::generate::{IndexPage, SubjectSection, group_label};
use crate::generator::{CommandRunner, GeneratorClient, GeneratorError, Invocation, ProcessRunner};
use crate::naming;
use crate::seed::SeedSequencer;
use crate::types::{Direction, Recency, Subject, Variant};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Generator(#[from] GeneratorError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to clean {path}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("seed {seed} leaves no room for {variants} puzzles")]
    SeedRange { seed: u64, variants: u64 },
}

impl BuildError {
    /// Stderr of the generator command that failed, if any.
    pub fn generator_stderr(&self) -> Option<&str> {
        match self {
            BuildError::Generator(err) => err.stderr(),
            _ => None,
        }
    }
}

/// Progress events emitted during a build.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Stale pages were removed from the output directory.
    OutputCleaned { removed: usize },
    /// A generator command is about to run (or, in a dry run, would run).
    Invoking { command: String },
    /// The generator's build command ran.
    GeneratorBuilt { command: String },
    SubjectStarted {
        name: String,
        specifier: String,
        entries: Option<usize>,
    },
    /// The entry count could not be read (only tolerated in a dry run).
    EntryCountUnavailable { subject: String, reason: String },
    /// A (direction, recency) group is starting.
    GroupStarted { label: String },
    VariantRendered {
        index: usize,
        title: String,
        seed: u64,
    },
    IndexWritten { path: PathBuf, links: usize },
    /// Dry run: nothing was written to this directory.
    DryRun { output_dir: PathBuf, links: usize },
}

/// What a finished build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub subjects: Vec<SubjectSummary>,
    pub first_seed: u64,
    /// The seed a following run would need to start at to avoid reuse.
    pub next_seed: u64,
    /// `None` for a dry run.
    pub index: Option<PathBuf>,
}

impl BuildSummary {
    pub fn variant_count(&self) -> usize {
        self.subjects.iter().map(|s| s.variants).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSummary {
    pub name: String,
    pub entries: Option<usize>,
    pub variants: usize,
}

/// Mutable state of one run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub seeds: SeedSequencer,
    aggregated: Vec<String>,
}

impl RunState {
    pub fn new(initial_seed: u64) -> Self {
        Self {
            seeds: SeedSequencer::new(initial_seed),
            aggregated: Vec::new(),
        }
    }

    /// Subjects argument for `subject` given the subjects processed so far.
    pub fn specifier_for(&self, subject: &Subject) -> String {
        if subject.aggregate {
            self.aggregated.join(",")
        } else {
            subject.name.clone()
        }
    }

    /// Note a processed subject for the aggregate list.
    pub fn record(&mut self, subject: &Subject) {
        if !subject.aggregate && !self.aggregated.contains(&subject.name) {
            self.aggregated.push(subject.name.clone());
        }
    }

    pub fn aggregated(&self) -> &[String] {
        &self.aggregated
    }
}

/// One (direction, recency) bucket of a subject with its variants.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    pub direction: Direction,
    pub recency: Recency,
    pub variants: Vec<Variant>,
}

/// Number of puzzles a run of `count` per group renders for `catalog`.
pub fn planned_variants(catalog: &SubjectCatalog, count: usize) -> u64 {
    catalog
        .iter()
        .map(|s| (Direction::ALL.len() * s.recency_buckets().len()) as u64)
        .sum::<u64>()
        .saturating_mul(count as u64)
}

/// Enumerate a subject's variants, drawing one seed per variant in order.
pub fn variant_groups(
    subject: &Subject,
    specifier: &str,
    run: &RunConfig,
    seeds: &mut SeedSequencer,
) -> Result<Vec<VariantGroup>, BuildError> {
    let mut groups = Vec::new();
    for direction in Direction::ALL {
        for &recency in subject.recency_buckets() {
            let variants = (0..run.count)
                .map(|index| {
                    let seed = seeds.next_seed().ok_or_else(|| BuildError::SeedRange {
                        seed: seeds.initial(),
                        variants: seeds.issued() + 1,
                    })?;
                    Ok(Variant {
                        subject: subject.name.clone(),
                        specifier: specifier.to_string(),
                        side: run.side,
                        seed,
                        direction,
                        recency,
                        start_pct: recency.start_pct(),
                        index,
                        title: naming::variant_title(&subject.name, seed, direction),
                    })
                })
                .collect::<Result<Vec<_>, BuildError>>()?;
            groups.push(VariantGroup {
                direction,
                recency,
                variants,
            });
        }
    }
    Ok(groups)
}

/// Delete pages left by a previous build. Returns the removed paths.
pub fn clean_output(output_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    std::fs::create_dir_all(output_dir)?;
    let mut removed = Vec::new();
    for entry in WalkDir::new(output_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| BuildError::Clean {
            path: output_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let generated = entry
            .file_name()
            .to_str()
            .is_some_and(naming::is_generated_page);
        if generated {
            std::fs::remove_file(entry.path())?;
            removed.push(entry.path().to_path_buf());
        }
    }
    removed.sort();
    Ok(removed)
}

/// Build the site by running the configured generator as child processes.
pub fn build_site(
    site: &SiteConfig,
    run: &RunConfig,
    output_dir: &Path,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, BuildError> {
    let runner = ProcessRunner::new(run.execute_externally);
    build_site_with_runner(&runner, site, run, output_dir, events)
}

/// Build the site through a specific runner (allows testing with a mock).
pub fn build_site_with_runner(
    runner: &impl CommandRunner,
    site: &SiteConfig,
    run: &RunConfig,
    output_dir: &Path,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, BuildError> {
    let emit = |event: BuildEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    };
    let catalog: SubjectCatalog = site.catalog()?;
    let mut state = RunState::new(run.seed);
    let variants = planned_variants(&catalog, run.count);
    if !state.seeds.has_room(variants) {
        return Err(BuildError::SeedRange {
            seed: run.seed,
            variants,
        });
    }

    if run.execute_externally {
        let removed = clean_output(output_dir)?;
        emit(BuildEvent::OutputCleaned {
            removed: removed.len(),
        });
    }

    if let Some(build) = Invocation::from_argv(&site.generator.build) {
        emit(BuildEvent::Invoking {
            command: build.to_string(),
        });
        runner.run(&build).map_err(GeneratorError::from)?;
        if run.execute_externally {
            emit(BuildEvent::GeneratorBuilt {
                command: build.to_string(),
            });
        }
    }

    let client = GeneratorClient::new(runner, &site.generator.command);
    let mut page = IndexPage::from_config(site);
    let mut subjects = Vec::new();

    for subject in &catalog {
        let specifier = state.specifier_for(subject);
        emit(BuildEvent::Invoking {
            command: client.entry_count_invocation(&specifier).to_string(),
        });
        let entries = match client.query_entry_count(&specifier) {
            Ok(n) => Some(n),
            Err(err @ GeneratorError::EntryCount { .. }) if !run.execute_externally => {
                emit(BuildEvent::EntryCountUnavailable {
                    subject: subject.name.clone(),
                    reason: err.to_string(),
                });
                None
            }
            Err(err) => return Err(err.into()),
        };
        emit(BuildEvent::SubjectStarted {
            name: subject.name.clone(),
            specifier: specifier.clone(),
            entries,
        });
        state.record(subject);

        let mut section = SubjectSection::new(subject, entries, site.list_url_for(subject));
        let mut rendered = 0;
        for group in variant_groups(subject, &specifier, run, &mut state.seeds)? {
            let label = group_label(&site.languages, group.direction, group.recency);
            emit(BuildEvent::GroupStarted {
                label: label.clone(),
            });
            let links = section.begin_group(label);
            for variant in &group.variants {
                let filename = variant.filename();
                let target = output_dir.join(&filename);
                emit(BuildEvent::Invoking {
                    command: client.render_invocation(variant, &target).to_string(),
                });
                client.render_variant(variant, &target)?;
                links.push(variant.index, filename);
                rendered += 1;
                emit(BuildEvent::VariantRendered {
                    index: variant.index,
                    title: variant.title.clone(),
                    seed: variant.seed,
                });
            }
        }
        page.push_section(section);
        subjects.push(SubjectSummary {
            name: subject.name.clone(),
            entries,
            variants: rendered,
        });
    }

    let index = if run.execute_externally {
        let path = page.write(output_dir)?;
        emit(BuildEvent::IndexWritten {
            path: path.clone(),
            links: page.link_count(),
        });
        Some(path)
    } else {
        emit(BuildEvent::DryRun {
            output_dir: output_dir.to_path_buf(),
            links: page.link_count(),
        });
        None
    };

    Ok(BuildSummary {
        subjects,
        first_seed: state.seeds.initial(),
        next_seed: state.seeds.peek(),
        index,
    })
}
