//! The subject catalog: the ordered content inventory of the site.
//!
//! The catalog comes from the `[[subjects]]` tables of the site config and
//! falls back to [`default_subjects`]. Exactly one subject is the aggregate
//! subject and it must come last: its puzzles draw from every subject listed
//! before it.

use crate::types::Subject;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no subjects")]
    Empty,
    #[error("subject name must not be empty")]
    EmptyName,
    #[error("subject name '{0}' may only contain letters, digits, '_' and '-'")]
    InvalidName(String),
    #[error("subject '{0}' has no color")]
    MissingColor(String),
    #[error("subject '{0}' is listed more than once")]
    Duplicate(String),
    #[error("catalog needs exactly one aggregate subject, found {0}")]
    AggregateCount(usize),
    #[error("aggregate subject '{0}' must be the last subject")]
    AggregateNotLast(String),
    #[error("aggregate subject '{0}' has no subjects to aggregate")]
    NothingToAggregate(String),
}

/// Validated, ordered list of subjects.
#[derive(Debug, Clone)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    pub fn new(subjects: Vec<Subject>) -> Result<Self, CatalogError> {
        validate_subjects(&subjects)?;
        Ok(Self { subjects })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// The aggregate subject (always the last entry).
    pub fn aggregate(&self) -> Option<&Subject> {
        self.subjects.last().filter(|s| s.aggregate)
    }
}

impl<'a> IntoIterator for &'a SubjectCatalog {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check the catalog invariants without building a catalog.
pub fn validate_subjects(subjects: &[Subject]) -> Result<(), CatalogError> {
    if subjects.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = std::collections::HashSet::new();
    for subject in subjects {
        if subject.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        // Names become file names and are comma-joined for the aggregate.
        if !subject
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CatalogError::InvalidName(subject.name.clone()));
        }
        if subject.color.trim().is_empty() {
            return Err(CatalogError::MissingColor(subject.name.clone()));
        }
        if !seen.insert(subject.name.as_str()) {
            return Err(CatalogError::Duplicate(subject.name.clone()));
        }
    }

    let aggregates = subjects.iter().filter(|s| s.aggregate).count();
    if aggregates != 1 {
        return Err(CatalogError::AggregateCount(aggregates));
    }
    if let Some(misplaced) = subjects[..subjects.len() - 1].iter().find(|s| s.aggregate) {
        return Err(CatalogError::AggregateNotLast(misplaced.name.clone()));
    }
    if subjects.len() == 1 {
        return Err(CatalogError::NothingToAggregate(subjects[0].name.clone()));
    }
    Ok(())
}

/// The stock content inventory.
pub fn default_subjects() -> Vec<Subject> {
    vec![
        Subject::new("italian_basic", "#a99887", true),
        Subject::new("italian_advanced", "#53af8b", true),
        Subject::new("italian_passato_remoto", "#929195", false),
        Subject::new("italian_expressions_common", "#587a8f", false),
        Subject::new("italian_expressions_other", "#008080", false),
        Subject::new("italian_vulgar", "#95b8e3", false),
        Subject::aggregate("all_lists", "#c095e3"),
    ]
}
