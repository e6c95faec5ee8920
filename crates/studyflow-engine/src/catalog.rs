//! The course catalog, loaded from the ingestion job's JSON
//! output.
//!
//! The file is read once at startup and never written. Its shape is
//! `{ "courses": [ { "code": ..., "title": ..., ... } ], ... }`; any other
//! top-level keys are ignored.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use studyflow_core::catalog::{CourseCatalog, CourseMatches, CourseQuery, CourseSummary};

use crate::Result;

#[derive(Deserialize)]
struct CatalogFile {
  #[serde(default)]
  courses: Vec<CourseSummary>,
}

/// An immutable, in-memory course catalog.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
  courses:  Vec<CourseSummary>,
  by_code:  HashMap<String, usize>,
  subjects: Vec<String>,
}

impl JsonCatalog {
  /// Load the catalog at `path`. A missing file yields an empty catalog.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      tracing::warn!(path = %path.display(), "course catalog not found; starting with no courses");
      return Ok(Self::default());
    }

    let raw = std::fs::read(path)?;
    let file: CatalogFile = serde_json::from_slice(&raw)?;
    let catalog = Self::from_courses(file.courses);
    tracing::info!(
      courses = catalog.courses.len(),
      subjects = catalog.subjects.len(),
      "loaded course catalog"
    );
    Ok(catalog)
  }

  /// Build a catalog from courses in order. When codes repeat, the first
  /// occurrence answers lookups.
  pub fn from_courses(courses: Vec<CourseSummary>) -> Self {
    let mut by_code = HashMap::with_capacity(courses.len());
    for (i, c) in courses.iter().enumerate() {
      by_code.entry(c.code.clone()).or_insert(i);
    }

    let mut subjects: Vec<String> = courses
      .iter()
      .filter(|c| !c.subject.is_empty())
      .map(|c| c.subject.clone())
      .collect();
    subjects.sort();
    subjects.dedup();

    Self { courses, by_code, subjects }
  }
}

impl CourseCatalog for JsonCatalog {
  fn find_course(&self, code: &str) -> Option<CourseSummary> {
    self.by_code.get(code).map(|&i| self.courses[i].clone())
  }

  fn search(&self, query: &CourseQuery) -> CourseMatches {
    let matching: Vec<&CourseSummary> =
      self.courses.iter().filter(|c| query.matches(c)).collect();
    let total = matching.len();
    let limit = query.limit.unwrap_or(total);

    CourseMatches {
      courses: matching.into_iter().take(limit).cloned().collect(),
      total,
    }
  }

  fn subjects(&self) -> Vec<String> { self.subjects.clone() }

  fn len(&self) -> usize { self.courses.len() }
}
