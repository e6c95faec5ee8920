//! The course catalog as seen by the planner: a read-only lookup.
//!
//! Catalog contents are produced elsewhere (an ingestion job writes them);
//! the planner only ever asks whether a code exists and what it is called.

use serde::{Deserialize, Serialize};

fn default_credits() -> u8 { 3 }

/// What the planner knows about one catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
  pub code:          String,
  pub title:         String,
  #[serde(default)]
  pub subject:       String,
  #[serde(default = "default_credits")]
  pub credits:       u8,
  #[serde(default)]
  pub description:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prerequisites: Option<String>,
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CourseCatalog::search`].
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
  /// Case-insensitive substring over title, code and description.
  pub text:    Option<String>,
  /// Exact subject match, ignoring ASCII case.
  pub subject: Option<String>,
  pub limit:   Option<usize>,
}

impl CourseQuery {
  pub fn matches(&self, course: &CourseSummary) -> bool {
    if let Some(subject) = &self.subject
      && !course.subject.eq_ignore_ascii_case(subject)
    {
      return false;
    }
    if let Some(text) = &self.text {
      let needle = text.to_lowercase();
      return course.title.to_lowercase().contains(&needle)
        || course.code.to_lowercase().contains(&needle)
        || course.description.to_lowercase().contains(&needle);
    }
    true
  }
}

/// A page of search results plus the number of matches before `limit`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseMatches {
  pub courses: Vec<CourseSummary>,
  pub total:   usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read-only catalog lookup.
pub trait CourseCatalog: Send + Sync {
  /// Exact-code lookup. `None` means the course does not exist.
  fn find_course(&self, code: &str) -> Option<CourseSummary>;

  /// Courses matching `query`, in catalog order.
  fn search(&self, query: &CourseQuery) -> CourseMatches;

  /// Distinct subject codes, sorted.
  fn subjects(&self) -> Vec<String>;

  /// Number of courses in the catalog.
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn course(code: &str, subject: &str, title: &str) -> CourseSummary {
    CourseSummary {
      code:          code.into(),
      title:         title.into(),
      subject:       subject.into(),
      credits:       3,
      description:   String::new(),
      prerequisites: None,
    }
  }

  #[test]
  fn empty_query_matches_everything() {
    assert!(CourseQuery::default().matches(&course("CSI2110", "CSI", "Data Structures")));
  }

  #[test]
  fn text_matches_title_or_code_case_insensitively() {
    let c = course("CSI2110", "CSI", "Data Structures and Algorithms");
    let q = |t: &str| CourseQuery { text: Some(t.into()), ..Default::default() };
    assert!(q("structures").matches(&c));
    assert!(q("csi21").matches(&c));
    assert!(!q("calculus").matches(&c));
  }

  #[test]
  fn subject_filter_is_exact() {
    let c = course("CSI2110", "CSI", "Data Structures");
    let q = |s: &str| CourseQuery { subject: Some(s.into()), ..Default::default() };
    assert!(q("csi").matches(&c));
    assert!(!q("CS").matches(&c));
  }

  #[test]
  fn missing_optional_fields_take_defaults() {
    let c: CourseSummary =
      serde_json::from_str(r#"{"code":"MAT1341","title":"Linear Algebra"}"#).unwrap();
    assert_eq!(c.credits, 3);
    assert!(c.subject.is_empty());
  }
}
