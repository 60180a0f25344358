//! Mentor catalog — in-memory mentor list for the mentor service.
//!
//! The catalog is an owned value held in router state. It is seeded either
//! from the built-in list or from a JSON file (`MENTOR_CATALOG_PATH`) and is
//! read-only while serving.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::mentor_filter::{MentorAttributes, MentorFilter};
use super::tags::TagList;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read mentor catalog {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid mentor catalog {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("duplicate mentor id {0} in catalog")]
    DuplicateId(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub domains: TagList,
    pub seniority: String,
    #[serde(default)]
    pub badges: TagList,
}

impl MentorAttributes for Mentor {
    fn seniority(&self) -> Option<&str> {
        Some(&self.seniority)
    }

    fn domains(&self) -> &TagList {
        &self.domains
    }

    fn badges(&self) -> &TagList {
        &self.badges
    }
}

#[derive(Debug, Clone, Default)]
pub struct MentorCatalog {
    mentors: Vec<Mentor>,
}

impl MentorCatalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two mentors share an id.
    pub fn new(mentors: Vec<Mentor>) -> Result<Self, CatalogError> {
        for (i, mentor) in mentors.iter().enumerate() {
            if mentors[..i].iter().any(|m| m.id == mentor.id) {
                return Err(CatalogError::DuplicateId(mentor.id));
            }
        }
        Ok(Self { mentors })
    }

    /// The built-in seed list.
    #[must_use]
    pub fn seeded() -> Self {
        let mentor = |id, name: &str, domains: &str, seniority: &str, badges: &str| Mentor {
            id,
            name: name.to_owned(),
            domains: TagList::from_csv(domains),
            seniority: seniority.to_owned(),
            badges: TagList::from_csv(badges),
        };
        Self {
            mentors: vec![
                mentor(11, "Kasun", "backend", "senior", "system-design"),
                mentor(12, "Nimali", "devops", "staff", "interview-coach"),
                mentor(13, "Ruwan", "frontend", "principal", "system-design,ui-review"),
                mentor(14, "Ishara", "data", "senior", ""),
            ],
        }
    }

    /// Load a catalog from a JSON array of mentor records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains duplicate ids.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read { path: display.clone(), source })?;
        let mentors: Vec<Mentor> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path: display, source })?;
        Self::new(mentors)
    }

    /// Mentors matching `filter`, in catalog order.
    #[must_use]
    pub fn search(&self, filter: &MentorFilter) -> Vec<Mentor> {
        filter.apply(self.mentors.iter()).into_iter().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Mentor> {
        self.mentors.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }
}

#[cfg(test)]
#[path = "mentors_test.rs"]
mod tests;
