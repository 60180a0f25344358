//! Mentor search predicate shared by the mentor catalog and the user directory.
//!
//! DESIGN
//! ======
//! A filter holds up to three optional criteria. A record passes when it
//! satisfies every supplied criterion; absent (or blank) criteria impose no
//! constraint. `domain` and `badge` use exact membership in the record's
//! parsed `TagList`, so `"end"` does not match `"backend"`. `seniority` is
//! exact string equality. Filtering preserves input order.

use serde::Deserialize;

use super::tags::TagList;

/// Read access to the attributes a mentor can be filtered on.
pub trait MentorAttributes {
    fn seniority(&self) -> Option<&str>;
    fn domains(&self) -> &TagList;
    fn badges(&self) -> &TagList;
}

impl<T: MentorAttributes + ?Sized> MentorAttributes for &T {
    fn seniority(&self) -> Option<&str> {
        (**self).seniority()
    }

    fn domains(&self) -> &TagList {
        (**self).domains()
    }

    fn badges(&self) -> &TagList {
        (**self).badges()
    }
}

/// Query-string criteria for `GET /mentors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MentorFilter {
    pub domain: Option<String>,
    pub seniority: Option<String>,
    pub badge: Option<String>,
}

impl MentorFilter {
    /// Drop blank criteria so `?domain=` behaves like no `domain` at all.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self { domain: keep(self.domain), seniority: keep(self.seniority), badge: keep(self.badge) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.seniority.is_none() && self.badge.is_none()
    }

    /// Whether `mentor` satisfies every supplied criterion.
    pub fn matches<M: MentorAttributes + ?Sized>(&self, mentor: &M) -> bool {
        if let Some(domain) = self.domain.as_deref() {
            if !mentor.domains().contains(domain) {
                return false;
            }
        }
        if let Some(seniority) = self.seniority.as_deref() {
            if mentor.seniority() != Some(seniority) {
                return false;
            }
        }
        if let Some(badge) = self.badge.as_deref() {
            if !mentor.badges().contains(badge) {
                return false;
            }
        }
        true
    }

    /// Keep the records that match, in their original order.
    pub fn apply<M, I>(&self, records: I) -> Vec<M>
    where
        M: MentorAttributes,
        I: IntoIterator<Item = M>,
    {
        records.into_iter().filter(|m| self.matches(m)).collect()
    }
}

#[cfg(test)]
#[path = "mentor_filter_test.rs"]
mod tests;
