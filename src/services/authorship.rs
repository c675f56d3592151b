//! Roster classification service.
//!
//! Splits the target roster into members who opened a thread in the window
//! and members who did not.

use std::collections::BTreeMap;

use crate::models::{Member, Roster};
use crate::source::MemberDirectory;

/// Roster members split by whether they posted.
///
/// Both maps are keyed by identity name and never share a key. A roster name
/// missing from both could not be resolved to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub authors: BTreeMap<String, Member>,
    pub non_authors: BTreeMap<String, Member>,
}

impl Classification {
    /// Non-authors ordered by display name, the order reports use.
    pub fn non_authors_by_display_name(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.non_authors.values().collect();
        members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        members
    }
}

/// Classifies roster members against thread owners.
pub struct AuthorshipAnalyzer<'a> {
    directory: &'a dyn MemberDirectory,
}

impl<'a> AuthorshipAnalyzer<'a> {
    pub fn new(directory: &'a dyn MemberDirectory) -> Self {
        Self { directory }
    }

    /// Resolve each roster name once; drop the ones without a member.
    pub fn resolve_roster(&self, roster: &Roster) -> BTreeMap<String, Member> {
        roster
            .iter()
            .filter_map(|name| match self.directory.find_by_name(name) {
                Some(member) => Some((name.to_string(), member)),
                None => {
                    log::warn!("Member '{}' not found in the guild", name);
                    None
                }
            })
            .collect()
    }

    /// Classify the roster given the owners of in-window threads.
    pub fn classify<'m>(
        &self,
        roster: &Roster,
        owners: impl IntoIterator<Item = Option<&'m Member>>,
    ) -> Classification {
        let mut remaining = self.resolve_roster(roster);
        let mut authors = BTreeMap::new();

        for owner in owners.into_iter().flatten() {
            if let Some(member) = remaining.remove(&owner.name) {
                authors.insert(owner.name.clone(), member);
            }
        }

        log::info!(
            "Classification: {} posted, {} did not",
            authors.len(),
            remaining.len()
        );

        Classification {
            authors,
            non_authors: remaining,
        }
    }
}
