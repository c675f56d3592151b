//! Guild members and the target roster.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An addressable guild member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Platform user id
    pub id: String,

    /// Unique identity name (the account username)
    pub name: String,

    /// Name shown in the guild
    pub display_name: String,

    pub avatar_url: String,
}

/// The set of identity names a report is about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: BTreeSet<String>,
}

impl Roster {
    /// Parse a comma-separated list, trimming whitespace and dropping empties.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
