// src/game/meta.rs
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::Result;
use crate::util::json;

/// Value of `group_number` until a group is assigned.
pub const UNSET_GROUP: i64 = -1;

/// Descriptive information about a game, shown by the host's game selector.
///
/// Built incrementally with the `with_*` / `add_*` methods and checked with
/// [`GameMeta::validate`] when a game module is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMeta {
    title: String,
    description: String,
    release_date: String,
    tags: Vec<String>,
    group_number: i64,
    authors: Vec<String>,
}

impl Default for GameMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            release_date: String::new(),
            tags: Vec::new(),
            group_number: UNSET_GROUP,
            authors: Vec::new(),
        }
    }
}

impl GameMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads metadata from a JSON document. Fields absent from the file are
    /// left unset so `validate` reports them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        json::load_as(path)
    }

    pub fn with_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    // Free text for now; nothing checks the date format.
    pub fn with_release_date(&mut self, release_date: impl Into<String>) -> &mut Self {
        self.release_date = release_date.into();
        self
    }

    /// Appends to the existing tags.
    pub fn with_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_group_number(&mut self, group_number: i64) -> &mut Self {
        self.group_number = group_number;
        self
    }

    /// Appends to the existing authors.
    pub fn with_authors<I, S>(&mut self, authors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors.extend(authors.into_iter().map(Into::into));
        self
    }

    pub fn add_author(&mut self, author: impl Into<String>) -> &mut Self {
        self.authors.push(author.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn group_number(&self) -> i64 {
        self.group_number
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Checks the fields in a fixed order and reports the first one missing.
    pub fn validate(&self) -> std::result::Result<(), MetaError> {
        let missing = if self.title.is_empty() {
            Some(MetaField::Title)
        } else if self.description.is_empty() {
            Some(MetaField::Description)
        } else if self.release_date.is_empty() {
            Some(MetaField::ReleaseDate)
        } else if self.tags.is_empty() {
            Some(MetaField::Tags)
        } else if self.group_number == UNSET_GROUP {
            Some(MetaField::GroupNumber)
        } else if self.authors.is_empty() {
            Some(MetaField::Authors)
        } else {
            None
        };

        match missing {
            Some(field) => Err(MetaError::Missing(field)),
            None => Ok(()),
        }
    }
}

/// Required metadata fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Title,
    Description,
    ReleaseDate,
    Tags,
    GroupNumber,
    Authors,
}

impl MetaField {
    pub const ALL: [MetaField; 6] = [
        MetaField::Title,
        MetaField::Description,
        MetaField::ReleaseDate,
        MetaField::Tags,
        MetaField::GroupNumber,
        MetaField::Authors,
    ];

    /// Key of the field in metadata documents.
    pub fn key(self) -> &'static str {
        match self {
            MetaField::Title => "title",
            MetaField::Description => "description",
            MetaField::ReleaseDate => "release_date",
            MetaField::Tags => "tags",
            MetaField::GroupNumber => "group_number",
            MetaField::Authors => "authors",
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            MetaField::Title => "a title",
            MetaField::Description => "a description",
            MetaField::ReleaseDate => "a release date",
            MetaField::Tags => "at least one tag",
            MetaField::GroupNumber => "the number of the group that made the game",
            MetaField::Authors => "at least one author",
        }
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetaError {
    #[error("the game metadata does not specify {} (\"{}\")", .0.requirement(), .0.key())]
    Missing(MetaField),
}

impl MetaError {
    pub fn field(&self) -> MetaField {
        match self {
            MetaError::Missing(field) => *field,
        }
    }
}
