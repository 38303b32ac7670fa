//! # Languages and Column Mapping
//!
//! Catalog tables store language-dependent text in one column per language:
//! a base column (`title`, `value`) plus a suffixed column for every other
//! language (`title_1`, `value_1`, ...).
//!
//! The set of columns is fixed by the schema, so the mapping from a language
//! to a column name is a `const` table. Query building picks a `&'static str`
//! out of that table; no column name is ever assembled at runtime.
//!
//! | Language | Title column | Value column |
//! |----------|--------------|--------------|
//! | 0 (base) | `title`      | `value`      |
//! | 1        | `title_1`    | `value_1`    |
//! | 2        | `title_2`    | `value_2`    |
//! | 3        | `title_3`    | `value_3`    |

use crate::error::{AttrError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of language columns the schema carries (base + suffixed).
pub const LANGUAGE_COLUMNS: usize = 4;

pub const TITLE_COLUMNS: [&str; LANGUAGE_COLUMNS] = ["title", "title_1", "title_2", "title_3"];

pub const VALUE_COLUMNS: [&str; LANGUAGE_COLUMNS] = ["value", "value_1", "value_2", "value_3"];

/// A validated language index.
///
/// Resolution calls take the active language explicitly; there is no global
/// "current language".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Language(usize);

impl Language {
    /// The base language, read from the unsuffixed columns.
    pub const BASE: Language = Language(0);

    pub fn new(index: usize) -> Result<Self> {
        if index < LANGUAGE_COLUMNS {
            Ok(Language(index))
        } else {
            Err(AttrError::UnsupportedLanguage(index))
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_base(self) -> bool {
        self.0 == 0
    }

    /// Column holding attribute titles in this language.
    pub fn title_column(self) -> &'static str {
        TITLE_COLUMNS[self.0]
    }

    /// Column holding bound values in this language.
    pub fn value_column(self) -> &'static str {
        VALUE_COLUMNS[self.0]
    }

    /// Iterate over every language the schema supports.
    pub fn all() -> impl Iterator<Item = Language> {
        (0..LANGUAGE_COLUMNS).map(Language)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::BASE
    }
}

impl TryFrom<usize> for Language {
    type Error = AttrError;

    fn try_from(index: usize) -> Result<Self> {
        Language::new(index)
    }
}

impl From<Language> for usize {
    fn from(lang: Language) -> usize {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
