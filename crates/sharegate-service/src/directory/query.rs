//! Directory query building and picker result flags.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sharegate_core::config::DirectoryConfig;
use sharegate_core::error::AppError;
use sharegate_core::types::{PageRequest, PrincipalId};
use sharegate_entity::principal::PrincipalSummary;

/// Sort field and direction, written as `field:asc` or `field:desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, dir @ ("asc" | "desc"))) if !field.is_empty() => Ok(Self {
                field: field.to_string(),
                descending: dir == "desc",
            }),
            _ => Err(AppError::validation(format!(
                "Invalid sort '{s}', expected 'field:asc' or 'field:desc'"
            ))),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(sort: SortOrder) -> Self {
        sort.to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.descending { "desc" } else { "asc" };
        write!(f, "{}:{dir}", self.field)
    }
}

/// One directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalQuery {
    /// Free-text match on id or title. Empty matches everyone.
    pub query: String,
    #[serde(flatten)]
    pub page: PageRequest,
    pub sort: SortOrder,
    /// Ids the directory must leave out.
    pub excluded: BTreeSet<PrincipalId>,
}

impl PrincipalQuery {
    /// First page with the configured size and sort.
    pub fn new(query: impl Into<String>, config: &DirectoryConfig) -> Result<Self, AppError> {
        Ok(Self {
            query: query.into(),
            page: PageRequest::new(0, config.page_size, config.max_page_size),
            sort: config.default_sort.parse()?,
            excluded: BTreeSet::new(),
        })
    }

    pub fn excluding(mut self, excluded: BTreeSet<PrincipalId>) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn from_offset(mut self, from: u64) -> Self {
        self.page.from = from;
        self
    }

    /// Same query, next page.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.next(),
            ..self.clone()
        }
    }
}

/// A search hit as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerEntry {
    #[serde(flatten)]
    pub principal: PrincipalSummary,
    pub disabled: bool,
}

impl PickerEntry {
    /// Flags excluded principals as disabled, except those already in the
    /// current selection.
    pub fn mark(
        principal: PrincipalSummary,
        excluded: &BTreeSet<PrincipalId>,
        selected: &[PrincipalId],
    ) -> Self {
        let disabled = !selected.contains(&principal.id) && excluded.contains(&principal.id);
        Self {
            principal,
            disabled,
        }
    }
}
