//! Catalog filter set and partial updates.

use serde::{Deserialize, Serialize};

/// Ordering applied to app listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Popular,
    Name,
}

impl SortBy {
    /// PostgREST `order` parameter for this sort mode.
    pub fn order_clause(&self) -> &'static str {
        match self {
            SortBy::Newest => "created_at.desc",
            SortBy::Popular => "download_count.desc",
            SortBy::Name => "title.asc",
        }
    }
}

/// Criteria governing the next catalog fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppFilters {
    pub sort_by: SortBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl AppFilters {
    /// Shallow merge: fields present in `update` overwrite, the rest are kept.
    pub fn merge(&self, update: &FilterUpdate) -> AppFilters {
        AppFilters {
            sort_by: update.sort_by.unwrap_or(self.sort_by),
            category: update
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            search: update.search.clone().unwrap_or_else(|| self.search.clone()),
        }
    }
}

/// A partial filter set. `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub sort_by: Option<SortBy>,
    pub category: Option<Option<String>>,
    pub search: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(Some(search.into()));
        self
    }

    pub fn clear_search(mut self) -> Self {
        self.search = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sort_by.is_none() && self.category.is_none() && self.search.is_none()
    }
}
