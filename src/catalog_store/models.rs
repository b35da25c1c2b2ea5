//! Catalog models as served by the marketplace backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerations
// =============================================================================

/// Publication status of an app listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Draft,
    #[default]
    Published,
    Rejected,
}

impl AppStatus {
    /// Convert to the string used in backend query filters
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Draft => "draft",
            AppStatus::Published => "published",
            AppStatus::Rejected => "rejected",
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Summary of the user who published an app, embedded in every listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppOwner {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A single app listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub package_name: String,
    pub category: String,
    pub icon_url: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    /// Size of the package in bytes
    pub file_size: u64,
    pub file_url: String,
    #[serde(default)]
    pub download_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default)]
    pub status: AppStatus,
    pub user: AppOwner,
}

/// Catalog category, static reference data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(id: &str, name: &str, slug: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }
}
