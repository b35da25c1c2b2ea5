mod demo;
mod filters;
mod models;
mod store;

pub use demo::{demo_apps, demo_categories};
pub use filters::{AppFilters, FilterUpdate, SortBy};
pub use models::*;
pub use store::{CatalogState, CatalogStore};
