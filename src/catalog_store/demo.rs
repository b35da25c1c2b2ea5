//! Fixed catalog served when no backend is configured.

use chrono::{DateTime, Utc};

use super::models::{AppDetails, AppOwner, AppStatus, Category};

/// 2024-01-01T00:00:00Z, shared by every demo record.
const DEMO_TIMESTAMP_SECS: i64 = 1_704_067_200;

const APP_1_SCREENSHOT: &str =
    "https://images.pexels.com/photos/147413/twitter-facebook-together-exchange-of-information-147413.jpeg";
const APP_2_SCREENSHOT: &str = "https://images.pexels.com/photos/193003/pexels-photo-193003.jpeg";
const ICON_PARAMS: &str = "?auto=compress&cs=tinysrgb&w=200&h=200&dpr=2";

fn demo_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(DEMO_TIMESTAMP_SECS, 0).unwrap_or_default()
}

pub fn demo_apps() -> Vec<AppDetails> {
    let timestamp = demo_timestamp();
    vec![
        AppDetails {
            id: "1".to_string(),
            title: "Sample App 1".to_string(),
            description: "This is a sample application for demonstration purposes.".to_string(),
            version: "1.0.0".to_string(),
            package_name: "com.example.app1".to_string(),
            category: "productivity".to_string(),
            icon_url: format!("{}{}", APP_1_SCREENSHOT, ICON_PARAMS),
            screenshots: vec![APP_1_SCREENSHOT.to_string()],
            file_size: 5 * 1024 * 1024,
            file_url: "#".to_string(),
            download_count: 1250,
            created_at: timestamp,
            updated_at: timestamp,
            user_id: "1".to_string(),
            status: AppStatus::Published,
            user: AppOwner {
                id: "1".to_string(),
                full_name: "Demo Developer".to_string(),
                avatar_url: None,
            },
        },
        AppDetails {
            id: "2".to_string(),
            title: "Sample App 2".to_string(),
            description: "Another sample application showcasing the platform features."
                .to_string(),
            version: "2.1.0".to_string(),
            package_name: "com.example.app2".to_string(),
            category: "games".to_string(),
            icon_url: format!("{}{}", APP_2_SCREENSHOT, ICON_PARAMS),
            screenshots: vec![APP_2_SCREENSHOT.to_string()],
            file_size: 10 * 1024 * 1024,
            file_url: "#".to_string(),
            download_count: 850,
            created_at: timestamp,
            updated_at: timestamp,
            user_id: "2".to_string(),
            status: AppStatus::Published,
            user: AppOwner {
                id: "2".to_string(),
                full_name: "Game Developer".to_string(),
                avatar_url: None,
            },
        },
    ]
}

pub fn demo_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Productivity", "productivity"),
        Category::new("2", "Games", "games"),
        Category::new("3", "Social", "social"),
        Category::new("4", "Education", "education"),
        Category::new("5", "Entertainment", "entertainment"),
    ]
}
