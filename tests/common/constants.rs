//! Shared constants for end-to-end tests

// ============================================================================
// Test User
// ============================================================================

/// Id of the registered test user
pub const TEST_USER_ID: &str = "user-1";

/// Email of the registered test user
pub const TEST_EMAIL: &str = "a@b.com";

/// Password of the registered test user
pub const TEST_PASS: &str = "pw";

/// Display name of the registered test user
pub const TEST_FULL_NAME: &str = "Test User";

/// Access token the stub server issues on sign-in
pub const TEST_ACCESS_TOKEN: &str = "access-token-1";

/// Api key the stub server expects on every request
pub const TEST_ANON_KEY: &str = "anon-key";

// ============================================================================
// Test Catalog
// ============================================================================

/// "Chess Master", games
pub const APP_1_ID: &str = "app-1";

/// "Notes", productivity
pub const APP_2_ID: &str = "app-2";

/// "Poker Night", games
pub const APP_3_ID: &str = "app-3";

/// Id no app carries
pub const MISSING_APP_ID: &str = "app-missing";
