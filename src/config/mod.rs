mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};

pub const DEFAULT_BACKEND_URL: &str = "https://demo.supabase.co";
pub const DEFAULT_BACKEND_ANON_KEY: &str = "demo-key";
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// Marks credentials that were never filled in.
const PLACEHOLDER_MARKER: &str = "placeholder";
/// Marks the demo project credentials shipped as defaults.
const DEMO_MARKER: &str = "demo";

/// Whether a store talks to the backend or serves built-in demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Live,
    Demo,
}

impl BackendMode {
    pub fn is_demo(&self) -> bool {
        matches!(self, BackendMode::Demo)
    }
}

/// Session actions gate on two different checks: restoring a session is
/// skipped for any stub credentials, while signing in and registering are
/// only refused for an endpoint that was never filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionModes {
    /// Mode of `initialize`.
    pub restore: BackendMode,
    /// Mode of `login` and `register`.
    pub auth: BackendMode,
}

impl From<BackendMode> for SessionModes {
    fn from(mode: BackendMode) -> Self {
        Self {
            restore: mode,
            auth: mode,
        }
    }
}

/// CLI arguments that can be used for config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
    pub request_timeout_sec: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub request_timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present. Blank values count as
    /// absent.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let backend_url = non_blank(file.backend_url)
            .or_else(|| non_blank(cli.backend_url.clone()))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            bail!("backend_url must be an http(s) URL, got {:?}", backend_url);
        }

        let backend_anon_key = non_blank(file.backend_anon_key)
            .or_else(|| non_blank(cli.backend_anon_key.clone()))
            .unwrap_or_else(|| DEFAULT_BACKEND_ANON_KEY.to_string());

        let request_timeout_sec = file
            .request_timeout_sec
            .or(cli.request_timeout_sec)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SEC);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        Ok(Self {
            backend_url,
            backend_anon_key,
            request_timeout_sec,
        })
    }

    /// Catalog data falls back to demo records only when the endpoint was
    /// never filled in.
    pub fn catalog_mode(&self) -> BackendMode {
        if self.backend_url.contains(PLACEHOLDER_MARKER) {
            BackendMode::Demo
        } else {
            BackendMode::Live
        }
    }

    /// Session restore is skipped for placeholder and demo credentials alike.
    pub fn session_mode(&self) -> BackendMode {
        let is_stub = |value: &str| value.contains(PLACEHOLDER_MARKER) || value.contains(DEMO_MARKER);
        if is_stub(&self.backend_url) || is_stub(&self.backend_anon_key) {
            BackendMode::Demo
        } else {
            BackendMode::Live
        }
    }

    /// Sign-in and registration only need a real endpoint; a demo key is
    /// left for the backend to accept or reject.
    pub fn auth_mode(&self) -> BackendMode {
        self.catalog_mode()
    }

    pub fn session_modes(&self) -> SessionModes {
        SessionModes {
            restore: self.session_mode(),
            auth: self.auth_mode(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
