//! In-memory backend recording every call.

use appmarket_stores::backend::{AuthBackend, BackendError, BackendResult, CatalogBackend};
use appmarket_stores::catalog_store::{AppDetails, AppFilters, Category};
use appmarket_stores::session_store::{AuthIdentity, AuthSession, User};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use super::constants::*;
use super::fixtures::{test_apps, test_categories, test_user};

pub struct MockBackend {
    apps: Mutex<Vec<AppDetails>>,
    categories: Mutex<Vec<Category>>,
    users: Mutex<HashMap<String, User>>,
    passwords: Mutex<HashMap<String, (String, String)>>,
    session: Mutex<Option<AuthSession>>,
    hide_identity: Mutex<bool>,
    failures: Mutex<HashMap<String, BackendError>>,
    list_apps_delays: Mutex<VecDeque<Duration>>,
    list_apps_filters: Mutex<Vec<AppFilters>>,
    sign_ups: Mutex<Vec<(String, String, String)>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            apps: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            users: Mutex::new(HashMap::new()),
            passwords: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            hide_identity: Mutex::new(false),
            failures: Mutex::new(HashMap::new()),
            list_apps_delays: Mutex::new(VecDeque::new()),
            list_apps_filters: Mutex::new(Vec::new()),
            sign_ups: Mutex::new(Vec::new()),
            call_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Backend preloaded with the test catalog and the test user account.
    pub fn with_fixtures() -> Self {
        let backend = Self::new();
        *backend.apps.lock().unwrap() = test_apps();
        *backend.categories.lock().unwrap() = test_categories();
        backend.add_user(test_user(), TEST_PASS);
        backend
    }

    pub fn add_user(&self, user: User, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .insert(user.email.clone(), (password.to_string(), user.id.clone()));
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn remove_user_record(&self, user_id: &str) {
        self.users.lock().unwrap().remove(user_id);
    }

    /// Starts with an already signed-in session, as if restored from a previous run.
    pub fn set_session(&self, user_id: &str) {
        *self.session.lock().unwrap() = Some(AuthSession {
            access_token: TEST_ACCESS_TOKEN.to_string(),
            refresh_token: None,
            user: AuthIdentity {
                id: user_id.to_string(),
                email: None,
            },
        });
    }

    /// Makes `get_current_identity` report no identity even with a live session.
    pub fn hide_identity(&self) {
        *self.hide_identity.lock().unwrap() = true;
    }

    /// Makes every call of `method` fail with `err` until cleared.
    pub fn fail(&self, method: &str, err: BackendError) {
        self.failures.lock().unwrap().insert(method.to_string(), err);
    }

    pub fn clear_failure(&self, method: &str) {
        self.failures.lock().unwrap().remove(method);
    }

    /// Delays the next `list_apps` call by `delay`. Queued delays apply in call order.
    pub fn delay_next_list_apps(&self, delay: Duration) {
        self.list_apps_delays.lock().unwrap().push_back(delay);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    pub fn list_apps_filters(&self) -> Vec<AppFilters> {
        self.list_apps_filters.lock().unwrap().clone()
    }

    pub fn sign_ups(&self) -> Vec<(String, String, String)> {
        self.sign_ups.lock().unwrap().clone()
    }

    pub fn has_session(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    fn increment_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_failure(&self, method: &str) -> BackendResult<()> {
        match self.failures.lock().unwrap().get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogBackend for MockBackend {
    async fn list_apps(&self, filters: &AppFilters) -> BackendResult<Vec<AppDetails>> {
        self.increment_call("list_apps");
        self.list_apps_filters.lock().unwrap().push(filters.clone());
        let delay = self.list_apps_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_failure("list_apps")?;

        let apps = self.apps.lock().unwrap();
        Ok(apps
            .iter()
            .filter(|app| {
                filters
                    .category
                    .as_ref()
                    .map_or(true, |category| &app.category == category)
            })
            .filter(|app| {
                filters.search.as_ref().map_or(true, |search| {
                    app.title.to_lowercase().contains(&search.to_lowercase())
                })
            })
            .cloned()
            .collect())
    }

    async fn get_app(&self, id: &str) -> BackendResult<AppDetails> {
        self.increment_call("get_app");
        self.check_failure("get_app")?;
        self.apps
            .lock()
            .unwrap()
            .iter()
            .find(|app| app.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        self.increment_call("list_categories");
        self.check_failure("list_categories")?;
        Ok(self.categories.lock().unwrap().clone())
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn get_session(&self) -> BackendResult<Option<AuthSession>> {
        self.increment_call("get_session");
        self.check_failure("get_session")?;
        Ok(self.session.lock().unwrap().clone())
    }

    async fn get_user_record(&self, user_id: &str) -> BackendResult<Option<User>> {
        self.increment_call("get_user_record");
        self.check_failure("get_user_record")?;
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<()> {
        self.increment_call("sign_in");
        self.check_failure("sign_in")?;
        let user_id = match self.passwords.lock().unwrap().get(email) {
            Some((expected, user_id)) if expected == password => user_id.clone(),
            _ => return Err(BackendError::api(400, "Invalid login credentials")),
        };
        self.set_session(&user_id);
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> BackendResult<()> {
        self.increment_call("sign_up");
        self.check_failure("sign_up")?;
        if self.passwords.lock().unwrap().contains_key(email) {
            return Err(BackendError::api(422, "User already registered"));
        }
        self.sign_ups.lock().unwrap().push((
            email.to_string(),
            password.to_string(),
            full_name.to_string(),
        ));
        Ok(())
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.increment_call("sign_out");
        self.check_failure("sign_out")?;
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn get_current_identity(&self) -> BackendResult<Option<AuthIdentity>> {
        self.increment_call("get_current_identity");
        self.check_failure("get_current_identity")?;
        if *self.hide_identity.lock().unwrap() {
            return Ok(None);
        }
        Ok(self
            .session
            .lock()
            .unwrap()
            .as_ref()
            .map(|session| session.user.clone()))
    }
}
