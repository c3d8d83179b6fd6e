//! In-memory fakes for the store trait seams, shared by the flow tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use lightwave_core::project::{NewProject, Project};
use lightwave_store::{AuthApi, AuthSession, ObjectStore, ProjectStore, StoreError, UserIdentity};

fn api_error(message: &str) -> StoreError {
    StoreError::Api {
        status: 500,
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// InMemoryProjectStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryProjectStore {
    pub projects: Mutex<Vec<Project>>,
    pub fail_insert: AtomicBool,
    pub fail_delete: AtomicBool,
    pub list_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl InMemoryProjectStore {
    pub fn seed(&self, project: Project) {
        self.projects.lock().unwrap().push(project);
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn list(&self) -> Result<Vec<Project>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut projects = self.projects.lock().unwrap().clone();
        projects.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        Ok(projects)
    }

    async fn insert(&self, record: &NewProject) -> Result<Project, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(api_error("insert failed"));
        }
        let project = Project {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            event_title: record.event_title.clone(),
            event_type: record.event_type.clone(),
            event_location: record.event_location.clone(),
            event_date: record.event_date,
            guest_count: record.guest_count,
            services_used: record.services_used.clone(),
            short_description: record.short_description.clone(),
            highlight_or_challenge: record.highlight_or_challenge.clone(),
            images: record.images.clone(),
            videos: record.videos.clone(),
            before_image_url: record.before_image_url.clone(),
            after_image_url: record.after_image_url.clone(),
            instagram_reel_url: record.instagram_reel_url.clone(),
            is_featured: record.is_featured,
            is_new: record.is_new,
            display_order: record.display_order,
        };
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(api_error("delete failed"));
        }
        // Idempotent: removing a missing id is still success.
        self.projects.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// InMemoryObjectStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryObjectStore {
    pub uploads: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
    pub fail_uploads: AtomicBool,
    pub fail_removals: AtomicBool,
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(api_error("upload failed"));
        }
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(format!("https://cdn.test/{path}"))
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(api_error("remove failed"));
        }
        self.removed.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakeAuth
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, String>>,
    pub sessions: Mutex<HashMap<String, UserIdentity>>,
    pub signed_out: Mutex<Vec<String>>,
    pub sign_in_calls: AtomicUsize,
}

impl FakeAuth {
    pub fn with_account(email: &str, password: &str) -> Self {
        let auth = Self::default();
        auth.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        auth
    }

    /// Pre-seed a live session, as if a login happened in an earlier
    /// run. Returns the token.
    pub fn issue_token(&self, email: &str) -> String {
        let token = format!("tok-{email}");
        self.sessions.lock().unwrap().insert(
            token.clone(),
            UserIdentity {
                id: format!("id-{email}"),
                email: email.to_string(),
            },
        );
        token
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(stored) if stored == password => {}
            _ => {
                return Err(StoreError::Api {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        }
        drop(accounts);

        let token = self.issue_token(email);
        let user = self.sessions.lock().unwrap()[&token].clone();
        Ok(AuthSession {
            access_token: token,
            user,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        self.sessions.lock().unwrap().remove(access_token);
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(access_token).cloned())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn sample_project(event_type: &str, event_date: NaiveDate) -> Project {
    Project {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        event_title: format!("{event_type} showcase"),
        event_type: event_type.to_string(),
        event_location: "Chennai".into(),
        event_date,
        guest_count: None,
        services_used: vec!["Sound System".into()],
        short_description: "Ten characters at least".into(),
        highlight_or_challenge: None,
        images: vec!["https://cdn.test/projects/seed.jpg".into()],
        videos: None,
        before_image_url: None,
        after_image_url: None,
        instagram_reel_url: None,
        is_featured: false,
        is_new: false,
        display_order: 0,
    }
}
