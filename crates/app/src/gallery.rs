//! Gallery and admin list views over the project records.
//!
//! Both views fetch the entire table on load and after every mutation;
//! there is no optimistic local update and no pagination.

use std::sync::Arc;

use uuid::Uuid;

use lightwave_core::filter::{self, EventFilter};
use lightwave_core::project::Project;
use lightwave_store::{ProjectStore, StoreError};

/// What the public gallery should render.
#[derive(Debug, PartialEq)]
pub enum GalleryView<'a> {
    /// No records exist at all.
    Empty,
    /// Records exist, but none match the current filter.
    NoMatches,
    Projects(Vec<&'a Project>),
}

/// The public, filterable project gallery.
pub struct Gallery {
    store: Arc<dyn ProjectStore>,
    projects: Vec<Project>,
    filter: EventFilter,
}

impl Gallery {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            projects: Vec::new(),
            filter: EventFilter::All,
        }
    }

    /// Fetch the whole table, ordered by event date descending.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.projects = self.store.list().await?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: EventFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The current view, distinguishing an empty store from an empty
    /// filter result.
    pub fn view(&self) -> GalleryView<'_> {
        if self.projects.is_empty() {
            return GalleryView::Empty;
        }
        let matched = filter::apply(&self.filter, &self.projects);
        if matched.is_empty() {
            GalleryView::NoMatches
        } else {
            GalleryView::Projects(matched)
        }
    }

    /// Featured subset for the home-page strip.
    pub fn featured(&self) -> Vec<&Project> {
        filter::featured(&self.projects)
    }
}

/// The admin project list: same fetch, plus irreversible delete.
pub struct AdminList {
    store: Arc<dyn ProjectStore>,
    projects: Vec<Project>,
}

impl AdminList {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            projects: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.projects = self.store.list().await?;
        Ok(())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Delete a project by id, then re-fetch the full list.
    ///
    /// Interactive confirmation happens before this is called. On
    /// failure the local list is untouched, so the item stays visible.
    /// Deleting an id with no matching record succeeds (delete is
    /// idempotent by id).
    pub async fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(id).await?;
        tracing::info!(project_id = %id, "project deleted");
        self.load().await
    }
}
