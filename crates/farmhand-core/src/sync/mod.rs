//! Generic resource list synchronizer.
//!
//! `ResourceSync<R>` keeps an in-memory mirror of one server collection. It
//! never patches the mirror locally: every acknowledged write is followed by a
//! full reload, and searches only narrow the last loaded list.
//!
//! Overlapping loads are allowed. Each load takes a generation number and its
//! response is applied only if no newer load started in the meantime.

mod debounce;
mod filter;
mod resource;

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::Method;

pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use filter::{filter_items, SearchQuery};
pub use resource::{DeleteStyle, Messages, Resource};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::ItemId;
use crate::session::Session;

/// Result of a `load` that reached the server successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the displayed list.
    Applied { count: usize },
    /// A newer load started before this response arrived; it was dropped.
    Superseded,
}

/// Result of an acknowledged write.
#[derive(Debug)]
pub struct MutationOutcome {
    /// Server acknowledgement, or the resource's success text.
    pub message: String,
    /// The reload that followed the write.
    pub reload: Result<LoadOutcome>,
}

impl MutationOutcome {
    pub fn reload_error(&self) -> Option<&Error> {
        self.reload.as_ref().err()
    }
}

pub struct ResourceSync<R: Resource> {
    api: ApiClient,
    session: Session,
    state: Arc<SyncState<R::Item>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceSync<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            state: Arc::clone(&self.state),
            _resource: PhantomData,
        }
    }
}

struct SyncState<T> {
    generation: AtomicU64,
    lists: RwLock<Lists<T>>,
}

struct Lists<T> {
    snapshot: Vec<T>,
    displayed: Vec<T>,
    filter: Option<String>,
}

impl<R: Resource> ResourceSync<R> {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            state: Arc::new(SyncState {
                generation: AtomicU64::new(0),
                lists: RwLock::new(Lists {
                    snapshot: Vec::new(),
                    displayed: Vec::new(),
                    filter: None,
                }),
            }),
            _resource: PhantomData,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Currently displayed list (filtered or full).
    pub fn items(&self) -> Vec<R::Item> {
        self.read().displayed.clone()
    }

    /// Last list loaded from the server, ignoring any filter.
    pub fn snapshot(&self) -> Vec<R::Item> {
        self.read().snapshot.clone()
    }

    pub fn active_filter(&self) -> Option<String> {
        self.read().filter.clone()
    }

    /// Item with `id` in the last loaded list.
    pub fn find(&self, id: &ItemId) -> Option<R::Item> {
        self.read()
            .snapshot
            .iter()
            .find(|item| R::item_id(item) == id)
            .cloned()
    }

    /// Fetches the full collection and replaces the displayed list.
    ///
    /// On failure the previous list stays in place.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let request = self
            .api
            .authorized(&self.session, Method::GET, &[R::COLLECTION])?;
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let items: Vec<R::Item> = self.api.fetch(request, R::MESSAGES.fetch_failed).await?;

        let mut lists = self.write();
        if self.state.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                resource = R::COLLECTION,
                generation,
                "Dropping superseded list response"
            );
            return Ok(LoadOutcome::Superseded);
        }

        let count = items.len();
        lists.snapshot.clone_from(&items);
        lists.displayed = items;
        lists.filter = None;
        tracing::info!(resource = R::COLLECTION, count, "Loaded list");
        Ok(LoadOutcome::Applied { count })
    }

    /// Validates `form`, submits it and reloads.
    pub async fn create(&self, form: &R::Form) -> Result<MutationOutcome> {
        let draft = R::validate(form)?;
        let request = self
            .api
            .authorized(&self.session, Method::POST, &[R::COLLECTION])?
            .json(&draft);
        let ack = self.api.submit(request, R::MESSAGES.create_failed).await?;
        tracing::info!(resource = R::COLLECTION, "Created item");
        Ok(self
            .reload_after(ack.or_fallback(R::MESSAGES.create_succeeded))
            .await)
    }

    /// Deletes the item with `id` and reloads.
    pub async fn remove(&self, id: &ItemId) -> Result<MutationOutcome> {
        let request = match R::DELETE_STYLE {
            DeleteStyle::Path => {
                let id_segment = id.to_string();
                self.api.authorized(
                    &self.session,
                    Method::DELETE,
                    &[R::COLLECTION, id_segment.as_str()],
                )?
            }
            DeleteStyle::Body => self
                .api
                .authorized(&self.session, Method::DELETE, &[R::COLLECTION])?
                .json(&serde_json::json!({ "id": id })),
        };
        let ack = self.api.submit(request, R::MESSAGES.delete_failed).await?;
        tracing::info!(resource = R::COLLECTION, %id, "Deleted item");
        Ok(self
            .reload_after(ack.or_fallback(R::MESSAGES.delete_succeeded))
            .await)
    }

    /// Applies `patch` to the item with `id` and reloads.
    pub async fn update(&self, id: &ItemId, patch: &R::Patch) -> Result<MutationOutcome> {
        let Some(path) = R::UPDATE_PATH else {
            return Err(Error::Unsupported(R::COLLECTION));
        };
        let body = R::update_body(id, patch)?;
        let request = self
            .api
            .authorized(&self.session, Method::PUT, path)?
            .json(&body);
        let ack = self.api.submit(request, R::MESSAGES.update_failed).await?;
        tracing::info!(resource = R::COLLECTION, %id, "Updated item");
        Ok(self
            .reload_after(ack.or_fallback(R::MESSAGES.update_succeeded))
            .await)
    }

    /// Narrows the displayed list to items matching `query`.
    ///
    /// A blank query reloads the full list from the server instead. Returns
    /// the number of displayed items afterwards.
    pub async fn filter(&self, query: &str) -> Result<usize> {
        let Some(query) = SearchQuery::parse(query) else {
            self.load().await?;
            return Ok(self.read().displayed.len());
        };

        let mut lists = self.write();
        let matches = filter_items::<R>(&lists.displayed, &query);
        tracing::debug!(
            resource = R::COLLECTION,
            query = query.as_str(),
            matches = matches.len(),
            "Filtered list"
        );
        lists.displayed = matches;
        lists.filter = Some(query.as_str().to_string());
        Ok(lists.displayed.len())
    }

    /// Fresh load narrowed to `query`, with one GET whether or not the query
    /// is empty.
    pub async fn load_filtered(&self, query: &str) -> Result<usize> {
        if !query.is_empty() {
            self.load().await?;
        }
        self.filter(query).await
    }

    async fn reload_after(&self, message: String) -> MutationOutcome {
        let reload = self.load().await;
        if let Err(error) = &reload {
            tracing::warn!(resource = R::COLLECTION, "Reload after write failed: {}", error);
        }
        MutationOutcome { message, reload }
    }

    fn read(&self) -> RwLockReadGuard<'_, Lists<R::Item>> {
        self.state
            .lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Lists<R::Item>> {
        self.state
            .lists
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
