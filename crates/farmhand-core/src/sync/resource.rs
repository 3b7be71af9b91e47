//! Description of a server-managed collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::ItemId;
use crate::sync::filter::SearchQuery;

/// How a resource identifies the item to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStyle {
    /// `DELETE /{collection}/{id}`
    Path,
    /// `DELETE /{collection}` with `{"id": ...}` in the body
    Body,
}

/// User-facing texts for one resource: success messages used when the server
/// sends none, and fallbacks for failures without a server message.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub fetch_failed: &'static str,
    pub create_succeeded: &'static str,
    pub create_failed: &'static str,
    pub delete_succeeded: &'static str,
    pub delete_failed: &'static str,
    pub update_succeeded: &'static str,
    pub update_failed: &'static str,
}

pub trait Resource: Send + Sync + 'static {
    /// Item as listed by the server.
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;
    /// Raw user input for a new item.
    type Form;
    /// Validated create payload.
    type Draft: Serialize;
    /// Input for an update; `Infallible` for resources that cannot be updated.
    type Patch;

    /// Collection path segment, e.g. `seeds`.
    const COLLECTION: &'static str;
    const MESSAGES: Messages;
    const DELETE_STYLE: DeleteStyle = DeleteStyle::Path;
    /// Update endpoint path segments, sent with `PUT`.
    const UPDATE_PATH: Option<&'static [&'static str]> = None;

    fn item_id(item: &Self::Item) -> &ItemId;

    /// Checks required and numeric fields without touching the network.
    fn validate(form: &Self::Form) -> Result<Self::Draft>;

    /// Whether `item` matches a non-empty search query.
    fn matches(item: &Self::Item, query: &SearchQuery) -> bool;

    /// JSON body of the update request for `id`.
    fn update_body(id: &ItemId, patch: &Self::Patch) -> Result<serde_json::Value> {
        let _ = (id, patch);
        Err(Error::Unsupported(Self::COLLECTION))
    }
}
