//! Seed inventory

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::validate::{optional_text, positive_number, required_text};
use super::{null_as_default, ItemId};
use crate::error::Result;
use crate::sync::{Messages, Resource, SearchQuery};

const MISSING_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedForm {
    pub name: String,
    pub price: String,
    pub quality: String,
    pub vendor: String,
    pub vendor_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedDraft {
    pub name: String,
    pub price: f64,
    pub quality: String,
    pub vendor: String,
    pub vendor_url: String,
}

/// `/seeds`
#[derive(Debug, Clone, Copy)]
pub struct Seeds;

impl Resource for Seeds {
    type Item = Seed;
    type Form = SeedForm;
    type Draft = SeedDraft;
    type Patch = Infallible;

    const COLLECTION: &'static str = "seeds";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch seeds data",
        create_succeeded: "Seed added successfully",
        create_failed: "Failed to add seed",
        delete_succeeded: "Seed deleted successfully",
        delete_failed: "Failed to delete seed",
        update_succeeded: "Seed updated successfully",
        update_failed: "Failed to update seed",
    };

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        let name = required_text("name", &form.name, MISSING_FIELDS)?;
        let price = required_text("price", &form.price, MISSING_FIELDS)?;
        let quality = required_text("quality", &form.quality, MISSING_FIELDS)?;
        let vendor = required_text("vendor", &form.vendor, MISSING_FIELDS)?;
        let price = positive_number("price", &price, "Please enter a valid price greater than zero")?;

        Ok(SeedDraft {
            name,
            price,
            quality,
            vendor,
            vendor_url: optional_text(form.vendor_url.as_deref()).unwrap_or_default(),
        })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.name) || query.matches_text(&item.vendor)
    }
}
