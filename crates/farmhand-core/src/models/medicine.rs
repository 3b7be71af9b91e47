//! Fertilizer and medicine inventory

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::validate::{optional_text, positive_integer, required_text};
use super::{null_as_default, ItemId};
use crate::error::Result;
use crate::sync::{Messages, Resource, SearchQuery};

const MISSING_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineForm {
    pub name: String,
    pub quantity: String,
    pub vendor: String,
    pub vendor_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicineDraft {
    pub name: String,
    pub quantity: u32,
    pub vendor: String,
    pub vendor_url: String,
}

/// `/medicines`, shown to users as fertilizers.
#[derive(Debug, Clone, Copy)]
pub struct Medicines;

impl Resource for Medicines {
    type Item = Medicine;
    type Form = MedicineForm;
    type Draft = MedicineDraft;
    type Patch = Infallible;

    const COLLECTION: &'static str = "medicines";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch Fertilizers data",
        create_succeeded: "Fertilizer added successfully",
        create_failed: "Failed to add Fertilizer",
        delete_succeeded: "Fertilizer deleted successfully",
        delete_failed: "Failed to delete Fertilizer",
        update_succeeded: "Fertilizer updated successfully",
        update_failed: "Failed to update Fertilizer",
    };

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        let name = required_text("name", &form.name, MISSING_FIELDS)?;
        let quantity = required_text("quantity", &form.quantity, MISSING_FIELDS)?;
        let vendor = required_text("vendor", &form.vendor, MISSING_FIELDS)?;
        let quantity = positive_integer(
            "quantity",
            &quantity,
            "Please enter a valid quantity greater than zero",
        )?;

        Ok(MedicineDraft {
            name,
            quantity,
            vendor,
            vendor_url: optional_text(form.vendor_url.as_deref()).unwrap_or_default(),
        })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.name)
    }
}
