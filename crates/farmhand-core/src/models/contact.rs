//! Contact book

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::validate::{optional_text, required_text};
use super::{null_as_default, ItemId};
use crate::error::Result;
use crate::sync::{Messages, Resource, SearchQuery};

const MISSING_FIELDS: &str = "Please provide a name and phone number";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// `/contacts`
#[derive(Debug, Clone, Copy)]
pub struct Contacts;

impl Resource for Contacts {
    type Item = Contact;
    type Form = ContactForm;
    type Draft = ContactDraft;
    type Patch = Infallible;

    const COLLECTION: &'static str = "contacts";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch contacts data",
        create_succeeded: "Contact added successfully",
        create_failed: "Failed to add contact",
        delete_succeeded: "Contact deleted successfully",
        delete_failed: "Failed to delete contact",
        update_succeeded: "Contact updated successfully",
        update_failed: "Failed to update contact",
    };

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        Ok(ContactDraft {
            name: required_text("name", &form.name, MISSING_FIELDS)?,
            phone_number: required_text("phone_number", &form.phone_number, MISSING_FIELDS)?,
            email: optional_text(form.email.as_deref()),
        })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.name) || query.matches_verbatim(&item.phone_number)
    }
}
