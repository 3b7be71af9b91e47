//! Calendar events and the per-date views built from them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::validate::{iso_date, optional_text, required_text};
use super::{null_as_default, ItemId};
use crate::error::{Error, Result};
use crate::sync::{DeleteStyle, Messages, Resource, SearchQuery};
use crate::util::today_iso;

const MISSING_DESCRIPTION: &str = "Please enter an event description";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: ItemId,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Input for both creating and editing an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEventForm {
    /// Defaults to today when creating. Required when editing.
    pub date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEventDraft {
    pub date: String,
    pub description: String,
}

/// `/calendar`. Deletes and updates carry the id in the JSON body.
#[derive(Debug, Clone, Copy)]
pub struct Calendar;

impl Resource for Calendar {
    type Item = CalendarEvent;
    type Form = CalendarEventForm;
    type Draft = CalendarEventDraft;
    type Patch = CalendarEventForm;

    const COLLECTION: &'static str = "calendar";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch events",
        create_succeeded: "Event added successfully",
        create_failed: "Failed to add event",
        delete_succeeded: "Event deleted successfully",
        delete_failed: "Failed to delete event",
        update_succeeded: "Event updated successfully",
        update_failed: "Failed to update event",
    };
    const DELETE_STYLE: DeleteStyle = DeleteStyle::Body;
    const UPDATE_PATH: Option<&'static [&'static str]> = Some(&["calendar"]);

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        let description = required_text("description", &form.description, MISSING_DESCRIPTION)?;
        let date = match optional_text(form.date.as_deref()) {
            Some(date) => iso_date("date", &date)?,
            None => today_iso(),
        };
        Ok(CalendarEventDraft { date, description })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.description) || query.matches_text(&item.date)
    }

    fn update_body(id: &ItemId, patch: &Self::Patch) -> Result<serde_json::Value> {
        let description = required_text("description", &patch.description, MISSING_DESCRIPTION)?;
        let date = optional_text(patch.date.as_deref())
            .ok_or_else(|| Error::validation("date", "Please select a date for the event"))?;
        let date = iso_date("date", &date)?;
        Ok(serde_json::json!({
            "id": id,
            "date": date,
            "description": description,
        }))
    }
}

/// Events keyed by date, each date keeping the server's order.
pub fn group_by_date(events: &[CalendarEvent]) -> BTreeMap<String, Vec<CalendarEvent>> {
    let mut grouped: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.date.clone())
            .or_default()
            .push(event.clone());
    }
    grouped
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateMark {
    /// At least one event falls on the date.
    pub marked: bool,
    pub selected: bool,
}

/// Calendar marks for every date with events, plus the selected date.
pub fn marked_dates(
    grouped: &BTreeMap<String, Vec<CalendarEvent>>,
    selected: Option<&str>,
) -> BTreeMap<String, DateMark> {
    let mut marks: BTreeMap<String, DateMark> = grouped
        .iter()
        .filter(|(_, events)| !events.is_empty())
        .map(|(date, _)| {
            (
                date.clone(),
                DateMark {
                    marked: true,
                    selected: false,
                },
            )
        })
        .collect();

    if let Some(selected) = selected.map(str::trim).filter(|date| !date.is_empty()) {
        marks.entry(selected.to_string()).or_default().selected = true;
    }
    marks
}
