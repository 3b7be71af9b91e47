//! Expenses and their settled/unsettled totals

use serde::{Deserialize, Serialize};

use super::validate::{iso_date, optional_text, positive_number, required_text};
use super::{null_as_default, ItemId};
use crate::error::Result;
use crate::sync::{Messages, Resource, SearchQuery};
use crate::util::today_iso;

const MISSING_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub category: Option<String>,
    /// `YYYY-MM-DD`; today (UTC) when absent.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub category: Option<String>,
}

/// Marks an expense as settled. The settle endpoint takes no other input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settle;

/// `/expenses`
#[derive(Debug, Clone, Copy)]
pub struct Expenses;

impl Resource for Expenses {
    type Item = Expense;
    type Form = ExpenseForm;
    type Draft = ExpenseDraft;
    type Patch = Settle;

    const COLLECTION: &'static str = "expenses";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch expenses data",
        create_succeeded: "Expense added successfully",
        create_failed: "Failed to add expense",
        delete_succeeded: "Expense removed successfully",
        delete_failed: "Failed to delete expense",
        update_succeeded: "Expense settled successfully",
        update_failed: "Failed to settle expense",
    };
    const UPDATE_PATH: Option<&'static [&'static str]> = Some(&["expenses", "settle"]);

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        let name = required_text("name", &form.name, MISSING_FIELDS)?;
        let amount = required_text("amount", &form.amount, MISSING_FIELDS)?;
        let amount = positive_number(
            "amount",
            &amount,
            "Please enter a valid amount greater than zero",
        )?;
        let date = match optional_text(form.date.as_deref()) {
            Some(date) => iso_date("date", &date)?,
            None => today_iso(),
        };

        Ok(ExpenseDraft {
            name,
            amount,
            date,
            category: optional_text(form.category.as_deref()),
        })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.name)
    }

    fn update_body(id: &ItemId, _patch: &Settle) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "id": id }))
    }
}

/// Sums shown above the expense list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExpenseTotals {
    pub total: f64,
    pub settled: f64,
    pub unsettled: f64,
}

impl ExpenseTotals {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let (settled, unsettled) = expenses.iter().fold((0.0, 0.0), |(settled, unsettled), expense| {
            if expense.settled {
                (settled + expense.amount, unsettled)
            } else {
                (settled, unsettled + expense.amount)
            }
        });
        Self {
            total: settled + unsettled,
            settled,
            unsettled,
        }
    }
}
