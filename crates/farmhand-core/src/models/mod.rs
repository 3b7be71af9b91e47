//! Data models for the farm backend's resources

mod attendance;
mod calendar;
mod contact;
mod expense;
mod id;
mod medicine;
mod seed;
mod validate;

pub use attendance::{working_days, Attendance, AttendanceDraft, AttendanceForm, AttendanceRecord};
pub use calendar::{
    group_by_date, marked_dates, Calendar, CalendarEvent, CalendarEventDraft, CalendarEventForm,
    DateMark,
};
pub use contact::{Contact, ContactDraft, ContactForm, Contacts};
pub use expense::{Expense, ExpenseDraft, ExpenseForm, ExpenseTotals, Expenses, Settle};
pub use id::ItemId;
pub use medicine::{Medicine, MedicineDraft, MedicineForm, Medicines};
pub use seed::{Seed, SeedDraft, SeedForm, Seeds};
pub use validate::{positive_integer, positive_number, required_text};

/// Reads `null` as the type's default, for columns the backend may leave
/// empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;

    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
