use farmhand_core::models::{group_by_date, marked_dates, Calendar, CalendarEventForm};
use farmhand_core::{Error, ItemId, ResourceSync};

use crate::cli::CalendarCommands;
use crate::commands::common::{
    join_words, parse_item_id, print_items, print_outcome, run_delete, run_list, run_search,
    CommandContext,
};
use crate::error::CliError;

pub async fn run_calendar(
    command: CalendarCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    match command {
        CalendarCommands::List { date: None } => run_list::<Calendar>(context).await.map(|_| ()),
        CalendarCommands::List { date: Some(date) } => {
            let sync = context.resource::<Calendar>()?;
            sync.load().await?;
            let grouped = group_by_date(&sync.items());
            let events = grouped.get(date.trim()).cloned().unwrap_or_default();
            print_items(&events, "events for this date", context.json)
        }
        CalendarCommands::Add { date, description } => {
            let form = CalendarEventForm {
                date,
                description: join_words(&description),
            };
            let outcome = context.resource::<Calendar>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        CalendarCommands::Update {
            id,
            date,
            description,
        } => {
            let id = parse_item_id(&id)?;
            let sync = context.resource::<Calendar>()?;
            let description = match description {
                Some(description) => description,
                None => current_description(&sync, &id).await?,
            };
            let patch = CalendarEventForm {
                date: Some(date),
                description,
            };
            let outcome = sync.update(&id, &patch).await?;
            print_outcome(&outcome, context.json)
        }
        CalendarCommands::Delete(arg) => run_delete::<Calendar>(context, &arg.id).await,
        CalendarCommands::Search { query } => run_search::<Calendar>(context, &query).await,
        CalendarCommands::Dates { selected } => {
            let sync = context.resource::<Calendar>()?;
            sync.load().await?;
            let grouped = group_by_date(&sync.items());
            let marks = marked_dates(&grouped, selected.as_deref());
            if context.json {
                println!("{}", serde_json::to_string_pretty(&marks)?);
                return Ok(());
            }
            if marks.is_empty() {
                println!("No events found.");
            }
            for (date, mark) in &marks {
                let count = grouped.get(date).map_or(0, Vec::len);
                let cursor = if mark.selected { ">" } else { " " };
                println!("{cursor} {date}  {count} event(s)");
            }
            Ok(())
        }
    }
}

async fn current_description(
    sync: &ResourceSync<Calendar>,
    id: &ItemId,
) -> Result<String, CliError> {
    sync.load().await?;
    sync.find(id)
        .map(|event| event.description)
        .ok_or_else(|| Error::validation("id", format!("No calendar event with id {id}")).into())
}
