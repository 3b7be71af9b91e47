use farmhand_core::models::{
    AttendanceRecord, CalendarEvent, Contact, Expense, Medicine, Seed,
};
use farmhand_core::{
    ApiClient, ClientConfig, Error, ItemId, MutationOutcome, Resource, ResourceSync, Session,
};
use serde::Serialize;

use crate::auth::profile_session;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Resolved profile plus output mode for one invocation.
pub struct CommandContext {
    pub profile_name: String,
    pub profile: CliProfile,
    pub json: bool,
}

impl CommandContext {
    pub fn load(global_profile: Option<&str>, json: bool) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = config.resolve_profile_name(global_profile);
        let profile = config.profile(&profile_name).cloned().unwrap_or_default();
        Ok(Self {
            profile_name,
            profile,
            json,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        self.profile.client_config()
    }

    pub fn api(&self) -> Result<ApiClient, CliError> {
        let config = self.client_config();
        if config.api_base_url.is_none() {
            return Err(CliError::MissingApiUrl(self.profile_name.clone()));
        }
        Ok(ApiClient::new(&config)?)
    }

    pub fn session(&self) -> Result<Session, CliError> {
        Ok(profile_session(&self.profile_name)?)
    }

    pub fn resource<R: Resource>(&self) -> Result<ResourceSync<R>, CliError> {
        Ok(ResourceSync::new(self.api()?, self.session()?))
    }
}

/// One-line text rendering used by `list` and `search`.
pub trait ListLine {
    fn list_line(&self) -> String;
}

impl ListLine for AttendanceRecord {
    fn list_line(&self) -> String {
        format!(
            "{:<6}  {:<24}  {}",
            self.id,
            self.display_name(),
            self.attendance_date
        )
    }
}

impl ListLine for Medicine {
    fn list_line(&self) -> String {
        let line = format!(
            "{:<6}  {:<24}  qty {:<6}  {}",
            self.id, self.name, self.quantity, self.vendor
        );
        with_link(line, &self.vendor_url)
    }
}

impl ListLine for Seed {
    fn list_line(&self) -> String {
        let line = format!(
            "{:<6}  {:<24}  {:>10.2}  {:<8}  {}",
            self.id, self.name, self.price, self.quality, self.vendor
        );
        with_link(line, &self.vendor_url)
    }
}

impl ListLine for Expense {
    fn list_line(&self) -> String {
        let status = if self.settled { "settled" } else { "unsettled" };
        format!(
            "{:<6}  {:<24}  {:>10.2}  {}  {:<12}  {}",
            self.id, self.name, self.amount, self.date, self.category, status
        )
    }
}

impl ListLine for Contact {
    fn list_line(&self) -> String {
        format!(
            "{:<6}  {:<24}  {:<16}  {}",
            self.id, self.name, self.phone_number, self.email
        )
    }
}

impl ListLine for CalendarEvent {
    fn list_line(&self) -> String {
        format!("{:<6}  {}  {}", self.id, self.date, self.description)
    }
}

fn with_link(line: String, url: &str) -> String {
    if url.trim().is_empty() {
        line
    } else {
        format!("{line}  <{}>", url.trim())
    }
}

pub fn print_items<T: Serialize + ListLine>(
    items: &[T],
    empty_label: &str,
    json: bool,
) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("No {empty_label} found.");
    } else {
        for item in items {
            println!("{}", item.list_line());
        }
    }
    Ok(())
}

pub fn print_outcome(outcome: &MutationOutcome, json: bool) -> Result<(), CliError> {
    let reload_error = outcome.reload_error().map(ToString::to_string);
    if json {
        let payload = serde_json::json!({
            "message": outcome.message,
            "reload_error": reload_error,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", outcome.message);
    if let Some(error) = reload_error {
        eprintln!("Warning: list refresh failed: {error}");
    }
    Ok(())
}

/// Joins free-form positional words, as typed after the subcommand.
pub fn join_words(parts: &[String]) -> String {
    parts.join(" ").trim().to_string()
}

pub fn parse_item_id(raw: &str) -> Result<ItemId, CliError> {
    raw.parse::<ItemId>().map_err(CliError::from)
}

pub async fn run_list<R>(context: &CommandContext) -> Result<Vec<R::Item>, CliError>
where
    R: Resource,
    R::Item: Serialize + ListLine,
{
    let sync = context.resource::<R>()?;
    sync.load().await?;
    let items = sync.items();
    print_items(&items, R::COLLECTION, context.json)?;
    Ok(items)
}

/// Loads the list and narrows it to `query`. An empty query lists everything.
pub async fn run_search<R>(context: &CommandContext, query: &[String]) -> Result<(), CliError>
where
    R: Resource,
    R::Item: Serialize + ListLine,
{
    let sync = context.resource::<R>()?;
    let query = join_words(query);
    sync.load_filtered(&query).await?;
    print_items(&sync.items(), R::COLLECTION, context.json)
}

pub async fn run_delete<R: Resource>(context: &CommandContext, id: &str) -> Result<(), CliError> {
    let id = parse_item_id(id)?;
    let sync = context.resource::<R>()?;
    let outcome = sync.remove(&id).await?;
    print_outcome(&outcome, context.json)
}

/// Core errors that mean "run `farmhand auth login` first": no stored token,
/// or one the server no longer accepts.
pub fn login_hint(error: &CliError) -> Option<&'static str> {
    let CliError::Core(error) = error else {
        return None;
    };
    (matches!(error, Error::NotAuthenticated) || error.status() == Some(401))
        .then_some("Run `farmhand auth login --username <USERNAME> --password <PASSWORD>` to sign in.")
}
