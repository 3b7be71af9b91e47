use farmhand_core::models::{ContactForm, Contacts};

use crate::cli::ContactCommands;
use crate::commands::common::{print_outcome, run_delete, run_list, run_search, CommandContext};
use crate::error::CliError;

pub async fn run_contacts(
    command: ContactCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    match command {
        ContactCommands::List => run_list::<Contacts>(context).await.map(|_| ()),
        ContactCommands::Add { name, phone, email } => {
            let form = ContactForm {
                name,
                phone_number: phone,
                email,
            };
            let outcome = context.resource::<Contacts>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        ContactCommands::Delete(arg) => run_delete::<Contacts>(context, &arg.id).await,
        ContactCommands::Search { query } => run_search::<Contacts>(context, &query).await,
    }
}
