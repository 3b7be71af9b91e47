use farmhand_core::models::{SeedForm, Seeds};

use crate::cli::SeedCommands;
use crate::commands::common::{print_outcome, run_delete, run_list, run_search, CommandContext};
use crate::error::CliError;

pub async fn run_seeds(command: SeedCommands, context: &CommandContext) -> Result<(), CliError> {
    match command {
        SeedCommands::List => run_list::<Seeds>(context).await.map(|_| ()),
        SeedCommands::Add {
            name,
            price,
            quality,
            vendor,
            vendor_url,
        } => {
            let form = SeedForm {
                name,
                price,
                quality,
                vendor,
                vendor_url,
            };
            let outcome = context.resource::<Seeds>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        SeedCommands::Delete(arg) => run_delete::<Seeds>(context, &arg.id).await,
        SeedCommands::Search { query } => run_search::<Seeds>(context, &query).await,
    }
}
