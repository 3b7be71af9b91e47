use farmhand_core::models::{MedicineForm, Medicines};

use crate::cli::MedicineCommands;
use crate::commands::common::{print_outcome, run_delete, run_list, run_search, CommandContext};
use crate::error::CliError;

pub async fn run_medicines(
    command: MedicineCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    match command {
        MedicineCommands::List => run_list::<Medicines>(context).await.map(|_| ()),
        MedicineCommands::Add {
            name,
            quantity,
            vendor,
            vendor_url,
        } => {
            let form = MedicineForm {
                name,
                quantity,
                vendor,
                vendor_url,
            };
            let outcome = context.resource::<Medicines>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        MedicineCommands::Delete(arg) => run_delete::<Medicines>(context, &arg.id).await,
        MedicineCommands::Search { query } => run_search::<Medicines>(context, &query).await,
    }
}
