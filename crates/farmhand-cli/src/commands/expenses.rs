use farmhand_core::models::{ExpenseForm, ExpenseTotals, Expenses, Settle};

use crate::cli::ExpenseCommands;
use crate::commands::common::{
    parse_item_id, print_outcome, run_delete, run_list, run_search, CommandContext,
};
use crate::error::CliError;

pub async fn run_expenses(
    command: ExpenseCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    match command {
        ExpenseCommands::List => {
            let expenses = run_list::<Expenses>(context).await?;
            if !context.json && !expenses.is_empty() {
                println!();
                print_totals(&ExpenseTotals::from_expenses(&expenses), false)?;
            }
            Ok(())
        }
        ExpenseCommands::Add {
            name,
            amount,
            category,
            date,
        } => {
            let form = ExpenseForm {
                name,
                amount,
                category,
                date,
            };
            let outcome = context.resource::<Expenses>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        ExpenseCommands::Delete(arg) => run_delete::<Expenses>(context, &arg.id).await,
        ExpenseCommands::Settle(arg) => {
            let id = parse_item_id(&arg.id)?;
            let outcome = context.resource::<Expenses>()?.update(&id, &Settle).await?;
            print_outcome(&outcome, context.json)
        }
        ExpenseCommands::Search { query } => run_search::<Expenses>(context, &query).await,
        ExpenseCommands::Totals => {
            let sync = context.resource::<Expenses>()?;
            sync.load().await?;
            print_totals(&ExpenseTotals::from_expenses(&sync.items()), context.json)
        }
    }
}

fn print_totals(totals: &ExpenseTotals, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(totals)?);
    } else {
        for line in format_totals(totals) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_totals(totals: &ExpenseTotals) -> Vec<String> {
    vec![
        format!("Total expenses:      {:>12.2}", totals.total),
        format!("Settled expenses:    {:>12.2}", totals.settled),
        format!("Unsettled expenses:  {:>12.2}", totals.unsettled),
    ]
}
