use farmhand_core::models::{working_days, Attendance, AttendanceForm};

use crate::cli::AttendanceCommands;
use crate::commands::common::{
    join_words, print_outcome, run_delete, run_list, run_search, CommandContext,
};
use crate::error::CliError;

pub async fn run_attendance(
    command: AttendanceCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    match command {
        AttendanceCommands::List => run_list::<Attendance>(context).await.map(|_| ()),
        AttendanceCommands::Add { worker_name } => {
            let form = AttendanceForm {
                worker_name: join_words(&worker_name),
            };
            let outcome = context.resource::<Attendance>()?.create(&form).await?;
            print_outcome(&outcome, context.json)
        }
        AttendanceCommands::Delete(arg) => run_delete::<Attendance>(context, &arg.id).await,
        AttendanceCommands::Search { query } => run_search::<Attendance>(context, &query).await,
        AttendanceCommands::Days { worker } => {
            let worker = join_words(&worker);
            let sync = context.resource::<Attendance>()?;
            sync.load().await?;
            let days = working_days(&sync.items(), &worker);
            if context.json {
                let payload = serde_json::json!({ "worker_name": worker, "days": days });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{worker}: {days} working day(s)");
            }
            Ok(())
        }
    }
}
