use farmhand_core::auth::{AuthClient, RegisterForm};

use crate::cli::AuthCommands;
use crate::commands::common::CommandContext;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &CommandContext) -> Result<(), CliError> {
    let profile_name = &context.profile_name;
    match command {
        AuthCommands::Login { username, password } => {
            let message = auth_client(context)?.login(&username, &password).await?;
            println!("{message} (profile '{profile_name}')");
        }
        AuthCommands::Register {
            username,
            password,
            confirm_password,
            security_question,
            security_answer,
        } => {
            let form = RegisterForm {
                username,
                password,
                confirm_password,
                security_question: Some(security_question.into()),
                security_answer,
            };
            println!("{}", auth_client(context)?.register(&form).await?);
        }
        AuthCommands::ForgotPassword {
            username,
            security_answer,
            new_password,
        } => {
            let message = auth_client(context)?
                .forgot_password(&username, &security_answer, &new_password)
                .await?;
            println!("{message}");
        }
        AuthCommands::Status => {
            if context.session()?.is_authenticated() {
                println!("Profile '{profile_name}' is signed in.");
            } else {
                println!("Profile '{profile_name}' is not signed in.");
            }
        }
        AuthCommands::Logout => {
            let message = auth_client(context)?.logout().await?;
            println!("{message} (profile '{profile_name}')");
        }
    }
    Ok(())
}

fn auth_client(context: &CommandContext) -> Result<AuthClient, CliError> {
    Ok(AuthClient::new(context.api()?, context.session()?))
}
