use crate::cli::{KeyArgs, OutputFormat};
use crate::client::ApiClient;
use crate::config::{Config, Context};
use crate::credentials::Credentials;
use crate::error::CliError;
use crate::output::{print_response, print_success};
use anyhow::Result;
use dialoguer::Password;
use tracing::debug;

/// Request an API key. A missing password is prompted for interactively.
///
/// Returns whether the service issued a key.
pub async fn key(ctx: &Context, args: KeyArgs) -> Result<bool> {
    let email = ctx.email().ok_or(CliError::MissingCredentials)?;
    let password = match ctx.password() {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };
    let credentials = Credentials::require(Some(email), Some(password))?;
    debug!(email = %credentials.email, "requesting api key");

    let client = ApiClient::new(ctx)?;
    let response = client
        .authenticate(&credentials.email, &credentials.password)
        .await?;

    match (ctx.output_format(), response.api_key()) {
        (OutputFormat::Table, Some(key)) => {
            print_success("API key issued");
            println!("{}", key);
        }
        (format, _) => print_response(format, &response)?,
    }

    let issued = response.is_success() && response.has_field("key");
    if issued && args.save {
        let config = ctx.config.with_credentials(&credentials);
        config.save()?;
        print_success(&format!("Credentials saved to {}", Config::path()?.display()));
    }
    Ok(issued)
}
