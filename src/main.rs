use anyhow::Result;
use clap::Parser;
use petfriends_cli::cli::{Cli, Commands};
use petfriends_cli::output::print_error;
use petfriends_cli::{commands, config, exit_codes, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials usually live in a local .env next to the suite
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("Error: {}", e));
            let code = u8::try_from(exit_codes::from_error(&e)).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Load config with CLI overrides
    let Cli {
        api_url,
        images_dir,
        email,
        password,
        format,
        command,
        ..
    } = cli;

    let mut ctx = config::Context::load()?;
    if let Some(url) = api_url {
        ctx.override_api_url(url);
    }
    if let Some(dir) = images_dir {
        ctx.override_images_dir(dir);
    }
    if let Some(email) = email {
        ctx.override_email(email);
    }
    if let Some(password) = password {
        ctx.override_password(password);
    }
    if let Some(format) = format {
        ctx.set_format(format);
    }

    execute_command(command, ctx).await
}

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(exit_codes::FAILURES as u8)
    }
}

/// Execute the CLI command
async fn execute_command(command: Commands, ctx: config::Context) -> Result<ExitCode> {
    match command {
        Commands::Run(args) => {
            let report = commands::run::execute(&ctx, args).await?;
            Ok(exit_status(report.is_success()))
        }
        Commands::Scenarios => {
            commands::run::list(&ctx)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Key(args) => {
            let issued = commands::auth::key(&ctx, args).await?;
            Ok(exit_status(issued))
        }
        Commands::Pets(command) => {
            let ok = commands::pets::handle(&ctx, command).await?;
            Ok(exit_status(ok))
        }
        Commands::Completion { shell } => {
            commands::completion::generate_completions(shell)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
