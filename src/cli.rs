use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "petfriends")]
#[command(author, version, about = "End-to-end test suite and CLI for the PetFriends API")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Override the service base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding photo fixtures
    #[arg(long, global = true)]
    pub images_dir: Option<PathBuf>,

    /// Account email (overrides PETFRIENDS_EMAIL and the config file)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Account password (overrides PETFRIENDS_PASSWORD and the config file)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, env = "PETFRIENDS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run test scenarios against the service
    Run(RunArgs),

    /// List available scenarios
    Scenarios,

    /// Request an API key for an account
    Key(KeyArgs),

    /// Call pet endpoints directly
    #[command(subcommand)]
    Pets(PetCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Scenario names to run (default: all)
    pub scenarios: Vec<String>,

    /// Stop at the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args, Clone)]
pub struct KeyArgs {
    /// Store the credentials in the config file once a key is issued
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Clone)]
pub enum PetCommands {
    /// List pets
    List {
        /// Filter value sent to the service ("" for all, "my_pets" for owned)
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Create a pet, with a photo when --photo is given
    Create {
        #[arg(long)]
        name: String,

        #[arg(long = "type")]
        animal_type: String,

        #[arg(long)]
        age: String,

        /// Photo file to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Update a pet's name, type and age
    Update {
        /// Pet ID
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "type")]
        animal_type: String,

        #[arg(long)]
        age: String,
    },

    /// Delete a pet
    Delete {
        /// Pet ID
        id: String,
    },

    /// Attach a photo to a pet
    Photo {
        /// Pet ID
        id: String,

        /// Photo file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Display as JSON
    Json,
    /// Display as YAML
    Yaml,
}
