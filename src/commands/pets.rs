use crate::cli::PetCommands;
use crate::client::ApiClient;
use crate::config::Context;
use crate::error::CliError;
use crate::models::PetFilter;
use crate::output::{print_pets, print_response};
use crate::photo::Photo;
use anyhow::Result;

/// Handle pet subcommands. Every call first authenticates with the
/// configured credentials; the status of the pet call decides success.
pub async fn handle(ctx: &Context, command: PetCommands) -> Result<bool> {
    let credentials = ctx.credentials()?;
    let client = ApiClient::new(ctx)?;

    let auth = client
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let key = auth.api_key().ok_or_else(|| {
        CliError::other(format!(
            "Authentication failed with status {}: {}",
            auth.status_code(),
            auth.text()
        ))
    })?;

    let format = ctx.output_format();
    let response = match command {
        PetCommands::List { filter } => {
            let response = client
                .list_pets(&key, &PetFilter::from(filter.as_str()))
                .await?;
            print_pets(format, &response)?;
            return Ok(response.is_success());
        }
        PetCommands::Create {
            name,
            animal_type,
            age,
            photo: Some(path),
        } => {
            let photo = Photo::load(&path).await?;
            client
                .create_pet(&key, &name, &animal_type, &age, &photo)
                .await?
        }
        PetCommands::Create {
            name,
            animal_type,
            age,
            photo: None,
        } => {
            client
                .create_pet_simple(&key, &name, &animal_type, &age)
                .await?
        }
        PetCommands::Update {
            id,
            name,
            animal_type,
            age,
        } => {
            client
                .update_pet(&key, &id, &name, &animal_type, &age)
                .await?
        }
        PetCommands::Delete { id } => client.delete_pet(&key, &id).await?,
        PetCommands::Photo { id, file } => {
            let photo = Photo::load(&file).await?;
            client.attach_photo(&key, &id, &photo).await?
        }
    };

    print_response(format, &response)?;
    Ok(response.is_success())
}
