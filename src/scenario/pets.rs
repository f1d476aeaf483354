//! Pet lifecycle scenarios: list, create, update, delete, set photo.

use super::{
    Expectation, Scenario, ScenarioContext, ScenarioError, expect_pet, expect_pets, expect_status,
};
use crate::models::PetFilter;
use crate::photo::PhotoFixtures;
use tracing::debug;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "list_all_pets",
            "Listing all pets with a valid key returns a non-empty collection",
            Expectation::Pass,
            boxed!(list_all_pets),
        ),
        Scenario::new(
            "create_pet_with_photo",
            "Creating Glasha the bulldog with a photo shows her in my_pets",
            Expectation::Pass,
            boxed!(create_pet_with_photo),
        ),
        Scenario::new(
            "create_pet_simple",
            "Creating a pet without a photo echoes its name",
            Expectation::Pass,
            boxed!(create_pet_simple),
        ),
        Scenario::new(
            "update_own_pet",
            "Updating a seeded pet renames it in my_pets",
            Expectation::Pass,
            boxed!(update_own_pet),
        ),
        Scenario::new(
            "delete_own_pet",
            "Deleting a seeded pet removes its id from my_pets",
            Expectation::Pass,
            boxed!(delete_own_pet),
        ),
        Scenario::new(
            "set_photo_on_own_pet",
            "Attaching a photo to an owned pet stores it",
            Expectation::Pass,
            boxed!(set_photo_on_own_pet),
        ),
        Scenario::new(
            "create_pet_twice_not_idempotent",
            "Two identical create calls yield two distinct records",
            Expectation::Pass,
            boxed!(create_pet_twice_not_idempotent),
        ),
    ]
}

async fn list_all_pets(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let key = ctx.api_key().await?;
    let response = ctx.client.list_pets(&key, &PetFilter::All).await?;

    expect_status(&response, 200)?;
    let list = expect_pets(&response)?;
    check!(!list.pets.is_empty(), "pet list is empty");
    Ok(())
}

async fn create_pet_with_photo(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let (name, animal_type, age) = ("Glasha", "bulldog", "1");
    let key = ctx.api_key().await?;
    let photo = ctx.photos.load(PhotoFixtures::BULLDOG).await?;

    let response = ctx
        .client
        .create_pet(&key, name, animal_type, age, &photo)
        .await?;
    expect_status(&response, 200)?;
    let created = match expect_pet(&response) {
        Ok(pet) => pet,
        Err(e) => {
            ctx.cleanup_created(&key, &response).await;
            return Err(e);
        }
    };

    let result = async {
        check!(created.name == name, "expected name {:?}, got {:?}", name, created.name);
        let mine = ctx.my_pets(&key).await?;
        let listed = mine.pets.iter().find(|p| p.id == created.id);
        check!(
            listed.is_some_and(|p| p.name == name),
            "created pet {} missing from my_pets",
            created.id
        );
        Ok(())
    }
    .await;

    ctx.cleanup(&key, &created.id).await;
    result
}

async fn create_pet_simple(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let (name, animal_type, age) = ("Lapa", "mongrel", "2");
    let key = ctx.api_key().await?;

    let response = ctx
        .client
        .create_pet_simple(&key, name, animal_type, age)
        .await?;
    ctx.cleanup_created(&key, &response).await;

    expect_status(&response, 200)?;
    check!(
        response.field_str("name") == Some(name),
        "expected name {:?} in body: {}",
        name,
        response.text()
    );
    Ok(())
}

async fn update_own_pet(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let (name, animal_type, age) = ("Mur", "cat", "2");
    let key = ctx.api_key().await?;
    let pet = ctx.seed_pet(&key, "Lapa", "mongrel", "1").await?;
    debug!(pet_id = %pet.id, "updating pet");

    let result = async {
        let response = ctx
            .client
            .update_pet(&key, &pet.id, name, animal_type, age)
            .await?;
        expect_status(&response, 200)?;
        check!(
            response.field_str("name") == Some(name),
            "expected name {:?} in body: {}",
            name,
            response.text()
        );

        let mine = ctx.my_pets(&key).await?;
        let listed = mine.pets.iter().find(|p| p.id == pet.id);
        check!(
            listed.is_some_and(|p| p.name == name),
            "pet {} not renamed to {:?} in my_pets",
            pet.id,
            name
        );
        Ok(())
    }
    .await;

    ctx.cleanup(&key, &pet.id).await;
    result
}

async fn delete_own_pet(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let key = ctx.api_key().await?;
    let photo = ctx.photos.load(PhotoFixtures::CAT).await?;

    let response = ctx.client.create_pet(&key, "Mur", "cat", "1", &photo).await?;
    expect_status(&response, 200).map_err(ScenarioError::into_setup)?;
    let pet = match expect_pet(&response) {
        Ok(pet) => pet,
        Err(e) => {
            ctx.cleanup_created(&key, &response).await;
            return Err(e.into_setup());
        }
    };

    let result = async {
        let before = ctx.my_pets(&key).await?;
        check!(
            before.contains_id(&pet.id),
            "seeded pet {} missing from my_pets",
            pet.id
        );

        let response = ctx.client.delete_pet(&key, &pet.id).await?;
        expect_status(&response, 200)?;

        let after = ctx.my_pets(&key).await?;
        check!(
            !after.contains_id(&pet.id),
            "deleted pet {} still listed in my_pets",
            pet.id
        );
        Ok(())
    }
    .await;

    if result.is_err() {
        ctx.cleanup(&key, &pet.id).await;
    }
    result
}

async fn set_photo_on_own_pet(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let key = ctx.api_key().await?;
    let pet = ctx.seed_pet(&key, "Lapa", "mongrel", "2").await?;

    let result = async {
        let photo = ctx.photos.load(PhotoFixtures::LAPA).await?;
        let response = ctx.client.attach_photo(&key, &pet.id, &photo).await?;
        expect_status(&response, 200)?;
        let updated = expect_pet(&response)?;
        check!(updated.id == pet.id, "photo landed on {} instead of {}", updated.id, pet.id);
        check!(updated.has_photo(), "pet_photo is empty after upload");
        Ok(())
    }
    .await;

    ctx.cleanup(&key, &pet.id).await;
    result
}

async fn create_pet_twice_not_idempotent(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let (name, animal_type, age) = ("Lapa", "mongrel", "2");
    let key = ctx.api_key().await?;

    let first = ctx.seed_pet(&key, name, animal_type, age).await?;
    let second = ctx.seed_pet(&key, name, animal_type, age).await;
    let second = match second {
        Ok(pet) => pet,
        Err(e) => {
            ctx.cleanup(&key, &first.id).await;
            return Err(e);
        }
    };

    ctx.cleanup(&key, &first.id).await;
    ctx.cleanup(&key, &second.id).await;

    check!(
        first.id != second.id,
        "repeated create returned the same id {}",
        first.id
    );
    Ok(())
}
