//! Input validation the service documents but does not enforce.
//!
//! Each scenario asserts the documented behavior (400 for a missing required
//! field). The live service answers 200 and stores the incomplete pet, so all
//! of these are declared as known defects.

use super::{Expectation, Scenario, ScenarioContext, ScenarioError, expect_rejected};
use crate::photo::PhotoFixtures;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "create_simple_empty_name",
            "Simple create without a name is rejected with 400",
            Expectation::KnownDefect("service returns 200 and creates a pet with no name"),
            boxed!(simple_empty_name),
        ),
        Scenario::new(
            "create_simple_empty_name_and_type",
            "Simple create without name and animal type is rejected with 400",
            Expectation::KnownDefect(
                "service returns 200 and creates a pet with no name or animal type",
            ),
            boxed!(simple_empty_name_and_type),
        ),
        Scenario::new(
            "create_simple_empty_data",
            "Simple create with every field empty is rejected with 400",
            Expectation::KnownDefect("service returns 200 and creates an empty pet"),
            boxed!(simple_empty_data),
        ),
        Scenario::new(
            "create_with_photo_empty_name",
            "Create with photo but no name is rejected with 400",
            Expectation::KnownDefect("service returns 200 and adds the pet without a name"),
            boxed!(photo_empty_name),
        ),
        Scenario::new(
            "create_with_photo_empty_type",
            "Create with photo but no animal type is rejected with 400",
            Expectation::KnownDefect("service returns 200 and adds the pet without an animal type"),
            boxed!(photo_empty_type),
        ),
        Scenario::new(
            "create_with_photo_empty_age",
            "Create with photo but no age is rejected with 400",
            Expectation::KnownDefect("service returns 200 and adds the pet without an age"),
            boxed!(photo_empty_age),
        ),
    ]
}

async fn rejects_simple(
    ctx: &ScenarioContext,
    name: &str,
    animal_type: &str,
    age: &str,
) -> Result<(), ScenarioError> {
    let key = ctx.api_key().await?;
    let response = ctx
        .client
        .create_pet_simple(&key, name, animal_type, age)
        .await?;
    ctx.cleanup_created(&key, &response).await;

    expect_rejected(&response)
}

async fn rejects_with_photo(
    ctx: &ScenarioContext,
    name: &str,
    animal_type: &str,
    age: &str,
) -> Result<(), ScenarioError> {
    let key = ctx.api_key().await?;
    let photo = ctx.photos.load(PhotoFixtures::BULLDOG).await?;
    let response = ctx
        .client
        .create_pet(&key, name, animal_type, age, &photo)
        .await?;
    ctx.cleanup_created(&key, &response).await;

    expect_rejected(&response)
}

async fn simple_empty_name(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_simple(ctx, "", "mongrel", "2").await
}

async fn simple_empty_name_and_type(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_simple(ctx, "", "", "2").await
}

async fn simple_empty_data(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_simple(ctx, "", "", "").await
}

async fn photo_empty_name(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_with_photo(ctx, "", "bulldog", "1").await
}

async fn photo_empty_type(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_with_photo(ctx, "Glasha", "", "1").await
}

async fn photo_empty_age(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    rejects_with_photo(ctx, "Glasha", "bulldog", "").await
}
