//! Authentication scenarios.

use super::{Expectation, Scenario, ScenarioContext, ScenarioError, expect_status};

pub const INVALID_EMAIL: &str = "abr@yandex.ru";
pub const INVALID_PASSWORD: &str = "12345";

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "auth_valid_credentials",
            "Valid credentials return 200 and a key",
            Expectation::Pass,
            boxed!(valid_credentials),
        ),
        Scenario::new(
            "auth_invalid_email",
            "Unknown email returns 403 and no key",
            Expectation::Pass,
            boxed!(invalid_email),
        ),
        Scenario::new(
            "auth_invalid_password",
            "Wrong password returns 403 and no key",
            Expectation::Pass,
            boxed!(invalid_password),
        ),
    ]
}

async fn valid_credentials(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let creds = &ctx.credentials;
    let response = ctx.client.authenticate(&creds.email, &creds.password).await?;

    expect_status(&response, 200)?;
    check!(response.has_field("key"), "body has no key: {}", response.text());
    Ok(())
}

async fn invalid_email(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let response = ctx
        .client
        .authenticate(INVALID_EMAIL, &ctx.credentials.password)
        .await?;

    expect_status(&response, 403)?;
    check!(!response.has_field("key"), "rejected login still returned a key");
    Ok(())
}

async fn invalid_password(ctx: &ScenarioContext) -> Result<(), ScenarioError> {
    let response = ctx
        .client
        .authenticate(&ctx.credentials.email, INVALID_PASSWORD)
        .await?;

    expect_status(&response, 403)?;
    check!(!response.has_field("key"), "rejected login still returned a key");
    Ok(())
}
