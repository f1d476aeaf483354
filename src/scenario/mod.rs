//! End-to-end scenarios against the PetFriends API.
//!
//! A scenario is a short, linear procedure: obtain a key, make a few setup
//! calls, make the call under test, check status and body. Scenarios seed
//! whatever pets they need and remove them afterwards, so any subset can run
//! in any order.
//!
//! Documented server defects are declared up front with
//! [`Expectation::KnownDefect`]: the scenario still asserts the *correct*
//! behavior, and the runner reports the failed check as a known defect
//! instead of a failure.

use crate::client::{ApiClient, ApiResponse};
use crate::credentials::Credentials;
use crate::error::CliError;
use crate::models::{Pet, PetFilter, PetList};
use crate::photo::PhotoFixtures;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::{debug, warn};

/// Fail the current scenario with a formatted message unless `cond` holds.
macro_rules! check {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::scenario::ScenarioError::Check(format!($($arg)+)));
        }
    };
}

/// Adapt an `async fn(&ScenarioContext) -> Result<(), ScenarioError>` into a [`ScenarioFn`].
macro_rules! boxed {
    ($body:ident) => {{
        fn run(ctx: &$crate::scenario::ScenarioContext) -> $crate::scenario::ScenarioFuture<'_> {
            Box::pin($body(ctx))
        }
        run
    }};
}

mod auth;
mod defects;
mod pets;
pub mod runner;

pub use runner::{Outcome, Report, RunOptions, ScenarioResult, Summary};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("check failed: {0}")]
    Check(String),

    /// A check that guards setup (login, seeding) rather than the call
    /// under test. Never counted as a known defect.
    #[error("setup failed: {0}")]
    Setup(String),

    /// The call under test answered in a way that is neither the correct
    /// behavior nor the documented defect.
    #[error("unexpected response: {0}")]
    Unexpected(String),

    #[error(transparent)]
    Client(#[from] CliError),
}

impl ScenarioError {
    fn into_setup(self) -> Self {
        match self {
            Self::Check(msg) => Self::Setup(msg),
            other => other,
        }
    }
}

pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ScenarioError>> + Send + 'a>>;
pub type ScenarioFn = for<'a> fn(&'a ScenarioContext) -> ScenarioFuture<'a>;

/// What the suite expects a scenario's checks to do against the live service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Pass,
    /// The checks describe correct behavior the service is known not to
    /// implement; the note says what the service does instead.
    KnownDefect(&'static str),
}

#[derive(Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub expectation: Expectation,
    run: ScenarioFn,
}

impl Scenario {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        expectation: Expectation,
        run: ScenarioFn,
    ) -> Self {
        Self {
            name,
            description,
            expectation,
            run,
        }
    }

    pub async fn execute(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        (self.run)(ctx).await
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("expectation", &self.expectation)
            .finish_non_exhaustive()
    }
}

/// Every scenario, in the order the suite runs them.
pub fn catalogue() -> Vec<Scenario> {
    let mut all = auth::scenarios();
    all.extend(pets::scenarios());
    all.extend(defects::scenarios());
    all
}

/// Pick scenarios by name, preserving the requested order. An empty
/// selection means the whole catalogue.
pub fn select(names: &[String]) -> Result<Vec<Scenario>, CliError> {
    let all = catalogue();
    if names.is_empty() {
        return Ok(all);
    }
    names
        .iter()
        .map(|name| {
            all.iter()
                .find(|s| s.name == name.as_str())
                .cloned()
                .ok_or_else(|| CliError::UnknownScenario(name.clone()))
        })
        .collect()
}

/// Everything a scenario needs, passed in explicitly.
pub struct ScenarioContext {
    pub client: ApiClient,
    pub credentials: Credentials,
    pub photos: PhotoFixtures,
}

impl ScenarioContext {
    pub fn new(client: ApiClient, credentials: Credentials, photos: PhotoFixtures) -> Self {
        Self {
            client,
            credentials,
            photos,
        }
    }

    /// Authenticate with the configured credentials and return the key.
    pub async fn api_key(&self) -> Result<String, ScenarioError> {
        let response = self
            .client
            .authenticate(&self.credentials.email, &self.credentials.password)
            .await?;
        expect_status(&response, 200).map_err(ScenarioError::into_setup)?;
        response
            .api_key()
            .ok_or_else(|| ScenarioError::Setup(format!("no key in body: {}", response.text())))
    }

    pub async fn my_pets(&self, api_key: &str) -> Result<PetList, ScenarioError> {
        let response = self.client.list_pets(api_key, &PetFilter::MyPets).await?;
        expect_status(&response, 200).map_err(ScenarioError::into_setup)?;
        expect_pets(&response).map_err(ScenarioError::into_setup)
    }

    /// Create a pet without a photo and return the server's record.
    pub async fn seed_pet(
        &self,
        api_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<Pet, ScenarioError> {
        let response = self
            .client
            .create_pet_simple(api_key, name, animal_type, age)
            .await?;
        expect_status(&response, 200).map_err(ScenarioError::into_setup)?;
        let pet = expect_pet(&response).map_err(ScenarioError::into_setup)?;
        debug!(pet_id = %pet.id, name, "seeded pet");
        Ok(pet)
    }

    /// Best-effort removal of a pet this scenario created.
    pub async fn cleanup(&self, api_key: &str, pet_id: &str) {
        match self.client.delete_pet(api_key, pet_id).await {
            Ok(response) if response.is_success() => debug!(pet_id, "cleaned up pet"),
            Ok(response) => warn!(pet_id, status = response.status, "cleanup delete rejected"),
            Err(e) => warn!(pet_id, error = %e, "cleanup delete failed"),
        }
    }

    /// Remove a pet only if the response shows one was actually created.
    pub async fn cleanup_created(&self, api_key: &str, response: &ApiResponse) {
        if !response.is_success() {
            return;
        }
        if let Some(id) = response.field_str("id") {
            self.cleanup(api_key, id).await;
        }
    }
}

pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), ScenarioError> {
    check!(
        response.status == expected,
        "expected status {}, got {} (body: {})",
        expected,
        response.status,
        response.text()
    );
    Ok(())
}

/// Expect invalid input to be rejected with 400. Only a 2xx answer counts
/// as the service accepting it; any other status is an unexpected response.
pub fn expect_rejected(response: &ApiResponse) -> Result<(), ScenarioError> {
    match response.status {
        400 => Ok(()),
        _ if response.is_success() => Err(ScenarioError::Check(format!(
            "expected status 400, got {} (body: {})",
            response.status,
            response.text()
        ))),
        status => Err(ScenarioError::Unexpected(format!(
            "expected status 400, got {} (body: {})",
            status,
            response.text()
        ))),
    }
}

pub fn expect_pet(response: &ApiResponse) -> Result<Pet, ScenarioError> {
    response
        .pet()
        .ok_or_else(|| ScenarioError::Check(format!("body is not a pet record: {}", response.text())))
}

pub fn expect_pets(response: &ApiResponse) -> Result<PetList, ScenarioError> {
    check!(
        response.has_field("pets"),
        "body has no pets collection: {}",
        response.text()
    );
    response
        .pets()
        .ok_or_else(|| ScenarioError::Check(format!("malformed pets collection: {}", response.text())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_are_unique() {
        let all = catalogue();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn test_known_defects_are_declared() {
        let defects: Vec<_> = catalogue()
            .into_iter()
            .filter(|s| matches!(s.expectation, Expectation::KnownDefect(_)))
            .map(|s| s.name)
            .collect();

        assert_eq!(defects.len(), 6);
        assert!(defects.contains(&"create_simple_empty_name"));
        assert!(defects.contains(&"create_with_photo_empty_age"));
    }

    #[test]
    fn test_select_preserves_requested_order() {
        let picked = select(&["list_all_pets".to_string(), "auth_invalid_email".to_string()])
            .unwrap();
        let names: Vec<_> = picked.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["list_all_pets", "auth_invalid_email"]);
    }

    fn response(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            body: crate::client::Body::Text(String::new()),
        }
    }

    #[test]
    fn test_expect_rejected_only_accepts_400() {
        assert!(expect_rejected(&response(400)).is_ok());
        assert!(matches!(
            expect_rejected(&response(200)),
            Err(ScenarioError::Check(_))
        ));
        for status in [403, 404, 500, 503] {
            assert!(matches!(
                expect_rejected(&response(status)),
                Err(ScenarioError::Unexpected(_))
            ));
        }
    }

    #[test]
    fn test_select_empty_means_all() {
        assert_eq!(select(&[]).unwrap().len(), catalogue().len());
    }

    #[test]
    fn test_select_unknown_name() {
        let err = select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::UnknownScenario(name) if name == "nope"));
    }
}
