//! Shared test utilities for petfriends-cli integration tests
//!
//! [`FakePetFriends`] is an in-memory stand-in for the PetFriends service,
//! mounted on a wiremock server. By default it reproduces the live service's
//! lax validation (empty fields are accepted); [`FakePetFriends::strict`]
//! rejects them with 400 the way the API documentation says it should.

#![allow(dead_code)]

use petfriends_cli::client::ApiClient;
use petfriends_cli::credentials::Credentials;
use petfriends_cli::photo::PhotoFixtures;
use petfriends_cli::scenario::ScenarioContext;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_EMAIL: &str = "tester@example.com";
pub const TEST_PASSWORD: &str = "correct-horse";
pub const TEST_API_KEY: &str = "ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae729";

/// Create a client pointing to a mock server
pub fn create_test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url.to_string()).expect("Failed to create test client")
}

/// The photo fixtures shipped in the repository's images/ directory
pub fn repo_photos() -> PhotoFixtures {
    PhotoFixtures::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("images"))
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_EMAIL, TEST_PASSWORD)
}

/// Scenario context wired to a mock server with the test account
pub fn scenario_context(server: &MockServer) -> ScenarioContext {
    ScenarioContext::new(
        create_test_client(&server.uri()),
        test_credentials(),
        repo_photos(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakePet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
}

impl FakePet {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "animal_type": self.animal_type,
            "age": self.age,
            "pet_photo": self.pet_photo,
            "created_at": "1700000000.0",
            "user_id": "fake-user",
        })
    }
}

#[derive(Debug, Default)]
struct FakeState {
    strict: bool,
    owned: Vec<FakePet>,
    others: Vec<FakePet>,
}

#[derive(Clone, Default)]
pub struct FakePetFriends {
    state: Arc<Mutex<FakeState>>,
}

impl FakePetFriends {
    /// Lax fake with one pet belonging to another account.
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().others.push(FakePet {
            id: Uuid::new_v4().to_string(),
            name: "Sharik".to_string(),
            animal_type: "mongrel".to_string(),
            age: "4".to_string(),
            pet_photo: String::new(),
        });
        fake
    }

    /// Reject empty name, animal_type or age with 400.
    pub fn strict() -> Self {
        let fake = Self::new();
        fake.state.lock().unwrap().strict = true;
        fake
    }

    pub fn with_owned_pet(self, name: &str, animal_type: &str, age: &str) -> Self {
        self.state.lock().unwrap().owned.push(FakePet {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
            pet_photo: String::new(),
        });
        self
    }

    pub fn owned(&self) -> Vec<FakePet> {
        self.state.lock().unwrap().owned.clone()
    }

    pub async fn start() -> (MockServer, Self) {
        Self::new().serve().await
    }

    /// Mount on a fresh server. The fake has the lowest priority, so mocks
    /// mounted afterwards override individual endpoints.
    pub async fn serve(self) -> (MockServer, Self) {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(self.clone())
            .with_priority(u8::MAX)
            .mount(&server)
            .await;
        (server, self)
    }

    fn handle(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().to_string();
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let method = request.method.as_str();

        if (method, segments.as_slice()) == ("GET", ["api", "key"].as_slice()) {
            return authenticate(request);
        }
        if header(request, "auth_key").as_deref() != Some(TEST_API_KEY) {
            return forbidden();
        }

        let mut state = self.state.lock().unwrap();
        match (method, segments.as_slice()) {
            ("GET", ["api", "pets"]) => {
                let filter = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "filter")
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default();
                let pets: Vec<Value> = match filter.as_str() {
                    "my_pets" => state.owned.iter().map(FakePet::to_json).collect(),
                    "" => state
                        .owned
                        .iter()
                        .chain(state.others.iter())
                        .map(FakePet::to_json)
                        .collect(),
                    _ => return ResponseTemplate::new(500).set_body_string("Filter value is incorrect"),
                };
                ResponseTemplate::new(200).set_body_json(json!({ "pets": pets }))
            }
            ("POST", ["api", "pets"]) => {
                let fields = multipart_fields(request);
                if !fields.contains_key("pet_photo") {
                    return bad_request();
                }
                state.create(&fields, "data:image/jpeg;base64,/9j/4AAQ")
            }
            ("POST", ["api", "create_pet_simple"]) => {
                let fields = form_fields(request);
                state.create(&fields, "")
            }
            ("PUT", ["api", "pets", id]) => {
                let fields = form_fields(request);
                match state.owned.iter_mut().find(|p| p.id == *id) {
                    Some(pet) => {
                        pet.name = fields.get("name").cloned().unwrap_or_default();
                        pet.animal_type = fields.get("animal_type").cloned().unwrap_or_default();
                        pet.age = fields.get("age").cloned().unwrap_or_default();
                        ResponseTemplate::new(200).set_body_json(pet.to_json())
                    }
                    None => bad_request(),
                }
            }
            ("DELETE", ["api", "pets", id]) => {
                state.owned.retain(|p| p.id != *id);
                ResponseTemplate::new(200)
            }
            ("POST", ["api", "pets", "set_photo", id]) => {
                let fields = multipart_fields(request);
                let has_photo = fields.get("pet_photo").is_some_and(|p| !p.is_empty());
                match state.owned.iter_mut().find(|p| p.id == *id) {
                    Some(pet) if has_photo => {
                        pet.pet_photo = "data:image/jpeg;base64,/9j/4AAQ".to_string();
                        ResponseTemplate::new(200).set_body_json(pet.to_json())
                    }
                    _ => bad_request(),
                }
            }
            _ => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }
}

impl FakeState {
    fn create(&mut self, fields: &HashMap<String, String>, photo: &str) -> ResponseTemplate {
        let get = |k: &str| fields.get(k).cloned().unwrap_or_default();
        let pet = FakePet {
            id: Uuid::new_v4().to_string(),
            name: get("name"),
            animal_type: get("animal_type"),
            age: get("age"),
            pet_photo: photo.to_string(),
        };
        if self.strict && (pet.name.is_empty() || pet.animal_type.is_empty() || pet.age.is_empty()) {
            return bad_request();
        }
        let body = pet.to_json();
        self.owned.insert(0, pet);
        ResponseTemplate::new(200).set_body_json(body)
    }
}

impl Respond for FakePetFriends {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}

fn authenticate(request: &Request) -> ResponseTemplate {
    let email = header(request, "email");
    let password = header(request, "password");
    if email.as_deref() == Some(TEST_EMAIL) && password.as_deref() == Some(TEST_PASSWORD) {
        ResponseTemplate::new(200).set_body_json(json!({ "key": TEST_API_KEY }))
    } else {
        forbidden()
    }
}

fn forbidden() -> ResponseTemplate {
    ResponseTemplate::new(403)
        .insert_header("content-type", "text/html")
        .set_body_string("<h1>Forbidden</h1><p>This user wasn't found in database</p>")
}

fn bad_request() -> ResponseTemplate {
    ResponseTemplate::new(400)
        .insert_header("content-type", "text/html")
        .set_body_string("<h1>Bad Request</h1>")
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Decode an application/x-www-form-urlencoded body.
pub fn form_fields(request: &Request) -> HashMap<String, String> {
    let body = String::from_utf8_lossy(&request.body);
    reqwest::Url::parse(&format!("http://fake/?{}", body))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

/// Minimal multipart/form-data decoding: part name to (lossy) content.
pub fn multipart_fields(request: &Request) -> HashMap<String, String> {
    let Some(boundary) = header(request, "content-type")
        .and_then(|ct| ct.split("boundary=").nth(1).map(str::to_string))
    else {
        return HashMap::new();
    };
    let body = String::from_utf8_lossy(&request.body).into_owned();
    let delimiter = format!("--{}", boundary);

    body.split(delimiter.as_str())
        .filter_map(|part| {
            let (head, content) = part.split_once("\r\n\r\n")?;
            let name = head.split("name=\"").nth(1)?.split('"').next()?;
            let content = content.strip_suffix("\r\n").unwrap_or(content);
            Some((name.to_string(), content.to_string()))
        })
        .collect()
}
