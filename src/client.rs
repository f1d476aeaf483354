use crate::config::Context;
use crate::error::CliError;
use crate::models::{ApiKey, Pet, PetFilter, PetList};
use crate::photo::Photo;
use crate::ua::user_agent;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const AUTH_HEADER: &str = "auth_key";

/// Response body: parsed JSON when the payload parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Text(text);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Status code and normalized body of a single call. Non-2xx statuses are
/// ordinary values here; asserting on them is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Body,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn text(&self) -> String {
        match &self.body {
            Body::Json(value) => value.to_string(),
            Body::Text(text) => text.clone(),
        }
    }

    /// True when the body is a JSON object carrying `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.json()
            .and_then(Value::as_object)
            .is_some_and(|obj| obj.contains_key(name))
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.json().and_then(|v| v.get(name)).and_then(Value::as_str)
    }

    fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        self.json()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn api_key(&self) -> Option<String> {
        self.parse::<ApiKey>().map(|k| k.key)
    }

    pub fn pet(&self) -> Option<Pet> {
        self.parse()
    }

    pub fn pets(&self) -> Option<PetList> {
        self.parse()
    }
}

/// Stateless wrapper over the PetFriends REST endpoints.
///
/// Every operation returns `Ok` for any HTTP status; `Err` means the request
/// never completed (transport failure) or could not be built.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        Self::build(ctx.api_url(), ctx.timeout())
    }

    /// Create a client with an explicit base URL (for testing)
    pub fn with_base_url(base_url: String) -> Result<Self, CliError> {
        Self::build(base_url, None)
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self, CliError> {
        let mut builder = Client::builder().user_agent(user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/key` with the credentials passed as headers.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .get(self.url("/api/key"))
            .header("email", email)
            .header("password", password);

        self.execute("GET", "/api/key", request).await
    }

    pub async fn list_pets(
        &self,
        api_key: &str,
        filter: &PetFilter,
    ) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .get(self.url("/api/pets"))
            .header(AUTH_HEADER, api_key)
            .query(&[("filter", filter.as_str())]);

        self.execute("GET", "/api/pets", request).await
    }

    /// `POST /api/pets` as multipart, photo included.
    pub async fn create_pet(
        &self,
        api_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
        photo: &Photo,
    ) -> Result<ApiResponse, CliError> {
        let form = Form::new()
            .text("name", name.to_string())
            .text("animal_type", animal_type.to_string())
            .text("age", age.to_string())
            .part("pet_photo", photo_part(photo)?);

        let request = self
            .client
            .post(self.url("/api/pets"))
            .header(AUTH_HEADER, api_key)
            .multipart(form);

        self.execute("POST", "/api/pets", request).await
    }

    /// `POST /api/create_pet_simple` as a url-encoded form, no photo.
    pub async fn create_pet_simple(
        &self,
        api_key: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .post(self.url("/api/create_pet_simple"))
            .header(AUTH_HEADER, api_key)
            .form(&pet_fields(name, animal_type, age));

        self.execute("POST", "/api/create_pet_simple", request)
            .await
    }

    pub async fn update_pet(
        &self,
        api_key: &str,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: &str,
    ) -> Result<ApiResponse, CliError> {
        let path = format!("/api/pets/{}", pet_id);
        let request = self
            .client
            .put(self.url(&path))
            .header(AUTH_HEADER, api_key)
            .form(&pet_fields(name, animal_type, age));

        self.execute("PUT", &path, request).await
    }

    pub async fn delete_pet(&self, api_key: &str, pet_id: &str) -> Result<ApiResponse, CliError> {
        let path = format!("/api/pets/{}", pet_id);
        let request = self
            .client
            .delete(self.url(&path))
            .header(AUTH_HEADER, api_key);

        self.execute("DELETE", &path, request).await
    }

    /// `POST /api/pets/set_photo/{id}` with a single `pet_photo` part.
    pub async fn attach_photo(
        &self,
        api_key: &str,
        pet_id: &str,
        photo: &Photo,
    ) -> Result<ApiResponse, CliError> {
        let path = format!("/api/pets/set_photo/{}", pet_id);
        let form = Form::new().part("pet_photo", photo_part(photo)?);
        let request = self
            .client
            .post(self.url(&path))
            .header(AUTH_HEADER, api_key)
            .multipart(form);

        self.execute("POST", &path, request).await
    }

    async fn execute(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse, CliError> {
        debug!(method, path, "sending request");
        let response = request.send().await?;
        let response = Self::handle_response(response).await?;
        debug!(method, path, status = response.status, "received response");
        Ok(response)
    }

    async fn handle_response(response: Response) -> Result<ApiResponse, CliError> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(ApiResponse {
            status,
            body: Body::from_text(text),
        })
    }
}

fn pet_fields<'a>(name: &'a str, animal_type: &'a str, age: &'a str) -> [(&'static str, &'a str); 3] {
    [("name", name), ("animal_type", animal_type), ("age", age)]
}

fn photo_part(photo: &Photo) -> Result<Part, CliError> {
    let part = Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(photo.mime)?;
    Ok(part)
}
