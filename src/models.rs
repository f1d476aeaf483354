//! Wire types for the PetFriends API.
//!
//! All records are owned by the remote service; these types only describe
//! the shapes the suite reads back out of response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tabled::Tabled;

/// Response of `GET /api/key`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiKey {
    pub key: String,
}

/// A pet record as returned by the list, create and update endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Tabled)]
pub struct Pet {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    /// The service echoes age back as either a string or a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default)]
    #[tabled(display_with = "display_photo")]
    pub pet_photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tabled(skip)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tabled(skip)]
    pub user_id: Option<String>,
}

impl Pet {
    pub fn has_photo(&self) -> bool {
        !self.pet_photo.is_empty()
    }
}

fn display_photo(photo: &str) -> String {
    if photo.is_empty() { "-" } else { "yes" }.to_string()
}

/// Response of `GET /api/pets`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn contains_id(&self, id: &str) -> bool {
        self.pets.iter().any(|p| p.id == id)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Value of the `filter` query parameter on the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PetFilter {
    /// Every pet visible on the site (`""`).
    #[default]
    All,
    /// Pets owned by the key's account (`"my_pets"`).
    MyPets,
    /// Any other value, sent as-is for the server to interpret.
    Other(String),
}

impl PetFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "",
            Self::MyPets => "my_pets",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for PetFilter {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::All,
            "my_pets" => Self::MyPets,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            other => f.write_str(other.as_str()),
        }
    }
}
