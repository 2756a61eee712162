//! User profile types
//!
//! Profile as returned by `GET /auth/me` and embedded in login responses.

use serde::{Deserialize, Deserializer, Serialize};

/// Authenticated user's profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier; numeric ids are kept in their decimal form
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Date of birth as sent by the backend (`YYYY-MM-DD`)
    #[serde(default)]
    pub dob: Option<String>,
}

impl UserProfile {
    /// Name to show in greetings: explicit name, then first/last, then
    /// username, then email.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }

        self.username.clone().unwrap_or_else(|| self.email.clone())
    }

    /// Role label, defaulting to `User` when the backend omits it
    #[must_use]
    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or("User")
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}
