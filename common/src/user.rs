use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// What the user told us about themselves. Every field is optional for
/// the engine; [`UserData::validate`] applies the stricter form rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl UserData {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Requires a non-blank name and a birth date.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            return Err(InputError::MissingName);
        }
        if self.birth_date.is_none() {
            return Err(InputError::MissingBirthDate);
        }
        Ok(())
    }

    /// The location, if one was given and is not blank.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}
