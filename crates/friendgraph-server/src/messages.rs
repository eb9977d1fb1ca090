//! User-facing response text.
//!
//! The store only reports structured errors. Everything a client reads
//! as text is produced here, in the configured language.

use crate::error::{ApiError, Rejection};
use friendgraph_graph::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The service's historical wording.
    #[default]
    Ru,
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ru => "ru",
            Self::En => "en",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Message catalog for one language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    lang: Language,
}

impl Messages {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn user_created(&self, id: &str) -> String {
        format!("User ID: {}", id)
    }

    pub fn now_friends(&self, source: &str, target: &str) -> String {
        match self.lang {
            Language::Ru => format!("{} и {} теперь друзья", source, target),
            Language::En => format!("{} and {} are now friends", source, target),
        }
    }

    pub fn user_deleted(&self, name: &str) -> String {
        match self.lang {
            Language::Ru => format!("{} удалён", name),
            Language::En => format!("{} deleted", name),
        }
    }

    pub fn age_updated(&self) -> String {
        match self.lang {
            Language::Ru => "Возраст пользователя успешно обновлён".to_string(),
            Language::En => "User age updated successfully".to_string(),
        }
    }

    /// Text for an error.
    pub fn describe(&self, err: &ApiError) -> String {
        match err {
            ApiError::MalformedRequest(_) => "Invalid request body".to_string(),
            ApiError::Graph(GraphError::UnknownUser(_)) => "User not found".to_string(),
            ApiError::Graph(GraphError::UnknownPair { .. }) => {
                "One or both users not found".to_string()
            }
            ApiError::Graph(GraphError::EmptyCollection) => match self.lang {
                Language::Ru => "Список пользователей пуст".to_string(),
                Language::En => "The user list is empty".to_string(),
            },
            ApiError::Encoding(_) => match self.lang {
                Language::Ru => "Ошибка при формировании ответа".to_string(),
                Language::En => "Failed to build the response".to_string(),
            },
        }
    }

    /// Builds the response for an error.
    pub fn reject(&self, err: ApiError) -> Rejection {
        Rejection {
            status: err.status_code(),
            message: self.describe(&err),
        }
    }
}
