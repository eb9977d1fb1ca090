//! Request bodies.
//!
//! Bodies are decoded leniently. Only the first JSON value is read and
//! anything after it is ignored. A `null` body is the zero value. Field
//! names match case-insensitively and the last duplicate wins. Unknown
//! fields and `null` field values are ignored, and missing fields take
//! their zero value, so `{}` is a valid (if useless) create request.

use crate::error::ApiError;
use friendgraph_graph::UserId;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// Body of `POST /create`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserParams {
    pub name: String,
    pub age: i64,
    pub friends: Vec<UserId>,
}

/// Body of `POST /make_friends`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MakeFriendsParams {
    pub source_id: UserId,
    pub target_id: UserId,
}

/// Body of `DELETE /user`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserParams {
    pub target_id: UserId,
}

/// Body of `PUT /user_age/{user_id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateAgeParams {
    pub new_age: i64,
}

/// Top-level body: `null` or an object with its entries in document order.
enum RawBody {
    Null,
    Object(Vec<(String, Value)>),
}

impl<'de> Deserialize<'de> for RawBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawBodyVisitor;

        impl<'de> Visitor<'de> for RawBodyVisitor {
            type Value = RawBody;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object or null")
            }

            fn visit_unit<E>(self) -> Result<RawBody, E> {
                Ok(RawBody::Null)
            }

            fn visit_none<E>(self) -> Result<RawBody, E> {
                Ok(RawBody::Null)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawBody, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(RawBody::Object(entries))
            }
        }

        deserializer.deserialize_any(RawBodyVisitor)
    }
}

/// Parses a JSON request body.
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    let raw = serde_json::Deserializer::from_slice(body)
        .into_iter::<RawBody>()
        .next()
        .ok_or_else(|| ApiError::MalformedRequest("empty body".to_string()))?
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;

    let entries = match raw {
        RawBody::Null => return Ok(T::default()),
        RawBody::Object(entries) => entries,
    };

    // Field names are all lowercase, so folding keys gives
    // case-insensitive matching. Later keys overwrite earlier ones.
    let mut folded = Map::new();
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        folded.insert(key.to_lowercase(), value);
    }

    serde_json::from_value(Value::Object(folded))
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))
}
