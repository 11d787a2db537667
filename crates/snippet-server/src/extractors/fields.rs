//! Lenient snippet body extractor
//!
//! Bodies are read the way a permissive JSON body parser reads them: a
//! missing body, or one sent without a JSON content type, yields no fields,
//! and field values are not type-checked. Only a body that claims to be
//! JSON but fails to parse is rejected.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use snippet_core::{NewSnippet, SnippetChanges};

/// `title`, `content` and `language` as sent by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

impl SnippetFields {
    fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            title: field(map, "title"),
            content: field(map, "content"),
            language: field(map, "language"),
        }
    }

    pub fn into_new(self) -> NewSnippet {
        NewSnippet {
            title: self.title,
            content: self.content,
            language: self.language,
        }
    }

    pub fn into_changes(self) -> SnippetChanges {
        SnippetChanges {
            title: self.title,
            content: self.content,
            language: self.language,
        }
    }
}

/// Strings are taken as-is, other non-null values as their JSON text.
fn field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for SnippetFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(
            req.headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if !json || bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(Self::from_object(&map)),
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(ApiError::BadRequest(format!("Invalid JSON body: {}", e))),
        }
    }
}
