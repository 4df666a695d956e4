use std::{collections::HashMap, convert::Infallible};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shared::domain::{flag, lenient_int, Button};

/// Query string parameters, first occurrence of each key wins.
///
/// Extraction never fails: handlers decide how a missing or malformed value
/// is interpreted.
#[derive(Debug, Default)]
pub(crate) struct Params(HashMap<String, String>);

impl Params {
    pub(crate) fn parse(query: Option<&str>) -> Self {
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            values
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self(values)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub(crate) fn int(&self, key: &str) -> i64 {
        lenient_int(self.get(key))
    }

    pub(crate) fn flag(&self, key: &str) -> bool {
        flag(self.get(key))
    }

    pub(crate) fn button(&self) -> Button {
        Button::from_query(self.get("button").unwrap_or_default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query()))
    }
}

#[cfg(test)]
#[path = "tests/params_tests.rs"]
mod tests;
