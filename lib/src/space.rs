use serde_json::{
    json,
    Value,
};

use crate::{
    ApiError,
    Session,
};

pub const DEFAULT_SPACE_NAME: &str = "Default space";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: String,

    /// Display name, not guaranteed to be unique.
    pub name: String,
}

impl Space {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// List every space the session's user can access, in the order the remote side returns them.
///
/// Accounts which cannot enumerate their spaces get a single entry for the session's
/// current space named [`DEFAULT_SPACE_NAME`]. Only a malformed response is recovered,
/// a failing request is returned as error.
pub fn enumerate_spaces<S: Session + ?Sized>(session: &S) -> Result<Vec<Space>, ApiError> {
    let response = session.post("loadUserContent", &json!({}))?;
    match parse_spaces(&response) {
        Ok(spaces) => Ok(spaces),
        Err(error) => {
            log::warn!("Failed to enumerate spaces ({}), using the default space", error);
            Ok(vec![Space::new(session.current_space_id()?, DEFAULT_SPACE_NAME)])
        }
    }
}

fn parse_spaces(response: &Value) -> Result<Vec<Space>, ApiError> {
    let records = response
        .get("recordMap")
        .and_then(|record_map| record_map.get("space"))
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::UnexpectedShape("missing recordMap.space".to_string()))?;

    records
        .iter()
        .map(|(id, record)| -> Result<Space, ApiError> {
            let name = record
                .get("value")
                .and_then(|value| value.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ApiError::UnexpectedShape(format!("space {} has no value.name", id))
                })?;

            Ok(Space::new(id.as_str(), name))
        })
        .collect()
}
