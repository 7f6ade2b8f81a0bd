use std::{
    cell::RefCell,
    collections::HashMap,
};

use serde_json::{
    json,
    Value,
};

use super::{
    ApiError,
    Session,
};

type Handler = dyn Fn(&str, &Value) -> Result<Value, ApiError>;

/// Scripted session which records every request it receives.
pub(crate) struct StubSession {
    handler: Box<Handler>,
    current_space: Option<String>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl StubSession {
    pub fn new(handler: impl Fn(&str, &Value) -> Result<Value, ApiError> + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            current_space: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A workspace with the given spaces and the trashed block ids per space.
    /// Delete requests always succeed.
    pub fn workspace(spaces: &[(&str, &str)], trash: &[(&str, &[&str])]) -> Self {
        let mut records = serde_json::Map::new();
        for (id, name) in spaces {
            records.insert(id.to_string(), json!({ "value": { "name": name } }));
        }
        let user_content = json!({ "recordMap": { "space": records } });

        let trash: HashMap<String, Value> = trash
            .iter()
            .map(|(space_id, ids)| {
                let results: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
                (space_id.to_string(), json!({ "results": results }))
            })
            .collect();

        Self::new(move |endpoint, payload| match endpoint {
            "loadUserContent" => Ok(user_content.clone()),
            "/api/v3/search" => {
                let space_id = payload["spaceId"].as_str().unwrap_or_default();
                Ok(trash
                    .get(space_id)
                    .cloned()
                    .unwrap_or_else(|| json!({ "results": [] })))
            }
            "deleteBlocks" => Ok(json!({})),
            other => panic!("unexpected endpoint {}", other),
        })
    }

    pub fn with_current_space(mut self, space_id: &str) -> Self {
        self.current_space = Some(space_id.to_string());
        self
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == endpoint)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Block ids of every `deleteBlocks` request in the order they were issued.
    pub fn deleted_batches(&self) -> Vec<Vec<String>> {
        self.calls_to("deleteBlocks")
            .iter()
            .map(|payload| {
                payload["blockIds"]
                    .as_array()
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|id| id.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Session for StubSession {
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        self.calls
            .borrow_mut()
            .push((endpoint.to_string(), payload.clone()));
        (self.handler)(endpoint, payload)
    }

    fn current_space_id(&self) -> Result<String, ApiError> {
        self.current_space.clone().ok_or(ApiError::NoDefaultSpace)
    }
}
