use std::num::NonZeroUsize;

use serde::Serialize;
use serde_json::{
    Map,
    Value,
};

use crate::{
    ApiError,
    Session,
};

pub const SEARCH_ENDPOINT: &str = "/api/v3/search";
pub const DEFAULT_SEARCH_LIMIT: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(limit) => limit,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SearchSort {
    #[default]
    Relevance,
    LastEdited,
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of trashed blocks returned for one space.
    /// Only a single page is requested.
    pub limit: NonZeroUsize,
    pub sort: SearchSort,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            sort: SearchSort::default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrashQuery<'a> {
    r#type: &'static str,
    query: &'static str,
    filters: TrashFilters,
    sort: SearchSort,
    limit: NonZeroUsize,
    space_id: &'a str,
    source: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrashFilters {
    is_deleted_only: bool,
    exclude_templates: bool,
    is_navigable_only: bool,
    require_edit_permissions: bool,
    ancestors: Vec<String>,
    created_by: Vec<String>,
    edited_by: Vec<String>,
    last_edited_time: Map<String, Value>,
    created_time: Map<String, Value>,
}

impl TrashFilters {
    fn deleted_only() -> Self {
        Self {
            is_deleted_only: true,
            exclude_templates: false,
            is_navigable_only: true,
            require_edit_permissions: false,
            ancestors: Vec::new(),
            created_by: Vec::new(),
            edited_by: Vec::new(),
            last_edited_time: Map::new(),
            created_time: Map::new(),
        }
    }
}

pub fn list_trashed_blocks<S: Session + ?Sized>(
    session: &S,
    space_id: &str,
) -> Result<Vec<String>, ApiError> {
    list_trashed_blocks_with(session, space_id, &SearchOptions::default())
}

/// Search the trash of `space_id` and return the block ids in the order of the search results.
pub fn list_trashed_blocks_with<S: Session + ?Sized>(
    session: &S,
    space_id: &str,
    options: &SearchOptions,
) -> Result<Vec<String>, ApiError> {
    let query = TrashQuery {
        r#type: "BlocksInSpace",
        query: "",
        filters: TrashFilters::deleted_only(),
        sort: options.sort,
        limit: options.limit,
        space_id,
        source: "trash",
    };

    let response = session.post(SEARCH_ENDPOINT, &serde_json::to_value(&query)?)?;
    let results = response
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::UnexpectedShape("search response has no results".to_string()))?;

    let block_ids = results
        .iter()
        .map(|result| {
            result
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApiError::UnexpectedShape("search result without id".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if block_ids.len() >= options.limit.get() {
        log::warn!(
            "Space {} returned {} trashed blocks, more may remain after this run",
            space_id,
            block_ids.len()
        );
    }

    Ok(block_ids)
}
