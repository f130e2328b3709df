// fetcher.rs
use crate::catalog::raw::number;
use crate::catalog::search::SearchQuery;
use crate::fetcher::{FetchError, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A public listing endpoint and where its records sit in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub fallback: Option<&'static str>,
    /// Envelope field holding the list (`locations`, `parcelles`, ...).
    pub field: &'static str,
}

/// Result of one fetch, keeping "no data" and "backend down" apart.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Value>),
    Empty,
    Failed(FetchError),
}

impl FetchOutcome {
    fn from_items(items: Vec<Value>) -> Self {
        if items.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Loaded(items)
        }
    }
}

/// Pull the record list out of whichever envelope the backend used.
///
/// Accepted shapes: a bare array, `{ <field>: [...] }`, `{ items: [...] }`,
/// and any of those nested under `data`.
pub fn extract_items(body: &Value, field: &str) -> Vec<Value> {
    fn from_object(v: &Value, field: &str) -> Option<Vec<Value>> {
        [field, "items"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_array).cloned())
    }

    match body {
        Value::Array(items) => items.clone(),
        Value::Object(_) => from_object(body, field)
            .or_else(|| match body.get("data") {
                Some(Value::Array(items)) => Some(items.clone()),
                Some(data @ Value::Object(_)) => from_object(data, field),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Totals the search endpoint reports next to its page of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub total: Option<usize>,
    pub pages: Option<usize>,
}

/// Read `total` / `pages` from `pagination`, the root, or the same under `data`.
pub fn extract_page_meta(body: &Value) -> PageMeta {
    fn read(scopes: &[&Value], keys: &[&str]) -> Option<usize> {
        scopes.iter().find_map(|scope| {
            scope
                .get("pagination")
                .and_then(|p| number(p, keys))
                .or_else(|| number(scope, keys))
                .filter(|n| *n >= 0.0)
                .map(|n| n as usize)
        })
    }

    let scopes: Vec<&Value> = [Some(body), body.get("data")].into_iter().flatten().collect();
    PageMeta {
        total: read(&scopes, &["total", "totalItems"]),
        pages: read(&scopes, &["pages", "totalPages"]),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub outcome: FetchOutcome,
    pub meta: PageMeta,
}

pub struct Fetcher {
    transport: Arc<dyn Transport>,
    api_base: String,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        let url = self.url(path);
        debug!(%url, "GET");
        self.transport.get_json(&url, params)
    }

    /// GET the endpoint, falling back once to `endpoint.fallback` on any error.
    pub fn fetch(&self, endpoint: &Endpoint) -> FetchOutcome {
        match self.fetch_body(endpoint, &[]) {
            Ok(body) => FetchOutcome::from_items(extract_items(&body, endpoint.field)),
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    fn fetch_body(&self, endpoint: &Endpoint, params: &[(String, String)]) -> Result<Value, FetchError> {
        let first = match self.get(endpoint.path, params) {
            Ok(body) => return Ok(body),
            Err(e) => e,
        };
        warn!(path = endpoint.path, error = %first, "primary endpoint failed");

        let Some(fallback) = endpoint.fallback else {
            return Err(first);
        };

        info!(path = fallback, "trying fallback endpoint");
        self.get(fallback, params)
            .inspect_err(|e| warn!(path = fallback, error = %e, "fallback endpoint failed too"))
    }

    pub fn search(&self, query: &SearchQuery) -> SearchResults {
        match self.fetch_body(&SEARCH_ENDPOINT, &query.to_params()) {
            Ok(body) => SearchResults {
                outcome: FetchOutcome::from_items(extract_items(&body, SEARCH_ENDPOINT.field)),
                meta: extract_page_meta(&body),
            },
            Err(e) => SearchResults {
                outcome: FetchOutcome::Failed(e),
                meta: PageMeta::default(),
            },
        }
    }

    /// Cities, quarters and types offered by the search form.
    pub fn filter_options(&self) -> Result<Value, FetchError> {
        self.get(FILTER_OPTIONS_PATH, &[])
            .map(|body| body.get("data").cloned().unwrap_or(body))
    }

    pub fn stats(&self) -> Result<Value, FetchError> {
        self.get(STATS_PATH, &[])
            .map(|body| body.get("data").cloned().unwrap_or(body))
    }
}

pub const SEARCH_ENDPOINT: Endpoint = Endpoint {
    path: "/locations/search",
    fallback: None,
    field: "locations",
};
pub const FILTER_OPTIONS_PATH: &str = "/locations/filters";
pub const STATS_PATH: &str = "/locations/stats";
