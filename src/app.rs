// app.rs
//
// The page owner: one Portal behind a mutex, the fetcher, and the set of
// in-flight section fetches.

use crate::catalog::{Action, NormalizeConfig, Portal, SearchQuery, SectionId};
use crate::errors::ServerError;
use crate::fetcher::{spawn_fetch, CancelToken, FetchGroup, FetchOutcome, Fetcher};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Remote,
    /// Backend search failed; filtered the fetched rentals instead.
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub source: SearchSource,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}

pub struct PortalApp {
    state: Arc<Mutex<Portal>>,
    fetcher: Arc<Fetcher>,
    inflight: Mutex<FetchGroup>,
}

impl PortalApp {
    pub fn new(fetcher: Fetcher, normalize: NormalizeConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(Portal::new(normalize))),
            fetcher: Arc::new(fetcher),
            inflight: Mutex::new(FetchGroup::default()),
        }
    }

    /// Run `f` against the portal state.
    pub fn with_portal<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&Portal) -> T,
    {
        let portal = self.state.lock().map_err(|_| ServerError::InternalError)?;
        Ok(f(&portal))
    }

    pub fn apply(&self, action: Action) -> Result<(), ServerError> {
        let mut portal = self.state.lock().map_err(|_| ServerError::InternalError)?;
        portal.apply(action)?;
        Ok(())
    }

    /// Fetch `sections` again, concurrently. Fetches still running for those
    /// sections are cancelled; other sections keep theirs.
    pub fn refresh(&self, sections: &[SectionId]) -> Result<(), ServerError> {
        let mut inflight = self.inflight.lock().map_err(|_| ServerError::InternalError)?;

        for &id in sections {
            let endpoint = id.config().endpoint;
            inflight.cancel_path(endpoint.path);
            self.apply(Action::Loading(id))?;

            let state = Arc::clone(&self.state);
            let handle = spawn_fetch(
                Arc::clone(&self.fetcher),
                endpoint,
                CancelToken::new(),
                move |outcome, token| {
                    let Ok(mut portal) = state.lock() else {
                        warn!(section = id.slug(), "portal state poisoned, dropping fetch");
                        return;
                    };
                    // a refresh may have superseded us while we waited for the lock
                    if token.is_cancelled() {
                        return;
                    }
                    if let Err(e) = portal.apply(Action::Loaded(id, outcome)) {
                        warn!(section = id.slug(), error = %e, "could not apply fetch");
                    }
                },
            );
            inflight.push(handle);
        }

        info!(count = sections.len(), "section fetches started");
        Ok(())
    }

    /// Block until every started fetch has finished.
    #[cfg(test)]
    pub fn wait_idle(&self) -> Result<(), ServerError> {
        let mut inflight = self.inflight.lock().map_err(|_| ServerError::InternalError)?;
        inflight.join_all();
        Ok(())
    }

    pub fn pending_fetches(&self) -> usize {
        self.inflight.lock().map(|g| g.pending()).unwrap_or(0)
    }

    /// Backend search into the search section; falls back to filtering the
    /// fetched rentals when the backend is unreachable.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchSummary, ServerError> {
        let results = self.fetcher.search(query);

        if let FetchOutcome::Failed(e) = &results.outcome {
            warn!(error = %e, "remote search failed, filtering locally");
            let page = self.with_portal(|p| query.apply_locally(p.section(SectionId::Rentals).records()))?;
            let summary = SearchSummary {
                source: SearchSource::Local,
                total: page.total,
                page: page.page,
                pages: page.pages,
            };
            self.apply(Action::Replace(SectionId::RentalSearch, page.items))?;
            return Ok(summary);
        }

        self.apply(Action::Loaded(SectionId::RentalSearch, results.outcome))?;
        let shown = self.with_portal(|p| p.section(SectionId::RentalSearch).len())?;

        let page = query.page.max(1) as usize;
        let limit = (query.limit as usize).max(1);
        let total = results.meta.total.unwrap_or(shown);
        // without backend totals, a full page suggests there is another one
        let pages = match (results.meta.pages, results.meta.total) {
            (Some(pages), _) => pages.max(1),
            (None, Some(total)) => total.div_ceil(limit).max(1),
            (None, None) => page + usize::from(shown >= limit),
        };

        Ok(SearchSummary {
            source: SearchSource::Remote,
            total,
            page,
            pages,
        })
    }

    pub fn filter_options(&self) -> Option<serde_json::Value> {
        self.fetcher
            .filter_options()
            .map_err(|e| warn!(error = %e, "filter options unavailable"))
            .ok()
    }

    pub fn stats(&self) -> Option<serde_json::Value> {
        self.fetcher
            .stats()
            .map_err(|e| warn!(error = %e, "stats unavailable"))
            .ok()
    }
}
