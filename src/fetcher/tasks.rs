// tasks.rs
//
// Background fan-out of section fetches. Every fetch carries a CancelToken;
// once cancelled its result is dropped instead of delivered.

use crate::fetcher::{Endpoint, FetchOutcome, Fetcher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct FetchHandle {
    path: &'static str,
    token: CancelToken,
    join: JoinHandle<()>,
}

impl FetchHandle {
    /// Primary path of the endpoint being fetched.
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    #[cfg(test)]
    pub fn join(self) {
        let _ = self.join.join();
    }
}

/// Run `endpoint` on its own thread and hand the outcome to `on_done`
/// unless `token` was cancelled first. `on_done` receives the token so it
/// can re-check it under whatever lock it takes.
pub fn spawn_fetch<F>(
    fetcher: Arc<Fetcher>,
    endpoint: Endpoint,
    token: CancelToken,
    on_done: F,
) -> FetchHandle
where
    F: FnOnce(FetchOutcome, &CancelToken) + Send + 'static,
{
    let worker_token = token.clone();
    let path = endpoint.path;

    let join = std::thread::spawn(move || {
        if worker_token.is_cancelled() {
            debug!(path = endpoint.path, "fetch cancelled before start");
            return;
        }

        let outcome = fetcher.fetch(&endpoint);

        if worker_token.is_cancelled() {
            debug!(path = endpoint.path, "fetch cancelled, dropping result");
            return;
        }
        on_done(outcome, &worker_token);
    });

    FetchHandle { path, token, join }
}

/// Outstanding fetches owned by one view. Dropping the group cancels them.
#[derive(Default)]
pub struct FetchGroup {
    handles: Vec<FetchHandle>,
}

impl FetchGroup {
    pub fn push(&mut self, handle: FetchHandle) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
    }

    /// Cancel the fetches of one endpoint, leaving the others running.
    pub fn cancel_path(&mut self, path: &str) {
        self.handles.retain(|h| {
            if h.path() == path {
                h.cancel();
                false
            } else {
                true
            }
        });
    }

    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    #[cfg(test)]
    pub fn join_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.join();
        }
    }
}

impl Drop for FetchGroup {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
