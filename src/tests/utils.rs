use crate::app::PortalApp;
use crate::catalog::NormalizeConfig;
use crate::fetcher::{FetchError, Fetcher, Transport};
use crate::router::handle;
use astra::{Body, Request, Response};
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API: &str = "http://api.test";
pub const FILES: &str = "http://files.test";
pub const PLACEHOLDER: &str = "http://files.test/static/placeholder.jpg";

/// In-memory backend: canned answers per URL, every call recorded.
/// Unscripted URLs fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: HashMap<String, Result<Value, FetchError>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    latency: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, url: &str, body: Value) -> Self {
        self.answers.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, err: FetchError) -> Self {
        self.answers.insert(url.to_string(), Err(err));
        self
    }

    /// Hold every answer back by `latency`, like a slow backend.
    pub fn slow(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn last_params(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, params)| params.clone())
            .unwrap_or_default()
    }
}

impl Transport for ScriptedTransport {
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Value, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), params.to_vec()));

        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        self.answers
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network(format!("no route to {url}"))))
    }
}

pub fn test_app(transport: ScriptedTransport) -> PortalApp {
    let fetcher = Fetcher::new(Arc::new(transport), API);
    PortalApp::new(
        fetcher,
        NormalizeConfig {
            files_base: FILES.to_string(),
            placeholder_image: PLACEHOLDER.to_string(),
        },
    )
}

/// Fresh app with `sections` already fetched.
pub fn loaded_app(transport: ScriptedTransport, sections: &[crate::catalog::SectionId]) -> PortalApp {
    let app = test_app(transport);
    app.refresh(sections).unwrap();
    app.wait_idle().unwrap();
    app
}

pub fn get(app: &PortalApp, uri: &str) -> Response {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();

    match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    }
}

pub fn body_string(mut resp: Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
