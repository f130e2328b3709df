// src/tests/router_tests/search_tests.rs

use super::backend;
use crate::catalog::SectionId;
use crate::fetcher::FetchError;
use crate::tests::utils::{body_string, get, loaded_app, API};
use serde_json::json;

#[test]
fn search_page_uses_backend_results() {
    let transport = backend().ok(
        &format!("{API}/locations/search"),
        json!({ "locations": [{ "_id": "s1", "titre": "Studio Yantala", "ville": "Niamey" }] }),
    );
    let app = loaded_app(transport, &[]);

    let resp = get(&app, "/search?city=Niamey&quarter=&sortBy=price&sortOrder=asc");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("Studio Yantala"));
    assert!(body.contains("1 résultat(s)"));
    assert!(!body.contains("hors ligne"));
}

#[test]
fn search_page_falls_back_to_fetched_rentals() {
    let transport = backend().fail(
        &format!("{API}/locations/search"),
        FetchError::Status { status: 500, url: "search".into() },
    );
    let app = loaded_app(transport, &[SectionId::Rentals]);

    let body = body_string(get(&app, "/search?furnished=true"));
    assert!(body.contains("Appartement Koira Kano"));
    assert!(body.contains("hors ligne"));
}

#[test]
fn filter_options_populate_the_form() {
    let transport = backend()
        .ok(&format!("{API}/locations/search"), json!({ "locations": [] }))
        .ok(
            &format!("{API}/locations/filters"),
            json!({ "data": { "villes": ["Niamey", "Maradi"], "types": ["Villa"] } }),
        );
    let app = loaded_app(transport, &[]);

    let body = body_string(get(&app, "/search?city=Maradi"));
    assert!(body.contains("<option value=\"Maradi\" selected>Maradi</option>"));
    assert!(body.contains("Aucun résultat pour le moment."));
}

#[test]
fn options_endpoint_reports_upstream_failure() {
    let app = loaded_app(backend(), &[]);
    assert_eq!(get(&app, "/api/search/options").status(), 502);

    let transport = backend().ok(&format!("{API}/locations/stats"), json!({ "total": 12 }));
    let app = loaded_app(transport, &[]);
    let body = body_string(get(&app, "/api/stats"));
    assert!(body.contains("12"));
}
