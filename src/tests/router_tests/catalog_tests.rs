// src/tests/router_tests/catalog_tests.rs

use super::backend;
use crate::catalog::{SectionId, SectionStatus};
use crate::tests::utils::{body_string, get, loaded_app, location};
use serde_json::Value;

#[test]
fn home_renders_every_section() {
    let app = loaded_app(backend(), &SectionId::HOME);

    let resp = get(&app, "/");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("Parcelles à vendre"));
    assert!(body.contains("Villa Plateau"));
    assert!(body.contains("Appartement Koira Kano"));
    assert!(body.contains("BIA Niger"));
    // notaries answered with an empty list
    assert!(body.contains("Aucun résultat pour le moment."));
}

#[test]
fn show_more_grows_the_agency_group() {
    let app = loaded_app(backend(), &[SectionId::Parcels]);

    let count_a1 = |app: &crate::app::PortalApp| {
        app.with_portal(|p| {
            p.view(SectionId::Parcels)
                .groups
                .iter()
                .find(|g| g.key == "a1")
                .map(|g| g.records.len())
                .unwrap()
        })
        .unwrap()
    };
    assert_eq!(count_a1(&app), 3);

    let resp = get(&app, "/sections/parcelles/more?group=a1");
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/sections/parcelles");
    assert_eq!(count_a1(&app), 5);

    // bounded by the group size
    get(&app, "/sections/parcelles/more?group=a1");
    assert_eq!(count_a1(&app), 5);
}

#[test]
fn show_more_ignores_unknown_groups() {
    let app = loaded_app(backend(), &[SectionId::Parcels]);
    let before = body_string(get(&app, "/api/sections/parcelles"));

    for key in ["nobody", "a3", "all", ""] {
        let resp = get(&app, &format!("/sections/parcelles/more?group={key}"));
        assert_eq!(resp.status(), 303);
    }

    assert_eq!(body_string(get(&app, "/api/sections/parcelles")), before);
}

#[test]
fn agency_filter_narrows_groups() {
    let app = loaded_app(backend(), &[SectionId::Parcels]);

    get(&app, "/sections/parcelles/agency?value=a2");
    let body = body_string(get(&app, "/sections/parcelles"));
    assert!(body.contains("Ténéré Foncier"));
    assert!(!body.contains("Parcelle N0"));

    get(&app, "/sections/parcelles/agency?value=all");
    let body = body_string(get(&app, "/sections/parcelles"));
    assert!(body.contains("Parcelle N0"));
}

#[test]
fn section_json_reports_summaries() {
    let app = loaded_app(backend(), &[SectionId::Parcels]);

    let body: Value = serde_json::from_str(&body_string(get(&app, "/api/sections/parcelles"))).unwrap();
    assert_eq!(body["total"], 6);
    assert_eq!(body["status"]["state"], "ready");
    assert_eq!(body["agencies"][0]["agency_id"], "a1");
    assert_eq!(body["agencies"][0]["count"], 5);
    assert_eq!(body["agencies"][1]["count"], 1);
}

#[test]
fn refresh_resets_cursors() {
    let app = loaded_app(backend(), &SectionId::HOME);
    get(&app, "/sections/parcelles/more?group=a1");

    let resp = get(&app, "/refresh");
    assert_eq!(resp.status(), 303);
    app.wait_idle().unwrap();

    app.with_portal(|p| {
        assert_eq!(*p.section(SectionId::Parcels).status(), SectionStatus::Ready);
        let groups = p.view(SectionId::Parcels).groups;
        assert_eq!(groups[0].records.len(), 3);
    })
    .unwrap();
}

#[test]
fn carousel_moves_directory_window() {
    let app = loaded_app(backend(), &[SectionId::Banks]);

    get(&app, "/sections/banques/carousel?dir=next");
    let first = app
        .with_portal(|p| p.view(SectionId::Banks).organizations[0].id.clone())
        .unwrap();
    assert_eq!(first, "k2");

    let body: Value = serde_json::from_str(&body_string(get(&app, "/api/sections/banques"))).unwrap();
    assert_eq!(body["carousel_index"], 1);

    let resp = get(&app, "/sections/banques/carousel?dir=sideways");
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_routes_are_404() {
    let app = loaded_app(backend(), &[]);
    assert_eq!(get(&app, "/sections/nowhere").status(), 404);
    assert_eq!(get(&app, "/does/not/exist").status(), 404);
}

#[test]
fn health_reports_ok() {
    let app = loaded_app(backend(), &[]);
    let body: Value = serde_json::from_str(&body_string(get(&app, "/health"))).unwrap();
    assert_eq!(body["status"], "ok");
}
