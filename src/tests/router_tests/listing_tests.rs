// src/tests/router_tests/listing_tests.rs

use super::backend;
use crate::catalog::SectionId;
use crate::tests::utils::{body_string, get, loaded_app, FILES};

#[test]
fn opening_a_listing_shows_the_detail_panel() {
    let app = loaded_app(backend(), &[SectionId::Rentals]);

    let resp = get(&app, "/listings/locations/r1");
    assert_eq!(resp.status(), 303);

    let body = body_string(get(&app, "/sections/locations"));
    assert!(body.contains("detail-panel"));
    assert!(body.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
    assert!(body.contains("Meublé"));
    assert!(body.contains(&format!("{FILES}/uploads/r1/a.jpg")));
}

#[test]
fn gallery_click_promotes_the_thumbnail() {
    let app = loaded_app(backend(), &[SectionId::Rentals]);
    get(&app, "/listings/locations/r1");

    get(&app, "/listings/gallery?index=1");

    app.with_portal(|p| {
        let selected = p.selection().record().unwrap();
        assert_eq!(selected.image, format!("{FILES}/uploads/r1/c.jpg"));
        assert_eq!(selected.images[2], format!("{FILES}/uploads/r1/a.jpg"));

        let listed = p.section(SectionId::Rentals).find("r1").unwrap();
        assert_eq!(listed.image, format!("{FILES}/uploads/r1/a.jpg"));
    })
    .unwrap();
}

#[test]
fn close_hides_the_panel() {
    let app = loaded_app(backend(), &[SectionId::Rentals]);
    get(&app, "/listings/locations/r1");
    get(&app, "/close");

    assert!(!app.with_portal(|p| p.selection().is_open()).unwrap());
    let body = body_string(get(&app, "/sections/locations"));
    assert!(!body.contains("detail-panel"));
}

#[test]
fn unknown_listing_is_404() {
    let app = loaded_app(backend(), &[SectionId::Rentals]);
    assert_eq!(get(&app, "/listings/locations/zzz").status(), 404);
    assert_eq!(get(&app, "/listings/gallery?index=abc").status(), 400);
}
