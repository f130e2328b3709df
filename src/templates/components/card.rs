use crate::catalog::record::{ListingRecord, Organization};
use maud::{html, Markup};

/// Listing tile; clicking opens the detail panel.
pub fn listing_card(section_slug: &str, record: &ListingRecord) -> Markup {
    html! {
        article class="listing-card" data-id=(record.id) style=(format!("background: {}", record.gradient)) {
            a href=(format!("/listings/{}/{}", section_slug, record.id)) {
                img src=(record.image) alt=(record.title) loading="lazy";
                h3 { (record.title) }
            }
            p class="location" { (record.city) ", " (record.quarter) }
            @if record.price > 0.0 {
                p class="price" { (record.price_label) }
            }
            @if record.area > 0.0 {
                p class="area" { (format!("{:.0}", record.area)) " m²" }
            }
            @if record.verified {
                span class="badge verified" { "Vérifié" }
            }
            span class="badge status" { (record.status.label()) }
            @if !record.features.is_empty() {
                ul class="features" {
                    @for feature in &record.features {
                        li { (feature) }
                    }
                }
            }
        }
    }
}

pub fn organization_card(org: &Organization) -> Markup {
    html! {
        article class="org-card" data-id=(org.id) style=(format!("background: {}", org.gradient)) {
            img src=(org.logo) alt=(org.name) loading="lazy";
            h3 { (org.name) }
            p { (org.city) }
            p { (org.phone) }
            @if let Some(email) = &org.email {
                p { a href=(format!("mailto:{email}")) { (email) } }
            }
        }
    }
}
