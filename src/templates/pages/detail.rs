// templates/pages/detail.rs

use crate::catalog::selection::Selection;
use maud::{html, Markup};

/// Side panel for the selected listing; empty markup when closed.
pub fn detail_panel(selection: &Selection) -> Markup {
    let Some(record) = selection.record().filter(|_| selection.is_open()) else {
        return html! {};
    };

    html! {
        aside class="detail-panel" id="detail" {
            a class="close" href="/close" { "Fermer ×" }
            h2 { (record.title) }
            img class="primary" src=(record.image) alt=(record.title);

            @if record.images.len() > 1 {
                div class="thumbnails" {
                    @for (i, image) in record.images.iter().skip(1).enumerate() {
                        a href=(format!("/listings/gallery?index={i}")) {
                            img src=(image) alt="" loading="lazy";
                        }
                    }
                }
            }

            dl {
                dt { "Type" } dd { (record.property_type) }
                dt { "Ville" } dd { (record.city) }
                dt { "Quartier" } dd { (record.quarter) }
                dt { "Adresse" } dd { (record.address) }
                dt { "Prix" } dd { (record.price_label) }
                @if record.area > 0.0 {
                    dt { "Superficie" } dd { (format!("{:.0}", record.area)) " m²" }
                }
                @if record.rooms > 0 {
                    dt { "Chambres" } dd { (record.rooms) }
                }
                dt { "Statut" } dd { (record.status.label()) }
                @if let Some(geo) = &record.geo {
                    dt { "Coordonnées" } dd { (format!("{:.5}, {:.5}", geo.lat, geo.lng)) }
                }
                @if let Some(phone) = &record.phone {
                    dt { "Téléphone" } dd { (phone) }
                }
                @if let Some(email) = &record.email {
                    dt { "Email" } dd { (email) }
                }
            }

            @if !record.features.is_empty() {
                ul class="features" {
                    @for feature in &record.features { li { (feature) } }
                }
            }

            @for video in &record.videos {
                iframe src=(video) allowfullscreen {}
            }

            @if !record.documents.is_empty() {
                h3 { "Documents" }
                ul {
                    @for (i, doc) in record.documents.iter().enumerate() {
                        li { a href=(doc) target="_blank" { "Document " (i + 1) } }
                    }
                }
            }

            @if let Some(agency) = &record.agency {
                div class="agency" {
                    h3 { (agency.name) }
                    p { (agency.city) " · " (agency.phone) }
                }
            }
        }
    }
}
