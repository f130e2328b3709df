// templates/pages/section.rs

use super::{detail_panel, encode};
use crate::catalog::selection::Selection;
use crate::catalog::SectionView;
use crate::templates::components::{button_link, organization_card};
use crate::templates::{desktop_layout, listing_card, status_message};
use maud::{html, Markup};

fn agency_chips(view: &SectionView) -> Markup {
    let chip = |value: &str, label: &str, count: usize| {
        let active = view.agency_filter == value;
        html! {
            a class=(if active { "chip active" } else { "chip" })
                href=(format!("/sections/{}/agency?value={}", view.slug, encode(value))) {
                (label) " (" (count) ")"
            }
        }
    };

    html! {
        nav class="agency-filter" {
            (chip("all", "Toutes les agences", view.total))
            @for agency in view.agencies {
                (chip(&agency.agency_id, &agency.name, agency.count))
            }
        }
    }
}

pub fn section_block(view: &SectionView) -> Markup {
    html! {
        section class="catalog-section" id=(view.slug) {
            h2 { a href=(format!("/sections/{}", view.slug)) { (view.title) } }
            (status_message(view.status))

            @if !view.organizations.is_empty() {
                div class="carousel" {
                    (button_link("‹", &format!("/sections/{}/carousel?dir=prev", view.slug)))
                    @for org in &view.organizations {
                        (organization_card(org))
                    }
                    (button_link("›", &format!("/sections/{}/carousel?dir=next", view.slug)))
                }
            }

            @if view.agencies.len() > 1 {
                (agency_chips(view))
            }

            @for group in &view.groups {
                @if !group.records.is_empty() {
                    div class="group" data-key=(group.key) {
                        @if let Some(agency) = group.summary {
                            h3 { (agency.name) " · " (agency.city) " · " (agency.count) " annonce(s)" }
                        }
                        div class="grid" {
                            @for record in &group.records {
                                (listing_card(view.slug, record))
                            }
                        }
                        @if group.has_more {
                            (button_link(
                                "Voir plus",
                                &format!("/sections/{}/more?group={}", view.slug, encode(group.key)),
                            ))
                        }
                    }
                }
            }
        }
    }
}

pub fn section_page(view: &SectionView, selection: &Selection) -> Markup {
    desktop_layout(
        view.title,
        html! {
            (section_block(view))
            (detail_panel(selection))
        },
    )
}
