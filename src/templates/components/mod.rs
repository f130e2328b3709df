use crate::catalog::SectionStatus;
use maud::{html, Markup};

pub mod card;

pub use card::{listing_card, organization_card};

pub fn button_link(label: &str, href: &str) -> Markup {
    html! {
        a class="btn" href=(href) { (label) }
    }
}

/// Loading, empty and failed states of a section.
pub fn status_message(status: &SectionStatus) -> Markup {
    html! {
        @match status {
            SectionStatus::Loading => p class="loading" { "Chargement…" },
            SectionStatus::Empty => p class="empty" { "Aucun résultat pour le moment." },
            SectionStatus::Failed(_) => p class="unavailable" {
                "Les données sont momentanément indisponibles."
            },
            SectionStatus::Ready => {},
        }
    }
}
