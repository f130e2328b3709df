// templates/pages/home.rs

use super::{detail_panel, section_block};
use crate::catalog::{Portal, SectionId};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page(portal: &Portal) -> Markup {
    desktop_layout(
        "Accueil",
        html! {
            h1 { "Terrains, biens et locations au Niger" }

            @for id in SectionId::HOME {
                (section_block(&portal.view(id)))
            }

            (detail_panel(portal.selection()))
        },
    )
}
