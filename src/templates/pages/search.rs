// templates/pages/search.rs

use super::{detail_panel, section_block};
use crate::app::{SearchSource, SearchSummary};
use crate::catalog::search::{SortBy, SortOrder};
use crate::catalog::selection::Selection;
use crate::catalog::{SearchQuery, SectionView};
use crate::templates::desktop_layout;
use maud::{html, Markup};
use serde_json::Value;

fn options_of<'a>(options: Option<&'a Value>, key: &str) -> Vec<&'a str> {
    options
        .and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

pub struct SearchVm<'a> {
    pub query: &'a SearchQuery,
    pub summary: &'a SearchSummary,
    pub view: SectionView<'a>,
    pub options: Option<&'a Value>,
    pub selection: &'a Selection,
}

pub fn search_page(vm: &SearchVm) -> Markup {
    let f = &vm.query.filters;
    let cities = options_of(vm.options, "villes");
    let types = options_of(vm.options, "types");

    desktop_layout(
        "Recherche",
        html! {
            h1 { "Trouver une location" }

            form method="get" action="/search" class="search-form" {
                @if cities.is_empty() {
                    input type="text" name="city" placeholder="Ville" value=[f.city.as_deref()];
                } @else {
                    select name="city" {
                        option value="" { "Toutes les villes" }
                        @for city in &cities {
                            option value=(city) selected[f.city.as_deref() == Some(*city)] { (city) }
                        }
                    }
                }
                input type="text" name="quarter" placeholder="Quartier" value=[f.quarter.as_deref()];
                @if types.is_empty() {
                    input type="text" name="type" placeholder="Type" value=[f.property_type.as_deref()];
                } @else {
                    select name="type" {
                        option value="" { "Tous les types" }
                        @for t in &types {
                            option value=(t) selected[f.property_type.as_deref() == Some(*t)] { (t) }
                        }
                    }
                }
                input type="number" name="minPrice" placeholder="Prix min" value=[f.min_price.map(|n| n.to_string())];
                input type="number" name="maxPrice" placeholder="Prix max" value=[f.max_price.map(|n| n.to_string())];
                input type="number" name="minArea" placeholder="Surface min" value=[f.min_area.map(|n| n.to_string())];
                input type="number" name="maxArea" placeholder="Surface max" value=[f.max_area.map(|n| n.to_string())];
                input type="number" name="rooms" placeholder="Chambres" value=[f.rooms.map(|n| n.to_string())];
                label { input type="checkbox" name="furnished" value="true" checked[f.furnished]; " Meublé" }
                select name="sortBy" {
                    option value="createdAt" selected[vm.query.sort_by == SortBy::CreatedAt] { "Plus récents" }
                    option value="price" selected[vm.query.sort_by == SortBy::Price] { "Prix" }
                    option value="area" selected[vm.query.sort_by == SortBy::Area] { "Surface" }
                }
                select name="sortOrder" {
                    option value="desc" selected[vm.query.sort_order == SortOrder::Desc] { "Décroissant" }
                    option value="asc" selected[vm.query.sort_order == SortOrder::Asc] { "Croissant" }
                }
                button type="submit" { "Rechercher" }
            }

            p class="search-summary" {
                (vm.summary.total) " résultat(s) · page " (vm.summary.page) " / " (vm.summary.pages)
                @if vm.summary.source == SearchSource::Local {
                    " · résultats hors ligne"
                }
            }

            (section_block(&vm.view))
            (detail_panel(vm.selection))
        },
    )
}
