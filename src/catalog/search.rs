// src/catalog/search.rs
//
// Rental search: query parameters for the backend search endpoint, and the
// same filters applied locally to an already fetched list.

use crate::catalog::record::ListingRecord;
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_LIMIT: u32 = 12;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Price,
    Area,
}

impl SortBy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "createdAt" => Some(SortBy::CreatedAt),
            "price" => Some(SortBy::Price),
            "area" => Some(SortBy::Area),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Price => "price",
            SortBy::Area => "area",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    pub city: Option<String>,
    pub quarter: Option<String>,
    pub property_type: Option<String>,
    pub agency_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub rooms: Option<u32>,
    pub furnished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub filters: SearchFilters,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

fn non_empty(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

fn positive(v: &str) -> Option<f64> {
    v.trim().parse::<f64>().ok().filter(|n| n.is_finite() && *n > 0.0)
}

impl SearchQuery {
    /// Build from query-string pairs. Unknown keys and unparsable values are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut q = SearchQuery::default();

        for (k, v) in pairs {
            let v = v.as_ref();
            let f = &mut q.filters;
            match k.as_ref() {
                "city" => f.city = non_empty(v),
                "quarter" => f.quarter = non_empty(v),
                "type" => f.property_type = non_empty(v),
                "agencyId" => f.agency_id = non_empty(v).filter(|id| id != "all"),
                "minPrice" => f.min_price = positive(v),
                "maxPrice" => f.max_price = positive(v),
                "minArea" => f.min_area = positive(v),
                "maxArea" => f.max_area = positive(v),
                "rooms" => f.rooms = v.trim().parse::<u32>().ok().filter(|n| *n > 0),
                "furnished" => f.furnished = matches!(v.trim(), "true" | "on" | "1"),
                "page" => q.page = v.trim().parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1),
                "limit" => {
                    q.limit = v
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .map(|n| n.min(MAX_LIMIT))
                        .unwrap_or(DEFAULT_LIMIT)
                }
                "sortBy" => q.sort_by = SortBy::parse(v.trim()).unwrap_or_default(),
                "sortOrder" => q.sort_order = SortOrder::parse(v.trim()).unwrap_or_default(),
                _ => {}
            }
        }

        q
    }

    /// Request parameters with empty and falsy filters stripped.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let f = &self.filters;
        let mut params: Vec<(&str, Option<String>)> = vec![
            ("city", f.city.clone()),
            ("quarter", f.quarter.clone()),
            ("type", f.property_type.clone()),
            ("agencyId", f.agency_id.clone()),
            ("minPrice", f.min_price.map(fmt_number)),
            ("maxPrice", f.max_price.map(fmt_number)),
            ("minArea", f.min_area.map(fmt_number)),
            ("maxArea", f.max_area.map(fmt_number)),
            ("rooms", f.rooms.map(|n| n.to_string())),
            ("furnished", f.furnished.then(|| "true".to_string())),
        ];
        params.push(("page", Some(self.page.to_string())));
        params.push(("limit", Some(self.limit.to_string())));
        params.push(("sortBy", Some(self.sort_by.as_str().to_string())));
        params.push(("sortOrder", Some(self.sort_order.as_str().to_string())));

        params
            .into_iter()
            .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k.to_string(), v)))
            .collect()
    }

    fn matches(&self, r: &ListingRecord) -> bool {
        let f = &self.filters;
        let eq = |want: &Option<String>, have: &str| {
            want.as_deref()
                .map_or(true, |w| w.eq_ignore_ascii_case(have))
        };

        eq(&f.city, &r.city)
            && f.quarter.as_deref().map_or(true, |q| {
                r.quarter.to_lowercase().contains(&q.to_lowercase())
            })
            && eq(&f.property_type, &r.property_type)
            && f.agency_id.as_deref().map_or(true, |id| {
                r.agency.as_ref().is_some_and(|a| a.id == id)
            })
            && f.min_price.map_or(true, |min| r.price >= min)
            && f.max_price.map_or(true, |max| r.price <= max)
            && f.min_area.map_or(true, |min| r.area >= min)
            && f.max_area.map_or(true, |max| r.area <= max)
            && f.rooms.map_or(true, |n| r.rooms >= n)
            && (!f.furnished || r.features.contains(&"Meublé"))
    }

    fn compare(&self, a: &ListingRecord, b: &ListingRecord) -> Ordering {
        let ord = match self.sort_by {
            SortBy::Price => a.price.total_cmp(&b.price),
            SortBy::Area => a.area.total_cmp(&b.area),
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match self.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }

    /// Filter, sort and paginate an already fetched list.
    pub fn apply_locally(&self, records: &[ListingRecord]) -> SearchPage {
        let mut hits: Vec<&ListingRecord> = records.iter().filter(|r| self.matches(r)).collect();
        hits.sort_by(|a, b| self.compare(a, b));

        let total = hits.len();
        let limit = self.limit.max(1) as usize;
        let pages = total.div_ceil(limit).max(1);
        let page = (self.page.max(1) as usize).min(pages);

        let items = hits
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect();

        SearchPage {
            items,
            total,
            page,
            pages,
        }
    }
}

fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub items: Vec<ListingRecord>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}
