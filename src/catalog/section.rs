// src/catalog/section.rs
//
// One parametrized section (endpoint, envelope, cursor defaults, grouping)
// reused by every catalog block of the portal.

use crate::catalog::carousel::Carousel;
use crate::catalog::disclosure::{DisclosureController, GLOBAL_KEY};
use crate::catalog::grouping::{AgencyFilter, AgencySummary, GroupingIndex};
use crate::catalog::normalize::{normalize_listing, normalize_organization, NormalizeConfig};
use crate::catalog::record::{ListingKind, ListingRecord, Organization};
use crate::fetcher::{Endpoint, FetchOutcome};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Agencies,
    Banks,
    Parcels,
    Properties,
    Rentals,
    Notaries,
    RentalSearch,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Agencies,
        SectionId::Banks,
        SectionId::Parcels,
        SectionId::Properties,
        SectionId::Rentals,
        SectionId::Notaries,
        SectionId::RentalSearch,
    ];

    /// Sections loaded when the home page mounts.
    pub const HOME: [SectionId; 6] = [
        SectionId::Agencies,
        SectionId::Banks,
        SectionId::Parcels,
        SectionId::Properties,
        SectionId::Rentals,
        SectionId::Notaries,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SectionId::Agencies => "agences",
            SectionId::Banks => "banques",
            SectionId::Parcels => "parcelles",
            SectionId::Properties => "patrimoine",
            SectionId::Rentals => "locations",
            SectionId::Notaries => "notaires",
            SectionId::RentalSearch => "recherche",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Agencies => "Agences immobilières",
            SectionId::Banks => "Banques partenaires",
            SectionId::Parcels => "Parcelles à vendre",
            SectionId::Properties => "Biens immobiliers",
            SectionId::Rentals => "Locations",
            SectionId::Notaries => "Notaires",
            SectionId::RentalSearch => "Recherche de locations",
        }
    }

    pub fn config(self) -> SectionConfig {
        use Content::{Directory, Listing};
        use Grouping::{ByAgency, Global};

        let (path, fallback, field, content, cursor, grouping) = match self {
            SectionId::Agencies => ("/agences/public", Some("/agences"), "agences", Directory, 0, Global),
            SectionId::Banks => ("/banques/actives", None, "banques", Directory, 0, Global),
            SectionId::Parcels => (
                "/parcelles/public",
                Some("/parcelles"),
                "parcelles",
                Listing(ListingKind::Parcel),
                3,
                ByAgency,
            ),
            SectionId::Properties => (
                "/patrimoine/public",
                Some("/patrimoine"),
                "patrimoine",
                Listing(ListingKind::Property),
                4,
                ByAgency,
            ),
            SectionId::Rentals => (
                "/locations/public",
                Some("/locations"),
                "locations",
                Listing(ListingKind::Rental),
                3,
                ByAgency,
            ),
            SectionId::Notaries => (
                "/notaires/public",
                None,
                "notaires",
                Listing(ListingKind::Notary),
                4,
                Global,
            ),
            SectionId::RentalSearch => (
                "/locations/search",
                None,
                "locations",
                Listing(ListingKind::Rental),
                6,
                Global,
            ),
        };

        SectionConfig {
            endpoint: Endpoint { path, fallback, field },
            content,
            default_cursor: cursor,
            step: cursor,
            grouping,
            per_view: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Listing(ListingKind),
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    ByAgency,
    Global,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionConfig {
    pub endpoint: Endpoint,
    pub content: Content,
    pub default_cursor: usize,
    pub step: usize,
    pub grouping: Grouping,
    /// Carousel items visible at once (directory sections).
    pub per_view: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum SectionStatus {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView<'a> {
    pub key: &'a str,
    pub summary: Option<&'a AgencySummary>,
    pub total: usize,
    pub records: Vec<&'a ListingRecord>,
    pub has_more: bool,
}

pub struct SectionState {
    id: SectionId,
    config: SectionConfig,
    status: SectionStatus,
    records: Vec<ListingRecord>,
    organizations: Vec<Organization>,
    index: GroupingIndex,
    disclosure: DisclosureController,
    agency_filter: AgencyFilter,
    carousel: Carousel,
}

impl SectionState {
    pub fn new(id: SectionId) -> Self {
        let config = id.config();
        Self {
            id,
            status: SectionStatus::Loading,
            records: Vec::new(),
            organizations: Vec::new(),
            index: GroupingIndex::default(),
            disclosure: DisclosureController::new(config.default_cursor, config.step),
            agency_filter: AgencyFilter::All,
            carousel: Carousel::new(0, config.per_view),
            config,
        }
    }

    pub fn status(&self) -> &SectionStatus {
        &self.status
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn summaries(&self) -> &[AgencySummary] {
        self.index.summaries()
    }

    pub fn agency_filter(&self) -> &AgencyFilter {
        &self.agency_filter
    }

    pub fn mark_loading(&mut self) {
        self.status = SectionStatus::Loading;
    }

    /// Apply a finished fetch: normalize, replace the list, rebuild, reset cursors.
    pub fn load(&mut self, outcome: FetchOutcome, normalize: &NormalizeConfig) {
        let (items, status) = match outcome {
            FetchOutcome::Loaded(items) => (items, SectionStatus::Ready),
            FetchOutcome::Empty => (Vec::new(), SectionStatus::Empty),
            FetchOutcome::Failed(e) => (Vec::new(), SectionStatus::Failed(e.to_string())),
        };

        match self.config.content {
            Content::Listing(kind) => {
                let records = items
                    .iter()
                    .enumerate()
                    .map(|(i, raw)| normalize_listing(kind, raw, i, normalize))
                    .collect();
                self.replace_records(records);
            }
            Content::Directory => {
                self.organizations = items
                    .iter()
                    .enumerate()
                    .map(|(i, raw)| normalize_organization(raw, i, normalize))
                    .collect();
                self.carousel.set_len(self.organizations.len());
            }
        }

        info!(
            section = self.id.slug(),
            count = self.len(),
            status = ?status,
            "section loaded"
        );
        self.status = status;
    }

    /// Swap in an already normalized list (local search results).
    pub fn replace_records(&mut self, records: Vec<ListingRecord>) {
        self.records = records;
        self.index = GroupingIndex::build(&self.records);
        debug_assert_eq!(self.index.total(), self.records.len());
        self.disclosure.reset();
        self.status = if self.records.is_empty() {
            SectionStatus::Empty
        } else {
            SectionStatus::Ready
        };
    }

    pub fn len(&self) -> usize {
        match self.config.content {
            Content::Listing(_) => self.records.len(),
            Content::Directory => self.organizations.len(),
        }
    }

    /// Advance one group's cursor. Ungrouped sections only have the global
    /// key; on grouped sections a key missing from the index is ignored, so
    /// only real groups ever get a cursor.
    pub fn show_more(&mut self, key: &str) -> Option<usize> {
        match self.config.grouping {
            Grouping::Global => {
                let len = self.records.len();
                Some(self.disclosure.show_more(GLOBAL_KEY, len))
            }
            Grouping::ByAgency => {
                if !self.index.keys().any(|k| k == key) {
                    debug!(section = self.id.slug(), key, "show more for unknown group");
                    return None;
                }
                let len = self.index.group_len(key);
                Some(self.disclosure.show_more(key, len))
            }
        }
    }

    /// Selecting one agency starts its group back at the default cursor;
    /// every other group keeps its cursor. Selecting "all" touches none.
    pub fn set_agency_filter(&mut self, filter: AgencyFilter) {
        if let AgencyFilter::Agency(id) = &filter {
            self.disclosure.reset_keys([id.as_str()]);
        }
        self.agency_filter = filter;
    }

    pub fn carousel_index(&self) -> usize {
        self.carousel.index()
    }

    pub fn find(&self, id: &str) -> Option<&ListingRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn carousel_next(&mut self) {
        self.carousel.next();
    }

    pub fn carousel_prev(&mut self) {
        self.carousel.prev();
    }

    pub fn visible_organizations(&self) -> Vec<&Organization> {
        self.carousel
            .window()
            .into_iter()
            .filter_map(|i| self.organizations.get(i))
            .collect()
    }

    /// Groups on screen with their disclosed records.
    pub fn visible_groups(&self) -> Vec<GroupView<'_>> {
        match self.config.grouping {
            Grouping::Global => {
                let total = self.records.len();
                let shown = self.disclosure.visible(GLOBAL_KEY, total);
                vec![GroupView {
                    key: GLOBAL_KEY,
                    summary: None,
                    total,
                    records: self.records.iter().take(shown).collect(),
                    has_more: self.disclosure.has_more(GLOBAL_KEY, total),
                }]
            }
            Grouping::ByAgency => self
                .index
                .filtered(&self.agency_filter)
                .into_iter()
                .map(|summary| {
                    let key = summary.agency_id.as_str();
                    let shown = self.disclosure.visible(key, summary.count);
                    let mut records = self.index.group(&self.records, key);
                    records.truncate(shown);
                    GroupView {
                        key,
                        summary: Some(summary),
                        total: summary.count,
                        records,
                        has_more: self.disclosure.has_more(key, summary.count),
                    }
                })
                .collect(),
        }
    }
}
