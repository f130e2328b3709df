// src/catalog/portal.rs
//
// All section state plus the single detail selection, mutated only through
// `Portal::apply`.

use crate::catalog::grouping::{AgencyFilter, AgencySummary};
use crate::catalog::normalize::NormalizeConfig;
use crate::catalog::record::{ListingRecord, Organization};
use crate::catalog::section::{GroupView, SectionId, SectionState, SectionStatus};
use crate::catalog::selection::Selection;
use crate::fetcher::FetchOutcome;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum Action {
    Loading(SectionId),
    Loaded(SectionId, FetchOutcome),
    Replace(SectionId, Vec<ListingRecord>),
    ShowMore(SectionId, String),
    FilterAgency(SectionId, AgencyFilter),
    Open(SectionId, String),
    Close,
    SelectImage(usize),
    CarouselNext(SectionId),
    CarouselPrev(SectionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no listing {id} in section {section}")]
    UnknownListing { section: &'static str, id: String },
}

/// Snapshot of one section for rendering (HTML or JSON).
#[derive(Debug, Serialize)]
pub struct SectionView<'a> {
    pub id: SectionId,
    pub slug: &'static str,
    pub title: &'static str,
    pub status: &'a SectionStatus,
    pub total: usize,
    pub agency_filter: &'a str,
    pub agencies: &'a [AgencySummary],
    pub groups: Vec<GroupView<'a>>,
    pub organizations: Vec<&'a Organization>,
    pub carousel_index: usize,
}

pub struct Portal {
    sections: BTreeMap<SectionId, SectionState>,
    selection: Selection,
    normalize: NormalizeConfig,
}

impl Portal {
    pub fn new(normalize: NormalizeConfig) -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|id| (id, SectionState::new(id)))
            .collect();

        Self {
            sections,
            selection: Selection::default(),
            normalize,
        }
    }

    pub fn section(&self, id: SectionId) -> &SectionState {
        // every SectionId is inserted in `new`
        &self.sections[&id]
    }

    fn section_mut(&mut self, id: SectionId) -> &mut SectionState {
        self.sections
            .entry(id)
            .or_insert_with(|| SectionState::new(id))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Loading(id) => self.section_mut(id).mark_loading(),
            Action::Loaded(id, outcome) => {
                let normalize = self.normalize.clone();
                self.section_mut(id).load(outcome, &normalize);
            }
            Action::Replace(id, records) => self.section_mut(id).replace_records(records),
            Action::ShowMore(id, key) => {
                self.section_mut(id).show_more(&key);
            }
            Action::FilterAgency(id, filter) => self.section_mut(id).set_agency_filter(filter),
            Action::Open(id, listing_id) => {
                let record = self
                    .section(id)
                    .find(&listing_id)
                    .cloned()
                    .ok_or(ActionError::UnknownListing {
                        section: id.slug(),
                        id: listing_id,
                    })?;
                self.selection.open(record);
            }
            Action::Close => self.selection.close(),
            Action::SelectImage(index) => self.selection.select_image(index),
            Action::CarouselNext(id) => self.section_mut(id).carousel_next(),
            Action::CarouselPrev(id) => self.section_mut(id).carousel_prev(),
        }
        Ok(())
    }

    pub fn view(&self, id: SectionId) -> SectionView<'_> {
        let s = self.section(id);
        SectionView {
            id,
            slug: id.slug(),
            title: id.title(),
            status: s.status(),
            total: s.len(),
            agency_filter: s.agency_filter().as_value(),
            agencies: s.summaries(),
            groups: s.visible_groups(),
            organizations: s.visible_organizations(),
            carousel_index: s.carousel_index(),
        }
    }
}
