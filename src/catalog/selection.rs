// src/catalog/selection.rs

use crate::catalog::record::ListingRecord;

/// The single record behind the detail panel.
///
/// Holds its own copy of the record so gallery reordering never reaches the
/// section list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    record: Option<ListingRecord>,
    open: bool,
}

impl Selection {
    /// Replaces whatever was selected before.
    pub fn open(&mut self, record: ListingRecord) {
        self.record = Some(record);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.record = None;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn record(&self) -> Option<&ListingRecord> {
        self.record.as_ref()
    }

    /// Click on thumbnail `clicked_index` of the held record.
    pub fn select_image(&mut self, clicked_index: usize) {
        if let Some(record) = self.record.as_ref() {
            self.record = Some(reorder_gallery(record, clicked_index));
        }
    }
}

/// Thumbnails skip the primary image, so thumbnail `i` is `images[i + 1]`.
/// Out-of-range clicks leave the record unchanged.
pub fn reorder_gallery(record: &ListingRecord, clicked_index: usize) -> ListingRecord {
    let mut out = record.clone();
    let target = clicked_index + 1;

    if target < out.images.len() {
        out.images.swap(0, target);
        out.image = out.images[0].clone();
    }

    out
}
