// src/catalog/record.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Which backend collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Parcel,
    Property,
    Rental,
    Notary,
}

impl ListingKind {
    /// Title used when the backend record carries none.
    pub fn placeholder_title(self) -> &'static str {
        match self {
            ListingKind::Parcel => "Parcelle",
            ListingKind::Property => "Bien immobilier",
            ListingKind::Rental => "Location",
            ListingKind::Notary => "Notaire",
        }
    }
}

/// Lifecycle status as reported by the backend (`statut`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListingStatus {
    AVendre,
    Vendu,
    Disponible,
    Loue,
    Reserve,
    Other(String),
    Unknown,
}

impl ListingStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return ListingStatus::Unknown;
        };

        match raw.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "avendre" => ListingStatus::AVendre,
            "vendu" | "vendue" => ListingStatus::Vendu,
            "disponible" => ListingStatus::Disponible,
            "loue" | "louee" | "loué" | "louée" => ListingStatus::Loue,
            "reserve" | "reservee" | "réservé" | "réservée" => ListingStatus::Reserve,
            _ => ListingStatus::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ListingStatus::AVendre => "À vendre",
            ListingStatus::Vendu => "Vendu",
            ListingStatus::Disponible => "Disponible",
            ListingStatus::Loue => "Loué",
            ListingStatus::Reserve => "Réservé",
            ListingStatus::Other(s) => s,
            ListingStatus::Unknown => "Statut inconnu",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Owning agency, denormalized onto each listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyRef {
    pub id: String,
    pub name: String,
    pub city: String,
    pub phone: String,
}

/// Uniform display shape for parcels, properties, rentals and notaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub id: String,
    pub kind: ListingKind,
    pub title: String,
    pub property_type: String,

    pub city: String,
    pub quarter: String,
    pub address: String,

    pub price: f64,
    pub price_label: String,
    pub area: f64,
    pub rooms: u32,
    pub geo: Option<GeoPoint>,

    pub agency: Option<AgencyRef>,

    /// Primary image, always an absolute URL.
    pub image: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub documents: Vec<String>,
    pub features: Vec<&'static str>,

    pub verified: bool,
    pub status: ListingStatus,
    pub gradient: &'static str,
    pub created_at: Option<DateTime<Utc>>,

    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Agency or bank entry shown in the directory carousels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub email: Option<String>,
    pub logo: String,
    pub description: String,
    pub verified: bool,
    pub gradient: &'static str,
}
