// src/catalog/normalize.rs
//
// Raw backend record -> ListingRecord. Never fails: every missing or
// malformed field degrades to its default.

use crate::catalog::raw::{self, field, flag, name_of, number, string_list, text};
use crate::catalog::record::{
    AgencyRef, GeoPoint, ListingKind, ListingRecord, ListingStatus, Organization,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const DEFAULT_CITY: &str = "Ville non spécifiée";
pub const DEFAULT_QUARTER: &str = "Quartier non spécifié";
pub const DEFAULT_ADDRESS: &str = "Adresse non spécifiée";
pub const DEFAULT_TYPE: &str = "Type non spécifié";
pub const DEFAULT_PHONE: &str = "Téléphone non renseigné";
/// Parcels without any resolvable city are in the capital.
pub const DEFAULT_PARCEL_CITY: &str = "Niamey";
pub const NO_AGENCY_NAME: &str = "Agence non spécifiée";

pub const GRADIENTS: [&str; 6] = [
    "linear-gradient(135deg, #f97316 0%, #ea580c 100%)",
    "linear-gradient(135deg, #10b981 0%, #047857 100%)",
    "linear-gradient(135deg, #3b82f6 0%, #1d4ed8 100%)",
    "linear-gradient(135deg, #8b5cf6 0%, #6d28d9 100%)",
    "linear-gradient(135deg, #f59e0b 0%, #b45309 100%)",
    "linear-gradient(135deg, #ec4899 0%, #be185d 100%)",
];

/// Feature flags in display order: (backend keys, label).
const FEATURES: [(&[&str], &str); 10] = [
    (&["meuble", "furnished"], "Meublé"),
    (&["garage"], "Garage"),
    (&["piscine", "pool"], "Piscine"),
    (&["climatisation", "climatise", "airConditioning"], "Climatisation"),
    (&["jardin", "garden"], "Jardin"),
    (&["gardiennage", "securite", "security"], "Gardiennage"),
    (&["eauCourante", "eau"], "Eau courante"),
    (&["electricite"], "Électricité"),
    (&["parking"], "Parking"),
    (&["balcon", "balcony"], "Balcon"),
];

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?(?:[^#]*&)?v=|youtu\.be/|/embed/)([A-Za-z0-9_-]+)")
        .expect("youtube pattern")
});
static VIMEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:player\.vimeo\.com/video/|vimeo\.com/)(\d+)").expect("vimeo pattern")
});

/// Where relative file paths live and what to show when there is no image.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    pub files_base: String,
    pub placeholder_image: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            files_base: "http://localhost:5000".to_string(),
            placeholder_image:
                "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=800&q=80".to_string(),
        }
    }
}

impl NormalizeConfig {
    /// Backslashes become slashes; absolute URLs pass, relative paths get the files base.
    pub fn fix_url(&self, path: &str) -> String {
        let path = path.trim().replace('\\', "/");
        if path.starts_with("http") {
            return path;
        }
        format!(
            "{}/{}",
            self.files_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn primary_image(&self, images: &[String]) -> String {
        images
            .first()
            .cloned()
            .unwrap_or_else(|| self.placeholder_image.clone())
    }
}

pub fn gradient_for(index: usize) -> &'static str {
    GRADIENTS[index % GRADIENTS.len()]
}

/// Rewrite YouTube and Vimeo links to their embeddable form; anything else is returned as is.
pub fn embed_video_url(url: &str) -> String {
    if let Some(id) = YOUTUBE_ID.captures(url).and_then(|c| c.get(1)) {
        return format!("https://www.youtube.com/embed/{}", id.as_str());
    }
    if let Some(id) = VIMEO_ID.captures(url).and_then(|c| c.get(1)) {
        return format!("https://player.vimeo.com/video/{}", id.as_str());
    }
    url.to_string()
}

/// `block.quarter.city`, then `block.zone.quarter.city`, then Niamey.
pub fn resolve_parcel_city(raw: &Value) -> String {
    let block = field(raw, &["block", "bloc"]);
    let via_quarter = block
        .and_then(|b| field(b, &["quarter", "quartier"]))
        .and_then(|q| field(q, &["city", "ville"]))
        .and_then(name_of);

    via_quarter
        .or_else(|| {
            block
                .and_then(|b| field(b, &["zone"]))
                .and_then(|z| field(z, &["quarter", "quartier"]))
                .and_then(|q| field(q, &["city", "ville"]))
                .and_then(name_of)
        })
        .unwrap_or_else(|| DEFAULT_PARCEL_CITY.to_string())
}

fn resolve_parcel_quarter(raw: &Value) -> Option<String> {
    let block = field(raw, &["block", "bloc"])?;
    field(block, &["quarter", "quartier"])
        .or_else(|| field(block, &["zone"]).and_then(|z| field(z, &["quarter", "quartier"])))
        .and_then(name_of)
}

/// "50 000 FCFA"
pub fn format_price(amount: f64, monthly: bool) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if monthly {
        format!("{grouped} FCFA/mois")
    } else {
        format!("{grouped} FCFA")
    }
}

pub fn feature_labels(raw: &Value) -> Vec<&'static str> {
    FEATURES
        .iter()
        .filter(|(keys, _)| flag(raw, keys))
        .map(|(_, label)| *label)
        .collect()
}

fn agency_ref(raw: &Value) -> Option<AgencyRef> {
    let agency = field(raw, &["agence", "agency", "agenceId"])?;

    match agency {
        Value::Object(_) => Some(AgencyRef {
            id: text(agency, &["_id", "id"])?,
            name: text(agency, &["nom", "name"]).unwrap_or_else(|| NO_AGENCY_NAME.to_string()),
            city: raw::first_of(agency, &["ville", "city"], name_of)
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
            phone: text(agency, &["telephone", "phone", "contact"])
                .unwrap_or_else(|| DEFAULT_PHONE.to_string()),
        }),
        other => raw::as_text(other).map(|id| AgencyRef {
            id,
            name: NO_AGENCY_NAME.to_string(),
            city: DEFAULT_CITY.to_string(),
            phone: DEFAULT_PHONE.to_string(),
        }),
    }
}

fn geo_point(raw: &Value) -> Option<GeoPoint> {
    let coords = field(raw, &["coordonnees", "localisation", "coordinates", "geo"])?;
    let lat = number(coords, &["lat", "latitude"])?;
    let lng = number(coords, &["lng", "lon", "longitude"])?;
    Some(GeoPoint { lat, lng })
}

fn created_at(raw: &Value) -> Option<DateTime<Utc>> {
    text(raw, &["createdAt", "dateCreation"])
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn title_for(kind: ListingKind, raw: &Value) -> Option<String> {
    match kind {
        ListingKind::Parcel => text(raw, &["numeroParcelle", "numero", "reference", "titre"])
            .map(|n| format!("Parcelle {n}")),
        ListingKind::Property | ListingKind::Rental => text(raw, &["titre", "title", "nom"]),
        ListingKind::Notary => {
            let first = text(raw, &["prenom", "firstName"]);
            let last = text(raw, &["nom", "name", "lastName"]);
            match (first, last) {
                (Some(f), Some(l)) => Some(format!("Me {f} {l}")),
                (None, Some(n)) | (Some(n), None) => Some(format!("Me {n}")),
                (None, None) => text(raw, &["cabinet", "etude"]),
            }
        }
    }
}

fn price_for(kind: ListingKind, raw: &Value) -> f64 {
    let keys: &[&str] = match kind {
        ListingKind::Rental => &["prixMensuel", "loyer", "prix", "price"],
        _ => &["prix", "price", "prixVente"],
    };
    number(raw, keys).unwrap_or(0.0)
}

/// Normalize one raw listing record at position `index` of its response.
pub fn normalize_listing(
    kind: ListingKind,
    raw: &Value,
    index: usize,
    config: &NormalizeConfig,
) -> ListingRecord {
    let images: Vec<String> = string_list(raw, &["images", "photos", "image"])
        .iter()
        .map(|p| config.fix_url(p))
        .collect();
    let documents = string_list(raw, &["documents", "docs"])
        .iter()
        .map(|p| config.fix_url(p))
        .collect();
    let videos = string_list(raw, &["videos", "video"])
        .iter()
        .map(|v| embed_video_url(v))
        .collect();

    let city = match kind {
        ListingKind::Parcel => resolve_parcel_city(raw),
        _ => raw::first_of(raw, &["ville", "city"], name_of)
            .unwrap_or_else(|| DEFAULT_CITY.to_string()),
    };
    let quarter = match kind {
        ListingKind::Parcel => resolve_parcel_quarter(raw),
        _ => raw::first_of(raw, &["quartier", "quarter"], name_of),
    }
    .unwrap_or_else(|| DEFAULT_QUARTER.to_string());

    let price = price_for(kind, raw);

    ListingRecord {
        id: text(raw, &["_id", "id"]).unwrap_or_else(|| format!("{kind:?}-{index}").to_lowercase()),
        kind,
        title: title_for(kind, raw).unwrap_or_else(|| kind.placeholder_title().to_string()),
        property_type: text(raw, &["type", "typeBien", "categorie"])
            .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        city,
        quarter,
        address: text(raw, &["adresse", "address"]).unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        price,
        price_label: format_price(price, kind == ListingKind::Rental),
        area: number(raw, &["superficie", "surface", "area"]).unwrap_or(0.0),
        rooms: number(raw, &["chambres", "nombreChambres", "pieces", "rooms"])
            .map(|n| n.max(0.0) as u32)
            .unwrap_or(0),
        geo: geo_point(raw),
        agency: agency_ref(raw),
        image: config.primary_image(&images),
        images,
        videos,
        documents,
        features: feature_labels(raw),
        verified: flag(raw, &["verified", "estVerifie", "verifie"]),
        status: ListingStatus::parse(text(raw, &["statut", "status"]).as_deref()),
        gradient: gradient_for(index),
        created_at: created_at(raw),
        phone: text(raw, &["telephone", "phone"]),
        email: text(raw, &["email"]),
    }
}

/// Normalize one agency or bank entry.
pub fn normalize_organization(raw: &Value, index: usize, config: &NormalizeConfig) -> Organization {
    let logo = text(raw, &["logo", "image", "photo"])
        .map(|p| config.fix_url(&p))
        .unwrap_or_else(|| config.placeholder_image.clone());

    Organization {
        id: text(raw, &["_id", "id"]).unwrap_or_else(|| format!("org-{index}")),
        name: text(raw, &["nom", "name", "raisonSociale"])
            .unwrap_or_else(|| NO_AGENCY_NAME.to_string()),
        city: raw::first_of(raw, &["ville", "city"], name_of)
            .unwrap_or_else(|| DEFAULT_CITY.to_string()),
        phone: text(raw, &["telephone", "phone", "contact"])
            .unwrap_or_else(|| DEFAULT_PHONE.to_string()),
        email: text(raw, &["email"]),
        logo,
        description: text(raw, &["description"]).unwrap_or_default(),
        verified: flag(raw, &["verified", "estVerifie", "verifie"]),
        gradient: gradient_for(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> NormalizeConfig {
        NormalizeConfig {
            files_base: "https://api.example.ne/".to_string(),
            placeholder_image: "https://img.example.ne/stock.jpg".to_string(),
        }
    }

    #[test]
    fn rental_scenario_gets_price_placeholder_and_city() {
        let raw = json!({
            "_id": "1",
            "titre": "T1",
            "ville": "Niamey",
            "prixMensuel": 50000,
            "images": []
        });

        let rec = normalize_listing(ListingKind::Rental, &raw, 0, &config());

        assert_eq!(rec.id, "1");
        assert_eq!(rec.title, "T1");
        assert_eq!(rec.price, 50000.0);
        assert_eq!(rec.price_label, "50 000 FCFA/mois");
        assert_eq!(rec.image, "https://img.example.ne/stock.jpg");
        assert_eq!(rec.city, "Niamey");
        assert!(rec.images.is_empty());
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let raw = json!({ "_id": "x", "prix": null, "superficie": "n/a" });

        for kind in [
            ListingKind::Parcel,
            ListingKind::Property,
            ListingKind::Rental,
            ListingKind::Notary,
        ] {
            let rec = normalize_listing(kind, &raw, 3, &config());
            assert_eq!(rec.price, 0.0);
            assert_eq!(rec.area, 0.0);
            assert_eq!(rec.rooms, 0);
            assert!(!rec.price.is_nan());
        }
    }

    #[test]
    fn missing_strings_use_placeholders() {
        let rec = normalize_listing(ListingKind::Property, &json!({}), 0, &config());
        assert_eq!(rec.city, DEFAULT_CITY);
        assert_eq!(rec.quarter, DEFAULT_QUARTER);
        assert_eq!(rec.title, "Bien immobilier");
        assert_eq!(rec.id, "property-0");
        assert_eq!(rec.status, ListingStatus::Unknown);
        assert!(rec.agency.is_none());
    }

    #[test]
    fn image_paths_are_fixed() {
        let raw = json!({
            "images": ["uploads\\parcelles\\a.jpg", "/uploads/b.jpg", "https://cdn.example.ne/c.jpg"]
        });
        let rec = normalize_listing(ListingKind::Parcel, &raw, 0, &config());

        assert_eq!(
            rec.images,
            vec![
                "https://api.example.ne/uploads/parcelles/a.jpg",
                "https://api.example.ne/uploads/b.jpg",
                "https://cdn.example.ne/c.jpg",
            ]
        );
        assert_eq!(rec.image, rec.images[0]);
        for img in &rec.images {
            assert!(!img.contains('\\'));
            assert!(url::Url::parse(img).is_ok());
        }
    }

    #[test]
    fn gradient_cycles_over_six() {
        assert_eq!(gradient_for(0), gradient_for(6));
        assert_eq!(gradient_for(1), gradient_for(13));
        assert_ne!(gradient_for(0), gradient_for(1));
    }

    #[test]
    fn features_keep_declaration_order() {
        let raw = json!({ "piscine": true, "meuble": "oui", "garage": false, "balcon": 1 });
        assert_eq!(feature_labels(&raw), vec!["Meublé", "Piscine", "Balcon"]);
    }

    #[test]
    fn video_urls_become_embeddable() {
        assert_eq!(
            embed_video_url("https://youtu.be/dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=3"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_video_url("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            embed_video_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
        assert_eq!(
            embed_video_url("https://player.vimeo.com/video/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
        assert_eq!(
            embed_video_url("https://example.com/video.mp4"),
            "https://example.com/video.mp4"
        );
    }

    #[test]
    fn parcel_city_priority_chain() {
        let direct = json!({ "block": { "quarter": { "city": "Maradi" } } });
        assert_eq!(resolve_parcel_city(&direct), "Maradi");

        let via_zone = json!({
            "block": { "zone": { "quarter": { "city": { "name": "Tahoua" } } } }
        });
        assert_eq!(resolve_parcel_city(&via_zone), "Tahoua");

        let both = json!({
            "block": {
                "quarter": { "city": { "name": "Dosso" } },
                "zone": { "quarter": { "city": "Agadez" } }
            }
        });
        assert_eq!(resolve_parcel_city(&both), "Dosso");

        assert_eq!(resolve_parcel_city(&json!({ "block": {} })), "Niamey");
        assert_eq!(resolve_parcel_city(&json!({})), "Niamey");
    }

    #[test]
    fn agency_is_read_from_object_or_bare_id() {
        let obj = json!({ "agence": { "_id": "a1", "nom": "Sahel Immo", "ville": "Niamey" } });
        let agency = normalize_listing(ListingKind::Parcel, &obj, 0, &config())
            .agency
            .unwrap();
        assert_eq!(agency.id, "a1");
        assert_eq!(agency.name, "Sahel Immo");
        assert_eq!(agency.phone, DEFAULT_PHONE);

        let bare = json!({ "agence": "a2" });
        let agency = normalize_listing(ListingKind::Parcel, &bare, 0, &config())
            .agency
            .unwrap();
        assert_eq!(agency.id, "a2");
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let raw = json!({
            "_id": "p9",
            "numeroParcelle": "B-12",
            "prix": "1500000",
            "superficie": 400,
            "statut": "avendre",
            "images": ["x\\y.png"],
            "videos": ["https://youtu.be/abc123"],
            "createdAt": "2024-05-01T10:00:00Z",
            "localisation": { "lat": 13.5, "lng": 2.1 }
        });

        let a = normalize_listing(ListingKind::Parcel, &raw, 4, &config());
        let b = normalize_listing(ListingKind::Parcel, &raw, 4, &config());
        assert_eq!(a, b);
        assert_eq!(a.title, "Parcelle B-12");
        assert_eq!(a.status, ListingStatus::AVendre);
        assert_eq!(a.price_label, "1 500 000 FCFA");
        assert_eq!(a.geo, Some(GeoPoint { lat: 13.5, lng: 2.1 }));
        assert!(a.created_at.is_some());
    }

    #[test]
    fn blank_first_keys_fall_back_to_later_ones() {
        let raw = json!({
            "titre": "",
            "nom": "Villa Plateau",
            "prixMensuel": "",
            "prix": 75000,
            "ville": "",
            "city": { "name": "Zinder" }
        });

        let rec = normalize_listing(ListingKind::Rental, &raw, 0, &config());

        assert_eq!(rec.title, "Villa Plateau");
        assert_eq!(rec.price, 75000.0);
        assert_eq!(rec.price_label, "75 000 FCFA/mois");
        assert_eq!(rec.city, "Zinder");
    }

    #[test]
    fn notary_title_uses_names() {
        let raw = json!({ "prenom": "Aïcha", "nom": "Moussa", "telephone": "+227 90 00 00 00" });
        let rec = normalize_listing(ListingKind::Notary, &raw, 0, &config());
        assert_eq!(rec.title, "Me Aïcha Moussa");
        assert_eq!(rec.phone.as_deref(), Some("+227 90 00 00 00"));
    }

    #[test]
    fn organization_defaults() {
        let org = normalize_organization(&json!({ "nom": "BAGRI", "logo": "logos\\bagri.png" }), 2, &config());
        assert_eq!(org.name, "BAGRI");
        assert_eq!(org.logo, "https://api.example.ne/logos/bagri.png");
        assert_eq!(org.city, DEFAULT_CITY);
        assert_eq!(org.id, "org-2");
    }
}
