mod catalog_tests;
mod listing_tests;
mod search_tests;

use crate::tests::utils::{ScriptedTransport, API};
use serde_json::{json, Value};

/// A backend where every home section answers; rentals only via fallback.
fn backend() -> ScriptedTransport {
    let parcels: Vec<Value> = (0..6)
        .map(|i| {
            let agency = if i < 5 {
                json!({ "_id": "a1", "nom": "Sahel Immobilier", "ville": "Niamey" })
            } else {
                json!({ "_id": "a2", "nom": "Ténéré Foncier", "ville": "Agadez" })
            };
            json!({
                "_id": format!("p{i}"),
                "numeroParcelle": format!("N{i}"),
                "prix": 2_000_000 + i * 100_000,
                "statut": "avendre",
                "agence": agency,
                "block": { "quarter": { "city": "Niamey" } }
            })
        })
        .collect();

    ScriptedTransport::new()
        .ok(&format!("{API}/parcelles/public"), json!({ "parcelles": parcels }))
        .ok(
            &format!("{API}/patrimoine/public"),
            json!({ "data": { "patrimoine": [{ "_id": "b1", "titre": "Villa Plateau", "prix": 90_000_000 }] } }),
        )
        .ok(
            &format!("{API}/locations"),
            json!({ "locations": [{
                "_id": "r1",
                "titre": "Appartement Koira Kano",
                "ville": "Niamey",
                "prixMensuel": 250_000,
                "meuble": true,
                "images": ["uploads\\r1\\a.jpg", "uploads\\r1\\b.jpg", "uploads\\r1\\c.jpg"],
                "videos": ["https://youtu.be/dQw4w9WgXcQ"]
            }] }),
        )
        .ok(
            &format!("{API}/banques/actives"),
            json!([{ "_id": "k1", "nom": "BIA Niger" }, { "_id": "k2", "nom": "Sonibank" }]),
        )
        .ok(&format!("{API}/agences/public"), json!({ "agences": [{ "_id": "a1", "nom": "Sahel Immobilier" }] }))
        .ok(&format!("{API}/notaires/public"), json!({ "notaires": [] }))
}
