//! Data models for the metadata lookup core
//!
//! Defines the serde-facing types shared between the index, the decoder and
//! the host's response layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A fully decoded card record, computed per call from an image filename,
/// the package's lookup maps and the static classification tables.
///
/// Field names serialize with the camelCase spelling the catalog API uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedCard {
    /// Raw image filename, doubling as the stable card identifier
    pub card_id: String,
    /// Per-language display name, empty when the name lookup misses
    pub name: String,
    /// Card energy type, e.g. "fire" ("colorless" when unresolved)
    #[serde(rename = "type")]
    pub card_type: String,
    /// Package the card belongs to, e.g. "A1_genetic-apex"
    pub package: String,
    /// Booster packs the card appears in
    pub booster_pack: Vec<String>,
    /// Trainer class, e.g. "pokemon", "trainer", "item"
    pub trainer: String,
    /// Rarity label, "unknown" when the rarity code is unrecognized
    pub rarity: String,
    /// Special effect, "none" unless a special override supplies one
    pub special_effect: String,
    /// Energy required to fight, defaults to the card's own type
    pub fight_energy: String,
    /// Weakness type, "none" when the type has no weakness mapping
    pub weakness: String,
    /// Language code the name was resolved for, e.g. "en_US"
    pub language: String,
    /// Public URL of the card image
    pub image_url: String,
}

/// Baseline classification for one card ID, derived from the regular
/// card-definition document (booster → type → [card IDs]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularCardInfo {
    /// Card energy type the booster section classified the card under
    pub card_type: String,
    /// Booster pack the card was (last) listed in
    pub booster_name: String,
}

/// Attribute overrides for cards whose values don't follow the regular
/// derivation rules, keyed by card ID or display name in the special
/// document. Only fields present on the override are applied.
///
/// JSON key spelling matches the special documents as uploaded (a mix of
/// snake_case and camelCase), so each field carries its own rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpecialCardOverride {
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub trainer: Option<String>,
    #[serde(rename = "special_effect")]
    pub special_effect: Option<String>,
    #[serde(rename = "fight_energy")]
    pub fight_energy: Option<String>,
    pub weakness: Option<String>,
    #[serde(rename = "boosterPack")]
    pub booster_pack: Option<Vec<String>>,
}

/// Global card-name table: name key → language code → display name.
pub type CardNameTable = HashMap<String, HashMap<String, String>>;

/// The composed lookup maps for one package, built once per load and shared
/// behind an `Arc` by every concurrent decode call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageLookup {
    /// Card ID → baseline classification from the regular document
    pub regular: HashMap<String, RegularCardInfo>,
    /// Card ID or display name → attribute overrides; empty when the
    /// package has no special document
    pub special: HashMap<String, SpecialCardOverride>,
}

/// Debugging snapshot of the metadata index state.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStatus {
    /// Package codes with a fully built lookup
    pub ready_packages: Vec<String>,
    /// Package codes with a build currently in flight
    pub loading_packages: Vec<String>,
    /// Package codes with an armed invalidation timer
    pub scheduled_invalidations: Vec<String>,
    /// Whether the global card-name table has been loaded
    pub card_names_loaded: bool,
    /// When this snapshot was taken
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
