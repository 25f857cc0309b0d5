//! Lookup Map Construction
//!
//! Flattens the per-package bulk documents into the two lookup tables the
//! decoder consults: card ID → baseline classification, and card ID or
//! display name → attribute overrides.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::models::{RegularCardInfo, SpecialCardOverride};

// == Regular Lookup ==
/// Builds the card-ID lookup from a regular card map
/// (booster name → card type → [card IDs]).
///
/// Returns `None` when the document root is not a JSON object. For the
/// mandatory regular document that is a parse failure, reported by the
/// caller as metadata-not-found.
///
/// A card ID duplicated across boosters keeps the last-seen booster
/// (last object wins, deterministic because serde_json preserves document
/// order). Non-array type sections are skipped, as are non-string IDs.
pub fn build_regular_lookup(doc: &Value) -> Option<HashMap<String, RegularCardInfo>> {
    let boosters = doc.as_object()?;
    let mut lookup = HashMap::new();

    for (booster_name, card_types) in boosters {
        let Some(card_types) = card_types.as_object() else {
            warn!(
                "Skipping non-object booster section '{}' in regular card map",
                booster_name
            );
            continue;
        };

        for (card_type, cards) in card_types {
            let Some(cards) = cards.as_array() else {
                continue;
            };

            for card_id in cards.iter().filter_map(Value::as_str) {
                lookup.insert(
                    card_id.to_string(),
                    RegularCardInfo {
                        card_type: card_type.clone(),
                        booster_name: booster_name.clone(),
                    },
                );
            }
        }
    }

    Some(lookup)
}

// == Special Lookup ==
/// Builds the override lookup from an optional special card map
/// (card ID or display name → override record).
///
/// Absence of the document is a valid state, yielding an empty lookup.
/// Entries that fail to deserialize are skipped with a warning; one
/// malformed override never blocks the rest of the package.
pub fn build_special_lookup(doc: Option<&Value>) -> HashMap<String, SpecialCardOverride> {
    let mut lookup = HashMap::new();

    let Some(entries) = doc.and_then(Value::as_object) else {
        return lookup;
    };

    for (key, entry) in entries {
        match serde_json::from_value::<SpecialCardOverride>(entry.clone()) {
            Ok(override_record) => {
                lookup.insert(key.clone(), override_record);
            }
            Err(err) => {
                warn!("Skipping malformed special card entry '{}': {}", key, err);
            }
        }
    }

    lookup
}

// == Card Name Table ==
/// Builds the global card-name table from its bulk document
/// (name key → language code → display name).
///
/// Lenient like the special lookup: entries with an unexpected shape are
/// skipped with a warning rather than failing name resolution outright.
pub fn build_name_table(doc: &Value) -> crate::models::CardNameTable {
    let mut table = crate::models::CardNameTable::new();

    let Some(entries) = doc.as_object() else {
        warn!("Card-names document root is not an object; names will be empty");
        return table;
    };

    for (name_key, languages) in entries {
        match serde_json::from_value::<HashMap<String, String>>(languages.clone()) {
            Ok(by_language) => {
                table.insert(name_key.clone(), by_language);
            }
            Err(err) => {
                warn!("Skipping malformed card-name entry '{}': {}", name_key, err);
            }
        }
    }

    table
}
