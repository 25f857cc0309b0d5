//! Filename Decoding
//!
//! Turns a raw per-language image filename into a structured card record,
//! combining positional filename segments, the package's lookup maps, the
//! global card-name table and the static classification tables.

use crate::error::{CardCacheError, Result};
use crate::index::fetch::BulkDocumentFetcher;
use crate::index::registry::CardMetadataIndex;
use crate::models::DecodedCard;

/// Segment delimiter in card image filenames.
pub const FILENAME_DELIMITER: char = '_';

/// Minimum number of delimiter-separated segments a decodable filename has.
/// Callers are expected to pre-validate this; fewer segments is a contract
/// violation, not a transient condition.
pub const MIN_FILENAME_SEGMENTS: usize = 10;

impl<F: BulkDocumentFetcher> CardMetadataIndex<F> {
    // == Decode Card ==
    /// Decodes a raw image filename into a fully populated card record.
    ///
    /// Positional extraction: trainer code = segments 0-1, card ID =
    /// segment 2, name key = segment 4, rarity code = segment 5. The
    /// package's regular lookup supplies type and booster; the special
    /// lookup (display name checked before card ID) overrides field by
    /// field; everything else falls back to documented defaults, so one
    /// missing input never fails a whole batch.
    ///
    /// # Errors
    /// - `InvalidFilenameFormat` when the filename has fewer than
    ///   [`MIN_FILENAME_SEGMENTS`] segments
    /// - `MetadataNotFound` when the package's regular document cannot be
    ///   loaded
    pub async fn decode_card(
        &self,
        filename: &str,
        url: &str,
        package_id: &str,
        language: &str,
    ) -> Result<DecodedCard> {
        let parts: Vec<&str> = filename.split(FILENAME_DELIMITER).collect();
        if parts.len() < MIN_FILENAME_SEGMENTS {
            return Err(CardCacheError::InvalidFilenameFormat(filename.to_string()));
        }

        let trainer_code = format!("{}{}{}", parts[0], FILENAME_DELIMITER, parts[1]);
        let card_id = parts[2];
        let name_key = parts[4];
        let rarity_code = parts[5];

        // "A1_100020_LIZARDON" → code "A1", package "A1_LIZARDON"; a
        // package_id without a third segment degrades to the bare code
        let id_parts: Vec<&str> = package_id.split(FILENAME_DELIMITER).collect();
        let package_code = id_parts[0];
        let card_package = match id_parts.get(2) {
            Some(suffix) => format!("{}{}{}", package_code, FILENAME_DELIMITER, suffix),
            None => package_code.to_string(),
        };

        let lookup = self.lookup_maps(package_code).await?;

        let name = self
            .card_names()
            .await
            .get(name_key)
            .and_then(|by_language| by_language.get(language))
            .cloned()
            .unwrap_or_default();

        let tables = self.tables();
        let regular_info = lookup.regular.get(card_id);

        let mut card_type = regular_info.map(|info| info.card_type.clone());
        let mut booster_pack: Vec<String> = regular_info
            .map(|info| vec![info.booster_name.clone()])
            .unwrap_or_default();

        let mut trainer = tables
            .trainer_codes
            .get(&trainer_code)
            .cloned()
            .unwrap_or_default();
        let rarity = tables
            .rarity_codes
            .get(rarity_code)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let mut fight_energy = card_type.clone().unwrap_or_else(|| "colorless".to_string());
        let mut weakness = card_type
            .as_ref()
            .and_then(|t| tables.type_weakness.get(t))
            .cloned()
            .unwrap_or_else(|| "none".to_string());
        let mut special_effect = "none".to_string();

        // Overrides apply field by field, never whole-record; the display
        // name is checked before the card ID
        let special_info = lookup
            .special
            .get(&name)
            .or_else(|| lookup.special.get(card_id));
        if let Some(over) = special_info {
            if let Some(t) = &over.card_type {
                card_type = Some(t.clone());
            }
            if let Some(t) = &over.trainer {
                trainer = t.clone();
            }
            if let Some(e) = &over.special_effect {
                special_effect = e.clone();
            }
            if let Some(f) = &over.fight_energy {
                fight_energy = f.clone();
            }
            if let Some(w) = &over.weakness {
                weakness = w.clone();
            }
            if let Some(b) = &over.booster_pack {
                booster_pack = b.clone();
            }
        }

        // Final fallbacks once overrides had their say
        let card_type = card_type.unwrap_or_else(|| "colorless".to_string());
        if trainer.is_empty() {
            trainer = "pokemon".to_string();
        }

        Ok(DecodedCard {
            card_id: filename.to_string(),
            name,
            card_type,
            package: card_package,
            booster_pack,
            trainer,
            rarity,
            special_effect,
            fight_energy,
            weakness,
            language: language.to_string(),
            image_url: url.to_string(),
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use crate::index::fetch::DocumentKind;
    use crate::index::tables::ClassificationTables;

    /// Fixture fetcher serving canned documents.
    struct FixtureFetcher {
        regular: Option<Value>,
        special: Option<Value>,
        names: Value,
    }

    impl BulkDocumentFetcher for FixtureFetcher {
        async fn fetch_package_document(
            &self,
            _package_code: &str,
            kind: DocumentKind,
        ) -> anyhow::Result<Option<Value>> {
            Ok(match kind {
                DocumentKind::Regular => self.regular.clone(),
                DocumentKind::Special => self.special.clone(),
            })
        }

        async fn fetch_card_names(&self) -> anyhow::Result<Value> {
            Ok(self.names.clone())
        }
    }

    fn scenario_tables() -> ClassificationTables {
        let mut trainer = HashMap::new();
        trainer.insert("cTR_10".to_string(), "trainer".to_string());
        let mut rarity = HashMap::new();
        rarity.insert("C".to_string(), "common".to_string());
        ClassificationTables::new(trainer, rarity, HashMap::new())
    }

    #[tokio::test]
    async fn test_decode_round_trip_scenario() {
        let index = CardMetadataIndex::new(
            FixtureFetcher {
                regular: Some(json!({ "boosterA": { "fire": ["001", "002"] } })),
                special: None,
                names: json!({}),
            },
            scenario_tables(),
        );

        let card = index
            .decode_card("cTR_10_001_x_cardname_C_x_x_en_US.png", "url", "A1", "en_US")
            .await
            .unwrap();

        assert_eq!(card.card_type, "fire");
        assert_eq!(card.booster_pack, vec!["boosterA".to_string()]);
        assert_eq!(card.trainer, "trainer");
        assert_eq!(card.rarity, "common");
        assert_eq!(card.fight_energy, "fire");
        assert_eq!(card.weakness, "none");
        assert_eq!(card.special_effect, "none");
        assert_eq!(card.name, "");
        assert_eq!(card.package, "A1");
        assert_eq!(card.language, "en_US");
        assert_eq!(card.image_url, "url");
    }

    #[tokio::test]
    async fn test_decode_too_few_segments_is_contract_error() {
        let index = CardMetadataIndex::new(
            FixtureFetcher {
                regular: Some(json!({})),
                special: None,
                names: json!({}),
            },
            ClassificationTables::standard(),
        );

        let err = index
            .decode_card("cPK_10_000010.png", "url", "A1", "en_US")
            .await
            .unwrap_err();

        assert!(matches!(err, CardCacheError::InvalidFilenameFormat(_)));
    }

    #[tokio::test]
    async fn test_decode_unknown_card_gets_defaults() {
        let index = CardMetadataIndex::new(
            FixtureFetcher {
                regular: Some(json!({ "boosterA": { "fire": ["001"] } })),
                special: None,
                names: json!({}),
            },
            ClassificationTables::standard(),
        );

        // Card ID 999 is in no booster, trainer code unrecognized,
        // rarity code unrecognized
        let card = index
            .decode_card("zXX_00_999_x_nobody_Q_x_x_en_US.png", "url", "A1", "en_US")
            .await
            .unwrap();

        assert_eq!(card.card_type, "colorless");
        assert!(card.booster_pack.is_empty());
        assert_eq!(card.trainer, "pokemon");
        assert_eq!(card.rarity, "unknown");
        assert_eq!(card.fight_energy, "colorless");
        assert_eq!(card.weakness, "none");
    }

    #[tokio::test]
    async fn test_decode_package_field_from_package_id() {
        let index = CardMetadataIndex::new(
            FixtureFetcher {
                regular: Some(json!({})),
                special: None,
                names: json!({}),
            },
            ClassificationTables::standard(),
        );

        let card = index
            .decode_card(
                "cPK_10_000010_00_pikachu_C_x_x_en_US.png",
                "url",
                "A1_100030_PIKACHU",
                "en_US",
            )
            .await
            .unwrap();
        assert_eq!(card.package, "A1_PIKACHU");

        // Short package_id degrades to the bare code
        let card = index
            .decode_card(
                "cPK_10_000010_00_pikachu_C_x_x_en_US.png",
                "url",
                "A1",
                "en_US",
            )
            .await
            .unwrap();
        assert_eq!(card.package, "A1");
    }

    #[tokio::test]
    async fn test_decode_resolves_display_name_per_language() {
        let index = CardMetadataIndex::new(
            FixtureFetcher {
                regular: Some(json!({ "mewtwo": { "grass": ["000010"] } })),
                special: None,
                names: json!({ "fushigidane": { "en_US": "Bulbasaur" } }),
            },
            ClassificationTables::standard(),
        );

        let card = index
            .decode_card(
                "cPK_10_000010_00_fushigidane_C_x_x_en_US.png",
                "url",
                "A1",
                "en_US",
            )
            .await
            .unwrap();
        assert_eq!(card.name, "Bulbasaur");

        // Missing language key yields an empty name, not an error
        let card = index
            .decode_card(
                "cPK_10_000010_00_fushigidane_C_x_x_ja_JP.png",
                "url",
                "A1",
                "ja_JP",
            )
            .await
            .unwrap();
        assert_eq!(card.name, "");
    }
}
