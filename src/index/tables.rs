//! Static Classification Tables
//!
//! Trainer-code, rarity-code and type-weakness mappings used by filename
//! decoding. These are injected data, not computed: the business rules
//! behind them belong to the catalog, the index only consults them.

use std::collections::HashMap;

// == Classification Tables ==
/// The three static lookup tables filename decoding consults.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTables {
    /// Trainer code (first two filename segments, e.g. "cTR_10") → class
    pub trainer_codes: HashMap<String, String>,
    /// Rarity code (sixth filename segment, e.g. "RR") → rarity label
    pub rarity_codes: HashMap<String, String>,
    /// Card type → weakness type
    pub type_weakness: HashMap<String, String>,
}

impl ClassificationTables {
    /// Creates tables from caller-supplied data.
    pub fn new(
        trainer_codes: HashMap<String, String>,
        rarity_codes: HashMap<String, String>,
        type_weakness: HashMap<String, String>,
    ) -> Self {
        Self {
            trainer_codes,
            rarity_codes,
            type_weakness,
        }
    }

    /// The reference data set shipped with the catalog.
    pub fn standard() -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>()
        };

        Self {
            trainer_codes: to_map(&[
                ("cPK_10", "pokemon"),
                ("cPK_20", "pokemon"),
                ("cPK_90", "pokemon"),
                ("cTR_10", "trainer"),
                ("cTR_20", "trainer"),
                ("cTR_90", "item"),
            ]),
            rarity_codes: to_map(&[
                ("C", "common"),
                ("U", "uncommon"),
                ("R", "rare"),
                ("RR", "double rare"),
                ("AR", "art rare"),
                ("SR", "super rare"),
                ("SAR", "super art rare"),
                ("IM", "immersive rare"),
                ("UR", "ultra rare"),
                ("S", "shiny"),
                ("SSR", "shiny super rare"),
            ]),
            type_weakness: to_map(&[
                ("grass", "fire"),
                ("fire", "water"),
                ("water", "lightning"),
                ("lightning", "fighting"),
                ("psychic", "darkness"),
                ("fighting", "grass"),
                ("darkness", "fighting"),
                ("metal", "fire"),
                ("colorless", "fighting"),
            ]),
        }
    }
}
