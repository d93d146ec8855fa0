//! Fixture catalog for resolver tests
//!
//! A small slice of the fungal tree:
//!
//! ```text
//! Fungi (1)
//! ├── Agaricaceae (10)
//! │   └── Agaricus (100)
//! │       ├── Agaricus campestris L. (101)
//! │       │   └── Agaricus campestris var. squamulosus (102)
//! │       ├── Agaricus augustus Fr. (103)
//! │       ├── Agaricus bisporus (J.E. Lange) Imbach (105)
//! │       ├── Agaricus bisporus Fr. (106)
//! │       └── Agaricus campestre (107, misspelling of 101)
//! └── Boletaceae (20)
//!     ├── Boletus (200)
//!     │   ├── Boletus edulis Bull. (201, synonym group 5)
//!     │   └── Boletus edulus (202, misspelling of 201)
//!     └── Xerocomus (300)
//!         └── Xerocomus edulis (301, synonym group 5)
//! ```
//!
//! Ancestor paths stop at family; genus membership is only visible through
//! the canonical name.

use taxa_common::types::AncestorPath;
use taxa_common::{Rank, TaxonId, TaxonRecord};

pub const FUNGI: i64 = 1;
pub const AGARICACEAE: i64 = 10;
pub const BOLETACEAE: i64 = 20;
pub const AGARICUS: i64 = 100;
pub const AGARICUS_CAMPESTRIS: i64 = 101;
pub const AGARICUS_CAMPESTRIS_SQUAMULOSUS: i64 = 102;
pub const AGARICUS_AUGUSTUS: i64 = 103;
pub const AGARICUS_BISPORUS_LANGE: i64 = 105;
pub const AGARICUS_BISPORUS_FR: i64 = 106;
pub const AGARICUS_CAMPESTRE: i64 = 107;
pub const BOLETUS: i64 = 200;
pub const BOLETUS_EDULIS: i64 = 201;
pub const BOLETUS_EDULUS: i64 = 202;
pub const XEROCOMUS: i64 = 300;
pub const XEROCOMUS_EDULIS: i64 = 301;

pub const EDULIS_SYNONYM_GROUP: i64 = 5;

fn path(lineage: &[(Rank, &str)]) -> String {
    AncestorPath::build(lineage.iter().copied())
}

fn record(id: i64, name: &str, rank: Rank) -> TaxonRecord {
    TaxonRecord::new(TaxonId(id), name, rank)
}

/// Every fixture record, correct spellings before their misspellings
pub fn fixture_records() -> Vec<TaxonRecord> {
    let fungi = path(&[(Rank::Kingdom, "Fungi")]);
    let agaricaceae = path(&[(Rank::Kingdom, "Fungi"), (Rank::Family, "Agaricaceae")]);
    let boletaceae = path(&[(Rank::Kingdom, "Fungi"), (Rank::Family, "Boletaceae")]);

    vec![
        record(FUNGI, "Fungi", Rank::Kingdom),
        record(AGARICACEAE, "Agaricaceae", Rank::Family).with_ancestor_path(&fungi),
        record(BOLETACEAE, "Boletaceae", Rank::Family).with_ancestor_path(&fungi),
        record(AGARICUS, "Agaricus", Rank::Genus).with_ancestor_path(&agaricaceae),
        record(AGARICUS_CAMPESTRIS, "Agaricus campestris", Rank::Species)
            .with_author("L.")
            .with_ancestor_path(&agaricaceae),
        record(
            AGARICUS_CAMPESTRIS_SQUAMULOSUS,
            "Agaricus campestris var. squamulosus",
            Rank::Variety,
        )
        .with_author("(Rea) Pilát")
        .with_ancestor_path(&agaricaceae),
        record(AGARICUS_AUGUSTUS, "Agaricus augustus", Rank::Species)
            .with_author("Fr.")
            .with_ancestor_path(&agaricaceae),
        record(AGARICUS_BISPORUS_LANGE, "Agaricus bisporus", Rank::Species)
            .with_author("(J.E. Lange) Imbach")
            .with_ancestor_path(&agaricaceae),
        record(AGARICUS_BISPORUS_FR, "Agaricus bisporus", Rank::Species)
            .with_author("Fr.")
            .with_ancestor_path(&agaricaceae),
        record(AGARICUS_CAMPESTRE, "Agaricus campestre", Rank::Species)
            .with_ancestor_path(&agaricaceae)
            .misspelling_of(TaxonId(AGARICUS_CAMPESTRIS)),
        record(BOLETUS, "Boletus", Rank::Genus).with_ancestor_path(&boletaceae),
        record(BOLETUS_EDULIS, "Boletus edulis", Rank::Species)
            .with_author("Bull.")
            .with_ancestor_path(&boletaceae)
            .with_synonym_group(EDULIS_SYNONYM_GROUP),
        record(BOLETUS_EDULUS, "Boletus edulus", Rank::Species)
            .with_ancestor_path(&boletaceae)
            .misspelling_of(TaxonId(BOLETUS_EDULIS)),
        record(XEROCOMUS, "Xerocomus", Rank::Genus).with_ancestor_path(&boletaceae),
        record(XEROCOMUS_EDULIS, "Xerocomus edulis", Rank::Species)
            .with_ancestor_path(&boletaceae)
            .with_synonym_group(EDULIS_SYNONYM_GROUP),
    ]
}
