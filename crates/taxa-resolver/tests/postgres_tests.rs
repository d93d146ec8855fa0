//! PostgreSQL catalog tests
//!
//! These run against a real database through `#[sqlx::test]`, which creates
//! a scratch database and applies the crate migrations. They are ignored by
//! default; run them with `DATABASE_URL` set:
//!
//! ```text
//! DATABASE_URL=postgresql://localhost/taxa cargo test -p taxa-resolver -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;
use taxa_common::{TaxonId, TaxonRecord};
use taxa_resolver::catalog::CatalogResult;
use taxa_resolver::{
    NameCatalog, NameField, PgCatalog, PrefixShape, Reference, ResolveOptions, TaxonResolver,
};

mod helpers;
use helpers::*;

async fn seed(pool: &PgPool) -> sqlx::Result<()> {
    for record in fixture_records() {
        insert_record(pool, &record).await?;
    }
    Ok(())
}

async fn insert_record(pool: &PgPool, record: &TaxonRecord) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO names (id, text_name, search_name, author, rank, classification,
                           synonym_id, correct_spelling_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(record.id.0)
    .bind(&record.canonical_name)
    .bind(&record.search_form)
    .bind(&record.author)
    .bind(i16::from(record.rank))
    .bind(&record.ancestor_path)
    .bind(record.synonym_group_id)
    .bind(record.correct_spelling_id.map(|id| id.0))
    .execute(pool)
    .await?;
    Ok(())
}

fn sorted_ids(records: &[TaxonRecord]) -> Vec<i64> {
    let mut ids: Vec<i64> = records.iter().map(|record| record.id.0).collect();
    ids.sort_unstable();
    ids
}

#[sqlx::test]
#[ignore]
async fn test_pg_exact_and_id_lookups(pool: PgPool) -> CatalogResult<()> {
    seed(&pool).await?;
    let catalog = PgCatalog::new(pool);

    let by_id = catalog
        .find_by_ids(&[TaxonId(AGARICUS), TaxonId(BOLETUS), TaxonId(424242)])
        .await?;
    assert_eq!(sorted_ids(&by_id), vec![AGARICUS, BOLETUS]);

    let by_name = catalog
        .find_by_exact_field(NameField::CanonicalName, "Agaricus bisporus")
        .await?;
    assert_eq!(sorted_ids(&by_name), vec![AGARICUS_BISPORUS_LANGE, AGARICUS_BISPORUS_FR]);

    let by_search = catalog
        .find_by_exact_field(NameField::SearchForm, "Agaricus bisporus Fr.")
        .await?;
    assert_eq!(sorted_ids(&by_search), vec![AGARICUS_BISPORUS_FR]);

    let keys = catalog.pluck(&[TaxonId(AGARICUS_CAMPESTRE)]).await?;
    assert_eq!(keys[0].spelling_class_id(), TaxonId(AGARICUS_CAMPESTRIS));
    Ok(())
}

#[sqlx::test]
#[ignore]
async fn test_pg_patterns_match_memory_catalog(pool: PgPool) -> CatalogResult<()> {
    seed(&pool).await?;
    let pg = PgCatalog::new(pool);
    let memory = fixture_catalog();
    let names = vec!["Agaricus".to_string(), "Boletaceae".to_string()];

    for shape in [PrefixShape::AnyDescendant, PrefixShape::ImmediateChild] {
        assert_eq!(
            sorted_ids(&pg.find_by_prefix(&names, shape).await?),
            sorted_ids(&memory.find_by_prefix(&names, shape).await?)
        );
    }
    for anchored in [false, true] {
        assert_eq!(
            sorted_ids(&pg.find_by_ancestor_path_pattern(&names, anchored).await?),
            sorted_ids(&memory.find_by_ancestor_path_pattern(&names, anchored).await?)
        );
    }

    assert_eq!(
        sorted_ids(&pg.find_by_synonym_groups(&[EDULIS_SYNONYM_GROUP]).await?),
        vec![BOLETUS_EDULIS, XEROCOMUS_EDULIS]
    );
    assert_eq!(
        sorted_ids(&pg.find_by_spelling_classes(&[TaxonId(BOLETUS_EDULIS)]).await?),
        vec![BOLETUS_EDULIS, BOLETUS_EDULUS]
    );
    Ok(())
}

#[sqlx::test]
#[ignore]
async fn test_pg_resolve_genus_with_synonyms(pool: PgPool) -> sqlx::Result<()> {
    seed(&pool).await?;
    let resolver = TaxonResolver::with_standard_parser(Arc::new(PgCatalog::new(pool)));

    let found = resolver
        .resolve(
            &[Reference::ByFreeText("Boletus".to_string())],
            &ResolveOptions::new().subtaxa(true).synonyms(true),
        )
        .await
        .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

    assert_eq!(found, ids(&[BOLETUS, BOLETUS_EDULIS, BOLETUS_EDULUS, XEROCOMUS_EDULIS]));
    Ok(())
}
