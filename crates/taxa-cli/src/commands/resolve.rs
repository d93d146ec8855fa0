//! `taxa resolve` command implementation
//!
//! Loads a catalog, resolves the given references, and prints the ids.

use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use taxa_common::TaxonId;
use taxa_resolver::db::{create_pool, DbConfig};
use taxa_resolver::{
    MemoryCatalog, NameCatalog, PgCatalog, Reference, ResolveOptions, ResolverConfig,
    TaxonResolver,
};
use tracing::{debug, info};

use crate::error::{CliError, Result};
use crate::{OutputFormat, ResolveArgs};

/// Resolve `args.references` and print the result to stdout
pub async fn run(args: ResolveArgs) -> Result<()> {
    let config = ResolverConfig::load().map_err(|e| CliError::config(format!("{:#}", e)))?;

    let references: Vec<Reference> =
        args.references.iter().map(|r| Reference::classify(r)).collect();
    let options = options_from(&args, &config);

    let catalog = open_catalog(&args, &config).await?;
    let resolver = TaxonResolver::with_standard_parser(catalog);

    let ids = resolver.resolve(&references, &options).await?;
    info!(references = references.len(), resolved = ids.len(), "Resolved references");

    println!("{}", render(&ids, &references, &options, args.format)?);
    Ok(())
}

/// Command-line flags over the configured defaults
pub fn options_from(args: &ResolveArgs, config: &ResolverConfig) -> ResolveOptions {
    config
        .default_options()
        .synonyms(args.synonyms)
        .subtaxa(args.subtaxa)
        .immediate_subtaxa(args.immediate_subtaxa)
        .exclude_original(args.exclude_original)
        .max_batch_size(args.max_batch_size.unwrap_or(config.max_batch_size))
}

/// A JSON file wins over a database; a database URL on the command line
/// wins over the environment.
async fn open_catalog(args: &ResolveArgs, config: &ResolverConfig) -> Result<Arc<dyn NameCatalog>> {
    if let Some(path) = &args.catalog {
        let catalog = MemoryCatalog::from_json_file(path).map_err(|source| CliError::CatalogLoad {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), records = catalog.len(), "Loaded catalog file");
        return Ok(Arc::new(catalog));
    }

    let db_config = match (&args.database_url, &config.database) {
        (Some(url), Some(database)) if *url == database.url => database.clone(),
        (Some(url), _) => DbConfig::new(url.clone()),
        (None, Some(database)) => database.clone(),
        (None, None) => return Err(CliError::NoCatalog),
    };
    db_config.validate()?;

    let pool = create_pool(&db_config).await?;
    Ok(Arc::new(PgCatalog::new(pool)))
}

/// Format the resolved ids
pub fn render(
    ids: &BTreeSet<TaxonId>,
    references: &[Reference],
    options: &ResolveOptions,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Ids => Ok(ids
            .iter()
            .map(TaxonId::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "references": references,
            "options": options,
            "count": ids.len(),
            "ids": ids,
        }))?),
    }
}
