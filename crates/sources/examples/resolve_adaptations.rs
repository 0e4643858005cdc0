//! Example: Resolve the books a film adapts
//!
//! Run with: cargo run --package sources --example resolve_adaptations -- tt0004873
//!
//! Expects the catalog files under `data/`.

use data_loader::CatalogIndex;
use sources::AdaptationSource;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,sources=debug")
        .init();

    let film_id = std::env::args().nth(1).unwrap_or_else(|| "tt0004873".to_string());

    let start = Instant::now();
    let catalog = Arc::new(CatalogIndex::load_from_files(Path::new("data"))?);
    println!("Loaded catalog in {:?}\n", start.elapsed());

    let film = catalog
        .get_film(&film_id)
        .ok_or_else(|| anyhow::anyhow!("Film {} not found", film_id))?;
    println!("Film: {} ({})", film.title, film_id);

    let source = AdaptationSource::new(catalog.clone());
    let books = source.resolve_adaptations(&film_id)?;

    if books.is_empty() {
        println!("Not an adaptation");
    }
    for book in &books {
        println!("  - {}", book);
    }
    Ok(())
}
