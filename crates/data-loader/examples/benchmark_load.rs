use data_loader::CatalogIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading film and book catalogs...\n");

    let start = Instant::now();
    let index = CatalogIndex::load_from_files(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (films, persons, credits, books) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Films: {}", films);
    println!("Persons: {}", persons);
    println!("Credits with a job: {}", credits);
    println!("Books: {}", books);
    println!("Book genres: {}", index.book_genre_vocabulary().len());
    println!("Writers without a person record: {}", index.dangling_writers().len());
}
