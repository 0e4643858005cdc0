mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CatalogIndex, Year};
use engine::{
    AdaptationReport, FilmRecommendation, GenrePeriodRecommendation, RecommendError,
    RecommendationEngine, Shortlist, SimilarBooks,
};
use prompt::PromptInput;
use std::io::{self, StdinLock, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// reel-reads - Books behind films, and books to read next
#[derive(Parser)]
#[command(name = "reel-reads")]
#[command(about = "Find the books a film adapts, or books similar to it", long_about = None)]
struct Cli {
    /// Directory holding the IMDb TSV dumps and titles.csv
    #[arg(short, long, env = "REEL_READS_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Half-width in years of the publication window for similar books
    #[arg(long, default_value = "10")]
    year_tolerance: u32,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Books a film adapts, or similar books if it adapts none
    Adapt {
        /// Exact film title
        #[arg(long)]
        title: String,

        /// Release year, used when several movies share the title
        #[arg(long)]
        year: Option<String>,

        /// 1-based position among movies sharing title and year
        #[arg(long)]
        choice: Option<usize>,

        /// Years between book publication and film release
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<Year>,
    },

    /// Books by genre and publication period
    Recommend {
        /// Comma-separated genres
        #[arg(long, value_delimiter = ',')]
        genres: Vec<String>,

        /// First publication year (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        start: Year,

        /// Last publication year (inclusive)
        #[arg(long, allow_negative_numbers = true)]
        end: Year,
    },

    /// List movies with exactly this title
    Search {
        #[arg(long)]
        title: String,
    },

    /// Prompt-driven session choosing between the two modes
    Interactive,
}

type Terminal = PromptInput<StdinLock<'static>, Stdout>;

fn terminal() -> Terminal {
    PromptInput::new(io::stdin().lock(), io::stdout())
}

fn main() -> Result<()> {
    // Logs go to stderr so that stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    eprintln!("Loading catalog from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        CatalogIndex::load_from_files(&cli.data_dir).context("Failed to load the catalog")?,
    );
    eprintln!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let engine = RecommendationEngine::new(catalog).with_year_tolerance(cli.year_tolerance);

    match cli.command {
        Commands::Adapt {
            title,
            year,
            choice,
            offset,
        } => handle_adapt(&engine, &title, year, choice, offset, cli.json)?,
        Commands::Recommend { genres, start, end } => {
            handle_recommend(&engine, &genres, start, end, cli.json)?
        }
        Commands::Search { title } => handle_search(&engine, &title, cli.json)?,
        Commands::Interactive => handle_interactive(&engine)?,
    }

    Ok(())
}

/// Handle the 'adapt' command
fn handle_adapt(
    engine: &RecommendationEngine,
    title: &str,
    year: Option<String>,
    choice: Option<usize>,
    offset: Option<Year>,
    json: bool,
) -> Result<()> {
    let mut input = terminal().with_presets(year, choice, offset);
    let recommendation = engine
        .recommend_for_film(title, &mut input)
        .with_context(|| format!("No recommendation for '{}'", title))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print_film_recommendation(&recommendation);
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    genres: &[String],
    start: Year,
    end: Year,
    json: bool,
) -> Result<()> {
    let recommendation = engine.recommend_by_genre_and_period(genres, start, end)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print_genre_period(&recommendation);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, title: &str, json: bool) -> Result<()> {
    let films = engine.catalog().movies_by_title(title);

    if json {
        println!("{}", serde_json::to_string_pretty(&films)?);
        return Ok(());
    }

    println!("{}", format!("Movies titled '{}':", title).bold().blue());
    if films.is_empty() {
        println!("  none");
    }
    for (position, film) in films.iter().enumerate() {
        let genres: Vec<&str> = film.genres.iter().map(String::as_str).collect();
        println!(
            "{}. {} ({}) [{}]",
            (position + 1).to_string().green(),
            film.id,
            film.year.map_or_else(|| "unknown year".to_string(), |y| y.to_string()),
            genres.join(", ")
        );
    }
    Ok(())
}

/// Handle the 'interactive' command
fn handle_interactive(engine: &RecommendationEngine) -> Result<()> {
    let mut input = terminal();
    input.say(
        "There are two modes of the app.\n\
         The first one recommends books in relation to the entered film.\n\
         The second one recommends books in relation to the chosen characteristics.\n",
    )?;

    let mut mode = input.ask("Which mode would you like to choose?\nEnter 1 or 2.\n")?;
    while mode != "1" && mode != "2" {
        mode = input.ask("Enter 1 or 2.\n")?;
    }

    if mode == "1" {
        interactive_film_mode(engine, &mut input)
    } else {
        interactive_genre_mode(engine, &mut input)
    }
}

fn interactive_film_mode(engine: &RecommendationEngine, input: &mut Terminal) -> Result<()> {
    let mut title = input.ask(
        "Enter a film to see the books which served for the film adaptation.\n\
         If the film is not an adaptation of any book, you will receive \
         recommendations of similar to the film books.\n",
    )?;

    loop {
        match engine.recommend_for_film(&title, input) {
            Ok(recommendation) => {
                print_film_recommendation(&recommendation);
                return Ok(());
            }
            Err(RecommendError::FilmNotFound { .. }) => {
                input.say("There is no such film. Try again.")?;
                title = input.ask("Film: ")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn interactive_genre_mode(engine: &RecommendationEngine, input: &mut Terminal) -> Result<()> {
    let genres = input.ask(
        "Enter the genres you would like to read a book in (dividing with a comma):\n",
    )?;
    let genres: Vec<&str> = genres.split(',').collect();

    let start = input.ask_number(
        "What time frames of the book creation would you like to have?\nStart year: ",
    )?;
    let end = input.ask_number("End year: ")?;

    let recommendation = engine.recommend_by_genre_and_period(&genres, start, end)?;
    print_genre_period(&recommendation);
    Ok(())
}

// ============================================================================
// Text rendering
// ============================================================================

fn print_film_recommendation(recommendation: &FilmRecommendation) {
    let film = recommendation.film();
    let year = film.year.map_or_else(|| "unknown year".to_string(), |y| y.to_string());
    println!("{}", format!("{} ({})", film.title, year).bold().blue());

    match recommendation {
        FilmRecommendation::Adaptation(report) => print_adaptation(report),
        FilmRecommendation::Similar(similar) => print_similar(similar),
    }
}

fn print_adaptation(report: &AdaptationReport) {
    println!("Here are the books for which this film is an adaptation:");
    for comparison in &report.comparisons {
        let gap = match comparison.year_gap {
            Some(gap) => format!("{} years", gap),
            None => "unknown gap".to_string(),
        };
        println!(
            "  {} {} ({}% genre match, {})",
            "•".green(),
            comparison.book,
            comparison.similarity.percent(),
            gap
        );
    }

    let best = &report.best;
    println!(
        "The similarity between book and film genres is {}%.",
        best.similarity.percent().to_string().bold()
    );
    if !best.similarity.shared.is_empty() {
        let shared: Vec<&str> = best.similarity.shared.iter().map(String::as_str).collect();
        println!("Similar genres are: {}", shared.join(", "));
    }
    if let Some(gap) = report.max_year_gap {
        println!("The film was released {} years after the book was published.", gap);
    }
}

fn print_similar(similar: &SimilarBooks) {
    println!(
        "Unfortunately, this film is not an adaptation of a book. However, \
         you may like the books which are similar to the film."
    );
    if let Some((start, end)) = similar.window {
        println!("{}", format!("Published {}-{}", start, end).dimmed());
    }
    print_shortlist(&similar.shortlist);
}

fn print_genre_period(recommendation: &GenrePeriodRecommendation) {
    if !recommendation.unknown_genres.is_empty() {
        println!(
            "{} No books are tagged: {}",
            "!".yellow(),
            recommendation.unknown_genres.join(", ")
        );
    }
    if !recommendation.shortlist.is_empty() {
        println!("Here are the books recommended to you:");
    }
    print_shortlist(&recommendation.shortlist);
}

fn print_shortlist(shortlist: &Shortlist) {
    match shortlist {
        Shortlist::Books(titles) => {
            for title in titles {
                println!("  {} {}", "•".green(), title);
            }
        }
        Shortlist::Empty => println!("There are no such books."),
    }
}
