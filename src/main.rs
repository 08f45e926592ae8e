use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagfeed::{Coordinate, FilterCriteria, SortKey, Tag};

/// Assemble the phototag feed around a location
#[derive(Parser)]
struct Cli {
    /// Latitude of the reference location
    #[arg(allow_negative_numbers = true)]
    lat: f64,
    /// Longitude of the reference location
    #[arg(allow_negative_numbers = true)]
    lon: f64,
    /// Phototag store: a JSON array file or a directory of JSON documents
    #[arg(short, long, default_value = "phototags.json")]
    store: PathBuf,
    /// Search radius in kilometers
    #[arg(short, long, default_value_t = 2.0)]
    radius: f64,
    /// Keep at most this many phototags
    #[arg(short, long, default_value_t = 25)]
    num_results: usize,
    /// Sort key: date, popular, votes or favorites
    #[arg(long, default_value = "date")]
    sort_by: SortKey,
    /// Keep only phototags carrying all of these tags
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<Tag>,
    #[arg(short, long, action)]
    favorites: bool,
    #[arg(short, long, action)]
    list: bool,
    #[arg(short, long, action)]
    verbose: bool,
}

fn main() {
    let args = Cli::parse();

    let filter = if args.verbose {
        "tagfeed=debug"
    } else {
        "tagfeed=warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let reference = Coordinate::new(args.lat, args.lon);
    let criteria = FilterCriteria {
        radius_km: args.radius,
        num_results: args.num_results,
        selected_tags: args.tags,
        favorites_only: args.favorites,
        sort_key: args.sort_by,
    };

    if let Err(err) = tagfeed::run(reference, criteria, &args.store, args.list) {
        eprintln!("{err:?}");
        process::exit(1);
    }
}
