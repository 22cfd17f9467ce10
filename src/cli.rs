use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "listing-scout", version, about = "Search property listings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search listings, e.g. `search "city=valencia&maxPrice=400000"`
    Search {
        /// Where to read listings from
        #[arg(long, value_enum, default_value_t = SourceKind::Sqlite)]
        source: SourceKind,
        /// Filter as a URL query string
        #[arg(default_value = "")]
        query: String,
    },
    /// Print a shareable link for a filter
    Link {
        /// Page the link points at
        #[arg(long, default_value = "http://localhost:3000/listings")]
        base: String,
        #[arg(default_value = "")]
        query: String,
    },
    /// Write sample listings into the local store and the database
    Seed,
    /// Answer a list request the way the HTTP endpoint would
    Api {
        #[arg(default_value = "")]
        query: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Local,
    Sqlite,
    Http,
}
