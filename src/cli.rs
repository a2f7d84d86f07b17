use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::{
    keywords::{SortBy, Threshold},
    provider::ResearchMode,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FilterArgs {
    /// Minimum relevance score: 0, 40, 60, 75 or 90.
    /// Defaults to relevance.default_threshold from config.
    #[clap(short, long)]
    pub threshold: Option<Threshold>,

    /// Order of the accepted keywords
    #[clap(short = 'o', long, value_enum)]
    pub sort: Option<SortBy>,

    /// Print aggregate metrics alongside the keywords
    #[clap(long, default_value = "false")]
    pub summary: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start kwscope as a service.
    Daemon {
        /// Address to listen on, e.g. 127.0.0.1:5001
        #[clap(short, long)]
        listen: Option<String>,
    },

    /// Explain how a candidate keyword scores against a seed
    Score {
        /// Seed term
        seed: String,

        /// Candidate keyword
        candidate: String,

        /// Threshold used for the verdict
        #[clap(short, long)]
        threshold: Option<Threshold>,
    },

    /// Filter provider records read from a file or stdin
    Filter {
        /// Seed term
        #[clap(short, long)]
        seed: String,

        /// JSON file with an array of records or a full provider response.
        /// Reads stdin when omitted.
        #[clap(short, long)]
        input: Option<PathBuf>,

        #[clap(flatten)]
        filter_args: FilterArgs,
    },

    /// Fetch keywords from DataForSEO and keep the relevant ones
    Research {
        /// Seed keywords. Several keywords are joined into one seed.
        /// Without keywords, shows an overview of "seo tools" and
        /// "keyword research".
        keywords: Vec<String>,

        /// Provider endpoints to query. Repeatable, defaults to ideas.
        #[clap(short, long, value_enum)]
        mode: Vec<ResearchMode>,

        /// Keywords requested per endpoint
        #[clap(short, long)]
        limit: Option<u32>,

        /// Location name, e.g. "United Kingdom"
        #[clap(long)]
        location: Option<String>,

        /// Language name, e.g. "English"
        #[clap(long)]
        language: Option<String>,

        #[clap(flatten)]
        filter_args: FilterArgs,
    },

    /// Check DataForSEO credentials from the environment
    TestConnection {},
}
