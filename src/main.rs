use std::io::Read;

use anyhow::bail;
use clap::Parser;
use serde_json::json;

use kwscope::cli::{self, Command, FilterArgs};
use kwscope::config::Config;
use kwscope::keywords::{self, Candidate};
use kwscope::provider::{self, Credentials, DataForSeoClient, KeywordRequest};
use kwscope::relevance;
use kwscope::research::{ResearchOutcome, ResearchQuery, Researcher};
use kwscope::web;

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_keywords(outcome: ResearchOutcome, with_summary: bool) -> anyhow::Result<()> {
    if with_summary {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome.keywords)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();
    let config = Config::load()?;

    match args.command {
        Command::Daemon { listen } => {
            let mut config = config;
            if let Some(listen) = listen {
                config.web.listen = listen;
                config.validate()?;
            }

            let credentials = match Credentials::from_env() {
                Ok(credentials) => Some(credentials),
                Err(err) => {
                    log::warn!("{err}; keyword research endpoints will fail");
                    None
                }
            };

            web::start_daemon(web::SharedState::from_config(config, credentials))?;
        }

        Command::Score {
            seed,
            candidate,
            threshold,
        } => {
            let threshold = threshold.unwrap_or(config.relevance.default_threshold);

            let report = json!({
                "seed": seed,
                "candidate": candidate,
                "threshold": threshold,
                "breakdown": relevance::explain(&candidate, &seed),
                "verdict": relevance::evaluate(&candidate, &seed, threshold.value()),
                "contexts": {
                    "seed": relevance::resolve_contexts(&seed),
                    "candidate": relevance::resolve_contexts(&candidate),
                },
                "categories": {
                    "seed": relevance::categorize(&seed),
                    "candidate": relevance::categorize(&candidate),
                },
                "focus": {
                    "seed": relevance::focus_tags(&seed),
                    "candidate": relevance::focus_tags(&candidate),
                },
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Filter {
            seed,
            input,
            filter_args,
        } => {
            let FilterArgs {
                threshold,
                sort,
                summary,
            } = filter_args;

            let json = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let records = provider::parse_records(&json)?;
            let accepted: Vec<Candidate> = keywords::filter_and_score(
                &records,
                &seed,
                threshold.unwrap_or(config.relevance.default_threshold),
            );
            log::info!("accepted {}/{} keywords", accepted.len(), records.len());

            let outcome =
                ResearchOutcome::new(accepted, sort.unwrap_or(config.relevance.default_sort));
            print_keywords(outcome, summary)?;
        }

        Command::Research {
            keywords,
            mode,
            limit,
            location,
            language,
            filter_args,
        } => {
            let credentials = Credentials::from_env()?;
            let client = DataForSeoClient::new(&config.provider.base_url, credentials);
            let researcher = Researcher::new(std::sync::Arc::new(client));

            let threshold = filter_args
                .threshold
                .unwrap_or(config.relevance.default_threshold);
            let sort = filter_args.sort.unwrap_or(config.relevance.default_sort);
            let location = location.unwrap_or_else(|| config.provider.location.clone());
            let language = language.unwrap_or_else(|| config.provider.language.clone());

            if keywords.iter().all(|k| k.trim().is_empty()) {
                let outcome = researcher.research_default(&location, &language, threshold, sort);
                return print_keywords(outcome, filter_args.summary);
            }

            let query = ResearchQuery {
                request: KeywordRequest {
                    keywords,
                    location,
                    language,
                    limit: limit.unwrap_or(config.provider.default_limit),
                },
                modes: mode,
                threshold,
                sort,
            };

            let outcome = researcher.research(&query);
            if outcome.keywords.is_empty() {
                log::warn!("no relevant keywords found for {:?}", query.request.seed());
            }
            print_keywords(outcome, filter_args.summary)?;
        }

        Command::TestConnection {} => {
            let credentials = Credentials::from_env()?;
            let client = DataForSeoClient::new(&config.provider.base_url, credentials);

            if let Err(err) = client.test_connection() {
                bail!("connection failed: {err}");
            }
            println!("Connection successful");
        }
    }

    Ok(())
}
