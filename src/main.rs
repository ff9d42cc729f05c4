//! Ball Scout
//!
//! Command-line front end for annotating match video and browsing saved sessions.

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use ball_scout::annotate::Annotator;
use ball_scout::cli::{AnnotateArgs, Cli, Command};
use ball_scout::config::ScoutConfig;
use ball_scout::core::VideoSource;
use ball_scout::error::{Result, ScoutError};
use ball_scout::match_card::{generate_alliance_teams, Alliance, MatchCardData, MatchCardTable};
use ball_scout::providers::ScoutingApi;
use ball_scout::server::ReadServer;
use ball_scout::store::{DocumentStore, JsonStore};
use ball_scout::utils::format_time;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply_to(ScoutConfig::load(cli.config.as_deref())?);
    debug!(?config, "Configuration resolved");
    match cli.command {
        Command::Annotate(args) => annotate(&config, args).await,
        Command::Serve { .. } => serve(&config).await,
        Command::Events => events(&config).await,
        Command::MatchCard {
            event_id,
            match_number,
            demo,
        } => match_card(&config, &event_id, match_number, demo).await,
        Command::Sessions => sessions(&config),
    }
}

async fn annotate(config: &ScoutConfig, args: AnnotateArgs) -> Result<()> {
    let store = JsonStore::open(&config.store_dir)?;
    let mut annotator = Annotator::new(config, args.metadata_form(), store);

    let video = match (&args.url, &args.file) {
        (Some(url), _) => Some(VideoSource::from_url(url)?),
        (None, Some(path)) => Some(VideoSource::local(path)?),
        (None, None) => None,
    };
    if let Some(video) = video {
        println!("Loaded {}", video.display_url());
        annotator.load(video).await;
    }

    let mut out = io::stdout();
    match &args.script {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            annotator.run_script(reader, &mut out).await?;
        }
        None => {
            let stdin = io::stdin();
            annotator.run_script(stdin.lock(), &mut out).await?;
        }
    }
    println!("{}", annotator.stats());
    Ok(())
}

async fn serve(config: &ScoutConfig) -> Result<()> {
    let server = ReadServer::bind(&config.server_addr, &config.store_dir)?;
    println!("Listening on http://{}", config.server_addr);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });
    tokio::task::spawn_blocking(move || server.run(&shutdown))
        .await
        .map_err(|err| ScoutError::Server(err.to_string()))?
}

async fn events(config: &ScoutConfig) -> Result<()> {
    let api = ScoutingApi::from_base_url(config.scouting_api_url.as_deref())?;
    let response = api.events().await?;
    println!("{} season", response.year);
    for event in response.events {
        println!("{}  {}", event.id, event.name);
    }
    Ok(())
}

async fn match_card(config: &ScoutConfig, event_id: &str, match_number: u32, demo: bool) -> Result<()> {
    let (red, blue) = if demo {
        let alliance = |color| {
            generate_alliance_teams(event_id, match_number, color)
                .into_iter()
                .map(|team| MatchCardData::empty(team.number))
                .collect::<Vec<_>>()
        };
        (alliance(Alliance::Red), alliance(Alliance::Blue))
    } else {
        let api = ScoutingApi::from_base_url(config.scouting_api_url.as_deref())?;
        let teams = api.teams_in_match(event_id, &match_number.to_string()).await?;
        let numbers: Vec<u32> = teams.red.iter().chain(teams.blue.iter()).map(|team| team.team).collect();
        if !numbers.is_empty() {
            match api.robot_images(&numbers).await {
                Ok(images) => {
                    for image in images {
                        let url = image.image_url.as_deref().unwrap_or("-");
                        println!("{} {}: {}", image.team_number, image.team_name, url);
                    }
                }
                Err(err) => warn!("Robot images unavailable: {}", err),
            }
        }
        (teams.red, teams.blue)
    };

    println!("Match {} at {}", match_number, event_id);
    print!("{}", MatchCardTable::build(&red, &blue).render());
    Ok(())
}

fn sessions(config: &ScoutConfig) -> Result<()> {
    let store = JsonStore::open(&config.store_dir)?;
    let records = store.list_metadata();
    if records.is_empty() {
        println!("No saved sessions in {}", config.store_dir.display());
        return Ok(());
    }
    for record in records {
        let cycles = store.cycles_for_metadata(record.id);
        let span = cycles
            .iter()
            .map(|cycle| cycle.cycle.end_timestamp)
            .fold(0.0_f64, f64::max);
        println!(
            "{}  {}  {} {} team {}  {} cycles to {}  {:.2} bps  by {}",
            record.created_at,
            record.id,
            record.metadata.event_code,
            record.metadata.match_number,
            record.metadata.team_number,
            cycles.len(),
            format_time(span),
            record.metadata.bps,
            record.metadata.user_name
        );
    }
    Ok(())
}
