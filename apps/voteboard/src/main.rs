use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    AppState, BannerKind, ClientEvent, HttpScoreService, SubmissionStatus, VoteDraft,
    VoteboardClient,
};

mod config;

use config::{load_settings, prepare_server_url};

#[derive(Parser, Debug)]
#[command(name = "voteboard", about = "Vote for participants and follow the standings")]
struct Args {
    /// Scoring service base URL; overrides voteboard.toml and env settings.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current standings and print them in service order.
    Standings,
    /// Submit one scored vote, then print the refreshed standings.
    Vote {
        #[arg(long)]
        voter_id: String,
        #[arg(long)]
        participant_id: String,
        /// Score between 1 and 100.
        #[arg(long)]
        score: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let server_url = prepare_server_url(&settings.server_url)?;
    tracing::debug!(server_url = %server_url, "resolved scoring service url");

    let client = VoteboardClient::new(Arc::new(HttpScoreService::new(server_url)));

    match args.command {
        Command::Standings => {
            client.refresh().await;
        }
        Command::Vote {
            voter_id,
            participant_id,
            score,
        } => {
            let mut events = client.subscribe_events();
            let progress = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    if let ClientEvent::SubmissionChanged(SubmissionStatus::Submitting) = event {
                        println!("Submitting...");
                    }
                }
            });

            client
                .edit_draft(VoteDraft {
                    voter_id,
                    participant_id,
                    score,
                })
                .await;
            client.submit().await;
            progress.abort();
        }
    }

    let state = client.snapshot().await;
    if let Some(banner) = &state.banner {
        match banner.kind {
            BannerKind::Success => println!("{}", banner.text),
            BannerKind::Error => eprintln!("{}", banner.text),
        }
    }
    render_standings(&state);

    let failed = state.banner.as_ref().is_some_and(|b| b.kind == BannerKind::Error);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn render_standings(state: &AppState) {
    if state.standings.is_empty() {
        println!("No rankings available yet");
        return;
    }

    println!("{:>6}  {:<24} {:>8}", "Rank", "Participant", "Score");
    for entry in &state.standings {
        println!(
            "{:>6}  {:<24} {:>8.1}",
            rank_label(entry.rank),
            entry.participant,
            entry.score
        );
    }
    if let Some(fetched_at) = state.fetched_at {
        println!("as of {fetched_at}");
    }
}

fn rank_label(rank: u32) -> String {
    match rank {
        1 => "🏆 1".to_string(),
        2 => "🥈 2".to_string(),
        3 => "🥉 3".to_string(),
        other => other.to_string(),
    }
}
