use clap::{Parser, Subcommand};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::{Path, PathBuf};

use chat_insights_gateway::analysis::{
    format::{display_name, format_first_text_champion, format_most_ignored, format_peak_hour},
    AnalysisResults,
};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the chat insights gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend health and which backend answered
    Health,
    /// Upload a chat export for analysis
    Upload {
        /// Chat export file (.txt or .zip)
        file: PathBuf,
        /// Backend base URL to try first
        #[arg(long)]
        preferred_url: Option<String>,
        /// Print the raw JSON payload instead of a summary
        #[arg(long)]
        raw: bool,
        /// Save the raw JSON payload to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            let status = res.status();
            let json: Value = res.json().await?;
            if !status.is_success() {
                eprintln!("Gateway reported status {}", status);
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Upload {
            file,
            preferred_url,
            raw,
            output,
        } => {
            let data = tokio::fs::read(&file).await?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "chat.txt".to_string());
            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_str(content_type_for(&file))?;

            let mut request = client
                .post(format!("{}/upload", cli.url))
                .multipart(Form::new().part("file", part));
            if let Some(preferred) = preferred_url {
                request = request.query(&[("preferredUrl", preferred)]);
            }

            let res = request.send().await?;
            let status = res.status();
            let json: Value = res.json().await?;

            if !status.is_success() {
                eprintln!("Error: gateway returned status {}", status);
                eprintln!("{}", serde_json::to_string_pretty(&json)?);
                std::process::exit(1);
            }

            if let Some(path) = output {
                tokio::fs::write(&path, serde_json::to_vec_pretty(&json)?).await?;
                eprintln!("Saved results to {}", path.display());
            }

            if raw {
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                print_summary(&AnalysisResults::from_value(json)?);
            }
        }
    }

    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt") => "text/plain",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

fn print_summary(results: &AnalysisResults) {
    let stats = &results.stats;

    println!("Chat:              {}", results.chat_name.as_deref().unwrap_or("Unnamed chat"));
    println!("Total messages:    {}", stats.total_messages);
    if let Some(days) = stats.days_active {
        println!("Days active:       {}", days);
    }
    println!("Peak hour:         {}", format_peak_hour(stats.peak_hour));
    println!("Avg response time: {:.1} min", stats.average_response_time_minutes);
    println!("First texter:      {}", format_first_text_champion(&stats.first_text_champion));
    println!("Most ignored:      {}", format_most_ignored(&stats.most_ignored_users_pct));

    let mut top_users: Vec<_> = stats.user_message_count.iter().collect();
    top_users.sort_by(|a, b| b.1.cmp(a.1));
    if !top_users.is_empty() {
        println!("\nMost active:");
        for (user, count) in top_users.into_iter().take(5) {
            println!("  {:<20} {}", display_name(user), count);
        }
    }

    if let Some(ai) = &results.ai_analysis {
        println!("\nSummary:\n  {}", ai.summary);
        for person in &ai.people {
            println!("  {} - {}: {}", display_name(&person.name), person.animal, person.description);
        }
    }

    if let Some(error) = &results.error {
        eprintln!("\nBackend reported: {}", error);
    }
}
