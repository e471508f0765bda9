use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use convopulse::client::ConversationClient;
use convopulse::config::AppConfig;
use convopulse::logging;
use convopulse::models::RawRecord;
use convopulse::AnalysisReport;
use convopulse::ConversationAnalyzer;

#[derive(Parser)]
#[command(name = "convopulse")]
#[command(about = "Conversation analytics: sentiment, activity patterns, engagement, and health")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON file containing an array of raw messages
    Analyze {
        /// Path to the JSON file
        input: PathBuf,
        /// Emit the report as pretty JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch a channel's history and analyze it
    History {
        /// Channel id
        channel: String,
        /// Only include messages after this Unix timestamp
        #[arg(long)]
        oldest: Option<f64>,
        /// Only include messages before this Unix timestamp
        #[arg(long)]
        latest: Option<f64>,
        /// Emit the report as pretty JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch a thread's replies and analyze them
    Replies {
        /// Channel id
        channel: String,
        /// Timestamp of the thread root message
        thread_ts: String,
        /// Emit the report as pretty JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logging::init_logging_with_level(level)?;

    let analyzer = ConversationAnalyzer::new();

    match cli.command {
        Commands::Analyze { input, json } => {
            let content = std::fs::read_to_string(&input)?;
            let records: Vec<RawRecord> = serde_json::from_str(&content)?;
            let report = analyzer.analyze(&records)?;
            print_report(&report, json)?;
        }
        Commands::History {
            channel,
            oldest,
            latest,
            json,
        } => {
            let client = ConversationClient::new(&config.api, &config.fetch)?;
            let records = client.fetch_history(&channel, oldest, latest).await?;
            let report = analyzer.analyze(&records)?;
            print_report(&report, json)?;
        }
        Commands::Replies {
            channel,
            thread_ts,
            json,
        } => {
            let client = ConversationClient::new(&config.api, &config.fetch)?;
            let records = client.fetch_replies(&channel, &thread_ts).await?;
            let report = analyzer.analyze(&records)?;
            print_report(&report, json)?;
        }
    }

    Ok(())
}

fn print_report(report: &AnalysisReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.format_text());
    }
    Ok(())
}
