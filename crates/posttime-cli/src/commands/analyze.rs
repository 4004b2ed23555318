//! Posting-time analysis command.

use std::time::Duration;

use chrono::NaiveDateTime;
use clap::Args;

use posttime_core::{AnalysisResult, Config, FixedClock};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Analyze this local time instead of now (YYYY-MM-DD HH:MM)
    #[arg(long)]
    at: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Skip the processing delay
    #[arg(long)]
    no_delay: bool,
    /// Rank weekend times against weekend peak hours
    #[arg(long)]
    weekend_aware: bool,
}

fn parse_at(value: &str) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .map_err(|e| format!("Invalid time '{value}': {e}. Use YYYY-MM-DD HH:MM").into())
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if args.weekend_aware {
        config.engine.weekend_aware = true;
    }

    let mut shell = config.build_shell()?;
    if args.no_delay {
        shell = shell.with_delay(Duration::ZERO);
    }
    if let Some(at) = args.at.as_deref() {
        shell = shell.with_clock(FixedClock(parse_at(at)?));
    }

    if !args.json && !shell.delay().is_zero() {
        eprintln!("Analyzing...");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(shell.request_analysis());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_card(&result));
    }

    Ok(())
}

fn render_card(result: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str("\nPost Time Analyzer\n");
    output.push_str(&"=".repeat(50));
    output.push('\n');

    output.push_str(&format!(
        "\n{}\n  {}\n\n",
        if result.is_good_time {
            "Good time to post!"
        } else {
            "Not recommended"
        },
        result.reason
    ));
    output.push_str(&format!("  Confidence:          {}%\n", result.confidence));
    output.push_str(&format!("  Next Best Time:      {}\n", result.next_best_time));
    output.push_str(&format!("  Current Engagement:  {}\n", result.current_engagement));

    // Good times never show warnings, even late in the hour.
    if !result.is_good_time {
        if !result.risks.is_empty() {
            output.push_str("\nPotential Risks\n");
            for risk in &result.risks {
                output.push_str(&format!("  • {risk}\n"));
            }
        }
        if !result.recommendations.is_empty() {
            output.push_str("\nRecommendations\n");
            for recommendation in &result.recommendations {
                output.push_str(&format!("  • {recommendation}\n"));
            }
        }
    }

    output.push('\n');
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output
}
