//! Trends SDK example
//!
//! Prints the current trending topics (hashtags excluded) and today's hourly
//! report.
//!
//! ```bash
//! RUST_LOG=twitter_trends=debug TWITTER_BEARER_TOKEN=... cargo run --example trends
//! ```

use tracing_subscriber::EnvFilter;
use twitter_trends::{parse_trend_buckets, parse_trends, Error, Options, TwitterClient, TwitterError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Twitter Trends Example ===\n");

    let client = TwitterClient::from_env()?;

    println!("1. Current trends (no hashtags)...");
    let current = client
        .trends()
        .current(Some(Options::exclude_hashtags()))
        .await?;
    for (i, trend) in parse_trends(&current)?.iter().enumerate() {
        let promoted = if trend.is_promoted() { " (promoted)" } else { "" };
        println!("   {:>2}. {}{}", i + 1, trend.name, promoted);
    }

    println!("\n2. Today's hourly trends...");
    match client.trends().daily(None, None).await {
        Ok(daily) => {
            for (hour, trends) in parse_trend_buckets(&daily)? {
                let names: Vec<&str> = trends.iter().take(3).map(|t| t.name.as_str()).collect();
                println!("   {hour}: {}", names.join(", "));
            }
        }
        Err(Error::Twitter(TwitterError::NotFound { message })) => {
            println!("   No report available: {message}");
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n=== Done ===");
    Ok(())
}
