// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG, default "info")
// 2. Parse command-line arguments using clap and build the Config
// 3. Run the scan pipeline against the real GitHub client
// 4. Print a summary and exit with the proper code (0 = success, 1 = failure)
//
// A missing required token is reported before any network call is made.
//
// Rust concepts:
// - async/await: every GitHub request is awaited; tokio drives the futures
// - Result<T, E> and ?: errors bubble up to main, which turns them into exit 1
// - Modules: each pipeline stage lives in its own file or directory
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - run configuration
mod github;    // src/github/ - GitHub API client
mod manifest;  // src/manifest/ - records, titles, output file
mod pipeline;  // src/pipeline.rs - the scan itself
mod scan;      // src/scan/ - repository and directory inspection

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::{Config, ScanTarget};
use github::GitHubClient;
use pipeline::RunReport;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Log to stderr so stdout only carries the summary
    // RUST_LOG=debug shows every request and skipped directory
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Run our application logic and map the outcome to an exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    // Parse command-line arguments (handles --help and --version for us)
    let cli = Cli::parse();

    // Config errors (bad repo, missing required token) stop us here,
    // before a single request goes out
    let config = Config::from_command(cli.command)?;

    match &config.target {
        ScanTarget::Repository { repo, .. } => println!("🔍 Scanning repository: {}", repo),
        ScanTarget::User { owner, .. } => println!("🔍 Scanning repositories of: {}", owner),
    }

    if config.token.is_none() {
        warn!("No GitHub token set; using unauthenticated rate limits");
    }

    let client = GitHubClient::new(
        &config.api_base,
        config.token.clone(),
        config.retry,
        config.timeout,
    )?;

    // pipeline::run is generic over GitHubApi; here it gets the real client
    let report = pipeline::run(&client, &config).await?;
    print_summary(&report);

    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    println!("✅ Generated {} with {} record(s)", report.output.display(), report.count);
    println!("📊 Summary:");
    println!("   📋 Records: {}", report.count);
    println!("   💾 Size: {}", format_size(report.bytes));
    println!("   🌐 API calls: {}", report.api_calls);
    println!("   🏷️  Platforms: {}", report.platforms.join(", "));
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
