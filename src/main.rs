use chaosgrab::error::UserFriendlyError;
use chaosgrab::ui::{OutputFormatter, OutputMode};
use chaosgrab::{ChaosGrab, ChaosGrabError, Cli};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match ChaosGrab::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 2;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app);
    }

    match app.run().await {
        Ok(report) => {
            app.output_formatter().print_run_report(&report);

            // Entry failures are reported, not signalled through the exit
            // code. Only the fatal paths below produce a non-zero status.
            0
        }
        Err(e) => {
            app.handle_error(&e);

            match e {
                ChaosGrabError::Cancelled => 130, // Interrupted (SIGINT)
                ChaosGrabError::Config { .. } => 2,
                ChaosGrabError::InvalidUrl { .. } => 2,
                ChaosGrabError::Workspace { .. } => 3,
                ChaosGrabError::Http { .. } => 4,
                ChaosGrabError::IndexDecode { .. } => 4,
                ChaosGrabError::AggregateOutput { .. } => 5,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "chaosgrab.toml".to_string());

    match ChaosGrab::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  chaosgrab --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(app: &ChaosGrab) -> i32 {
    let formatter = app.output_formatter();
    let config = app.config();

    formatter.info("DRY RUN MODE - Nothing will be downloaded");
    formatter.print_separator();

    formatter.info("Run plan:");
    println!("  Index URL:        {}", config.index.url);
    println!("  Request timeout:  {} seconds", config.index.timeout);
    println!("  Workspace:        {}", config.workspace.root.display());
    println!(
        "  Output file:      {}",
        config.aggregate_output_path().display()
    );
    println!("  Text suffix:      {}", config.aggregate.text_suffix);

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to download and consolidate");

    0
}

fn print_startup_error(error: &ChaosGrabError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosgrab::cli::OutputFormat;
    use chaosgrab::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli {
            index_url: None,
            workspace: None,
            output_dir: None,
            config: Some(config_path.clone()),
            output_format: OutputFormat::Human,
            timeout: None,
            verbose: 0,
            quiet: false,
            dry_run: false,
            generate_config: true,
        };

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[index]"));
        assert!(content.contains("[aggregate]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let config = Config::default();
        let app = ChaosGrab::detached(config, OutputMode::Plain, 0, true);

        let exit_code = handle_dry_run(&app);
        assert_eq!(exit_code, 0);
    }
}
