use std::path::PathBuf;

use anyhow::Result;
use crossterm::style::Stylize;

use agrodash::api_client::ApiClient;
use agrodash::classic::{self, ClassicOptions};
use agrodash::config::config::Config;
use agrodash::data::fixtures;
use agrodash::data::provider::{DemoProvider, FileProvider, RecordProvider};
use agrodash::data::records::SessionRole;
use agrodash::logging;
use agrodash::ui::app::App;
use agrodash::ui::dashboard_tui;

fn print_help() {
    println!("{}", "agrodash - equipment rental dashboard".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  agrodash [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {} - Sign in as admin, lender or farmer (default: lender)",
        "--role <role>".green()
    );
    println!("  {}      - Use built-in demo data", "--demo".green());
    println!(
        "  {} - Load rentals/accounts from JSON or CSV files",
        "--data-dir <dir>".green()
    );
    println!("  {} - Talk to a backend API", "--api <url>".green());
    println!("  {} - Bearer token for the API", "--token <token>".green());
    println!("  {}   - One-shot CLI mode, no TUI", "--classic".green());
    println!();
    println!("{}", "Classic mode options:".yellow());
    println!(
        "  {} - Status (rentals) or role (accounts) filter",
        "--filter <value>".green()
    );
    println!("  {} - Search query", "--search <text>".green());
    println!("  {}    - Page to print", "--page <n>".green());
    println!(
        "  {} - Write the filtered set to a file",
        "--export <csv|json>".green()
    );
    println!();
    println!("{}", "Dashboard keys:".yellow());
    println!("  {}       - Select row / change page", "j k h l".green());
    println!("  {}             - Cycle filter", "f".green());
    println!("  {}             - Search", "/".green());
    println!("  {}         - Open the selected record", "Enter".green());
    println!("  {}           - Export CSV / JSON", "e E".green());
    println!("  {}             - Help", "?".green());
    println!();
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(|s| s.to_string())
}

fn select_provider(args: &[String], config: &Config) -> Result<Box<dyn RecordProvider>> {
    if args.contains(&"--demo".to_string()) {
        return Ok(Box::new(DemoProvider::new()));
    }

    let api_url = flag_value(args, "--api")
        .or_else(|| std::env::var("AGRODASH_API_URL").ok())
        .or_else(|| config.behavior.api_url.clone());
    if let Some(url) = api_url {
        let token = flag_value(args, "--token").or_else(|| std::env::var("AGRODASH_API_TOKEN").ok());
        let client = match token {
            Some(token) => ApiClient::new(&url).with_token(token),
            None => ApiClient::new(&url),
        };
        println!("{}", format!("Connected to API: {}", url).cyan());
        return Ok(Box::new(client));
    }

    let data_dir = flag_value(args, "--data-dir")
        .map(PathBuf::from)
        .or_else(|| config.behavior.data_dir.clone());
    if let Some(dir) = data_dir {
        return Ok(Box::new(FileProvider::new(dir)));
    }

    Ok(Box::new(DemoProvider::new()))
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return Ok(());
    }

    let (log_buffer, log_path) = logging::init_tracing();
    if let Some(path) = &log_path {
        eprintln!("Debug logs will be written to:");
        eprintln!("   {}", path.display());
        eprintln!("   Tail with: tail -f {}", path.display());
        eprintln!();
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Config error: {:#}, using defaults", e);
        Config::default()
    });

    let role: SessionRole = match flag_value(&args, "--role") {
        Some(raw) => raw.parse()?,
        None => SessionRole::Lender,
    };
    let session = fixtures::demo_session(role);
    let provider = select_provider(&args, &config)?;

    if args.contains(&"--classic".to_string()) {
        let filter = flag_value(&args, "--filter");
        let options = ClassicOptions {
            search: flag_value(&args, "--search"),
            status: if role == SessionRole::Admin {
                None
            } else {
                filter.clone()
            },
            role: if role == SessionRole::Admin { filter } else { None },
            page: flag_value(&args, "--page")
                .map(|raw| raw.parse())
                .transpose()?,
            export: flag_value(&args, "--export"),
        };
        return classic::run(provider.as_ref(), &session, &options, &config.export_dir());
    }

    let fallback_config = config.clone();
    let mut app = App::new(provider, session.clone(), config, log_buffer)?;
    app.log_file_path = log_path;

    if let Err(e) = dashboard_tui::run(app) {
        eprintln!("Dashboard error: {:#}", e);
        eprintln!("Falling back to classic mode...");
        eprintln!();
        let provider = select_provider(&args, &fallback_config)?;
        return classic::run(
            provider.as_ref(),
            &session,
            &ClassicOptions::default(),
            &fallback_config.export_dir(),
        );
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
