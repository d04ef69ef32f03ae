//! fxpanel - Currency Converter Panel
//!
//! A small terminal UI for converting an amount between two currencies.
//!
//! Features:
//! - Pick source and target currencies from the rate table
//! - Type an amount, see the converted value immediately
//! - Swap the two currencies
//! - Light and dark themes
//!
//! Usage: fxpanel [--rates <file>] [--config <file>]

mod app;
mod config;
mod log;
mod panel;
mod rates;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use rates::RateTable;
use std::io::stdout;
use std::path::PathBuf;
use tracing::info;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    rates: Option<PathBuf>,
    log_file: Option<PathBuf>,
    verbose: bool,
    write_config: bool,
    help: bool,
    version: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config = Some(path_value(&arg, iter.next())?),
                "--rates" | "-r" => parsed.rates = Some(path_value(&arg, iter.next())?),
                "--log-file" => parsed.log_file = Some(path_value(&arg, iter.next())?),
                "--verbose" => parsed.verbose = true,
                "--write-config" => parsed.write_config = true,
                "--help" | "-h" => parsed.help = true,
                "--version" | "-v" => parsed.version = true,
                other => bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }
}

fn path_value(flag: &str, value: Option<String>) -> Result<PathBuf> {
    match value {
        Some(v) if !v.starts_with('-') => Ok(PathBuf::from(v)),
        _ => bail!("Missing value for {}", flag),
    }
}

fn main() -> Result<()> {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run 'fxpanel --help' for usage.");
            std::process::exit(2);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("fxpanel {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.write_config {
        return write_default_config(args.config.as_deref());
    }

    // Run the application
    let result = run_app(&args);

    if let Err(e) = result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"fxpanel - Currency Converter Panel

USAGE:
    fxpanel [OPTIONS]

OPTIONS:
    -r, --rates <FILE>     JSON rate table to use instead of the bundled one
    -c, --config <FILE>    Config file (default: ~/.config/fxpanel/config.toml)
        --log-file <FILE>  Log file (default: ~/.cache/fxpanel/fxpanel.log)
        --verbose          Log debug events
        --write-config     Write the default config file and exit
    -h, --help             Print help information
    -v, --version          Print version information

KEYBINDINGS:
    Tab / Shift-Tab  Move focus
    j/k              Change currency / step amount
    Enter            Open currency list / press button
    0-9, Backspace   Edit amount
    s                Swap currencies
    l / d            Light / dark theme
    q                Quit

RATE TABLE FORMAT:
    {{ "date": "2024-06-14", "base": "EUR", "rates": {{ "USD": 1.0708, "CYP": null }} }}
"#
    );
}

fn write_default_config(path: Option<&std::path::Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()?,
    };

    Config::default().save(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Load the rate table named on the command line or in the config,
/// falling back to the bundled snapshot
fn load_rates(args: &Args, config: &Config) -> Result<RateTable> {
    match args.rates.as_ref().or(config.rates_file.as_ref()) {
        Some(path) => RateTable::load(path),
        None => RateTable::bundled().context("Bundled rate table is invalid"),
    }
}

fn run_app(args: &Args) -> Result<()> {
    // Load configuration
    let config = Config::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    let log_path = match args.log_file.as_ref().or(config.log_file.as_ref()) {
        Some(path) => path.clone(),
        None => log::default_log_path()?,
    };
    log::init_logging(&log_path, args.verbose)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting fxpanel");

    let rates = load_rates(args, &config)?;
    info!(date = %rates.date(), base = rates.base(), "Using rate table");

    // Create application state
    let mut app = App::new(rates, &config);

    // Setup terminal
    install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Window closed");

    result
}

/// Restore the terminal before printing a panic message
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Block until the next input event; each one is handled fully
        // before the next is read
        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_parse_paths_and_flags() {
        let args = parse(&["--rates", "rates.json", "-c", "cfg.toml", "--verbose"]).unwrap();
        assert_eq!(args.rates, Some(PathBuf::from("rates.json")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert!(args.verbose);
        assert!(!args.write_config);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--rates"]).is_err());
        assert!(parse(&["--rates", "--verbose"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_rates_flag_overrides_config() {
        let args = Args::default();
        let config = Config::default();
        let rates = load_rates(&args, &config).unwrap();
        assert_eq!(rates, RateTable::bundled().unwrap());

        let args = Args {
            rates: Some(PathBuf::from("/nonexistent/fxpanel-rates.json")),
            ..Args::default()
        };
        assert!(load_rates(&args, &config).is_err());
    }
}
