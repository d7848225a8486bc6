//! xaml-fmt CLI - XAML formatter and validator

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use xaml_fmt::output::{FileReport, JsonFormatter, ReportFormatter, TextFormatter};
use xaml_fmt::{Config, XamlFormatter};

#[derive(Parser)]
#[command(name = "xaml-fmt")]
#[command(about = "XAML formatter and validator for WinUI 3 markup")]
#[command(version)]
struct Cli {
    /// XAML files to format (supports globs, - for stdin)
    #[arg(required = true)]
    files: Vec<String>,

    /// Check if files are formatted (exit 1 if not)
    #[arg(short, long)]
    check: bool,

    /// Write formatted output back to files
    #[arg(short, long, conflicts_with = "check")]
    write: bool,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Findings output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Only format; report syntax errors but skip the rules
    #[arg(long)]
    no_validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file passed
fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let mut formatter = XamlFormatter::with_config(&config);
    if cli.no_validate {
        formatter = formatter.without_validation();
    }
    log::debug!("rules: {}", formatter.engine().rule_ids().join(", "));

    let files = expand_files(&cli.files)?;
    log::info!("processing {} file(s)", files.len());

    let reports = files
        .par_iter()
        .map(|file| process(&formatter, file))
        .collect::<Result<Vec<_>>>()?;

    for report in &reports {
        if cli.write && report.changed && report.path != "-" {
            fs::write(&report.path, &report.output.formatted)
                .with_context(|| format!("failed to write {}", report.path))?;
            log::info!("{}: formatted", report.path);
        }
    }

    let mut stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Json => {
            let json = if cli.check || cli.write {
                JsonFormatter::new()
            } else {
                JsonFormatter::new().with_formatted()
            };
            writeln!(stdout, "{}", json.format(&reports))?;
        }
        OutputFormat::Text => {
            if !cli.check && !cli.write {
                for report in &reports {
                    stdout.write_all(report.output.formatted.as_bytes())?;
                }
            }
            let text = if cli.no_color {
                TextFormatter::new().without_color()
            } else {
                TextFormatter::new()
            };
            eprint!("{}", text.format(&reports));
        }
    }

    let mut passed = reports.iter().all(|r| r.output.is_clean());
    if cli.check {
        for report in reports.iter().filter(|r| r.changed) {
            eprintln!("{}: needs formatting", report.path);
            passed = false;
        }
    }

    Ok(passed)
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path).context("failed to load config");
    }

    let start = cli
        .files
        .iter()
        .find(|f| f.as_str() != "-")
        .and_then(|f| Path::new(f).parent().map(Path::to_path_buf))
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(std::env::current_dir, Ok)?;

    Ok(Config::find_and_load(&start).unwrap_or_default())
}

fn expand_files(patterns: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern == "-" {
            files.push("-".to_string());
        } else if pattern.contains('*') || pattern.contains('?') {
            for entry in glob(pattern)? {
                files.push(entry?.to_string_lossy().to_string());
            }
        } else {
            files.push(pattern.clone());
        }
    }

    if files.is_empty() {
        bail!("no files matched");
    }

    Ok(files)
}

fn process(formatter: &XamlFormatter, file: &str) -> Result<FileReport> {
    let source = if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        source
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file))?
    };

    let output = formatter.format_and_validate(&source);
    Ok(FileReport::new(file, &source, output))
}
