//! Summary generator - transfer review workbook returns into the summary
//!
//! Reads the layout from a settings file, then copies each configured
//! security's returns and each group's best/worst comparison from the
//! portfolio review workbook into the portfolio summary workbook.
//! Workbook names not given on the command line are prompted for.

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_summary::pipeline::{resolve_workbook_path, run};
use portfolio_summary::Settings;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sumgen")]
#[command(about = "Copy security returns from a portfolio review workbook into a summary workbook")]
struct Cli {
    /// Settings file describing the summary layout
    #[arg(short, long, default_value = "settings.json")]
    settings: PathBuf,

    /// Review workbook name, appended to report_path (.xlsx may be omitted)
    #[arg(short, long)]
    review: Option<String>,

    /// Summary workbook name, appended to report_path (.xlsx may be omitted)
    #[arg(short = 'o', long)]
    summary: Option<String>,

    /// Don't wait for Enter before exiting
    #[arg(long)]
    no_pause: bool,
}

/// Prompt until the entered name resolves to an existing workbook.
fn prompt_workbook(input: &mut impl BufRead, prompt: &str, report_path: &str) -> Result<PathBuf> {
    loop {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read filename")? == 0 {
            anyhow::bail!("No filename entered");
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let path = resolve_workbook_path(report_path, name);
        if path.is_file() {
            return Ok(path);
        }
        eprintln!("File not found: {}", path.display());
    }
}

/// Use the name given on the command line, or prompt for one.
fn workbook_path(
    arg: Option<&str>,
    input: &mut impl BufRead,
    prompt: &str,
    report_path: &str,
) -> Result<PathBuf> {
    match arg {
        Some(name) => {
            let path = resolve_workbook_path(report_path, name);
            if !path.is_file() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Ok(path)
        }
        None => prompt_workbook(input, prompt, report_path),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    print!("Reading settings file... ");
    io::stdout().flush()?;
    let settings = Settings::load(&cli.settings)?;
    println!("Done.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let review = workbook_path(
        cli.review.as_deref(),
        &mut input,
        "Enter the portfolio review spreadsheet filename",
        &settings.report_path,
    )?;
    let summary = workbook_path(
        cli.summary.as_deref(),
        &mut input,
        "Enter the portfolio summary spreadsheet filename",
        &settings.report_path,
    )?;

    let report = run(&settings, &review, &summary)?;
    println!("\n{}", report);

    if !cli.no_pause && (cli.review.is_none() || cli.summary.is_none()) {
        print!("\nPress 'Enter' to quit.");
        io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_retries_until_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("review.xlsx"), b"").unwrap();
        let report_path = format!("{}/", dir.path().display());
        let report_path = report_path.as_str();

        let mut input = Cursor::new("missing\n\nreview\n");
        let path = prompt_workbook(&mut input, "Review", report_path).unwrap();

        assert_eq!(path, dir.path().join("review.xlsx"));
    }

    #[test]
    fn test_prompt_fails_at_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = Cursor::new("missing\n");

        let report_path = format!("{}/", dir.path().display());
        assert!(prompt_workbook(&mut input, "Review", &report_path).is_err());
    }

    #[test]
    fn test_workbook_path_from_argument() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("summary.xlsx"), b"").unwrap();
        let report_path = format!("{}/", dir.path().display());
        let report_path = report_path.as_str();
        let mut input = Cursor::new("");

        let path = workbook_path(Some("summary"), &mut input, "Summary", report_path).unwrap();
        assert_eq!(path, dir.path().join("summary.xlsx"));

        assert!(workbook_path(Some("other"), &mut input, "Summary", report_path).is_err());
    }
}
