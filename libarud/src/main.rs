use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use libarud::{ArudiConfig, FootDiagnosis, FootStatus, PoemAnalysis, Processor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libarud")]
#[command(about = "Arabic prosody: Arudi writing, binary patterns and meter detection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file (ArudiConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Single hemistich for quick scanning
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode
    Repl,
    /// Print the Arudi writing and pattern of one hemistich
    Scan {
        text: String,
        /// Read the final letter as sakin (Qāfiya Muqayyada)
        #[arg(long)]
        restrict_rhyme: bool,
        /// Do not lengthen the final vowel
        #[arg(long)]
        no_saturate: bool,
    },
    /// Analyze a poem file, one verse per line
    Analyze {
        file: PathBuf,
        /// Force a meter instead of detecting one
        #[arg(long)]
        meter: Option<String>,
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the meters of the catalog
    Meters,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

/// Split one line into (ṣadr, ʿajuz); a line without separator is a single
/// hemistich.
fn split_verse(line: &str) -> (String, String) {
    let parts = line
        .split_once('\t')
        .or_else(|| line.split_once(" | "));
    match parts {
        Some((sadr, ajuz)) => (sadr.trim().to_string(), ajuz.trim().to_string()),
        None => (line.trim().to_string(), String::new()),
    }
}

fn read_verses(path: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading poem {}", path.display()))?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_verse)
        .collect())
}

fn print_feet(label: &str, feet: &[FootDiagnosis]) {
    println!("   {label}:");
    for foot in feet {
        let marker = match foot.status {
            FootStatus::Ok => "ok",
            FootStatus::Broken => "broken",
            FootStatus::Missing => "missing",
            FootStatus::ExtraBits => "extra",
        };
        println!(
            "     {}. {:<8} {:<8} {:.2} {}",
            foot.foot_index + 1,
            foot.expected_pattern,
            foot.actual_segment,
            foot.score,
            marker
        );
    }
}

fn print_report(report: &PoemAnalysis) {
    println!("meter: {}", report.meter);
    for verse in &report.verses {
        println!();
        println!("{}. score={:.2}", verse.verse_index + 1, verse.score);
        println!("   arudi:    {} | {}", verse.sadr_arudi, verse.ajuz_arudi);
        println!("   input:    {}", verse.input_pattern);
        println!("   expected: {}", verse.best_ref_pattern);
        print_feet("sadr", &verse.sadr_analysis);
        if let Some(ajuz) = &verse.ajuz_analysis {
            print_feet("ajuz", ajuz);
        }
    }
}

fn handle_scan(processor: &Processor, text: &str, saturate: bool, restrict_rhyme: bool) {
    let (arudi, pattern) = processor.normalize_and_extract(text, saturate, restrict_rhyme);
    println!("{arudi}");
    println!("{pattern}");
}

fn handle_analyze(
    processor: &Processor,
    file: &Path,
    meter: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let verses = read_verses(file)?;
    let report = processor.analyze_poem(&verses, meter)?;
    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_repl(processor: &Processor) {
    println!("libarud REPL: type a hemistich, or a verse with its halves separated by ' | '");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(raw) => {
                if raw.trim().is_empty() {
                    continue;
                }
                let verse = split_verse(&raw);
                match processor.analyze_poem(&[verse], None) {
                    Ok(report) => print_report(&report),
                    Err(e) => println!("  ({e})"),
                }
                println!();
            }
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("libarud=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ArudiConfig::load_toml(path)?,
        None => ArudiConfig::default(),
    };
    let processor = Processor::with_config(config);

    match cli.command {
        Some(Commands::Repl) => run_repl(&processor),
        Some(Commands::Scan {
            text,
            restrict_rhyme,
            no_saturate,
        }) => handle_scan(&processor, &text, !no_saturate, restrict_rhyme),
        Some(Commands::Analyze {
            file,
            meter,
            format,
        }) => handle_analyze(&processor, &file, meter.as_deref(), format)?,
        Some(Commands::Meters) => {
            for name in processor.list_meters() {
                println!("{name}");
            }
        }
        None => match cli.input {
            Some(input) => {
                let (arudi, pattern) = processor.prepare_text(&input);
                println!("{arudi}");
                println!("{pattern}");
            }
            None => run_repl(&processor),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_separators() {
        assert_eq!(split_verse("أ\tب"), ("أ".to_string(), "ب".to_string()));
        assert_eq!(split_verse("أ | ب"), ("أ".to_string(), "ب".to_string()));
        assert_eq!(split_verse(" أ "), ("أ".to_string(), String::new()));
    }
}
