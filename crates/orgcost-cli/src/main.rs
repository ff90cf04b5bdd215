//! orgcost CLI.
//!
//! Reads an employee roster and reports the org's cost structure.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use orgcost::{Delimiter, EngineConfig, OrgEngine, OrgError, OrgSummary};

mod chart;
mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "orgcost")]
#[command(about = "Org chart cost rollups - IC vs management cost from an employee roster")]
#[command(version)]
struct Cli {
    /// Field delimiter: auto, tab, comma, semicolon, pipe, or a single character
    #[arg(short, long, global = true, default_value = "auto")]
    delimiter: Delimiter,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show organization-wide cost totals
    Summary {
        /// Roster file ('-' for stdin)
        input: PathBuf,
    },

    /// Print the org chart with per-employee cost rollups
    Tree {
        /// Roster file ('-' for stdin)
        input: PathBuf,

        /// Collapse everything below this depth (root is depth 0)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Validate a roster without computing costs
    Check {
        /// Roster file ('-' for stdin)
        input: PathBuf,
    },

    /// Write the annotated org tree as JSON
    Export {
        /// Roster file ('-' for stdin)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let engine = OrgEngine::new(EngineConfig::with_delimiter(cli.delimiter));

    match cli.command {
        Commands::Summary { input } => {
            let summary = load_summary(&engine, &input)?;
            print_summary(&summary);
        }

        Commands::Tree { input, max_depth } => {
            let summary = load_summary(&engine, &input)?;
            print_tree(&summary, max_depth);
        }

        Commands::Check { input } => {
            check_roster(&engine, &input)?;
        }

        Commands::Export {
            input,
            output,
            compact,
        } => {
            let summary = load_summary(&engine, &input)?;
            export_summary(&summary, output.as_deref(), compact)?;
        }
    }

    Ok(())
}

/// Reads roster text from a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String, OrgError> {
    read_input_from(path, std::io::stdin().lock())
}

fn read_input_from(path: &Path, mut stdin: impl Read) -> Result<String, OrgError> {
    if path == Path::new("-") {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .map_err(|e| OrgError::io("<stdin>", e.to_string()))?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(|e| OrgError::io(path, e.to_string()))
    }
}

fn load_summary(engine: &OrgEngine, input: &Path) -> miette::Result<OrgSummary> {
    let text = read_input(input)?;
    info!(input = %input.display(), delimiter = %engine.config().delimiter, "processing roster");
    Ok(engine.process(&text)?)
}

fn print_summary(summary: &OrgSummary) {
    ui::box_header(&format!("{} Org cost summary", ui::symbols::DIAMOND));
    ui::box_row("Root", summary.root.id());
    ui::box_row("Employees", &summary.total_employees.to_string());
    ui::box_row("Managers", &summary.manager_count().to_string());
    ui::box_row("Total cost", &ui::format_cost(summary.total_cost));
    ui::box_row(
        "Management",
        &format!(
            "{}  ({})",
            ui::format_cost(summary.management_cost),
            ui::format_share(summary.management_share())
        ),
    );
    ui::box_row("IC", &ui::format_cost(summary.ic_cost));
    ui::box_footer();
}

fn print_tree(summary: &OrgSummary, max_depth: Option<usize>) {
    for line in chart::chart_lines(&summary.root, max_depth) {
        let node = line.node;
        let mut costs = format!(
            "total {} {} mgmt {} {} ic {}",
            ui::format_cost(node.metrics.total_cost),
            ui::symbols::DOT,
            ui::format_cost(node.metrics.management_cost),
            ui::symbols::DOT,
            ui::format_cost(node.metrics.ic_cost),
        );
        if node.is_manager() {
            costs.push_str(&format!(
                " {} {} direct / {} total",
                ui::symbols::DOT,
                node.metrics.direct_count,
                node.metrics.descendant_count
            ));
        }
        if line.hidden > 0 {
            costs.push_str(&format!(" {} +{} hidden", ui::symbols::TRIANGLE, line.hidden));
        }
        ui::chart_line(
            &line.prefix,
            node.id(),
            node.record.attribute("Name"),
            &costs,
            node.is_manager(),
        );
    }
    println!();
    ui::dim(&format!(
        "{} employees {} total cost {}",
        summary.total_employees,
        ui::symbols::DOT,
        ui::format_cost(summary.total_cost)
    ));
}

fn check_roster(engine: &OrgEngine, input: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let spinner = ui::spinner("Checking roster...");

    let result = read_input(input).and_then(|text| engine.check(&text));
    spinner.finish_and_clear();

    match result {
        Ok(tree) => {
            ui::looking_good();
            println!();
            println!(
                "    {} employees {} rooted at {}",
                tree.len(),
                ui::symbols::DOT,
                tree.root().record.id
            );
            ui::timing("Checked", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            ui::nope_header();
            Err(e.into())
        }
    }
}

fn render_json(summary: &OrgSummary, compact: bool) -> miette::Result<String> {
    if compact {
        serde_json::to_string(summary)
    } else {
        serde_json::to_string_pretty(summary)
    }
    .map_err(|e| miette::miette!("Failed to serialize summary: {}", e))
}

fn export_summary(summary: &OrgSummary, output: Option<&Path>, compact: bool) -> miette::Result<()> {
    let json = render_json(summary, compact)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            ui::success(&format!(
                "Wrote {} employees to {}",
                summary.total_employees,
                path.display()
            ));
            ui::info(&format!("Total cost {}", ui::format_cost(summary.total_cost)));
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "Employee Id,Manager,Salary\nE1,,100\nE2,E1,80\nE3,E2,50\n";

    fn summary() -> OrgSummary {
        orgcost::process(ROSTER).unwrap()
    }

    #[test]
    fn test_dash_reads_stdin() {
        let text = read_input_from(Path::new("-"), ROSTER.as_bytes()).unwrap();
        assert_eq!(text, ROSTER);
    }

    #[test]
    fn test_path_reads_file_not_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, ROSTER).unwrap();

        let text = read_input_from(&path, "ignored".as_bytes()).unwrap();
        assert_eq!(text, ROSTER);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        match read_input_from(&path, std::io::empty()) {
            Err(OrgError::IoError { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_export_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("org.json");

        export_summary(&summary(), Some(&path), false).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["totalEmployees"], 3);
        assert_eq!(json["totalCost"], 130.0);
        assert_eq!(json["root"]["children"][0]["id"], "E2");
    }

    #[test]
    fn test_export_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("org.json");
        assert!(export_summary(&summary(), Some(&path), false).is_err());
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let summary = summary();
        let compact = render_json(&summary, true).unwrap();
        let pretty = render_json(&summary, false).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact).unwrap(),
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap()
        );
    }
}
