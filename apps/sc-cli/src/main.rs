use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sc_app::{
    AppError, AppResult, BrowseSession, BrowserConfig, ComparisonReport, catalog_service,
    compare_service, load_catalog, load_config,
};
use sc_catalog::Catalog;
use sc_compare::{CellValue, SelectOutcome};

#[derive(Parser)]
#[command(name = "simcat")]
#[command(about = "Simulation catalog browser - facet filtering and side-by-side comparison", long_about = None)]
struct Cli {
    /// Path to the browser config YAML file
    #[arg(short, long, global = true, default_value = "simcat.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List facet values per filter group
    Facets,
    /// List records matching a query string
    Filter {
        /// Query string, e.g. "campaignId=v3.LR,v3.HR&status=completed"
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Add simulations to the comparison
    Select {
        /// Simulation IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Remove a simulation from the comparison
    Deselect {
        /// Simulation ID
        id: String,
    },
    /// Hide a comparison column
    Hide {
        /// Simulation ID
        id: String,
    },
    /// Show a hidden comparison column
    Show {
        /// Simulation ID (omit with --all)
        id: Option<String>,
        /// Show every hidden column
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
    /// Move one comparison column onto another's position
    Reorder {
        /// Column being moved
        dragged: String,
        /// Column whose position it takes
        target: String,
    },
    /// Print the comparison matrix
    Compare {
        /// Mark rows whose visible values differ
        #[arg(long)]
        diffs: bool,
        /// Expand every section, not just the default ones
        #[arg(long)]
        all_sections: bool,
        /// Emit the full matrix as JSON
        #[arg(long)]
        json: bool,
    },
    /// Empty the comparison
    ClearSelection,
}

fn main() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!(path = %cli.config.display(), "loading config");
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Facets => cmd_facets(&config),
        Commands::Filter { query } => cmd_filter(&config, &query),
        Commands::Select { ids } => cmd_select(&config, &ids),
        Commands::Deselect { id } => cmd_deselect(&config, &id),
        Commands::Hide { id } => cmd_hide(&config, &id),
        Commands::Show { id, all } => cmd_show(&config, id.as_deref(), all),
        Commands::Reorder { dragged, target } => cmd_reorder(&config, &dragged, &target),
        Commands::Compare {
            diffs,
            all_sections,
            json,
        } => cmd_compare(&config, diffs, all_sections, json),
        Commands::ClearSelection => cmd_clear_selection(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_facets(config: &BrowserConfig) -> AppResult<()> {
    let catalog = load_catalog(config)?;
    let browse = BrowseSession::new(&catalog);

    for group in browse.panel() {
        println!("{}", group.group.title());
        for field in group.fields {
            if field.options.is_empty() {
                println!("  {}: (none)", field.field);
                continue;
            }
            let labels: Vec<String> = field
                .options
                .iter()
                .map(|o| {
                    if o.label == o.value {
                        o.value.clone()
                    } else {
                        format!("{} ({})", o.label, o.value)
                    }
                })
                .collect();
            println!("  {}: {}", field.field, labels.join(", "));
        }
    }
    Ok(())
}

fn cmd_filter(config: &BrowserConfig, query: &str) -> AppResult<()> {
    let catalog = load_catalog(config)?;
    let mut browse = BrowseSession::new(&catalog);

    if let Some(navigation) = browse.apply_location(query) {
        println!("Canonical query: {}", navigation.location("/browse"));
    }
    for chip in browse.chips() {
        println!("  [{}: {}]", chip.field.chip_label(), chip.value);
    }

    let records = browse.filtered(&catalog);
    println!("{} of {} simulations", records.len(), catalog.len());
    for record in records {
        let summary = catalog_service::summarize(record);
        println!(
            "  {}  {}  campaign={}  status={}  machine={}",
            summary.id,
            summary.name,
            summary.campaign.as_deref().unwrap_or("-"),
            summary.status.as_deref().unwrap_or("-"),
            summary.machine.as_deref().unwrap_or(sc_filter::UNKNOWN_MACHINE),
        );
    }
    Ok(())
}

fn cmd_select(config: &BrowserConfig, ids: &[String]) -> AppResult<()> {
    let catalog = load_catalog(config)?;
    let mut session = compare_service::open_comparison(config)?;

    for id in ids {
        match compare_service::select_record(&mut session, &catalog, id)? {
            SelectOutcome::Added => println!("✓ Added {}", id),
            SelectOutcome::AlreadySelected => println!("  {} is already selected", id),
            SelectOutcome::EmptyId => println!("✗ Cannot add an empty id"),
            SelectOutcome::AtCapacity => {
                println!(
                    "✗ Cannot add {}: at most {} simulations can be compared",
                    id,
                    sc_compare::MAX_SELECTION
                );
            }
        }
    }
    print_selection(&catalog, &session.headers(&catalog));
    Ok(())
}

fn cmd_deselect(config: &BrowserConfig, id: &str) -> AppResult<()> {
    let mut session = compare_service::open_comparison(config)?;
    if session.deselect(id) {
        println!("✓ Removed {}", id);
    } else {
        println!("  {} was not selected", id);
    }
    Ok(())
}

fn cmd_hide(config: &BrowserConfig, id: &str) -> AppResult<()> {
    let mut session = compare_service::open_comparison(config)?;
    if !session.columns().contains(id) {
        return Err(AppError::InvalidInput(format!(
            "'{}' is not in the comparison",
            id
        )));
    }
    if session.hide(id) {
        println!("✓ Hid {}", id);
    } else {
        println!("  {} is already hidden", id);
    }
    Ok(())
}

fn cmd_show(config: &BrowserConfig, id: Option<&str>, all: bool) -> AppResult<()> {
    let mut session = compare_service::open_comparison(config)?;
    match (id, all) {
        (_, true) => {
            session.show_all();
            println!("✓ All columns visible");
        }
        (Some(id), false) => {
            if session.show(id) {
                println!("✓ Showing {}", id);
            } else {
                println!("  {} was not hidden", id);
            }
        }
        (None, false) => {
            return Err(AppError::InvalidInput(
                "pass a simulation id or --all".to_string(),
            ));
        }
    }
    Ok(())
}

fn cmd_reorder(config: &BrowserConfig, dragged: &str, target: &str) -> AppResult<()> {
    let catalog = load_catalog(config)?;
    let mut session = compare_service::open_comparison(config)?;
    compare_service::reorder_columns(&mut session, dragged, target)?;
    print_selection(&catalog, &session.headers(&catalog));
    Ok(())
}

fn cmd_compare(
    config: &BrowserConfig,
    diffs: bool,
    all_sections: bool,
    json: bool,
) -> AppResult<()> {
    let catalog = load_catalog(config)?;
    let mut session = compare_service::open_comparison(config)?;
    if diffs {
        session.set_highlight_differences(true);
    }
    if all_sections {
        session.expanded_mut().set_all(true);
    }

    if session.columns().is_empty() {
        println!("No simulations selected. Use `simcat select <id>` first.");
        return Ok(());
    }

    if json {
        let matrix = session.matrix(&catalog);
        let rendered = serde_json::to_string_pretty(&matrix)
            .map_err(|e| AppError::InvalidInput(format!("Failed to render matrix: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    let report = compare_service::comparison_report(&session, &catalog);
    print_report(&report, session.highlight_differences());
    Ok(())
}

fn cmd_clear_selection(config: &BrowserConfig) -> AppResult<()> {
    let mut session = compare_service::open_comparison(config)?;
    session.clear_selection();
    println!("✓ Comparison cleared");
    Ok(())
}

fn print_selection(catalog: &Catalog, headers: &[sc_compare::ColumnHeader]) {
    if headers.is_empty() {
        println!("No visible columns");
        return;
    }
    println!("Columns:");
    for (position, header) in headers.iter().enumerate() {
        let known = if catalog.contains(&header.id) {
            ""
        } else {
            "  (not in catalog)"
        };
        println!("  {}. {} [{}]{}", position + 1, header.title, header.id, known);
    }
}

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => sc_compare::EMPTY_MARK.to_string(),
        other => other.display(),
    }
}

fn print_report(report: &ComparisonReport, highlighting: bool) {
    let label_width = report
        .sections
        .iter()
        .flat_map(|s| &s.rows)
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0);

    println!("{:width$}  {}", "", report.headers.join("  |  "), width = label_width + 2);
    if !report.hidden.is_empty() {
        println!("Hidden: {}", report.hidden.join(", "));
    }

    for section in &report.sections {
        let marker = if section.expanded { "▾" } else { "▸" };
        println!("\n{} {}", marker, section.section.title());
        if !section.expanded {
            continue;
        }
        for row in &section.rows {
            let flag = if row.differs { "*" } else { " " };
            let cells: Vec<String> = row.cells.iter().map(cell_text).collect();
            println!(
                "{} {:width$}  {}",
                flag,
                row.label,
                cells.join("  |  "),
                width = label_width
            );
        }
    }

    if highlighting {
        println!("\n{} row(s) differ", report.differing_rows());
    }
}
