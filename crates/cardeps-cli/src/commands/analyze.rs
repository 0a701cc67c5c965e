//! Analyze command implementation.

use cardeps_graph::{Analysis, EdgeOrigin, analyze};
use tracing::{debug, warn};

use crate::cli::AnalyzeArgs;
use crate::config::CardepsConfig;
use crate::error::Result;
use crate::render;
use crate::ui;

/// Execute the analyze command.
///
/// # Steps
///
/// 1. Load and validate configuration
/// 2. Build the inventory and scan the tree
/// 3. Write every requested format into the output directory
///
/// # Errors
///
/// Returns errors for invalid configuration, malformed XML, rejected
/// collisions and unwritable outputs. No output is written when the analysis
/// fails.
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = CardepsConfig::load_for_analyze(&args)?;
    config.validate()?;
    let filter = config.unit_filter()?;
    debug!(?config, "resolved configuration");

    ui::info(&format!(
        "Analyzing {} ({} strategy)...",
        config.root.display(),
        config.strategy
    ));

    let analysis = analyze(&config.root, &config.analyze_options())?;
    report(&analysis);

    let written = render::write_outputs(&analysis, &config.formats, &filter, &config.out_dir)?;
    for path in &written {
        ui::success(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

fn report(analysis: &Analysis) {
    for collision in &analysis.collisions {
        ui::warning(&format!(
            "Artifact {} is declared by {} and {}; {} owns it",
            collision.artifact, collision.previous, collision.owner, collision.owner
        ));
    }

    let summary = &analysis.summary;
    if summary.files_unattributable > 0 {
        warn!(
            files = summary.files_unattributable,
            "files without an owning unit were skipped"
        );
    }
    for (tag, count) in &summary.unrecognized {
        debug!(tag = tag.as_str(), count, "unrecognized document root");
    }

    ui::info(&format!(
        "{} units, {} artifacts, {} files scanned",
        analysis.inventory.unit_count(),
        analysis.inventory.artifact_count(),
        summary.files_scanned
    ));

    if let Some(graph) = &analysis.regex {
        ui::info(&format!("regex: {} dependencies", graph.edge_count()));
    }
    if let Some(graph) = &analysis.structural {
        ui::info(&format!("structural: {} dependencies", graph.edge_count()));
    }
    if let Some(overlay) = &analysis.overlay {
        ui::info(&format!(
            "both: {} shared, {} regex-only, {} structural-only",
            overlay.count(EdgeOrigin::Both),
            overlay.count(EdgeOrigin::RegexOnly),
            overlay.count(EdgeOrigin::StructuralOnly)
        ));
    }
}
