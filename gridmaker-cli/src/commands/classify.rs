//! Classify a saved Overpass response without generating a grid.

use std::path::PathBuf;

use clap::Args;
use gridmaker::landuse::{classify, LanduseCategory};
use gridmaker::overpass::{to_features, RawExternalFeature};

use super::common::read_overpass_file;
use crate::error::CliError;

/// Arguments for `gridmaker classify`.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Overpass JSON response to classify
    #[arg(long, value_name = "PATH")]
    pub osm_file: PathBuf,

    /// Print only the per-category totals
    #[arg(long)]
    pub summary: bool,
}

/// Counts features per category, in [`LanduseCategory::ALL`] order.
pub fn category_counts(features: &[RawExternalFeature]) -> Vec<(LanduseCategory, usize)> {
    let mut counts: Vec<(LanduseCategory, usize)> =
        LanduseCategory::ALL.iter().map(|&c| (c, 0)).collect();
    for feature in features {
        let category = classify(&feature.tags);
        if let Some(entry) = counts.iter_mut().find(|(c, _)| *c == category) {
            entry.1 += 1;
        }
    }
    counts
}

/// Run the classify command.
pub fn run(args: ClassifyArgs) -> Result<(), CliError> {
    let response = read_overpass_file(&args.osm_file)?;
    let features = to_features(&response.elements);

    if !args.summary {
        for feature in &features {
            println!("{:<24} {}", feature.id, classify(&feature.tags));
        }
        println!();
    }

    println!(
        "{} polygon features from {} elements",
        features.len(),
        response.elements.len()
    );
    for (category, count) in category_counts(&features) {
        if count > 0 {
            println!("  {:<18} {}", category.name(), count);
        }
    }
    Ok(())
}
