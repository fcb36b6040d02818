//! Prints the alias table and every resolved relation of a dataset.
//!
//! Run with: `cargo run --example dump_resolution -p slr-ontology -- patterns_data.json`

use std::path::PathBuf;

use slr_ontology::relation::resolve_relations;
use slr_ontology::{Catalog, Dataset};

fn main() -> Result<(), slr_ontology::Error> {
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("patterns_data.json"), PathBuf::from);
    let dataset = Dataset::from_path(&path)?;
    let catalog = Catalog::new(&dataset);

    let mut aliases: Vec<_> = catalog.aliases().iter().collect();
    aliases.sort_unstable();
    println!("Alias table ({} entries)", aliases.len());
    for (alias, canonical) in aliases {
        println!("  {alias:40} -> {canonical}");
    }

    println!();
    for pattern in &dataset.paper_patterns {
        let resolution = resolve_relations(&catalog, pattern);
        if resolution.relations.is_empty() {
            continue;
        }
        println!("{} ({})", pattern.id, pattern.name);
        for relation in &resolution.relations {
            println!("  {:14} {}", relation.key, relation.target);
        }
        for (kind, failure) in &resolution.failures {
            println!("  ! {kind}: {failure}");
        }
    }
    Ok(())
}
