use anyhow::Context;
use epidemic_dashboard_lib::models::MIN_HISTORY_LEN;
use epidemic_dashboard_lib::{init_logging, Catalog, DashboardSettings};

fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = DashboardSettings::from_env()?;
    let path = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or(settings.catalog_path);

    println!("🔍 Catalog diagnostic - {}", path.display());
    let catalog = Catalog::load(&path).with_context(|| format!("cannot index {}", path.display()))?;

    println!("\n{:<20} | {:<20} | {:<8} | {}", "Disease", "Location", "Weeks", "Predictable");
    println!("{}", "-".repeat(66));

    for entry in catalog.entries() {
        let mark = if entry.predictable {
            "yes".to_string()
        } else {
            format!("no (minimum {})", MIN_HISTORY_LEN)
        };
        println!("{:<20} | {:<20} | {:<8} | {}", entry.disease, entry.location, entry.records, mark);
    }

    let stats = catalog.stats();
    println!(
        "\n{} diseases, {} locations, {} records, {} predictable.",
        stats.diseases, stats.locations, stats.records, stats.predictable
    );
    Ok(())
}
