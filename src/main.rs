mod models;
mod report;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let store_path = get_store_path()?;
    let mut store = store::Store::open(&store_path)?;

    match args.len() {
        1 => run::as_tui(&mut store),
        _ => run::as_cli(&args, &mut store),
    }
}

fn get_store_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cashtrack", "CashTrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("cashtrack.db"))
}
