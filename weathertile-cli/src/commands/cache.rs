//! Cache management CLI commands.

use clap::Subcommand;

use weathertile::config::{format_size, ConfigFile};
use weathertile::TileCache;

use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Clear the tile cache, removing all cached artifacts
    Clear,
    /// Show tile cache statistics
    Stats,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default().to_weather_config(None);
    let cache = TileCache::open(&config.cache)?;

    match action {
        CacheAction::Clear => {
            println!("Clearing tile cache at: {}", config.cache.directory.display());

            let result = cache.clear()?;
            println!(
                "Deleted {} files, freed {}",
                result.files_deleted,
                format_size(result.bytes_freed)
            );
        }
        CacheAction::Stats => {
            let stats = cache.stats();
            println!("Tile cache: {}", config.cache.directory.display());
            println!("  Entries: {}", stats.entries);
            println!("  Size:    {}", format_size(stats.bytes));
        }
    }

    Ok(())
}
