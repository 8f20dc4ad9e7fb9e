//! Get command - fetch a weather map tile for a location.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use weathertile::config::{format_size, ConfigFile};
use weathertile::{
    AsciiRenderer, MapOutput, OwmTileProvider, ReqwestClient, TileCache, TileProvider,
    WeatherMapConfig, WeatherMapService,
};

use crate::error::CliError;

/// Arguments for the get command.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Location as "lat,lon" decimal degrees, e.g. "51.5,-0.12"
    pub location: String,

    /// Map layer: prec, pres, wind or temp
    #[arg(short, long, default_value = "temp")]
    pub layer: String,

    /// Render the tile as text art instead of writing a PNG
    #[arg(long)]
    pub ascii: bool,

    /// Output path for the PNG (default: weathertile_<layer>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the get command.
pub fn run(args: GetArgs) -> Result<(), CliError> {
    let config_file = ConfigFile::load().unwrap_or_default();

    // Environment wins over the stored key.
    let api_key = std::env::var("OWM_API_KEY").ok().filter(|k| !k.is_empty());
    let config = config_file.to_weather_config(api_key);

    if config.api_key.is_empty() {
        return Err(CliError::Config(
            "no API key configured. Set OWM_API_KEY or run \
             'weathertile config set provider.api_key <key>'."
                .to_string(),
        ));
    }

    tracing::debug!(
        cache_dir = %config.cache.directory.display(),
        zoom = config.zoom,
        layer = %args.layer,
        "Resolved configuration"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(fetch_and_emit(args, config))
}

async fn fetch_and_emit(args: GetArgs, config: WeatherMapConfig) -> Result<(), CliError> {
    let http_client = ReqwestClient::with_timeout(config.fetch_timeout)?;
    let provider = Arc::new(OwmTileProvider::new(http_client, config.api_key.clone()));
    let cache = Arc::new(TileCache::open(&config.cache)?);
    let service = WeatherMapService::new(
        &config,
        provider as Arc<dyn TileProvider>,
        cache,
        Arc::new(AsciiRenderer::default()),
    );

    match service.get_map(&args.location, &args.layer, args.ascii).await? {
        MapOutput::TextArt(art) => {
            print!("{}", art);
        }
        MapOutput::Png(bytes) => {
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("weathertile_{}.png", args.layer)));
            std::fs::write(&path, &bytes)?;
            println!(
                "Wrote {} ({})",
                path.display(),
                format_size(bytes.len() as u64)
            );
        }
    }

    Ok(())
}
