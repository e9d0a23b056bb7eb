use huenote_core::storage::SqliteStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, HuenoteConfig};
use crate::errors::CliError;
use crate::helpers::parse_algorithm;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = ctx.config_path();
    if ctx.has_config() && !args.force {
        return Err(CliError::invalid_input_with_hint(
            format!("Config already exists at {}", config_path.display()),
            "Hint: Pass --force to overwrite it.",
        )
        .into());
    }

    let default_algorithm = args
        .algorithm
        .as_deref()
        .map(parse_algorithm)
        .transpose()?;

    let store_path = match args.path.as_ref().or(ctx.cli().store.as_ref()) {
        Some(path) => std::path::PathBuf::from(path),
        None => default_store_path()?,
    };

    // Opening creates the file and stamps the format version.
    let store = SqliteStore::open(&store_path)?;
    tracing::info!(path = %store.path().display(), "note store ready");

    let config = HuenoteConfig::new(store_path.clone(), default_algorithm);
    write_config(config_path, &config)?;

    if !ctx.quiet() {
        println!("Note store: {}", store_path.display());
        println!("Config:     {}", config_path.display());
        if let Some(algorithm) = default_algorithm {
            println!("Default algorithm: {}", algorithm);
        }
    }
    Ok(())
}
