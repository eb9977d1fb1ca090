//! CLI command implementations.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use friendgraph_server::{FriendServer, Language, UserStore};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for `serve` that override the config file.
pub struct ServeOptions {
    pub port: Option<u16>,
    pub headless: bool,
    pub lang: Option<Language>,
    pub config: Option<PathBuf>,
}

/// Initialize friendgraph in a directory.
pub fn init(path: &Path) -> Result<()> {
    let config_path = AppConfig::default_path(path);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    AppConfig::default()
        .write(&config_path)
        .with_context(|| format!("initializing {}", path.display()))?;

    println!("{} Initialized friendgraph in {}", "✓".green(), path.display());
    println!("  Run {} to start the server", "friendgraph serve".cyan());

    Ok(())
}

/// Start the HTTP server.
pub async fn serve(opts: ServeOptions) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = AppConfig::resolve(opts.config.as_deref(), &cwd)?;

    if let Some(port) = opts.port {
        config.server.port = port;
    }
    if opts.headless {
        config.server.host = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        println!("{}", "Starting friendgraph server in headless mode...".cyan());
    } else {
        println!("{}", "Starting friendgraph server...".cyan());
    }
    if let Some(lang) = opts.lang {
        config.language = lang;
    }

    info!("Graph policy: {:?}", config.policy);

    let server_config = config.server_config();
    println!(
        "{} Listening on {}",
        "✓".green(),
        format!("http://{}", server_config.addr).cyan()
    );

    let server = FriendServer::new(UserStore::with_policy(config.policy), server_config);
    server.run().await?;

    Ok(())
}

/// Print the effective configuration.
pub fn check_config(config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let resolved = AppConfig::resolve(config, &cwd)?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempdir().unwrap();

        init(dir.path()).unwrap();

        let config = AppConfig::load(&AppConfig::default_path(dir.path())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempdir().unwrap();
        let path = AppConfig::default_path(dir.path());
        let mut custom = AppConfig::default();
        custom.server.port = 1234;
        custom.write(&path).unwrap();

        init(dir.path()).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap().server.port, 1234);
    }
}
