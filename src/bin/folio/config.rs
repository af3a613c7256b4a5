use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use folio::config::{read_config, Config};
use folio::error::ConfigError;

use crate::config_data::write_sample_cfg;

pub(crate) const CFG_FILE_NAME: &str = "folio.toml";

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir().map(|dir| dir.join("folio"));

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(ConfigError::NotFound(CFG_FILE_NAME.to_string()).into()),
    };

    let config = read_config(&config_path)?;
    Ok(config)
}

pub(crate) fn generate_cfg(config_path: &Option<PathBuf>) -> Result<PathBuf> {
    let path: PathBuf = match config_path {
        Some(path) => path.clone(),
        None => {
            let cfg_dir = dirs::config_dir().context("Could not find user config dir")?;
            cfg_dir.join("folio").join(CFG_FILE_NAME)
        }
    };

    write_sample_cfg(&path)
        .with_context(|| format!("Error writing sample config to {}", path.display()))?;

    Ok(path)
}
