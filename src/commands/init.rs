use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = default_config_toml()?;
    let contents = format!("# apicov configuration\n\n{body}");
    io::write_file(&config_path, &contents)?;
    println!("Created {} configuration file", config_path.display());

    Ok(())
}
