use anyhow::Result;

use pageflow_core::EnhanceConfig;

pub fn show(config: &EnhanceConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = EnhanceConfig::config_path();
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("Use --force to overwrite it with the defaults.");
        return Ok(());
    }

    let path = EnhanceConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
