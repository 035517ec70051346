use crate::config::{config_path, load_config, save_config, shellexpand_path};
use crate::error::Result;

pub fn show() -> Result<()> {
    let config = load_config();
    println!("Config:     {}", config_path().display());
    println!("State file: {}", config.state_file);
    println!("Output dir: {}", config.output_dir);
    Ok(())
}

pub fn set_state(path: &str) -> Result<()> {
    let mut config = load_config();
    config.state_file = shellexpand_path(path);
    save_config(&config)?;
    println!("State file set to {}", config.state_file);
    Ok(())
}

pub fn set_output(dir: &str) -> Result<()> {
    let mut config = load_config();
    config.output_dir = shellexpand_path(dir);
    save_config(&config)?;
    println!("Output dir set to {}", config.output_dir);
    Ok(())
}
