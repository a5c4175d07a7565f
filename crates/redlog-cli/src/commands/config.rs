use anyhow::Result;
use redlog_config::Config;
use redlog_redact::DEFAULT_TOKEN;
use std::path::Path;

pub fn handle(path: Option<&Path>, config: &Config) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    println!("Config file: {}", path.display());
    println!();
    print!("{}", toml::to_string_pretty(&masked(config))?);

    Ok(())
}

/// Copy of `config` safe to print
fn masked(config: &Config) -> Config {
    let mut config = config.clone();
    if !config.database.password.is_empty() {
        config.database.password = DEFAULT_TOKEN.to_string();
    }
    config
}
