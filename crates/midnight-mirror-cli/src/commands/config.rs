use anyhow::Context;

use crate::commands::CommandOptions;

pub struct Config;

impl Config {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        let config = options.load_config()?;

        if options.verbose {
            println!("# resize = {}", config.resize_or_default());
            let images = config.image_extensions();
            let extensions: Vec<&str> = images.iter().collect();
            println!("# image_extensions = {extensions:?}");
        }

        let rendered = toml::to_string(&config).context("Failed to render configuration")?;
        if rendered.trim().is_empty() {
            println!("# no configuration set, using defaults");
        } else {
            print!("{rendered}");
        }

        Ok(())
    }
}
