use std::fs;

use cdoc::{
  cli::{Cli, Commands},
  convert,
  select,
};
use cdoc_config::Config;
use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config((*format).into(), output)
        .wrap_err_with(|| {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        })?;
      Ok(())
    },

    Commands::Export { output_dir, force } => {
      Config::export_templates(output_dir, *force).wrap_err_with(|| {
        format!("Failed to export templates to {}", output_dir.display())
      })?;
      Ok(())
    },

    Commands::Convert { input, output } => {
      let config = Config::load(cli.config_file.as_deref())?;
      convert::run(&config, input, output.as_deref())
        .wrap_err_with(|| format!("Failed to convert {}", input.display()))
    },

    Commands::Select { keyword } => {
      let config = Config::load(cli.config_file.as_deref())?;
      select::run(&config, keyword.as_deref())?;
      Ok(())
    },
  }
}
