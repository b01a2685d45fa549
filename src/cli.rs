//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::config::{
    Config, DEFAULT_INVENTORY_PATH, DEFAULT_TERRAFORM_BIN, DEFAULT_TERRAFORM_DIR,
    DEFAULT_TIMEOUT_SECS,
};
use crate::terraform::TerraformCli;

/// Generate an Ansible inventory from Terraform state
///
/// Running with no arguments performs the whole fetch-render-write cycle
/// against the defaults; the flags exist so tests and unusual layouts can
/// substitute paths.
#[derive(Parser)]
#[command(name = "tfinv", version)]
pub struct Cli {
    /// Terraform working directory to query
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TERRAFORM_DIR)]
    pub terraform_dir: PathBuf,

    /// Destination path for the generated inventory
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INVENTORY_PATH)]
    pub output: PathBuf,

    /// Terraform binary to invoke
    #[arg(long, value_name = "BIN", default_value = DEFAULT_TERRAFORM_BIN)]
    pub terraform_bin: String,

    /// Bounded wait for the terraform query, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Suppress progress output and the inventory preview
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = clap::builder::FalseyValueParser::new(),
    )]
    pub no_color: bool,
}

impl Cli {
    /// Execute the generation cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory file cannot be written. Fetch
    /// failures are absorbed inside the generate command.
    pub async fn run(self) -> Result<()> {
        let ctx = crate::output::OutputContext::new(self.no_color, self.quiet);
        let cfg = Config {
            terraform_dir: self.terraform_dir,
            inventory_path: self.output,
            terraform_bin: self.terraform_bin,
            timeout: Duration::from_secs(self.timeout_secs),
            ..Config::default()
        };
        let tf = TerraformCli::new(&cfg.terraform_bin, &cfg.terraform_dir, cfg.timeout);
        commands::generate::run(&ctx, &cfg, &tf).await
    }
}
