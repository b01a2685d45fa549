//! Inventory generation — the fetch → render → write cycle.

use anyhow::Result;

use crate::config::Config;
use crate::inventory;
use crate::output::{OutputContext, progress};
use crate::outputs::{self, TerraformOutputs};
use crate::terraform::Terraform;

/// Run the full generation cycle.
///
/// Fetch failures of every kind degrade to the empty provisioning state,
/// identical to "infrastructure not yet provisioned", and leave the exit
/// code untouched.
///
/// # Errors
///
/// Returns an error if the inventory file cannot be written.
pub async fn run(ctx: &OutputContext, cfg: &Config, tf: &impl Terraform) -> Result<()> {
    if !cfg.terraform_dir.join(".terraform").is_dir() {
        ctx.warn(&format!(
            "Terraform not initialized in {}",
            cfg.terraform_dir.display()
        ));
    }

    let pb = ctx
        .show_progress()
        .then(|| progress::spinner("Fetching Terraform outputs..."));
    let fetched = outputs::fetch_outputs(tf).await;
    if let Some(pb) = pb {
        match &fetched {
            Ok(_) => progress::finish_ok(&pb, "Fetched Terraform outputs"),
            Err(_) => pb.finish_and_clear(),
        }
    }

    let state = fetched.unwrap_or_else(|e| {
        ctx.warn(&format!("{e}"));
        ctx.warn("Continuing with an empty provisioning state");
        TerraformOutputs::empty()
    });

    let content = inventory::render(&state, cfg);
    inventory::write_inventory(&cfg.inventory_path, &content)?;

    ctx.success(&format!(
        "Generated inventory at {}",
        cfg.inventory_path.display()
    ));
    ctx.preview(&content);
    Ok(())
}
