//! Terraform output document — the provisioning state consumed by the
//! renderer.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::FetchError;
use crate::terraform::Terraform;

/// Output key holding the control-plane IP list.
pub const MASTER_IPS_OUTPUT: &str = "master_ips";

/// Output key holding the worker IP list.
pub const WORKER_IPS_OUTPUT: &str = "worker_ips";

/// One entry in the `terraform output -json` document. Terraform wraps every
/// output in an object carrying `value` plus type metadata; only `value` is
/// consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputEntry {
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Parsed `terraform output -json` document.
///
/// May be empty — an empty state is how "infrastructure not yet provisioned"
/// presents, and is valid input everywhere downstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TerraformOutputs(HashMap<String, OutputEntry>);

impl TerraformOutputs {
    /// The fallback state used when the fetch fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The list of IP strings under the output `name`.
    ///
    /// Absent keys and values that are not lists yield an empty list.
    /// Non-string list elements are skipped; they produce no host entry and
    /// do not consume an alias index.
    #[must_use]
    pub fn ip_list(&self, name: &str) -> Vec<String> {
        let Some(items) = self.0.get(name).and_then(|e| e.value.as_array()) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

/// Query the provisioning state and parse it.
///
/// Single attempt, no retries — upstream orchestration re-runs the whole
/// tool on failure.
///
/// # Errors
///
/// Returns [`FetchError::CommandFailed`] when the query exits non-zero,
/// [`FetchError::Parse`] when its stdout is not the expected JSON object,
/// and passes through spawn/timeout errors from the [`Terraform`]
/// implementation. The caller substitutes [`TerraformOutputs::empty`] for
/// all of these.
pub async fn fetch_outputs(tf: &impl Terraform) -> Result<TerraformOutputs, FetchError> {
    let output = tf.query_outputs().await?;
    if !output.status.success() {
        return Err(FetchError::CommandFailed {
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(serde_json::from_slice(&output.stdout)?)
}
