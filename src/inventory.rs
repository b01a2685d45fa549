//! Ansible inventory rendering.
//!
//! Pure and total: every provisioning state of the expected shape renders to
//! a complete document, byte-identical across repeated calls. "No nodes" is
//! an explanatory comment inside the group section, never an omitted
//! section, so downstream consumers always find every header.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::outputs::{MASTER_IPS_OUTPUT, TerraformOutputs, WORKER_IPS_OUTPUT};

/// Group holding the control-plane hosts.
pub const CONTROL_PLANE_GROUP: &str = "k8s_control_plane";

/// Group holding the worker hosts.
pub const WORKERS_GROUP: &str = "k8s_workers";

/// Static storage section, independent of the provisioning state.
const STORAGE_SECTION: [&str; 2] = [
    "[storage_nodes]",
    "nfs-server ansible_host=192.168.1.100 # Placeholder/Static",
];

/// Render the full inventory document.
#[must_use]
pub fn render(outputs: &TerraformOutputs, cfg: &Config) -> String {
    let mut lines = vec![
        "[all:vars]".to_string(),
        format!("ansible_python_interpreter={}", cfg.python_interpreter),
        format!("k8s_version={}", cfg.k8s_version),
        String::new(),
        format!("[{CONTROL_PLANE_GROUP}]"),
    ];

    push_hosts(&mut lines, "master", &outputs.ip_list(MASTER_IPS_OUTPUT));

    lines.push(String::new());
    lines.push(format!("[{WORKERS_GROUP}]"));
    push_hosts(&mut lines, "worker", &outputs.ip_list(WORKER_IPS_OUTPUT));

    lines.extend([
        String::new(),
        "[k8s_cluster:children]".to_string(),
        CONTROL_PLANE_GROUP.to_string(),
        WORKERS_GROUP.to_string(),
        String::new(),
    ]);
    lines.extend(STORAGE_SECTION.map(str::to_string));

    lines.join("\n")
}

/// One host line per address, aliased `<role>-1`, `<role>-2`, ... in source
/// order; a comment when the group has no addresses.
fn push_hosts(lines: &mut Vec<String>, role: &str, ips: &[String]) {
    if ips.is_empty() {
        lines.push(format!("# No {role} nodes found in Terraform output"));
        return;
    }
    for (i, ip) in ips.iter().enumerate() {
        lines.push(format!("{role}-{n} ansible_host={ip}", n = i + 1));
    }
}

/// Overwrite `path` with the rendered inventory in a single write.
///
/// # Errors
///
/// Returns an error if the destination cannot be written; this is the only
/// fatal condition in the whole run.
pub fn write_inventory(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("writing inventory file {}", path.display()))
}
