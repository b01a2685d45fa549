//! Terraform CLI abstraction — enables test doubles for the state query.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::error::FetchError;

/// Abstraction over the Terraform CLI, enabling test doubles.
///
/// The production implementation delegates to the `terraform` binary via
/// [`tokio::process::Command`].
#[allow(async_fn_in_trait)]
pub trait Terraform {
    /// Run `terraform output -json` in the configured working directory.
    ///
    /// Returns the completed process output whatever its exit status;
    /// callers decide what a non-zero exit means.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or the bounded
    /// wait expires.
    async fn query_outputs(&self) -> Result<Output, FetchError>;
}

/// Production implementation — shells out to the `terraform` binary with a
/// bounded wait and guaranteed process kill.
///
/// On Windows, `tokio::time::timeout` around `.output().await` does NOT kill
/// the child process when the timeout fires — the future is dropped but the
/// OS process keeps running. This implementation uses `tokio::select!` with
/// explicit `child.kill()` to guarantee the process is terminated.
pub struct TerraformCli {
    program: String,
    dir: PathBuf,
    timeout: Duration,
}

impl TerraformCli {
    #[must_use]
    pub fn new(program: &str, dir: &Path, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            dir: dir.to_path_buf(),
            timeout,
        }
    }

    fn invocation_error(&self, message: String) -> FetchError {
        FetchError::Invocation {
            program: self.program.clone(),
            message,
        }
    }
}

impl Terraform for TerraformCli {
    async fn query_outputs(&self) -> Result<Output, FetchError> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(["output", "-json"])
            .current_dir(&self.dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.invocation_error(e.to_string()))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Read stdout/stderr CONCURRENTLY with wait() to avoid pipe deadlock.
        // If the child writes more than the OS pipe buffer (64KB Linux, 4KB
        // some Windows configs), it blocks on write. If we only call
        // child.wait() first, wait() never resolves → deadlock.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.map_err(|e| self.invocation_error(e.to_string()))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                Err(FetchError::TimedOut { secs: self.timeout.as_secs() })
            }
        }
    }
}
