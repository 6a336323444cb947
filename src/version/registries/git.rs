//! `git ls-remote` backed remote implementation

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::GIT_LS_REMOTE_TIMEOUT_MS;
use crate::version::compare::is_pinned_sha;
use crate::version::error::RegistryError;
use crate::version::registry::GitRemote;

/// Queries git remotes by running `git ls-remote <url> <ref>`
pub struct GitCli {
    program: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Creates a GitCli using `git` from `PATH`
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("git", timeout)
    }

    /// Creates a GitCli running a specific executable
    pub fn with_program(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(Duration::from_millis(GIT_LS_REMOTE_TIMEOUT_MS))
    }
}

/// Extract the commit hash from the first line of `ls-remote` output
/// (`<sha>\t<ref>`)
pub fn parse_ls_remote_output(stdout: &str) -> Option<String> {
    let sha = stdout.lines().next()?.split_whitespace().next()?;
    is_pinned_sha(sha).then(|| sha.to_string())
}

#[async_trait::async_trait]
impl GitRemote for GitCli {
    async fn ls_remote(&self, url: &str, reference: &str) -> Result<String, RegistryError> {
        debug!("git ls-remote {} {}", url, reference);

        // The child is killed when dropped, so every early return below
        // (including the timeout) terminates the process.
        let child = Command::new(&self.program)
            .args(["ls-remote", url, reference])
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RegistryError::Spawn)?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(RegistryError::Spawn)?,
            Err(_) => {
                warn!(
                    "git ls-remote {} {} timed out after {} ms",
                    url,
                    reference,
                    self.timeout_ms()
                );
                return Err(RegistryError::Timeout {
                    target: format!("{url} {reference}"),
                    timeout_ms: self.timeout_ms(),
                });
            }
        };

        if !output.status.success() {
            return Err(RegistryError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_ls_remote_output(&stdout)
            .ok_or_else(|| RegistryError::NotFound(format!("{url} {reference}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    #[rstest]
    #[case("0123456789abcdef0123456789abcdef01234567\tHEAD\n", Some(SHA))]
    #[case(
        "0123456789abcdef0123456789abcdef01234567\trefs/tags/v1\nffffffffffffffffffffffffffffffffffffffff\trefs/tags/v1^{}\n",
        Some(SHA)
    )]
    #[case("", None)]
    #[case("not-a-sha\tHEAD\n", None)]
    #[case("0123456\tHEAD\n", None)]
    fn parse_ls_remote_output_returns_expected(
        #[case] stdout: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(parse_ls_remote_output(stdout), expected.map(String::from));
    }

    #[tokio::test]
    async fn ls_remote_fails_when_program_cannot_be_spawned() {
        let git = GitCli::with_program("/nonexistent/bin/git", Duration::from_secs(1));

        let result = git.ls_remote("https://github.com/org/repo", "HEAD").await;

        assert!(matches!(result, Err(RegistryError::Spawn(_))));
    }

    #[cfg(unix)]
    mod with_fake_git {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::time::Instant;
        use tempfile::TempDir;

        /// Writes an executable shell script standing in for `git`
        fn fake_git(script: &str) -> (TempDir, PathBuf) {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("git");
            std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            (temp_dir, path)
        }

        #[tokio::test]
        async fn ls_remote_returns_sha_of_first_line() {
            let (_dir, path) = fake_git(&format!(r#"printf '{SHA}\t%s\n' "$3""#));
            let git = GitCli::with_program(path, Duration::from_secs(5));

            let result = git
                .ls_remote("https://github.com/org/repo", "HEAD")
                .await
                .unwrap();

            assert_eq!(result, SHA);
        }

        #[tokio::test]
        async fn ls_remote_passes_url_and_ref_as_arguments() {
            let (_dir, path) = fake_git(&format!(
                r#"[ "$1" = ls-remote ] && [ "$2" = https://x/y ] && [ "$3" = refs/tags/v1 ] && printf '{SHA}\t%s\n' "$3""#
            ));
            let git = GitCli::with_program(path, Duration::from_secs(5));

            let result = git.ls_remote("https://x/y", "refs/tags/v1").await;

            assert_eq!(result.unwrap(), SHA);
        }

        #[tokio::test]
        async fn ls_remote_fails_on_non_zero_exit() {
            let (_dir, path) = fake_git("echo 'fatal: repository not found' >&2; exit 128");
            let git = GitCli::with_program(path, Duration::from_secs(5));

            let result = git.ls_remote("https://x/y", "HEAD").await;

            assert!(matches!(
                result,
                Err(RegistryError::CommandFailed { ref stderr, .. }) if stderr.contains("not found")
            ));
        }

        #[tokio::test]
        async fn ls_remote_returns_not_found_for_empty_output() {
            let (_dir, path) = fake_git("exit 0");
            let git = GitCli::with_program(path, Duration::from_secs(5));

            let result = git.ls_remote("https://x/y", "refs/heads/nope").await;

            assert!(matches!(result, Err(RegistryError::NotFound(_))));
        }

        #[tokio::test]
        async fn ls_remote_times_out_and_kills_slow_process() {
            let (_dir, path) = fake_git("exec sleep 30");
            let git = GitCli::with_program(path, Duration::from_millis(200));

            let started = Instant::now();
            let result = git.ls_remote("https://x/y", "HEAD").await;

            assert!(matches!(
                result,
                Err(RegistryError::Timeout {
                    timeout_ms: 200,
                    ..
                })
            ));
            assert!(started.elapsed() < Duration::from_secs(10));
        }
    }
}
