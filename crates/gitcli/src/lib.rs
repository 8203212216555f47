//! Git (git) command-line wrapper for Rust
//!
//! A thin, synchronous interface to the git CLI. Every primitive is one
//! subprocess invocation against a fixed working directory, and every
//! invocation prints an audit line (`<dir>$ git <args>`) to stdout before
//! it runs, so an operator can replay the exact command sequence.
//!
//! # Example
//!
//! ```no_run
//! use gitcli::Git;
//!
//! let git = Git::new("/tmp/checkout");
//!
//! git.init()?;
//! git.remote_add("origin", "master", "https://example.com/repo.git")?;
//! git.fetch("origin", "master")?;
//!
//! let head = git.rev_parse("origin/master")?;
//! git.checkout(&head)?;
//! # Ok::<(), gitcli::Error>(())
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when invoking git
#[derive(Error, Debug)]
pub enum Error {
    #[error("git is not installed or not in PATH")]
    NotInstalled,

    #[error("`{command}` exited with status {status}: {output}")]
    CommandFailed {
        command: String,
        status: i32,
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Captured output of one git invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Get combined stdout and stderr output
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Executes a git argument list in a working directory.
///
/// The one seam between the wrapper and the real binary: production code
/// uses [`SystemRunner`], tests substitute a runner that records the
/// invocations instead of spawning anything.
pub trait CommandRunner {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Runner that spawns the real `git` binary
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        // A missing cwd would surface as the same NotFound a missing git
        // binary does; tell them apart here.
        if !cwd.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("working directory does not exist: {}", cwd.display()),
            )));
        }

        println!("{}", audit_line(args, cwd));

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::NotInstalled
                } else {
                    Error::Io(e)
                }
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// The audit line printed before each invocation: `<dir>$ git <args>`
fn audit_line(args: &[&str], cwd: &Path) -> String {
    format!("{}$ git {}", cwd.display(), args.join(" "))
}

/// Git CLI wrapper bound to one working directory
#[derive(Clone)]
pub struct Git {
    /// Working directory every command runs in
    workdir: PathBuf,
    runner: Arc<dyn CommandRunner + Send + Sync>,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git").field("workdir", &self.workdir).finish()
    }
}

impl Git {
    /// Create a wrapper for the given working directory
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            runner: Arc::new(SystemRunner),
        }
    }

    /// Create a wrapper with a substitute command runner
    pub fn with_runner(
        workdir: impl Into<PathBuf>,
        runner: Arc<dyn CommandRunner + Send + Sync>,
    ) -> Self {
        Self {
            workdir: workdir.into(),
            runner,
        }
    }

    /// The working directory commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Check if git is available
    pub fn is_available(&self) -> bool {
        self.run(&["--version"]).is_ok()
    }

    /// Initialize an empty repository in the working directory
    pub fn init(&self) -> Result<CommandOutput> {
        self.run(&["init"])
    }

    /// List the names of the configured remotes
    pub fn remotes(&self) -> Result<Vec<String>> {
        let output = self.run(&["remote"])?;
        Ok(output
            .stdout
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }

    /// Register a remote with a fetch URL and a tracking-branch hint
    pub fn remote_add(&self, name: &str, branch: &str, url: &str) -> Result<CommandOutput> {
        self.run(&["remote", "add", "-m", branch, name, url])
    }

    /// Add an explicit push URL override to an existing remote
    pub fn remote_add_push_url(&self, name: &str, url: &str) -> Result<CommandOutput> {
        self.run(&["remote", "set-url", "--add", "--push", name, url])
    }

    /// The fetch URL configured for a remote
    pub fn remote_url(&self, name: &str) -> Result<String> {
        let output = self.run(&["remote", "get-url", name])?;
        Ok(output.stdout.trim().to_string())
    }

    /// The push URL configured for a remote
    pub fn remote_push_url(&self, name: &str) -> Result<String> {
        let output = self.run(&["remote", "get-url", "--push", name])?;
        Ok(output.stdout.trim().to_string())
    }

    /// Fetch exactly one ref from the named remote
    pub fn fetch(&self, remote: &str, refspec: &str) -> Result<CommandOutput> {
        self.run(&["fetch", remote, refspec])
    }

    /// Resolve a revision to a full object name
    pub fn rev_parse(&self, revision: &str) -> Result<String> {
        let output = self.run(&["rev-parse", revision])?;
        Ok(output.stdout.trim().to_string())
    }

    /// Check out a revision, detaching the working tree when it is not a
    /// local branch name
    pub fn checkout(&self, revision: &str) -> Result<CommandOutput> {
        self.run(&["checkout", revision])
    }

    // --- Private helpers ---

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.runner.run(args, &self.workdir)?;

        if !output.success {
            return Err(Error::CommandFailed {
                command: format!("git {}", args.join(" ")),
                status: output.status.unwrap_or(-1),
                output: output.combined(),
            });
        }

        Ok(output)
    }
}
