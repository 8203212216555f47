//! External repository synchronization
//!
//! Every operation delegates to the git CLI through the gitcli wrapper;
//! failures propagate unchanged and abort the whole run. There is no
//! retry and no rollback: a failure partway through a multi-external run
//! leaves earlier externals updated and later ones untouched.

use crate::manifest::{ExternalSpec, Manifest};
use crate::{ExternalsError, Result};
use gitcli::{CommandRunner, Git};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of the lookup-or-create remote registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    /// The remote was absent and has been created
    Created,

    /// The remote existed and its URLs match the manifest
    Validated,
}

/// Handle for one external repository
#[derive(Debug)]
pub struct ExternalRepo {
    /// Manifest entry this handle realizes
    spec: ExternalSpec,

    /// Absolute working-tree location (manifest directory + entry path)
    workdir: PathBuf,

    /// Git wrapper bound to the working tree
    git: Git,
}

impl ExternalRepo {
    /// Create a handle for a manifest entry, resolving its path against
    /// the manifest file's directory
    pub fn new(base: &Path, spec: ExternalSpec) -> Self {
        let workdir = base.join(&spec.path);
        let git = Git::new(workdir.clone());
        Self { spec, workdir, git }
    }

    /// Create a handle with a substitute command runner
    pub fn with_runner(
        base: &Path,
        spec: ExternalSpec,
        runner: Arc<dyn CommandRunner + Send + Sync>,
    ) -> Self {
        let workdir = base.join(&spec.path);
        let git = Git::with_runner(workdir.clone(), runner);
        Self { spec, workdir, git }
    }

    /// The manifest entry this handle realizes
    pub fn spec(&self) -> &ExternalSpec {
        &self.spec
    }

    /// The absolute working-tree location
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Create the working directory and initialize an empty repository,
    /// both no-ops when already present
    pub fn init(&self) -> Result<()> {
        if !self.workdir.exists() {
            std::fs::create_dir_all(&self.workdir)?;
        }

        if !self.workdir.join(".git").exists() {
            self.git.init()?;
        }

        Ok(())
    }

    /// Register the manifest's remote, or validate an existing one
    ///
    /// When a remote of the declared name already exists, its fetch URL
    /// (and push URL, when the manifest declares one) must exactly match
    /// the manifest; a mismatch fails rather than silently fetching from
    /// or pushing to the wrong origin after a manifest edit.
    pub fn ensure_remote(&self) -> Result<RemoteState> {
        let name = self.spec.remote_name();
        let remotes = self.git.remotes()?;

        if !remotes.iter().any(|r| r == name) {
            self.git
                .remote_add(name, &self.spec.revision, &self.spec.fetchurl)?;

            if let Some(pushurl) = &self.spec.pushurl {
                self.git.remote_add_push_url(name, pushurl)?;
            }

            return Ok(RemoteState::Created);
        }

        let existing_fetch = self.git.remote_url(name)?;
        if existing_fetch != self.spec.fetchurl {
            return Err(ExternalsError::RemoteMismatch {
                name: name.to_string(),
                kind: "fetch",
                existing: existing_fetch,
                declared: self.spec.fetchurl.clone(),
            });
        }

        if let Some(declared_push) = &self.spec.pushurl {
            let existing_push = self.git.remote_push_url(name)?;
            if &existing_push != declared_push {
                return Err(ExternalsError::RemoteMismatch {
                    name: name.to_string(),
                    kind: "push",
                    existing: existing_push,
                    declared: declared_push.clone(),
                });
            }
        }

        Ok(RemoteState::Validated)
    }

    /// Fetch exactly the declared revision ref from the declared remote
    pub fn fetch(&self) -> Result<()> {
        self.git.fetch(self.spec.remote_name(), &self.spec.revision)?;
        Ok(())
    }

    /// Resolve the declared revision to a commit hash
    ///
    /// Prefers the ref under the configured remote (`<name>/<revision>`);
    /// falls back to resolving `<revision>` directly when the namespaced
    /// form does not exist, which covers tags and raw hashes. When both
    /// forms fail, the error carries both failures.
    pub fn resolve_revision(&self) -> Result<String> {
        let name = self.spec.remote_name();
        let revision = &self.spec.revision;

        match self.git.rev_parse(&format!("{}/{}", name, revision)) {
            Ok(rev) => Ok(rev),
            Err(remote_err) => match self.git.rev_parse(revision) {
                Ok(rev) => Ok(rev),
                Err(direct_err) => Err(ExternalsError::Resolve {
                    revision: revision.clone(),
                    remote_attempt: remote_err.to_string(),
                    direct_attempt: direct_err.to_string(),
                }),
            },
        }
    }

    /// Resolve the declared revision and check it out, detaching the
    /// working tree at that commit
    pub fn checkout(&self) -> Result<()> {
        let rev = self.resolve_revision()?;
        self.git.checkout(&rev)?;
        Ok(())
    }

    /// Run the full synchronization sequence
    ///
    /// Every step is a no-op or a consistency check when its work is
    /// already done, so repeated runs against an unchanged remote leave
    /// the working tree at the same commit.
    pub fn checkout_and_update(&self) -> Result<()> {
        tracing::debug!(path = %self.workdir.display(), "Synchronizing external");

        self.init()?;
        self.ensure_remote()?;
        self.fetch()?;
        self.checkout()?;

        tracing::info!(path = %self.workdir.display(), revision = %self.spec.revision, "External synchronized");
        Ok(())
    }

    /// The manifest representation of this external, with the revision
    /// replaced by the commit hash it currently resolves to when asked
    pub fn resolved_spec(&self, resolve_sha1: bool) -> Result<ExternalSpec> {
        let mut spec = self.spec.clone();

        if resolve_sha1 {
            spec.revision = self.resolve_revision()?;
        }

        Ok(spec)
    }
}

/// Sequential driver over every external in a manifest
#[derive(Debug)]
pub struct Externals {
    repos: Vec<ExternalRepo>,
}

impl Externals {
    /// Load a manifest and build one handle per entry
    ///
    /// Entry paths are resolved against the manifest file's own
    /// directory, never against the process working directory.
    pub fn load(config: impl AsRef<Path>) -> Result<Self> {
        let config = config.as_ref();
        let manifest = Manifest::load(config)?;
        let base = manifest_dir(config)?;

        let repos = manifest
            .externals
            .into_iter()
            .map(|spec| ExternalRepo::new(&base, spec))
            .collect();

        Ok(Self { repos })
    }

    /// Load a manifest and build handles over a substitute command runner
    pub fn with_runner(
        config: impl AsRef<Path>,
        runner: Arc<dyn CommandRunner + Send + Sync>,
    ) -> Result<Self> {
        let config = config.as_ref();
        let manifest = Manifest::load(config)?;
        let base = manifest_dir(config)?;

        let repos = manifest
            .externals
            .into_iter()
            .map(|spec| ExternalRepo::with_runner(&base, spec, runner.clone()))
            .collect();

        Ok(Self { repos })
    }

    /// The handles, in manifest order
    pub fn repos(&self) -> &[ExternalRepo] {
        &self.repos
    }

    /// Synchronize every external, in manifest order, aborting on the
    /// first failure
    pub fn fetch(&self) -> Result<()> {
        for repo in &self.repos {
            repo.checkout_and_update()?;
        }
        Ok(())
    }

    /// The manifest, with revisions optionally resolved to commit hashes
    pub fn manifest(&self, resolve_sha1: bool) -> Result<Manifest> {
        let mut externals = Vec::with_capacity(self.repos.len());
        for repo in &self.repos {
            externals.push(repo.resolved_spec(resolve_sha1)?);
        }
        Ok(Manifest { externals })
    }

    /// Serialize the manifest for `dump`
    pub fn dump(&self, resolve_sha1: bool) -> Result<String> {
        self.manifest(resolve_sha1)?.to_json()
    }
}

/// The directory the manifest lives in, fully resolved
fn manifest_dir(config: &Path) -> Result<PathBuf> {
    let resolved = config.canonicalize()?;
    resolved
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            ExternalsError::Config(format!(
                "Manifest path has no parent directory: {}",
                config.display()
            ))
        })
}
