//! Internal implementation for writer module

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::artifact::Artifact;
use crate::catalog::{Catalog, DuplicatePolicy};
use crate::error::{ScaffoldError, ScaffoldResult, WriteFailure};

// =============================================================================
// Types
// =============================================================================

/// Knobs for a catalog run
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub duplicates: DuplicatePolicy,
    /// Validate and classify only; never touch the filesystem
    pub dry_run: bool,
}

/// What happened (or would happen) to a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Created,
    Overwritten,
    Unchanged,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Created => "created",
            Outcome::Overwritten => "overwritten",
            Outcome::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenArtifact {
    pub relative_path: String,
    pub path: PathBuf,
    pub outcome: Outcome,
    pub bytes: usize,
    pub sha256: String,
}

/// Result of a successful catalog run
#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub generated_at: DateTime<Utc>,
    pub artifacts: Vec<WrittenArtifact>,
}

impl WriteReport {
    /// Number of artifacts written (or planned, for a dry run)
    pub fn count(&self) -> usize {
        self.artifacts.len()
    }

    pub fn count_outcome(&self, outcome: Outcome) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == outcome)
            .count()
    }
}

/// On-disk state of a target compared with its artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactState {
    /// File matches the normalized template
    Current,
    /// File exists with different content
    Stale,
    /// Nothing at the target
    Missing,
    /// A directory sits at the target, or a file sits in an ancestor segment
    Blocked,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub relative_path: String,
    pub path: PathBuf,
    pub state: ArtifactState,
}

// =============================================================================
// Single Artifact
// =============================================================================

pub fn write_artifact(root: &Path, artifact: &Artifact) -> ScaffoldResult<WrittenArtifact> {
    let relative = artifact.normalized_path()?;
    let target = root.join(&relative);
    let content = artifact.content();
    // An unreadable target surfaces as a write error below
    let outcome = classify(&target, &content).unwrap_or(Outcome::Created);

    // Artifacts directly in root skip directory creation
    if let Some(parent) = relative.parent().filter(|p| !p.as_os_str().is_empty()) {
        let dir = root.join(parent);
        fs::create_dir_all(&dir).map_err(|e| ScaffoldError::io(&dir, e))?;
    }

    write_file(&target, &content).map_err(|e| ScaffoldError::io(&target, e))?;
    debug!("{} {}", outcome.label(), target.display());

    Ok(written(artifact, target, outcome, &content))
}

/// Fails exactly where `write_artifact` would: a directory at the target
/// or a non-directory in an ancestor segment.
pub fn plan_artifact(root: &Path, artifact: &Artifact) -> ScaffoldResult<WrittenArtifact> {
    let relative = artifact.normalized_path()?;
    let target = root.join(&relative);
    if let Some(blocker) = find_blocker(root, &relative) {
        return Err(blocker.into_error());
    }

    let content = artifact.content();
    let outcome = classify(&target, &content).map_err(|e| ScaffoldError::io(&target, e))?;
    Ok(written(artifact, target, outcome, &content))
}

/// Truncate and write; the handle is closed when `file` drops on every path.
fn write_file(target: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(target)?;
    file.write_all(content.as_bytes())?;
    file.flush()
}

fn classify(target: &Path, content: &str) -> io::Result<Outcome> {
    match fs::read(target) {
        Ok(existing) if existing == content.as_bytes() => Ok(Outcome::Unchanged),
        Ok(_) => Ok(Outcome::Overwritten),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Outcome::Created),
        Err(e) => Err(e),
    }
}

/// Something on disk that keeps a file from being written at a target
#[derive(Debug, PartialEq, Eq)]
enum Blocker {
    /// A root or ancestor segment exists but is not a directory
    NotADirectory(PathBuf),
    /// A directory sits at the target itself
    DirectoryAtTarget(PathBuf),
}

impl Blocker {
    fn into_error(self) -> ScaffoldError {
        match self {
            Blocker::NotADirectory(path) => ScaffoldError::io(
                &path,
                io::Error::new(io::ErrorKind::AlreadyExists, "exists and is not a directory"),
            ),
            Blocker::DirectoryAtTarget(path) => ScaffoldError::io(
                &path,
                io::Error::new(io::ErrorKind::AlreadyExists, "a directory occupies the target"),
            ),
        }
    }
}

/// Walk from `root` down to the target's parent, then look at the target.
fn find_blocker(root: &Path, relative: &Path) -> Option<Blocker> {
    let mut dir = root.to_path_buf();
    let parents = relative.parent().into_iter().flat_map(|p| p.components());
    for segment in std::iter::once(None).chain(parents.map(Some)) {
        if let Some(segment) = segment {
            dir.push(segment);
        }
        match fs::metadata(&dir) {
            Ok(meta) if !meta.is_dir() => return Some(Blocker::NotADirectory(dir)),
            Ok(_) => {}
            // Missing from here down; create_dir_all will make the rest
            Err(_) => return None,
        }
    }

    let target = root.join(relative);
    if target.is_dir() {
        Some(Blocker::DirectoryAtTarget(target))
    } else {
        None
    }
}

fn written(artifact: &Artifact, path: PathBuf, outcome: Outcome, content: &str) -> WrittenArtifact {
    WrittenArtifact {
        relative_path: artifact.relative_path().to_string(),
        path,
        outcome,
        bytes: content.len(),
        sha256: sha256_hex(content.as_bytes()),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// =============================================================================
// Catalog
// =============================================================================

pub fn write_catalog(
    root: &Path,
    catalog: &Catalog,
    options: &WriteOptions,
) -> Result<WriteReport, WriteFailure> {
    catalog.check(options.duplicates).map_err(|source| WriteFailure {
        written: 0,
        path: source.subject(),
        source,
    })?;

    if !options.dry_run {
        fs::create_dir_all(root).map_err(|e| WriteFailure {
            written: 0,
            path: root.display().to_string(),
            source: ScaffoldError::io(root, e),
        })?;
    }

    let mut artifacts = Vec::with_capacity(catalog.len());
    for artifact in catalog {
        let result = if options.dry_run {
            plan_artifact(root, artifact)
        } else {
            write_artifact(root, artifact)
        };

        match result {
            Ok(done) => artifacts.push(done),
            Err(source) => {
                return Err(WriteFailure {
                    written: if options.dry_run { 0 } else { artifacts.len() },
                    path: artifact.relative_path().to_string(),
                    source,
                });
            }
        }
    }

    info!(
        "{} {} artifact(s) under {}",
        if options.dry_run { "planned" } else { "wrote" },
        artifacts.len(),
        root.display()
    );

    Ok(WriteReport {
        root: root.to_path_buf(),
        dry_run: options.dry_run,
        generated_at: Utc::now(),
        artifacts,
    })
}

// =============================================================================
// Status
// =============================================================================

/// One entry per target. With duplicate paths only the last declaration is
/// reported, since that is what a last-wins run leaves on disk.
pub fn status(root: &Path, catalog: &Catalog) -> ScaffoldResult<Vec<ArtifactStatus>> {
    let mut last_index = HashMap::new();
    for (index, artifact) in catalog.iter().enumerate() {
        last_index.insert(artifact.normalized_path()?, index);
    }

    let mut statuses = Vec::with_capacity(last_index.len());
    for (index, artifact) in catalog.iter().enumerate() {
        let relative = artifact.normalized_path()?;
        if last_index.get(&relative) != Some(&index) {
            continue;
        }

        let path = root.join(&relative);
        let state = if find_blocker(root, &relative).is_some() {
            ArtifactState::Blocked
        } else {
            match fs::read(&path) {
                Ok(existing) if existing == artifact.content().as_bytes() => {
                    ArtifactState::Current
                }
                Ok(_) => ArtifactState::Stale,
                Err(e) if e.kind() == io::ErrorKind::NotFound => ArtifactState::Missing,
                Err(e) => return Err(ScaffoldError::io(&path, e)),
            }
        };
        statuses.push(ArtifactStatus {
            relative_path: artifact.relative_path().to_string(),
            path,
            state,
        });
    }
    Ok(statuses)
}
