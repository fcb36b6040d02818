//! Artifact output.
//!
//! All three artifacts are staged as temporary files inside the output
//! directory and only then renamed over their final names, so a failure
//! while staging leaves any previous output untouched. A replaced file keeps
//! its permissions; new files are world-readable (`0644` on Unix).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::emitter::Artifacts;
use crate::error::Error;

/// Writes `artifacts` into `out_dir`, creating it if needed.
///
/// Returns the paths written, in write order.
///
/// # Errors
///
/// Returns [`Error::Output`] if the directory cannot be created or a file
/// cannot be staged or persisted.
pub fn write_artifacts(out_dir: &Path, artifacts: &Artifacts) -> Result<Vec<PathBuf>, Error> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Error::Output { path, source }
    };

    fs::create_dir_all(out_dir).map_err(io_error(out_dir))?;

    let mut staged = Vec::with_capacity(3);
    for (name, content) in artifacts.files() {
        let target = out_dir.join(name);
        let mut file = NamedTempFile::new_in(out_dir).map_err(io_error(&target))?;
        if let Some(permissions) = artifact_permissions(&target) {
            file.as_file()
                .set_permissions(permissions)
                .map_err(io_error(&target))?;
        }
        file.write_all(content.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(io_error(&target))?;
        staged.push((file, target));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (file, target) in staged {
        file.persist(&target).map_err(|err| Error::Output {
            path: target.clone(),
            source: err.error,
        })?;
        tracing::info!(path = %target.display(), "written");
        written.push(target);
    }
    Ok(written)
}

// Staged files are created owner-only; the final artifact should not be.
fn artifact_permissions(target: &Path) -> Option<fs::Permissions> {
    match fs::metadata(target) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
