//! Writing generated units to disk.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::synth::naming::Names;
use crate::{BANNER_PREFIX, GeneratedUnit};

const SOURCE_SUFFIX: &str = ".gen.rs";

/// Writes `<id>.gen.rs` into `dir`, creating the directory when needed.
///
/// Units that share a directory are usually included into one module, so a
/// unit whose item names match those of another package already written
/// there is refused.
///
/// # Errors
///
/// Returns [`GenerateError::NameClash`] when another generated file in
/// `dir` defines the same item names, and [`GenerateError::WriteOutput`]
/// when the directory or file cannot be written.
pub fn write_source(unit: &GeneratedUnit, dir: &Utf8Path) -> GenerateResult<Utf8PathBuf> {
    reject_name_clashes(unit, dir)?;
    write_file(&dir.join(unit.file_name()), &unit.render())
}

fn reject_name_clashes(unit: &GeneratedUnit, dir: &Utf8Path) -> GenerateResult<()> {
    let Ok(entries) = dir.read_dir_utf8() else {
        // Nothing has been written yet.
        return Ok(());
    };
    let id = unit.package().id.as_str();
    let names = Names::new(id);
    for entry in entries.flatten() {
        if !entry.file_name().ends_with(SOURCE_SUFFIX) {
            continue;
        }
        let Ok(contents) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        let Some(existing) = banner_package_id(&contents) else {
            continue;
        };
        if existing != id && Names::new(existing).collides_with(&names) {
            return Err(GenerateError::NameClash {
                id: id.to_owned(),
                existing: existing.to_owned(),
                path: entry.path().to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Package identifier recorded in a rendered source's banner.
fn banner_package_id(contents: &str) -> Option<&str> {
    let banner = contents.lines().next()?.strip_prefix(BANNER_PREFIX)?;
    let (_, tail) = banner.rsplit_once("package `")?;
    tail.split_once('`').map(|(id, _)| id)
}

/// Writes `<id>_example.yaml` into `dir`, creating the directory when
/// needed.
///
/// # Errors
///
/// Returns [`GenerateError::WriteOutput`] when the directory or file cannot
/// be written.
pub fn write_example(unit: &GeneratedUnit, dir: &Utf8Path) -> GenerateResult<Utf8PathBuf> {
    write_file(&dir.join(unit.example_file_name()), &unit.example())
}

fn write_file(path: &Utf8Path, contents: &str) -> GenerateResult<Utf8PathBuf> {
    let to_error = |source| GenerateError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        debug!(%path, "generated file unchanged");
        return Ok(path.to_path_buf());
    }
    std::fs::write(path, contents).map_err(to_error)?;
    debug!(%path, bytes = contents.len(), "wrote generated file");
    Ok(path.to_path_buf())
}
