//! Loading and saving templates on disk.
//!
//! `load` maps a directory tree into a model; `save` writes a model back.
//! Saves are staged: the whole tree is written into a temporary directory
//! next to the root and promoted file-by-file only once every write has
//! succeeded, so a failed save never leaves a partially written tree as
//! the current state.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TdkError};
use crate::store::layout;
use crate::template::descriptor::{Descriptor, DESCRIPTOR_FILE};
use crate::template::model::TemplateModel;

/// How `save` treats local paths absent from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Leave unknown local files in place.
    Merge,
    /// Remove local template content absent from the model. Used only by
    /// authoritative syncs (e.g. after `get`); excluded entries such as
    /// `.git` and the `.tdk` work directory are never pruned.
    Prune,
}

/// Whether a directory carries a template descriptor.
pub fn is_template_root(root: &Path) -> bool {
    root.join(DESCRIPTOR_FILE).is_file()
}

/// Load the template rooted at `root`.
///
/// Fails with `NotATemplate` when the descriptor is absent and
/// `MalformedDescriptor` when it cannot be parsed. Walked paths
/// referenced by a format descriptor load as template files; everything
/// else loads as an asset.
pub fn load(root: &Path) -> Result<TemplateModel> {
    let descriptor_path = root.join(DESCRIPTOR_FILE);
    if !descriptor_path.is_file() {
        return Err(TdkError::NotATemplate {
            root: root.to_path_buf(),
        });
    }

    let bytes = fs::read(&descriptor_path)?;
    let descriptor = Descriptor::parse(&bytes, &descriptor_path)?;
    let format_files: BTreeSet<String> =
        descriptor.formats.iter().map(|d| d.file.clone()).collect();
    let mut model = descriptor.into_model();

    for rel in layout::walk(root)? {
        let content = fs::read(root.join(&rel))?;
        if format_files.contains(&rel) {
            model.add_file(rel, content)?;
        } else {
            model.add_asset(rel, content)?;
        }
    }

    tracing::debug!(
        identifier = %model.identifier,
        files = model.files().len(),
        assets = model.assets().len(),
        "loaded template from {}",
        root.display()
    );

    Ok(model)
}

/// Save a model into `root`, creating missing directories.
///
/// All content is staged first and promoted on full success. With
/// [`SaveMode::Prune`], local template content absent from the model is
/// removed after promotion.
pub fn save(root: &Path, model: &TemplateModel, mode: SaveMode) -> Result<()> {
    let parent = root.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)?;
    }

    let staging = tempfile::Builder::new()
        .prefix(".tdk-staging-")
        .tempdir_in(parent.unwrap_or_else(|| Path::new(".")))?;

    stage(staging.path(), model)?;

    fs::create_dir_all(root)?;
    promote(staging.path(), root)?;

    if mode == SaveMode::Prune {
        prune(root, model)?;
    }

    tracing::debug!(
        identifier = %model.identifier,
        mode = ?mode,
        "saved template to {}",
        root.display()
    );

    Ok(())
}

/// Write the full tree into the staging directory.
fn stage(staging: &Path, model: &TemplateModel) -> Result<()> {
    let descriptor = Descriptor::from_model(model);
    fs::write(staging.join(DESCRIPTOR_FILE), descriptor.to_bytes()?)?;

    for (rel, content) in model.files().iter().chain(model.assets()) {
        let target = staging.join(rel);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(target, content)?;
    }
    Ok(())
}

/// Move every staged file onto its final path.
fn promote(staging: &Path, root: &Path) -> Result<()> {
    let mut pending = vec![PathBuf::new()];
    while let Some(rel) = pending.pop() {
        for entry in fs::read_dir(staging.join(&rel))? {
            let entry = entry?;
            let entry_rel = rel.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                fs::create_dir_all(root.join(&entry_rel))?;
                pending.push(entry_rel);
            } else {
                let target = root.join(&entry_rel);
                if target.exists() {
                    fs::remove_file(&target)?;
                }
                fs::rename(entry.path(), target)?;
            }
        }
    }
    Ok(())
}

/// Remove local template content absent from the model.
fn prune(root: &Path, model: &TemplateModel) -> Result<()> {
    let keep: BTreeSet<&str> = model
        .files()
        .keys()
        .chain(model.assets().keys())
        .map(String::as_str)
        .collect();

    for rel in layout::walk(root)? {
        if !keep.contains(rel.as_str()) {
            tracing::debug!("pruning stale file {}", rel);
            fs::remove_file(root.join(&rel))?;
        }
    }

    remove_empty_dirs(root)?;
    Ok(())
}

/// Drop directories emptied by pruning; the root itself stays.
fn remove_empty_dirs(dir: &Path) -> Result<bool> {
    let mut empty = true;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_str().is_some_and(layout::is_excluded) {
            empty = false;
            continue;
        }
        if entry.file_type()?.is_dir() {
            if remove_empty_dirs(&entry.path())? {
                fs::remove_dir(entry.path())?;
            } else {
                empty = false;
            }
        } else {
            empty = false;
        }
    }
    Ok(empty)
}
