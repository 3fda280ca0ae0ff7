//! Output directory setup: asset directories are copied in fresh on every
//! build.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::error::{Result, SiteError};

/// What [`init_environment`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub output_dir: Utf8PathBuf,
    /// Destination of every copied directory
    pub copied: Vec<Utf8PathBuf>,
    /// Configured directories that do not exist
    pub skipped: Vec<Utf8PathBuf>,
    /// Directories that already are their own destination
    pub in_place: Vec<Utf8PathBuf>,
}

impl Environment {
    pub fn summary(&self) -> String {
        format!("Environment setup complete in {}", self.output_dir)
    }
}

/// Create `output` and copy each of `assets` into it under its own name,
/// replacing any previous copy. Missing asset directories are skipped, and
/// so are directories that already sit at their destination. An asset is
/// never deleted: copying a directory into itself, or into a destination
/// that contains it, is an error.
pub fn init_environment(output: &Utf8Path, assets: &[Utf8PathBuf]) -> Result<Environment> {
    fs_err::create_dir_all(output)?;
    info!("Created output directory: {output}");
    let output_real = output.canonicalize_utf8()?;

    let mut env = Environment {
        output_dir: output.to_owned(),
        ..Default::default()
    };

    for source in assets {
        if !source.exists() {
            debug!(%source, "asset directory missing, skipped");
            env.skipped.push(source.clone());
            continue;
        }
        if !source.is_dir() {
            return Err(SiteError::NotADirectory(source.clone()));
        }
        let Some(name) = source.file_name() else {
            return Err(SiteError::NotADirectory(source.clone()));
        };
        let dest = output.join(name);

        let source_real = source.canonicalize_utf8()?;
        let dest_real = output_real.join(name);
        if dest_real == source_real {
            debug!(%source, "asset directory already in place");
            env.in_place.push(dest);
            continue;
        }
        if output_real.starts_with(&source_real) {
            return Err(SiteError::CopyIntoSelf(source.clone()));
        }
        if source_real.starts_with(&dest_real) {
            return Err(SiteError::AssetInsideDestination {
                asset: source.clone(),
                dest,
            });
        }

        if dest.exists() {
            fs_err::remove_dir_all(&dest)?;
        }
        let files = copy_dir(source, &dest)?;
        info!("Copied {source} to {dest} ({files} files)");
        env.copied.push(dest);
    }

    Ok(env)
}

/// Recursive copy; returns the number of files written.
fn copy_dir(from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    fs_err::create_dir_all(to)?;
    let mut files = 0;
    for entry in from.read_dir_utf8()? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            files += copy_dir(entry.path(), &target)?;
        } else {
            fs_err::copy(entry.path(), &target)?;
            files += 1;
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test_log::test]
    fn test_copies_nested_directories() {
        let (_dir, root) = tmp();
        let scripts = root.join("scripts");
        fs_err::create_dir_all(scripts.join("vendor")).unwrap();
        fs_err::write(scripts.join("app.js"), "console.log(1)").unwrap();
        fs_err::write(scripts.join("vendor/cm.js"), "cm").unwrap();

        let out = root.join("out");
        let env = init_environment(&out, &[scripts, root.join("missing")]).unwrap();

        assert_eq!(env.copied, [out.join("scripts")]);
        assert_eq!(env.skipped, [root.join("missing")]);
        assert_eq!(fs_err::read_to_string(out.join("scripts/vendor/cm.js")).unwrap(), "cm");
        assert_eq!(env.summary(), format!("Environment setup complete in {out}"));
    }

    #[test_log::test]
    fn test_replaces_previous_copy() {
        let (_dir, root) = tmp();
        let assets = root.join("assets");
        fs_err::create_dir_all(&assets).unwrap();
        fs_err::write(assets.join("new.txt"), "new").unwrap();

        let out = root.join("out");
        fs_err::create_dir_all(out.join("assets")).unwrap();
        fs_err::write(out.join("assets/stale.txt"), "old").unwrap();

        init_environment(&out, &[assets]).unwrap();
        assert!(out.join("assets/new.txt").exists());
        assert!(!out.join("assets/stale.txt").exists());
    }

    #[test]
    fn test_rejects_copying_into_itself() {
        let (_dir, root) = tmp();
        let out = root.join("site/output");
        fs_err::create_dir_all(&out).unwrap();
        let err = init_environment(&out, &[root.join("site")]).unwrap_err();
        assert!(matches!(err, SiteError::CopyIntoSelf(_)));
    }

    #[test_log::test]
    fn test_output_at_project_root_keeps_sources() {
        let (_dir, root) = tmp();
        let scripts = root.join("scripts");
        fs_err::create_dir_all(&scripts).unwrap();
        fs_err::write(scripts.join("app.js"), "// app").unwrap();

        let env = init_environment(&root, &[scripts.clone()]).unwrap();
        assert!(env.copied.is_empty());
        assert_eq!(env.in_place, [root.join("scripts")]);
        assert_eq!(fs_err::read_to_string(scripts.join("app.js")).unwrap(), "// app");

        let env = init_environment(&root.join("."), &[scripts.clone()]).unwrap();
        assert_eq!(env.in_place.len(), 1);
        assert!(scripts.join("app.js").exists());
    }

    #[test]
    fn test_rejects_asset_inside_its_destination() {
        let (_dir, root) = tmp();
        let nested = root.join("js/js");
        fs_err::create_dir_all(&nested).unwrap();
        fs_err::write(nested.join("app.js"), "// app").unwrap();

        let err = init_environment(&root, &[nested.clone()]).unwrap_err();
        assert!(matches!(err, SiteError::AssetInsideDestination { .. }));
        assert!(nested.join("app.js").exists());
    }

    #[test]
    fn test_rejects_plain_files() {
        let (_dir, root) = tmp();
        fs_err::write(root.join("notes.txt"), "x").unwrap();
        let err = init_environment(&root.join("out"), &[root.join("notes.txt")]).unwrap_err();
        assert!(matches!(err, SiteError::NotADirectory(_)));
    }
}
