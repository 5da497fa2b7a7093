use crate::FactsError;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

/// Private copy of the terraform configuration, removed on drop.
///
/// Local state, plugin caches and lock files are left behind so concurrent runs never share them.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl ScratchWorkspace {
    pub fn copy_from(source: &Utf8Path) -> Result<Self, FactsError> {
        if !source.is_dir() {
            return Err(FactsError::Io {
                context: format!("terraform config dir {source}"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let dir = tempfile::Builder::new()
            .prefix("spokecheck-")
            .tempdir()
            .map_err(|source| FactsError::Io {
                context: "create scratch workspace".to_string(),
                source,
            })?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).map_err(|p| {
            FactsError::Io {
                context: format!("scratch workspace path {} is not UTF-8", p.display()),
                source: std::io::Error::from(std::io::ErrorKind::InvalidData),
            }
        })?;

        let mut copied = 0usize;
        let walker = WalkDir::new(source)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_local_state(e.file_name().to_str().unwrap_or("")));
        for entry in walker {
            let entry = entry.map_err(|err| FactsError::Io {
                context: format!("walk {source}"),
                source: err.into(),
            })?;
            let rel = entry
                .path()
                .strip_prefix(source.as_std_path())
                .unwrap_or(entry.path());
            if rel.as_os_str().is_empty() {
                continue;
            }
            let dest = dir.path().join(rel);
            let io = |source| FactsError::Io {
                context: format!("copy {}", entry.path().display()),
                source,
            };
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest).map_err(io)?;
            } else {
                std::fs::copy(entry.path(), &dest).map_err(io)?;
                copied += 1;
            }
        }

        debug!(from = %source, to = %root, files = copied, "prepared scratch workspace");
        Ok(Self { dir, root })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Remove the workspace now, reporting failures instead of ignoring them.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

fn is_local_state(name: &str) -> bool {
    name == ".terraform"
        || name == ".terraform.lock.hcl"
        || name == "terraform.tfstate.d"
        || name.ends_with(".tfstate")
        || name.ends_with(".tfstate.backup")
}
