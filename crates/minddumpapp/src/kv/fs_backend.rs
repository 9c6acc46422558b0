use super::backend::KvBackend;
use crate::error::{MindDumpError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsKv {
    root: PathBuf,
}

impl FsKv {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`: `@mind_dump_entries` → `<root>/mind_dump_entries.json`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key_file_stem(key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MindDumpError::Io)?;
        }
        Ok(())
    }
}

fn key_file_stem(key: &str) -> String {
    let stem: String = key
        .strip_prefix('@')
        .unwrap_or(key)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

impl KvBackend for FsKv {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MindDumpError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.key_path(key);

        // Atomic Write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", key_file_stem(key), Uuid::new_v4()));
        fs::write(&tmp, value).map_err(MindDumpError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(MindDumpError::Io(e));
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MindDumpError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_stems_are_filesystem_safe() {
        assert_eq!(key_file_stem("@mind_dump_entries"), "mind_dump_entries");
        assert_eq!(key_file_stem("a/b c"), "a_b_c");
        assert_eq!(key_file_stem("@"), "_");
    }

    #[test]
    fn key_path_lives_under_root() {
        let kv = FsKv::new(PathBuf::from("/data"));
        assert_eq!(
            kv.key_path("@mind_dump_entries"),
            PathBuf::from("/data/mind_dump_entries.json")
        );
    }
}
