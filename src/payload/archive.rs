//! Tar archiving for directory payloads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{Archive, Archiver};
use crate::error::{Result, StegoError};

/// Tar codec. Entries are rooted at the directory's own name, so unpacking
/// into `dest` recreates `dest/<name>/...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tar;

impl Archiver for Tar {
    fn archive(&self, dir: &Path) -> Result<Archive> {
        archive_dir(dir)
    }

    fn unarchive(&self, bytes: &[u8], dest: &Path) -> Result<PathBuf> {
        unpack(bytes, dest)
    }
}

/// Archives `dir` into an in-memory tar stream.
pub fn archive_dir(dir: &Path) -> Result<Archive> {
    if !dir.is_dir() {
        return Err(StegoError::InvalidInput(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let name = base_name(dir)?;
    let mut builder = tar::Builder::new(Vec::new());
    builder.follow_symlinks(false);
    builder.append_dir_all(&name, dir)?;
    let bytes = builder.into_inner()?;

    Ok(Archive {
        bytes,
        file_count: count_files(dir)?,
    })
}

/// Unpacks a tar stream into `dest`, returning the path of its top-level
/// entry.
pub fn unpack(bytes: &[u8], dest: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest)?;

    let corrupt = |e: io::Error| StegoError::CorruptPayload(format!("Unarchive failed: {}", e));
    let mut archive = tar::Archive::new(bytes);
    let mut root = None;

    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if root.is_none() {
            let path = entry.path().map_err(corrupt)?;
            root = path.components().next().map(|first| dest.join(first));
        }
        // Entries escaping `dest` are skipped by `unpack_in`.
        entry.unpack_in(dest).map_err(corrupt)?;
    }

    Ok(root.unwrap_or_else(|| dest.to_path_buf()))
}

/// Number of non-directory entries below `dir`, recursively.
pub fn count_files(dir: &Path) -> Result<u64> {
    let mut count = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_dir() {
            count += 1;
        }
    }
    Ok(count)
}

/// Total size of regular files below `dir`.
pub fn total_size(dir: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(total)
}

/// Final path component, resolving `.` and trailing separators.
pub fn base_name(path: &Path) -> Result<String> {
    let name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => path
            .canonicalize()?
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| {
                StegoError::InvalidInput(format!("Path has no name: {}", path.display()))
            })?,
    };
    Ok(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_tree(root: &Path) -> PathBuf {
        let dir = root.join("project");
        fs::create_dir_all(dir.join("sub/deeper")).unwrap();
        fs::write(dir.join("file1.txt"), "File 1").unwrap();
        fs::write(dir.join("file2.txt"), "File 2").unwrap();
        fs::write(dir.join("sub/deeper/data.bin"), [0u8, 1, 2, 255]).unwrap();
        dir
    }

    #[test]
    fn test_count_files() {
        let tmp = tempdir().unwrap();
        let dir = sample_tree(tmp.path());
        assert_eq!(count_files(&dir).unwrap(), 3);
        assert_eq!(total_size(&dir).unwrap(), 6 + 6 + 4);
    }

    #[test]
    fn test_archive_and_unpack() {
        let tmp = tempdir().unwrap();
        let dir = sample_tree(tmp.path());

        let archive = Tar.archive(&dir).unwrap();
        assert_eq!(archive.file_count, 3);
        assert!(!archive.bytes.is_empty());

        let dest = tmp.path().join("restored");
        let root = Tar.unarchive(&archive.bytes, &dest).unwrap();
        assert_eq!(root, dest.join("project"));
        assert_eq!(fs::read_to_string(root.join("file1.txt")).unwrap(), "File 1");
        assert_eq!(
            fs::read(root.join("sub/deeper/data.bin")).unwrap(),
            vec![0u8, 1, 2, 255]
        );
    }

    #[test]
    fn test_archive_rejects_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            archive_dir(&file),
            Err(StegoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unpack_garbage() {
        let tmp = tempdir().unwrap();
        let garbage = vec![0x42u8; 1024];
        let result = unpack(&garbage, tmp.path());
        assert!(matches!(result, Err(StegoError::CorruptPayload(_))));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("/a/b/folder")).unwrap(), "folder");
        assert_eq!(base_name(Path::new("folder/")).unwrap(), "folder");
    }
}
