use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// File contents, either memory-mapped or read into a Vec.
/// Dereferences to `&[u8]`.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Files smaller than this are read; mapping costs more than it saves.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a whole file, mapping it when it is a large regular file.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if metadata.file_type().is_file() && len >= MMAP_THRESHOLD {
        // SAFETY: read-only mapping; the data is only read while the map is alive.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            #[cfg(unix)]
            {
                let _ = mmap.advise(memmap2::Advice::Sequential);
            }
            return Ok(FileData::Mmap(mmap));
        }
    }

    // Regular files report their size; pipes and devices report 0.
    let mut buf = Vec::with_capacity(len as usize);
    file.read_to_end(&mut buf)?;
    Ok(FileData::Owned(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_small_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"TWFu\n").unwrap();
        let data = read_file(file.path()).unwrap();
        assert!(matches!(data, FileData::Owned(_)));
        assert_eq!(&*data, b"TWFu\n");
    }

    #[test]
    fn test_read_large_file() {
        let content: Vec<u8> = (0..2 * MMAP_THRESHOLD).map(|i| (i % 251) as u8).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();
        file.flush().unwrap();
        let data = read_file(file.path()).unwrap();
        assert_eq!(&*data, &content[..]);
    }

    #[test]
    fn test_read_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("missing")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
