use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(&file) }.with_context(|| "mmap failed")?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

/// The whole report, either mapped from disk or inflated into memory.
pub enum ReportSource {
    Mmap(MmapSource),
    Owned(Vec<u8>),
}

impl ReportSource {
    pub fn open(path: &Path) -> Result<Self> {
        match detect_input_kind(path)? {
            InputKind::Plain => {
                // Empty files cannot be mapped on every platform.
                let len = std::fs::metadata(path)
                    .with_context(|| format!("failed to stat {}", path.display()))?
                    .len();
                if len == 0 {
                    return Ok(ReportSource::Owned(Vec::new()));
                }
                Ok(ReportSource::Mmap(MmapSource::open(path)?))
            }
            InputKind::Gzip => {
                let mut reader = open_gzip_reader(path)?;
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .with_context(|| format!("gzip decompression error in {}", path.display()))?;
                Ok(ReportSource::Owned(buf))
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            ReportSource::Mmap(m) => m.bytes(),
            ReportSource::Owned(v) => v,
        }
    }
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if ext == "gz" {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .with_context(|| "failed to read magic bytes")?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

pub fn open_gzip_reader(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
}

/// Lines of `bytes` without their terminator. A trailing `\r` is dropped and
/// a final line without `\n` is still yielded.
pub fn lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut start = 0usize;
    let mut ends = memchr_iter(b'\n', bytes);
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let end = ends.next().unwrap_or(bytes.len());
        let line = &bytes[start..end];
        start = end + 1;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn lines_handle_crlf_and_missing_newline() {
        let got: Vec<&[u8]> = lines(b"a\r\nb\n\nc").collect();
        assert_eq!(got, vec![&b"a"[..], &b"b"[..], &b""[..], &b"c"[..]]);
        assert_eq!(lines(b"").count(), 0);
        assert_eq!(lines(b"x\n").count(), 1);
    }

    #[test]
    fn gzip_reports_are_inflated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"[Header]\n[Data]\n").unwrap();
        std::fs::write(&path, enc.finish().unwrap()).unwrap();

        assert_eq!(detect_input_kind(&path).unwrap(), InputKind::Gzip);
        let source = ReportSource::open(&path).unwrap();
        assert_eq!(source.bytes(), b"[Header]\n[Data]\n");
    }

    #[test]
    fn gzip_detected_by_magic_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello\n").unwrap();
        std::fs::write(&path, enc.finish().unwrap()).unwrap();

        assert_eq!(detect_input_kind(&path).unwrap(), InputKind::Gzip);
        assert_eq!(ReportSource::open(&path).unwrap().bytes(), b"hello\n");
    }

    #[test]
    fn plain_and_empty_reports_open() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "line\n").unwrap();
        assert_eq!(ReportSource::open(&plain).unwrap().bytes(), b"line\n");

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "").unwrap();
        assert!(ReportSource::open(&empty).unwrap().bytes().is_empty());
    }
}
