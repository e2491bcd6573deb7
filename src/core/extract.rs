use crate::core::model::COL_SNP_NAME;
use crate::core::parser::DataRows;
use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The data rows of one SNP, parked in a temporary file that is removed on drop.
pub struct ExtractedRows {
    file: NamedTempFile,
    pub rows: usize,
}

impl ExtractedRows {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// True when the SNP-name field of `line` is exactly `snp`.
pub fn row_matches(line: &[u8], snp: &[u8]) -> bool {
    line.split(|&b| b == b'\t')
        .nth(COL_SNP_NAME)
        .is_some_and(|field| field == snp)
}

/// Copies every data row whose SNP-name field equals `snp` into a fresh
/// temporary file in `dir`. No matching rows gives an empty file.
pub fn extract_rows(report: &[u8], snp: &str, dir: &Path) -> Result<ExtractedRows> {
    let file = tempfile::Builder::new()
        .prefix("scatter-data-")
        .suffix(".txt")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temp data file in {}", dir.display()))?;
    let mut w = BufWriter::new(file.as_file());
    let mut rows = 0usize;
    for (_, line) in DataRows::new(report) {
        if row_matches(line, snp.as_bytes()) {
            w.write_all(line)?;
            w.write_all(b"\n")?;
            rows += 1;
        }
    }
    w.flush()
        .with_context(|| format!("failed to write data rows for {}", snp))?;
    drop(w);
    Ok(ExtractedRows { file, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "[Header]\nrs1 appears in the header\n[Data]\n\
Sample ID\tSNP Name\tChr\tPosition\n\
s1\trs1\t1\t10\tr1a\n\
s1\trs10\t1\t20\tr10a\n\
s2\trs1\t1\t10\tr1b\n\
s2\trs2\t1\t30\trs1\n\
s3\trs1-b\t1\t40\tdash\n";

    #[test]
    fn only_exact_name_matches_are_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let extracted = extract_rows(REPORT.as_bytes(), "rs1", dir.path()).unwrap();
        assert_eq!(extracted.rows, 2);
        let text = std::fs::read_to_string(extracted.path()).unwrap();
        assert_eq!(text, "s1\trs1\t1\t10\tr1a\ns2\trs1\t1\t10\tr1b\n");
    }

    #[test]
    fn unknown_snp_gives_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let extracted = extract_rows(REPORT.as_bytes(), "rs404", dir.path()).unwrap();
        assert_eq!(extracted.rows, 0);
        assert_eq!(std::fs::metadata(extracted.path()).unwrap().len(), 0);
    }

    #[test]
    fn temp_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let extracted = extract_rows(REPORT.as_bytes(), "rs2", dir.path()).unwrap();
        let path = extracted.path().to_path_buf();
        assert!(path.exists());
        drop(extracted);
        assert!(!path.exists());
    }

    #[test]
    fn row_matching_uses_the_name_column() {
        assert!(row_matches(b"s\trs1\t1", b"rs1"));
        assert!(!row_matches(b"rs1\trs2\t1", b"rs1"));
        assert!(!row_matches(b"s\trs10", b"rs1"));
        assert!(!row_matches(b"rs1", b"rs1"));
    }
}
