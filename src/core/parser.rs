use crate::core::io::lines;
use crate::core::model::{COL_CHR, COL_POSITION, COL_SNP_NAME, Snp};
use crate::core::registry::SnpRegistry;
use std::borrow::Cow;

const DATA_MARKER: &[u8] = b"[data]";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Header,
    Titles,
    Data,
}

/// Walks a final report and yields `(line_number, line)` for every data row,
/// i.e. every line after the `[Data]` marker and its column-title line.
pub struct DataRows<'a> {
    inner: Box<dyn Iterator<Item = &'a [u8]> + 'a>,
    section: Section,
    line_no: usize,
}

impl<'a> DataRows<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            inner: Box::new(lines(bytes)),
            section: Section::Header,
            line_no: 0,
        }
    }

    /// True once the `[Data]` marker has been passed.
    pub fn saw_marker(&self) -> bool {
        self.section != Section::Header
    }
}

impl<'a> Iterator for DataRows<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.inner.next()?;
            self.line_no += 1;
            match self.section {
                Section::Header => {
                    if is_data_marker(line) {
                        self.section = Section::Titles;
                    }
                }
                Section::Titles => self.section = Section::Data,
                Section::Data => return Some((self.line_no, line)),
            }
        }
    }
}

fn is_data_marker(line: &[u8]) -> bool {
    line.len() >= DATA_MARKER.len() && line[..DATA_MARKER.len()].eq_ignore_ascii_case(DATA_MARKER)
}

pub fn split_fields(line: &[u8]) -> Vec<Cow<'_, str>> {
    line.split(|&b| b == b'\t')
        .map(String::from_utf8_lossy)
        .collect()
}

#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub registry: SnpRegistry,
    pub data_section_found: bool,
    pub data_rows: usize,
    pub malformed: usize,
}

/// Collects each distinct SNP from the data section in first-seen order.
/// Rows with fewer than four fields are reported and skipped.
pub fn find_snps(bytes: &[u8]) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut rows = DataRows::new(bytes);
    for (line_no, line) in rows.by_ref() {
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }
        outcome.data_rows += 1;
        let fields = split_fields(line);
        if fields.len() <= COL_POSITION {
            tracing::warn!(
                line = line_no,
                fields = fields.len(),
                "malformed data row: expected at least 4 tab-separated fields"
            );
            outcome.malformed += 1;
            continue;
        }
        let name = &fields[COL_SNP_NAME];
        if outcome.registry.contains(name) {
            continue;
        }
        outcome
            .registry
            .insert(Snp::new(name, &fields[COL_CHR], &fields[COL_POSITION]));
    }
    outcome.data_section_found = rows.saw_marker();
    outcome
}

/// One SNP per non-empty line; chromosome and position stay unknown.
pub fn snps_from_list(bytes: &[u8]) -> SnpRegistry {
    let mut registry = SnpRegistry::new();
    for line in lines(bytes) {
        let name = String::from_utf8_lossy(line);
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !registry.insert(Snp::named(name)) {
            tracing::debug!(snp = name, "duplicate name in SNP list ignored");
        }
    }
    registry
}
