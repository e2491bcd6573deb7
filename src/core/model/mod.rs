use std::cmp::Ordering;

/// A SNP as listed in the report. Identity is the name alone.
#[derive(Clone, Debug)]
pub struct Snp {
    pub name: String,
    pub chr: String,
    pub pos: u64,
}

impl Snp {
    pub fn new(name: &str, chr: &str, pos: &str) -> Self {
        Self {
            name: name.to_string(),
            chr: chr.trim().to_string(),
            pos: parse_position(pos),
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chr: String::new(),
            pos: 0,
        }
    }

    /// Report order: chromosome first, then position.
    pub fn cmp_location(&self, other: &Snp) -> Ordering {
        compare_chromosomes(&self.chr, &other.chr).then(self.pos.cmp(&other.pos))
    }
}

impl PartialEq for Snp {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Snp {}

/// Leading digits only; anything unparsable is position 0.
fn parse_position(raw: &str) -> u64 {
    let raw = raw.trim();
    let end = raw
        .as_bytes()
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(0)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum ChromGroup {
    Low,
    Numeric,
    High,
}

fn numeric_chromosome(label: &str) -> Option<u64> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse::<u64>().ok().filter(|&n| n > 0)
}

/// Total order over chromosome labels.
///
/// Positive integers sort numerically (`"2"` before `"10"`). Any other label
/// is placed against the numeric block by raw string comparison: labels that
/// sort before `"1"` (empty, `"0"`) come first, the rest (`X`, `Y`, `MT`, ...)
/// come after. Within each non-numeric block labels use raw string order.
/// Two numeric labels with the same value (`"01"`, `"1"`) are tie-broken by
/// their raw strings.
pub fn compare_chromosomes(a: &str, b: &str) -> Ordering {
    let group = |label: &str| match numeric_chromosome(label) {
        Some(n) => (ChromGroup::Numeric, Some(n)),
        None if label < "1" => (ChromGroup::Low, None),
        None => (ChromGroup::High, None),
    };
    let (ga, na) = group(a);
    let (gb, nb) = group(b);
    ga.cmp(&gb).then(na.cmp(&nb)).then_with(|| a.cmp(b))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlotKind {
    Raw,
    Corrected,
    RTheta,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::Raw, PlotKind::Corrected, PlotKind::RTheta];

    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::Raw => "raw",
            PlotKind::Corrected => "corrected",
            PlotKind::RTheta => "r_theta",
        }
    }

    /// 0-based (x, y) column indices into a report row.
    pub fn columns(self) -> (usize, usize) {
        match self {
            PlotKind::Raw => (COL_X_RAW, COL_Y_RAW),
            PlotKind::Corrected => (COL_X, COL_Y),
            PlotKind::RTheta => (COL_THETA, COL_R),
        }
    }

    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            PlotKind::Raw => ("x-raw", "y-raw"),
            PlotKind::Corrected => ("x-corrected", "y-corrected"),
            PlotKind::RTheta => ("Theta", "Norm R"),
        }
    }

    pub fn file_name(self, snp: &str) -> String {
        format!("{}-{}.png", snp, self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GenotypeClass {
    BB,
    AB,
    AA,
    NoCall,
}

impl GenotypeClass {
    /// Legend order, identical for every plot.
    pub const ALL: [GenotypeClass; 4] = [
        GenotypeClass::BB,
        GenotypeClass::AB,
        GenotypeClass::AA,
        GenotypeClass::NoCall,
    ];

    /// Maps a pair of AB-allele calls to its class. `None` means the row
    /// belongs to no series.
    pub fn classify(call1: &str, call2: &str) -> Option<GenotypeClass> {
        match (call1.trim(), call2.trim()) {
            ("B", "B") => Some(GenotypeClass::BB),
            ("A", "B") | ("B", "A") => Some(GenotypeClass::AB),
            ("A", "A") => Some(GenotypeClass::AA),
            ("-", "-") => Some(GenotypeClass::NoCall),
            _ => None,
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            GenotypeClass::BB => 0,
            GenotypeClass::AB => 1,
            GenotypeClass::AA => 2,
            GenotypeClass::NoCall => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GenotypeClass::BB => "BB",
            GenotypeClass::AB => "AB",
            GenotypeClass::AA => "AA",
            GenotypeClass::NoCall => "--",
        }
    }
}

pub const COL_SNP_NAME: usize = 1;
pub const COL_CHR: usize = 2;
pub const COL_POSITION: usize = 3;
pub const COL_X_RAW: usize = 4;
pub const COL_Y_RAW: usize = 5;
pub const COL_X: usize = 6;
pub const COL_Y: usize = 7;
pub const COL_THETA: usize = 8;
pub const COL_R: usize = 9;
pub const COL_CALL1: usize = 10;
pub const COL_CALL2: usize = 11;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_chromosomes_sort_numerically() {
        let mut snps = vec![
            Snp::new("c", "10", "5"),
            Snp::new("a", "2", "300"),
            Snp::new("b", "1", "7"),
            Snp::new("d", "2", "100"),
        ];
        snps.sort_by(|a, b| a.cmp_location(b));
        let names: Vec<&str> = snps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "d", "a", "c"]);
    }

    #[test]
    fn named_chromosomes_follow_numeric_ones() {
        assert_eq!(compare_chromosomes("22", "X"), Ordering::Less);
        assert_eq!(compare_chromosomes("X", "Y"), Ordering::Less);
        assert_eq!(compare_chromosomes("MT", "X"), Ordering::Less);
        assert_eq!(compare_chromosomes("", "1"), Ordering::Less);
        assert_eq!(compare_chromosomes("01", "1"), Ordering::Less);
    }

    #[test]
    fn unmapped_chromosome_zero_sorts_before_numeric_ones() {
        assert_eq!(compare_chromosomes("0", "1"), Ordering::Less);
        assert_eq!(compare_chromosomes("0", "5"), Ordering::Less);
        assert_eq!(compare_chromosomes("0", "22"), Ordering::Less);
        assert_eq!(compare_chromosomes("", "0"), Ordering::Less);
        assert_eq!(compare_chromosomes("0", "X"), Ordering::Less);

        let mut snps = vec![
            Snp::new("x", "X", "1"),
            Snp::new("ten", "10", "1"),
            Snp::new("unmapped", "0", "0"),
            Snp::new("two", "2", "1"),
        ];
        snps.sort_by(|a, b| a.cmp_location(b));
        let names: Vec<&str> = snps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["unmapped", "two", "ten", "x"]);
    }

    #[test]
    fn equality_ignores_location() {
        assert_eq!(Snp::new("rs1", "1", "10"), Snp::new("rs1", "2", "20"));
        assert_ne!(Snp::new("rs1", "1", "10"), Snp::new("rs10", "1", "10"));
    }

    #[test]
    fn position_parses_leading_digits() {
        assert_eq!(Snp::new("a", "1", "123").pos, 123);
        assert_eq!(Snp::new("a", "1", " 77\r").pos, 77);
        assert_eq!(Snp::new("a", "1", "12ab").pos, 12);
        assert_eq!(Snp::new("a", "1", "n/a").pos, 0);
        assert_eq!(Snp::named("a").pos, 0);
    }

    #[test]
    fn genotype_calls_classify() {
        assert_eq!(GenotypeClass::classify("A", "B"), Some(GenotypeClass::AB));
        assert_eq!(GenotypeClass::classify("B", "A"), Some(GenotypeClass::AB));
        assert_eq!(GenotypeClass::classify("B", "B"), Some(GenotypeClass::BB));
        assert_eq!(GenotypeClass::classify("A", "A"), Some(GenotypeClass::AA));
        assert_eq!(GenotypeClass::classify("-", "-"), Some(GenotypeClass::NoCall));
        assert_eq!(GenotypeClass::classify("A", "C"), None);
        assert_eq!(GenotypeClass::classify("A", "-"), None);
        assert_eq!(GenotypeClass::classify("", ""), None);
    }

    #[test]
    fn class_index_matches_legend_order() {
        for (i, class) in GenotypeClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn plot_kind_mapping() {
        assert_eq!(PlotKind::Raw.columns(), (4, 5));
        assert_eq!(PlotKind::Corrected.columns(), (6, 7));
        assert_eq!(PlotKind::RTheta.columns(), (8, 9));
        assert_eq!(PlotKind::RTheta.axis_labels(), ("Theta", "Norm R"));
        assert_eq!(PlotKind::RTheta.file_name("rsX"), "rsX-r_theta.png");
    }
}
