use crate::core::model::Snp;
use std::collections::HashSet;

/// SNPs in first-seen order with no repeated names.
#[derive(Debug, Default)]
pub struct SnpRegistry {
    snps: Vec<Snp>,
    names: HashSet<String>,
}

impl SnpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a SNP with the same name is already present.
    pub fn insert(&mut self, snp: Snp) -> bool {
        if self.names.contains(&snp.name) {
            return false;
        }
        self.names.insert(snp.name.clone());
        self.snps.push(snp);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.snps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snp> {
        self.snps.iter()
    }

    /// Display order. Stable, so ties keep insertion order.
    pub fn sorted(&self) -> Vec<&Snp> {
        let mut out: Vec<&Snp> = self.snps.iter().collect();
        out.sort_by(|a, b| a.cmp_location(b));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        let mut reg = SnpRegistry::new();
        assert!(reg.insert(Snp::new("rs1", "1", "10")));
        assert!(!reg.insert(Snp::new("rs1", "2", "99")));
        assert!(reg.insert(Snp::new("rs2", "1", "5")));
        assert_eq!(reg.len(), 2);
        assert!(reg.contains("rs1"));
        assert_eq!(reg.iter().next().map(|s| s.chr.as_str()), Some("1"));
    }

    #[test]
    fn sorted_view_leaves_insertion_order_alone() {
        let mut reg = SnpRegistry::new();
        reg.insert(Snp::new("late", "10", "1"));
        reg.insert(Snp::new("early", "2", "1"));
        reg.insert(Snp::new("tie", "2", "1"));

        let sorted: Vec<&str> = reg.sorted().into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(sorted, ["early", "tie", "late"]);
        let seen: Vec<&str> = reg.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(seen, ["late", "early", "tie"]);
    }
}
