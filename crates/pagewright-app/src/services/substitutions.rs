// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Find/replace filter applied to the raw document before layout.
//
// One `find,replace` rule per line, split at the first comma. Both sides are
// taken verbatim: quotes are ordinary characters and later commas belong to
// the replacement. Lines without a comma or with an empty `find` are skipped.

use std::io::Read;
use std::path::Path;

use pagewright_core::error::{PagewrightError, Result};
use tracing::{debug, info};

/// Ordered literal substitutions, applied in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file).map_err(|e| PagewrightError::Substitutions {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        info!(path = %path.display(), rules = table.len(), "Substitutions loaded");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for (index, record) in csv.records().enumerate() {
            let record = record?;
            match record.get(0) {
                Some(find) if !find.is_empty() && record.len() >= 2 => {
                    let replace = record.iter().skip(1).collect::<Vec<_>>().join(",");
                    pairs.push((find.to_string(), replace));
                }
                _ => debug!(record = index + 1, "Skipping substitution record"),
            }
        }
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Replace every occurrence of each `find` with its `replace`. Later
    /// rules see the output of earlier ones.
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (find, replace)| acc.replace(find.as_str(), replace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Substitutions {
        Substitutions::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn replaces_in_file_order() {
        let subs = table("cat,dog\ndog,wolf\n");
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.apply("a cat and a dog"), "a wolf and a wolf");
    }

    #[test]
    fn quotes_are_matched_literally() {
        let subs = table("\"hi\",x\n");
        assert_eq!(subs.apply("say \"hi\" or hi"), "say x or hi");
    }

    #[test]
    fn later_commas_belong_to_the_replacement() {
        let subs = table("etc,and so on, and so forth\n");
        assert_eq!(subs.apply("etc"), "and so on, and so forth");
    }

    #[test]
    fn short_and_empty_records_are_skipped() {
        let subs = table("lonely\n,nothing\nkeep,kept\n");
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.apply("keep"), "kept");
    }

    #[test]
    fn empty_replacement_deletes() {
        assert_eq!(table("um,\n").apply("um, well um"), ", well ");
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Substitutions::load(&tmp.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, PagewrightError::Io(_)));
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("subs.csv");
        std::fs::write(&path, "colour,color\n").unwrap();
        let subs = Substitutions::load(&path).unwrap();
        assert_eq!(subs.apply("colour"), "color");
    }
}
