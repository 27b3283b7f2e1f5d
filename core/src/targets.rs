//! The set of digests being searched for.

use std::collections::HashSet;
use std::io::BufRead;

use tracing::{info, trace};

/// Immutable set of target digests.
///
/// Built once by [`TargetSet::from_reader`] or [`FromIterator`]. There is
/// no method taking `&mut self`, so once workers borrow it the set cannot
/// change underneath them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    digests: HashSet<String>,
}

impl TargetSet {
    /// Loads one digest per line.
    ///
    /// Surrounding whitespace is trimmed and blank lines are skipped. Lines
    /// are not validated: one that is not a 32-char hex digest is kept and
    /// simply never matches.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut digests = HashSet::new();

        for line in reader.lines() {
            insert_line(&mut digests, &line?);
        }

        info!(count = digests.len(), "loaded target digests");
        Ok(Self { digests })
    }

    pub fn contains(&self, digest: &str) -> bool {
        self.digests.contains(digest)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.digests.iter().map(String::as_str)
    }
}

fn insert_line(digests: &mut HashSet<String>, line: &str) {
    let digest = line.trim();
    if digest.is_empty() {
        return;
    }

    trace!(digest, "loading hash");
    digests.insert(digest.to_owned());
}

impl<S: AsRef<str>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(lines: I) -> Self {
        let mut digests = HashSet::new();
        for line in lines {
            insert_line(&mut digests, line.as_ref());
        }
        Self { digests }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn duplicates_collapse_after_trimming() {
        let set: TargetSet = ["abc123", "dupe", "dupe", "  dupe  "].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("abc123"));
        assert!(set.contains("dupe"));

        let mut all: Vec<&str> = set.iter().collect();
        all.sort_unstable();
        assert_eq!(all, vec!["abc123", "dupe"]);
    }

    #[test]
    fn reader_skips_blank_lines() {
        let input = "6465ec74397c9126916786bbcd6d7601\r\n\n   \n\tnot-a-digest\n";
        let set = TargetSet::from_reader(Cursor::new(input)).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains("6465ec74397c9126916786bbcd6d7601"));
        assert!(set.contains("not-a-digest"));
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let set = TargetSet::from_reader(Cursor::new("")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn reader_surfaces_invalid_utf8() {
        let input: &[u8] = &[0x66, 0xff, 0xfe, b'\n'];
        assert!(TargetSet::from_reader(input).is_err());
    }
}
