//! Natural ("human") string ordering.

use std::cmp::Ordering;

/// Splits a string into maximal runs of ASCII digits and non-digits.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = (&'a str, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((run, digits))
    }
}

fn runs(s: &str) -> Runs<'_> {
    Runs { rest: s }
}

/// Compares two digit runs by numeric value without parsing, so runs of
/// any length work. Leading zeros are ignored.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two names in natural order.
///
/// Each name is split into runs of digits and non-digits. Runs are compared
/// pairwise: two digit runs by numeric value, anything else
/// case-insensitively. When every shared run is equal, the name with fewer
/// runs sorts first.
///
/// ```
/// use keyfm_core::sort::natural_cmp;
///
/// let mut names = vec!["file2.png", "file10.png", "file1.png"];
/// names.sort_by(|a, b| natural_cmp(a, b));
/// assert_eq!(names, vec!["file1.png", "file2.png", "file10.png"]);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_runs = runs(a);
    let mut b_runs = runs(b);
    loop {
        match (a_runs.next(), b_runs.next()) {
            (Some((ra, true)), Some((rb, true))) => match cmp_numeric(ra, rb) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (Some((ra, _)), Some((rb, _))) => match ra.to_lowercase().cmp(&rb.to_lowercase()) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&'static str]) -> Vec<&'static str> {
        let mut names = names.to_vec();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn numeric_runs_compare_by_value() {
        assert_eq!(
            sorted(&["file2.png", "file10.png", "file1.png"]),
            vec!["file1.png", "file2.png", "file10.png"]
        );
    }

    #[test]
    fn text_runs_ignore_case() {
        assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_are_ignored() {
        assert_eq!(natural_cmp("img007", "img7"), Ordering::Equal);
        assert_eq!(natural_cmp("img007", "img8"), Ordering::Less);
    }

    #[test]
    fn fewer_runs_win_on_shared_prefix() {
        assert_eq!(natural_cmp("file", "file1"), Ordering::Less);
        assert_eq!(natural_cmp("v1", "v1.2"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }

    #[test]
    fn very_long_numbers_do_not_overflow() {
        let big = "n123456789012345678901234567890";
        let bigger = "n923456789012345678901234567890";
        assert_eq!(natural_cmp(big, bigger), Ordering::Less);
        assert_eq!(natural_cmp("n99", big), Ordering::Less);
    }

    #[test]
    fn digits_versus_text_compare_as_text() {
        assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
    }

    #[test]
    fn non_ascii_names_are_handled() {
        assert_eq!(
            sorted(&["사진10", "사진2", "사진1"]),
            vec!["사진1", "사진2", "사진10"]
        );
    }
}
