//! Case-name range expansion.
//!
//! Homework case lists and the judge's `--include`/`--exclude` flags accept
//! bracketed integer ranges: `case[01-03]` expands to `case01`, `case02`,
//! `case03`. A bracket group may also hold a comma list (`[01,04]`), and a
//! name with several groups expands to their cartesian product in odometer
//! order. Zero padding follows the width of each range's start value.

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ExpandError {
    /// A range part was not `<int>` or `<int>-<int>`.
    BadRange(String),
    /// An opening `[` had no matching `]`.
    UnterminatedBracket,
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::BadRange(part) => write!(f, "bad range: {part}"),
            ExpandError::UnterminatedBracket => write!(f, "opening `[` without enclosing `]`"),
        }
    }
}

impl std::error::Error for ExpandError {}

/// Expands an integer range list like `01-03` or `1,4,7` into strings.
pub fn range(s: &str) -> Result<Vec<String>, ExpandError> {
    let mut expanded = Vec::new();
    for part in s.split(',') {
        match part.split_once('-') {
            None => expanded.push(part.to_string()),
            Some((lo, hi)) => {
                let start: u64 = lo
                    .parse()
                    .map_err(|_| ExpandError::BadRange(part.to_string()))?;
                let end: u64 = hi
                    .parse()
                    .map_err(|_| ExpandError::BadRange(part.to_string()))?;
                let width = lo.len();
                for value in start..=end {
                    expanded.push(format!("{value:0width$}"));
                }
            }
        }
    }
    Ok(expanded)
}

/// Expands every bracket group in `s`.
///
/// A string without brackets expands to itself.
pub fn expand(s: &str) -> Result<Vec<String>, ExpandError> {
    let mut parts: Vec<&str> = Vec::new();
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut rest = s;
    while let Some(open) = rest.find('[') {
        parts.push(&rest[..open]);
        rest = &rest[open + 1..];
        let close = rest.find(']').ok_or(ExpandError::UnterminatedBracket)?;
        groups.push(range(&rest[..close])?);
        rest = &rest[close + 1..];
    }
    if parts.is_empty() {
        return Ok(vec![s.to_string()]);
    }

    let mut counters = vec![0usize; groups.len()];
    let mut result = Vec::new();
    while counters[0] < groups[0].len() {
        let mut built = String::new();
        for (part, (group, &index)) in parts.iter().zip(groups.iter().zip(counters.iter())) {
            built.push_str(part);
            built.push_str(&group[index]);
        }
        built.push_str(rest);
        result.push(built);

        // Odometer increment: rightmost counter first, carry leftwards. The
        // loop ends once the leftmost counter overflows.
        let last = counters.len() - 1;
        counters[last] += 1;
        for i in (1..counters.len()).rev() {
            if counters[i] == groups[i].len() {
                counters[i] = 0;
                counters[i - 1] += 1;
            } else {
                break;
            }
        }
    }
    Ok(result)
}

/// Expands every item of a list, concatenating the results in order.
pub fn expand_all<I, S>(items: I) -> Result<Vec<String>, ExpandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = Vec::new();
    for item in items {
        expanded.extend(expand(item.as_ref())?);
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_value() {
        assert_eq!(range("48").unwrap(), vec!["48"]);
    }

    #[test]
    fn basic_range() {
        assert_eq!(range("7-9").unwrap(), vec!["7", "8", "9"]);
    }

    #[test]
    fn padding_follows_start_width() {
        assert_eq!(range("7-11").unwrap(), vec!["7", "8", "9", "10", "11"]);
        assert_eq!(range("07-11").unwrap(), vec!["07", "08", "09", "10", "11"]);
        assert_eq!(
            range("007-11").unwrap(),
            vec!["007", "008", "009", "010", "011"]
        );
    }

    #[test]
    fn comma_lists_and_mixed_ranges() {
        assert_eq!(range("1,3-4").unwrap(), vec!["1", "3", "4"]);
        assert_eq!(range("1,2,3,4").unwrap(), vec!["1", "2", "3", "4"]);
        assert_eq!(
            range("1-3,7-11").unwrap(),
            vec!["1", "2", "3", "7", "8", "9", "10", "11"]
        );
        assert_eq!(
            range("01-3,7-11").unwrap(),
            vec!["01", "02", "03", "7", "8", "9", "10", "11"]
        );
    }

    #[test]
    fn bad_range_is_rejected() {
        assert_eq!(
            range("a-b").unwrap_err(),
            ExpandError::BadRange("a-b".to_string())
        );
    }

    #[test]
    fn expand_without_brackets_is_identity() {
        assert_eq!(expand("hello").unwrap(), vec!["hello"]);
    }

    #[test]
    fn expand_empty_group() {
        assert_eq!(expand("hello[]world").unwrap(), vec!["helloworld"]);
    }

    #[test]
    fn expand_single_group() {
        assert_eq!(expand("hello[10]world").unwrap(), vec!["hello10world"]);
        assert_eq!(
            expand("hello[07-11]world").unwrap(),
            vec![
                "hello07world",
                "hello08world",
                "hello09world",
                "hello10world",
                "hello11world"
            ]
        );
    }

    #[test]
    fn expand_multiple_groups_is_cartesian() {
        assert_eq!(expand("[1]hello[2]world[3]").unwrap(), vec!["1hello2world3"]);
        assert_eq!(
            expand("[1-2]hello[3,5]world[9-11]").unwrap(),
            vec![
                "1hello3world9",
                "1hello3world10",
                "1hello3world11",
                "1hello5world9",
                "1hello5world10",
                "1hello5world11",
                "2hello3world9",
                "2hello3world10",
                "2hello3world11",
                "2hello5world9",
                "2hello5world10",
                "2hello5world11",
            ]
        );
    }

    #[test]
    fn unterminated_bracket_is_rejected() {
        assert_eq!(
            expand("case[01-03").unwrap_err(),
            ExpandError::UnterminatedBracket
        );
    }

    #[test]
    fn expand_all_concatenates() {
        assert_eq!(
            expand_all(["case[1-2]", "extra"]).unwrap(),
            vec!["case1", "case2", "extra"]
        );
    }
}
