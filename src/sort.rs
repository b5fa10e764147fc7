/// Version ordering for release table entries
use crate::release::ReleaseTable;
use std::cmp::Ordering;

#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    Number(&'a str),
    Symbol(char),
}

/// Split a version into digit runs and single non-digit characters
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            out.push(Chunk::Number(&rest[..end]));
            rest = &rest[end..];
        } else {
            out.push(Chunk::Symbol(c));
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

/// Collation class: punctuation sorts before digits, digits before letters
fn class(c: char) -> u8 {
    if c.is_ascii_digit() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        0
    }
}

/// Common punctuation in ICU root collation order; whitespace sorts before all of it
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Position of a non-alphanumeric character; unlisted ones follow by code point
fn punctuation_rank(c: char) -> (usize, char) {
    if c.is_whitespace() {
        return (0, c);
    }
    match PUNCTUATION_ORDER.find(c) {
        Some(index) => (index + 1, c),
        None => (PUNCTUATION_ORDER.len() + 1, c),
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware comparison of two version strings
///
/// Digit runs compare by value, so "9.0" < "10.0" and "115.0.2" < "115.0.10".
/// Remaining characters compare case-insensitively; when two versions differ
/// only in case, lower case sorts first.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    let mut case_tiebreak = Ordering::Equal;

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Number(x), Chunk::Number(y)) => compare_numbers(x, y),
            (Chunk::Number(_), Chunk::Symbol(c)) => 1u8.cmp(&class(*c)),
            (Chunk::Symbol(c), Chunk::Number(_)) => class(*c).cmp(&1u8),
            (Chunk::Symbol(x), Chunk::Symbol(y)) => {
                let folded = class(*x).cmp(&class(*y)).then_with(|| {
                    if class(*x) == 0 {
                        punctuation_rank(*x).cmp(&punctuation_rank(*y))
                    } else {
                        x.to_lowercase().cmp(y.to_lowercase())
                    }
                });
                if folded == Ordering::Equal && case_tiebreak == Ordering::Equal {
                    // Lower case before upper case
                    case_tiebreak = y.is_lowercase().cmp(&x.is_lowercase());
                }
                folded
            }
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len()).then(case_tiebreak)
}

/// Sort every entry of the table ascending, leaving keys untouched
pub fn sort_table(mut table: ReleaseTable) -> ReleaseTable {
    for versions in table.values_mut() {
        versions.sort_by(|a, b| compare_versions(a, b));
    }
    table
}
