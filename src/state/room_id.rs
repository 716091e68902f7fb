/// Room identifier parsing and ordering
///
/// Room ids are free-form labels ("200", "F30", "12A"). The floor is the
/// first digit character; the sort key is the first run of digits.

use std::cmp::Ordering;

/// Floor of a room: the value of the first digit character.
/// "200" → 2, "F30" → 3, "30F" → 3, "ABC" → None
pub fn floor_of(room_id: &str) -> Option<u32> {
    room_id.chars().find_map(|c| c.to_digit(10))
}

/// Numeric sort key: the value of the first contiguous digit run.
/// "F30" → 30, "408" → 408. Runs too large for u64 saturate.
pub fn sort_key_of(room_id: &str) -> Option<u64> {
    let start = room_id.find(|c: char| c.is_ascii_digit())?;
    let run = &room_id[start..];
    let end = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    Some(run[..end].parse().unwrap_or(u64::MAX))
}

/// Whether the id carries any ASCII letter (annex rooms like "12A")
pub fn has_letter(room_id: &str) -> bool {
    room_id.chars().any(|c| c.is_ascii_alphabetic())
}

/// Order of room ids within a floor:
/// ids without letters first, then by numeric key, then natural order.
pub fn compare_room_ids(a: &str, b: &str) -> Ordering {
    let by_class = has_letter(a).cmp(&has_letter(b));
    if by_class != Ordering::Equal {
        return by_class;
    }

    if let (Some(ka), Some(kb)) = (sort_key_of(a), sort_key_of(b)) {
        if ka != kb {
            return ka.cmp(&kb);
        }
    }

    natural_cmp(a, b)
}

/// A piece of a string: a run of digits or a single other character
#[derive(Debug, Clone, Copy, PartialEq)]
enum Chunk<'a> {
    Digits(&'a str),
    Char(char),
}

/// Collation class, in sort order: whitespace, punctuation and symbols
/// come before digits, and digits before letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Collation {
    Space,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

fn collation(c: char) -> Collation {
    match c {
        c if c.is_whitespace() => Collation::Space,
        '`' | '^' | '+' | '<' | '=' | '>' | '|' | '~' | '$' => Collation::Symbol,
        c if c.is_ascii_punctuation() => Collation::Punctuation,
        c if c.is_alphanumeric() => Collation::Letter,
        _ => Collation::Symbol,
    }
}

impl Chunk<'_> {
    fn collation(&self) -> Collation {
        match self {
            Chunk::Digits(_) => Collation::Digit,
            Chunk::Char(c) => collation(*c),
        }
    }
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            out.push(Chunk::Digits(&rest[..end]));
            rest = &rest[end..];
        } else {
            out.push(Chunk::Char(c));
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Compare two digit runs by value without parsing (no overflow)
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn cmp_chunks(x: &Chunk<'_>, y: &Chunk<'_>) -> Ordering {
    x.collation().cmp(&y.collation()).then_with(|| match (x, y) {
        (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
        (Chunk::Char(x), Chunk::Char(y)) => fold(*x).cmp(&fold(*y)),
        // different classes already decided
        _ => Ordering::Equal,
    })
}

/// Natural ("numeric") string comparison.
///
/// Digit runs compare by value, so "room9" < "room10". Whitespace,
/// punctuation and symbols sort before digits, digits before letters, and
/// letters compare case-insensitively. Remaining ties break lowercase-first,
/// then on leading zeros, then on raw bytes, so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ca = chunks(a);
    let cb = chunks(b);

    let primary = ca
        .iter()
        .zip(cb.iter())
        .map(|(x, y)| cmp_chunks(x, y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or_else(|| ca.len().cmp(&cb.len()));
    if primary != Ordering::Equal {
        return primary;
    }

    // Same letters ignoring case: lowercase wins
    let case = ca
        .iter()
        .zip(cb.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Chunk::Char(x), Chunk::Char(y)) if x != y => {
                Some(y.is_lowercase().cmp(&x.is_lowercase()))
            }
            _ => None,
        })
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal);

    case.then_with(|| a.len().cmp(&b.len())).then_with(|| a.cmp(b))
}
