//! Natural ordering of Maven version strings (1.1 < 1.2 < 1.10, 1.0-alpha < 1.0-SNAPSHOT < 1.0).
//!
//! Versions are split into items at '.' and '-' and at every transition between digits and
//!  letters. Numeric items compare numerically, qualifiers by their well-known rank. A version
//!  that runs out of items is padded with 'nothing', which equals 0 and the release qualifier, so
//!  that 1 == 1.0 == 1.0.0 == 1-ga. A zero item compares to a qualifier the same way 'nothing'
//!  does, so 1.0.0.M1 < 1.0.0 < 1.0.0-SP1.

use std::cmp::Ordering;

use crate::maven::metadata_xml::SnapshotVersion;

const QUALIFIER_RANKS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

const RELEASE_RANK: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// digits without leading zeros
    Number(String),
    Qualifier(String),
}
impl Item {
    fn number(digits: &str) -> Item {
        Item::Number(digits.trim_start_matches('0').to_string())
    }

    fn qualifier(text: &str) -> Item {
        let canonical = match text {
            "a" => "alpha",
            "b" => "beta",
            "m" => "milestone",
            "cr" => "rc",
            "ga" | "final" | "release" => "",
            other => other,
        };
        Item::Qualifier(canonical.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Number(digits) => digits.is_empty(),
            Item::Qualifier(q) => q.is_empty(),
        }
    }
}

fn qualifier_rank(qualifier: &str) -> usize {
    QUALIFIER_RANKS.iter()
        .position(|q| *q == qualifier)
        .unwrap_or(QUALIFIER_RANKS.len())
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len())
        .then_with(|| a.cmp(b))
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    let (rank_a, rank_b) = (qualifier_rank(a), qualifier_rank(b));
    if rank_a == QUALIFIER_RANKS.len() && rank_b == QUALIFIER_RANKS.len() {
        a.cmp(b)
    }
    else {
        rank_a.cmp(&rank_b)
    }
}

fn compare_items(a: Option<&Item>, b: Option<&Item>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(item), None) => compare_to_null(item),
        (None, Some(item)) => compare_to_null(item).reverse(),
        (Some(Item::Number(x)), Some(Item::Number(y))) => compare_numbers(x, y),
        (Some(Item::Qualifier(x)), Some(Item::Qualifier(y))) => compare_qualifiers(x, y),
        (Some(Item::Number(x)), Some(q @ Item::Qualifier(_))) if x.is_empty() => compare_to_null(q).reverse(),
        (Some(q @ Item::Qualifier(_)), Some(Item::Number(y))) if y.is_empty() => compare_to_null(q),
        (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
        (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
    }
}

fn compare_to_null(item: &Item) -> Ordering {
    match item {
        Item::Number(digits) => if digits.is_empty() { Ordering::Equal } else { Ordering::Greater },
        Item::Qualifier(q) => qualifier_rank(q).cmp(&RELEASE_RANK),
    }
}

fn parse_items(version: &str) -> Vec<Item> {
    let version = version.to_lowercase();
    let mut items = Vec::new();
    let mut token = String::new();

    for c in version.chars() {
        match c {
            '.' => push_token(&mut items, &mut token),
            '-' => {
                // 1.0-alpha is the same as 1-alpha
                push_token(&mut items, &mut token);
                trim_nulls(&mut items);
            }
            _ => {
                let is_transition = token.chars().last()
                    .map(|last| last.is_ascii_digit() != c.is_ascii_digit())
                    .unwrap_or(false);
                if is_transition {
                    push_token(&mut items, &mut token);
                }
                token.push(c);
            }
        }
    }
    push_token(&mut items, &mut token);
    trim_nulls(&mut items);

    items
}

fn push_token(items: &mut Vec<Item>, token: &mut String) {
    if token.is_empty() {
        return;
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        items.push(Item::number(token.as_str()));
    }
    else {
        items.push(Item::qualifier(token.as_str()));
    }
    token.clear();
}

fn trim_nulls(items: &mut Vec<Item>) {
    while items.last().map(Item::is_null).unwrap_or(false) {
        items.pop();
    }
}

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let items_a = parse_items(a);
    let items_b = parse_items(b);

    for i in 0..items_a.len().max(items_b.len()) {
        let result = compare_items(items_a.get(i), items_b.get(i));
        if result != Ordering::Equal {
            return result;
        }
    }
    Ordering::Equal
}

/// Wrapper for sorting or keying collections by natural Maven version order
#[derive(Debug, Clone)]
pub struct MavenVersionKey(pub String);
impl PartialEq for MavenVersionKey {
    fn eq(&self, other: &Self) -> bool {
        compare_versions(&self.0, &other.0) == Ordering::Equal
    }
}
impl Eq for MavenVersionKey {}
impl PartialOrd for MavenVersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for MavenVersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.0, &other.0)
    }
}

/// Orders timestamped snapshot builds by version, then classifier (unclassified first), then
///  extension
pub fn compare_snapshot_versions(a: &SnapshotVersion, b: &SnapshotVersion) -> Ordering {
    compare_versions(&a.version, &b.version)
        .then_with(|| a.classifier.cmp(&b.classifier))
        .then_with(|| a.extension.cmp(&b.extension))
}
