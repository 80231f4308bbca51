// Fuzzy string scoring
//
// Weighted ratio over normalized strings, 0-100. Builds on the indel
// similarity from rapidfuzz and layers partial-window and token-order
// insensitive variants on top, keeping whichever scores best.

use rapidfuzz::distance::indel;
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Sequences at least this long ignore over-represented characters when
/// seeding matching blocks
const POPULAR_MIN_LEN: usize = 200;

/// Normalize for comparison: drop Latin-1 supplement characters
/// (U+0080..=U+00FF), turn every non-word character into a space, lower-case
/// and trim. Letters and digits from any other script are kept.
pub fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .filter(|c| !('\u{80}'..='\u{FF}').contains(c))
        .flat_map(|c| {
            let c = if c.is_alphanumeric() || c == '_' { c } else { ' ' };
            c.to_lowercase()
        })
        .collect();
    replaced.trim().to_string()
}

fn similarity(a: &[char], b: &[char]) -> f64 {
    indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Plain indel ratio. 0 when either side is empty.
pub fn ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_score(100.0 * similarity(&a, &b))
}

fn positions_by_char(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        positions.entry(c).or_default().push(j);
    }
    if b.len() >= POPULAR_MIN_LEN {
        let limit = b.len() / 100 + 1;
        positions.retain(|_, js| js.len() <= limit);
    }
    positions
}

/// Longest common run inside `a[ar] x b[br]` as `(i, j, size)`. Earliest in
/// `a` wins, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    positions: &HashMap<char, Vec<usize>>,
    ar: Range<usize>,
    br: Range<usize>,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (ar.start, br.start, 0);
    let mut run_at: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ar.end).skip(ar.start) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        for &j in positions.get(c).map(Vec::as_slice).unwrap_or_default() {
            if j < br.start {
                continue;
            }
            if j >= br.end {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_at.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next.insert(j, k);
            if k > best_len {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_len = k;
            }
        }
        run_at = next;
    }

    // Popular characters never seed a run but may still extend one
    while best_i > ar.start && best_j > br.start && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_len += 1;
    }
    while best_i + best_len < ar.end
        && best_j + best_len < br.end
        && a[best_i + best_len] == b[best_j + best_len]
    {
        best_len += 1;
    }

    (best_i, best_j, best_len)
}

/// Non-overlapping common runs of `a` and `b` as ascending `(i, j, size)`
/// triples, found by recursive longest-match splitting. Always ends with the
/// sentinel `(a.len(), b.len(), 0)`.
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<(usize, usize, usize)> {
    let positions = positions_by_char(b);
    let mut queue = vec![(0..a.len(), 0..b.len())];
    let mut blocks = Vec::new();

    while let Some((ar, br)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, &positions, ar.clone(), br.clone());
        if k == 0 {
            continue;
        }
        blocks.push((i, j, k));
        if ar.start < i && br.start < j {
            queue.push((ar.start..i, br.start..j));
        }
        if i + k < ar.end && j + k < br.end {
            queue.push((i + k..ar.end, j + k..br.end));
        }
    }
    blocks.sort_unstable();

    let mut merged = Vec::with_capacity(blocks.len() + 1);
    let (mut i1, mut j1, mut k1) = (0, 0, 0);
    for (i2, j2, k2) in blocks {
        if i1 + k1 == i2 && j1 + k1 == j2 {
            k1 += k2;
        } else {
            if k1 > 0 {
                merged.push((i1, j1, k1));
            }
            (i1, j1, k1) = (i2, j2, k2);
        }
    }
    if k1 > 0 {
        merged.push((i1, j1, k1));
    }
    merged.push((a.len(), b.len(), 0));
    merged
}

/// Best ratio of the shorter string against the windows of the longer one
/// that line up with a matching block
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best = 0.0_f64;
    for (i, j, _) in matching_blocks(&short, &long) {
        let start = j.saturating_sub(i);
        let end = (start + short.len()).min(long.len());
        let r = similarity(&short, &long[start..end]);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }
    to_score(100.0 * best)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting whitespace tokens
pub fn token_sort_ratio(a: &str, b: &str, partial: bool) -> u32 {
    let (a, b) = (sorted_tokens(a), sorted_tokens(b));
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

/// Compare the shared tokens against each side's full token set
pub fn token_set_ratio(a: &str, b: &str, partial: bool) -> u32 {
    let t1: BTreeSet<&str> = a.split_whitespace().collect();
    let t2: BTreeSet<&str> = b.split_whitespace().collect();
    if t1.is_empty() || t2.is_empty() {
        return 0;
    }

    let sect = t1.intersection(&t2).copied().collect::<Vec<_>>().join(" ");
    let diff1 = t1.difference(&t2).copied().collect::<Vec<_>>().join(" ");
    let diff2 = t2.difference(&t1).copied().collect::<Vec<_>>().join(" ");

    let combined1 = format!("{sect} {diff1}").trim().to_string();
    let combined2 = format!("{sect} {diff2}").trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    score(&sect, &combined1)
        .max(score(&sect, &combined2))
        .max(score(&combined1, &combined2))
}

/// Weighted ratio of two raw strings
pub fn wratio(a: &str, b: &str) -> u32 {
    wratio_processed(&full_process(a), &full_process(b))
}

/// Weighted ratio of two strings that already went through `full_process`
pub fn wratio_processed(p1: &str, p2: &str) -> u32 {
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let base = ratio(p1, p2) as f64;
    let len1 = p1.chars().count() as f64;
    let len2 = p2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    if len_ratio < 1.5 {
        let tsor = token_sort_ratio(p1, p2, false) as f64 * UNBASE_SCALE;
        let tser = token_set_ratio(p1, p2, false) as f64 * UNBASE_SCALE;
        return to_score(base.max(tsor).max(tser));
    }

    let partial_scale = if len_ratio > 8.0 {
        LONG_PARTIAL_SCALE
    } else {
        PARTIAL_SCALE
    };

    let partial = partial_ratio(p1, p2) as f64 * partial_scale;
    let ptsor = token_sort_ratio(p1, p2, true) as f64 * UNBASE_SCALE * partial_scale;
    let ptser = token_set_ratio(p1, p2, true) as f64 * UNBASE_SCALE * partial_scale;

    to_score(base.max(partial).max(ptsor).max(ptser))
}
