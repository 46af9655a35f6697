//! Fuzzy matching by sequence similarity.
//!
//! `ratio` is the Ratcliff/Obershelp measure: find the longest common
//! contiguous block, recurse on the pieces to its left and right, and report
//! `2 * matched / (len(a) + len(b))`. Inputs here are single tokens and short
//! category names, so the quadratic block search is fine.

use crate::lexicon::Lexicon;

/// Similarity of `a` and `b` in `[0, 1]`. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Sum of the sizes of all matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j] = length of the common suffix ending at a[i-1], b[j-1]
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut cur = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            cur[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if cur[k] > best_size {
                best_size = cur[k];
                best_i = i + 1 - best_size;
                best_j = j + 1 - best_size;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_size)
}

/// Best candidate whose ratio against `word` reaches `cutoff`. On equal
/// ratios the earliest candidate wins.
///
/// `ratio` is not symmetric, so the order matters: each candidate is scored
/// as `ratio(candidate, word)`.
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(c, _)| c)
}

/// Closest cue in the flattened lexicon to `token`, if any reaches `cutoff`.
pub fn closest_cue<'a>(lexicon: &'a Lexicon, token: &str, cutoff: f64) -> Option<&'a str> {
    closest_match(
        token,
        lexicon.all_cues().iter().map(|(cue, _)| cue.as_str()),
        cutoff,
    )
}
