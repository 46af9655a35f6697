//! Exact-tier scoring of a normalized description against each category.

use crate::lexicon::Lexicon;

/// Weight for a cue found anywhere in the normalized text.
pub const PHRASE_WEIGHT: u32 = 2;
/// Weight for a cue equal to one of the tokens.
pub const TOKEN_WEIGHT: u32 = 1;

/// Score one category. Phrase and token checks are independent, so a
/// single-word cue present as a token counts for both.
pub fn score(tokens: &[&str], normalized: &str, cues: &[String]) -> u32 {
    cues.iter()
        .map(|cue| {
            let mut s = 0;
            if normalized.contains(cue.as_str()) {
                s += PHRASE_WEIGHT;
            }
            if tokens.iter().any(|t| *t == cue.as_str()) {
                s += TOKEN_WEIGHT;
            }
            s
        })
        .sum()
}

/// Scores for every category, indexed like the lexicon's declaration order.
pub fn score_all(lexicon: &Lexicon, tokens: &[&str], normalized: &str) -> Vec<u32> {
    (0..lexicon.len())
        .map(|idx| score(tokens, normalized, lexicon.cues_at(idx)))
        .collect()
}

/// Index of the highest score; the earliest category wins ties.
pub fn best(scores: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((idx, s)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconEntry;
    use crate::text::{normalize, tokenize};

    fn cues(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_phrase_and_token_are_additive() {
        let n = normalize("Uber ride downtown");
        let t = tokenize(&n);
        // "uber": 2 + 1, "ride": 2 + 1
        assert_eq!(score(&t, &n, &cues(&["uber", "ride", "taxi"])), 6);
    }

    #[test]
    fn test_substring_without_token() {
        let n = normalize("PAYROLL ACME");
        let t = tokenize(&n);
        // "pay" is inside "payroll" but not a token; "payroll" is both
        assert_eq!(score(&t, &n, &cues(&["pay"])), 2);
        assert_eq!(score(&t, &n, &cues(&["payroll"])), 3);
    }

    #[test]
    fn test_multi_word_cue_is_phrase_only() {
        let n = normalize("Paid via direct deposit");
        let t = tokenize(&n);
        assert_eq!(score(&t, &n, &cues(&["direct deposit"])), 2);
        let n2 = normalize("direct from deposit box");
        let t2 = tokenize(&n2);
        assert_eq!(score(&t2, &n2, &cues(&["direct deposit"])), 0);
    }

    #[test]
    fn test_best_prefers_declaration_order_on_ties() {
        assert_eq!(best(&[0, 3, 3, 1]), Some((1, 3)));
        assert_eq!(best(&[0, 0]), Some((0, 0)));
        assert_eq!(best(&[]), None);
    }

    #[test]
    fn test_score_all_uses_lexicon_order() {
        let lex = Lexicon::from_entries(vec![
            LexiconEntry { name: "A".into(), cues: cues(&["coffee"]) },
            LexiconEntry { name: "B".into(), cues: cues(&["beans", "coffee"]) },
        ])
        .unwrap();
        let n = normalize("coffee beans");
        let t = tokenize(&n);
        assert_eq!(score_all(&lex, &t, &n), vec![3, 6]);
    }
}
