use std::cmp::Ordering;

use super::super::domain::{
    OptionInput, RawRating, ScoredOption, MAX_NAME_CHARS, MAX_OPTIONS, MIN_OPTIONS,
};
use super::rules::{calculate_score, CLOSE_SCORE_GAP, TIE_TOLERANCE};

/// Ranked options plus the two ranking advisories.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub options: Vec<ScoredOption>,
    pub low_differentiation: bool,
    pub close_scores: bool,
}

/// Raised when a decision cannot be ranked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter at least 2 valid options to compare.")]
    InsufficientOptions { usable: usize },
    #[error("A decision can compare at most 5 options (received {provided}).")]
    TooManyOptions { provided: usize },
}

pub fn rank(inputs: &[OptionInput]) -> Result<Ranking, ValidationError> {
    if inputs.len() > MAX_OPTIONS {
        return Err(ValidationError::TooManyOptions {
            provided: inputs.len(),
        });
    }

    let mut options: Vec<ScoredOption> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let typed = truncate_utf16(input.name.trim(), MAX_NAME_CHARS);
        // Trailing blank slots are ignored once two options are in hand.
        if typed.is_empty() && options.len() >= MIN_OPTIONS {
            continue;
        }
        let name = if typed.is_empty() {
            format!("Option {}", options.len() + 1)
        } else {
            typed
        };

        let urgency = RawRating::normalize(input.urgency.as_ref());
        let importance = RawRating::normalize(input.importance.as_ref());
        let difficulty = RawRating::normalize(input.difficulty.as_ref());

        options.push(ScoredOption {
            name,
            urgency,
            importance,
            difficulty,
            score: calculate_score(urgency, importance, difficulty),
        });
    }

    if options.len() < MIN_OPTIONS {
        return Err(ValidationError::InsufficientOptions {
            usable: options.len(),
        });
    }

    let low_differentiation = options.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        a.urgency == b.urgency && a.importance == b.importance && a.difficulty == b.difficulty
    });

    sort_by_rank(&mut options);

    let close_scores = (options[0].score - options[1].score).abs() <= CLOSE_SCORE_GAP;

    Ok(Ranking {
        options,
        low_differentiation,
        close_scores,
    })
}

/// Cuts `text` to at most `max_units` UTF-16 code units, the length a browser
/// form reports. A character that would straddle the limit is dropped whole.
fn truncate_utf16(text: &str, max_units: usize) -> String {
    let mut units = 0;
    text.chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= max_units
        })
        .collect()
}

/// Best-first ordering. Scores inside the tie tolerance fall through to
/// importance (higher first), urgency (higher first), then difficulty
/// (lower first).
pub fn compare_ranked(a: &ScoredOption, b: &ScoredOption) -> Ordering {
    let diff = b.score - a.score;
    if diff.abs() > TIE_TOLERANCE {
        return if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    b.importance
        .cmp(&a.importance)
        .then_with(|| b.urgency.cmp(&a.urgency))
        .then_with(|| a.difficulty.cmp(&b.difficulty))
}

// `compare_ranked` is not transitive under the tolerance, so the std sorts
// cannot be used. Stable insertion sort over at most five entries.
fn sort_by_rank(options: &mut [ScoredOption]) {
    for i in 1..options.len() {
        let mut j = i;
        while j > 0 && compare_ranked(&options[j - 1], &options[j]) == Ordering::Greater {
            options.swap(j - 1, j);
            j -= 1;
        }
    }
}
