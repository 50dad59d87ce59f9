use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard cap on the number of options a decision may hold.
pub const MAX_OPTIONS: usize = 5;
/// Fewest usable options a ranking accepts.
pub const MIN_OPTIONS: usize = 2;
/// Display names are cut to this many UTF-16 code units after trimming.
pub const MAX_NAME_CHARS: usize = 60;

/// A single criterion rating, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(10);
    /// Midpoint used whenever an input cannot be read as a number.
    pub const DEFAULT: Rating = Rating(5);

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, 10) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self::clamped(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating exactly as the caller supplied it: a slider value, a typed number,
/// or free text from a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl RawRating {
    /// Reads the leading integer the way a form parser would and clamps it.
    /// Anything without a usable integer falls back to the midpoint.
    pub fn normalize(raw: Option<&RawRating>) -> Rating {
        let parsed = match raw {
            Some(RawRating::Whole(value)) => Some(*value),
            Some(RawRating::Fractional(value)) if value.is_finite() => Some(value.trunc() as i64),
            Some(RawRating::Fractional(_)) => None,
            Some(RawRating::Text(text)) => leading_integer(text),
            None => None,
        };

        parsed.map(Rating::clamped).unwrap_or_default()
    }
}

impl From<i64> for RawRating {
    fn from(value: i64) -> Self {
        Self::Whole(value)
    }
}

impl From<&str> for RawRating {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Oversized digit runs still clamp to the nearest bound.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// One option as entered by the user, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub urgency: Option<RawRating>,
    #[serde(default)]
    pub importance: Option<RawRating>,
    #[serde(default)]
    pub difficulty: Option<RawRating>,
}

impl OptionInput {
    pub fn rated(name: impl Into<String>, urgency: i64, importance: i64, difficulty: i64) -> Self {
        Self {
            name: name.into(),
            urgency: Some(RawRating::Whole(urgency)),
            importance: Some(RawRating::Whole(importance)),
            difficulty: Some(RawRating::Whole(difficulty)),
        }
    }

    /// Unnamed option with every slider at its starting position.
    pub fn blank() -> Self {
        Self::rated("", 5, 5, 5)
    }
}

/// The shareable unit: a context line plus the options being weighed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub context: String,
    pub options: Vec<OptionInput>,
}

impl Decision {
    pub fn new(context: impl Into<String>, options: Vec<OptionInput>) -> Self {
        Self {
            context: context.into(),
            options,
        }
    }

    /// Starting state: no context and two untouched options.
    pub fn blank() -> Self {
        Self::new("", vec![OptionInput::blank(), OptionInput::blank()])
    }

    /// Built-in walkthrough scenario.
    pub fn example() -> Self {
        Self::new(
            "Best weekend project approach",
            vec![
                OptionInput::rated("Build MVP Fast", 9, 8, 4),
                OptionInput::rated("Deep Research Mode", 4, 9, 8),
                OptionInput::rated("Learn New Framework", 6, 7, 9),
            ],
        )
    }

    pub fn push_option(&mut self, option: OptionInput) -> Result<(), DecisionFull> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(DecisionFull);
        }
        self.options.push(option);
        Ok(())
    }
}

impl Default for Decision {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a decision holds at most 5 options")]
pub struct DecisionFull;

/// A normalized option with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    pub name: String,
    pub urgency: Rating,
    pub importance: Rating,
    pub difficulty: Rating,
    pub score: f64,
}

/// Non-blocking signals raised alongside a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    MissingContext,
    LowDifferentiation,
    CloseScores,
}

impl Advisory {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingContext => "Note: Adding a decision context helps keep track of results!",
            Self::LowDifferentiation => {
                "Low differentiation — adjust priorities for a better recommendation."
            }
            Self::CloseScores => {
                "Extremely close scores! Review the breakdown table to see the tie-breaker logic."
            }
        }
    }
}

/// Outcome of one scoring run, ranked best-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub options: Vec<ScoredOption>,
    pub confidence: u8,
    pub reasoning: String,
    pub advisories: Vec<Advisory>,
}

impl RankedResult {
    pub fn winner(&self) -> Option<&ScoredOption> {
        self.options.first()
    }

    pub fn low_differentiation(&self) -> bool {
        self.advisories.contains(&Advisory::LowDifferentiation)
    }

    pub fn close_scores(&self) -> bool {
        self.advisories.contains(&Advisory::CloseScores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_and_defaults() {
        assert_eq!(RawRating::normalize(Some(&RawRating::Whole(14))), Rating::MAX);
        assert_eq!(RawRating::normalize(Some(&RawRating::Whole(-3))), Rating::MIN);
        assert_eq!(RawRating::normalize(Some(&RawRating::Whole(7))).value(), 7);
        assert_eq!(RawRating::normalize(None), Rating::DEFAULT);
        assert_eq!(
            RawRating::normalize(Some(&RawRating::Fractional(f64::NAN))),
            Rating::DEFAULT
        );
    }

    #[test]
    fn normalize_reads_leading_integer_from_text() {
        assert_eq!(RawRating::normalize(Some(&"7abc".into())).value(), 7);
        assert_eq!(RawRating::normalize(Some(&" 12".into())).value(), 10);
        assert_eq!(RawRating::normalize(Some(&"-4".into())).value(), 1);
        assert_eq!(RawRating::normalize(Some(&"high".into())), Rating::DEFAULT);
        assert_eq!(RawRating::normalize(Some(&"".into())), Rating::DEFAULT);
        assert_eq!(
            RawRating::normalize(Some(&"99999999999999999999999".into())),
            Rating::MAX
        );
    }

    #[test]
    fn normalize_truncates_fractions() {
        assert_eq!(RawRating::normalize(Some(&RawRating::Fractional(7.9))).value(), 7);
        assert_eq!(RawRating::normalize(Some(&RawRating::Fractional(0.4))), Rating::MIN);
    }

    #[test]
    fn raw_ratings_deserialize_from_numbers_and_text() {
        let option: OptionInput = serde_json::from_str(
            r#"{"name":"A","urgency":9,"importance":"8","difficulty":4.5}"#,
        )
        .expect("option parses");

        assert_eq!(option.urgency, Some(RawRating::Whole(9)));
        assert_eq!(option.importance, Some(RawRating::Text("8".to_string())));
        assert_eq!(option.difficulty, Some(RawRating::Fractional(4.5)));
    }

    #[test]
    fn push_option_refuses_a_sixth_option() {
        let mut decision = Decision::blank();
        for _ in 0..3 {
            decision.push_option(OptionInput::blank()).expect("room left");
        }

        assert_eq!(decision.options.len(), MAX_OPTIONS);
        assert_eq!(decision.push_option(OptionInput::blank()), Err(DecisionFull));
    }
}
