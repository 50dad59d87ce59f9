use super::super::domain::ScoredOption;
use super::rules::format_score;

/// The three explanation shapes, chosen by which criterion carried the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningTemplate {
    ImportanceLed,
    UrgencyLed,
    Balanced,
}

impl ReasoningTemplate {
    pub fn select(winner: &ScoredOption) -> Self {
        let (urgency, importance, difficulty) =
            (winner.urgency, winner.importance, winner.difficulty);

        if importance >= urgency && importance >= difficulty {
            Self::ImportanceLed
        } else if urgency > importance && urgency >= difficulty {
            Self::UrgencyLed
        } else {
            Self::Balanced
        }
    }

    pub fn render(self, winner: &ScoredOption) -> String {
        let ScoredOption {
            name,
            urgency,
            importance,
            difficulty,
            score,
        } = winner;

        match self {
            Self::ImportanceLed => format!(
                "{name} stands out as your best choice. It scored {importance}/10 on importance, \
                 suggesting it delivers the most long-term value. With an urgency score of \
                 {urgency} and a difficulty of {difficulty}/10, it's the option most worth your \
                 energy right now."
            ),
            Self::UrgencyLed => format!(
                "Given the time-sensitivity of your options, {name} rises to the top. Its urgency \
                 score of {urgency}/10 suggests it needs attention now. Paired with an importance \
                 score of {importance}/10, this is your most time-critical and valuable task."
            ),
            Self::Balanced => format!(
                "{name} offers the best overall balance. No single factor dominates, but together \
                 — urgency {urgency}, importance {importance}, difficulty {difficulty} — it \
                 achieves the strongest composite SnapScore of {} out of 10.",
                format_score(*score)
            ),
        }
    }
}

pub fn generate_reasoning(winner: &ScoredOption) -> String {
    ReasoningTemplate::select(winner).render(winner)
}
