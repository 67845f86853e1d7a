#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which scoring rule an answer falls under.
pub enum AnswerKind {
    /// Categorical answer (few tokens): containment or near-match only.
    Short,
    /// Free text: smooth similarity ratio.
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Informal label attached to a score.
pub enum Verdict {
    /// Score reached the threshold.
    MatchesReference,
    /// Score fell below the threshold.
    PossibleHallucination,
}

impl Verdict {
    /// Labels `score`; anything strictly below `threshold` is a possible hallucination.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score < threshold {
            Verdict::PossibleHallucination
        } else {
            Verdict::MatchesReference
        }
    }

    /// Returns `true` if the answer agrees with the reference.
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::MatchesReference)
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::MatchesReference => "matches reference",
            Verdict::PossibleHallucination => "possible hallucination",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
