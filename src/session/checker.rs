use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::lookup::LookupResult;
use crate::overrides::OverrideStore;
use crate::resolver::KnowledgeResolver;
use crate::scoring::{SimilarityScorer, Verdict};

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub question: String,
    pub answer: String,
    pub reference: String,
    pub score: f64,
    pub verdict: Verdict,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question:  {}", self.question)?;
        writeln!(f, "Answer:    {}", self.answer)?;
        writeln!(f, "Reference: {}", self.reference)?;
        writeln!(f, "Score:     {:.2}", self.score)?;
        write!(f, "Verdict:   {}", self.verdict)
    }
}

/// Resolver plus scorer: one question/answer cycle at a time.
pub struct FactChecker {
    resolver: KnowledgeResolver,
    scorer: SimilarityScorer,
}

impl FactChecker {
    pub fn new(resolver: KnowledgeResolver, scorer: SimilarityScorer) -> Self {
        Self { resolver, scorer }
    }

    /// Builds the default source chain and a scorer using the configured threshold.
    ///
    /// `config` must already be validated.
    pub fn from_config(config: &Config, overrides: Arc<OverrideStore>) -> LookupResult<Self> {
        let resolver = KnowledgeResolver::from_config(config, overrides)?;
        let scorer = SimilarityScorer::new().with_threshold(config.hallucination_threshold);
        Ok(Self::new(resolver, scorer))
    }

    pub fn resolver(&self) -> &KnowledgeResolver {
        &self.resolver
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Resolves the reference for `question` and scores `answer` against it.
    ///
    /// Both inputs are trimmed first.
    pub async fn check(&self, question: &str, answer: &str) -> CheckReport {
        let question = question.trim();
        let answer = answer.trim();

        let reference = self.resolver.resolve(question).await;
        let (score, verdict) = self.scorer.verdict(answer, &reference);

        info!(score, verdict = verdict.label(), "Checked answer");
        CheckReport {
            question: question.to_string(),
            answer: answer.to_string(),
            reference,
            score,
            verdict,
        }
    }
}
