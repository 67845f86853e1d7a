//! Pattern-matched facts answered from a knowledge graph.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::error::{LookupError, LookupResult};
use super::source::{KnowledgeSource, collapse};
use super::wikidata::KnowledgeGraph;

/// Property: capital.
pub const CAPITAL_PROPERTY: &str = "P36";
/// Property: head of government.
pub const HEAD_OF_GOVERNMENT_PROPERTY: &str = "P6";
/// Entity: United States of America.
pub const UNITED_STATES_ENTITY: &str = "Q30";
/// Hardcoded answer for the boiling point of water at sea level.
pub const WATER_BOILING_POINT: &str = "100°C";

static CAPITAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Thủ đô của (.+?) là gì").expect("capital pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// A question form the structured lookup knows how to answer.
pub enum QuestionShape {
    /// "Thủ đô của {country} là gì".
    CapitalOf { country: String },
    /// Mentions "tổng thống" and "hoa kỳ".
    UsHeadOfState,
    /// Mentions "nước sôi".
    WaterBoilingPoint,
}

impl QuestionShape {
    /// Every shape `question` matches, in the order they should be tried.
    pub fn detect(question: &str) -> Vec<QuestionShape> {
        let lowered = question.to_lowercase();
        let mut shapes = Vec::new();

        if lowered.contains("thủ đô")
            && let Some(caps) = CAPITAL_PATTERN.captures(question)
        {
            let country = caps[1].trim();
            if !country.is_empty() {
                shapes.push(QuestionShape::CapitalOf {
                    country: country.to_string(),
                });
            }
        }

        if lowered.contains("tổng thống") && lowered.contains("hoa kỳ") {
            shapes.push(QuestionShape::UsHeadOfState);
        }

        if lowered.contains("nước sôi") {
            shapes.push(QuestionShape::WaterBoilingPoint);
        }

        shapes
    }
}

/// Structured fact stage: detects a question shape and reads the fact from a graph.
///
/// Only the top entity-search hit is considered.
pub struct StructuredFactLookup {
    graph: Arc<dyn KnowledgeGraph>,
}

impl StructuredFactLookup {
    pub fn new(graph: Arc<dyn KnowledgeGraph>) -> Self {
        Self { graph }
    }

    /// Answer for the first matching shape that yields one, or the last failure.
    pub async fn try_lookup(&self, question: &str) -> LookupResult<String> {
        let shapes = QuestionShape::detect(question);
        let mut last_error = LookupError::UnsupportedQuestion;

        for shape in shapes {
            match self.answer(&shape).await {
                Ok(text) if !text.is_empty() => return Ok(text),
                Ok(_) => {}
                Err(e) => {
                    debug!(?shape, reason = %e, "Structured shape unanswered");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    async fn answer(&self, shape: &QuestionShape) -> LookupResult<String> {
        match shape {
            QuestionShape::CapitalOf { country } => {
                let entity = self
                    .graph
                    .search_entities(country, 1)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| LookupError::EntityNotFound {
                        query: country.clone(),
                    })?;
                let capital = self
                    .graph
                    .attribute_label(&entity, CAPITAL_PROPERTY)
                    .await?;
                Ok(format!("Thủ đô của {country} là {capital}."))
            }
            QuestionShape::UsHeadOfState => {
                let president = self
                    .graph
                    .attribute_label(UNITED_STATES_ENTITY, HEAD_OF_GOVERNMENT_PROPERTY)
                    .await?;
                Ok(format!("Tổng thống Hoa Kỳ hiện tại là {president}."))
            }
            QuestionShape::WaterBoilingPoint => Ok(WATER_BOILING_POINT.to_string()),
        }
    }
}

#[async_trait]
impl KnowledgeSource for StructuredFactLookup {
    fn name(&self) -> &str {
        "structured"
    }

    async fn lookup(&self, question: &str) -> String {
        collapse(self.name(), self.try_lookup(question).await)
    }
}
