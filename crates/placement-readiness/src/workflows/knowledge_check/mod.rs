//! Short-answer knowledge check that complements the self-reported profile.

pub mod router;

pub use router::knowledge_check_router;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single prompt with the phrase a correct answer must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeQuestion {
    pub id: String,
    pub prompt: String,
    pub expected: String,
}

impl KnowledgeQuestion {
    fn new(id: &str, prompt: &str, expected: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Case-insensitive containment of the expected phrase.
    pub fn accepts(&self, response: &str) -> bool {
        response
            .to_lowercase()
            .contains(&self.expected.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSection {
    pub topic: String,
    pub questions: Vec<KnowledgeQuestion>,
}

/// Public view of a question; expected answers stay server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: String,
    pub topic: String,
    pub prompt: String,
}

/// Score band shown alongside the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeVerdict {
    PlacementReady,
    ImprovementNeeded,
    FollowRoadmap,
}

impl KnowledgeVerdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => KnowledgeVerdict::PlacementReady,
            50..=79 => KnowledgeVerdict::ImprovementNeeded,
            _ => KnowledgeVerdict::FollowRoadmap,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            KnowledgeVerdict::PlacementReady => "Excellent! You are placement ready.",
            KnowledgeVerdict::ImprovementNeeded => "Good progress. Some improvement needed.",
            KnowledgeVerdict::FollowRoadmap => "Needs improvement. Follow the roadmap.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeScore {
    pub answered: usize,
    pub correct: usize,
    pub score: u8,
    pub verdict: KnowledgeVerdict,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeCheckError {
    #[error("answer at least one question")]
    NoAnswers,
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeCheck {
    sections: Vec<KnowledgeSection>,
}

impl KnowledgeCheck {
    pub fn new(sections: Vec<KnowledgeSection>) -> Self {
        Self { sections }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            KnowledgeSection {
                topic: "Web Development".to_string(),
                questions: vec![
                    KnowledgeQuestion::new(
                        "web-html",
                        "What does HTML stand for?",
                        "Hyper Text Markup Language",
                    ),
                    KnowledgeQuestion::new("web-css", "What is CSS used for?", "Styling web pages"),
                ],
            },
            KnowledgeSection {
                topic: "Data Science".to_string(),
                questions: vec![
                    KnowledgeQuestion::new(
                        "data-overfitting",
                        "What is overfitting?",
                        "Model performs well on training but poor on test",
                    ),
                    KnowledgeQuestion::new("data-mean", "Mean of [2,4,6]?", "4"),
                ],
            },
        ])
    }

    pub fn sections(&self) -> &[KnowledgeSection] {
        &self.sections
    }

    pub fn questions(&self) -> Vec<QuestionView> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.questions.iter().map(|question| QuestionView {
                    id: question.id.clone(),
                    topic: section.topic.clone(),
                    prompt: question.prompt.clone(),
                })
            })
            .collect()
    }

    fn find(&self, id: &str) -> Option<&KnowledgeQuestion> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .find(|question| question.id == id)
    }

    /// Blank responses are skipped; the percentage is over answered questions only.
    pub fn score(
        &self,
        answers: &BTreeMap<String, String>,
    ) -> Result<KnowledgeScore, KnowledgeCheckError> {
        let mut answered = 0;
        let mut correct = 0;

        for (id, response) in answers {
            let question = self
                .find(id)
                .ok_or_else(|| KnowledgeCheckError::UnknownQuestion(id.clone()))?;
            if response.trim().is_empty() {
                continue;
            }
            answered += 1;
            if question.accepts(response) {
                correct += 1;
            }
        }

        if answered == 0 {
            return Err(KnowledgeCheckError::NoAnswers);
        }

        let score = (correct * 100 / answered) as u8;
        let verdict = KnowledgeVerdict::from_score(score);
        Ok(KnowledgeScore {
            answered,
            correct,
            score,
            verdict,
            message: verdict.message(),
        })
    }
}

impl Default for KnowledgeCheck {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(id, response)| (id.to_string(), response.to_string()))
            .collect()
    }

    #[test]
    fn matches_expected_phrase_case_insensitively() {
        let check = KnowledgeCheck::standard();
        let score = check
            .score(&answers(&[
                ("web-html", "it is hyper text markup language"),
                ("web-css", "Styling Web Pages"),
            ]))
            .expect("answers scored");

        assert_eq!((score.answered, score.correct, score.score), (2, 2, 100));
        assert_eq!(score.verdict, KnowledgeVerdict::PlacementReady);
        assert_eq!(score.message, "Excellent! You are placement ready.");
    }

    #[test]
    fn blank_answers_do_not_count() {
        let check = KnowledgeCheck::standard();
        let score = check
            .score(&answers(&[
                ("web-html", "HTML"),
                ("web-css", "   "),
                ("data-mean", "the mean is 4"),
                ("data-overfitting", "no idea"),
            ]))
            .expect("answers scored");

        assert_eq!(score.answered, 3);
        assert_eq!(score.correct, 1);
        assert_eq!(score.score, 33);
        assert_eq!(score.verdict, KnowledgeVerdict::FollowRoadmap);
    }

    #[test]
    fn score_bands_follow_thresholds() {
        assert_eq!(KnowledgeVerdict::from_score(80), KnowledgeVerdict::PlacementReady);
        assert_eq!(KnowledgeVerdict::from_score(79), KnowledgeVerdict::ImprovementNeeded);
        assert_eq!(KnowledgeVerdict::from_score(50), KnowledgeVerdict::ImprovementNeeded);
        assert_eq!(KnowledgeVerdict::from_score(49), KnowledgeVerdict::FollowRoadmap);
    }

    #[test]
    fn requires_at_least_one_answer() {
        let check = KnowledgeCheck::standard();
        assert_eq!(
            check.score(&answers(&[("web-html", "")])),
            Err(KnowledgeCheckError::NoAnswers)
        );
        assert_eq!(
            check.score(&BTreeMap::new()),
            Err(KnowledgeCheckError::NoAnswers)
        );
    }

    #[test]
    fn rejects_unknown_question_ids() {
        let check = KnowledgeCheck::standard();
        assert_eq!(
            check.score(&answers(&[("os-paging", "virtual memory")])),
            Err(KnowledgeCheckError::UnknownQuestion("os-paging".to_string()))
        );
    }

    #[test]
    fn question_views_hide_expected_answers() {
        let views = KnowledgeCheck::standard().questions();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].topic, "Web Development");
        assert_eq!(views[3].prompt, "Mean of [2,4,6]?");
    }
}
