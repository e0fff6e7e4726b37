// Knowledge quiz
// Static question bank with a small answer/advance state machine

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub score: u32,
}

fn question(question: &str, options: [&str; 4], correct_answer: &str) -> QuizQuestion {
    QuizQuestion {
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct_answer.to_string(),
    }
}

pub fn question_bank() -> Vec<QuizQuestion> {
    vec![
        question(
            "Which insect is known for its bioluminescence?",
            ["Ant", "Firefly", "Butterfly", "Dragonfly"],
            "Firefly",
        ),
        question(
            "What is the primary ecological role of bees?",
            ["Decomposer", "Predator", "Pollinator", "Pest"],
            "Pollinator",
        ),
        question(
            "Which of these insects goes through complete metamorphosis?",
            ["Grasshopper", "Dragonfly", "Termite", "Butterfly"],
            "Butterfly",
        ),
    ]
}

pub struct QuizState {
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<String>,
    score: u32,
}

impl Default for QuizState {
    fn default() -> Self {
        Self {
            questions: question_bank(),
            index: 0,
            selected: None,
            score: 0,
        }
    }
}

impl QuizState {
    pub fn current(&self) -> &QuizQuestion {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Record an answer for the current question. Once answered, further
    /// selections are ignored and the original outcome is returned again.
    pub fn select(&mut self, option: &str) -> AnswerOutcome {
        let correct_answer = self.current().correct_answer.clone();

        if self.selected.is_none() {
            self.selected = Some(option.to_string());
            if option == correct_answer {
                self.score += 1;
            }
        }

        let selected = self.selected.as_deref().unwrap_or_default();
        AnswerOutcome {
            correct: selected == correct_answer,
            correct_answer,
            score: self.score,
        }
    }

    /// Clear the selection and advance cyclically to the next question
    pub fn advance(&mut self) -> &QuizQuestion {
        self.selected = None;
        self.index = (self.index + 1) % self.questions.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answer_scores() {
        let mut quiz = QuizState::default();
        let outcome = quiz.select("Firefly");
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);
        assert!(quiz.answered());
    }

    #[test]
    fn test_wrong_answer_does_not_score() {
        let mut quiz = QuizState::default();
        let outcome = quiz.select("Ant");
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, "Firefly");
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_second_selection_ignored() {
        let mut quiz = QuizState::default();
        quiz.select("Ant");
        // Switching to the right answer afterwards must not count
        let outcome = quiz.select("Firefly");
        assert!(!outcome.correct);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_advance_clears_selection_and_wraps() {
        let mut quiz = QuizState::default();
        quiz.select("Firefly");
        let next = quiz.advance();
        assert_eq!(next.correct_answer, "Pollinator");
        assert!(!quiz.answered());
        assert_eq!(quiz.index(), 1);

        quiz.advance();
        quiz.advance();
        assert_eq!(quiz.index(), 0);
        // Score persists across the wrap
        assert_eq!(quiz.score(), 1);
    }
}
