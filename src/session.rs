//! Scoring state for one interactive exam run.

use crate::models::{Answer, Question};

/// Owns the question bank and the answers given so far. The interactive
/// loop in the crate root drives it; the state itself performs no IO.
#[derive(Debug)]
pub struct Session {
    questions: Vec<Question>,
    answers: Vec<Option<Answer>>,
    correct: usize,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        let total = questions.len();
        Self {
            questions,
            answers: vec![None; total],
            correct: 0,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> &Question {
        &self.questions[index]
    }

    pub fn score(&self) -> usize {
        self.correct
    }

    /// Record the user's 1-based choice for a question. Returns whether
    /// it was correct.
    pub fn record_answer(&mut self, index: usize, choice: usize) -> bool {
        let question = &self.questions[index];
        let selected = question.options[choice - 1].clone();
        let correct = question.is_correct(&selected);
        if correct {
            self.correct += 1;
        }
        self.answers[index] = Some(Answer { selected, correct });
        correct
    }

    /// Final report over the full bank, missed questions in source order.
    pub fn report(&self) -> Report {
        let missed = self
            .questions
            .iter()
            .zip(self.answers.iter())
            .filter_map(|(question, answer)| match answer {
                Some(answer) if !answer.correct => Some(Missed {
                    question: question.clone(),
                    answer: answer.clone(),
                }),
                _ => None,
            })
            .collect();

        Report {
            correct: self.correct,
            total: self.total_questions(),
            missed,
        }
    }
}

/// How a session ended. Quit keywords and end of input abort the run
/// without a report; embedders decide what an abort means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Report),
    Aborted,
}

/// Final score plus the questions answered incorrectly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub correct: usize,
    pub total: usize,
    pub missed: Vec<Missed>,
}

/// One missed question paired with the answer the user gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missed {
    pub question: Question,
    pub answer: Answer,
}
