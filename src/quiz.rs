//! Quiz session state machine.
//!
//! Pure state, no terminal involvement: the UI layer reads the session and
//! forwards user actions into it. Phases follow the question/answer/score/
//! delete-confirm cycle; quiz modes (free response, multiple choice) track a
//! running score, flash cards don't.

use std::fmt;

use rand::seq::SliceRandom;

use crate::models::{Element, Mode, Order, Phase};

/// Deletion was rejected because only one element remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastElementError;

impl fmt::Display for LastElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You can't delete the last element.")
    }
}

impl std::error::Error for LastElementError {}

pub struct QuizSession {
    /// Master element list in insertion order. Miss counts live here.
    elements: Vec<Element>,
    /// Presentation order: indices into `elements`, rebuilt on order change.
    sequence: Vec<usize>,
    position: usize,
    mode: Mode,
    phase: Phase,
    order: Order,
    /// Verdict for the question just answered, `None` until a submission.
    answer_correct: Option<bool>,
    correct_count: usize,
    /// Integer average of misses across all elements.
    average_misses: u32,
    /// Multiple-choice options for the current question.
    choices: Vec<String>,
}

impl QuizSession {
    /// Starts a session in flash-card mode. `elements` must be non-empty;
    /// the loaders in [`crate::elements`] guarantee that.
    pub fn new(elements: Vec<Element>, order: Order) -> Self {
        debug_assert!(!elements.is_empty());

        let mut session = Self {
            elements,
            sequence: Vec::new(),
            position: 0,
            mode: Mode::FlashCard,
            phase: Phase::Question,
            order,
            answer_correct: None,
            correct_count: 0,
            average_misses: 0,
            choices: Vec::new(),
        };
        session.rebuild_sequence();
        session.recompute_average();
        session
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn current(&self) -> &Element {
        &self.elements[self.sequence[self.position]]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn answer_correct(&self) -> Option<bool> {
        self.answer_correct
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn average_misses(&self) -> u32 {
        self.average_misses
    }

    /// 1-based position for the "question X of N" header.
    pub fn question_number(&self) -> usize {
        self.position + 1
    }

    pub fn is_last_question(&self) -> bool {
        self.position + 1 == self.sequence.len()
    }

    /// True when the current element has been missed more often than average.
    pub fn current_is_frequent_miss(&self) -> bool {
        self.current().misses > self.average_misses
    }

    // ── Mode and order ──────────────────────────────────────────────────

    /// Switches mode. Always restarts at the first element in the question
    /// phase; quiz modes also reset the score.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.position = 0;
        self.phase = Phase::Question;
        self.answer_correct = None;
        if mode.is_quiz() {
            self.correct_count = 0;
        }
        self.refresh_choices();
    }

    /// Switches between fixed and shuffled presentation. Shuffled reshuffles
    /// every time it is applied. Like a mode switch, this restarts at the
    /// first element with a fresh question; resequencing mid-question would
    /// leave the screen grading an element no longer current.
    pub fn set_order(&mut self, order: Order) {
        self.order = order;
        self.rebuild_sequence();
        self.position = 0;
        self.phase = Phase::Question;
        self.answer_correct = None;
        self.refresh_choices();
    }

    fn rebuild_sequence(&mut self) {
        self.sequence = (0..self.elements.len()).collect();
        if self.order == Order::Shuffled {
            self.sequence.shuffle(&mut rand::thread_rng());
        }
    }

    // ── Question flow ───────────────────────────────────────────────────

    /// Flash-card mode: reveal the hidden name.
    pub fn reveal_answer(&mut self) {
        if self.mode == Mode::FlashCard && self.phase == Phase::Question {
            self.phase = Phase::Answer;
        }
    }

    /// Quiz modes: grade an answer. Correct answers bump the score exactly
    /// once; wrong ones bump the element's miss count and the average.
    pub fn submit_answer(&mut self, answer: &str) {
        if !self.mode.is_quiz() || self.phase != Phase::Question {
            return;
        }

        let idx = self.sequence[self.position];
        if self.elements[idx].matches_answer(answer) {
            self.answer_correct = Some(true);
            self.correct_count += 1;
        } else {
            self.answer_correct = Some(false);
            self.elements[idx].record_miss();
            self.recompute_average();
        }
        self.phase = Phase::Answer;
    }

    /// Moves to the next element. Past the end the index wraps to zero; in
    /// quiz modes the wrap enters the score phase instead of a new question.
    pub fn advance(&mut self) {
        match self.phase {
            Phase::Score | Phase::DeleteConfirm => return,
            // Quiz modes lock the next button until the answer is shown.
            Phase::Question if self.mode.is_quiz() => return,
            _ => {}
        }

        self.position += 1;
        self.answer_correct = None;

        if self.position >= self.sequence.len() {
            self.position = 0;
            if self.mode.is_quiz() {
                self.phase = Phase::Score;
                self.choices.clear();
                return;
            }
        }

        self.phase = Phase::Question;
        self.refresh_choices();
    }

    /// Leaves the score screen: re-applies the order and drops back to
    /// flash cards, as the original quiz does after its score alert.
    pub fn dismiss_score(&mut self) {
        if self.phase == Phase::Score {
            self.rebuild_sequence();
            self.set_mode(Mode::FlashCard);
        }
    }

    // ── Deletion ────────────────────────────────────────────────────────

    /// Flash-card answer phase: ask to delete the current element.
    pub fn request_delete(&mut self) {
        if self.mode == Mode::FlashCard && self.phase == Phase::Answer {
            self.phase = Phase::DeleteConfirm;
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.phase == Phase::DeleteConfirm {
            self.phase = Phase::Answer;
        }
    }

    /// Removes the current element. Rejected when it is the last one left;
    /// the session is unchanged and the caller surfaces the error.
    pub fn confirm_delete(&mut self) -> Result<(), LastElementError> {
        if self.phase != Phase::DeleteConfirm {
            return Ok(());
        }
        if self.elements.len() <= 1 {
            return Err(LastElementError);
        }

        let idx = self.sequence[self.position];
        self.elements.remove(idx);
        self.recompute_average();
        self.rebuild_sequence();
        self.set_mode(Mode::FlashCard);
        Ok(())
    }

    fn recompute_average(&mut self) {
        let total: u32 = self.elements.iter().map(|e| e.misses).sum();
        self.average_misses = total / self.elements.len() as u32;
    }

    // ── Multiple choice ─────────────────────────────────────────────────

    /// Builds the option list for the current question: the correct name
    /// plus up to two others drawn at random, positions shuffled.
    fn refresh_choices(&mut self) {
        self.choices.clear();
        if self.mode != Mode::MultiChoice || self.phase != Phase::Question {
            return;
        }

        let current = self.sequence[self.position];
        let mut rng = rand::thread_rng();

        let mut others: Vec<&str> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != current)
            .map(|(_, e)| e.name.as_str())
            .collect();
        others.shuffle(&mut rng);

        let mut choices: Vec<String> =
            others.into_iter().take(2).map(String::from).collect();
        choices.push(self.elements[current].name.clone());
        choices.shuffle(&mut rng);

        self.choices = choices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_session() -> QuizSession {
        QuizSession::new(crate::elements::default_set(), Order::Fixed)
    }

    fn names_in_sequence(session: &mut QuizSession) -> Vec<String> {
        // Walk the flash cards once around; advancing wraps back to start.
        let mut names = Vec::new();
        for _ in 0..session.element_count() {
            names.push(session.current().name.clone());
            session.advance();
        }
        names
    }

    #[test]
    fn spec_example_carbon_answer() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);

        session.submit_answer("carbon");
        assert_eq!(session.answer_correct(), Some(true));
        assert_eq!(session.correct_count(), 1);

        session.advance();
        assert_eq!(session.question_number(), 2);
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.current().name, "Gold");
    }

    #[test]
    fn score_increments_once_per_question() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);

        session.submit_answer("Carbon");
        // Second submission lands in the answer phase and must be ignored.
        session.submit_answer("Carbon");
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn quiz_wraps_into_score_phase() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);

        for name in ["Carbon", "Gold", "Chlorine", "Sodium"] {
            assert_eq!(session.phase(), Phase::Question);
            session.submit_answer(name);
            session.advance();
        }

        assert_eq!(session.phase(), Phase::Score);
        assert_eq!(session.correct_count(), 4);
        assert_eq!(session.question_number(), 1);

        session.dismiss_score();
        assert_eq!(session.mode(), Mode::FlashCard);
        assert_eq!(session.phase(), Phase::Question);
    }

    #[test]
    fn flash_cards_wrap_silently() {
        let mut session = default_session();
        for _ in 0..session.element_count() {
            session.advance();
        }
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.question_number(), 1);
    }

    #[test]
    fn advance_is_locked_until_answered_in_quiz_modes() {
        let mut session = default_session();
        session.set_mode(Mode::MultiChoice);

        session.advance();
        assert_eq!(session.question_number(), 1);

        session.submit_answer("Carbon");
        session.advance();
        assert_eq!(session.question_number(), 2);
    }

    #[test]
    fn mode_switch_resets_phase_and_score() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);
        session.submit_answer("Carbon");
        session.advance();
        assert_eq!(session.correct_count(), 1);

        session.set_mode(Mode::MultiChoice);
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.question_number(), 1);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.answer_correct(), None);
    }

    #[test]
    fn wrong_answers_raise_misses_and_average() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);

        // Three misses on Carbon: total 3 over 4 elements, integer avg 0.
        for _ in 0..3 {
            session.submit_answer("Xenon");
            session.set_mode(Mode::FreeResponse);
        }
        assert_eq!(session.current().misses, 3);
        assert_eq!(session.average_misses(), 0);
        assert!(session.current_is_frequent_miss());

        // A fourth miss tips the average to 1.
        session.submit_answer("Xenon");
        assert_eq!(session.average_misses(), 1);
    }

    #[test]
    fn delete_removes_one_element_and_recomputes_average() {
        let mut session = default_session();
        session.set_mode(Mode::FreeResponse);
        // Put 4 misses on Carbon so the average is 1.
        for _ in 0..4 {
            session.submit_answer("Xenon");
            session.set_mode(Mode::FreeResponse);
        }
        assert_eq!(session.average_misses(), 1);

        session.set_mode(Mode::FlashCard);
        session.reveal_answer();
        session.request_delete();
        assert_eq!(session.phase(), Phase::DeleteConfirm);

        session.confirm_delete().unwrap();
        assert_eq!(session.element_count(), 3);
        assert_eq!(session.mode(), Mode::FlashCard);
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.average_misses(), 0);
        assert!(!names_in_sequence(&mut session).contains(&"Carbon".to_string()));
    }

    #[test]
    fn deleting_last_element_is_rejected() {
        let mut session = QuizSession::new(
            vec![crate::models::Element::new("Carbon", "C", 6)],
            Order::Fixed,
        );
        session.reveal_answer();
        session.request_delete();

        assert_eq!(session.confirm_delete(), Err(LastElementError));
        assert_eq!(session.element_count(), 1);
        assert_eq!(session.phase(), Phase::DeleteConfirm);

        session.cancel_delete();
        assert_eq!(session.phase(), Phase::Answer);
    }

    #[test]
    fn delete_only_offered_after_reveal() {
        let mut session = default_session();
        session.request_delete();
        assert_eq!(session.phase(), Phase::Question);
    }

    #[test]
    fn choices_contain_answer_without_duplicates() {
        let mut session = default_session();
        session.set_mode(Mode::MultiChoice);

        for _ in 0..session.element_count() {
            let answer = session.current().name.clone();
            let choices = session.choices().to_vec();
            assert_eq!(choices.len(), 3);
            assert!(choices.contains(&answer));
            for (i, a) in choices.iter().enumerate() {
                assert!(!choices[i + 1..].contains(a));
            }
            session.submit_answer(&answer);
            session.advance();
        }
    }

    #[test]
    fn choices_shrink_with_small_sets() {
        let mut session = QuizSession::new(
            vec![
                crate::models::Element::new("Carbon", "C", 6),
                crate::models::Element::new("Gold", "Au", 79),
            ],
            Order::Fixed,
        );
        session.set_mode(Mode::MultiChoice);
        assert_eq!(session.choices().len(), 2);
    }

    #[test]
    fn choices_stay_visible_through_answer_phase() {
        let mut session = default_session();
        session.set_mode(Mode::MultiChoice);
        session.submit_answer("Carbon");
        assert_eq!(session.phase(), Phase::Answer);
        assert_eq!(session.choices().len(), 3);
    }

    #[test]
    fn order_toggle_restarts_with_a_fresh_question() {
        let mut session = default_session();
        session.set_mode(Mode::MultiChoice);
        session.submit_answer("Xenon");
        assert_eq!(session.phase(), Phase::Answer);

        session.set_order(Order::Shuffled);
        assert_eq!(session.phase(), Phase::Question);
        assert_eq!(session.question_number(), 1);
        assert_eq!(session.answer_correct(), None);
        // A fresh question gets a fresh option list.
        assert_eq!(session.choices().len(), 3);
    }

    #[test]
    fn fixed_order_restores_insertion_order() {
        let mut session = default_session();
        session.set_order(Order::Shuffled);
        session.set_order(Order::Fixed);
        assert_eq!(
            names_in_sequence(&mut session),
            vec!["Carbon", "Gold", "Chlorine", "Sodium"]
        );
    }

    #[test]
    fn shuffled_sequence_keeps_every_element() {
        let mut session = default_session();
        session.set_order(Order::Shuffled);
        let mut names = names_in_sequence(&mut session);
        names.sort();
        assert_eq!(names, vec!["Carbon", "Chlorine", "Gold", "Sodium"]);
    }
}
