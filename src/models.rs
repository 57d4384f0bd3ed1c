//! Data models for elements and quiz session settings.

use serde::{Deserialize, Serialize};

/// A chemical element the quiz asks about.
///
/// The name doubles as the answer string; symbol and atomic number are what
/// the element tile shows while the name is hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    pub atomic_number: u32,
    /// How many times the user has answered this element incorrectly.
    #[serde(default)]
    pub misses: u32,
}

impl Element {
    pub fn new(name: &str, symbol: &str, atomic_number: u32) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            atomic_number,
            misses: 0,
        }
    }

    /// Case-insensitive answer check.
    pub fn matches_answer(&self, answer: &str) -> bool {
        self.name.to_lowercase() == answer.trim().to_lowercase()
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

/// How the current element is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FlashCard,
    FreeResponse,
    MultiChoice,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::FlashCard, Mode::FreeResponse, Mode::MultiChoice];

    /// Quiz modes keep score; flash cards don't.
    pub fn is_quiz(&self) -> bool {
        matches!(self, Mode::FreeResponse | Mode::MultiChoice)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::FlashCard => "Flash Card",
            Mode::FreeResponse => "Free Response",
            Mode::MultiChoice => "Multi Choice",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Mode::FlashCard => 0,
            Mode::FreeResponse => 1,
            Mode::MultiChoice => 2,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Mode::FlashCard => Mode::FreeResponse,
            Mode::FreeResponse => Mode::MultiChoice,
            Mode::MultiChoice => Mode::FlashCard,
        }
    }
}

/// Where the session is within the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Question,
    Answer,
    Score,
    DeleteConfirm,
}

/// Whether elements are presented in insertion order or shuffled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Fixed,
    Shuffled,
}

impl Order {
    pub fn label(&self) -> &'static str {
        match self {
            Order::Fixed => "Fixed",
            Order::Shuffled => "Shuffled",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Order::Fixed => 0,
            Order::Shuffled => 1,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Order::Fixed => Order::Shuffled,
            Order::Shuffled => Order::Fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_check_ignores_case_and_whitespace() {
        let carbon = Element::new("Carbon", "C", 6);
        assert!(carbon.matches_answer("carbon"));
        assert!(carbon.matches_answer("  CARBON "));
        assert!(!carbon.matches_answer("gold"));
    }

    #[test]
    fn mode_cycle_covers_all_modes() {
        let mut mode = Mode::FlashCard;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, Mode::FlashCard);
        assert_eq!(seen, Mode::ALL);
    }
}
