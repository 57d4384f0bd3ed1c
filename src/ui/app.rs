//! Main application state and logic.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use super::widgets::{ChoiceButtons, ElementTile, KeyHints, ModalDialog, Selector};
use crate::config::Config;
use crate::models::{Element, Mode, Order, Phase};
use crate::quiz::QuizSession;

pub struct App {
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    // Quiz state
    session: QuizSession,

    // Free-response input buffer
    input: String,

    // Blocking error alert (delete rejection)
    error: Option<String>,
}

impl App {
    pub fn new(elements: Vec<Element>, config: Config, order: Order) -> Self {
        let theme = Theme::from_name(&config.theme);

        Self {
            running: true,
            config,
            theme,
            session: QuizSession::new(elements, order),
            input: String::new(),
            error: None,
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = Theme::new(self.theme.name.next());
        self.config.theme = self.theme.name.as_str().to_string();
        let _ = self.config.save();
    }

    fn set_mode(&mut self, mode: Mode) {
        self.input.clear();
        self.session.set_mode(mode);
    }

    fn toggle_order(&mut self) {
        self.session.set_order(self.session.order().toggled());
    }

    fn advance(&mut self) {
        self.input.clear();
        self.session.advance();
    }

    fn submit_input(&mut self) {
        let answer = std::mem::take(&mut self.input);
        self.session.submit_answer(&answer);
    }

    fn select_choice(&mut self, index: usize) {
        if self.session.phase() != Phase::Question {
            return;
        }
        if let Some(choice) = self.session.choices().get(index) {
            let answer = choice.clone();
            self.session.submit_answer(&answer);
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                // The delete-rejection alert blocks everything else.
                if self.error.is_some() {
                    self.error = None;
                    self.session.cancel_delete();
                    return Ok(());
                }

                match self.session.phase() {
                    Phase::Score => self.handle_score_keys(key.code),
                    Phase::DeleteConfirm => self.handle_delete_keys(key.code),
                    _ => match self.session.mode() {
                        Mode::FlashCard => self.handle_flash_card_keys(key.code),
                        Mode::FreeResponse => self.handle_free_response_keys(key.code),
                        Mode::MultiChoice => self.handle_multi_choice_keys(key.code),
                    },
                }
            }
        }
        Ok(())
    }

    /// Keys shared by every non-modal screen that isn't capturing text.
    /// Returns true when the key was consumed.
    fn handle_global_keys(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('f') => self.set_mode(Mode::FlashCard),
            KeyCode::Char('r') => self.set_mode(Mode::FreeResponse),
            KeyCode::Char('m') => self.set_mode(Mode::MultiChoice),
            KeyCode::Tab => self.set_mode(self.session.mode().next()),
            KeyCode::Char('o') => self.toggle_order(),
            _ => return false,
        }
        true
    }

    fn handle_flash_card_keys(&mut self, key: KeyCode) {
        if self.handle_global_keys(key) {
            return;
        }
        match key {
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.session.phase() == Phase::Question {
                    self.session.reveal_answer();
                }
            }
            KeyCode::Char('d') => self.session.request_delete(),
            KeyCode::Char('n') | KeyCode::Right => self.advance(),
            _ => {}
        }
    }

    fn handle_free_response_keys(&mut self, key: KeyCode) {
        if self.session.phase() == Phase::Question {
            // Capturing text: only Tab/Esc keep their global meaning.
            match key {
                KeyCode::Esc => self.running = false,
                KeyCode::Tab => self.set_mode(self.session.mode().next()),
                KeyCode::Enter => {
                    if !self.input.is_empty() {
                        self.submit_input();
                    }
                }
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                _ => {}
            }
        } else {
            if self.handle_global_keys(key) {
                return;
            }
            if matches!(key, KeyCode::Enter | KeyCode::Char('n')) {
                self.advance();
            }
        }
    }

    fn handle_multi_choice_keys(&mut self, key: KeyCode) {
        if self.handle_global_keys(key) {
            return;
        }
        match key {
            KeyCode::Char('1') => self.select_choice(0),
            KeyCode::Char('2') => self.select_choice(1),
            KeyCode::Char('3') => self.select_choice(2),
            KeyCode::Enter | KeyCode::Char('n') => {
                if self.session.phase() == Phase::Answer {
                    self.advance();
                }
            }
            _ => {}
        }
    }

    fn handle_score_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.input.clear();
                self.session.dismiss_score();
            }
            _ => {}
        }
    }

    fn handle_delete_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(e) = self.session.confirm_delete() {
                    self.error = Some(e.to_string());
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.session.cancel_delete();
            }
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(2), // Title
            Constraint::Length(1), // Mode selector
            Constraint::Length(1), // Order selector
            Constraint::Length(1), // Spacing
            Constraint::Min(9),    // Element tile
            Constraint::Length(2), // Answer / verdict line
            Constraint::Length(4), // Input field or choices
            Constraint::Length(2), // Key hints
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        self.render_selectors(frame, chunks[1], chunks[2]);
        self.render_tile(frame, chunks[4]);
        self.render_answer_line(frame, chunks[5]);
        self.render_input_area(frame, chunks[6]);
        self.render_hints(frame, chunks[7]);

        match self.session.phase() {
            Phase::Score => self.render_score_dialog(frame, area),
            Phase::DeleteConfirm => self.render_delete_dialog(frame, area),
            _ => {}
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled("Element Quiz", self.theme.title()),
            Span::styled(
                format!(
                    "  ·  {} of {}",
                    self.session.question_number(),
                    self.session.element_count()
                ),
                Style::default().fg(self.theme.colors.text_muted),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(header).alignment(Alignment::Center),
            area,
        );
    }

    fn render_selectors(&self, frame: &mut Frame, mode_area: Rect, order_area: Rect) {
        let mode_labels: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
        frame.render_widget(
            Selector::new(&mode_labels, self.session.mode().index(), &self.theme),
            mode_area,
        );

        let order_labels = [Order::Fixed.label(), Order::Shuffled.label()];
        frame.render_widget(
            Selector::new(&order_labels, self.session.order().index(), &self.theme),
            order_area,
        );
    }

    fn render_tile(&self, frame: &mut Frame, area: Rect) {
        let tile_area = centered_rect(40, 100, area);
        frame.render_widget(
            ElementTile::new(
                self.session.current(),
                &self.theme,
                self.session.current_is_frequent_miss(),
            ),
            tile_area,
        );
    }

    /// The line under the tile: "?" before reveal, the element name after,
    /// or the graded verdict in quiz modes.
    fn render_answer_line(&self, frame: &mut Frame, area: Rect) {
        let session = &self.session;
        let line = match (session.mode(), session.phase()) {
            (Mode::FlashCard, Phase::Question) => {
                Line::from(Span::styled("?", self.theme.title()))
            }
            (Mode::FlashCard, _) => Line::from(Span::styled(
                session.current().name.as_str(),
                self.theme.highlight(),
            )),
            (_, Phase::Answer) => match session.answer_correct() {
                Some(true) => Line::from(Span::styled(
                    "Correct!",
                    self.theme.verdict_correct(),
                )),
                _ => Line::from(vec![
                    Span::styled("✗ ", self.theme.verdict_incorrect()),
                    Span::styled(
                        "Correct Answer: ",
                        Style::default().fg(self.theme.colors.text_muted),
                    ),
                    Span::styled(
                        session.current().name.as_str(),
                        self.theme.verdict_incorrect(),
                    ),
                ]),
            },
            _ => Line::from(""),
        };

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_input_area(&self, frame: &mut Frame, area: Rect) {
        match self.session.mode() {
            Mode::FreeResponse => {
                if self.session.phase() != Phase::Question {
                    return;
                }
                let input_area = centered_rect(50, 100, area);
                let field_area = Rect {
                    height: 3.min(input_area.height),
                    ..input_area
                };
                let input = Paragraph::new(self.input.as_str()).block(
                    Block::bordered()
                        .border_style(Style::default().fg(self.theme.colors.accent))
                        .title(" Your Answer ")
                        .title_style(Style::default().fg(self.theme.colors.accent)),
                );
                frame.render_widget(input, field_area);

                frame.set_cursor_position((
                    input_cursor_x(field_area, self.input.chars().count()),
                    field_area.y + 1,
                ));
            }
            Mode::MultiChoice => {
                let choices_area = centered_rect(80, 100, area);
                frame.render_widget(
                    ChoiceButtons::new(
                        self.session.choices(),
                        self.session.phase() == Phase::Question,
                        &self.theme,
                    ),
                    choices_area,
                );
            }
            Mode::FlashCard => {}
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let next_label = if self.session.mode().is_quiz() && self.session.is_last_question() {
            "show score"
        } else {
            "next"
        };

        let theme_hint = format!("[{}]", self.theme.name.display_name());
        let hints: Vec<(&str, &str)> = match (self.session.mode(), self.session.phase()) {
            (Mode::FlashCard, Phase::Question) => vec![
                ("Space", "show answer"),
                ("n", "next"),
                ("Tab", "mode"),
                ("o", "order"),
                ("t", &theme_hint),
                ("q", "quit"),
            ],
            (Mode::FlashCard, _) => vec![
                ("n", "next"),
                ("d", "delete element"),
                ("Tab", "mode"),
                ("q", "quit"),
            ],
            (Mode::FreeResponse, Phase::Question) => vec![
                ("Enter", "submit"),
                ("Tab", "mode"),
                ("Esc", "quit"),
            ],
            (Mode::MultiChoice, Phase::Question) => vec![
                ("1-3", "choose"),
                ("Tab", "mode"),
                ("o", "order"),
                ("q", "quit"),
            ],
            _ => vec![("Enter", next_label), ("Tab", "mode"), ("q", "quit")],
        };

        frame.render_widget(KeyHints::new(&hints, &self.theme), area);
    }

    fn render_score_dialog(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Your score is ", Style::default().fg(self.theme.colors.text)),
                Span::styled(
                    self.session.correct_count().to_string(),
                    self.theme.highlight(),
                ),
                Span::styled(
                    format!(" out of {}.", self.session.element_count()),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", self.theme.key_hint()),
                Span::styled("Enter", self.theme.key_highlight()),
                Span::styled(" to continue", self.theme.key_hint()),
            ]),
        ];

        let dialog_area = centered_rect(44, 30, area);
        frame.render_widget(
            ModalDialog::new("Quiz Score", lines, self.theme.colors.primary, &self.theme),
            dialog_area,
        );
    }

    fn render_delete_dialog(&self, frame: &mut Frame, area: Rect) {
        let dialog_area = centered_rect(44, 30, area);

        if let Some(ref message) = self.error {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(self.theme.colors.error),
                )),
                Line::from(""),
                Line::from(Span::styled("Press any key", self.theme.key_hint())),
            ];
            frame.render_widget(
                ModalDialog::new("Error", lines, self.theme.colors.error, &self.theme),
                dialog_area,
            );
            return;
        }

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Are you sure you want to delete ",
                    Style::default().fg(self.theme.colors.text),
                ),
                Span::styled(self.session.current().name.as_str(), self.theme.highlight()),
                Span::styled("?", Style::default().fg(self.theme.colors.text)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", self.theme.key_highlight()),
                Span::styled(" yes  ", self.theme.key_hint()),
                Span::styled("n", self.theme.key_highlight()),
                Span::styled(" no", self.theme.key_hint()),
            ]),
        ];
        frame.render_widget(
            ModalDialog::new(
                "Delete Element",
                lines,
                self.theme.colors.warning,
                &self.theme,
            ),
            dialog_area,
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Cursor column for the answer field, pinned inside its borders no matter
/// how much has been typed.
fn input_cursor_x(field: Rect, input_chars: usize) -> u16 {
    let right_edge = field.x.saturating_add(field.width.saturating_sub(2));
    let offset = u16::try_from(input_chars).unwrap_or(u16::MAX);
    field
        .x
        .saturating_add(1)
        .saturating_add(offset)
        .min(right_edge)
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements;

    fn app_at_score_screen() -> App {
        let mut app = App::new(elements::default_set(), Config::default(), Order::Fixed);
        app.session.set_mode(Mode::FreeResponse);
        for name in ["Carbon", "Gold", "Chlorine", "Sodium"] {
            app.session.submit_answer(name);
            app.session.advance();
        }
        assert_eq!(app.session.phase(), Phase::Score);
        app
    }

    #[test]
    fn quit_keys_work_from_the_score_dialog() {
        let mut app = app_at_score_screen();
        app.handle_score_keys(KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = app_at_score_screen();
        app.handle_score_keys(KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn enter_dismisses_the_score_dialog() {
        let mut app = app_at_score_screen();
        app.handle_score_keys(KeyCode::Enter);
        assert!(app.running);
        assert_eq!(app.session.mode(), Mode::FlashCard);
        assert_eq!(app.session.phase(), Phase::Question);
    }

    #[test]
    fn cursor_stays_inside_the_input_field() {
        let field = Rect::new(10, 5, 20, 3);
        assert_eq!(input_cursor_x(field, 0), 11);
        assert_eq!(input_cursor_x(field, 5), 16);
        // Far past the field edge, including u16 overflow territory.
        assert_eq!(input_cursor_x(field, 100_000), 28);
        assert_eq!(input_cursor_x(field, usize::MAX), 28);

        let wide = Rect::new(0, 0, u16::MAX, 3);
        assert_eq!(input_cursor_x(wide, usize::MAX), u16::MAX - 2);
    }
}
