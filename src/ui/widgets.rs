//! Custom widgets for the element quiz TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::models::Element;

// ══════════════════════════════════════════════════════════════════════════
// Element Tile Widget
// ══════════════════════════════════════════════════════════════════════════

/// Periodic-table style tile for the current element: atomic number in the
/// corner, the symbol front and center. The caption row underneath carries
/// "?" or the revealed name, so the tile itself never gives the answer away.
pub struct ElementTile<'a> {
    element: &'a Element,
    theme: &'a Theme,
    frequent_miss: bool,
}

impl<'a> ElementTile<'a> {
    pub fn new(element: &'a Element, theme: &'a Theme, frequent_miss: bool) -> Self {
        Self {
            element,
            theme,
            frequent_miss,
        }
    }
}

impl Widget for ElementTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(self.theme.tile_border());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 {
            return;
        }

        // Atomic number, top-left corner of the tile.
        let number = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.element.atomic_number),
            Style::default().fg(self.theme.colors.text_muted),
        )));
        number.render(Rect { height: 1, ..inner }, buf);

        // Frequent-miss marker, top-right corner.
        if self.frequent_miss {
            let marker = "most missed !!";
            let width = marker.width() as u16;
            if inner.width > width + 1 {
                let marker_area = Rect {
                    x: inner.x + inner.width - width - 1,
                    y: inner.y,
                    width,
                    height: 1,
                };
                Paragraph::new(Span::styled(marker, self.theme.miss_marker()))
                    .render(marker_area, buf);
            }
        }

        // Symbol, centered in both axes.
        let symbol_area = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        Paragraph::new(Span::styled(
            self.element.symbol.as_str(),
            self.theme.tile_symbol(),
        ))
        .alignment(Alignment::Center)
        .render(symbol_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Segmented Selector Widget
// ══════════════════════════════════════════════════════════════════════════

/// Horizontal segmented control, the TUI stand-in for the mode and order
/// selectors of the original screen.
pub struct Selector<'a> {
    options: &'a [&'a str],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(options: &'a [&'a str], selected: usize, theme: &'a Theme) -> Self {
        Self {
            options,
            selected,
            theme,
        }
    }
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.options.len() * 2);
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", self.theme.key_hint()));
            }
            let style = if i == self.selected {
                self.theme.selected()
            } else {
                Style::default().fg(self.theme.colors.text_muted)
            };
            spans.push(Span::styled(format!(" {} ", option), style));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Choice Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

/// Multiple-choice option boxes, picked with the 1..=3 keys. Stay on screen
/// but dim out once the question has been answered.
pub struct ChoiceButtons<'a> {
    choices: &'a [String],
    enabled: bool,
    theme: &'a Theme,
}

impl<'a> ChoiceButtons<'a> {
    pub fn new(choices: &'a [String], enabled: bool, theme: &'a Theme) -> Self {
        Self {
            choices,
            enabled,
            theme,
        }
    }
}

impl Widget for ChoiceButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.choices.is_empty() {
            return;
        }

        let constraints =
            vec![Constraint::Ratio(1, self.choices.len() as u32); self.choices.len()];
        let chunks = Layout::horizontal(constraints).split(area);

        for (i, choice) in self.choices.iter().enumerate() {
            let color = if self.enabled {
                self.theme.colors.primary
            } else {
                self.theme.colors.text_dim
            };

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));

            let inner = button.inner(chunks[i]);
            button.render(chunks[i], buf);

            let key_line = Line::from(Span::styled(
                (i + 1).to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(key_line)
                .alignment(Alignment::Center)
                .render(Rect { height: 1, ..inner }, buf);

            let name_line = Line::from(Span::styled(
                choice.as_str(),
                Style::default().fg(if self.enabled {
                    self.theme.colors.text
                } else {
                    self.theme.colors.text_dim
                }),
            ));
            Paragraph::new(name_line).alignment(Alignment::Center).render(
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    ..inner
                },
                buf,
            );
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│ ", self.theme.key_hint()));
            }
            spans.push(Span::styled(*key, self.theme.key_highlight()));
            spans.push(Span::styled(format!(" {} ", desc), self.theme.key_hint()));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Modal Dialog Widget
// ══════════════════════════════════════════════════════════════════════════

/// Centered blocking dialog used for the score, delete-confirm, and error
/// alerts of the original screen.
pub struct ModalDialog<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
    border_color: Color,
    theme: &'a Theme,
}

impl<'a> ModalDialog<'a> {
    pub fn new(
        title: &'a str,
        lines: Vec<Line<'a>>,
        border_color: Color,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            lines,
            border_color,
            theme,
        }
    }
}

impl Widget for ModalDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.theme.colors.bg_dark))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.title, self.theme.title()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
