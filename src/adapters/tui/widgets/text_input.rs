use ratatui::style::{Color, Modifier, Style};

use crate::adapters::tui::document::{wrap, TextLine};
use crate::domain::FormField;

const CURSOR: char = '▏';
const MAX_WIDTH: u16 = 72;
const MESSAGE_ROWS: usize = 6;

/// A labelled, boxed form input drawn as page lines.
pub struct TextInput<'a> {
    field: FormField,
    value: &'a str,
    is_focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(field: FormField, value: &'a str) -> Self {
        Self {
            field,
            value,
            is_focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    fn rows(&self) -> usize {
        match self.field {
            FormField::Message => MESSAGE_ROWS,
            _ => 1,
        }
    }

    pub fn lines(&self, width: u16) -> Vec<TextLine> {
        let width = width.clamp(8, MAX_WIDTH) as usize;
        let inner = width - 4;

        let border_style = if self.is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        let (content, text_style) = if self.value.is_empty() {
            (
                self.field.placeholder().to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (self.value.to_string(), Style::default())
        };

        let mut body = wrap(&content, inner);
        if self.rows() > 1 {
            // Keep the tail visible once the text outgrows the box
            let skip = body.len().saturating_sub(self.rows());
            body.drain(..skip);
        } else {
            body = vec![tail(&content, inner)];
        }
        if self.is_focused && !self.value.is_empty() {
            if let Some(last) = body.last_mut() {
                if last.chars().count() < inner {
                    last.push(CURSOR);
                }
            }
        }
        body.resize(self.rows(), String::new());

        let mut lines = vec![
            TextLine::raw(format!("{} *", self.field.label()))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            TextLine::raw(format!("┌{}┐", "─".repeat(width - 2))).style(border_style),
        ];
        for row in body {
            let pad = inner.saturating_sub(row.chars().count());
            lines.push(TextLine::raw(format!("│ {}{} │", row, " ".repeat(pad))).style(text_style));
        }
        lines.push(TextLine::raw(format!("└{}┘", "─".repeat(width - 2))).style(border_style));
        lines
    }
}

/// Last `width` characters, so typing stays in view on one-line inputs
fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_shows_placeholder() {
        let lines = TextInput::new(FormField::Email, "").lines(40);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "Email *");
        assert!(lines[2].text.contains("your.email@example.com"));
        assert_eq!(lines[2].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_focused_input_has_cursor_and_highlight() {
        let lines = TextInput::new(FormField::Name, "Jane").focused(true).lines(40);
        assert!(lines[2].text.starts_with("│ Jane▏"));
        assert_eq!(lines[1].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_message_box_is_multi_row() {
        let lines = TextInput::new(FormField::Message, "hello").lines(40);
        assert_eq!(lines.len(), 2 + MESSAGE_ROWS + 1);
        // Every row of the box is the same width
        let widths: Vec<usize> = lines[1..].iter().map(|l| l.text.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == 40));
    }

    #[test]
    fn test_long_single_line_keeps_tail() {
        let value = "a".repeat(50) + "END";
        let lines = TextInput::new(FormField::Subject, &value).lines(20);
        assert!(lines[2].text.contains("END"));
    }
}
