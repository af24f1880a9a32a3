//! Static text control

use ratatui::style::Color;

/// A line of text with a color
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    text: Option<String>,
    text_color: Option<Color>,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            text_color: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Current color, `Color::Reset` when none was assigned
    pub fn text_color(&self) -> Color {
        self.text_color.unwrap_or(Color::Reset)
    }

    /// Assign a color; `None` falls back to the terminal default
    pub fn set_text_color(&mut self, color: Option<Color>) {
        self.text_color = color;
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }
}
