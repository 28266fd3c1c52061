//! Notes widget.

use super::{clip_lines, fit, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use crate::lists::Note;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Lists notes, pinned first. Large widgets also show a content preview.
pub struct NotesWidget {
    pinned_only: bool,
}

impl NotesWidget {
    /// Factory for the widget registry.
    pub fn create(config: &WidgetConfig) -> Box<dyn Widget> {
        let pinned_only = matches!(config, WidgetConfig::Notes { pinned_only: true });
        Box::new(Self { pinned_only })
    }
}

impl Widget for NotesWidget {
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static> {
        let mut notes: Vec<&Note> = context
            .notes
            .iter()
            .filter(|n| n.pinned || !self.pinned_only)
            .collect();
        notes.sort_by_key(|n| !n.pinned);

        let presentation = size.presentation();
        if presentation == Presentation::Compact {
            let label = if notes.len() == 1 { "note" } else { "notes" };
            return Text::from(Line::raw(fit(
                &format!("{} {label}", notes.len()),
                size.width,
            )));
        }
        if notes.is_empty() {
            return Text::from(Line::styled(
                "No notes",
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        let mut lines = Vec::new();
        for note in notes {
            let pin = if note.pinned {
                Span::styled("* ", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("  ")
            };
            lines.push(Line::from(vec![
                pin,
                Span::styled(
                    fit(&note.title, size.width.saturating_sub(2)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            if presentation == Presentation::Large {
                if let Some(first) = note.content.lines().find(|l| !l.trim().is_empty()) {
                    lines.push(Line::styled(
                        format!("  {}", fit(first.trim(), size.width.saturating_sub(2))),
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                }
            }
        }
        Text::from(clip_lines(lines, size.height, size.width))
    }

    fn name(&self) -> &'static str {
        "notes"
    }
}
