//! Todo list widget.

use super::{clip_lines, fit, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use crate::lists::{Priority, TodoItem};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Shows the todo list with completion checkboxes.
pub struct TodoWidget {
    hide_completed: bool,
}

impl TodoWidget {
    /// Factory for the widget registry.
    pub fn create(config: &WidgetConfig) -> Box<dyn Widget> {
        let hide_completed = matches!(
            config,
            WidgetConfig::Todo {
                hide_completed: true
            }
        );
        Box::new(Self { hide_completed })
    }

    fn item_line(item: &TodoItem, width: u16, show_priority: bool) -> Line<'static> {
        let (check, style) = if item.completed {
            (
                "[x] ",
                Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", Style::default())
        };
        let marker = match (show_priority, item.priority) {
            (true, Priority::High) => Span::styled("! ", Style::default().fg(Color::Red)),
            (true, Priority::Low) => Span::styled("· ", Style::default().add_modifier(Modifier::DIM)),
            (true, Priority::Medium) => Span::raw("  "),
            (false, _) => Span::raw(""),
        };
        let used = 4 + marker.content.chars().count() as u16;
        Line::from(vec![
            Span::raw(check),
            marker,
            Span::styled(fit(&item.text, width.saturating_sub(used)), style),
        ])
    }
}

impl Widget for TodoWidget {
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static> {
        let total = context.todos.len();
        let done = context.todos.iter().filter(|t| t.completed).count();
        let presentation = size.presentation();

        if presentation == Presentation::Compact {
            return Text::from(Line::raw(fit(
                &format!("{} open", total - done),
                size.width,
            )));
        }

        let mut lines = vec![Line::styled(
            fit(&format!("Tasks {done}/{total}"), size.width),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        let visible: Vec<&TodoItem> = context
            .todos
            .iter()
            .filter(|t| !(self.hide_completed && t.completed))
            .collect();
        if visible.is_empty() {
            lines.push(Line::styled(
                "No tasks",
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        let show_priority = presentation == Presentation::Large;
        lines.extend(
            visible
                .iter()
                .map(|t| Self::item_line(t, size.width, show_priority)),
        );
        Text::from(clip_lines(lines, size.height, size.width))
    }

    fn name(&self) -> &'static str {
        "todo"
    }
}
