//! Digital clock.

use super::{fit, ClockFormat, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};

/// Shows the current local time, with the date when there is room.
pub struct ClockWidget {
    format: ClockFormat,
}

impl ClockWidget {
    /// Factory for the widget registry.
    pub fn create(config: &WidgetConfig) -> Box<dyn Widget> {
        let format = match config {
            WidgetConfig::Clock { format } => *format,
            _ => ClockFormat::default(),
        };
        Box::new(Self { format })
    }

    fn time_pattern(&self, seconds: bool) -> &'static str {
        match (self.format, seconds) {
            (ClockFormat::H24, false) => "%H:%M",
            (ClockFormat::H24, true) => "%H:%M:%S",
            (ClockFormat::H12, false) => "%-I:%M %p",
            (ClockFormat::H12, true) => "%-I:%M:%S %p",
        }
    }
}

impl Widget for ClockWidget {
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static> {
        let now = context.local_now();
        let time_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let w = size.width;

        let lines = match size.presentation() {
            Presentation::Compact => vec![Line::styled(
                fit(&now.format(self.time_pattern(false)).to_string(), w),
                time_style,
            )],
            Presentation::Medium => vec![
                Line::styled(fit(&now.format(self.time_pattern(true)).to_string(), w), time_style),
                Line::styled(fit(&now.format("%a %d %b").to_string(), w), dim),
            ],
            Presentation::Large => vec![
                Line::styled(fit(&now.format(self.time_pattern(true)).to_string(), w), time_style),
                Line::styled(fit(&now.format("%A, %B %-d, %Y").to_string(), w), dim),
                Line::styled(fit(&now.format("UTC%:z").to_string(), w), dim),
            ],
        };
        let lines: Vec<Line<'static>> = lines
            .into_iter()
            .take(size.height as usize)
            .map(|l| l.centered())
            .collect();
        Text::from(lines)
    }

    fn name(&self) -> &'static str {
        "clock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CellSize;
    use chrono::{DateTime, FixedOffset, Utc};

    fn ctx() -> WidgetContext<'static> {
        let now = DateTime::parse_from_rfc3339("2024-03-05T14:05:09Z")
            .expect("valid")
            .with_timezone(&Utc);
        WidgetContext::new(now)
    }

    fn render(variant: &str, w: u16, h: u16) -> Vec<String> {
        let widget = ClockWidget::create(&WidgetConfig::parse(
            crate::widgets::WidgetKind::Clock,
            Some(variant),
        ));
        let text = widget.render(RenderSize::new(CellSize::new(w, h), 40, 10), &ctx());
        text.lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_compact_24h() {
        assert_eq!(render("24h", 3, 2), vec!["14:05"]);
    }

    #[test]
    fn test_compact_12h() {
        assert_eq!(render("12h", 3, 2), vec!["2:05 PM"]);
    }

    #[test]
    fn test_medium_shows_seconds_and_date() {
        assert_eq!(render("24h", 4, 3), vec!["14:05:09", "Tue 05 Mar"]);
    }

    #[test]
    fn test_large_shows_full_date_and_offset() {
        let lines = render("24h", 6, 4);
        assert_eq!(lines[1], "Tuesday, March 5, 2024");
        assert_eq!(lines[2], "UTC+00:00");
    }

    #[test]
    fn test_respects_display_offset() {
        let widget = ClockWidget::create(&WidgetConfig::default_for(crate::widgets::WidgetKind::Clock));
        let offset = FixedOffset::west_opt(5 * 3600).expect("valid");
        let context = ctx().with_offset(offset);
        let text = widget.render(RenderSize::new(CellSize::new(3, 2), 20, 2), &context);
        assert_eq!(text.lines[0].to_string(), "09:05");
    }

    #[test]
    fn test_clipped_to_height() {
        let widget = ClockWidget::create(&WidgetConfig::default_for(crate::widgets::WidgetKind::Clock));
        let text = widget.render(RenderSize::new(CellSize::new(6, 4), 40, 1), &ctx());
        assert_eq!(text.lines.len(), 1);
    }
}
