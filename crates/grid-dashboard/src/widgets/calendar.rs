//! Month calendar with today highlighted.

use super::{fit, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use chrono::{Datelike, NaiveDate};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const WEEKDAY_HEADER: &str = "Mo Tu We Th Fr Sa Su";

/// Renders the current month as a Monday-first grid.
pub struct CalendarWidget;

impl CalendarWidget {
    /// Factory for the widget registry.
    pub fn create(_config: &WidgetConfig) -> Box<dyn Widget> {
        Box::new(Self)
    }
}

impl Widget for CalendarWidget {
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static> {
        let today = context.local_now().date_naive();
        let compact = Line::styled(
            fit(&today.format("%a %-d %b").to_string(), size.width),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let presentation = size.presentation();
        if presentation == Presentation::Compact {
            return Text::from(compact);
        }
        let Some(weeks) = month_grid(today) else {
            return Text::from(compact);
        };

        let mut lines = vec![
            Line::styled(
                fit(&today.format("%B %Y").to_string(), size.width),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .centered(),
            Line::styled(
                fit(WEEKDAY_HEADER, size.width),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        for week in weeks {
            lines.push(week_line(&week, today.day()));
        }
        if presentation == Presentation::Large {
            lines.push(
                Line::styled(
                    format!("Week {}", today.iso_week().week()),
                    Style::default().add_modifier(Modifier::DIM),
                )
                .centered(),
            );
        }
        lines.truncate(size.height as usize);
        Text::from(lines)
    }

    fn name(&self) -> &'static str {
        "calendar"
    }
}

/// Weeks of the month containing `day`, Monday first. `None` pads the
/// first and last week.
fn month_grid(day: NaiveDate) -> Option<Vec<[Option<u32>; 7]>> {
    let first = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)?;
    let next_month = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)?
    };
    let days = (next_month - first).num_days() as u32;
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    for d in 1..=days {
        week[slot] = Some(d);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    Some(weeks)
}

fn week_line(week: &[Option<u32>; 7], today: u32) -> Line<'static> {
    let mut spans = Vec::with_capacity(13);
    for (i, day) in week.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        match day {
            Some(d) if *d == today => spans.push(Span::styled(
                format!("{d:>2}"),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Some(d) => spans.push(Span::raw(format!("{d:>2}"))),
            None => spans.push(Span::raw("  ")),
        }
    }
    Line::from(spans)
}
