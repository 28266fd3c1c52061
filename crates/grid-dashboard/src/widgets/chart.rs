//! Chart over a fixed monthly sample series.

use super::{fit, ChartStyle, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

/// Monthly sample values drawn by every chart.
pub const SAMPLE_SERIES: [u64; 12] = [12, 19, 3, 5, 2, 3, 9, 14, 11, 17, 21, 16];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draws [`SAMPLE_SERIES`] as a sparkline, bars or filled area.
pub struct ChartWidget {
    style: ChartStyle,
}

impl ChartWidget {
    /// Factory for the widget registry.
    pub fn create(config: &WidgetConfig) -> Box<dyn Widget> {
        let style = match config {
            WidgetConfig::Chart { style } => *style,
            _ => ChartStyle::default(),
        };
        Box::new(Self { style })
    }
}

impl Widget for ChartWidget {
    fn render(&self, size: RenderSize, _context: &WidgetContext) -> Text<'static> {
        let series = tail(&SAMPLE_SERIES, size.width as usize);
        let color = Style::default().fg(Color::Green);
        if size.presentation() == Presentation::Compact || size.height < 2 {
            return Text::from(Line::styled(sparkline(series), color));
        }
        let lines = match self.style {
            ChartStyle::Line => {
                let min = series.iter().min().copied().unwrap_or(0);
                let max = series.iter().max().copied().unwrap_or(0);
                vec![
                    Line::styled(sparkline(series), color),
                    Line::raw(fit(&format!("min {min}  max {max}"), size.width)),
                ]
            }
            ChartStyle::Bar => bars(size.width, size.height as usize, color),
            ChartStyle::Area => area(series, size.height as usize, color),
        };
        Text::from(lines)
    }

    fn name(&self) -> &'static str {
        "chart"
    }
}

fn tail(series: &[u64], n: usize) -> &[u64] {
    &series[series.len().saturating_sub(n)..]
}

/// One block character per sample, scaled to the series maximum.
pub fn sparkline(series: &[u64]) -> String {
    let max = series.iter().max().copied().unwrap_or(0).max(1);
    series
        .iter()
        .map(|v| {
            let idx = (v * (LEVELS.len() as u64 - 1) + max / 2) / max;
            LEVELS[idx as usize]
        })
        .collect()
}

fn bars(width: u16, rows: usize, color: Style) -> Vec<Line<'static>> {
    let first = SAMPLE_SERIES.len().saturating_sub(rows);
    let max = SAMPLE_SERIES.iter().max().copied().unwrap_or(1).max(1);
    let room = width.saturating_sub(8) as u64;
    (first..SAMPLE_SERIES.len())
        .map(|i| {
            let value = SAMPLE_SERIES[i];
            let len = (value * room / max) as usize;
            Line::from(vec![
                Span::raw(format!("{} ", MONTHS[i])),
                Span::styled("█".repeat(len), color),
                Span::raw(format!(" {value}")),
            ])
        })
        .collect()
}

fn area(series: &[u64], rows: usize, color: Style) -> Vec<Line<'static>> {
    let max = series.iter().max().copied().unwrap_or(1).max(1);
    let rows_u = rows as u64;
    let heights: Vec<u64> = series
        .iter()
        .map(|v| (v * rows_u + max / 2) / max)
        .collect();
    (0..rows_u)
        .rev()
        .map(|level| {
            let row: String = heights
                .iter()
                .map(|h| if *h > level { '█' } else { ' ' })
                .collect();
            Line::styled(row, color)
        })
        .collect()
}
