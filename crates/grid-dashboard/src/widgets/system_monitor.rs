//! CPU and memory gauges fed by a periodic [`SystemSampler`].

use super::chart::sparkline;
use super::{fit, MonitorStyle, Presentation, RenderSize, Widget, WidgetConfig, WidgetContext};
use crate::schedule::Periodic;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use std::collections::VecDeque;
use std::time::Duration;

/// Samples kept for the CPU history sparkline.
pub const HISTORY_LEN: usize = 60;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One reading of system load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemStats {
    /// Global CPU usage, 0 to 100.
    pub cpu_percent: f32,
    /// Used memory in bytes.
    pub memory_used: u64,
    /// Total memory in bytes.
    pub memory_total: u64,
}

impl SystemStats {
    /// Used memory as a percentage of total.
    pub fn memory_percent(&self) -> f32 {
        if self.memory_total == 0 {
            return 0.0;
        }
        (self.memory_used as f64 / self.memory_total as f64 * 100.0) as f32
    }
}

/// Source of [`SystemStats`].
pub trait SystemSampler: Send {
    /// Takes one reading.
    fn sample(&mut self) -> SystemStats;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Reads the host's real CPU and memory usage.
pub struct LiveSampler {
    system: sysinfo::System,
}

impl LiveSampler {
    /// Creates a sampler. The first CPU reading is relative to this call.
    pub fn new() -> Self {
        let mut system = sysinfo::System::new();
        system.refresh_cpu_usage();
        Self { system }
    }
}

impl Default for LiveSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSampler for LiveSampler {
    fn sample(&mut self) -> SystemStats {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        SystemStats {
            cpu_percent: self.system.global_cpu_usage().clamp(0.0, 100.0),
            memory_used: self.system.used_memory(),
            memory_total: self.system.total_memory(),
        }
    }

    fn name(&self) -> &'static str {
        "live"
    }
}

/// Deterministic random walk, for demos and tests.
pub struct SimulatedSampler {
    rng: StdRng,
    cpu: f32,
    memory_used: u64,
    memory_total: u64,
}

impl SimulatedSampler {
    /// Creates a walk starting at 25% CPU and 40% of 16 GiB.
    pub fn new(seed: u64) -> Self {
        let memory_total = (16.0 * GIB) as u64;
        Self {
            rng: StdRng::seed_from_u64(seed),
            cpu: 25.0,
            memory_used: memory_total / 5 * 2,
            memory_total,
        }
    }
}

impl SystemSampler for SimulatedSampler {
    fn sample(&mut self) -> SystemStats {
        self.cpu = (self.cpu + self.rng.gen_range(-8.0..8.0)).clamp(1.0, 99.0);
        let step = self.rng.gen_range(-0.02..0.02) * self.memory_total as f64;
        let used = (self.memory_used as f64 + step)
            .clamp(self.memory_total as f64 * 0.1, self.memory_total as f64 * 0.95);
        self.memory_used = used as u64;
        SystemStats {
            cpu_percent: self.cpu,
            memory_used: self.memory_used,
            memory_total: self.memory_total,
        }
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// A sampler polled on a [`Periodic`] tick, keeping recent history.
pub struct MonitorFeed {
    sampler: Box<dyn SystemSampler>,
    tick: Periodic,
    latest: Option<SystemStats>,
    history: VecDeque<f32>,
}

impl MonitorFeed {
    /// Creates a feed sampling every `every`.
    pub fn new(sampler: Box<dyn SystemSampler>, every: Duration) -> Self {
        tracing::debug!(sampler = sampler.name(), ?every, "starting system monitor feed");
        Self {
            sampler,
            tick: Periodic::new(every),
            latest: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Samples if the tick is due at `now`. Returns `true` if it sampled.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if !self.tick.poll(now) {
            return false;
        }
        let stats = self.sampler.sample();
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(stats.cpu_percent);
        self.latest = Some(stats);
        true
    }

    /// Most recent reading.
    pub fn latest(&self) -> Option<SystemStats> {
        self.latest
    }

    /// CPU readings, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }
}

/// Renders the gauges of the context's [`MonitorFeed`].
pub struct SystemMonitorWidget {
    style: MonitorStyle,
}

impl SystemMonitorWidget {
    /// Factory for the widget registry.
    pub fn create(config: &WidgetConfig) -> Box<dyn Widget> {
        let style = match config {
            WidgetConfig::SystemMonitor { style } => *style,
            _ => MonitorStyle::default(),
        };
        Box::new(Self { style })
    }
}

impl Widget for SystemMonitorWidget {
    fn render(&self, size: RenderSize, context: &WidgetContext) -> Text<'static> {
        let Some(stats) = context.monitor.and_then(MonitorFeed::latest) else {
            return Text::from(Line::styled(
                fit("Sampling…", size.width),
                Style::default().add_modifier(Modifier::DIM),
            ));
        };
        let cpu = stats.cpu_percent;
        let mem = stats.memory_percent();

        if size.presentation() == Presentation::Compact {
            return Text::from(Line::raw(fit(
                &format!("CPU {cpu:.0}% MEM {mem:.0}%"),
                size.width,
            )));
        }

        let mut lines = vec![
            gauge_line("CPU", cpu, size.width),
            gauge_line("MEM", mem, size.width),
            Line::styled(
                fit(
                    &format!(
                        "{:.1}/{:.1} GiB",
                        stats.memory_used as f64 / GIB,
                        stats.memory_total as f64 / GIB
                    ),
                    size.width,
                ),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ];
        if self.style == MonitorStyle::Detailed {
            if let Some(feed) = context.monitor {
                let samples: Vec<u64> = feed.history().map(|c| c.round() as u64).collect();
                let start = samples.len().saturating_sub(size.width as usize);
                lines.push(Line::styled(
                    sparkline(&samples[start..]),
                    Style::default().fg(Color::Cyan),
                ));
            }
        }
        lines.truncate(size.height as usize);
        Text::from(lines)
    }

    fn name(&self) -> &'static str {
        "system-monitor"
    }
}

fn gauge_color(percent: f32) -> Color {
    if percent >= 90.0 {
        Color::Red
    } else if percent >= 70.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// `CPU [####......]  37%`, with the bar filling the remaining width.
fn gauge_line(label: &str, percent: f32, width: u16) -> Line<'static> {
    let bar_width = width.saturating_sub(11) as usize;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * bar_width as f32).round() as usize;
    Line::from(vec![
        Span::raw(format!("{label} [")),
        Span::styled("#".repeat(filled), Style::default().fg(gauge_color(percent))),
        Span::raw(".".repeat(bar_width - filled)),
        Span::raw(format!("] {percent:>3.0}%")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CellSize;
    use crate::schedule::{Clock, ManualClock};
    use crate::widgets::WidgetKind;

    struct FixedSampler(SystemStats);

    impl SystemSampler for FixedSampler {
        fn sample(&mut self) -> SystemStats {
            self.0
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn fixed_feed(cpu: f32) -> MonitorFeed {
        MonitorFeed::new(
            Box::new(FixedSampler(SystemStats {
                cpu_percent: cpu,
                memory_used: 4 * GIB as u64,
                memory_total: 16 * GIB as u64,
            })),
            Duration::from_secs(2),
        )
    }

    fn render(variant: &str, feed: Option<&MonitorFeed>, w: u16, h: u16) -> Vec<String> {
        let clock = ManualClock::default();
        let widget =
            SystemMonitorWidget::create(&WidgetConfig::parse(WidgetKind::SystemMonitor, Some(variant)));
        let mut ctx = WidgetContext::new(clock.now());
        if let Some(feed) = feed {
            ctx = ctx.with_monitor(feed);
        }
        widget
            .render(RenderSize::new(CellSize::new(w, h), 31, 8), &ctx)
            .lines
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_feed_polls_on_interval() {
        let clock = ManualClock::default();
        let mut feed = fixed_feed(50.0);
        assert!(feed.poll(clock.now()));
        assert!(!feed.poll(clock.now()));
        clock.advance(Duration::from_secs(2));
        assert!(feed.poll(clock.now()));
        assert_eq!(feed.history().count(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let clock = ManualClock::default();
        let mut feed = fixed_feed(10.0);
        for _ in 0..HISTORY_LEN + 5 {
            feed.poll(clock.now());
            clock.advance(Duration::from_secs(2));
        }
        assert_eq!(feed.history().count(), HISTORY_LEN);
    }

    #[test]
    fn test_simulated_sampler_is_deterministic_and_bounded() {
        let mut a = SimulatedSampler::new(7);
        let mut b = SimulatedSampler::new(7);
        for _ in 0..200 {
            let sa = a.sample();
            assert_eq!(sa, b.sample());
            assert!((1.0..=99.0).contains(&sa.cpu_percent));
            assert!(sa.memory_used <= sa.memory_total);
        }
    }

    #[test]
    fn test_renders_waiting_state_without_samples() {
        assert_eq!(render("compact", None, 4, 3), vec!["Sampling…"]);
    }

    #[test]
    fn test_compact_line() {
        let clock = ManualClock::default();
        let mut feed = fixed_feed(37.4);
        feed.poll(clock.now());
        assert_eq!(render("compact", Some(&feed), 3, 3), vec!["CPU 37% MEM 25%"]);
    }

    #[test]
    fn test_medium_gauges() {
        let clock = ManualClock::default();
        let mut feed = fixed_feed(50.0);
        feed.poll(clock.now());
        let lines = render("compact", Some(&feed), 4, 3);
        assert_eq!(lines[0], "CPU [##########..........]  50%");
        assert_eq!(lines[1], "MEM [#####...............]  25%");
        assert_eq!(lines[2], "4.0/16.0 GiB");
    }

    #[test]
    fn test_detailed_adds_history() {
        let clock = ManualClock::default();
        let mut feed = fixed_feed(50.0);
        feed.poll(clock.now());
        let lines = render("detailed", Some(&feed), 4, 4);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "█");
    }

    #[test]
    fn test_memory_percent_handles_zero_total() {
        let stats = SystemStats {
            cpu_percent: 0.0,
            memory_used: 0,
            memory_total: 0,
        };
        assert_eq!(stats.memory_percent(), 0.0);
    }
}
