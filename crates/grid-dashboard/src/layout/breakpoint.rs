//! Breakpoint definitions and viewport-width resolution.
//!
//! Four breakpoints exist, ordered from widest to narrowest. Each has a
//! minimum viewport width (in pixels) and a column count for its grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named viewport-width range.
///
/// Variants are declared widest first, so the derived ordering sorts
/// `Lg < Md < Sm < Xs` and maps keyed by breakpoint serialize in that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Large screens.
    Lg,
    /// Medium screens.
    Md,
    /// Small screens.
    Sm,
    /// Extra-small screens.
    Xs,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 4] = [Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs];

    /// Short name used in persisted documents and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error type for parsing a Breakpoint from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBreakpointError(pub String);

impl fmt::Display for ParseBreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid breakpoint: {} (expected lg, md, sm or xs)",
            self.0
        )
    }
}

impl std::error::Error for ParseBreakpointError {}

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lg" | "large" => Ok(Breakpoint::Lg),
            "md" | "medium" => Ok(Breakpoint::Md),
            "sm" | "small" => Ok(Breakpoint::Sm),
            "xs" | "extra-small" => Ok(Breakpoint::Xs),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}

/// Threshold and column count of one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointSpec {
    /// Smallest viewport width, in pixels, at which the breakpoint applies.
    pub min_width: u32,
    /// Number of grid columns.
    pub cols: u16,
}

impl BreakpointSpec {
    /// Creates a new spec. A column count of zero is raised to one.
    pub const fn new(min_width: u32, cols: u16) -> Self {
        Self {
            min_width,
            cols: if cols == 0 { 1 } else { cols },
        }
    }
}

/// The full breakpoint table.
///
/// # Example
///
/// ```
/// use grid_dashboard::layout::{Breakpoint, Breakpoints};
///
/// let bps = Breakpoints::default();
/// assert_eq!(bps.resolve(1440), Breakpoint::Lg);
/// assert_eq!(bps.resolve(800), Breakpoint::Sm);
/// assert_eq!(bps.resolve(100), Breakpoint::Xs);
/// assert_eq!(bps.cols(Breakpoint::Lg), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    specs: [BreakpointSpec; 4],
}

impl Breakpoints {
    /// Creates a table from one spec per breakpoint.
    pub fn new(lg: BreakpointSpec, md: BreakpointSpec, sm: BreakpointSpec, xs: BreakpointSpec) -> Self {
        Self {
            specs: [lg, md, sm, xs],
        }
    }

    fn index(bp: Breakpoint) -> usize {
        match bp {
            Breakpoint::Lg => 0,
            Breakpoint::Md => 1,
            Breakpoint::Sm => 2,
            Breakpoint::Xs => 3,
        }
    }

    /// Spec of the given breakpoint.
    pub fn spec(&self, bp: Breakpoint) -> BreakpointSpec {
        self.specs[Self::index(bp)]
    }

    /// Column count of the given breakpoint.
    pub fn cols(&self, bp: Breakpoint) -> u16 {
        self.spec(bp).cols
    }

    /// Resolves a viewport width to the active breakpoint.
    ///
    /// Thresholds are checked from largest to smallest; the first one not
    /// exceeding `width` wins. Widths below every threshold resolve to the
    /// breakpoint with the smallest threshold.
    pub fn resolve(&self, width: u32) -> Breakpoint {
        let mut ordered = Breakpoint::ALL;
        ordered.sort_by(|a, b| self.spec(*b).min_width.cmp(&self.spec(*a).min_width));
        ordered
            .iter()
            .copied()
            .find(|bp| self.spec(*bp).min_width <= width)
            .unwrap_or(ordered[ordered.len() - 1])
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(
            BreakpointSpec::new(1200, 8),
            BreakpointSpec::new(996, 9),
            BreakpointSpec::new(768, 3),
            BreakpointSpec::new(480, 2),
        )
    }
}
