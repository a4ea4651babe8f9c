//! Running min/max/average over the session history.

use super::{StatisticsText, format_value};

/// Summary of every reading seen so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl Statistics {
    pub fn format(&self, decimals: usize) -> StatisticsText {
        StatisticsText {
            min: format_value(self.min, decimals),
            max: format_value(self.max, decimals),
            average: format_value(self.average, decimals),
        }
    }
}

/// Incrementally maintained min, max and sum.
///
/// Values are summed in arrival order, so the average matches a left-to-right
/// rescan of the history exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn summary(&self) -> Option<Statistics> {
        if self.count == 0 {
            return None;
        }

        Some(Statistics {
            count: self.count,
            min: self.min,
            max: self.max,
            average: self.sum / self.count as f64,
        })
    }
}
