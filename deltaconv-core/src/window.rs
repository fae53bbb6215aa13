//! Time windows for the trade history endpoint.
//!
//! The server refuses trade queries spanning more than three calendar months,
//! so a long range is cut into 28-day windows. 28 days stays under the limit
//! whatever the month lengths are.
//!
//! The plan has two states. While the next 28-day boundary is still before
//! the overall end it is `Advancing` and yields full windows. Once the
//! boundary reaches or passes the end it yields one final window truncated to
//! the exact end and becomes `Finished`. The final window is always yielded,
//! so `start == end` still produces one window.

use crate::source::FetchError;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::fmt;

/// Length of every non-final window, in days.
pub const WINDOW_DAYS: i64 = 28;

/// A closed query interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanState {
    Advancing { start: NaiveDateTime },
    Finished,
}

/// Lazy sequence of windows covering `[midnight(start), end]`.
#[derive(Debug, Clone)]
pub struct WindowPlan {
    state: PlanState,
    end: NaiveDateTime,
}

impl WindowPlan {
    /// Plan the windows for an overall range.
    ///
    /// Rejects `start > end` instead of issuing a negative-length query.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, FetchError> {
        if start > end {
            return Err(FetchError::InvalidRange { start, end });
        }
        Ok(Self {
            state: PlanState::Advancing {
                start: start_of_day(start),
            },
            end,
        })
    }

    fn span() -> Duration {
        Duration::days(WINDOW_DAYS)
    }
}

impl Iterator for WindowPlan {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        match self.state {
            PlanState::Advancing { start } => {
                let boundary = start + Self::span();
                if boundary < self.end {
                    self.state = PlanState::Advancing { start: boundary };
                    Some(Window {
                        start,
                        end: boundary,
                    })
                } else {
                    self.state = PlanState::Finished;
                    Some(Window {
                        start,
                        end: self.end,
                    })
                }
            }
            PlanState::Finished => None,
        }
    }
}

/// Zero out the time of day.
pub fn start_of_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}
