//! The daily preorder window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// When customers may place preorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreorderWindow {
    pub preorder_start: NaiveTime,
    pub preorder_end: NaiveTime,
    pub preordering_enabled: bool,
}

/// Why a preorder was refused by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Preordering is currently disabled.")]
    Disabled,
    #[error("Preorders are accepted between {start} and {end}.")]
    Closed { start: NaiveTime, end: NaiveTime },
}

impl PreorderWindow {
    /// Check whether a preorder may be placed at local time `now`.
    ///
    /// The window is inclusive on both ends. A start later than the end
    /// describes a window that spans midnight.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] when preordering is disabled or `now` is
    /// outside the window.
    pub fn check(&self, now: NaiveTime) -> Result<(), WindowError> {
        if !self.preordering_enabled {
            return Err(WindowError::Disabled);
        }
        let (start, end) = (self.preorder_start, self.preorder_end);
        let open = if start <= end {
            start <= now && now <= end
        } else {
            now >= start || now <= end
        };
        if open {
            Ok(())
        } else {
            Err(WindowError::Closed { start, end })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: NaiveTime, end: NaiveTime) -> PreorderWindow {
        PreorderWindow {
            preorder_start: start,
            preorder_end: end,
            preordering_enabled: true,
        }
    }

    #[test]
    fn test_daytime_window() {
        let w = window(t(8, 0), t(18, 0));
        assert!(w.check(t(8, 0)).is_ok());
        assert!(w.check(t(12, 30)).is_ok());
        assert!(w.check(t(18, 0)).is_ok());
        assert_eq!(
            w.check(t(18, 1)),
            Err(WindowError::Closed {
                start: t(8, 0),
                end: t(18, 0)
            })
        );
        assert!(w.check(t(7, 59)).is_err());
    }

    #[test]
    fn test_overnight_window() {
        let w = window(t(22, 0), t(6, 0));
        assert!(w.check(t(23, 0)).is_ok());
        assert!(w.check(t(5, 0)).is_ok());
        assert!(w.check(t(12, 0)).is_err());
    }

    #[test]
    fn test_disabled() {
        let mut w = window(t(0, 0), t(23, 59));
        w.preordering_enabled = false;
        assert_eq!(w.check(t(12, 0)), Err(WindowError::Disabled));
    }

    #[test]
    fn test_deserializes_clock_times() {
        let w: PreorderWindow = serde_json::from_str(
            r#"{"preorder_start": "09:00:00", "preorder_end": "17:30:00", "preordering_enabled": true}"#,
        )
        .unwrap();
        assert_eq!(w.preorder_end, t(17, 30));
    }
}
