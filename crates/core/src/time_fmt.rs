// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable duration formatting for recovery times.

use std::time::Duration;

/// Format a duration as `"850ms"`, `"2.5s"`, or `"1m5s"`.
///
/// Sub-second values keep millisecond precision; values under a minute are
/// rounded to tenths and drop a trailing `.0`; longer values are rounded to
/// whole seconds. Rounding that reaches a minute uses the minute form.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    let tenths = (ms + 50) / 100;
    if ms < 1000 {
        format!("{}ms", ms)
    } else if tenths < 600 {
        if tenths % 10 == 0 {
            format!("{}s", tenths / 10)
        } else {
            format!("{}.{}s", tenths / 10, tenths % 10)
        }
    } else {
        let secs = (ms + 500) / 1000;
        let (m, s) = (secs / 60, secs % 60);
        if s > 0 {
            format!("{}m{}s", m, s)
        } else {
            format!("{}m", m)
        }
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
