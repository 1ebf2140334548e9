use std::fmt::Write as _;
use std::time::Duration;

use crate::options::BarConfig;
use crate::theme::BLANK_CHAR;

pub const LINE_PREFIX: &str = "Progress: ";

/// Number of filled slots, `floor(width * value / bound)`.
///
/// `value` must already be clamped to `[0, bound]`.
pub fn level(width: i64, value: i64, bound: i64) -> i64 {
    (i128::from(width) * i128::from(value) / i128::from(bound)) as i64
}

/// One carriage-return-prefixed bar line, without a trailing newline.
pub fn render_line(config: &BarConfig, value: i64, bound: i64, elapsed: Duration) -> String {
    let filled = level(config.width, value, bound) as usize;
    let blanks = config.width as usize - filled;
    let theme = &config.theme;

    let mut line = String::with_capacity(LINE_PREFIX.len() + 4 * config.width as usize + 24);
    line.push('\r');
    line.push_str(LINE_PREFIX);
    line.push(theme.start_char);
    line.extend(std::iter::repeat(theme.fill_char).take(filled));
    line.extend(std::iter::repeat(BLANK_CHAR).take(blanks));
    line.push(theme.end_char);

    if config.show_percentage {
        let percentage = 100.0 * value as f32 / bound as f32;
        let _ = write!(line, " {percentage:.2}%");
    }
    if config.show_elapsed_time {
        let _ = write!(line, " - {:.2}s ", elapsed.as_secs_f64());
    }
    line
}

/// Trailer emitted once when a bar completes.
pub fn wall_time_line(elapsed: Duration) -> String {
    format!("\nWall time: {:.6}\n", elapsed.as_secs_f64())
}
