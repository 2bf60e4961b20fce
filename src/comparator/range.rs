//! ASCII visualization of today's temperature within a historical range
//!
//! ```text
//! 47F - - - - - (today 53F) - - - - - 59F
//! ```
//!
//! One token per whole degree. When today lies outside the range the line is
//! stretched to include it.

/// Tokens of the range line, one per whole degree from the lowest to the
/// highest of `low`, `high` and `today` (all rounded).
#[must_use]
pub fn range_tokens(low: f64, high: f64, today: f64) -> Vec<String> {
    let low = low.round() as i64;
    let high = high.round() as i64;
    let today = today.round() as i64;

    let start = low.min(today);
    let end = high.max(today);

    (start..=end)
        .map(|degree| {
            if degree == today {
                format!("(today {degree}F)")
            } else if degree == low || degree == high {
                format!("{degree}F")
            } else {
                "-".to_string()
            }
        })
        .collect()
}

/// The range line, space separated and terminated by a newline
#[must_use]
pub fn render_range(low: f64, high: f64, today: f64) -> String {
    let mut line = range_tokens(low, high, today).join(" ");
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_inside_range() {
        assert_eq!(render_range(47.2, 51.4, 49.0), "47F - (today 49F) - 51F\n");
    }

    #[test]
    fn test_token_count_matches_span() {
        let (low, high) = (46.9157, 58.9957);
        for today in [47.0, 50.5, 53.0, 58.6] {
            let tokens = range_tokens(low, high, today);
            assert_eq!(tokens.len() as i64, high.round() as i64 - low.round() as i64 + 1);
        }
    }

    #[test]
    fn test_today_below_range_extends_left() {
        assert_eq!(render_range(47.0, 50.0, 45.0), "(today 45F) - 47F - - 50F\n");
    }

    #[test]
    fn test_today_above_range_extends_right() {
        assert_eq!(render_range(47.0, 50.0, 52.4), "47F - - 50F - (today 52F)\n");
    }

    #[test]
    fn test_today_on_bound_takes_precedence() {
        assert_eq!(render_range(47.0, 49.0, 46.6), "(today 47F) - 49F\n");
        assert_eq!(render_range(47.0, 49.0, 49.0), "47F - (today 49F)\n");
    }

    #[test]
    fn test_collapsed_range() {
        assert_eq!(render_range(50.2, 49.8, 50.0), "(today 50F)\n");
    }
}
