//! Input normalization shared by the sampler, the stores and the HTTP layer.
//!
//! Malformed input never aborts a call: blank or over-long identifiers are
//! reported as `None` (the caller skips them) and numeric knobs are clamped.

/// Longest platform identifier accepted, in characters.
pub const MAX_PLATFORM_LEN: usize = 32;
/// Longest query text accepted, in characters.
pub const MAX_QUERY_LEN: usize = 200;

pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 200;
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;
pub const DEFAULT_LIST_LIMIT: usize = 20;

pub const MIN_TRIALS: u32 = 1;
pub const MAX_TRIALS: u32 = 10_000;

/// Trim a platform identifier. `None` if blank or longer than [`MAX_PLATFORM_LEN`].
pub fn normalize_platform(raw: &str) -> Option<&str> {
    bounded_trim(raw, MAX_PLATFORM_LEN)
}

/// Trim a query string. `None` if blank or longer than [`MAX_QUERY_LEN`].
pub fn normalize_query(raw: &str) -> Option<&str> {
    bounded_trim(raw, MAX_QUERY_LEN)
}

fn bounded_trim(raw: &str, max_chars: usize) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_chars {
        None
    } else {
        Some(trimmed)
    }
}

/// Clamp a reward into `[0, 1]`. NaN counts as no success.
pub fn clamp_reward(reward: f64) -> f64 {
    if reward.is_nan() {
        0.0
    } else {
        reward.clamp(0.0, 1.0)
    }
}

/// Clamp a trial weight into `[MIN_TRIALS, MAX_TRIALS]`.
pub fn clamp_trials(trials: i64) -> u32 {
    trials.clamp(MIN_TRIALS as i64, MAX_TRIALS as i64) as u32
}

/// Clamp a requested page size into `[MIN_LIMIT, MAX_LIMIT]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: usize) -> usize {
    match limit {
        Some(n) => n.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize,
        None => default.clamp(MIN_LIMIT, MAX_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_is_trimmed_and_bounded() {
        assert_eq!(normalize_platform("  weibo "), Some("weibo"));
        assert_eq!(normalize_platform("   "), None);
        assert_eq!(normalize_platform(""), None);
        let at_limit = "x".repeat(32);
        assert_eq!(normalize_platform(&at_limit), Some(at_limit.as_str()));
        assert_eq!(normalize_platform(&"x".repeat(33)), None);
    }

    #[test]
    fn platform_is_case_sensitive() {
        assert_eq!(normalize_platform("Weibo"), Some("Weibo"));
    }

    #[test]
    fn query_length_counts_characters_not_bytes() {
        let cjk = "小红书".repeat(60); // 180 chars, 540 bytes
        assert_eq!(normalize_query(&cjk), Some(cjk.as_str()));
        let too_long = "书".repeat(201);
        assert_eq!(normalize_query(&too_long), None);
    }

    #[test]
    fn reward_clamps_into_unit_interval() {
        assert_eq!(clamp_reward(-0.5), 0.0);
        assert_eq!(clamp_reward(1.7), 1.0);
        assert_eq!(clamp_reward(0.25), 0.25);
        assert_eq!(clamp_reward(f64::NAN), 0.0);
        assert_eq!(clamp_reward(f64::INFINITY), 1.0);
    }

    #[test]
    fn trials_clamp() {
        assert_eq!(clamp_trials(0), 1);
        assert_eq!(clamp_trials(-40), 1);
        assert_eq!(clamp_trials(7), 7);
        assert_eq!(clamp_trials(1_000_000), 10_000);
    }

    #[test]
    fn limit_clamp_and_default() {
        assert_eq!(clamp_limit(None, DEFAULT_SAMPLE_LIMIT), 10);
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT), 20);
        assert_eq!(clamp_limit(Some(0), DEFAULT_SAMPLE_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_SAMPLE_LIMIT), 1);
        assert_eq!(clamp_limit(Some(500), DEFAULT_SAMPLE_LIMIT), 200);
        assert_eq!(clamp_limit(Some(42), DEFAULT_SAMPLE_LIMIT), 42);
    }
}
