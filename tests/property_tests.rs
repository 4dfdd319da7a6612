//! Property-based tests for leveled_logger using proptest

use leveled_logger::core::caller::resolve_function_name;
use leveled_logger::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Crit),
    ]
}

struct CountingSink(Arc<Mutex<Vec<LogLevel>>>);

impl Sink for CountingSink {
    fn write(&mut self, level: LogLevel, _message: &str) -> Result<()> {
        self.0.lock().push(level);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches the numeric values
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Raw values map back to the same level; anything past CRIT is rejected
    #[test]
    fn test_log_level_try_from(raw in any::<u8>()) {
        match LogLevel::try_from(raw) {
            Ok(level) => prop_assert_eq!(level as u8, raw),
            Err(LoggerError::InvalidLevel(v)) => {
                prop_assert_eq!(v, raw);
                prop_assert!(raw as usize >= LogLevel::COUNT);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(input.parse::<LogLevel>().unwrap(), level);
    }
}

// ============================================================================
// Caller Resolution Tests
// ============================================================================

proptest! {
    /// The resolved name is always the last plain path segment
    #[test]
    fn test_resolve_last_segment(
        segments in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 1..5),
        closures in 0usize..3,
    ) {
        let mut path = segments.join("::");
        for _ in 0..closures {
            path.push_str("::{{closure}}");
        }
        let path: &'static str = Box::leak(path.into_boxed_str());

        prop_assert_eq!(resolve_function_name(path), segments.last().unwrap().as_str());
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Exactly the messages at or above the minimum level reach the sink
    #[test]
    fn test_filtering_matches_threshold(
        min in any_level(),
        levels in prop::collection::vec(any_level(), 0..40),
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut logger = Logger::builder()
            .sink(CountingSink(Arc::clone(&seen)))
            .min_level(min)
            .build()
            .unwrap();

        for level in &levels {
            logger.log(*level, &CallSite::unknown(), "m");
        }
        prop_assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));

        let expected = levels.iter().filter(|l| **l >= min).count();
        prop_assert_eq!(seen.lock().len(), expected);
        prop_assert!(seen.lock().iter().all(|l| *l >= min));
    }
}
