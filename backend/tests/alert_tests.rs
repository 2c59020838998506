//! Alert decision rule tests
//!
//! Timing semantics around the cooldown boundary and threshold equality,
//! plus the recipient syntax check that gates email dispatch.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::alerting::{cooldown_remaining_hours, should_send_alert};
use shared::validation::validate_email;

/// Fixed evaluation instant
fn eval_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, 22, 0, 0).unwrap()
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_storm_with_no_history_fires() {
        assert!(should_send_alert(Some(6.0), 5.0, None, 1.0, eval_time()));
    }

    #[test]
    fn test_threshold_equality_fires() {
        assert!(should_send_alert(Some(5.0), 5.0, None, 1.0, eval_time()));
    }

    #[test]
    fn test_just_below_threshold_never_fires() {
        assert!(!should_send_alert(Some(4.9), 5.0, None, 1.0, eval_time()));

        let long_ago = eval_time() - Duration::hours(5);
        assert!(!should_send_alert(
            Some(4.9),
            5.0,
            Some(long_ago),
            1.0,
            eval_time()
        ));
    }

    #[test]
    fn test_alert_sent_now_suppresses() {
        assert!(!should_send_alert(
            Some(6.0),
            5.0,
            Some(eval_time()),
            1.0,
            eval_time()
        ));
    }

    #[test]
    fn test_cooldown_elapsed_fires_again() {
        let two_hours_ago = eval_time() - Duration::hours(2);
        assert!(should_send_alert(
            Some(6.0),
            5.0,
            Some(two_hours_ago),
            1.0,
            eval_time()
        ));
    }

    #[test]
    fn test_exact_cooldown_boundary_fires() {
        let exactly_one_hour = eval_time() - Duration::hours(1);
        assert!(should_send_alert(
            Some(6.0),
            5.0,
            Some(exactly_one_hour),
            1.0,
            eval_time()
        ));
    }

    #[test]
    fn test_missing_kp_never_fires() {
        assert!(!should_send_alert(None, 5.0, None, 1.0, eval_time()));
        assert!(!should_send_alert(None, 0.0, None, 0.0, eval_time()));
    }

    #[test]
    fn test_fractional_cooldown() {
        let forty_minutes_ago = eval_time() - Duration::minutes(40);
        assert!(!should_send_alert(
            Some(7.0),
            5.0,
            Some(forty_minutes_ago),
            1.0,
            eval_time()
        ));
        assert!(should_send_alert(
            Some(7.0),
            5.0,
            Some(forty_minutes_ago),
            0.5,
            eval_time()
        ));
    }

    #[test]
    fn test_remaining_counts_down_and_floors_at_zero() {
        let half_hour_ago = eval_time() - Duration::minutes(30);
        let remaining = cooldown_remaining_hours(Some(half_hour_ago), 1.0, eval_time()).unwrap();
        assert!((remaining - 0.5).abs() < 1e-9);

        let long_ago = eval_time() - Duration::hours(9);
        assert_eq!(
            cooldown_remaining_hours(Some(long_ago), 1.0, eval_time()),
            Some(0.0)
        );
        assert_eq!(cooldown_remaining_hours(None, 1.0, eval_time()), None);
    }

    #[test]
    fn test_email_syntax_verdicts() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("a@b.co"));
        assert!(!validate_email("a@b.c"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("@example.com"));
    }
}

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_below_threshold_never_fires(
            kp in 0.0..=9.0f64,
            threshold in 0.0..=9.0f64,
            hours_ago in 0i64..100,
        ) {
            prop_assume!(kp < threshold);
            let last = eval_time() - Duration::hours(hours_ago);
            prop_assert!(!should_send_alert(Some(kp), threshold, Some(last), 1.0, eval_time()));
            prop_assert!(!should_send_alert(Some(kp), threshold, None, 1.0, eval_time()));
        }

        #[test]
        fn prop_no_history_fires_at_or_above_threshold(
            threshold in 0.0..=9.0f64,
            excess in 0.0..=3.0f64,
        ) {
            prop_assert!(should_send_alert(
                Some(threshold + excess),
                threshold,
                None,
                1.0,
                eval_time()
            ));
        }

        #[test]
        fn prop_longer_cooldown_never_unlocks_earlier(
            minutes_ago in 0i64..600,
            cooldown_a in 0.1..=10.0f64,
            cooldown_b in 0.1..=10.0f64,
        ) {
            let (short, long) = if cooldown_a <= cooldown_b {
                (cooldown_a, cooldown_b)
            } else {
                (cooldown_b, cooldown_a)
            };
            let last = eval_time() - Duration::minutes(minutes_ago);
            let fires_long = should_send_alert(Some(7.0), 5.0, Some(last), long, eval_time());
            let fires_short = should_send_alert(Some(7.0), 5.0, Some(last), short, eval_time());
            // Anything the long cooldown lets through, the short one must too.
            prop_assert!(!fires_long || fires_short);
        }

        #[test]
        fn prop_remaining_stays_within_bounds(
            minutes_ago in 0i64..6000,
            cooldown in 0.0..=10.0f64,
        ) {
            let last = eval_time() - Duration::minutes(minutes_ago);
            let remaining = cooldown_remaining_hours(Some(last), cooldown, eval_time()).unwrap();
            prop_assert!(remaining >= 0.0);
            prop_assert!(remaining <= cooldown);
        }
    }
}
