//! Property tests for millimeter/step conversion and status parsing.

use proptest::prelude::*;
use stage_jog::protocol::parse_status;
use stage_jog::{mm_to_steps, steps_to_mm, AxisCommand, DeviceStatus, Millimeters, RoundingMode};

proptest! {
    #[test]
    fn truncate_is_floor_for_non_negative(d in 0.0f64..1.0e6) {
        let steps = mm_to_steps(Millimeters(d), RoundingMode::Truncate).unwrap();
        prop_assert_eq!(steps.0, (d / 0.0025).floor() as i64);
    }

    #[test]
    fn half_up_is_floor_plus_half(d in 0.0f64..1.0e6) {
        let steps = mm_to_steps(Millimeters(d), RoundingMode::NearestHalfUp).unwrap();
        prop_assert_eq!(steps.0, (d / 0.0025 + 0.5).floor() as i64);
    }

    #[test]
    fn round_trip_negates_within_one_step(d in 0.0f64..1.0e6) {
        let steps = mm_to_steps(Millimeters(d), RoundingMode::Truncate).unwrap();
        let back = steps_to_mm(steps);
        prop_assert!((back.0 + d).abs() <= 0.0025 + 1e-6);
    }

    #[test]
    fn truncate_never_exceeds_half_up(d in 0.0f64..1.0e6) {
        let down = mm_to_steps(Millimeters(d), RoundingMode::Truncate).unwrap();
        let up = mm_to_steps(Millimeters(d), RoundingMode::NearestHalfUp).unwrap();
        prop_assert!(up.0 - down.0 == 0 || up.0 - down.0 == 1);
    }

    #[test]
    fn move_left_encodes_truncated_steps(d in 0.0f64..1.0e4) {
        let encoded = AxisCommand::move_left(Millimeters(d)).unwrap().encode();
        let expected = format!("C, I2M{}, R", (d / 0.0025).floor() as i64);
        prop_assert_eq!(encoded.as_str(), expected.as_str());
    }

    #[test]
    fn status_other_than_r_or_b_is_jog(text in "[^RB\\s]{0,8}") {
        prop_assert_eq!(parse_status(text.as_bytes()), DeviceStatus::Jog);
    }
}
