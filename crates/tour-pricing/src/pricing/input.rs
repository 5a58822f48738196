use serde_json::Value;

use super::error::PricingError;

/// Interpret a loosely typed participant count from a form or JSON body.
///
/// Accepts integers, whole-valued floats, and numeric strings. Sign is not
/// checked here; [`super::evaluate`] rejects non-positive counts.
pub fn participants_from_value(value: &Value) -> Result<i64, PricingError> {
    match value {
        Value::Number(number) => {
            if let Some(count) = number.as_i64() {
                return Ok(count);
            }
            // counts past i64 saturate so the range check reports them
            if number.as_u64().is_some() {
                return Ok(i64::MAX);
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 => Ok(float as i64),
                _ => Err(invalid(format!("{number} is not a whole number"))),
            }
        }
        Value::String(raw) => {
            let trimmed = raw.trim();
            match trimmed.parse::<i64>() {
                Ok(count) => Ok(count),
                Err(_) if trimmed.parse::<u64>().is_ok() => Ok(i64::MAX),
                Err(_) => Err(invalid(format!("'{trimmed}' is not a number"))),
            }
        }
        Value::Null => Err(invalid("value is missing".to_string())),
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}

fn invalid(reason: String) -> PricingError {
    PricingError::InvalidInput { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(participants_from_value(&json!(4)), Ok(4));
        assert_eq!(participants_from_value(&json!(" 12 ")), Ok(12));
        assert_eq!(participants_from_value(&json!(6.0)), Ok(6));
        assert_eq!(participants_from_value(&json!(-2)), Ok(-2));
    }

    #[test]
    fn oversized_counts_saturate_and_fail_the_range_check() {
        use crate::pricing::{evaluate, PricingPolicy, TourPricingConfig};
        use rust_decimal_macros::dec;

        let config = TourPricingConfig {
            base_price: dec!(100),
            policy: PricingPolicy::Fixed,
            min_participants: 1,
            max_participants: 20,
            version: 1,
        };

        for value in [json!(u64::MAX), json!("18446744073709551615"), json!(1e20)] {
            let participants = participants_from_value(&value).expect("whole number accepted");
            assert_eq!(participants, i64::MAX);
            match evaluate(&config, participants) {
                Err(error) => assert_eq!(error.kind(), "participants_out_of_range"),
                Ok(result) => panic!("expected range failure for {value}, got {result:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_numeric_and_fractional_values() {
        for value in [json!("four"), json!(2.5), json!(null), json!([3]), json!(true)] {
            match participants_from_value(&value) {
                Err(PricingError::InvalidInput { .. }) => {}
                other => panic!("expected invalid input for {value}, got {other:?}"),
            }
        }
    }
}
