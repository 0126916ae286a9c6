use crate::prelude::Percent;

/// Conversions from raw service numbers to bounded integer percentages.
pub struct PercentHelper;

impl PercentHelper {
    /// Reads `value` as a fraction in `[0, 1]`.
    pub fn from_unit_interval(value: Option<f64>) -> Percent {
        let fraction = value.unwrap_or(0.0);
        if fraction.is_nan() {
            return 0;
        }
        Self::bounded(fraction.clamp(0.0, 1.0) * 100.0)
    }

    /// Reads `value` as either a fraction or an already-scaled percentage.
    ///
    /// Anything `<= 1` is taken as a fraction, so a genuine score of `1.0` on a
    /// 0–100 scale reads as 100%.
    pub fn from_ambiguous_scale(value: Option<f64>) -> Percent {
        let raw = value.unwrap_or(0.0);
        if raw.is_nan() {
            return 0;
        }
        let scaled = if raw <= 1.0 { raw * 100.0 } else { raw };
        Self::bounded(scaled)
    }

    /// Rounds a value that is already on the 0–100 scale.
    pub fn from_percent_scale(value: Option<f64>) -> Percent {
        let raw = value.unwrap_or(0.0);
        if raw.is_nan() {
            return 0;
        }
        Self::bounded(raw)
    }

    fn bounded(scaled: f64) -> Percent {
        scaled.round().clamp(0.0, 100.0) as Percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval_scales_and_rounds() {
        assert_eq!(PercentHelper::from_unit_interval(Some(0.5)), 50);
        assert_eq!(PercentHelper::from_unit_interval(Some(0.834)), 83);
        assert_eq!(PercentHelper::from_unit_interval(None), 0);
    }

    #[test]
    fn unit_interval_is_bounded_outside_range() {
        assert_eq!(PercentHelper::from_unit_interval(Some(-3.0)), 0);
        assert_eq!(PercentHelper::from_unit_interval(Some(7.5)), 100);
        assert_eq!(PercentHelper::from_unit_interval(Some(f64::INFINITY)), 100);
        assert_eq!(PercentHelper::from_unit_interval(Some(f64::NAN)), 0);
    }

    #[test]
    fn ambiguous_scale_boundaries() {
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(0.7)), 70);
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(70.0)), 70);
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(1.0)), 100);
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(0.0)), 0);
        assert_eq!(PercentHelper::from_ambiguous_scale(None), 0);
    }

    #[test]
    fn ambiguous_scale_is_bounded() {
        for raw in [-250.0, -1.0, -0.2, 1.0001, 99.6, 100.4, 512.0, f64::MAX] {
            let pct = PercentHelper::from_ambiguous_scale(Some(raw));
            assert!(pct <= 100, "{raw} produced {pct}");
        }
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(-0.2)), 0);
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(512.0)), 100);
        assert_eq!(PercentHelper::from_ambiguous_scale(Some(f64::NAN)), 0);
    }

    #[test]
    fn percent_scale_rounds_directly() {
        assert_eq!(PercentHelper::from_percent_scale(Some(0.7)), 1);
        assert_eq!(PercentHelper::from_percent_scale(Some(40.4)), 40);
        assert_eq!(PercentHelper::from_percent_scale(Some(-12.0)), 0);
        assert_eq!(PercentHelper::from_percent_scale(Some(140.0)), 100);
    }
}
