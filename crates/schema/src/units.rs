//! Unit-carrying measurement values.
//!
//! Each type wraps a single `f32` as reported by the power tool. No bounds are
//! enforced: a negative rate or a percentage above 100 passes through as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! measurement {
    ($(#[$meta:meta])* $name:ident, $precision:literal, $suffix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f32);

        impl $name {
            /// Returns the raw wrapped value.
            pub fn value(self) -> f32 {
                self.0
            }
        }

        impl From<f32> for $name {
            fn from(value: f32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.", $precision, "}", $suffix), self.0)
            }
        }
    };
}

measurement!(
    /// Energy in watt-hours, rendered as `"12.345 Wh"`.
    WattHour,
    3,
    " Wh"
);

measurement!(
    /// Power in watts, rendered as `"10.300 W"`.
    Watt,
    3,
    " W"
);

measurement!(
    /// Electric potential in volts, rendered as `"12.100 V"`.
    Volt,
    3,
    " V"
);

measurement!(
    /// A percentage, rendered as `"62.00%"`.
    Percentage,
    2,
    "%"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering() {
        assert_eq!(WattHour(45.5).to_string(), "45.500 Wh");
        assert_eq!(Watt(10.3).to_string(), "10.300 W");
        assert_eq!(Volt(12.1).to_string(), "12.100 V");
        assert_eq!(Percentage(62.0).to_string(), "62.00%");
    }

    #[test]
    fn test_rendering_ignores_caller_precision() {
        assert_eq!(format!("{:.1}", Watt(10.3)), "10.300 W");
        assert_eq!(format!("{:>12}", Percentage(5.0)), "5.00%");
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        assert_eq!(Watt(-7.25).to_string(), "-7.250 W");
        assert_eq!(Percentage(130.0).to_string(), "130.00%");
        assert_eq!(WattHour::default().value(), 0.0);
    }

    #[test]
    fn test_rendered_value_reparses_within_precision() {
        for raw in [0.0_f32, 1.2341, 10.3, 57.891, 99.999] {
            let rendered = WattHour(raw).to_string();
            let number: f32 = rendered.trim_end_matches(" Wh").parse().unwrap();
            assert!((number - raw).abs() <= 0.0005, "{} -> {}", raw, rendered);

            let rendered = Percentage(raw).to_string();
            let number: f32 = rendered.trim_end_matches('%').parse().unwrap();
            assert!((number - raw).abs() <= 0.005, "{} -> {}", raw, rendered);
        }
    }

    #[test]
    fn test_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Volt(12.5)).unwrap(), "12.5");
        let parsed: Percentage = serde_json::from_str("80.5").unwrap();
        assert_eq!(parsed, Percentage(80.5));
    }
}
