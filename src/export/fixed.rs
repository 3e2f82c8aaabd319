//! Two-decimal quantization
//!
//! Every exported number is rounded to hundredths before it is interned.
//! Storing the hundredths as an integer makes equality, hashing and the
//! text form exact, so a value survives a write/parse cycle unchanged.

use std::fmt;

/// A number quantized to hundredths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fixed2(pub i32);

/// Value is NaN, infinite, or too large to store as hundredths
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("value {value} can't be quantized to hundredths")]
pub struct OutOfRange {
    pub value: f64,
}

impl Fixed2 {
    pub const ZERO: Fixed2 = Fixed2(0);

    /// Round to the nearest hundredth (half away from zero)
    pub fn try_from_f64(v: f64) -> Result<Self, OutOfRange> {
        let hundredths = (v * 100.0).round();
        // NaN and infinities fall outside the range too
        if (i32::MIN as f64..=i32::MAX as f64).contains(&hundredths) {
            Ok(Fixed2(hundredths as i32))
        } else {
            Err(OutOfRange { value: v })
        }
    }

    #[cfg(test)]
    pub fn from_f32(v: f32) -> Self {
        Self::try_from_f64(v as f64).unwrap()
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

/// Quantize every component, failing on the first bad one
pub fn quantize<const N: usize>(values: [f64; N]) -> Result<[Fixed2; N], OutOfRange> {
    let mut out = [Fixed2::ZERO; N];
    for (slot, v) in out.iter_mut().zip(values) {
        *slot = Fixed2::try_from_f64(v)?;
    }
    Ok(out)
}

impl fmt::Display for Fixed2 {
    /// Shortest form with at least one fractional digit: `200.0`, `1.5`, `-0.25`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        if frac % 10 == 0 {
            write!(f, "{}{}.{}", sign, whole, frac / 10)
        } else {
            write!(f, "{}{}.{:02}", sign, whole, frac)
        }
    }
}

/// Quantized position in target space
pub type Position = [Fixed2; 3];
/// Quantized loop normal
pub type Normal = [Fixed2; 3];
/// Quantized texture coordinate
pub type Uv = [Fixed2; 2];

/// Format a tuple as `{a,b,c}`
pub fn format_tuple(values: &[Fixed2]) -> String {
    let inner: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("{{{}}}", inner.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(Fixed2::from_f32(1.234).0, 123);
        assert_eq!(Fixed2::try_from_f64(-0.125), Ok(Fixed2(-13)));
        assert_eq!(Fixed2::try_from_f64(2.675_000_1), Ok(Fixed2(268)));
    }

    #[test]
    fn test_rejects_values_that_do_not_fit() {
        assert!(Fixed2::try_from_f64(f64::NAN).is_err());
        assert!(Fixed2::try_from_f64(f64::INFINITY).is_err());
        assert_eq!(Fixed2::try_from_f64(1e9), Err(OutOfRange { value: 1e9 }));
        assert_eq!(Fixed2::try_from_f64(21_474_836.47), Ok(Fixed2(i32::MAX)));
        assert_eq!(Fixed2::try_from_f64(-21_474_836.48), Ok(Fixed2(i32::MIN)));
        assert!(Fixed2::try_from_f64(21_474_836.48).is_err());
    }

    #[test]
    fn test_quantize_tuple() {
        assert_eq!(quantize([1.0, -0.5, 0.004]), Ok([Fixed2(100), Fixed2(-50), Fixed2(0)]));
        assert_eq!(quantize([1.0, f64::NAN]).map_err(|e| e.value.is_nan()), Err(true));
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        assert_eq!(Fixed2::from_f32(-0.001), Fixed2::from_f32(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Fixed2(20000).to_string(), "200.0");
        assert_eq!(Fixed2(150).to_string(), "1.5");
        assert_eq!(Fixed2(-25).to_string(), "-0.25");
        assert_eq!(Fixed2(-7).to_string(), "-0.07");
        assert_eq!(Fixed2(0).to_string(), "0.0");
    }

    #[test]
    fn test_format_tuple() {
        let p: Position = [Fixed2(100), Fixed2(-5050), Fixed2(3)];
        assert_eq!(format_tuple(&p), "{1.0,-50.5,0.03}");
    }
}
