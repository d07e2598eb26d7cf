//! Numeric accessors layered over a single "next bits" primitive.

use crate::error::{Error, Result};

const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// Capability to produce up to 32 pseudorandom bits at a time.
///
/// Every accessor is derived from [`RandomBits::next`], so any implementor
/// gets identical conversions.
pub trait RandomBits {
    /// Returns `num_bits` (1..=32) random bits in the low end of a `u32`.
    ///
    /// Implementations consume `ceil(num_bits / 8)` bytes, assemble them
    /// big-endian and keep the *high* `num_bits` bits, discarding low-order
    /// slack. Outputs keyed to a fixed seed depend on this exact rule.
    fn next(&mut self, num_bits: u32) -> Result<u32>;

    /// Uniform `u32`.
    fn u32(&mut self) -> Result<u32> {
        self.next(32)
    }

    /// Uniform `i32`.
    fn i32(&mut self) -> Result<i32> {
        self.u32().map(|v| v as i32)
    }

    /// Uniform `u64` built from two 32-bit draws, high half first.
    fn u64(&mut self) -> Result<u64> {
        let hi = u64::from(self.next(32)?);
        let lo = u64::from(self.next(32)?);
        Ok((hi << 32) | lo)
    }

    /// Uniform `i64`.
    fn i64(&mut self) -> Result<i64> {
        self.u64().map(|v| v as i64)
    }

    /// Fair coin flip consuming one byte.
    fn bool(&mut self) -> Result<bool> {
        Ok(self.next(1)? != 0)
    }

    /// Uniform `f64` in `[0, 1)` with 53 bits of precision.
    fn f64(&mut self) -> Result<f64> {
        let hi = u64::from(self.next(26)?);
        let lo = u64::from(self.next(27)?);
        Ok(((hi << 27) + lo) as f64 * DOUBLE_UNIT)
    }

    /// Uniform `f32` in `[0, 1)` with 24 bits of precision, consuming three
    /// bytes.
    fn f32(&mut self) -> Result<f32> {
        Ok(self.next(24)? as f32 * FLOAT_UNIT)
    }

    /// Uniform value in `[0, bound)`, rejecting draws from the biased tail.
    fn u32_below(&mut self, bound: u32) -> Result<u32> {
        if bound == 0 {
            return Err(Error::InvalidArgument("bound must be positive"));
        }
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let candidate = self.u32()?;
            if candidate >= threshold {
                return Ok(candidate % bound);
            }
        }
    }

    /// 128-bit identifier from two consecutive 64-bit draws.
    fn uuid(&mut self) -> Result<u128> {
        let hi = u128::from(self.u64()?);
        let lo = u128::from(self.u64()?);
        Ok((hi << 64) | lo)
    }
}
