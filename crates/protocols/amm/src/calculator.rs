//! AMM Calculator
//!
//! Continuous liquidity pool swap math. With `X` the depth of the input side,
//! `x` the input amount and `Y` the depth of the output side:
//!
//! - emission: `x * X * Y / (x + X)^2`
//! - liquidity fee: `x^2 * Y / (x + X)^2` (in `Y` units)
//! - slip: `x * 10_000 / (x + X)` (basis points)
//!
//! Every intermediate is computed in `BigInt` and results are floored.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use swapline_core::{constants::MAX_BASIS_POINTS, Amount};

use crate::state::MathError;

fn to_amount(value: BigInt) -> Result<Amount, MathError> {
    value.to_u128().ok_or(MathError::Overflow)
}

fn checked_div(numerator: BigInt, denominator: BigInt) -> Result<Amount, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivideByZero);
    }
    to_amount(numerator / denominator)
}

/// `a * b / c`, floored
pub fn mul_div(a: Amount, b: Amount, c: Amount) -> Result<Amount, MathError> {
    checked_div(BigInt::from(a) * BigInt::from(b), BigInt::from(c))
}

/// Output amount for `x` input against depths `X` (input side) and `Y` (output side)
pub fn calc_asset_emission(x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError> {
    let big_x = BigInt::from(x_depth);
    let x = BigInt::from(x);
    let big_y = BigInt::from(y_depth);

    let numerator = &x * &big_x * &big_y;
    let sum = &x + &big_x;
    checked_div(numerator, &sum * &sum)
}

/// Liquidity fee retained by the pool, denominated in output-side units
pub fn calc_liquidity_fee(x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError> {
    let big_x = BigInt::from(x_depth);
    let x = BigInt::from(x);
    let big_y = BigInt::from(y_depth);

    let numerator = &x * &x * &big_y;
    let sum = &x + &big_x;
    checked_div(numerator, &sum * &sum)
}

/// Slip in basis points; zero for a zero input
pub fn calc_swap_slip(x_depth: Amount, x: Amount) -> Result<Amount, MathError> {
    if x == 0 {
        return Ok(0);
    }
    let x_big = BigInt::from(x);
    checked_div(
        &x_big * BigInt::from(MAX_BASIS_POINTS),
        &x_big + BigInt::from(x_depth),
    )
}

/// Depth scaled by `mult_bp` basis points; 10_000 leaves it untouched
pub fn virtual_depth(depth: Amount, mult_bp: Amount) -> Result<Amount, MathError> {
    mul_div(depth, mult_bp, MAX_BASIS_POINTS)
}

/// Share of pool depth covered by a synthetic supply, in basis points.
///
/// `supply * 10_000 / (2 * balance_asset)`
pub fn calc_synth_coverage(supply: Amount, balance_asset: Amount) -> Result<Amount, MathError> {
    checked_div(
        BigInt::from(supply) * BigInt::from(MAX_BASIS_POINTS),
        BigInt::from(balance_asset) * 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use swapline_core::constants::ONE;

    #[test]
    fn test_calc_asset_emission() {
        // 200 base into a 10_000 base / 100 asset pool
        let emit = calc_asset_emission(10_000 * ONE, 200 * ONE, 100 * ONE).unwrap();
        assert_eq!(emit, 192_233_756);
    }

    #[test]
    fn test_calc_liquidity_fee() {
        let fee = calc_liquidity_fee(10_000 * ONE, 200 * ONE, 100 * ONE).unwrap();
        // 200^2 * 100 / 10200^2 whole units
        assert_eq!(fee, 3_844_675);
    }

    #[test]
    fn test_calc_swap_slip() {
        assert_eq!(calc_swap_slip(10_000 * ONE, 200 * ONE).unwrap(), 196);
        assert_eq!(calc_swap_slip(10_000 * ONE, 0).unwrap(), 0);
        assert_eq!(calc_swap_slip(0, 1).unwrap(), 10_000);
    }

    #[test]
    fn test_zero_depth_divides_by_zero() {
        assert_eq!(calc_asset_emission(0, 0, 100), Err(MathError::DivideByZero));
        assert_eq!(calc_synth_coverage(1, 0), Err(MathError::DivideByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(MathError::Overflow));
        assert_eq!(mul_div(u128::MAX, 2, 2).unwrap(), u128::MAX);
    }

    #[test]
    fn test_virtual_depth() {
        assert_eq!(virtual_depth(1_000, 10_000).unwrap(), 1_000);
        assert_eq!(virtual_depth(1_000, 20_000).unwrap(), 2_000);
        assert_eq!(virtual_depth(1_000, 5_000).unwrap(), 500);
    }

    #[test]
    fn test_calc_synth_coverage() {
        // 33% of the asset side backing synths
        assert_eq!(calc_synth_coverage(66, 100).unwrap(), 3_300);
    }

    proptest! {
        #[test]
        fn prop_slip_monotone_in_input(
            depth in 1u128..1_000_000_000_000_000,
            a in 0u128..1_000_000_000_000,
            b in 0u128..1_000_000_000_000,
        ) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calc_swap_slip(depth, small).unwrap() <= calc_swap_slip(depth, large).unwrap());
        }

        #[test]
        fn prop_deeper_virtual_pool_never_slips_more(
            depth in 1u128..1_000_000_000_000_000,
            x in 1u128..1_000_000_000_000,
            mult in 10_000u128..100_000,
        ) {
            let plain = calc_swap_slip(depth, x).unwrap();
            let deep = calc_swap_slip(virtual_depth(depth, mult).unwrap(), x).unwrap();
            prop_assert!(deep <= plain);
        }

        // the fee only grows as depth shrinks while x stays within the shallower depth
        #[test]
        fn prop_shallower_virtual_pool_charges_more_fee(
            x_units in 1u128..1_000_000_000_000,
            y_units in 1u128..1_000_000_000_000,
            a in 1u128..=10_000,
            b in 1u128..=10_000,
            seed in 0u128..u128::from(u64::MAX),
        ) {
            let (mult_1, mult_2) = if a <= b { (a, b) } else { (b, a) };
            let x_depth = x_units * MAX_BASIS_POINTS;
            let y_depth = y_units * MAX_BASIS_POINTS;
            let x = seed % (x_units * mult_1 + 1);

            let shallow = calc_liquidity_fee(
                virtual_depth(x_depth, mult_1).unwrap(),
                x,
                virtual_depth(y_depth, mult_1).unwrap(),
            ).unwrap();
            let deep = calc_liquidity_fee(
                virtual_depth(x_depth, mult_2).unwrap(),
                x,
                virtual_depth(y_depth, mult_2).unwrap(),
            ).unwrap();
            prop_assert!(shallow >= deep);
        }

        #[test]
        fn prop_emission_below_output_depth(
            x_depth in 1u128..1_000_000_000_000_000,
            y_depth in 1u128..1_000_000_000_000_000,
            x in 0u128..1_000_000_000_000_000,
        ) {
            let emit = calc_asset_emission(x_depth, x, y_depth).unwrap();
            let fee = calc_liquidity_fee(x_depth, x, y_depth).unwrap();
            prop_assert!(emit < y_depth);
            prop_assert!(emit + fee <= y_depth);
        }
    }
}
