/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic helpers: GCD, checked LCM and divisor enumeration.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of the [`HyperperiodCalculator`](super::HyperperiodCalculator)
//! and of the frame solver.

use super::HyperperiodError;

/// Iterative Euclidean GCD.
///
/// `gcd(a, 0) == a` and `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Checked LCM.
///
/// Uses `(a / gcd(a, b)) * b` so the division happens first; the final
/// multiplication is still checked and reported as
/// [`HyperperiodError::Overflow`].
///
/// * `Ok(0)` when exactly one input is `0`.
/// * `Err(InvalidPeriod { value: 0 })` when both are `0`; the LCM is
///   undefined there.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 && b == 0 {
        return Err(HyperperiodError::InvalidPeriod { value: 0 });
    }
    if a == 0 || b == 0 {
        return Ok(0);
    }

    // a / g is exact (g divides a by definition)
    let reduced = a / gcd(a, b);

    reduced
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Fold `lcm` left-to-right over `values`, starting from the first element.
///
/// Returns:
/// * `Err(EmptyInput)` for an empty slice.
/// * `Err` on the first overflow encountered.
pub fn lcm_of_slice(values: &[u64]) -> Result<u64, HyperperiodError> {
    let (first, rest) = values
        .split_first()
        .ok_or(HyperperiodError::EmptyInput)?;

    rest.iter().try_fold(*first, |acc, &v| lcm(acc, v))
}

/// All positive divisors of `n`, ascending and without duplicates.
///
/// Candidate factors are scanned from `1` up to `⌊√n⌋`; each hit `i` also
/// yields its cofactor `n / i`.  The loop bound is written as `i <= n / i` so
/// it cannot overflow for `n` close to `u64::MAX`.
///
/// `divisors(0)` is empty (every integer divides zero, so there is no finite
/// answer).
pub fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();

    let mut i = 1u64;
    while n != 0 && i <= n / i {
        if n % i == 0 {
            small.push(i);
            let cofactor = n / i;
            // perfect square: the pair collapses into one divisor
            if cofactor != i {
                large.push(cofactor);
            }
        }
        i += 1;
    }

    // `small` is ascending, `large` descending; stitch them together.
    small.extend(large.into_iter().rev());
    small
}

// ── Tests ─────────────────────────────────────────────────────────────────────
