//! Exact rational arithmetic foundation.
//!
//! Every coordinate and plane coefficient in this crate is a [`Rational`]:
//! an arbitrary-precision fraction kept in lowest terms with a positive
//! denominator. Splitting and classification are therefore exact and
//! reproducible; there are no epsilon comparisons anywhere.

use num_bigint::BigInt;

/// Arbitrary-precision exact fraction.
///
/// Backed by [`num_rational::BigRational`], which maintains the invariants
/// this crate relies on: lowest terms, positive denominator, total order,
/// and arithmetic closed under `+`, `-`, `*`, `/`.
pub type Rational = num_rational::BigRational;

/// Shorthand for constructing a [`Rational`] from an integer.
pub fn rat(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// Shorthand for constructing a [`Rational`] from a numerator/denominator pair.
///
/// # Panics
///
/// Panics if `denominator` is zero.
pub fn ratio(numerator: i64, denominator: i64) -> Rational {
    Rational::new(BigInt::from(numerator), BigInt::from(denominator))
}
