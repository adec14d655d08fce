//! SOL/lamport amount conversion.

use thiserror::Error;

/// Lamports per one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Amount validation errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    /// Amount is NaN or infinite.
    #[error("transfer amount is not finite: {value}")]
    NotFinite {
        /// Rejected input.
        value: f64,
    },
    /// Amount is below zero.
    #[error("transfer amount is negative: {value}")]
    Negative {
        /// Rejected input.
        value: f64,
    },
    /// Amount does not fit in a lamport count.
    #[error("transfer amount exceeds the maximum lamport value: {value}")]
    ExceedsMax {
        /// Rejected input.
        value: f64,
    },
}

/// Converts a SOL amount to lamports, truncating toward zero.
///
/// # Errors
///
/// Returns [`AmountError`] when the amount is non-finite, negative, or too
/// large to represent in lamports.
pub fn sol_to_lamports(sol: f64) -> Result<u64, AmountError> {
    if !sol.is_finite() {
        return Err(AmountError::NotFinite { value: sol });
    }
    if sol < 0.0 {
        return Err(AmountError::Negative { value: sol });
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).floor();
    if lamports >= u64::MAX as f64 {
        return Err(AmountError::ExceedsMax { value: sol });
    }
    Ok(lamports as u64)
}

/// Converts lamports to a SOL amount for display.
#[must_use]
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sol_is_one_billion_lamports() {
        assert_eq!(sol_to_lamports(1.0), Ok(1_000_000_000));
    }

    #[test]
    fn smallest_representable_fraction_floors_to_one() {
        assert_eq!(sol_to_lamports(0.000_000_001), Ok(1));
    }

    #[test]
    fn sub_lamport_fraction_floors_to_zero() {
        assert_eq!(sol_to_lamports(0.000_000_000_1), Ok(0));
    }

    #[test]
    fn zero_converts_to_zero() {
        assert_eq!(sol_to_lamports(0.0), Ok(0));
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert_eq!(
            sol_to_lamports(-0.5),
            Err(AmountError::Negative { value: -0.5 })
        );
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(matches!(
            sol_to_lamports(f64::NAN),
            Err(AmountError::NotFinite { .. })
        ));
        assert!(matches!(
            sol_to_lamports(f64::INFINITY),
            Err(AmountError::NotFinite { .. })
        ));
    }

    #[test]
    fn over_range_amount_is_rejected() {
        assert!(matches!(
            sol_to_lamports(2.0e10),
            Err(AmountError::ExceedsMax { .. })
        ));
    }

    #[test]
    fn lamports_to_sol_round_trips_display_values() {
        assert!((lamports_to_sol(500_000_000) - 0.5).abs() < f64::EPSILON);
    }
}
