//! Numerical solution of the grossup equation.

use std::cell::RefCell;

use nalgebra::DVector;

use loancalc_math::solvers::{broyden, secant};

use crate::config::{GrossupConfig, Validate};
use crate::error::{LoanError, LoanResult};
use crate::grossup::functions::{AmortizationFunction, GrossupFunctions, PrincipalCharge, ReducedTax};
use crate::grossup::{Grossup, GrossupMethod};
use crate::types::{validate_daily_rate, validate_principal, ReturnDays};

/// Relative offset of the secant's second starting point.
const SECANT_OFFSET: f64 = 1e-2;

/// Solves for the gross principal that nets to `net_principal`.
///
/// The residue
///
/// ```text
/// Δ(S) = S - reduced_tax(A(S)) - complementary_tax(S) - service_fee(S) - net
/// ```
///
/// is driven to zero from `S = net`, with the method and tolerances of
/// `config`.
///
/// # Errors
///
/// - [`LoanError::Config`] when `config` fails validation.
/// - [`LoanError::InvalidInput`] for a non-positive net principal or a
///   negative daily rate.
/// - Any error the amortization function raises for a candidate principal.
/// - [`LoanError::ConvergenceFailed`] or [`LoanError::Numerical`] when the
///   root finder fails.
pub fn approximate_grossup<A, R, C, S>(
    net_principal: f64,
    daily_rate: f64,
    return_days: &ReturnDays,
    functions: &GrossupFunctions<A, R, C, S>,
    config: &GrossupConfig,
) -> LoanResult<Grossup>
where
    A: AmortizationFunction,
    R: ReducedTax,
    C: PrincipalCharge,
    S: PrincipalCharge,
{
    config.validate_or_error()?;
    validate_principal("net_principal", net_principal)?;
    validate_daily_rate(daily_rate)?;

    let days = return_days.as_slice();
    let failure: RefCell<Option<LoanError>> = RefCell::new(None);

    // NaN stops the root finder; the stored error is reported instead
    let residue = |principal: f64| -> f64 {
        match functions.net_of_charges(principal, daily_rate, days) {
            Ok(net) => {
                let delta = net - net_principal;
                log::trace!("grossup residue at {principal}: {delta:.3e}");
                delta
            }
            Err(err) => {
                failure.borrow_mut().get_or_insert(err);
                f64::NAN
            }
        }
    };

    log::debug!(
        "grossup of {net_principal} over {} payments using {}",
        days.len(),
        config.method
    );

    let solver = config.solver();
    let outcome = match config.method {
        GrossupMethod::Broyden => broyden(
            |s: &DVector<f64>| DVector::from_element(1, residue(s[0])),
            &DVector::from_element(1, net_principal),
            &solver,
        )
        .map(|result| (result.root[0], result.iterations, result.residual_norm)),
        GrossupMethod::Secant => secant(
            residue,
            net_principal,
            net_principal * (1.0 + SECANT_OFFSET),
            &solver,
        )
        .map(|result| (result.root, result.iterations, result.residual.abs())),
    };

    if let Some(err) = failure.into_inner() {
        return Err(err);
    }
    let (gross_principal, iterations, residual) = outcome?;

    log::debug!("grossup converged to {gross_principal} after {iterations} iterations");

    Ok(Grossup {
        net_principal,
        gross_principal,
        daily_rate,
        return_days: return_days.clone(),
        iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grossup::{CappedDailyTax, ProportionalCharge};
    use crate::schedule::AmortizationScheduleType;
    use approx::assert_relative_eq;

    fn days(values: &[u32]) -> ReturnDays {
        ReturnDays::try_from(values).unwrap()
    }

    #[test]
    fn test_constant_charges() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            |_: &[f64], _: &[u32]| 10.0,
            |_: f64| 10.0,
            |_: f64| 10.0,
        );

        for method in [GrossupMethod::Broyden, GrossupMethod::Secant] {
            let config = GrossupConfig::with_method(method);
            let grossup =
                approximate_grossup(100.0, 1.0, &days(&[1, 2]), &functions, &config).unwrap();

            assert_relative_eq!(grossup.gross_principal(), 130.0, epsilon = 1e-8);
            assert_relative_eq!(grossup.charges(), 30.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_solution_satisfies_equation() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ConstantAmortization,
            CappedDailyTax::new(0.0001, 0.015),
            ProportionalCharge::new(0.0038),
            ProportionalCharge::new(0.02),
        );
        let return_days = days(&[30, 60, 90, 120]);

        let grossup = approximate_grossup(
            5000.0,
            0.002,
            &return_days,
            &functions,
            &GrossupConfig::default(),
        )
        .unwrap();

        let net = functions
            .net_of_charges(grossup.gross_principal(), 0.002, return_days.as_slice())
            .unwrap();
        assert_relative_eq!(net, 5000.0, epsilon = 1e-8);
    }

    #[test]
    fn test_amortization_failure_aborts() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::RegressivePrice,
            |_: &[f64], _: &[u32]| 0.0,
            // the root lies at a negative principal
            |p: f64| 3.0 * p,
            |_: f64| 0.0,
        );

        let err = approximate_grossup(
            100.0,
            0.01,
            &days(&[30]),
            &functions,
            &GrossupConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, LoanError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            CappedDailyTax::new(0.0, 0.0),
            ProportionalCharge::new(0.0),
            ProportionalCharge::new(0.0),
        );
        let config = GrossupConfig::default();

        assert!(approximate_grossup(0.0, 0.01, &days(&[1]), &functions, &config).is_err());
        assert!(approximate_grossup(10.0, -0.01, &days(&[1]), &functions, &config).is_err());
    }

    #[test]
    fn test_no_charges_is_identity() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            CappedDailyTax::new(0.0, 0.0),
            ProportionalCharge::new(0.0),
            ProportionalCharge::new(0.0),
        );

        let grossup = approximate_grossup(
            250.0,
            0.01,
            &days(&[10, 20]),
            &functions,
            &GrossupConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(grossup.gross_principal(), 250.0, epsilon = 1e-12);
        assert_eq!(grossup.iterations(), 0);
    }

    #[test]
    fn test_gross_amount_does_not_depend_on_scale() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            |_: &[f64], _: &[u32]| 0.0,
            ProportionalCharge::new(0.03),
            ProportionalCharge::new(0.0),
        );

        for method in [GrossupMethod::Broyden, GrossupMethod::Secant] {
            let config = GrossupConfig::with_method(method);
            for net in [1e-9, 1.0, 100.0, 1e6] {
                let grossup =
                    approximate_grossup(net, 0.001, &days(&[30, 60]), &functions, &config).unwrap();

                assert!(grossup.iterations() > 0);
                assert_relative_eq!(grossup.gross_principal(), net / 0.97, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            |_: &[f64], _: &[u32]| 0.0,
            |p: f64| 0.001 * p * p,
            |_: f64| 0.0,
        );

        for method in [GrossupMethod::Broyden, GrossupMethod::Secant] {
            let config = GrossupConfig {
                max_iterations: 1,
                ..GrossupConfig::with_method(method)
            };

            let err =
                approximate_grossup(100.0, 0.01, &days(&[30]), &functions, &config).unwrap_err();

            assert!(
                matches!(err, LoanError::ConvergenceFailed { iterations: 1, .. }),
                "{method}: {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let functions = GrossupFunctions::new(
            AmortizationScheduleType::ProgressivePrice,
            CappedDailyTax::new(0.0, 0.0),
            ProportionalCharge::new(0.0),
            ProportionalCharge::new(0.0),
        );
        let config = GrossupConfig {
            tolerance: 0.0,
            ..GrossupConfig::default()
        };

        let err = approximate_grossup(100.0, 0.01, &days(&[30]), &functions, &config).unwrap_err();

        assert!(matches!(err, LoanError::Config { ref field, .. } if field == "tolerance"));
    }
}
