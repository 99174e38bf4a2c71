//! Annualized internal rate of return for irregularly dated cash flows.
//!
//! Newton's method on `f(r) = Σ vᵢ / (1 + r)^(dᵢ / 365)` where `dᵢ` is the
//! day offset from the first flow. A single start point can diverge or land
//! on a non-physical root, so the solver walks a fixed seed list: the caller's
//! guess, then `-1.00, -0.99, …, 0.99`. Cost is bounded by
//! `201 × MAX_ITERATIONS` evaluations.

use rollfolio_types::CashFlowEntry;

use crate::calendar::CalendarIndex;

/// Convergence threshold for both the step size and `|f(r)|`.
pub const MAX_EPSILON: f64 = 1e-10;
/// Newton steps attempted per seed.
pub const MAX_ITERATIONS: usize = 50;
/// Day-count basis.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Default first seed.
pub const DEFAULT_GUESS: f64 = 0.1;

/// Seeds in the order they are tried.
pub fn seeds(guess: f64) -> impl Iterator<Item = f64> {
    std::iter::once(guess).chain((-100i32..100).map(|k| f64::from(k) / 100.0))
}

struct Flows {
    first: f64,
    // (year fraction from the first flow, value)
    rest: Vec<(f64, f64)>,
}

impl Flows {
    fn value(&self, rate: f64) -> f64 {
        self.rest
            .iter()
            .fold(self.first, |acc, &(t, v)| acc + v / (rate + 1.0).powf(t))
    }

    fn derivative(&self, rate: f64) -> f64 {
        self.rest
            .iter()
            .fold(0.0, |acc, &(t, v)| acc - t * v / (rate + 1.0).powf(t + 1.0))
    }

    fn newton(&self, seed: f64) -> Option<f64> {
        let mut rate = seed;
        for _ in 0..MAX_ITERATIONS {
            let value = self.value(rate);
            let next = rate - value / self.derivative(rate);
            let step = (next - rate).abs();
            rate = next;
            if step <= MAX_EPSILON || value.abs() <= MAX_EPSILON {
                return (rate.is_finite() && value.is_finite()).then_some(rate);
            }
        }
        None
    }
}

/// Solve for the annualized rate of `flows`, trying `guess` first.
///
/// Returns `None` when the flows are not mixed-sign (no root exists) or when no
/// seed converges to a finite rate.
#[must_use]
pub fn calc_xirr(calendar: &CalendarIndex, flows: &[CashFlowEntry], guess: f64) -> Option<f64> {
    let has_positive = flows.iter().any(|e| e.value > 0.0);
    let has_negative = flows.iter().any(|e| e.value < 0.0);
    if !has_positive || !has_negative {
        return None;
    }

    let (head, tail) = flows.split_first()?;
    let prepared = Flows {
        first: head.value,
        rest: tail
            .iter()
            .map(|e| {
                #[allow(clippy::cast_precision_loss)]
                let days = calendar.day_diff(e.date, head.date) as f64;
                (days / DAYS_PER_YEAR, e.value)
            })
            .collect(),
    };

    let found = seeds(guess).find_map(|seed| prepared.newton(seed));
    if found.is_none() {
        #[cfg(feature = "tracing")]
        tracing::trace!(flows = flows.len(), "xirr did not converge for any seed");
    }
    found
}
