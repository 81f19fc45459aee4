use crate::utils::errors::Result;

/// # Deterministic Model
/// A valuation that is a pure function of its case and assumptions.
/// Evaluating twice gives the same output; nothing is cached or mutated.
pub trait DeterministicModel {
    type Output;

    fn evaluate(&self) -> Result<Self::Output>;
}

/// # Monte Carlo Model
/// A model whose outcome depends on a run counter folded into its seed.
pub trait MonteCarloModel {
    type Outcome;

    fn simulate(&self, run: u64) -> Result<Self::Outcome>;

    /// Consecutive runs starting at `first_run`.
    fn simulate_runs(&self, first_run: u64, num_runs: usize) -> Result<Vec<Self::Outcome>> {
        (first_run..first_run + num_runs as u64)
            .map(|run| self.simulate(run))
            .collect::<Result<Vec<Self::Outcome>>>()
    }
}
