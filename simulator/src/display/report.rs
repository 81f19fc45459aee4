//! Plain-text views of cases and engine outputs.

use finatlas::prelude::*;

use super::format::{fmt, pct, NumberFormat};
use crate::sweep::SweepSummary;

fn gate(ok: bool, pass: &str, fail: &str) -> String {
    if ok {
        format!("[{} ✓]", pass)
    } else {
        format!("[{}]", fail)
    }
}

pub fn dcf_case(case: &DcfCase, format: &NumberFormat) -> String {
    [
        format!("DCF - {}", case.company),
        format!(
            "Last Rev: {}m · EBIT margin {} · WACC {} · g {} · Net debt {}m · Shares {}m",
            format.currency(case.revenue, 0),
            pct(case.ebit_margin),
            pct(case.wacc),
            pct(case.terminal_growth),
            format.currency(case.net_debt, 0),
            fmt(case.shares, 0)
        ),
    ]
    .join("\n")
}

pub fn dcf_solution(valuation: &DcfValuation, format: &NumberFormat) -> String {
    let fcf = valuation
        .projections
        .iter()
        .map(|p| format!("{}m", format.currency(p.fcf, 0)))
        .collect::<Vec<String>>()
        .join(", ");
    [
        format!("FCF Y1-Y5: {}", fcf),
        format!(
            "TV: {}m · EV: {}m · Equity: {}m",
            format.currency(valuation.terminal_value, 0),
            format.currency(valuation.enterprise_value, 0),
            format.currency(valuation.equity_value, 0)
        ),
        format!("Per share: {}", format.currency(valuation.per_share, 2)),
    ]
    .join("\n")
}

/// Per-share grid with discount rates down the side and terminal growth
/// across the top. Non-convergent cells print as `n/a`.
pub fn dcf_sensitivity(
    waccs: &[f64],
    growths: &[f64],
    grid: &[Vec<Option<f64>>],
    format: &NumberFormat,
) -> String {
    let mut lines = Vec::with_capacity(waccs.len() + 1);
    let header = growths
        .iter()
        .map(|g| format!("{:>10}", pct(*g)))
        .collect::<String>();
    lines.push(format!("{:>8}{}", "WACC\\g", header));
    for (wacc, row) in waccs.iter().zip(grid) {
        let cells = row
            .iter()
            .map(|cell| match cell {
                Some(value) => format!("{:>10}", format.currency(*value, 2)),
                None => format!("{:>10}", "n/a"),
            })
            .collect::<String>();
        lines.push(format!("{:>8}{}", pct(*wacc), cells));
    }
    lines.join("\n")
}

pub fn lbo(case: &LboCase, returns: &LboReturns, format: &NumberFormat) -> String {
    let mut lines = vec![
        format!("LBO - {}", case.company),
        format!(
            "Entry EV: {}m · Debt: {}m · Equity: {}m",
            format.currency(returns.entry_ev, 0),
            format.currency(returns.entry_debt, 0),
            format.currency(returns.entry_equity, 0)
        ),
        format!(
            "Exit EV: {}m · Equity Exit: {}m",
            format.currency(returns.exit_ev, 0),
            format.currency(returns.exit_equity, 0)
        ),
        format!("MOIC: {:.2} · IRR: {}", returns.moic, pct(returns.irr)),
    ];
    for row in &returns.schedule {
        lines.push(format!(
            "  Y{}: EBITDA {}m · FCF {}m · Debt End {}m",
            row.year,
            format.currency(row.ebitda, 0),
            format.currency(row.fcf, 0),
            format.currency(row.closing_debt, 0)
        ));
    }
    lines.join("\n")
}

pub fn merger(case: &MergerCase, outcome: &MergerOutcome, format: &NumberFormat) -> String {
    [
        "M&A - EPS Accretion/Dilution".to_string(),
        format!(
            "Acquirer: {} · Target: {} · Offer P/E: {:.1}x · Equity Value: {}m",
            case.acquirer,
            case.target,
            case.offer_pe,
            format.currency(outcome.equity_value, 0)
        ),
        format!(
            "Stock {} · Debt {} · Cash {} · Synergies {}m",
            pct(outcome.mix.stock),
            pct(outcome.mix.debt),
            pct(outcome.mix.cash),
            format.currency(outcome.synergy, 0)
        ),
        format!(
            "Pro EPS: {} · Accretion: {:.2}%",
            format.currency(outcome.pro_forma_eps, 2),
            outcome.accretion * 100.0
        ),
        format!(
            "{} [Breakeven synergy ≈ {}m]",
            gate(
                outcome.verdict == DealVerdict::Accretive,
                "Accretive",
                "Dilutive"
            ),
            format.currency(outcome.breakeven_synergy, 0)
        ),
    ]
    .join("\n")
}

pub fn portfolio(universe: &HedgeFundUniverse, risk: &PortfolioRisk, limits: &RiskLimits) -> String {
    let mut lines = vec!["Hedge Fund - Long/Short Sandbox".to_string()];
    for (instrument, weight) in universe.instruments().iter().zip(&risk.weights) {
        lines.push(format!(
            "  {:<6} μ {:>6}  σ {:>6}  {:>5}%",
            instrument.ticker,
            pct(instrument.mu),
            pct(instrument.sigma),
            fmt(*weight, 0)
        ));
    }
    lines.push(format!(
        "Gross: {:.0}% · Net: {:.0}% · Exp. Return: {:.2}% · Exp. Vol: {:.2}% · Sharpe: {:.2}",
        risk.gross,
        risk.net,
        risk.expected_return * 100.0,
        risk.volatility * 100.0,
        risk.sharpe
    ));
    lines.push(
        [
            gate(
                risk.gates.gross_ok,
                "Gross",
                &format!("Gross > {:.0}%", limits.max_gross),
            ),
            gate(risk.gates.net_ok, "Net", "Net out of range"),
            gate(
                risk.gates.sharpe_ok,
                "Sharpe",
                &format!("Sharpe < {}", limits.min_sharpe),
            ),
        ]
        .join(" "),
    );
    lines.join("\n")
}

pub fn venture(outcome: &FundOutcome, format: &NumberFormat) -> String {
    let multiples = outcome
        .multiples
        .iter()
        .map(|m| format!("{:.1}×", m))
        .collect::<Vec<String>>()
        .join(" ");
    [
        format!("VC - Power-Law Fund (run {})", outcome.run),
        format!(
            "Invested: {}m · Returned: {}m",
            format.currency(outcome.invested_total, 0),
            format.currency(outcome.returned_total, 0)
        ),
        format!(
            "TVPI: {:.2}× · IRR(≈10y): {}",
            outcome.tvpi,
            pct(outcome.irr)
        ),
        format!(
            "#≥10×: {} · Top outcome: {:.1}×",
            outcome.hits_10x, outcome.top_multiple
        ),
        format!(
            "{} {}",
            gate(outcome.gates.tvpi_ok, "TVPI", "TVPI < 3×"),
            gate(outcome.gates.irr_ok, "IRR", "IRR < 25%")
        ),
        format!("Outcome multiples: {}", multiples),
    ]
    .join("\n")
}

pub fn sweep(summary: &SweepSummary) -> String {
    [
        format!("VC sweep over {} runs", summary.runs),
        format!(
            "TVPI mean {:.2}× · sd {:.2} · median {:.2}× · p10 {:.2}× · p90 {:.2}×",
            summary.tvpi_mean,
            summary.tvpi_std_dev,
            summary.tvpi_median,
            summary.tvpi_p10,
            summary.tvpi_p90
        ),
        format!(
            "TVPI range {:.2}× - {:.2}× · IRR mean {}",
            summary.tvpi_min,
            summary.tvpi_max,
            pct(summary.irr_mean)
        ),
        format!(
            "TVPI ≥ 3× in {} of runs · IRR ≥ 25% in {} of runs",
            pct(summary.tvpi_pass_rate),
            pct(summary.irr_pass_rate)
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dcf_views() {
        let case = DcfCase::generate("1001");
        let valuation = DcfModel::new(&case).evaluate().unwrap();
        let format = NumberFormat::default();
        let header = dcf_case(&case, &format);
        assert!(header.starts_with(&format!("DCF - {}", case.company)));
        assert!(header.contains(&format!("WACC {}", pct(case.wacc))));
        let solution = dcf_solution(&valuation, &format);
        assert!(solution.contains(&format!("Per share: £{:.2}", valuation.per_share)));
        assert_eq!(solution.lines().count(), 3);
    }

    #[test]
    fn test_sensitivity_marks_degenerate_cells() {
        let case = DcfCase::generate("grid");
        let waccs = [0.02, 0.09];
        let growths = [0.03];
        let grid = DcfModel::new(&case).sensitivity(&waccs, &growths);
        let table = dcf_sensitivity(&waccs, &growths, &grid, &NumberFormat::default());
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].contains("n/a"));
        assert!(!rows[2].contains("n/a"));
    }

    #[test]
    fn test_lbo_view_lists_schedule() {
        let case = LboCase::generate("1001");
        let returns = LboModel::new(&case).evaluate().unwrap();
        let view = lbo(&case, &returns, &NumberFormat::default());
        assert!(view.contains("  Y5: EBITDA"));
        assert!(view.contains(&format!("MOIC: {:.2}", returns.moic)));
    }

    #[test]
    fn test_gates_render() {
        let universe = HedgeFundUniverse::generate("1001");
        let risk = PortfolioModel::new(&universe).evaluate().unwrap();
        let view = portfolio(&universe, &risk, &RiskLimits::default());
        assert!(view.contains("[Gross ✓]"));
        assert!(view.contains("[Net ✓]"));
        assert!(view.contains("[Sharpe < 0.8]"));
        assert!(view.contains("ALFA"));
    }

    #[test]
    fn test_venture_view() {
        let model = VentureModel::new("1001", VentureParameters::default()).unwrap();
        let outcome = model.simulate(0).unwrap();
        let view = venture(&outcome, &NumberFormat::default());
        assert!(view.contains(&format!("TVPI: {:.2}×", outcome.tvpi)));
        assert_eq!(
            view.lines().last().unwrap().matches('×').count(),
            outcome.multiples.len()
        );
    }
}
