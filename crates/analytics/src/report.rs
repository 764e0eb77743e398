#![allow(clippy::format_push_string)]

use crate::error::StatsResult;
use crate::hypothesis::TestResult;
use crate::pipeline::Analysis;
use retvol_core::MetricsFormatter;

/// Renders the console report: both hypothesis tests, then the summary block.
///
/// Undefined statistics are written as `undefined (<reason>)`, never as NaN
/// or infinity.
#[must_use]
pub fn format_report(analysis: &Analysis) -> String {
    let mut output = String::new();

    match &analysis.normality {
        Ok(test) => {
            output.push_str(&format!(
                "Jarque–Bera: stat={}, p={}\n",
                MetricsFormatter::fixed(test.statistic, 3),
                MetricsFormatter::scientific(test.p_value, 3)
            ));
            if test.rejects_null(analysis.significance_level) {
                output.push_str("Reject normality → returns not normally distributed.\n");
            } else {
                output.push_str("Fail to reject normality.\n");
            }
        }
        Err(err) => output.push_str(&format!("Jarque–Bera: undefined ({err})\n")),
    }

    output.push_str(&format_t_test(&analysis.mean_test));

    let summary = &analysis.summary;
    output.push('\n');
    output.push_str(&format!("=== {} Summary Stats ===\n", analysis.asset));
    output.push_str(&format!(
        "Mean daily return: {}\n",
        MetricsFormatter::fixed(summary.mean, 6)
    ));
    output.push_str(&format!(
        "Median daily return: {}\n",
        MetricsFormatter::fixed(summary.median, 6)
    ));
    output.push_str(&format!(
        "Annualized volatility: {}\n",
        MetricsFormatter::fixed(summary.annualized_volatility, 6)
    ));
    output.push_str(&format!(
        "Annualized return (approx): {}\n",
        MetricsFormatter::fixed(summary.annualized_return, 6)
    ));
    match summary.sharpe_ratio() {
        Ok(sharpe) => output.push_str(&format!(
            "Sharpe ratio (daily): {}\n",
            MetricsFormatter::fixed(sharpe, 6)
        )),
        Err(err) => output.push_str(&format!("Sharpe ratio (daily): undefined ({err})\n")),
    }

    output
}

fn format_t_test(result: &StatsResult<TestResult>) -> String {
    match result {
        Ok(test) => format!(
            "One-sample t-test (mean=0): t={}, p={}\n",
            MetricsFormatter::fixed(test.statistic, 3),
            MetricsFormatter::scientific(test.p_value, 3)
        ),
        Err(err) => format!("One-sample t-test (mean=0): undefined ({err})\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::hypothesis::TestType;
    use crate::returns::ReturnSeries;
    use crate::summary::SummaryStatistics;
    use crate::volatility::VolatilitySeries;

    fn analysis(std_dev: f64) -> Analysis {
        Analysis {
            asset: "BTC".to_string(),
            significance_level: 0.05,
            returns: ReturnSeries::default(),
            volatility: VolatilitySeries::default(),
            summary: SummaryStatistics {
                observations: 100,
                mean: 0.0025,
                median: 0.0011,
                std_dev,
                annualized_volatility: std_dev * 365f64.sqrt(),
                annualized_return: 1.0025f64.powi(365) - 1.0,
                periods_per_year: 365,
            },
            moments: Err(StatsError::InsufficientData {
                statistic: "skewness/kurtosis",
                required: 2,
                actual: 0,
            }),
            normality: Ok(TestResult {
                test_type: TestType::JarqueBera,
                statistic: 12_345.678_9,
                p_value: 0.0,
                degrees_of_freedom: 2.0,
                sample_size: 100,
            }),
            mean_test: Ok(TestResult {
                test_type: TestType::TTest,
                statistic: 2.0,
                p_value: 0.046_08,
                degrees_of_freedom: 99.0,
                sample_size: 100,
            }),
            charts: Vec::new(),
        }
    }

    #[test]
    fn report_layout() {
        let report = format_report(&analysis(0.04));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Jarque–Bera: stat=12345.679, p=0.000e+00");
        assert_eq!(lines[1], "Reject normality → returns not normally distributed.");
        assert_eq!(lines[2], "One-sample t-test (mean=0): t=2.000, p=4.608e-02");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "=== BTC Summary Stats ===");
        assert_eq!(lines[5], "Mean daily return: 0.002500");
        assert_eq!(lines[6], "Median daily return: 0.001100");
        assert!(lines[7].starts_with("Annualized volatility: 0.764"));
        assert!(lines[8].starts_with("Annualized return (approx): "));
        assert_eq!(lines[9], "Sharpe ratio (daily): 0.062500");
    }

    #[test]
    fn fail_to_reject_line() {
        let mut a = analysis(0.04);
        if let Ok(test) = a.normality.as_mut() {
            test.p_value = 0.3;
        }
        let report = format_report(&a);
        assert!(report.contains("Fail to reject normality.\n"));
    }

    #[test]
    fn undefined_statistics_are_spelled_out() {
        let mut a = analysis(0.0);
        a.normality = Err(StatsError::DivisionByZero {
            statistic: "Jarque–Bera",
            std_dev: 0.0,
        });
        a.mean_test = Err(StatsError::DivisionByZero {
            statistic: "t-test",
            std_dev: 0.0,
        });
        let report = format_report(&a);

        assert!(report.contains("Jarque–Bera: undefined (Jarque–Bera is undefined: division by zero"));
        assert!(report.contains("One-sample t-test (mean=0): undefined ("));
        assert!(report.contains("Sharpe ratio (daily): undefined (Sharpe ratio is undefined: division by zero"));
        assert!(!report.contains("NaN"));
        assert!(!report.contains("inf"));
        assert!(!report.contains("normality."));
    }
}
