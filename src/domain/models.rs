use super::errors::CalcError;
use super::evaluator::Operator;
use serde::Serialize;
use std::fmt;

/// A successfully evaluated attempt: both parsed operands, the operator and
/// the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equation {
    pub x: f64,
    pub operator: Operator,
    pub y: f64,
    pub value: f64,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            format_number(self.x),
            self.operator,
            format_number(self.y),
            format_number(self.value)
        )
    }
}

/// How an attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok(Equation),
    Error(CalcError),
}

impl Outcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Ok(equation) => Some(equation.value),
            Outcome::Error(_) => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}

/// One full pass through the three prompts.
///
/// Operand and operator text are kept exactly as typed so the history shows
/// what the user entered, even when it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub first: String,
    pub operator: String,
    pub second: String,
    pub outcome: Outcome,
}

impl Attempt {
    /// Text for the history table's result cell.
    pub fn result_text(&self) -> String {
        match &self.outcome {
            Outcome::Ok(equation) => format_number(equation.value),
            Outcome::Error(err) => format!("Error: {err}"),
        }
    }

    /// Message shown to the user once the attempt has been recorded.
    pub fn notification(&self) -> String {
        match &self.outcome {
            Outcome::Ok(equation) => equation.to_string(),
            Outcome::Error(_) => self.result_text(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Flattened view used by the renderers and report writers.
    pub fn to_row(&self) -> HistoryRow {
        HistoryRow {
            number_1: self.first.clone(),
            operator: self.operator.clone(),
            number_2: self.second.clone(),
            result: self.result_text(),
            status: if self.is_ok() { RowStatus::Ok } else { RowStatus::Error },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Ok,
    Error,
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    #[serde(rename = "Number 1")]
    pub number_1: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Number 2")]
    pub number_2: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Status")]
    pub status: RowStatus,
}

impl HistoryRow {
    pub const HEADERS: [&'static str; 4] = ["Number 1", "Operator", "Number 2", "Result"];

    pub fn cells(&self) -> [&str; 4] {
        [&self.number_1, &self.operator, &self.number_2, &self.result]
    }
}

/// Aggregate statistics over the valid results of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryStats {
    NotApplicable,
    Computed {
        minimum: f64,
        maximum: f64,
        average: f64,
        total: f64,
    },
}

impl SummaryStats {
    pub const HEADERS: [&'static str; 4] = ["Minimum", "Maximum", "Average", "Total"];

    /// Computes the statistics, or `NotApplicable` for an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use tcalc::domain::SummaryStats;
    ///
    /// let stats = SummaryStats::from_results(&[4.0, 10.0, -2.0]);
    /// assert_eq!(stats.cells(), ["-2", "10", "4.00", "12"]);
    /// assert_eq!(SummaryStats::from_results(&[]).cells(), ["N/A", "N/A", "N/A", "N/A"]);
    /// ```
    pub fn from_results(results: &[f64]) -> Self {
        let Some((&first, rest)) = results.split_first() else {
            return SummaryStats::NotApplicable;
        };

        let mut minimum = first;
        let mut maximum = first;
        let mut total = first;
        for &value in rest {
            total += value;
            if value < minimum {
                minimum = value;
            }
            if value > maximum {
                maximum = value;
            }
        }

        SummaryStats::Computed {
            minimum,
            maximum,
            average: total / results.len() as f64,
            total,
        }
    }

    /// The four summary cells in column order. The average always has two
    /// decimal places.
    pub fn cells(&self) -> [String; 4] {
        match *self {
            SummaryStats::NotApplicable => std::array::from_fn(|_| "N/A".to_string()),
            SummaryStats::Computed { minimum, maximum, average, total } => [
                format_number(minimum),
                format_number(maximum),
                format_fixed2(average),
                format_number(total),
            ],
        }
    }

    pub fn to_row(&self) -> SummaryRow {
        let [minimum, maximum, average, total] = self.cells();
        SummaryRow { minimum, maximum, average, total }
    }
}

/// The single row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Minimum")]
    pub minimum: String,
    #[serde(rename = "Maximum")]
    pub maximum: String,
    #[serde(rename = "Average")]
    pub average: String,
    #[serde(rename = "Total")]
    pub total: String,
}

/// Formats a number the way the history and summary tables show it.
///
/// Integral values have no fractional part, negative zero shows as `0`, and
/// very large or very small magnitudes switch to exponent notation with an
/// explicit sign on the exponent (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

/// Formats a number with exactly two decimal places for the Average cell.
///
/// Halfway cases round away from zero, decided on the exact binary value, and
/// negative zero shows as `0.00`. Non-finite values and magnitudes of `1e21`
/// or more fall back to [`format_number`].
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }
    if value == 0.0 {
        return "0.00".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // Halfway values have at most three fractional digits, so 30 places shows
    // them exactly.
    let expanded = format!("{magnitude:.30}");
    let Some((whole, fraction)) = expanded.split_once('.') else {
        return format!("{sign}{magnitude:.2}");
    };
    let (kept, rest) = fraction.split_at(2);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{sign}{magnitude:.2}");
    }

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let digits = String::from_utf8_lossy(&digits);
    let (whole, kept) = digits.split_at(digits.len() - 2);
    format!("{sign}{whole}.{kept}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::OperandPosition;

    fn ok_attempt(first: &str, op: Operator, second: &str, x: f64, y: f64, value: f64) -> Attempt {
        Attempt {
            first: first.to_string(),
            operator: op.symbol().to_string(),
            second: second.to_string(),
            outcome: Outcome::Ok(Equation { x, operator: op, y, value }),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_summary_single_value() {
        let stats = SummaryStats::from_results(&[5.0]);
        assert_eq!(
            stats,
            SummaryStats::Computed { minimum: 5.0, maximum: 5.0, average: 5.0, total: 5.0 }
        );
        assert_eq!(stats.cells(), ["5", "5", "5.00", "5"]);
    }

    #[test]
    fn test_summary_multiple_values() {
        let stats = SummaryStats::from_results(&[4.0, 10.0, -2.0]);
        assert_eq!(stats.cells(), ["-2", "10", "4.00", "12"]);
    }

    #[test]
    fn test_summary_average_rounding() {
        let stats = SummaryStats::from_results(&[1.0, 2.0, 2.0]);
        assert_eq!(stats.cells()[2], "1.67");
    }

    #[test]
    fn test_summary_average_halfway_rounds_up() {
        let stats = SummaryStats::from_results(&[0.125]);
        assert_eq!(stats.cells(), ["0.125", "0.125", "0.13", "0.125"]);
        assert_eq!(format_fixed2(-0.125), "-0.13");
        assert_eq!(format_fixed2(9.995), "9.99");
        assert_eq!(format_fixed2(99.995), "100.00");
        assert_eq!(format_fixed2(99.875), "99.88");
        assert_eq!(format_fixed2(999.625), "999.63");
    }

    #[test]
    fn test_summary_average_negative_zero() {
        let stats = SummaryStats::from_results(&[-0.0]);
        assert_eq!(stats.cells(), ["0", "0", "0.00", "0"]);
        assert_eq!(format_fixed2(-0.001), "-0.00");
    }

    #[test]
    fn test_summary_average_non_finite() {
        let stats = SummaryStats::from_results(&[f64::INFINITY]);
        assert_eq!(stats.cells(), ["Infinity", "Infinity", "Infinity", "Infinity"]);
        assert_eq!(format_fixed2(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_fixed2(f64::NAN), "NaN");
        assert_eq!(format_fixed2(2e21), "2e+21");
    }

    #[test]
    fn test_summary_empty() {
        let stats = SummaryStats::from_results(&[]);
        assert_eq!(stats, SummaryStats::NotApplicable);
        let row = stats.to_row();
        assert_eq!(row.minimum, "N/A");
        assert_eq!(row.total, "N/A");
    }

    #[test]
    fn test_attempt_texts() {
        let attempt = ok_attempt("10", Operator::Divide, "2", 10.0, 2.0, 5.0);
        assert_eq!(attempt.result_text(), "5");
        assert_eq!(attempt.notification(), "10 / 2 = 5");
        assert_eq!(attempt.to_row().cells(), ["10", "/", "2", "5"]);
        assert_eq!(attempt.to_row().status, RowStatus::Ok);

        let failed = Attempt {
            first: "ten".to_string(),
            operator: "/".to_string(),
            second: "2".to_string(),
            outcome: Outcome::Error(CalcError::InvalidOperandFormat {
                position: OperandPosition::First,
            }),
        };
        assert_eq!(failed.result_text(), "Error: Value #1 (x) is not a valid number");
        assert_eq!(failed.notification(), failed.result_text());
        assert_eq!(failed.to_row().status, RowStatus::Error);
        assert_eq!(failed.outcome.value(), None);
    }
}
