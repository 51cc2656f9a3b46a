use serde::{Deserialize, Serialize};

/// Interpretation of a cell's raw string value
///
/// Only text already in canonical number form is classified as `Numeric`,
/// so `from_raw(s).to_raw() == s` for every raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellContent {
    #[default]
    Empty,
    Literal(String),
    /// Formula text including the leading `=`
    Formula(String),
    Numeric(f64),
}

impl CellContent {
    /// Classify a raw value as the service returns it
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            return CellContent::Empty;
        }

        if raw.starts_with('=') {
            return CellContent::Formula(raw.to_string());
        }

        match raw.parse::<f64>() {
            // "007", "1.50" or "1e3" stay literal so saving them back is lossless
            Ok(n) if n.is_finite() && render_number(n) == raw => CellContent::Numeric(n),
            _ => CellContent::Literal(raw.to_string()),
        }
    }

    /// Render back to the raw string written to the service
    pub fn to_raw(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Literal(s) | CellContent::Formula(s) => s.clone(),
            CellContent::Numeric(n) => render_number(*n),
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellContent::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }

    /// Get the formula expression if this is a formula
    pub fn formula_expression(&self) -> Option<&str> {
        match self {
            CellContent::Formula(expression) => Some(expression),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for CellContent {
    fn from(raw: &str) -> Self {
        CellContent::from_raw(raw)
    }
}

impl From<f64> for CellContent {
    fn from(n: f64) -> Self {
        CellContent::Numeric(n)
    }
}
