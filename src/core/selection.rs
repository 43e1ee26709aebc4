use crate::domain::model::CatalogEntry;

/// What the user has picked so far. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    model: String,
    score: f64,
    price: f64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_model(&mut self, model: &str, score: f64) {
        self.model = model.to_string();
        self.score = score;
    }

    pub fn select_entry(&mut self, entry: &CatalogEntry) {
        self.select_model(&entry.model, entry.score);
    }

    /// Stores the parsed price, or NaN when `raw` is not a decimal number.
    pub fn set_price(&mut self, raw: &str) {
        self.price = parse_price(raw);
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Accepts an optional leading currency sign and surrounding whitespace.
pub fn parse_price(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    digits.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_empty() {
        let selection = SelectionState::new();
        assert_eq!(selection.model(), "");
        assert_eq!(selection.score(), 0.0);
        assert_eq!(selection.price(), 0.0);
    }

    #[test]
    fn test_select_model_overwrites() {
        let mut selection = SelectionState::new();
        selection.select_model("RTX 3060", 100.0);
        selection.select_model("RX 6600", 91.6);
        assert_eq!(selection.model(), "RX 6600");
        assert_eq!(selection.score(), 91.6);
    }

    #[test]
    fn test_set_price_parses_decimals() {
        let mut selection = SelectionState::new();
        selection.set_price("150.00");
        assert_eq!(selection.price(), 150.0);
        selection.set_price(" $ 99.5 ");
        assert_eq!(selection.price(), 99.5);
    }

    #[test]
    fn test_set_price_failure_is_nan() {
        let mut selection = SelectionState::new();
        selection.set_price("");
        assert!(selection.price().is_nan());
        selection.set_price("cheap");
        assert!(selection.price().is_nan());
    }

    #[test]
    fn test_set_price_does_not_clamp() {
        assert_eq!(parse_price("-20"), -20.0);
        assert_eq!(parse_price("0.001"), 0.001);
    }
}
