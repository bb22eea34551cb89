//! Health records - allergies, conditions and weight history

/// One weight measurement
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    /// ISO date, e.g. "2025-09-01"
    pub date: String,
    /// Weight in kilograms
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(date: impl Into<String>, weight: f64) -> Self {
        Self {
            date: date.into(),
            weight,
        }
    }
}

/// Health information nested in a pet profile
///
/// `weight_history` is expected to be ordered by date ascending. Nothing in
/// this type enforces it; writers that care sort before persisting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthInfo {
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub weight_history: Vec<WeightEntry>,
}

impl HealthInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergies.push(allergy.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn with_weight(mut self, entry: WeightEntry) -> Self {
        self.weight_history.push(entry);
        self
    }

    /// Most recent measurement, assuming the history is in date order
    pub fn latest_weight(&self) -> Option<&WeightEntry> {
        self.weight_history.last()
    }

    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty() && self.conditions.is_empty() && self.weight_history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_weight() {
        let info = HealthInfo::new()
            .with_weight(WeightEntry::new("2025-01-01", 9.8))
            .with_weight(WeightEntry::new("2025-03-01", 10.4));

        assert_eq!(info.latest_weight().unwrap().weight, 10.4);
        assert!(HealthInfo::new().latest_weight().is_none());
    }

    #[test]
    fn test_is_empty() {
        assert!(HealthInfo::new().is_empty());
        assert!(!HealthInfo::new().with_allergy("Dust").is_empty());
    }
}
