//! Training log entries

/// Progress on one training task
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingEntry {
    /// e.g. "Sit", "Stay"
    pub task: String,
    /// ISO date of the session
    pub date: String,
    /// Percentage in 0..=100
    pub progress: f64,
    pub notes: Option<String>,
}

impl TrainingEntry {
    pub fn new(task: impl Into<String>, date: impl Into<String>, progress: f64) -> Self {
        Self {
            task: task.into(),
            date: date.into(),
            progress,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_mastered(&self) -> bool {
        self.progress >= 100.0
    }
}
