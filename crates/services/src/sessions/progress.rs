/// Aggregated view of session progress, useful for UI counters and bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position in the pool; 0 when no session is running.
    pub position: usize,
    pub total: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the pool walked so far, in `[0.0, 100.0]`.
    #[must_use]
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.position as f32 / self.total as f32) * 100.0
    }
}
