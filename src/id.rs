/// Monotonic ID generator shared by everything that needs a stable,
/// reproducible identifier (characters, conversations).
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Next id rendered as `<prefix><n>`, e.g. `dialogue-3` or `human_17`.
    pub fn next_tagged(&mut self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
