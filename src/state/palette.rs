use super::random::RandomSource;
use crate::model::DEFAULT_PALETTE;

/// Cycles through a fixed palette, starting at a random offset.
/// Each coordinator owns its own cycle.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    palette: Vec<String>,
    cursor: usize,
}

impl ColorCycle {
    pub fn new(palette: Vec<String>, rng: &mut impl RandomSource) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        let cursor = rng.next_index(palette.len());
        Self { palette, cursor }
    }

    pub fn next_color(&mut self) -> String {
        let color = self.palette[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.palette.len();
        color
    }
}

impl Iterator for ColorCycle {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_color())
    }
}
