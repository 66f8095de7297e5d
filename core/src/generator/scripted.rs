use alloc::vec::Vec;

use super::*;

/// Plays back a fixed list of colors, cycling when exhausted. Useful for deterministic sessions and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedColors {
    script: Vec<ColorIndex>,
    position: usize,
}

impl ScriptedColors {
    pub fn new(script: impl Into<Vec<ColorIndex>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self, color_count: usize) -> ColorIndex {
        let Some(&color) = self.script.get(self.position % self.script.len().max(1)) else {
            return 0;
        };
        self.position += 1;

        if usize::from(color) >= color_count {
            log::warn!("Scripted color {} outside palette of {}, wrapping", color, color_count);
            (usize::from(color) % color_count.max(1)) as ColorIndex
        } else {
            color
        }
    }
}
