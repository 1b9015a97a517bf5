use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{CHART_PALETTE, Color};

#[derive(Default)]
struct Assignments {
    colors: HashMap<String, Color>,
    next: usize,
}

/// Stable queue-to-color mapping.
///
/// Colors are handed out from the palette in first-sight order, wrapping
/// around once it is exhausted, and never change for the lifetime of the
/// registry. The assignment depends on call order: walk queues in a fixed
/// order (`StatsSummary::queue_order`) to get reproducible colors.
pub struct ColorRegistry {
    palette: Vec<Color>,
    assignments: Mutex<Assignments>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::with_palette(CHART_PALETTE.to_vec())
    }

    /// An empty palette falls back to the default one.
    pub fn with_palette(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            CHART_PALETTE.to_vec()
        } else {
            palette
        };
        Self {
            palette,
            assignments: Mutex::new(Assignments::default()),
        }
    }

    pub fn color_for(&self, queue: &str) -> Color {
        let mut assignments = self.lock();
        if let Some(color) = assignments.colors.get(queue) {
            return *color;
        }

        let color = self.palette[assignments.next % self.palette.len()];
        assignments.next += 1;
        assignments.colors.insert(queue.to_string(), color);
        tracing::trace!(queue, color = %color, "Assigned queue color");
        color
    }

    /// Colors for `queues`, assigning any unseen ones in slice order.
    pub fn colors_for(&self, queues: &[String]) -> Vec<(String, Color)> {
        queues
            .iter()
            .map(|queue| (queue.clone(), self.color_for(queue)))
            .collect()
    }

    pub fn assigned(&self) -> usize {
        self.lock().colors.len()
    }

    fn lock(&self) -> MutexGuard<'_, Assignments> {
        // The table is always left consistent, so a poisoned lock is still usable.
        self.assignments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
