use super::PaneId;

/// Pane ids ordered from least to most recently activated. The last entry is
/// the front-most pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZOrderStack {
    order: Vec<PaneId>,
}

impl ZOrderStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from `(id, z_index)` pairs, back-most first. Ties keep the
    /// order they were given in.
    pub fn from_z_indices(mut entries: Vec<(PaneId, i64)>) -> Self {
        entries.sort_by_key(|(_, z)| *z);
        let mut stack = Self::new();
        for (id, _) in entries {
            stack.raise(id);
        }
        stack
    }

    pub fn as_slice(&self) -> &[PaneId] {
        &self.order
    }

    pub fn position(&self, id: &PaneId) -> Option<usize> {
        self.order.iter().position(|entry| entry == id)
    }

    /// Move `id` to the front, inserting it if missing.
    pub fn raise(&mut self, id: PaneId) {
        self.remove(&id);
        self.order.push(id);
    }

    pub fn remove(&mut self, id: &PaneId) -> bool {
        let before = self.order.len();
        self.order.retain(|entry| entry != id);
        self.order.len() != before
    }

    /// The most recent entry other than `leaving` that passes `eligible`.
    ///
    /// With `leaving` on top and every pane eligible this is the second-to-last
    /// entry, which is who takes over when the front pane goes away.
    pub fn fallback<F>(&self, leaving: &PaneId, mut eligible: F) -> Option<&PaneId>
    where
        F: FnMut(&PaneId) -> bool,
    {
        self.order
            .iter()
            .rev()
            .find(|entry| *entry != leaving && eligible(entry))
    }
}
