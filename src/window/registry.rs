use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use super::{Pane, PaneId, WindowEvent, ZOrderStack, now_millis};
use crate::config::WmConfig;
use crate::error::PersistError;
use crate::geometry::{PaneRect, Position, Size, Viewport, clamp_to_viewport, snap, to_grid};
use crate::layout::{self, LayoutStrategy, usable_area};
use crate::persistence::{LayoutSnapshot, PersistedPane, PersistenceAdapter};
use crate::viewport::ViewportProvider;

/// Owner of every pane record, the z-order stack and the active pane.
///
/// All mutations are synchronous and fail soft: an unknown id is logged and
/// ignored, never reported as an error. Each committed mutation restarts the
/// persistence debounce; the host drives the actual write with
/// [`tick`](Self::tick).
pub struct WindowRegistry {
    config: WmConfig,
    viewport: Arc<dyn ViewportProvider>,
    panes: BTreeMap<PaneId, Pane>,
    z_order: ZOrderStack,
    active: Option<PaneId>,
    // last z-index handed out; only ever grows
    z_counter: i64,
    next_seq: usize,
    // drained by the host via `take_events`
    events: Vec<WindowEvent>,
    persistence: Option<PersistenceAdapter>,
}

impl std::fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("panes", &self.panes.len())
            .field("z_order", &self.z_order)
            .field("active", &self.active)
            .field("z_counter", &self.z_counter)
            .finish_non_exhaustive()
    }
}

impl WindowRegistry {
    pub fn new(config: WmConfig, viewport: Arc<dyn ViewportProvider>) -> Self {
        let z_counter = config.z_index_floor;
        Self {
            config,
            viewport,
            panes: BTreeMap::new(),
            z_order: ZOrderStack::new(),
            active: None,
            z_counter,
            next_seq: 0,
            events: Vec::new(),
            persistence: None,
        }
    }

    /// Build a registry backed by `adapter`, restoring whatever layout it holds.
    /// A missing or corrupt snapshot starts empty.
    pub fn with_persistence(
        config: WmConfig,
        viewport: Arc<dyn ViewportProvider>,
        adapter: PersistenceAdapter,
    ) -> Self {
        let mut registry = Self::new(config, viewport);
        if let Some(snapshot) = adapter.load() {
            registry.restore(snapshot);
        }
        registry.persistence = Some(adapter);
        registry
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Current viewport, read fresh from the provider.
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Open a pane, or bring an existing one to the front without touching its
    /// geometry.
    pub fn create_window(
        &mut self,
        id: impl Into<PaneId>,
        title: impl Into<String>,
        position: Option<Position>,
    ) -> PaneId {
        let id = id.into();
        if self.panes.contains_key(&id) {
            self.activate_window(&id);
            return id;
        }
        let viewport = self.viewport();
        let size = self.config.default_size().at_least(self.config.min_size());
        let origin = position.unwrap_or_else(|| {
            Position::new(
                (viewport.width - size.width) / 2,
                self.config.default_top_offset,
            )
        });
        let origin = clamp_to_viewport(origin.x, origin.y, size.width, size.height, viewport);
        let seq = self.next_seq;
        self.next_seq += 1;
        let pane = Pane {
            id: id.clone(),
            title: title.into(),
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            is_maximized: false,
            is_minimized: false,
            z_index: 0,
            created_at: now_millis(),
            creation_order: seq,
        };
        tracing::debug!(pane_id = %id, seq, x = origin.x, y = origin.y, "opened pane");
        self.panes.insert(id.clone(), pane);
        self.events.push(WindowEvent::Created(id.clone()));
        self.raise(&id);
        self.schedule_save();
        id
    }

    /// Bring a pane to the front and make it active.
    pub fn activate_window(&mut self, id: &PaneId) -> bool {
        if !self.panes.contains_key(id) {
            tracing::warn!(pane_id = %id, "activate: unknown pane");
            return false;
        }
        self.raise(id);
        self.schedule_save();
        true
    }

    /// Move a pane. The candidate is snapped, then clamped to the viewport; the
    /// position actually stored is returned. Leaves maximized state.
    pub fn update_position(&mut self, id: &PaneId, x: f64, y: f64) -> Option<Position> {
        let Some(pane) = self.panes.get(id) else {
            tracing::warn!(pane_id = %id, "move: unknown pane");
            return None;
        };
        let size = pane.size();
        let current = pane.position();
        let viewport = self.viewport();
        let (snapped_x, snapped_y) = snap(
            x,
            y,
            f64::from(size.width),
            f64::from(size.height),
            self.snap_targets(id),
            viewport,
            f64::from(self.config.snap_distance),
        );
        if !(snapped_x.is_finite() && snapped_y.is_finite()) {
            tracing::warn!(pane_id = %id, x, y, "move: ignoring non-finite position");
            return Some(current);
        }
        let position = clamp_to_viewport(
            to_grid(snapped_x),
            to_grid(snapped_y),
            size.width,
            size.height,
            viewport,
        );
        self.commit_rect(id, PaneRect::from_parts(position, size));
        Some(position)
    }

    /// Resize a pane, raising each dimension to the configured minimum. The
    /// origin is re-clamped for the new size. Leaves maximized state.
    pub fn update_size(&mut self, id: &PaneId, width: i32, height: i32) -> Option<Size> {
        let Some(pane) = self.panes.get(id) else {
            tracing::warn!(pane_id = %id, "resize: unknown pane");
            return None;
        };
        let origin = pane.position();
        let size = Size::new(width, height).at_least(self.config.min_size());
        let viewport = self.viewport();
        let position = clamp_to_viewport(origin.x, origin.y, size.width, size.height, viewport);
        self.commit_rect(id, PaneRect::from_parts(position, size));
        Some(size)
    }

    /// Commit a whole rectangle through the minimum-size and viewport clamps,
    /// without snapping. Layouts and edge resizes use this path.
    pub fn set_bounds(&mut self, id: &PaneId, rect: PaneRect) -> Option<PaneRect> {
        if !self.panes.contains_key(id) {
            tracing::warn!(pane_id = %id, "set_bounds: unknown pane");
            return None;
        }
        let viewport = self.viewport();
        Some(self.bounded_commit(id, rect, viewport))
    }

    /// Flip maximized state. Always restores a minimized pane and brings it to
    /// the front.
    pub fn toggle_maximize(&mut self, id: &PaneId) -> Option<bool> {
        let Some(pane) = self.panes.get_mut(id) else {
            tracing::warn!(pane_id = %id, "maximize: unknown pane");
            return None;
        };
        pane.is_maximized = !pane.is_maximized;
        let maximized = pane.is_maximized;
        let was_minimized = std::mem::replace(&mut pane.is_minimized, false);
        tracing::debug!(pane_id = %id, maximized, "toggled maximize");
        if was_minimized {
            self.events.push(WindowEvent::MinimizeToggled {
                id: id.clone(),
                minimized: false,
            });
        }
        self.events.push(WindowEvent::MaximizeToggled {
            id: id.clone(),
            maximized,
        });
        self.raise(id);
        self.schedule_save();
        Some(maximized)
    }

    /// Flip minimized state only; maximized state survives a minimize/restore
    /// round trip. Minimizing the active pane hands activation to the most
    /// recently used pane that is still visible. Restoring a pane while nothing
    /// is active brings it to the front and activates it.
    pub fn toggle_minimize(&mut self, id: &PaneId) -> Option<bool> {
        let Some(pane) = self.panes.get_mut(id) else {
            tracing::warn!(pane_id = %id, "minimize: unknown pane");
            return None;
        };
        pane.is_minimized = !pane.is_minimized;
        let minimized = pane.is_minimized;
        tracing::debug!(pane_id = %id, minimized, "toggled minimize");
        self.events.push(WindowEvent::MinimizeToggled {
            id: id.clone(),
            minimized,
        });
        if minimized && self.active.as_ref() == Some(id) {
            self.promote_fallback(id);
        } else if !minimized && self.active.is_none() {
            self.raise(id);
        }
        self.schedule_save();
        Some(minimized)
    }

    /// Remove a pane. Closing the active pane hands activation to the most
    /// recently used visible pane.
    pub fn close_window(&mut self, id: &PaneId) -> bool {
        if self.panes.remove(id).is_none() {
            tracing::warn!(pane_id = %id, "close: unknown pane");
            return false;
        }
        tracing::debug!(pane_id = %id, "closing pane");
        if self.active.as_ref() == Some(id) {
            self.promote_fallback(id);
        }
        self.z_order.remove(id);
        self.events.push(WindowEvent::Closed(id.clone()));
        self.schedule_save();
        true
    }

    pub fn set_title(&mut self, id: &PaneId, title: impl Into<String>) -> bool {
        let Some(pane) = self.panes.get_mut(id) else {
            tracing::warn!(pane_id = %id, "set_title: unknown pane");
            return false;
        };
        pane.title = title.into();
        self.schedule_save();
        true
    }

    /// Close every pane.
    pub fn clear(&mut self) {
        let ids: Vec<PaneId> = self.iteration_order().map(|p| p.id.clone()).collect();
        for id in ids {
            self.close_window(&id);
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn pane(&self, id: &PaneId) -> Option<&Pane> {
        self.panes.get(id)
    }

    pub fn contains(&self, id: &PaneId) -> bool {
        self.panes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// All panes in iteration (insertion) order.
    pub fn panes(&self) -> Vec<&Pane> {
        self.iteration_order().collect()
    }

    pub fn visible_windows(&self) -> Vec<&Pane> {
        self.iteration_order().filter(|p| p.is_visible()).collect()
    }

    pub fn minimized_windows(&self) -> Vec<&Pane> {
        self.iteration_order().filter(|p| p.is_minimized).collect()
    }

    pub fn z_index(&self, id: &PaneId) -> Option<i64> {
        self.panes.get(id).map(|p| p.z_index)
    }

    pub fn active_window_id(&self) -> Option<&PaneId> {
        self.active.as_ref()
    }

    /// Back-most first; the last entry is the front-most pane.
    pub fn z_order(&self) -> &[PaneId] {
        self.z_order.as_slice()
    }

    /// Where a renderer should draw the pane. Maximized panes cover the area
    /// below the toolbar; their stored geometry is kept for restoring.
    pub fn effective_rect(&self, id: &PaneId) -> Option<PaneRect> {
        let pane = self.panes.get(id)?;
        if pane.is_maximized {
            Some(usable_area(self.viewport(), self.config.toolbar_offset))
        } else {
            Some(pane.rect())
        }
    }

    /// Snap a candidate origin for `id` without committing anything.
    pub fn snap_position(&self, id: &PaneId, x: f64, y: f64) -> Option<(f64, f64)> {
        let pane = self.panes.get(id)?;
        Some(snap(
            x,
            y,
            f64::from(pane.width),
            f64::from(pane.height),
            self.snap_targets(id),
            self.viewport(),
            f64::from(self.config.snap_distance),
        ))
    }

    // ---------------------------------------------------------------------
    // Layouts
    // ---------------------------------------------------------------------

    /// Apply a bulk layout to the visible panes. Returns how many were placed.
    pub fn arrange(&mut self, strategy: LayoutStrategy) -> usize {
        let viewport = self.viewport();
        let placements = {
            let visible = self.visible_windows();
            layout::plan(strategy, &visible, &self.z_order, viewport, &self.config)
        };
        for (id, rect) in &placements {
            self.bounded_commit(id, *rect, viewport);
        }
        tracing::debug!(strategy = strategy.label(), panes = placements.len(), "arranged panes");
        self.events.push(WindowEvent::Arranged(strategy));
        placements.len()
    }

    pub fn arrange_grid(&mut self) -> usize {
        self.arrange(LayoutStrategy::Grid)
    }

    pub fn tile_horizontal(&mut self) -> usize {
        self.arrange(LayoutStrategy::TileHorizontal)
    }

    pub fn tile_vertical(&mut self) -> usize {
        self.arrange(LayoutStrategy::TileVertical)
    }

    pub fn cascade(&mut self) -> usize {
        self.arrange(LayoutStrategy::Cascade)
    }

    // ---------------------------------------------------------------------
    // Events and persistence
    // ---------------------------------------------------------------------

    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::new(
            self.iteration_order().map(PersistedPane::from).collect(),
            self.active.clone(),
        )
    }

    /// Replace the registry contents with `snapshot`.
    ///
    /// Records are sanitized on the way in: duplicate ids are dropped (first
    /// wins), sizes are raised to the minimums and origins clamped to the
    /// current viewport. The stack is rebuilt from the stored z-indices and the
    /// counter continues above the largest one. An active id that does not
    /// resolve is replaced by the front-most visible pane.
    pub fn restore(&mut self, snapshot: LayoutSnapshot) {
        let viewport = self.viewport();
        let min = self.config.min_size();
        self.panes.clear();
        self.active = None;
        self.next_seq = 0;
        let mut max_z = self.z_counter.max(self.config.z_index_floor);
        let mut stacking = Vec::with_capacity(snapshot.panes.len());

        for record in snapshot.panes {
            if self.panes.contains_key(&record.id) {
                tracing::warn!(pane_id = %record.id, "restore: dropping duplicate pane record");
                continue;
            }
            let size = Size::new(record.width, record.height).at_least(min);
            let origin = clamp_to_viewport(record.x, record.y, size.width, size.height, viewport);
            max_z = max_z.max(record.z_index);
            stacking.push((record.id.clone(), record.z_index));
            let seq = self.next_seq;
            self.next_seq += 1;
            self.panes.insert(
                record.id.clone(),
                Pane {
                    id: record.id,
                    title: record.title,
                    x: origin.x,
                    y: origin.y,
                    width: size.width,
                    height: size.height,
                    is_maximized: record.is_maximized,
                    is_minimized: record.is_minimized,
                    z_index: record.z_index,
                    created_at: record.created_at,
                    creation_order: seq,
                },
            );
        }

        self.z_order = ZOrderStack::from_z_indices(stacking);
        self.z_counter = max_z;
        self.active = snapshot
            .active_window_id
            .filter(|id| self.panes.contains_key(id))
            .or_else(|| {
                self.z_order
                    .as_slice()
                    .iter()
                    .rev()
                    .find(|id| self.panes.get(*id).is_some_and(Pane::is_visible))
                    .cloned()
            });
        tracing::debug!(panes = self.panes.len(), active = ?self.active, z_counter = self.z_counter, "restored layout");
        self.events.push(WindowEvent::Restored {
            panes: self.panes.len(),
        });
    }

    /// Whether a debounced save is waiting to run.
    pub fn has_pending_save(&self) -> bool {
        self.persistence.as_ref().is_some_and(|p| p.is_pending())
    }

    /// Run the debounced save if its deadline has passed. Write failures are
    /// logged and retried one debounce window later. Returns true when a write
    /// succeeded.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.persistence.as_mut().is_some_and(|p| p.take_due(now));
        if !due {
            return false;
        }
        let snapshot = self.snapshot();
        let Some(adapter) = self.persistence.as_mut() else {
            return false;
        };
        match adapter.save(&snapshot) {
            Ok(()) => {
                tracing::debug!(panes = snapshot.panes.len(), "saved layout");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save layout; retrying");
                adapter.schedule(now);
                false
            }
        }
    }

    /// Write the current layout immediately, bypassing the debounce.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        let snapshot = self.snapshot();
        match self.persistence.as_mut() {
            Some(adapter) => adapter.save(&snapshot),
            None => Ok(()),
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn iteration_order(&self) -> impl Iterator<Item = &Pane> {
        let mut panes: Vec<&Pane> = self.panes.values().collect();
        panes.sort_by_key(|p| p.creation_order);
        panes.into_iter()
    }

    fn snap_targets(&self, id: &PaneId) -> Vec<PaneRect> {
        self.iteration_order()
            .filter(|p| p.is_visible() && &p.id != id)
            .map(Pane::rect)
            .collect()
    }

    fn next_z(&mut self) -> i64 {
        self.z_counter += 1;
        self.z_counter
    }

    /// Stamp a fresh z-index, move to the top of the stack and activate.
    fn raise(&mut self, id: &PaneId) {
        let z = self.next_z();
        if let Some(pane) = self.panes.get_mut(id) {
            pane.z_index = z;
        }
        self.z_order.raise(id.clone());
        self.events.push(WindowEvent::Activated(id.clone()));
        self.set_active(Some(id.clone()));
    }

    fn set_active(&mut self, next: Option<PaneId>) {
        if self.active == next {
            return;
        }
        self.active = next.clone();
        self.events.push(WindowEvent::ActiveChanged(next));
    }

    fn promote_fallback(&mut self, leaving: &PaneId) {
        let panes = &self.panes;
        let next = self
            .z_order
            .fallback(leaving, |candidate| {
                panes.get(candidate).is_some_and(Pane::is_visible)
            })
            .cloned();
        tracing::debug!(from = %leaving, to = ?next, "active pane fallback");
        self.set_active(next);
    }

    fn bounded_commit(&mut self, id: &PaneId, rect: PaneRect, viewport: Viewport) -> PaneRect {
        let size = rect.size().at_least(self.config.min_size());
        let origin = clamp_to_viewport(rect.x, rect.y, size.width, size.height, viewport);
        let committed = PaneRect::from_parts(origin, size);
        self.commit_rect(id, committed);
        committed
    }

    fn commit_rect(&mut self, id: &PaneId, rect: PaneRect) {
        let Some(pane) = self.panes.get_mut(id) else {
            return;
        };
        let changed = pane.rect() != rect;
        pane.x = rect.x;
        pane.y = rect.y;
        pane.width = rect.width;
        pane.height = rect.height;
        let was_maximized = std::mem::replace(&mut pane.is_maximized, false);
        if changed {
            self.events.push(WindowEvent::GeometryChanged {
                id: id.clone(),
                rect,
            });
        }
        if was_maximized {
            self.events.push(WindowEvent::MaximizeToggled {
                id: id.clone(),
                maximized: false,
            });
        }
        self.schedule_save();
    }

    fn schedule_save(&mut self) {
        if let Some(adapter) = self.persistence.as_mut() {
            adapter.schedule(Instant::now());
        }
    }
}
