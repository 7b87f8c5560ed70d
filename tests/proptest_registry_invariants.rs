//! Property-based invariant tests for the pane registry.
//!
//! 1. Every committed pane stays inside the viewport and above the minimum size
//! 2. The stack and the registry always hold the same ids, without duplicates
//! 3. z-indices strictly increase along the stack
//! 4. The active pane, when set, exists
//! 5. Snapping a position aligned to a viewport or neighbour edge returns it unchanged
//! 6. Minimize round trips leave maximized state alone

use std::collections::BTreeSet;
use std::sync::Arc;

use pane_wm::geometry::snap;
use pane_wm::{
    FixedViewport, LayoutStrategy, PaneId, PaneRect, Position, Viewport, WindowRegistry, WmConfig,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Create(u8, Option<(i32, i32)>),
    Activate(u8),
    Move(u8, f64, f64),
    Resize(u8, i32, i32),
    Minimize(u8),
    Maximize(u8),
    Close(u8),
    Arrange(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 0u8..8;
    prop_oneof![
        (id.clone(), proptest::option::of((-2000i32..4000, -2000i32..4000)))
            .prop_map(|(i, p)| Op::Create(i, p)),
        id.clone().prop_map(Op::Activate),
        (id.clone(), -5000.0f64..5000.0, -5000.0f64..5000.0).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        (id.clone(), -100i32..3000, -100i32..3000).prop_map(|(i, w, h)| Op::Resize(i, w, h)),
        id.clone().prop_map(Op::Minimize),
        id.clone().prop_map(Op::Maximize),
        id.prop_map(Op::Close),
        (0usize..4).prop_map(Op::Arrange),
    ]
}

fn pane_id(i: u8) -> PaneId {
    PaneId::new(format!("conv-{i}"))
}

fn apply_ops(reg: &mut WindowRegistry, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Create(i, pos) => {
                reg.create_window(pane_id(*i), "t", pos.map(|(x, y)| Position::new(x, y)));
            }
            Op::Activate(i) => {
                reg.activate_window(&pane_id(*i));
            }
            Op::Move(i, x, y) => {
                reg.update_position(&pane_id(*i), *x, *y);
            }
            Op::Resize(i, w, h) => {
                reg.update_size(&pane_id(*i), *w, *h);
            }
            Op::Minimize(i) => {
                reg.toggle_minimize(&pane_id(*i));
            }
            Op::Maximize(i) => {
                reg.toggle_maximize(&pane_id(*i));
            }
            Op::Close(i) => {
                reg.close_window(&pane_id(*i));
            }
            Op::Arrange(k) => {
                reg.arrange(LayoutStrategy::ALL[*k]);
            }
        }
    }
}

fn registry(viewport: Viewport) -> WindowRegistry {
    WindowRegistry::new(WmConfig::default(), Arc::new(FixedViewport(viewport)))
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (800i32..2600, 600i32..1600).prop_map(|(w, h)| Viewport::new(w, h))
}

// ═══════════════════════════════════════════════════════════════════════
// 1–4. Structural invariants after arbitrary operation sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn panes_stay_bounded(
        viewport in viewport_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut reg = registry(viewport);
        apply_ops(&mut reg, &ops);
        for pane in reg.panes() {
            prop_assert!(pane.width >= 300 && pane.height >= 400);
            prop_assert!(pane.x >= 0 && pane.y >= 0);
            if pane.width <= viewport.width {
                prop_assert!(pane.x + pane.width <= viewport.width);
            }
            if pane.height <= viewport.height {
                prop_assert!(pane.y + pane.height <= viewport.height);
            }
        }
    }

    #[test]
    fn stack_matches_registry(
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut reg = registry(Viewport::new(1600, 1000));
        apply_ops(&mut reg, &ops);
        let in_stack: BTreeSet<&PaneId> = reg.z_order().iter().collect();
        let in_registry: BTreeSet<&PaneId> = reg.panes().into_iter().map(|p| &p.id).collect();
        prop_assert_eq!(in_stack.len(), reg.z_order().len());
        prop_assert_eq!(in_stack, in_registry);
    }

    #[test]
    fn z_indices_increase_along_stack(
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut reg = registry(Viewport::new(1600, 1000));
        apply_ops(&mut reg, &ops);
        let zs: Vec<i64> = reg.z_order().iter().filter_map(|id| reg.z_index(id)).collect();
        prop_assert!(zs.windows(2).all(|w| w[0] < w[1]), "z-indices {:?}", zs);
        prop_assert!(zs.iter().all(|z| *z > 1000));
    }

    #[test]
    fn active_pane_exists(
        ops in proptest::collection::vec(op_strategy(), 1..80),
    ) {
        let mut reg = registry(Viewport::new(1600, 1000));
        apply_ops(&mut reg, &ops);
        if let Some(active) = reg.active_window_id() {
            prop_assert!(reg.contains(active));
        }
    }

    #[test]
    fn recreate_never_moves_a_pane(
        ops in proptest::collection::vec(op_strategy(), 1..40),
        i in 0u8..8,
        x in -500i32..3000,
        y in -500i32..3000,
    ) {
        let mut reg = registry(Viewport::new(1600, 1000));
        apply_ops(&mut reg, &ops);
        let id = pane_id(i);
        let before = reg.pane(&id).map(|p| p.rect());
        reg.create_window(id.clone(), "again", Some(Position::new(x, y)));
        if let Some(before) = before {
            prop_assert_eq!(reg.pane(&id).map(|p| p.rect()), Some(before));
        }
        prop_assert_eq!(reg.active_window_id(), Some(&id));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Snap idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snapping_is_idempotent(
        x in -100.0f64..1100.0,
        y in -100.0f64..900.0,
        ox in 0i32..800,
        oy in 0i32..600,
    ) {
        let viewport = Viewport::new(1000, 800);
        let others = [PaneRect::new(ox, oy, 300, 400)];
        let once = snap(x, y, 400.0, 400.0, others, viewport, 15.0);
        let twice = snap(once.0, once.1, 400.0, 400.0, others, viewport, 15.0);
        let thrice = snap(twice.0, twice.1, 400.0, 400.0, others, viewport, 15.0);
        // a snapped position may be pulled once more by a different edge, but
        // never keeps moving
        prop_assert_eq!(twice, thrice);
    }

    #[test]
    fn neighbour_aligned_positions_are_fixed_points(
        ox in 0i32..600,
        oy in 0i32..400,
    ) {
        let viewport = Viewport::new(1000, 800);
        let others = [PaneRect::new(ox, oy, 300, 400)];
        let (left, top) = (f64::from(ox), f64::from(oy));
        // flush against the neighbour's right and bottom edges
        let beside = (left + 300.0, top + 400.0);
        prop_assert_eq!(snap(beside.0, beside.1, 400.0, 400.0, others, viewport, 15.0), beside);
        // our right edge on the neighbour's left edge
        let before = (left - 400.0, top + 400.0);
        prop_assert_eq!(snap(before.0, before.1, 400.0, 400.0, others, viewport, 15.0), before);
    }

    #[test]
    fn aligned_viewport_edges_are_fixed_points(
        corner in 0usize..4,
        w in 300.0f64..500.0,
        h in 400.0f64..500.0,
    ) {
        let viewport = Viewport::new(1000, 800);
        let x = if corner % 2 == 0 { 0.0 } else { 1000.0 - w };
        let y = if corner < 2 { 0.0 } else { 800.0 - h };
        prop_assert_eq!(snap(x, y, w, h, [], viewport, 15.0), (x, y));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Minimize round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn minimize_round_trip_preserves_maximized(
        ops in proptest::collection::vec(op_strategy(), 1..40),
        i in 0u8..8,
    ) {
        let mut reg = registry(Viewport::new(1600, 1000));
        apply_ops(&mut reg, &ops);
        let id = pane_id(i);
        if let Some(before) = reg.pane(&id).cloned() {
            reg.toggle_minimize(&id);
            reg.toggle_minimize(&id);
            let after = reg.pane(&id).unwrap();
            prop_assert_eq!(after.is_maximized, before.is_maximized);
            prop_assert_eq!(after.is_minimized, before.is_minimized);
            prop_assert_eq!(after.rect(), before.rect());
        }
    }
}
