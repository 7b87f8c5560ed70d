use std::sync::{Arc, RwLock};

use crate::geometry::Viewport;

/// Source of the current canvas size.
///
/// The registry asks for the viewport at the start of every geometry operation
/// and never caches the answer, so a resized canvas is picked up by the next
/// move, resize or layout call.
pub trait ViewportProvider: Send + Sync {
    fn viewport(&self) -> Viewport;
}

/// A viewport that never changes size.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub Viewport);

impl FixedViewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self(Viewport::new(width, height))
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.0
    }
}

/// A viewport handle the host updates when its canvas is resized. Clones share
/// the same size.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    inner: Arc<RwLock<Viewport>>,
}

impl SharedViewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Viewport::new(width, height))),
        }
    }

    pub fn set(&self, width: i32, height: i32) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Viewport::new(width, height);
    }
}

impl ViewportProvider for SharedViewport {
    fn viewport(&self) -> Viewport {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}
