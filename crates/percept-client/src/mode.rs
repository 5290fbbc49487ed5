//! Prediction mode state.
//!
//! The client keeps a persistent base mode plus an optional transient
//! override. The override exists for exactly one call path (full-video
//! frame-stride download, which must force `online`) and is released
//! through [`OverrideGuard`]'s `Drop` impl, so it cannot leak past the
//! call that set it.

use std::sync::Mutex;

use percept_models::PredictionMode;

#[derive(Debug)]
pub(crate) struct ModeState {
    inner: Mutex<ModeInner>,
}

#[derive(Debug)]
struct ModeInner {
    base: PredictionMode,
    override_mode: Option<PredictionMode>,
}

impl ModeState {
    pub fn new(base: PredictionMode) -> Self {
        Self {
            inner: Mutex::new(ModeInner {
                base,
                override_mode: None,
            }),
        }
    }

    pub fn base(&self) -> PredictionMode {
        self.inner.lock().unwrap().base
    }

    pub fn set_base(&self, mode: PredictionMode) {
        self.inner.lock().unwrap().base = mode;
    }

    /// Override if set, otherwise the base mode.
    pub fn effective(&self) -> PredictionMode {
        let inner = self.inner.lock().unwrap();
        inner.override_mode.unwrap_or(inner.base)
    }

    /// Set a transient override, released when the returned guard drops.
    pub fn override_scope(&self, mode: PredictionMode) -> OverrideGuard<'_> {
        self.inner.lock().unwrap().override_mode = Some(mode);
        OverrideGuard { state: self }
    }
}

pub(crate) struct OverrideGuard<'a> {
    state: &'a ModeState,
}

impl Drop for OverrideGuard<'_> {
    fn drop(&mut self) {
        self.state.inner.lock().unwrap().override_mode = None;
    }
}
