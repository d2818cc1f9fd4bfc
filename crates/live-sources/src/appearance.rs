#![forbid(unsafe_code)]

//! Light/dark appearance cells.

use std::cell::Cell;
use std::rc::Rc;

use live_core::{EvaluationMode, Live, Rgba, pair_operands};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appearance {
    Light,
    Dark,
}

/// Host query for the current appearance.
///
/// `None` means the host cannot tell; cells read that as light.
pub trait AppearanceProvider {
    fn appearance(&self) -> Option<Appearance>;
}

/// A provider that never knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAppearance;

impl AppearanceProvider for NoAppearance {
    fn appearance(&self) -> Option<Appearance> {
        None
    }
}

/// A host-settable appearance. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct AppearanceState {
    current: Rc<Cell<Option<Appearance>>>,
}

impl AppearanceState {
    #[must_use]
    pub fn new(initial: Appearance) -> Self {
        Self {
            current: Rc::new(Cell::new(Some(initial))),
        }
    }

    pub fn set(&self, appearance: Option<Appearance>) {
        tracing::debug!(message = "live.appearance.set", appearance = ?appearance);
        self.current.set(appearance);
    }
}

impl AppearanceProvider for AppearanceState {
    fn appearance(&self) -> Option<Appearance> {
        self.current.get()
    }
}

/// `true` while the provider reports [`Appearance::Dark`].
pub fn dark_mode(mode: EvaluationMode, provider: Rc<dyn AppearanceProvider>) -> Live<bool> {
    Live::from_fn(mode, move || provider.appearance() == Some(Appearance::Dark))
}

/// `dark` while in dark mode, `light` otherwise.
pub fn appearance_color(
    mode: EvaluationMode,
    provider: Rc<dyn AppearanceProvider>,
    light: Rgba,
    dark: Rgba,
) -> Live<Rgba> {
    dark_mode(mode, provider).select(pair_operands(
        &Live::constant(mode, dark),
        &Live::constant(mode, light),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_provider() {
        let state = AppearanceState::new(Appearance::Light);
        let dark = dark_mode(EvaluationMode::Live, Rc::new(state.clone()));
        assert!(!dark.resolve());

        state.set(Some(Appearance::Dark));
        assert!(dark.resolve());
    }

    #[test]
    fn unknown_appearance_is_light() {
        assert!(!dark_mode(EvaluationMode::Live, Rc::new(NoAppearance)).resolve());

        let state = AppearanceState::new(Appearance::Dark);
        state.set(None);
        assert!(!dark_mode(EvaluationMode::Live, Rc::new(state)).resolve());
    }

    #[test]
    fn color_follows_appearance() {
        let state = AppearanceState::new(Appearance::Light);
        let bg = appearance_color(
            EvaluationMode::Live,
            Rc::new(state.clone()),
            Rgba::WHITE,
            Rgba::BLACK,
        );
        assert_eq!(bg.resolve(), Rgba::WHITE);
        state.set(Some(Appearance::Dark));
        assert_eq!(bg.resolve(), Rgba::BLACK);
    }

    #[test]
    fn frozen_appearance_is_a_snapshot() {
        let state = AppearanceState::new(Appearance::Dark);
        let dark = dark_mode(EvaluationMode::Frozen, Rc::new(state.clone()));
        state.set(Some(Appearance::Light));
        assert!(dark.resolve());
    }
}
