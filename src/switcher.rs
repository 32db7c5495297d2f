use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::orbit::OrbitControls;
use crate::tween::{Easing, Tween};
use crate::views::{View, ViewCatalog};

/// Look-at target before any view has been applied
pub const INITIAL_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Timing of view transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSettings {
    pub duration: f32,
    pub easing: Easing,
    /// Fly-in to the first view after the model has loaded
    pub intro_duration: f32,
    pub intro_easing: Easing,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration: 2.0,
            easing: Easing::Power3InOut,
            intro_duration: 2.0,
            intro_easing: Easing::Power2InOut,
        }
    }
}

/// Animates the camera between catalog views.
///
/// Position and look-at target are driven by two independent tweens. A new switch
/// replaces both tweens, starting from wherever the camera currently is, so the last
/// request always wins. The active view changes as soon as it is requested.
#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    catalog: ViewCatalog,
    settings: TransitionSettings,
    current_view: usize,
    current_target: Vec3,
    position_tween: Option<Tween>,
    target_tween: Option<Tween>,
}

impl ViewSwitcher {
    pub fn new(catalog: ViewCatalog, settings: TransitionSettings) -> Self {
        Self {
            catalog,
            settings,
            current_view: 0,
            current_target: INITIAL_TARGET,
            position_tween: None,
            target_tween: None,
        }
    }

    pub fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &TransitionSettings {
        &self.settings
    }

    /// Index of the view marked active in the UI
    pub fn current_view(&self) -> usize {
        self.current_view
    }

    pub fn active_view(&self) -> &View {
        self.catalog.get(self.current_view).unwrap_or(self.catalog.first())
    }

    pub fn current_target(&self) -> Vec3 {
        self.current_target
    }

    /// Overwrite the look-at target, e.g. when the user pans with the orbit controls
    pub fn set_current_target(&mut self, target: Vec3) {
        self.current_target = target;
    }

    pub fn is_animating(&self) -> bool {
        self.position_tween.is_some() || self.target_tween.is_some()
    }

    /// Start animating toward view `index` from the camera's current position.
    /// Returns `None` and leaves all state untouched for an unknown index.
    pub fn switch_to(&mut self, index: usize, camera_position: Vec3) -> Option<&View> {
        let view = self.catalog.get(index)?;
        let TransitionSettings { duration, easing, .. } = self.settings;

        self.position_tween = Some(Tween::new(camera_position, view.position, duration, easing));
        self.target_tween = Some(Tween::new(self.current_target, view.target, duration, easing));
        self.current_view = index;

        log::debug!("Switching to view {} ({})", index, view.name);
        Some(view)
    }

    /// Fly the camera position to the first view, leaving the target as it is
    pub fn start_intro(&mut self, camera_position: Vec3) {
        let first = self.catalog.first().position;
        self.position_tween = Some(Tween::new(
            camera_position,
            first,
            self.settings.intro_duration,
            self.settings.intro_easing,
        ));
    }

    /// Step running tweens by `dt` seconds and push the result into camera and controls.
    /// Returns true when anything was updated this call.
    pub fn advance(
        &mut self,
        dt: f32,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
    ) -> bool {
        if !self.is_animating() {
            return false;
        }

        if let Some(tween) = self.position_tween.as_mut() {
            camera.position = tween.advance(dt);
            if tween.is_finished() {
                self.position_tween = None;
            }
        }

        if let Some(tween) = self.target_tween.as_mut() {
            self.current_target = tween.advance(dt);
            if tween.is_finished() {
                self.target_tween = None;
            }
        }

        // Residual orbit inertia would fight the tween
        controls.stop();
        camera.look_at(self.current_target);
        controls.target = self.current_target;
        controls.update(camera);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = TransitionSettings::default();
        assert_eq!(settings.duration, 2.0);
        assert_eq!(settings.easing, Easing::Power3InOut);
        assert_eq!(settings.intro_easing, Easing::Power2InOut);
    }
}
