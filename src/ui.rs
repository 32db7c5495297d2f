use crate::camera::PerspectiveCamera;
use crate::environment::Environment;
use crate::orbit::OrbitControls;
use crate::views::ViewCatalog;

/// Requests raised by the UI, applied by the app after the frame's UI pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    SwitchView(usize),
}

/// Live values the debug panel edits in place
pub struct DebugTargets<'a> {
    pub camera: &'a mut PerspectiveCamera,
    pub controls: &'a mut OrbitControls,
    pub environment: &'a mut Environment,
    pub has_hdri: bool,
    pub fps: f32,
}

/// Row of view buttons along the bottom edge; exactly one is shown active
pub fn view_bar(ctx: &egui::Context, catalog: &ViewCatalog, active: usize, actions: &mut Vec<UiAction>) {
    egui::Area::new(egui::Id::new("view_bar"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -20.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (index, view) in catalog.iter().enumerate() {
                        let button = egui::Button::new(&view.name).selected(index == active);
                        if ui.add(button).clicked() {
                            actions.push(UiAction::SwitchView(index));
                        }
                    }
                });
            });
        });
}

/// Slider over a live value. Values outside `range` are left alone until the user drags.
fn live_slider<'a>(
    value: &'a mut f32,
    range: std::ops::RangeInclusive<f32>,
    text: &str,
) -> egui::Slider<'a> {
    egui::Slider::new(value, range)
        .text(text)
        .clamping(egui::SliderClamping::Edits)
}

/// Sliders bound directly to camera, orbit and environment values
pub fn debug_panel(ctx: &egui::Context, targets: DebugTargets<'_>) {
    let DebugTargets {
        camera,
        controls,
        environment,
        has_hdri,
        fps,
    } = targets;
    let tone_mapped = environment.tone_mapping_active(has_hdri);

    egui::Window::new("Debug")
        .default_pos(egui::pos2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0} FPS", fps))
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );

            egui::CollapsingHeader::new("Camera Position")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(live_slider(&mut camera.position.x, -10.0..=10.0, "x"));
                    ui.add(live_slider(&mut camera.position.y, -10.0..=10.0, "y"));
                    ui.add(live_slider(&mut camera.position.z, -10.0..=10.0, "z"));
                    ui.add(live_slider(&mut camera.fov_y_degrees, 10.0..=120.0, "fov"));
                });

            egui::CollapsingHeader::new("Camera Target")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(live_slider(&mut controls.target.x, -10.0..=10.0, "x"));
                    ui.add(live_slider(&mut controls.target.y, -10.0..=10.0, "y"));
                    ui.add(live_slider(&mut controls.target.z, -10.0..=10.0, "z"));
                });

            egui::CollapsingHeader::new("Controls").show(ui, |ui| {
                ui.checkbox(&mut controls.enable_damping, "damping");
                ui.add(live_slider(&mut controls.damping_factor, 0.01..=1.0, "damping factor"));
                ui.add(live_slider(&mut controls.rotate_speed, 0.1..=3.0, "rotate speed"));
                ui.add(live_slider(&mut controls.zoom_speed, 0.1..=3.0, "zoom speed"));
            });

            egui::CollapsingHeader::new("Environment")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add_enabled(
                        tone_mapped,
                        live_slider(&mut environment.exposure, 0.1..=4.0, "exposure"),
                    );
                    ui.add_enabled(
                        has_hdri,
                        live_slider(&mut environment.intensity, 0.0..=4.0, "env intensity"),
                    );
                });
        });
}
