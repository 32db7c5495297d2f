use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::PerspectiveCamera;
use crate::config::{ViewerConfig, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, WINDOW_TITLE};
use crate::environment::{Environment, Lighting};
use crate::frame::FrameClock;
use crate::input::{Gesture, InputAction, PointerInput};
use crate::loaders::{HdriLoader, ModelData, ModelLoader};
use crate::orbit::OrbitControls;
use crate::renderer::Renderer;
use crate::switcher::ViewSwitcher;
use crate::ui::{self, DebugTargets, UiAction};

/// Camera, controls and transitions: everything a frame needs apart from the GPU
pub struct Viewer {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub switcher: ViewSwitcher,
    pub lighting: Lighting,
    pub environment: Environment,
    viewport: (u32, u32),
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        let switcher = ViewSwitcher::new(config.catalog.clone(), config.transitions);
        let controls = OrbitControls::new(switcher.current_target());
        let aspect = INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32;

        Self {
            camera: PerspectiveCamera::new(aspect),
            controls,
            switcher,
            lighting: config.lighting.clone(),
            environment: config.environment.clone(),
            viewport: (INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT),
        }
    }

    /// Request a view transition; unknown indices are ignored
    pub fn select_view(&mut self, index: usize) {
        if self.switcher.switch_to(index, self.camera.position).is_none() {
            log::debug!("Ignoring unknown view {}", index);
        }
    }

    /// Model finished loading: fly in to the first view
    pub fn on_model_loaded(&mut self, model: &ModelData) {
        if let Some(bounds) = model.bounds {
            log::info!(
                "Model bounds: center {:?}, size {:?}",
                bounds.center(),
                bounds.size()
            );
        }
        self.switcher.start_intro(self.camera.position);
    }

    /// Recompute projection for a new viewport; position and target are untouched
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
    }

    pub fn apply_gesture(&mut self, gesture: Gesture) {
        let height = self.viewport.1 as f32;
        match gesture {
            Gesture::Rotate { dx, dy } => self.controls.rotate(dx, dy, height),
            Gesture::Pan { dx, dy } => self.controls.pan(dx, dy, &self.camera, height),
            Gesture::Zoom { steps } => self.controls.zoom(steps),
        }
    }

    /// Per-frame update: step transitions, then let the controls settle
    pub fn update(&mut self, dt: f32) {
        self.switcher.advance(dt, &mut self.camera, &mut self.controls);
        self.controls.update(&mut self.camera);

        if !self.switcher.is_animating() {
            // Pans and debug edits move the target; the next switch starts from there
            self.switcher.set_current_target(self.controls.target);
        }
    }

    pub fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::SwitchView(index) => self.select_view(index),
        }
    }
}

/// Window, GPU and the frame loop
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    viewer: Viewer,
    loader: Option<ModelLoader>,
    hdri_loader: Option<HdriLoader>,
    input: PointerInput,
    clock: FrameClock,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let viewer = Viewer::new(&config);
        Self {
            config,
            window: None,
            renderer: None,
            viewer,
            loader: None,
            hdri_loader: None,
            input: PointerInput::new(),
            clock: FrameClock::new(),
        }
    }

    fn poll_model(&mut self) {
        let Some(result) = self.loader.as_mut().and_then(ModelLoader::poll) else {
            return;
        };
        self.loader = None;

        match result {
            Ok(model) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.upload_model(&model);
                }
                self.viewer.on_model_loaded(&model);
                log::info!("Model loaded");
            }
            // The viewport stays usable without the model
            Err(e) => log::error!("{:#}", e),
        }
    }

    fn poll_hdri(&mut self) {
        let Some(result) = self.hdri_loader.as_mut().and_then(HdriLoader::poll) else {
            return;
        };
        self.hdri_loader = None;

        match result {
            Ok(image) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_environment_map(&image);
                }
            }
            Err(e) => log::warn!("Falling back to solid background: {:#}", e),
        }
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();
        self.poll_model();
        self.poll_hdri();
        self.viewer.update(frame.delta);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let show_ui = self.config.show_ui;
        let debug_panel = self.config.debug_panel;
        let has_hdri = renderer.has_hdri();
        let fps = self.clock.fps();
        let mut actions = Vec::new();

        let Viewer {
            camera,
            controls,
            switcher,
            lighting,
            environment,
            ..
        } = &mut self.viewer;

        // Sliders write into the live values; the renderer reads a snapshot
        let mut ui_camera = camera.clone();
        let mut ui_environment = environment.clone();

        let result = renderer.render(window, camera, lighting, environment, |ctx| {
            if !show_ui {
                return;
            }
            ui::view_bar(ctx, switcher.catalog(), switcher.current_view(), &mut actions);
            if debug_panel {
                ui::debug_panel(
                    ctx,
                    DebugTargets {
                        camera: &mut ui_camera,
                        controls: &mut *controls,
                        environment: &mut ui_environment,
                        has_hdri,
                        fps,
                    },
                );
            }
        });

        if let Err(e) = result {
            log::error!("Render error: {:#}", e);
        }

        if debug_panel {
            *camera = ui_camera;
            *environment = ui_environment;
        }

        for action in actions {
            self.viewer.apply_ui_action(action);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            &self.config.environment,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.viewer.resize(size.width, size.height);
        self.viewer.camera.look_at(self.viewer.controls.target);

        self.loader = Some(ModelLoader::model(self.config.model_path.clone()));
        self.hdri_loader = self
            .config
            .environment
            .hdri
            .clone()
            .map(|source| HdriLoader::hdri(source, renderer.max_texture_dimension()));
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock = FrameClock::new();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.viewer.resize(size.width, size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => match self.input.process_event(&other) {
                Some(InputAction::Gesture(gesture)) => self.viewer.apply_gesture(gesture),
                Some(InputAction::SelectView(index)) => self.viewer.select_view(index),
                None => {}
            },
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
