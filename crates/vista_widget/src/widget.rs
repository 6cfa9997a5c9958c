//! Host-facing viewer widget
//!
//! The host drives the widget through a small lifecycle:
//!
//! 1. [`ViewerWidget::new`] once, with the runtime loads should run on
//! 2. [`update_view`](ViewerWidget::update_view) whenever its parameters or
//!    allocated size change
//! 3. [`tick`](ViewerWidget::tick) once per frame, submitting the returned
//!    [`Frame`] to its renderer
//! 4. [`destroy`](ViewerWidget::destroy) when the widget goes away
//!
//! Load failures are logged and never returned from these methods.

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::stage::{build_stage, Stage};
use std::sync::Arc;
use tokio::runtime::Handle;
use vista_3d::prelude::*;
use vista_3d::swap::RequestId;

/// Parameters pushed by the host on every view update
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewParams {
    /// Allocated width in pixels
    pub width: f32,
    /// Allocated height in pixels
    pub height: f32,
    /// Raw model URL parameter
    pub model_url: Option<String>,
}

impl ViewParams {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            model_url: None,
        }
    }

    pub fn with_model(mut self, url: impl Into<String>) -> Self {
        self.model_url = Some(url.into());
        self
    }
}

/// Snapshot of the model slot for host display
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelStatus {
    /// URL of the model on screen
    pub displayed: Option<String>,
    /// URL that will replace it once loaded
    pub pending: Option<String>,
    /// Whether a load is outstanding
    pub loading: bool,
}

/// Mouse button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Rotates the camera
    Primary,
    /// Pans the camera
    Secondary,
}

/// Embeddable 3D model viewer
pub struct ViewerWidget {
    config: ViewerConfig,
    render_config: RenderConfig,
    scene: Scene,
    stage: Stage,
    camera: PerspectiveCamera,
    orbit: OrbitController,
    pose: CameraPose,
    input: CameraInput,
    pointer: Option<Vec2>,
    viewport: Size,
    label: String,
    swap: ModelSwapController,
    destroyed: bool,
}

impl ViewerWidget {
    /// Create a widget that fetches models with [`UrlAssetLoader`]
    pub fn new(config: ViewerConfig, runtime: Handle) -> Result<Self> {
        Self::with_loader(config, runtime, Arc::new(UrlAssetLoader::new()))
    }

    /// Create a widget with a custom model loader
    pub fn with_loader(
        config: ViewerConfig,
        runtime: Handle,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<Self> {
        config.validate()?;

        let mut scene = Scene::new();
        let stage = build_stage(&mut scene, &config);
        let orbit = config.orbit_controller();
        let pose = orbit.pose();
        let swap = ModelSwapController::new(loader, runtime).with_style(config.model_style());

        tracing::info!(nodes = scene.len(), "viewer widget created");

        Ok(Self {
            render_config: config.render_config(),
            camera: config.perspective_camera(),
            config,
            scene,
            stage,
            orbit,
            pose,
            input: CameraInput::new(),
            pointer: None,
            viewport: Size::ZERO,
            label: String::new(),
            swap,
            destroyed: false,
        })
    }

    /// Apply new host parameters
    ///
    /// Resizes the camera to the allocated size and asks for the model URL.
    /// Returns the id of the load this issued, if any.
    pub fn update_view(&mut self, params: &ViewParams) -> Option<RequestId> {
        if self.destroyed {
            return None;
        }

        let viewport = Size::new(params.width, params.height);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.camera.fit_viewport(viewport);
            tracing::debug!(width = params.width, height = params.height, "viewer resized");
        }

        let url = params.model_url.as_deref().unwrap_or_default();
        self.label = url.to_string();
        self.swap.set_model(url)
    }

    /// Advance one frame
    ///
    /// Applies finished loads, moves the camera and describes what to draw.
    /// Returns `None` once the widget is destroyed.
    pub fn tick(&mut self, dt: f32) -> Option<Frame> {
        if self.destroyed {
            return None;
        }

        for outcome in self.swap.poll(&mut self.scene) {
            tracing::trace!(?outcome, "model load handled");
        }

        self.pose = self.orbit.update(dt, &self.input);
        self.input.clear_deltas();

        Some(build_frame(
            &self.scene,
            &self.camera,
            &self.pose,
            self.viewport,
            &self.render_config,
        ))
    }

    /// Wait until the outstanding load (if any) has been applied
    pub async fn settle(&mut self) -> Vec<SwapOutcome> {
        let mut outcomes = Vec::new();
        while self.swap.state() == SwapState::Loading {
            match self.swap.next_completion(&mut self.scene).await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    /// Model slot snapshot
    pub fn model_status(&self) -> ModelStatus {
        ModelStatus {
            displayed: self.swap.current_url().map(str::to_string),
            pending: self.swap.pending().map(|p| p.url.clone()),
            loading: self.swap.state() == SwapState::Loading,
        }
    }

    /// Pointer moved to `position`, relative to the widget's top-left corner
    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(last) = self.pointer.replace(position) {
            if self.input.primary_pressed || self.input.secondary_pressed {
                self.input.pointer_delta = self.input.pointer_delta + (position - last);
            }
        }
    }

    pub fn pointer_pressed(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.input.primary_pressed = true,
            PointerButton::Secondary => self.input.secondary_pressed = true,
        }
    }

    pub fn pointer_released(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.input.primary_pressed = false,
            PointerButton::Secondary => self.input.secondary_pressed = false,
        }
    }

    /// Wheel scrolled; positive zooms in
    pub fn scrolled(&mut self, delta: f32) {
        self.input.scroll_delta += delta;
    }

    /// Snap the camera back to its starting pose
    pub fn reset_camera(&mut self) {
        self.orbit.reset();
        self.input = CameraInput::new();
        self.pose = self.orbit.pose();
    }

    /// Pick at `position` and react to what was hit
    ///
    /// Clicking the demo cube gives it a random color.
    pub fn click(&mut self, position: Vec2) -> Option<Hit> {
        if self.destroyed {
            return None;
        }

        let ndc = pointer_to_ndc(position, self.viewport)?;
        let hit = Raycaster::from_camera(ndc, &self.camera, &self.pose).intersect_first(&self.scene)?;

        if self.config.demo_cube.recolor_on_click && Some(hit.node) == self.stage.cube {
            let color = Color::from_hex(rand::random::<u32>() & 0xff_ffff);
            if let Some(material) = self
                .scene
                .get_mut(hit.node)
                .and_then(SceneNode::as_mesh_mut)
                .and_then(|mesh| mesh.material.as_standard_mut())
            {
                material.color = color;
                tracing::debug!(?color, "demo cube recolored");
            }
        }

        Some(hit)
    }

    /// Release the model and scene
    ///
    /// Later calls to any method are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.swap.teardown();
        self.scene.clear();
        self.stage = Stage::default();
        tracing::info!("viewer widget destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Raw model parameter from the last update
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Node of the displayed model
    pub fn model_node(&self) -> Option<NodeId> {
        self.swap.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_3d::utils::loader::LoadFuture;

    /// Resolves every URL ending in `.obj` to a unit cube, everything else
    /// to a parse error
    struct InstantLoader;

    impl AssetLoader for InstantLoader {
        fn load(&self, url: &str) -> LoadFuture {
            let url = url.to_string();
            Box::pin(async move {
                if url.ends_with(".obj") {
                    Ok(Node::group(url.clone()).with_child(Node::mesh(
                        "body",
                        Mesh::new(BoxGeometry::cube(1.0), StandardMaterial::new()),
                    )))
                } else {
                    Err(LoadError::Parse(format!("cannot read {url}")))
                }
            })
        }

        fn name(&self) -> &'static str {
            "instant"
        }
    }

    fn widget() -> ViewerWidget {
        ViewerWidget::with_loader(
            ViewerConfig::default(),
            Handle::current(),
            Arc::new(InstantLoader),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_update_view_loads_model() {
        let mut widget = widget();
        let params = ViewParams::new(800.0, 400.0).with_model("a.obj");

        assert!(widget.update_view(&params).is_some());
        assert_eq!(widget.label(), "a.obj");
        assert_eq!(widget.camera().aspect, 2.0);
        assert!(widget.model_status().loading);

        let outcomes = widget.settle().await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_swap());
        assert_eq!(
            widget.model_status(),
            ModelStatus {
                displayed: Some("a.obj".to_string()),
                pending: None,
                loading: false,
            }
        );

        // Same parameters again do nothing
        assert!(widget.update_view(&params).is_none());

        let frame = widget.tick(1.0 / 60.0).unwrap();
        assert_eq!(frame.viewport, Size::new(800.0, 400.0));
        assert_eq!(frame.clear_color, Color::WHITE);
        // cube, ground, model body
        assert_eq!(frame.items.len(), 3);
        assert_eq!(frame.lights.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_displayed_model() {
        let mut widget = widget();
        widget.update_view(&ViewParams::new(100.0, 100.0).with_model("a.obj"));
        widget.settle().await;
        let model = widget.model_node();

        widget.update_view(&ViewParams::new(100.0, 100.0).with_model("bad.fbx"));
        let outcomes = widget.settle().await;
        assert!(matches!(outcomes.as_slice(), [SwapOutcome::Failed(_)]));

        assert_eq!(widget.model_node(), model);
        assert_eq!(widget.model_status().displayed.as_deref(), Some("a.obj"));
        assert!(widget.scene().contains(model.unwrap()));
    }

    #[tokio::test]
    async fn test_tick_applies_completions() {
        let mut widget = widget();
        widget.update_view(&ViewParams::new(100.0, 100.0).with_model("a.obj"));

        let mut swapped = false;
        for _ in 0..100 {
            widget.tick(1.0 / 60.0);
            if widget.model_node().is_some() {
                swapped = true;
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(swapped);
    }

    #[tokio::test]
    async fn test_click_recolors_demo_cube() {
        let mut widget = widget();
        widget.update_view(&ViewParams::new(200.0, 100.0));

        let cube = widget.stage().cube.unwrap();
        let hit = widget.click(Vec2::new(100.0, 50.0)).unwrap();
        assert_eq!(hit.node, cube);
        assert!((hit.distance - 1.5).abs() < 1e-4);

        // Far corner looks over the cube and past the ground plane
        assert!(widget.click(Vec2::new(0.0, 0.0)).is_none());
    }

    #[tokio::test]
    async fn test_click_without_recolor_keeps_color() {
        let mut config = ViewerConfig::default();
        config.demo_cube.recolor_on_click = false;
        let mut widget =
            ViewerWidget::with_loader(config, Handle::current(), Arc::new(InstantLoader)).unwrap();
        widget.update_view(&ViewParams::new(100.0, 100.0));

        let cube = widget.stage().cube.unwrap();
        assert!(widget.click(Vec2::new(50.0, 50.0)).is_some());
        let color = widget
            .scene()
            .get(cube)
            .and_then(SceneNode::as_mesh)
            .and_then(|mesh| mesh.material.as_standard())
            .map(|material| material.color);
        assert_eq!(color, Some(Color::GREEN));
    }

    #[tokio::test]
    async fn test_click_needs_a_viewport() {
        let mut widget = widget();
        assert!(widget.click(Vec2::new(0.0, 0.0)).is_none());
    }

    #[tokio::test]
    async fn test_drag_rotates_camera() {
        let mut widget = widget();
        widget.update_view(&ViewParams::new(100.0, 100.0));
        let start = *widget.pose();

        widget.pointer_moved(Vec2::new(10.0, 10.0));
        widget.pointer_pressed(PointerButton::Primary);
        widget.pointer_moved(Vec2::new(60.0, 10.0));
        widget.tick(1.0 / 60.0);
        widget.pointer_released(PointerButton::Primary);

        let moved = *widget.pose();
        assert!(moved.position.x < start.position.x);
        assert!((moved.position.length() - 2.0).abs() < 1e-3);

        // Moving without a button held leaves the camera alone
        widget.pointer_moved(Vec2::new(90.0, 90.0));
        for _ in 0..300 {
            widget.tick(1.0 / 60.0);
        }
        let settled = *widget.pose();
        widget.tick(1.0 / 60.0);
        assert!(widget.pose().position.abs_diff_eq(settled.position, 1e-5));

        widget.reset_camera();
        assert!(widget.pose().position.abs_diff_eq(start.position, 1e-5));
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let mut widget = widget();
        widget.update_view(&ViewParams::new(100.0, 100.0).with_model("a.obj"));

        widget.destroy();
        widget.destroy();

        assert!(widget.is_destroyed());
        assert!(widget.scene().is_empty());
        assert!(widget.tick(1.0 / 60.0).is_none());
        assert!(widget
            .update_view(&ViewParams::new(100.0, 100.0).with_model("b.obj"))
            .is_none());
        assert!(widget.click(Vec2::new(50.0, 50.0)).is_none());
        assert!(widget.model_node().is_none());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = ViewerConfig::default();
        config.camera.near = 0.0;
        let result = ViewerWidget::with_loader(config, Handle::current(), Arc::new(InstantLoader));
        assert!(result.is_err());
    }
}
