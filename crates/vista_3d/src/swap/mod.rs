//! Asynchronous model swapping
//!
//! [`ModelSwapController`] keeps exactly one loaded model in a scene and
//! replaces it when asked to show a different URL:
//!
//! - `set_model` issues a load on the tokio runtime and returns at once. The
//!   old model stays visible until the new one is ready.
//! - A newer request supersedes an older one. The older load still runs to
//!   completion, but its result is recognised as stale by request id and
//!   dropped.
//! - Completions come back over a channel and are applied on the caller's
//!   thread by [`poll`](ModelSwapController::poll) or
//!   [`next_completion`](ModelSwapController::next_completion). The scene is
//!   never touched from a load task.
//! - A failed load is reported to a [`ReportSink`] and leaves the displayed
//!   model alone.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = ModelSwapController::new(Arc::new(UrlAssetLoader::new()), handle);
//! controller.set_model("https://example.com/teapot.obj");
//!
//! // once per frame
//! for outcome in controller.poll(&mut scene) {
//!     tracing::info!(?outcome);
//! }
//! ```

mod normalize;
mod report;
mod slot;

pub use normalize::{normalize, ModelStyle};
pub use report::{LoadReport, ReportSink, TracingReporter};
pub use slot::{LoadRequest, ModelSlot, RequestId, SwapState};

use crate::scene::{Node, NodeId, SceneGraph};
use crate::utils::loader::{AssetLoader, LoadError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Result of a load, delivered back to the controller's thread
#[derive(Debug)]
pub struct LoadCompletion {
    pub request: RequestId,
    pub url: String,
    pub result: Result<Node, LoadError>,
}

/// What handling one completion did to the scene
#[derive(Debug)]
pub enum SwapOutcome {
    /// The new model is displayed; `replaced` was removed from the scene
    Swapped {
        request: RequestId,
        url: String,
        node: NodeId,
        replaced: Option<NodeId>,
    },
    /// The load failed; the displayed model is unchanged
    Failed(LoadReport),
    /// The request had been superseded; nothing changed
    Stale { request: RequestId },
}

impl SwapOutcome {
    /// Whether the scene changed
    pub fn is_swap(&self) -> bool {
        matches!(self, SwapOutcome::Swapped { .. })
    }
}

/// Loads models in the background and swaps them into a scene
pub struct ModelSwapController {
    slot: ModelSlot,
    loader: Arc<dyn AssetLoader>,
    reporter: Box<dyn ReportSink>,
    style: ModelStyle,
    runtime: Handle,
    next_request: u64,
    in_flight: usize,
    completions_tx: mpsc::UnboundedSender<LoadCompletion>,
    completions_rx: mpsc::UnboundedReceiver<LoadCompletion>,
    torn_down: bool,
}

impl ModelSwapController {
    /// Create a controller that runs loads on `runtime`
    pub fn new(loader: Arc<dyn AssetLoader>, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            slot: ModelSlot::new(),
            loader,
            reporter: Box::new(TracingReporter),
            style: ModelStyle::default(),
            runtime,
            next_request: 0,
            in_flight: 0,
            completions_tx,
            completions_rx,
            torn_down: false,
        }
    }

    /// Send failure reports somewhere other than the log
    pub fn with_reporter(mut self, reporter: impl ReportSink + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Override the look applied to loaded models
    pub fn with_style(mut self, style: ModelStyle) -> Self {
        self.style = style;
        self
    }

    /// Node currently displayed by this controller
    pub fn current(&self) -> Option<NodeId> {
        self.slot.current()
    }

    /// URL of the displayed model
    pub fn current_url(&self) -> Option<&str> {
        self.slot.current_url()
    }

    /// The request whose completion will be honored
    pub fn pending(&self) -> Option<&LoadRequest> {
        self.slot.pending()
    }

    /// Idle or loading
    pub fn state(&self) -> SwapState {
        self.slot.state()
    }

    /// Loads issued whose completions have not been handled yet,
    /// including superseded ones
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Show the model at `url` once it has loaded
    ///
    /// Returns the id of the issued load, or `None` when nothing was issued:
    ///
    /// - `url` is empty or whitespace
    /// - `url` is already loading
    /// - `url` is already displayed and nothing else is loading
    ///
    /// Asking for the displayed URL while another one is loading drops the
    /// pending request instead, so the displayed model stays.
    pub fn set_model(&mut self, url: &str) -> Option<RequestId> {
        if self.torn_down {
            tracing::debug!(url, "controller torn down; ignoring model");
            return None;
        }

        let url = url.trim();
        if url.is_empty() {
            tracing::debug!("empty model url; keeping current model");
            return None;
        }

        if self.slot.pending().is_some_and(|p| p.url == url) {
            tracing::debug!(url, "model already loading");
            return None;
        }

        if self.slot.current_url() == Some(url) {
            if let Some(dropped) = self.slot.abandon() {
                tracing::debug!(
                    url,
                    dropped = %dropped.url,
                    request = %dropped.id,
                    "back to displayed model; dropping pending load"
                );
            } else {
                tracing::debug!(url, "model already displayed");
            }
            return None;
        }

        Some(self.issue(url.to_string()))
    }

    /// Load the displayed (or pending) URL again, even if unchanged
    pub fn reload(&mut self) -> Option<RequestId> {
        if self.torn_down {
            return None;
        }
        let url = self
            .slot
            .pending()
            .map(|p| p.url.clone())
            .or_else(|| self.slot.current_url().map(str::to_string))?;
        Some(self.issue(url))
    }

    fn issue(&mut self, url: String) -> RequestId {
        self.next_request += 1;
        let id = RequestId::new(self.next_request);

        if let Some(superseded) = self.slot.begin(LoadRequest {
            url: url.clone(),
            id,
        }) {
            tracing::debug!(
                url = %superseded.url,
                request = %superseded.id,
                by = %id,
                "superseding model load"
            );
        }
        tracing::debug!(url = %url, request = %id, loader = self.loader.name(), "loading model");

        let load = self.loader.load(&url);
        let tx = self.completions_tx.clone();
        let runtime = self.runtime.clone();
        self.in_flight += 1;

        self.runtime.spawn(async move {
            // Run the load as its own task so a panicking loader still
            // produces a completion
            let result = match runtime.spawn(load).await {
                Ok(result) => result,
                Err(e) => Err(LoadError::InvalidData(format!("load task failed: {e}"))),
            };
            // The controller may already be gone
            let _ = tx.send(LoadCompletion {
                request: id,
                url,
                result,
            });
        });

        id
    }

    /// Apply every completion that has arrived, without waiting
    ///
    /// Call once per frame from the thread that owns `scene`.
    pub fn poll(&mut self, scene: &mut dyn SceneGraph) -> Vec<SwapOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            outcomes.push(self.receive(completion, scene));
        }
        outcomes
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns `None` when no load is outstanding.
    pub async fn next_completion(&mut self, scene: &mut dyn SceneGraph) -> Option<SwapOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        Some(self.receive(completion, scene))
    }

    fn receive(&mut self, completion: LoadCompletion, scene: &mut dyn SceneGraph) -> SwapOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.handle_completion(completion, scene)
    }

    /// Apply one completion to the scene
    ///
    /// Only the pending request's completion has any effect; anything else
    /// is stale and dropped.
    pub fn handle_completion(
        &mut self,
        completion: LoadCompletion,
        scene: &mut dyn SceneGraph,
    ) -> SwapOutcome {
        let LoadCompletion {
            request,
            url,
            result,
        } = completion;

        if self.torn_down || self.slot.settle(request).is_none() {
            tracing::debug!(url = %url, request = %request, "dropping stale model load");
            return SwapOutcome::Stale { request };
        }

        match result {
            Ok(mut node) => {
                normalize(&mut node, &self.style);
                let name = node.name.clone();

                let replaced = self.slot.current();
                if let Some(previous) = replaced {
                    if !scene.remove(previous) {
                        tracing::warn!(node = ?previous, "previous model was already gone from the scene");
                    }
                }

                let id = scene.add(node);
                self.slot.install(id, url.clone());
                tracing::info!(url = %url, request = %request, model = %name, "model swapped");

                SwapOutcome::Swapped {
                    request,
                    url,
                    node: id,
                    replaced,
                }
            }
            Err(error) => {
                let report = LoadReport {
                    url,
                    request,
                    error,
                };
                self.reporter.report(&report);
                SwapOutcome::Failed(report)
            }
        }
    }

    /// Forget the displayed model and any pending load
    ///
    /// Nodes are left in the scene for its owner to dispose of. Later calls
    /// to `set_model` are ignored and late completions are dropped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.slot.clear();
        tracing::debug!("model swap controller torn down");
    }

    /// Whether [`teardown`](Self::teardown) has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::materials::{MeshMaterial, StandardMaterial};
    use crate::scene::{Mesh, Scene};
    use crate::utils::loader::LoadFuture;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Resolver = oneshot::Sender<Result<Node, LoadError>>;

    /// Loader whose loads finish only when the test says so
    #[derive(Default)]
    struct ManualLoader {
        waiting: Mutex<Vec<(String, Resolver)>>,
    }

    impl ManualLoader {
        fn issued(&self) -> Vec<String> {
            self.waiting
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }

        /// Resolve the oldest outstanding load of `url`
        fn resolve(&self, url: &str, result: Result<Node, LoadError>) {
            let mut waiting = self.waiting.lock().unwrap();
            let index = waiting
                .iter()
                .position(|(u, _)| u == url)
                .unwrap_or_else(|| panic!("no outstanding load for {url}"));
            let (_, tx) = waiting.remove(index);
            let _ = tx.send(result);
        }

        fn succeed(&self, url: &str) {
            self.resolve(url, Ok(model(url)));
        }

        fn fail(&self, url: &str) {
            self.resolve(url, Err(LoadError::Parse(format!("{url} is corrupt"))));
        }
    }

    impl AssetLoader for ManualLoader {
        fn load(&self, url: &str) -> LoadFuture {
            let (tx, rx) = oneshot::channel();
            self.waiting.lock().unwrap().push((url.to_string(), tx));
            Box::pin(async move {
                rx.await
                    .unwrap_or_else(|_| Err(LoadError::Network("dropped".to_string())))
            })
        }

        fn name(&self) -> &'static str {
            "manual"
        }
    }

    fn model(name: &str) -> Node {
        Node::group(name).with_child(Node::mesh(
            format!("{name}/mesh"),
            Mesh::new(BoxGeometry::cube(1.0), StandardMaterial::with_color(vista_core::Color::GREEN)),
        ))
    }

    struct Harness {
        loader: Arc<ManualLoader>,
        controller: ModelSwapController,
        reports: Arc<Mutex<Vec<String>>>,
        scene: Scene,
    }

    impl Harness {
        fn new() -> Self {
            let loader = Arc::new(ManualLoader::default());
            let reports = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&reports);
            let controller = ModelSwapController::new(loader.clone(), Handle::current())
                .with_reporter(move |report: &LoadReport| {
                    sink.lock().unwrap().push(report.to_string());
                });
            Self {
                loader,
                controller,
                reports,
                scene: Scene::new(),
            }
        }

        async fn next(&mut self) -> SwapOutcome {
            self.controller
                .next_completion(&mut self.scene)
                .await
                .expect("a load is outstanding")
        }

        fn displayed_name(&self) -> Option<String> {
            let id = self.controller.current()?;
            self.scene.get(id).map(|node| node.name.clone())
        }

        fn report_count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }
    }

    #[tokio::test]
    async fn test_swap_scenario_a_b_bad() {
        let mut h = Harness::new();
        assert!(h.controller.current().is_none());

        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        assert!(h.next().await.is_swap());
        let a = h.controller.current().unwrap();
        assert_eq!(h.displayed_name().as_deref(), Some("a.obj"));
        assert_eq!(h.scene.root_count(), 1);

        h.controller.set_model("b.obj");
        h.loader.succeed("b.obj");
        match h.next().await {
            SwapOutcome::Swapped { replaced, .. } => assert_eq!(replaced, Some(a)),
            other => panic!("expected swap, got {other:?}"),
        }
        assert!(!h.scene.contains(a));
        assert_eq!(h.displayed_name().as_deref(), Some("b.obj"));
        let b = h.controller.current();

        h.controller.set_model("bad.obj");
        h.loader.fail("bad.obj");
        assert!(matches!(h.next().await, SwapOutcome::Failed(_)));
        assert_eq!(h.controller.current(), b);
        assert_eq!(h.scene.root_count(), 1);
        assert_eq!(h.controller.state(), SwapState::Idle);

        let reports = h.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("bad.obj"));
        assert!(reports[0].contains("corrupt"));
    }

    #[tokio::test]
    async fn test_superseded_load_is_dropped_when_it_finishes_last() {
        let mut h = Harness::new();
        let first = h.controller.set_model("a.obj").unwrap();
        h.controller.set_model("b.obj");

        h.loader.succeed("b.obj");
        assert!(h.next().await.is_swap());
        h.loader.succeed("a.obj");
        match h.next().await {
            SwapOutcome::Stale { request } => assert_eq!(request, first),
            other => panic!("expected stale, got {other:?}"),
        }

        assert_eq!(h.scene.root_count(), 1);
        assert_eq!(h.displayed_name().as_deref(), Some("b.obj"));
    }

    #[tokio::test]
    async fn test_superseded_load_is_dropped_when_it_finishes_first() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.controller.set_model("b.obj");

        h.loader.succeed("a.obj");
        assert!(matches!(h.next().await, SwapOutcome::Stale { .. }));
        // Old model (none) still shown while b loads
        assert!(h.controller.current().is_none());
        assert_eq!(h.controller.state(), SwapState::Loading);
        assert!(h.scene.is_empty());

        h.loader.succeed("b.obj");
        assert!(h.next().await.is_swap());
        assert_eq!(h.displayed_name().as_deref(), Some("b.obj"));
    }

    #[tokio::test]
    async fn test_superseded_failure_is_not_reported() {
        let mut h = Harness::new();
        h.controller.set_model("bad.obj");
        h.controller.set_model("a.obj");

        h.loader.fail("bad.obj");
        assert!(matches!(h.next().await, SwapOutcome::Stale { .. }));
        assert_eq!(h.report_count(), 0);
        assert_eq!(h.controller.pending().map(|p| p.url.as_str()), Some("a.obj"));
    }

    #[tokio::test]
    async fn test_old_model_visible_until_replacement_ready() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;
        let a = h.controller.current();

        h.controller.set_model("b.obj");
        // Nothing has arrived yet
        assert!(h.controller.poll(&mut h.scene).is_empty());
        assert_eq!(h.controller.current(), a);
        assert_eq!(h.scene.root_count(), 1);
        assert_eq!(h.controller.state(), SwapState::Loading);
    }

    #[tokio::test]
    async fn test_failure_with_nothing_displayed_keeps_scene_empty() {
        let mut h = Harness::new();
        h.controller.set_model("bad.obj");
        h.loader.fail("bad.obj");

        match h.next().await {
            SwapOutcome::Failed(report) => {
                assert_eq!(report.url, "bad.obj");
                assert!(matches!(report.error, LoadError::Parse(_)));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(h.controller.current().is_none());
        assert!(h.scene.is_empty());
        assert_eq!(h.report_count(), 1);
    }

    #[tokio::test]
    async fn test_same_url_twice_loads_once() {
        let mut h = Harness::new();
        assert!(h.controller.set_model("a.obj").is_some());
        assert!(h.controller.set_model("a.obj").is_none());
        assert_eq!(h.loader.issued(), vec!["a.obj".to_string()]);

        h.loader.succeed("a.obj");
        assert!(h.next().await.is_swap());
        assert!(h.controller.next_completion(&mut h.scene).await.is_none());
        assert_eq!(h.scene.root_count(), 1);

        // Host re-sending the displayed URL every tick is free
        assert!(h.controller.set_model("a.obj").is_none());
        assert!(h.loader.issued().is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_with_fresh_copy() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;
        let first = h.controller.current().unwrap();

        assert!(h.controller.reload().is_some());
        h.loader.succeed("a.obj");
        assert!(h.next().await.is_swap());

        let second = h.controller.current().unwrap();
        assert_ne!(first, second);
        assert!(!h.scene.contains(first));
        assert_eq!(h.scene.root_count(), 1);
    }

    #[tokio::test]
    async fn test_reload_while_loading_supersedes_pending() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;
        let a = h.controller.current();

        let first = h.controller.set_model("b.obj").unwrap();
        let second = h.controller.reload().unwrap();
        assert!(second > first);
        assert_eq!(h.controller.pending().map(|p| p.id), Some(second));
        assert_eq!(h.controller.pending().map(|p| p.url.as_str()), Some("b.obj"));
        assert_eq!(h.loader.issued(), vec!["b.obj".to_string(), "b.obj".to_string()]);

        // The first b.obj load finishes first and is stale
        h.loader.succeed("b.obj");
        assert!(matches!(h.next().await, SwapOutcome::Stale { request } if request == first));
        assert_eq!(h.controller.current(), a);
        assert_eq!(h.controller.state(), SwapState::Loading);

        h.loader.succeed("b.obj");
        assert!(matches!(h.next().await, SwapOutcome::Swapped { request, .. } if request == second));
        assert_eq!(h.controller.current_url(), Some("b.obj"));
        assert_eq!(h.scene.root_count(), 1);
        assert_eq!(h.report_count(), 0);
    }

    #[tokio::test]
    async fn test_returning_to_displayed_url_drops_pending() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;
        let a = h.controller.current();

        h.controller.set_model("b.obj");
        assert!(h.controller.set_model("a.obj").is_none());
        assert_eq!(h.controller.state(), SwapState::Idle);

        h.loader.succeed("b.obj");
        assert!(matches!(h.next().await, SwapOutcome::Stale { .. }));
        assert_eq!(h.controller.current(), a);
    }

    #[tokio::test]
    async fn test_blank_url_is_ignored() {
        let mut h = Harness::new();
        assert!(h.controller.set_model("").is_none());
        assert!(h.controller.set_model("   ").is_none());
        assert!(h.loader.issued().is_empty());
        assert_eq!(h.controller.state(), SwapState::Idle);
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let mut h = Harness::new();
        let a = h.controller.set_model("a.obj").unwrap();
        let b = h.controller.set_model("b.obj").unwrap();
        let c = h.controller.set_model("c.obj").unwrap();
        assert!(a < b && b < c);
        assert_eq!(h.controller.in_flight(), 3);
    }

    #[tokio::test]
    async fn test_loaded_model_is_normalized() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;

        let root = h.controller.current().unwrap();
        let root_node = h.scene.get(root).unwrap();
        assert_eq!(root_node.transform.position.y, -1.0);
        assert!(root_node.transform.cast_shadows);

        let child = root_node.children()[0];
        let mesh_node = h.scene.get(child).unwrap();
        let style = ModelStyle::default();
        assert_eq!(
            mesh_node.as_mesh().map(|m| &m.material),
            Some(&MeshMaterial::Standard(style.material))
        );
        assert!(mesh_node.transform.receive_shadows);
    }

    #[tokio::test]
    async fn test_many_supersedes_keep_single_model() {
        let mut h = Harness::new();
        let urls = ["m0.obj", "m1.obj", "m2.obj", "m3.obj", "m4.obj"];
        for url in urls {
            h.controller.set_model(url);
        }
        // Resolve in reverse issue order
        for url in urls.iter().rev() {
            h.loader.succeed(url);
        }
        let mut swaps = 0;
        while let Some(outcome) = h.controller.next_completion(&mut h.scene).await {
            if outcome.is_swap() {
                swaps += 1;
            }
        }
        assert_eq!(swaps, 1);
        assert_eq!(h.scene.root_count(), 1);
        assert_eq!(h.displayed_name().as_deref(), Some("m4.obj"));
    }

    #[tokio::test]
    async fn test_teardown_ignores_late_completions() {
        let mut h = Harness::new();
        h.controller.set_model("a.obj");
        h.loader.succeed("a.obj");
        h.next().await;

        h.controller.set_model("b.obj");
        h.controller.teardown();
        assert!(h.controller.current().is_none());
        assert!(h.controller.set_model("c.obj").is_none());

        h.loader.succeed("b.obj");
        assert!(matches!(h.next().await, SwapOutcome::Stale { .. }));
        // The old model is left for the scene's owner
        assert_eq!(h.scene.root_count(), 1);
    }

    /// Scene wrapper that records the order of graph calls
    #[derive(Default)]
    struct RecordingScene {
        inner: Scene,
        calls: Vec<&'static str>,
    }

    impl SceneGraph for RecordingScene {
        fn add(&mut self, node: Node) -> NodeId {
            self.calls.push("add");
            self.inner.add(node)
        }

        fn remove(&mut self, id: NodeId) -> bool {
            self.calls.push("remove");
            self.inner.remove(id)
        }
    }

    #[tokio::test]
    async fn test_previous_model_removed_before_new_added() {
        let loader = Arc::new(ManualLoader::default());
        let mut controller = ModelSwapController::new(loader.clone(), Handle::current());
        let mut scene = RecordingScene::default();

        controller.set_model("a.obj");
        loader.succeed("a.obj");
        controller.next_completion(&mut scene).await;

        controller.set_model("b.obj");
        loader.succeed("b.obj");
        controller.next_completion(&mut scene).await;

        assert_eq!(scene.calls, vec!["add", "remove", "add"]);
        assert_eq!(scene.inner.root_count(), 1);
    }

    #[tokio::test]
    async fn test_panicking_loader_still_completes() {
        struct PanicLoader;

        fn explode() -> Result<Node, LoadError> {
            panic!("loader bug")
        }

        impl AssetLoader for PanicLoader {
            fn load(&self, _url: &str) -> LoadFuture {
                Box::pin(async { explode() })
            }

            fn name(&self) -> &'static str {
                "panic"
            }
        }

        let mut controller = ModelSwapController::new(Arc::new(PanicLoader), Handle::current())
            .with_reporter(|_: &LoadReport| {});
        let mut scene = Scene::new();
        controller.set_model("a.obj");

        let outcome = controller.next_completion(&mut scene).await.unwrap();
        assert!(matches!(outcome, SwapOutcome::Failed(_)));
        assert_eq!(controller.state(), SwapState::Idle);
    }
}
