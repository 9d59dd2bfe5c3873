use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use roadmap_core::model::Roadmap;
use services::AppServices;
use storage::repository::{KeyValueStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::RoadmapView;

#[derive(Props, Clone)]
struct ViewHarnessProps {
    services: AppServices,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = Arc::new(props.services.clone());
    use_context_provider(|| build_app_context(&app));
    rsx! { RoadmapView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let the initial progress load settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(roadmap: Roadmap) -> ViewHarness {
    setup_view_harness_with_store(roadmap, Storage::in_memory())
}

pub fn setup_view_harness_with_store(roadmap: Roadmap, storage: Storage) -> ViewHarness {
    let services = AppServices::new(&storage, roadmap);
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { services });
    ViewHarness { dom, storage }
}

pub fn failing_storage(store: impl KeyValueStore + 'static) -> Storage {
    Storage {
        kv: Arc::new(store),
    }
}
