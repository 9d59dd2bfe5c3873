use dioxus::prelude::*;
use roadmap_core::model::Progress;

use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{
    LessonRowVm, OpenedLessonVm, RoadmapIntent, RoadmapVm, apply_intent, intent_start, map_roadmap,
};

/// The learning path screen. Owns the progress lifecycle: loads it once on
/// mount, then keeps the value returned by each tap or reset.
#[component]
pub fn RoadmapView() -> Element {
    let ctx = use_context::<AppContext>();
    let roadmap = ctx.roadmap();
    let tracker = ctx.progress_tracker();

    let mut progress = use_signal(|| None::<Progress>);
    let mut opened = use_signal(|| None::<OpenedLessonVm>);
    let mut in_flight = use_signal(|| false);

    let loader = tracker.clone();
    let resource = use_resource(move || {
        let tracker = loader.clone();
        async move {
            let loaded = tracker.load().await;
            progress.set(Some(loaded));
            loaded
        }
    });
    let state = view_state_from_resource(&resource);

    let intent_roadmap = roadmap.clone();
    let on_intent = use_callback(move |intent: RoadmapIntent| {
        let Some(current) = intent_start(progress(), in_flight()) else {
            tracing::debug!(?intent, "intent dropped");
            return;
        };
        in_flight.set(true);
        let roadmap = intent_roadmap.clone();
        let tracker = tracker.clone();
        spawn(async move {
            let result = apply_intent(&tracker, &roadmap, current, intent).await;
            progress.set(Some(result.progress));
            opened.set(result.opened);
            in_flight.set(false);
        });
    });

    let content = match state {
        ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Ready(loaded) => {
            let vm = map_roadmap(&roadmap, progress().unwrap_or(loaded));
            rsx! {
                RoadmapBody { vm, opened: opened(), on_intent }
            }
        }
    };

    rsx! {
        div { class: "page roadmap",
            header { class: "roadmap-header",
                h2 { "Learning Path" }
                button {
                    class: "reset",
                    onclick: move |_| on_intent.call(RoadmapIntent::Reset),
                    "Reset progress"
                }
            }
            {content}
        }
    }
}

#[component]
fn RoadmapBody(
    vm: RoadmapVm,
    #[props(!optional)]
    opened: Option<OpenedLessonVm>,
    on_intent: Callback<RoadmapIntent>,
) -> Element {
    rsx! {
        section { class: "course-header",
            h3 { "{vm.title}" }
            p { class: "progress-text", "{vm.progress_text}" }
            p { class: "progress-percent", "{vm.percent}%" }
            p { class: "meta", "{vm.meta_text}" }
        }

        {opened.map(|lesson| rsx! {
            p { class: "opened-lesson", "{lesson.message()}" }
        })}

        ol { class: "lessons",
            for row in vm.rows {
                LessonRow { key: "{row.index}", row: row.clone(), on_intent }
            }
        }
    }
}

#[component]
fn LessonRow(row: LessonRowVm, on_intent: Callback<RoadmapIntent>) -> Element {
    let index = row.index;
    let status = row.status_label();

    rsx! {
        li { class: "lesson {row.css_class()}",
            button {
                disabled: row.is_locked(),
                onclick: move |_| on_intent.call(RoadmapIntent::Tap(index)),
                span { class: "lesson-number", "{row.number}" }
                span { class: "lesson-title", "{row.title}" }
                {status.map(|label| rsx! {
                    span { class: "lesson-status", "{label}" }
                })}
            }
        }
    }
}
