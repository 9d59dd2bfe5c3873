mod roadmap_vm;

pub use roadmap_vm::{
    IntentResult, LessonRowVm, OpenedLessonVm, RoadmapIntent, RoadmapVm, apply_intent,
    intent_start, map_roadmap,
};
