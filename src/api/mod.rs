mod chart_config;
mod chart_id;
mod data_controller;
mod date_axis;
mod engine;
mod engine_accessors;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod legend_animator;
mod scale_coordinator;
mod scene_builder;
mod task_scheduler;
mod tooltip_controller;

pub use chart_config::ChartConfig;
pub use chart_id::{ChartId, ChartOptions};
pub use date_axis::{
    DateAxis, DateLabel, DateLabelFormatterFn, default_axis_date_label,
    default_tooltip_date_label,
};
pub use engine::Chart;
pub use engine_snapshot::ChartSnapshot;
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use legend_animator::{LegendAnimator, LegendTick, LegendTransition, TickPhase, TickSlot};
pub use scene_builder::ChartLayout;
pub use task_scheduler::TaskScheduler;
pub use tooltip_controller::{TooltipController, TooltipEntry, TooltipPayload, TooltipSide};
