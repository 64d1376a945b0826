use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::ScaleDirection;
use crate::error::ChartResult;
use crate::render::{Color, LinePrimitive, NodeId, NodeKind, Scene, TextHAlign, TextPrimitive};

const TICK_LINE_COLOR: Color = Color::rgba(0.56, 0.62, 0.67, 0.35);
const TICK_LABEL_COLOR: Color = Color::rgb(0.56, 0.62, 0.67);
const TICK_LABEL_FONT_PX: f64 = 12.0;
const TICK_LABEL_LIFT_PX: f64 = 6.0;

/// One of the two alternating tick sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickSlot {
    Even,
    Odd,
}

impl TickSlot {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }

    const fn class(self) -> &'static str {
        match self {
            Self::Even => "c-legend-set c-legend-even",
            Self::Odd => "c-legend-set c-legend-odd",
        }
    }
}

/// Lifecycle of a tick set inside the double buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickPhase {
    #[default]
    Empty,
    /// Appended in the offset, transparent start state; restyled next frame.
    Entering,
    Shown,
    /// Sliding out; destroyed once the transition finishes.
    Exiting,
}

/// A Y-axis reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendTick {
    /// Data value shown by the label.
    pub value: f64,
    /// Row position in the legend canvas.
    pub y_position: f64,
    pub visible: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
struct TickSet {
    group: NodeId,
    ticks: SmallVec<[LegendTick; 8]>,
    phase: TickPhase,
    generation: u64,
    direction: ScaleDirection,
}

/// Result of a rebuild: which slot enters, which leaves, and the generation to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendTransition {
    pub generation: u64,
    pub entering: TickSlot,
    pub exiting: TickSlot,
    pub direction: ScaleDirection,
}

/// Y-axis ticks double-buffered across two slots.
///
/// The active slot holds the current ticks; the inactive slot is either empty
/// or exiting and is always safe to clear. The zero baseline lives outside the
/// buffer and is never recycled.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendAnimator {
    width: f64,
    visible_height: f64,
    anchor_count: usize,
    slide_px: f64,
    baseline: LegendTick,
    slots: [TickSet; 2],
    active: TickSlot,
    last_scale: Option<f64>,
    generation: u64,
}

impl LegendAnimator {
    /// Creates the baseline and both slot groups under `parent`.
    pub fn mount(
        scene: &mut Scene,
        parent: NodeId,
        width: f64,
        visible_height: f64,
        anchor_count: usize,
        slide_px: f64,
    ) -> ChartResult<Self> {
        let baseline = LegendTick {
            value: 0.0,
            y_position: visible_height,
            visible: true,
            label: "0".to_owned(),
        };
        append_tick(scene, parent, &baseline, width, "c-anchor c-anchor-0")?;

        let mut slot_group = |slot: TickSlot| -> ChartResult<TickSet> {
            let group = scene.append(parent, NodeKind::Group, slot.class())?;
            Ok(TickSet {
                group,
                ticks: SmallVec::new(),
                phase: TickPhase::Empty,
                generation: 0,
                direction: ScaleDirection::None,
            })
        };
        let slots = [slot_group(TickSlot::Even)?, slot_group(TickSlot::Odd)?];

        Ok(Self {
            width,
            visible_height,
            anchor_count,
            slide_px,
            baseline,
            slots,
            active: TickSlot::Even,
            last_scale: None,
            generation: 0,
        })
    }

    #[must_use]
    pub fn active_slot(&self) -> TickSlot {
        self.active
    }

    #[must_use]
    pub fn phase(&self, slot: TickSlot) -> TickPhase {
        self.slots[slot.index()].phase
    }

    #[must_use]
    pub fn slot_ticks(&self, slot: TickSlot) -> &[LegendTick] {
        &self.slots[slot.index()].ticks
    }

    #[must_use]
    pub fn baseline(&self) -> &LegendTick {
        &self.baseline
    }

    /// Scale the current tick labels were computed for.
    #[must_use]
    pub fn last_scale(&self) -> Option<f64> {
        self.last_scale
    }

    /// Baseline followed by the active slot's ticks.
    #[must_use]
    pub fn ticks(&self) -> Vec<LegendTick> {
        std::iter::once(self.baseline.clone())
            .chain(self.slot_ticks(self.active).iter().cloned())
            .collect()
    }

    /// Pixel distance between two tick rows.
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.visible_height / self.anchor_count as f64).ceil()
    }

    /// Replaces the tick set for `scale`.
    ///
    /// The new set is appended to the inactive slot in its start state and the
    /// active flag flips. Returns `None` when the scale did not change.
    pub fn rebuild(
        &mut self,
        scene: &mut Scene,
        scale: f64,
    ) -> ChartResult<Option<LegendTransition>> {
        if self.last_scale == Some(scale) && self.phase(self.active) != TickPhase::Empty {
            return Ok(None);
        }
        let direction = self.last_scale.map_or(ScaleDirection::None, |previous| {
            ScaleDirection::between(previous, scale)
        });

        let incoming = self.active.other();
        let outgoing = self.active;
        self.clear_slot(scene, incoming);

        let step = self.step();
        let mut ticks: SmallVec<[LegendTick; 8]> = SmallVec::new();
        for i in 1..self.anchor_count {
            let pixel_value = i as f64 * step;
            let visible = scale > 0.0;
            let value = if visible { (pixel_value / scale).ceil() } else { 0.0 };
            ticks.push(LegendTick {
                value,
                y_position: self.visible_height - pixel_value,
                visible,
                label: if visible {
                    format_tick_value(value)
                } else {
                    String::new()
                },
            });
        }

        self.generation += 1;
        let group = self.slots[incoming.index()].group;
        for (offset, tick) in ticks.iter().enumerate() {
            let class = format!("c-anchor c-anchor-{}", offset + 1);
            let (line, text) = append_tick(scene, group, tick, self.width, &class)?;
            if !tick.visible {
                scene.set_visible(line, false)?;
                scene.set_visible(text, false)?;
            }
        }
        scene.set_offset(group, 0.0, self.enter_offset(direction))?;
        scene.set_opacity(group, 0.0)?;
        scene.set_visible(group, true)?;

        let set = &mut self.slots[incoming.index()];
        set.ticks = ticks;
        set.phase = TickPhase::Entering;
        set.generation = self.generation;
        set.direction = direction;

        let previous = &mut self.slots[outgoing.index()];
        if previous.phase != TickPhase::Empty {
            previous.phase = TickPhase::Exiting;
            previous.direction = direction;
        }

        self.active = incoming;
        self.last_scale = Some(scale);
        debug!(
            scale,
            ?direction,
            entering = ?incoming,
            generation = self.generation,
            "legend rebuilt"
        );

        Ok(Some(LegendTransition {
            generation: self.generation,
            entering: incoming,
            exiting: outgoing,
            direction,
        }))
    }

    /// Restyles the entering set to its resting state and the exiting set to
    /// its end state. Runs one frame after [`LegendAnimator::rebuild`].
    ///
    /// Returns the slot that started exiting, if any. Stale generations are ignored.
    pub fn commit(
        &mut self,
        scene: &mut Scene,
        generation: u64,
    ) -> ChartResult<Option<TickSlot>> {
        if generation != self.generation {
            trace!(generation, current = self.generation, "stale legend commit");
            return Ok(None);
        }

        let active = &mut self.slots[self.active.index()];
        if active.phase == TickPhase::Entering {
            scene.set_offset(active.group, 0.0, 0.0)?;
            scene.set_opacity(active.group, 1.0)?;
            active.phase = TickPhase::Shown;
        }

        let inactive = self.active.other();
        let exit_offset = self.exit_offset(self.slots[inactive.index()].direction);
        let leaving = &mut self.slots[inactive.index()];
        if leaving.phase != TickPhase::Exiting {
            return Ok(None);
        }
        leaving.generation = generation;
        scene.set_offset(leaving.group, 0.0, exit_offset)?;
        scene.set_opacity(leaving.group, 0.0)?;
        Ok(Some(inactive))
    }

    /// Destroys an exited set once its transition is over.
    ///
    /// Ignored when the slot was reused after the exit started.
    pub fn finish_exit(
        &mut self,
        scene: &mut Scene,
        slot: TickSlot,
        generation: u64,
    ) -> ChartResult<bool> {
        let set = &self.slots[slot.index()];
        if slot == self.active
            || set.phase != TickPhase::Exiting
            || set.generation != generation
        {
            return Ok(false);
        }
        self.clear_slot(scene, slot);
        scene.set_visible(self.slots[slot.index()].group, false)?;
        trace!(?slot, generation, "legend set destroyed");
        Ok(true)
    }

    fn clear_slot(&mut self, scene: &mut Scene, slot: TickSlot) {
        let set = &mut self.slots[slot.index()];
        for child in scene.children(set.group).to_vec() {
            scene.remove(child);
        }
        set.ticks.clear();
        set.phase = TickPhase::Empty;
    }

    /// Start offset of an entering set: zoom-in slides ticks up from below,
    /// zoom-out slides them down from above.
    fn enter_offset(&self, direction: ScaleDirection) -> f64 {
        match direction {
            ScaleDirection::In => self.slide_px,
            ScaleDirection::Out => -self.slide_px,
            ScaleDirection::None => 0.0,
        }
    }

    fn exit_offset(&self, direction: ScaleDirection) -> f64 {
        -self.enter_offset(direction)
    }
}

fn tick_line(tick: &LegendTick, width: f64) -> LinePrimitive {
    LinePrimitive::new(
        0.0,
        tick.y_position,
        width,
        tick.y_position,
        1.0,
        TICK_LINE_COLOR,
    )
}

fn tick_text(tick: &LegendTick) -> TextPrimitive {
    TextPrimitive::new(
        tick.label.clone(),
        0.0,
        tick.y_position - TICK_LABEL_LIFT_PX,
        TICK_LABEL_FONT_PX,
        TICK_LABEL_COLOR,
        TextHAlign::Left,
    )
}

fn append_tick(
    scene: &mut Scene,
    parent: NodeId,
    tick: &LegendTick,
    width: f64,
    class: &str,
) -> ChartResult<(NodeId, NodeId)> {
    let line = scene.append(
        parent,
        NodeKind::Line(tick_line(tick, width)),
        &format!("{class} c-anchor-line"),
    )?;
    let text = scene.append(
        parent,
        NodeKind::Text(tick_text(tick)),
        &format!("{class} c-anchor-label"),
    )?;
    Ok((line, text))
}

fn format_tick_value(value: f64) -> String {
    if value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:e}")
    }
}
