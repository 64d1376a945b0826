use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::ViewWindow;
use crate::error::{ChartError, ChartResult};

/// Which part of the preview frame a drag is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSide {
    /// Left handle: resizes the left filler.
    Left,
    /// Right handle: resizes the right filler.
    Right,
    /// Frame body: moves the whole frame.
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragMode {
    #[default]
    Idle,
    Dragging(DragSide),
}

/// Pointer positions reported by the gesture layer, in preview-strip pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragInput {
    pub start_position_x: f64,
    pub current_position_x: f64,
}

impl DragInput {
    #[must_use]
    pub const fn new(start_position_x: f64, current_position_x: f64) -> Self {
        Self {
            start_position_x,
            current_position_x,
        }
    }

    /// Signed pointer travel; positive when moving right.
    #[must_use]
    pub fn delta(self) -> f64 {
        self.current_position_x - self.start_position_x
    }
}

/// Result of feeding one pointer move into the selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragOutcome {
    /// No drag in progress.
    Idle,
    /// The window moved.
    Updated(ViewWindow),
    /// The move resolved to the current window.
    Unchanged,
    /// The move would shrink the frame below the minimum; previous window kept.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    side: DragSide,
    start_x: f64,
    origin: ViewWindow,
}

/// Resolves a drag against the window captured at drag start.
///
/// Edge drags clamp their filler at zero and are rejected when the frame would
/// become narrower than `min_width`. Frame moves never reject: they snap to the
/// boundary they run into and keep the frame span.
#[must_use]
pub fn resolve_drag(
    side: DragSide,
    origin: ViewWindow,
    input: DragInput,
    min_width: f64,
) -> Option<ViewWindow> {
    let delta = input.delta();
    if !delta.is_finite() {
        return None;
    }

    let candidate = match side {
        DragSide::Left => ViewWindow {
            left: (origin.left + delta).max(0.0),
            ..origin
        },
        DragSide::Right => ViewWindow {
            right: (origin.right - delta).max(0.0),
            ..origin
        },
        DragSide::Move => {
            let mut left = origin.left + delta;
            let mut right = origin.right - delta;
            if left < 0.0 {
                right += left;
                left = 0.0;
            }
            if right < 0.0 {
                left += right;
                right = 0.0;
            }
            ViewWindow {
                left: left.max(0.0),
                right,
                ..origin
            }
        }
    };

    if side != DragSide::Move && candidate.visible_width() < min_width {
        return None;
    }
    Some(candidate)
}

/// Turns preview-frame drags into a validated [`ViewWindow`].
///
/// State machine: `Idle -> Dragging(side) -> Idle`. Pointer-down while a drag
/// is active is ignored; pointer-up always ends the drag.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelector {
    window: ViewWindow,
    min_width: f64,
    handle_width: f64,
    session: Option<DragSession>,
}

impl RangeSelector {
    pub fn new(window: ViewWindow, min_width: f64, handle_width: f64) -> ChartResult<Self> {
        if !min_width.is_finite() || min_width < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min window width must be finite and >= 0".to_owned(),
            ));
        }
        if !handle_width.is_finite() || handle_width < 0.0 {
            return Err(ChartError::InvalidConfig(
                "handle width must be finite and >= 0".to_owned(),
            ));
        }

        let mut selector = Self {
            window,
            min_width,
            handle_width,
            session: None,
        };
        selector.window = selector.enforce_min_width(window);
        Ok(selector)
    }

    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.window
    }

    #[must_use]
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.session
            .map_or(DragMode::Idle, |session| DragMode::Dragging(session.side))
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Classifies a pointer-down position against the current frame.
    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<DragSide> {
        let frame_left = self.window.left;
        let frame_right = self.window.width - self.window.right;
        if !(x > frame_left && x < frame_right) {
            return None;
        }
        if x - frame_left < self.handle_width {
            Some(DragSide::Left)
        } else if frame_right - x < self.handle_width {
            Some(DragSide::Right)
        } else {
            Some(DragSide::Move)
        }
    }

    /// Starts a drag when `x` lands inside the frame. Returns the grabbed side.
    pub fn pointer_down(&mut self, x: f64) -> Option<DragSide> {
        if self.session.is_some() {
            trace!(x, "pointer down ignored: drag already active");
            return None;
        }
        let side = self.hit_test(x)?;
        self.begin_drag(side, x);
        Some(side)
    }

    /// Starts a drag on an explicit side regardless of hit testing.
    pub fn begin_drag(&mut self, side: DragSide, start_x: f64) -> bool {
        if self.session.is_some() {
            return false;
        }
        debug!(?side, start_x, "preview drag started");
        self.session = Some(DragSession {
            side,
            start_x,
            origin: self.window,
        });
        true
    }

    pub fn pointer_move(&mut self, x: f64) -> DragOutcome {
        let Some(session) = self.session else {
            return DragOutcome::Idle;
        };
        self.apply_drag(DragInput::new(session.start_x, x))
    }

    /// Applies gesture-layer input to the active drag.
    pub fn apply_drag(&mut self, input: DragInput) -> DragOutcome {
        let Some(session) = self.session else {
            return DragOutcome::Idle;
        };

        match resolve_drag(session.side, session.origin, input, self.min_width) {
            Some(window) if window == self.window => DragOutcome::Unchanged,
            Some(window) => {
                self.window = window;
                trace!(
                    left = window.left,
                    right = window.right,
                    visible = window.visible_width(),
                    "preview window moved"
                );
                DragOutcome::Updated(window)
            }
            None => {
                trace!(side = ?session.side, delta = input.delta(), "preview drag rejected");
                DragOutcome::Rejected
            }
        }
    }

    /// Ends the active drag. Returns `true` when a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            debug!(
                left = self.window.left,
                right = self.window.right,
                "preview drag ended"
            );
        }
        ended
    }

    /// Rescales the fillers proportionally to a new strip width.
    ///
    /// Cancels any drag in progress since its origin no longer matches the strip.
    pub fn resize(&mut self, width: f64) -> ViewWindow {
        if !width.is_finite() || width <= 0.0 {
            return self.window;
        }
        let ratio = if self.window.width > 0.0 {
            width / self.window.width
        } else {
            1.0
        };
        let resized = ViewWindow {
            left: self.window.left * ratio,
            right: self.window.right * ratio,
            width,
        };
        self.session = None;
        self.window = self.enforce_min_width(resized);
        self.window
    }

    fn enforce_min_width(&self, window: ViewWindow) -> ViewWindow {
        let mut window = ViewWindow {
            left: window.left.max(0.0),
            right: window.right.max(0.0),
            ..window
        };
        let missing = self.min_width.min(window.width) - window.visible_width();
        if missing > 0.0 {
            let from_left = missing.min(window.left);
            window.left -= from_left;
            window.right = (window.right - (missing - from_left)).max(0.0);
        }
        window
    }
}
