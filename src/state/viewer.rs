/// Full-screen viewer state
///
/// The viewer is either closed or open on one whiteboard with a zoom scale,
/// a pan offset and an optional drag in progress. All transitions are driven
/// by `ViewerInput`s produced by the UI layer.

use cgmath::{Point2, Vector2, Zero};

use super::data::Whiteboard;
use super::scroll_lock::{PageScroll, ScrollLock};

/// Smallest allowed zoom scale
pub const MIN_SCALE: f32 = 0.5;
/// Largest allowed zoom scale
pub const MAX_SCALE: f32 = 10.0;

/// A zoom step and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    WheelIn,
    WheelOut,
    ButtonIn,
    ButtonOut,
}

impl Zoom {
    /// Multiplier applied to the current scale
    pub fn factor(self) -> f32 {
        match self {
            Zoom::WheelIn => 1.1,
            Zoom::WheelOut => 0.9,
            Zoom::ButtonIn => 1.25,
            Zoom::ButtonOut => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Other,
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Image,
    Controls,
    Background,
}

/// Input events understood by the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerInput {
    Zoom(Zoom),
    Press {
        button: PointerButton,
        at: Point2<f32>,
    },
    Move(Point2<f32>),
    /// Any button released
    Release,
    /// Pointer left the interactive surface
    Leave,
    Reset,
    Click(ClickTarget),
    Escape,
    Close,
}

/// Effect of an input on the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    Updated,
    Closed,
}

/// Pointer and offset captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: Point2<f32>,
    offset: Vector2<f32>,
}

/// An open viewer on one whiteboard
#[derive(Debug)]
pub struct Session {
    board: Whiteboard,
    scale: f32,
    offset: Vector2<f32>,
    drag: Option<DragAnchor>,
    // Page scrolling stays suspended while the session lives
    _scroll: ScrollLock,
}

impl Session {
    fn new(board: Whiteboard, scroll: ScrollLock) -> Self {
        Self {
            board,
            scale: 1.0,
            offset: Vector2::zero(),
            drag: None,
            _scroll: scroll,
        }
    }

    pub fn board(&self) -> &Whiteboard {
        &self.board
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn zoom(&mut self, zoom: Zoom) {
        self.scale = (self.scale * zoom.factor()).clamp(MIN_SCALE, MAX_SCALE);
    }

    fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vector2::zero();
    }
}

#[derive(Debug, Default)]
pub enum Viewer {
    #[default]
    Closed,
    Open(Session),
}

impl Viewer {
    /// Open the viewer on `board`, suspending page scrolling
    pub fn open(&mut self, board: Whiteboard, page: &PageScroll) {
        // release any previous lock before taking a new one
        *self = Viewer::Closed;
        *self = Viewer::Open(Session::new(board, page.lock()));
    }

    pub fn close(&mut self) {
        *self = Viewer::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Viewer::Open(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Viewer::Open(session) => Some(session),
            Viewer::Closed => None,
        }
    }

    /// Whether the viewer is open on `room_id`; late asset loads for any
    /// other board are dropped
    pub fn is_showing(&self, room_id: &str) -> bool {
        self.session()
            .map(|s| s.board.room_id == room_id)
            .unwrap_or(false)
    }

    /// Apply one input
    pub fn apply(&mut self, input: ViewerInput) -> Transition {
        let Viewer::Open(session) = self else {
            return Transition::Ignored;
        };

        match input {
            ViewerInput::Zoom(zoom) => session.zoom(zoom),
            ViewerInput::Press { button, at } => {
                if button != PointerButton::Primary {
                    return Transition::Ignored;
                }
                session.drag = Some(DragAnchor {
                    pointer: at,
                    offset: session.offset,
                });
            }
            ViewerInput::Move(at) => {
                let Some(anchor) = session.drag else {
                    return Transition::Ignored;
                };
                // Always relative to the drag start so rounding never drifts
                session.offset = anchor.offset + (at - anchor.pointer);
            }
            ViewerInput::Release | ViewerInput::Leave => {
                if session.drag.take().is_none() {
                    return Transition::Ignored;
                }
            }
            ViewerInput::Reset => session.reset(),
            ViewerInput::Click(ClickTarget::Image | ClickTarget::Controls) => {
                return Transition::Ignored;
            }
            ViewerInput::Click(ClickTarget::Background)
            | ViewerInput::Escape
            | ViewerInput::Close => {
                self.close();
                return Transition::Closed;
            }
        }

        Transition::Updated
    }
}
