//! Ruler rendering.
//!
//! A ruler redraw is split in two steps:
//!
//! 1. `layout` - a pure function from [`ViewportGeometry`](crate::ViewportGeometry), the caret
//!    coordinate and the surface size to a [`RulerFrame`] (tick list + draw commands);
//! 2. [`paint`] - replaying the frame's commands onto a [`RenderSurface`].
//!
//! Frames are never diffed against each other: every trigger produces a full redraw.

pub mod horizontal;
pub mod vertical;

pub use horizontal::HorizontalRuler;
pub use vertical::VerticalRuler;

use crate::config::{Color, RulerStyle};
use crate::host::{Rect, RenderSurface};
use crate::ticks::{Tick, TickTier};

/// A point in CSS pixels on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal anchoring of a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Vertical anchoring of a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor is on the alphabetic baseline.
    Alphabetic,
    /// The anchor is at the vertical middle of the em box.
    Middle,
}

/// A single painting primitive, in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear {
        /// Surface width.
        width: f64,
        /// Surface height.
        height: f64,
    },
    /// Fill a rectangle.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill colour.
        color: Color,
    },
    /// Stroke a 1px line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke colour.
        color: Color,
    },
    /// Select the font used by following `Text` commands.
    SetFont(String),
    /// Fill a single line of text.
    Text {
        /// The text.
        text: String,
        /// Anchor point.
        at: Point,
        /// Horizontal anchoring.
        align: TextAlign,
        /// Vertical anchoring.
        baseline: TextBaseline,
        /// Fill colour.
        color: Color,
    },
}

/// Everything a ruler needs to put on screen for one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerFrame {
    /// Surface width in CSS pixels.
    pub css_width: f64,
    /// Surface height in CSS pixels.
    pub css_height: f64,
    /// Ticks in page space, in drawing order.
    pub ticks: Vec<Tick>,
    /// Caret guide coordinate on the surface, if drawn.
    pub caret: Option<f64>,
    /// Draw commands in painting order.
    pub commands: Vec<DrawCommand>,
}

/// Replay a frame onto `surface`.
pub fn paint(frame: &RulerFrame, surface: &mut dyn RenderSurface, scale: f64) {
    surface.begin_frame(scale);
    for command in &frame.commands {
        surface.draw(command);
    }
}

pub(crate) fn tick_len(style: &RulerStyle, tier: TickTier) -> f64 {
    match tier {
        TickTier::Major => style.major_tick_len,
        TickTier::Labeled => style.labeled_tick_len,
        TickTier::Minor => style.minor_tick_len,
    }
}

pub(crate) fn tick_color(style: &RulerStyle, inside_page: bool) -> Color {
    if inside_page {
        style.tick_inside
    } else {
        style.tick_outside
    }
}

/// Normalize a host-reported device pixel ratio (at least 1, finite).
pub fn device_scale(ratio: f64) -> f64 {
    if ratio.is_finite() { ratio.max(1.0) } else { 1.0 }
}

/// Tracks the size of a surface's backing pixel buffer.
///
/// The buffer is only reallocated when its device-pixel dimensions actually change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackingStore {
    width: u32,
    height: u32,
}

impl BackingStore {
    /// Current buffer size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Make the buffer match `css_width x css_height` at `scale`.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn sync(
        &mut self,
        surface: &mut dyn RenderSurface,
        css_width: f64,
        css_height: f64,
        scale: f64,
    ) -> bool {
        let width = device_pixels(css_width, scale);
        let height = device_pixels(css_height, scale);
        if (width, height) == (self.width, self.height) {
            return false;
        }

        log::debug!(
            "ruler buffer {}x{} -> {}x{} (scale {scale})",
            self.width,
            self.height,
            width,
            height
        );
        surface.resize_buffer(width, height);
        self.width = width;
        self.height = height;
        true
    }
}

fn device_pixels(css: f64, scale: f64) -> u32 {
    let value = (css * scale).round();
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Surface {
        resizes: Vec<(u32, u32)>,
        scale: Option<f64>,
        drawn: usize,
    }

    impl RenderSurface for Surface {
        fn bounds(&self) -> Rect {
            Rect::default()
        }
        fn client_width(&self) -> f64 {
            0.0
        }
        fn client_height(&self) -> f64 {
            0.0
        }
        fn set_css_height(&mut self, _height: f64) {}
        fn resize_buffer(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }
        fn begin_frame(&mut self, scale: f64) {
            self.scale = Some(scale);
        }
        fn draw(&mut self, _command: &DrawCommand) {
            self.drawn += 1;
        }
    }

    #[test]
    fn test_backing_store_resizes_only_on_change() {
        let mut surface = Surface::default();
        let mut store = BackingStore::default();

        assert!(store.sync(&mut surface, 800.0, 28.0, 2.0));
        assert!(!store.sync(&mut surface, 800.0, 28.0, 2.0));
        assert!(store.sync(&mut surface, 801.0, 28.0, 2.0));
        assert!(store.sync(&mut surface, 801.0, 28.0, 1.0));

        assert_eq!(surface.resizes, vec![(1600, 56), (1602, 56), (801, 28)]);
        assert_eq!(store.size(), (801, 28));
    }

    #[test]
    fn test_device_scale_normalization() {
        assert_eq!(device_scale(0.5), 1.0);
        assert_eq!(device_scale(f64::NAN), 1.0);
        assert_eq!(device_scale(2.5), 2.5);
    }

    #[test]
    fn test_paint_replays_commands() {
        let frame = RulerFrame {
            css_width: 10.0,
            css_height: 10.0,
            ticks: Vec::new(),
            caret: None,
            commands: vec![
                DrawCommand::Clear {
                    width: 10.0,
                    height: 10.0,
                },
                DrawCommand::SetFont("10px serif".to_string()),
            ],
        };
        let mut surface = Surface::default();
        paint(&frame, &mut surface, 2.0);
        assert_eq!(surface.scale, Some(2.0));
        assert_eq!(surface.drawn, 2);
    }
}
