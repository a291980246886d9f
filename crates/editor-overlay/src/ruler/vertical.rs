//! Vertical ruler: a tick strip along the left edge of the page with a horizontal caret guide.
//!
//! Unlike the horizontal ruler, the visible range follows the scroll offset of the nearest
//! scrollable ancestor. Ticks live in document space; the on-surface Y of a tick is its
//! document Y minus the scroll offset.

use crate::caret::{self, Axis};
use crate::config::{RulerStyle, TickSpacing};
use crate::geometry::{self, ViewportGeometry, finite_or_zero};
use crate::host::{DocumentView, Rect, RenderSurface};
use crate::ruler::{
    BackingStore, DrawCommand, Point, RulerFrame, TextAlign, TextBaseline, device_scale, paint,
    tick_color, tick_len,
};
use crate::ticks::{self, LabelRule, Tick, TickIter};

/// Vertical ruler renderer.
#[derive(Debug, Clone)]
pub struct VerticalRuler {
    style: RulerStyle,
    spacing: TickSpacing,
    backing: BackingStore,
}

impl VerticalRuler {
    /// Create a ruler with the given style and tick spacing.
    pub fn new(style: RulerStyle, spacing: TickSpacing) -> Self {
        Self {
            style,
            spacing,
            backing: BackingStore::default(),
        }
    }

    /// Ruler style.
    pub fn style(&self) -> &RulerStyle {
        &self.style
    }

    /// Backing-buffer state.
    pub fn backing(&self) -> &BackingStore {
        &self.backing
    }

    /// Ticks for a surface `css_height` tall, in document space.
    pub fn ticks(&self, geometry: &ViewportGeometry, css_height: f64) -> Vec<Tick> {
        let top = geometry.scroll_offset + geometry.origin_y;
        let range = ticks::visible_range(top, top + css_height, &self.spacing);
        TickIter::new(
            range,
            geometry.origin_y,
            geometry.page_height,
            LabelRule::Pixels,
            &self.spacing,
        )
        .collect()
    }

    /// Compute a full frame for a surface `css_height` tall.
    pub fn layout(
        &self,
        geometry: &ViewportGeometry,
        caret: Option<f64>,
        css_height: f64,
    ) -> RulerFrame {
        let style = &self.style;
        let width = style.thickness;
        let scroll = geometry.scroll_offset;
        let ticks = self.ticks(geometry, css_height);

        let mut commands = Vec::with_capacity(ticks.len() + 8);
        commands.push(DrawCommand::Clear {
            width,
            height: css_height,
        });
        commands.push(DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, width, css_height),
            color: style.background,
        });
        commands.push(DrawCommand::Line {
            from: Point::new(width - 0.5, 0.0),
            to: Point::new(width - 0.5, css_height),
            color: style.border,
        });

        let mut font_set = false;
        for tick in &ticks {
            let y = tick.coordinate as f64 - scroll;
            let len = tick_len(style, tick.tier);
            commands.push(DrawCommand::Line {
                from: Point::new(width, y),
                to: Point::new(width - len, y),
                color: tick_color(style, tick.inside_page),
            });

            if let Some(label) = tick.label {
                if !font_set {
                    commands.push(DrawCommand::SetFont(style.label_font.clone()));
                    font_set = true;
                }
                commands.push(DrawCommand::Text {
                    text: label.to_string(),
                    at: Point::new(width - len - style.label_gap, y),
                    align: TextAlign::Right,
                    baseline: TextBaseline::Middle,
                    color: style.label,
                });
            }
        }

        let caret = caret.filter(|y| y.is_finite());
        if let Some(y) = caret {
            commands.push(DrawCommand::Line {
                from: Point::new(0.0, y),
                to: Point::new(width, y),
                color: style.caret,
            });
        }

        RulerFrame {
            css_width: width,
            css_height,
            ticks,
            caret,
            commands,
        }
    }

    /// Match the surface's CSS height to the scroll container (or the window).
    ///
    /// Pagination can change the total height, so this must run before
    /// [`draw`](Self::draw) whenever content changes.
    pub fn sync_height(&self, view: &dyn DocumentView, surface: &mut dyn RenderSurface) -> f64 {
        let height = finite_or_zero(view.effective_scroll().client_height).max(0.0);
        surface.set_css_height(height);
        log::trace!("vertical ruler height synced to {height:.1}");
        height
    }

    /// Resynchronize the height, then redraw.
    pub fn sync_and_draw(
        &mut self,
        view: &dyn DocumentView,
        surface: &mut dyn RenderSurface,
    ) -> RulerFrame {
        self.sync_height(view, surface);
        self.draw(view, surface)
    }

    /// Resolve geometry and caret from the view, then redraw `surface`.
    pub fn draw(&mut self, view: &dyn DocumentView, surface: &mut dyn RenderSurface) -> RulerFrame {
        let scale = device_scale(view.device_pixel_ratio());
        let css_height = finite_or_zero(surface.client_height()).max(0.0);
        self.backing.sync(surface, self.style.thickness, css_height, scale);

        let bounds = surface.bounds();
        let geometry = geometry::resolve(view, bounds);
        let caret = caret::track(view, view.selection_head(), bounds, Axis::Vertical);

        let frame = self.layout(&geometry, caret, css_height);
        log::trace!(
            "vertical ruler: {} ticks, scroll {:.1}, caret {:?}",
            frame.ticks.len(),
            geometry.scroll_offset,
            frame.caret
        );
        paint(&frame, surface, scale);
        frame
    }
}

impl Default for VerticalRuler {
    fn default() -> Self {
        Self::new(RulerStyle::default(), TickSpacing::default())
    }
}
