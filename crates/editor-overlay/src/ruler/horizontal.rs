//! Horizontal ruler: a tick strip along the top edge of the page with a vertical caret guide.

use crate::caret::{self, Axis};
use crate::config::{RulerStyle, TickSpacing};
use crate::geometry::{self, ViewportGeometry};
use crate::host::{DocumentView, Rect, RenderSurface};
use crate::ruler::{
    BackingStore, DrawCommand, Point, RulerFrame, TextAlign, TextBaseline, device_scale, paint,
    tick_color, tick_len,
};
use crate::ticks::{self, LabelRule, Tick, TickIter};

/// Horizontal ruler renderer.
///
/// Only the backing-buffer size is kept between redraws.
#[derive(Debug, Clone)]
pub struct HorizontalRuler {
    style: RulerStyle,
    spacing: TickSpacing,
    backing: BackingStore,
}

impl HorizontalRuler {
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

    /// Ticks covering the page plus the scroll margin on both sides, clipped to a surface
    /// `css_width` wide.
    pub fn ticks(&self, geometry: &ViewportGeometry, css_width: f64) -> Vec<Tick> {
        let low = geometry.origin_x.max(0.0);
        let high = geometry.page_right().min(css_width);
        let range = ticks::visible_range(low, high, &self.spacing);
        TickIter::new(
            range,
            geometry.origin_x,
            geometry.page_width,
            LabelRule::MinorUnits,
            &self.spacing,
        )
        .collect()
    }

    /// Compute a full frame for a surface `css_width` wide.
    pub fn layout(
        &self,
        geometry: &ViewportGeometry,
        caret: Option<f64>,
        css_width: f64,
    ) -> RulerFrame {
        let style = &self.style;
        let height = style.thickness;
        let ticks = self.ticks(geometry, css_width);

        let mut commands = Vec::with_capacity(ticks.len() + 8);
        commands.push(DrawCommand::Clear {
            width: css_width,
            height,
        });
        commands.push(DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, css_width, height),
            color: style.background,
        });
        commands.push(DrawCommand::Line {
            from: Point::new(0.0, height - 0.5),
            to: Point::new(css_width, height - 0.5),
            color: style.border,
        });

        let mut font_set = false;
        for tick in &ticks {
            let x = tick.coordinate as f64;
            commands.push(DrawCommand::Line {
                from: Point::new(x, height),
                to: Point::new(x, height - tick_len(style, tick.tier)),
                color: tick_color(style, tick.inside_page),
            });

            if let Some(label) = tick.label {
                if !font_set {
                    commands.push(DrawCommand::SetFont(style.label_font.clone()));
                    font_set = true;
                }
                commands.push(DrawCommand::Text {
                    text: label.to_string(),
                    at: Point::new(x, style.label_baseline),
                    align: TextAlign::Center,
                    baseline: TextBaseline::Alphabetic,
                    color: style.label,
                });
            }
        }

        let caret = caret.filter(|x| x.is_finite());
        if let Some(x) = caret {
            commands.push(DrawCommand::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, height),
                color: style.caret,
            });
        }

        RulerFrame {
            css_width,
            css_height: height,
            ticks,
            caret,
            commands,
        }
    }

    /// Resolve geometry and caret from the view, then redraw `surface`.
    pub fn draw(&mut self, view: &dyn DocumentView, surface: &mut dyn RenderSurface) -> RulerFrame {
        let scale = device_scale(view.device_pixel_ratio());
        let css_width = surface.client_width().max(0.0);
        self.backing.sync(surface, css_width, self.style.thickness, scale);

        let bounds = surface.bounds();
        let geometry = geometry::resolve(view, bounds);
        let caret = caret::track(view, view.selection_head(), bounds, Axis::Horizontal);

        let frame = self.layout(&geometry, caret, css_width);
        log::trace!(
            "horizontal ruler: {} ticks, origin {:.1}, caret {:?}",
            frame.ticks.len(),
            geometry.origin_x,
            frame.caret
        );
        paint(&frame, surface, scale);
        frame
    }
}

impl Default for HorizontalRuler {
    fn default() -> Self {
        Self::new(RulerStyle::default(), TickSpacing::default())
    }
}
