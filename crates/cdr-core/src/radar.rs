//! Radar chart geometry for the four dimension scores.
//!
//! Axis `i` sits at angle `i·π/2 − π/2`: the first axis points up and the
//! following ones proceed clockwise in screen coordinates (y grows downward).
//! A score of 3 reaches the chart radius. Values outside 0–3 are not
//! rejected; they extrapolate linearly past (or before) the radius.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Write as _;

use serde::Serialize;

use crate::entities::SubScores;
use crate::enums::{Dimension, MAX_SUB_SCORE};

/// Distance between the radius and the axis label anchors.
pub const LABEL_OFFSET: f64 = 20.0;

/// Number of concentric grid circles (one per score step).
const GRID_STEPS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas size and padding; the radius is what is left once padding is removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarLayout {
    pub size: f64,
    pub padding: f64,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            size: 300.0,
            padding: 50.0,
        }
    }
}

impl RadarLayout {
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.size - self.padding * 2.0) / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.size / 2.0,
            y: self.size / 2.0,
        }
    }
}

/// Where an axis label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub dimension: Dimension,
    pub point: Point,
}

/// Computed polygon and label positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarGeometry {
    pub layout: RadarLayout,
    pub center: Point,
    pub radius: f64,
    /// Polygon vertices in axis order, first vertex repeated at the end.
    pub vertices: Vec<Point>,
    pub label_anchors: [LabelAnchor; 4],
}

fn axis_angle(index: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let i = index as f64;
    i * 2.0 * PI / 4.0 - FRAC_PI_2
}

impl RadarGeometry {
    /// Compute the geometry for raw per-axis values (Dimension order).
    #[must_use]
    pub fn compute(values: [f64; 4], layout: RadarLayout) -> Self {
        let center = layout.center();
        let radius = layout.radius();
        let max = f64::from(MAX_SUB_SCORE);

        let mut vertices = Vec::with_capacity(5);
        for (index, value) in values.iter().enumerate() {
            let angle = axis_angle(index);
            let scale = radius * (value / max);
            vertices.push(Point {
                x: center.x + scale * angle.cos(),
                y: center.y + scale * angle.sin(),
            });
        }
        vertices.push(vertices[0]);

        let label_anchors = Dimension::ALL.map(|dimension| {
            let angle = axis_angle(dimension as usize);
            LabelAnchor {
                dimension,
                point: Point {
                    x: center.x + (radius + LABEL_OFFSET) * angle.cos(),
                    y: center.y + (radius + LABEL_OFFSET) * angle.sin(),
                },
            }
        });

        Self {
            layout,
            center,
            radius,
            vertices,
            label_anchors,
        }
    }

    #[must_use]
    pub fn from_scores(scores: &SubScores, layout: RadarLayout) -> Self {
        Self::compute(
            Dimension::ALL.map(|d| f64::from(scores.get(d))),
            layout,
        )
    }

    /// SVG path data for the closed polygon: `M x,y L x,y ... Z`.
    #[must_use]
    pub fn path_data(&self) -> String {
        let open = &self.vertices[..self.vertices.len() - 1];
        let points: Vec<String> = open
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        format!("M {} Z", points.join(" L "))
    }

    /// Render the complete chart: grid circles, dashed axes, filled polygon, labels.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let size = self.layout.size;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" overflow="visible">"#
        );
        svg.push('\n');

        for step in 1..=GRID_STEPS {
            let r = self.radius * f64::from(step) / f64::from(GRID_STEPS);
            let _ = writeln!(
                svg,
                r##"  <circle cx="{:.2}" cy="{:.2}" r="{r:.2}" fill="none" stroke="#e2e8f0" stroke-width="1"/>"##,
                self.center.x, self.center.y
            );
        }

        for anchor in &self.label_anchors {
            let _ = writeln!(
                svg,
                r##"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#cbd5e1" stroke-dasharray="4 2"/>"##,
                self.center.x, self.center.y, anchor.point.x, anchor.point.y
            );
        }

        let _ = writeln!(
            svg,
            r##"  <path d="{}" fill="rgba(79, 70, 229, 0.2)" stroke="#4f46e5" stroke-width="2"/>"##,
            self.path_data()
        );

        for anchor in &self.label_anchors {
            let _ = writeln!(
                svg,
                r##"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="10" fill="#64748b">{}</text>"##,
                anchor.point.x,
                anchor.point.y,
                anchor.dimension.label().to_uppercase()
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}
