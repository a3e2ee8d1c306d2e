//! Progress ring geometry and its SVG rendering.

use crate::digits::to_persian_digits;
use std::f64::consts::PI;
use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    pub stroke: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            radius: 120.0,
            stroke: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingColors<'a> {
    pub progress: &'a str,
    pub track: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingFrame {
    pub progress: f64,
    pub normalized_radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
}

/// Fraction of the target reached, saturating at a full ring.
pub fn progress(count: u64, target: NonZeroU32) -> f64 {
    (count as f64 / f64::from(target.get())).min(1.0)
}

impl RingFrame {
    pub fn compute(count: u64, target: NonZeroU32, geometry: RingGeometry) -> Self {
        let normalized_radius = geometry.radius - geometry.stroke * 2.0;
        let circumference = normalized_radius * 2.0 * PI;
        let progress = progress(count, target);
        Self {
            progress,
            normalized_radius,
            circumference,
            dash_offset: circumference - progress * circumference,
        }
    }
}

pub fn render_ring(
    count: u64,
    target: NonZeroU32,
    geometry: RingGeometry,
    colors: RingColors<'_>,
) -> String {
    let frame = RingFrame::compute(count, target, geometry);
    let size = geometry.radius * 2.0;
    let r = geometry.radius;
    format!(
        r#"<div class="ring" style="width:{size}px;height:{size}px">
  <svg height="{size}" width="{size}" style="transform:rotate(-90deg)">
    <circle stroke="{track}" stroke-width="{stroke}" fill="transparent" r="{nr:.2}" cx="{r}" cy="{r}" />
    <circle class="ring-arc" data-circumference="{c:.2}" stroke="{arc}" stroke-width="{stroke}" stroke-dasharray="{c:.2} {c:.2}" style="stroke-dashoffset:{offset:.2}" stroke-linecap="round" fill="transparent" r="{nr:.2}" cx="{r}" cy="{r}" />
  </svg>
  <div class="ring-label" style="color:{text}">
    <span class="ring-count">{count_digits}</span>
    <span class="ring-target">هدف: {target_digits}</span>
  </div>
</div>"#,
        track = colors.track,
        arc = colors.progress,
        text = colors.text,
        stroke = geometry.stroke,
        nr = frame.normalized_radius,
        c = frame.circumference,
        offset = frame.dash_offset,
        count_digits = to_persian_digits(count),
        target_digits = to_persian_digits(target),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        for t in [1, 14, 34, 100, 14_000] {
            for count in [0, 1, 13, 33, 99, 100, 101, 20_000] {
                let p = progress(count, target(t));
                assert!((0.0..=1.0).contains(&p), "count={count} target={t} p={p}");
                if count >= u64::from(t) {
                    assert_eq!(p, 1.0);
                }
            }
        }
    }

    #[test]
    fn offset_shrinks_as_count_grows() {
        let geometry = RingGeometry::default();
        let empty = RingFrame::compute(0, target(100), geometry);
        let half = RingFrame::compute(50, target(100), geometry);
        let full = RingFrame::compute(250, target(100), geometry);

        assert_eq!(empty.normalized_radius, 90.0);
        assert!((empty.circumference - 180.0 * PI).abs() < 1e-9);
        assert!((empty.dash_offset - empty.circumference).abs() < 1e-9);
        assert!((half.dash_offset - empty.circumference / 2.0).abs() < 1e-9);
        assert_eq!(full.dash_offset, 0.0);
    }

    #[test]
    fn rendered_ring_shows_localized_digits() {
        let colors = RingColors {
            progress: "#f59e0b",
            track: "#334155",
            text: "#f59e0b",
        };
        let svg = render_ring(42, target(100), RingGeometry::default(), colors);
        assert!(svg.contains("۴۲"));
        assert!(svg.contains("هدف: ۱۰۰"));
        assert!(svg.contains("stroke=\"#f59e0b\""));
    }
}
