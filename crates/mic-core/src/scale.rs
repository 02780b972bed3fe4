// File: crates/mic-core/src/scale.rs
// Summary: Value (X) and species band (Y) scale transforms for horizontal bar charts.

use crate::axis::{Axis, ScaleKind};

/// Horizontal value scale mapping an axis domain onto [left, right] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub left_px: f32,
    pub right_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn new_linear(left_px: f32, right_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { left_px, right_px, vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn new_log10(left_px: f32, right_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        // Ensure strictly positive range for log scale
        let eps = 1e-12;
        vmin = if vmin <= eps { eps } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        Self { left_px, right_px, vmin, vmax, log: true, log_min: vmin.log10(), log_max: vmax.log10() }
    }

    pub fn for_axis(axis: &Axis, left_px: f32, right_px: f32) -> Self {
        match axis.kind {
            ScaleKind::Linear => Self::new_linear(left_px, right_px, axis.min, axis.max),
            ScaleKind::Log10 => Self::new_log10(left_px, right_px, axis.min, axis.max),
        }
    }

    /// Pixel for `v`, clamped to the plot.
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let frac = if self.log {
            let span = (self.log_max - self.log_min).max(1e-12);
            (v.max(1e-12).log10() - self.log_min) / span
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            (v - self.vmin) / span
        };
        self.left_px + frac.clamp(0.0, 1.0) as f32 * (self.right_px - self.left_px)
    }

    /// Pixel bars grow from: zero on a linear scale, the left edge on log10.
    #[inline]
    pub fn baseline_px(&self) -> f32 {
        if self.log { self.left_px } else { self.to_px(0.0) }
    }
}

/// Vertical band scale: one row per species, sub-bands per antibiotic.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub rows: usize,
    pub groups: usize,
    /// Fraction of a row left empty between rows.
    pub padding: f32,
}

impl BandScale {
    pub fn new(top_px: f32, bottom_px: f32, rows: usize, groups: usize) -> Self {
        Self { top_px, bottom_px, rows, groups: groups.max(1), padding: 0.2 }
    }

    #[inline]
    pub fn row_height(&self) -> f32 {
        (self.bottom_px - self.top_px) / self.rows.max(1) as f32
    }

    #[inline]
    pub fn row_center(&self, row: usize) -> f32 {
        self.top_px + (row as f32 + 0.5) * self.row_height()
    }

    /// (top, bottom) pixels of sub-band `group` inside `row`.
    pub fn bar_span(&self, row: usize, group: usize) -> (f32, f32) {
        let h = self.row_height();
        let inner = h * (1.0 - self.padding);
        let bar = inner / self.groups as f32;
        let top = self.top_px + row as f32 * h + (h - inner) * 0.5 + group as f32 * bar;
        (top, top + bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_scale_maps_decades_evenly() {
        let s = ValueScale::new_log10(0.0, 600.0, 0.001, 1000.0);
        assert!((s.to_px(0.001) - 0.0).abs() < 1e-3);
        assert!((s.to_px(1.0) - 300.0).abs() < 1e-3);
        assert!((s.to_px(1000.0) - 600.0).abs() < 1e-3);
    }

    #[test]
    fn values_outside_domain_are_clamped() {
        let s = ValueScale::new_linear(10.0, 110.0, 0.0, 10.0);
        assert_eq!(s.to_px(-5.0), 10.0);
        assert_eq!(s.to_px(50.0), 110.0);
    }

    #[test]
    fn linear_bars_grow_from_zero() {
        let s = ValueScale::new_linear(0.0, 100.0, -10.0, 10.0);
        assert!((s.baseline_px() - 50.0).abs() < 1e-3);
        let pos = ValueScale::new_linear(0.0, 100.0, 0.0, 10.0);
        assert_eq!(pos.baseline_px(), 0.0);
    }

    #[test]
    fn log_bars_grow_from_left_edge() {
        let s = ValueScale::new_log10(20.0, 620.0, 0.001, 1000.0);
        assert_eq!(s.baseline_px(), 20.0);
    }

    #[test]
    fn bands_tile_rows() {
        let b = BandScale::new(0.0, 100.0, 4, 3);
        assert_eq!(b.row_height(), 25.0);
        let (t0, _) = b.bar_span(1, 0);
        let (_, b2) = b.bar_span(1, 2);
        assert!(t0 >= 25.0 && b2 <= 50.0);
        assert!((b.row_center(1) - 37.5).abs() < 1e-6);
    }
}
