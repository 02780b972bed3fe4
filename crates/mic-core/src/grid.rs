// File: crates/mic-core/src/grid.rs
// Summary: Tick layout helpers for linear and log10 axes.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Powers of ten from `10^lo` to `10^hi` inclusive.
pub fn decades(lo: i32, hi: i32) -> Vec<f64> {
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

/// Compact tick label: `0.001`, `1`, `870`, `1e-5`.
pub fn format_tick(v: f64) -> String {
    if v == 0.0 { return "0".to_string(); }
    let a = v.abs();
    if !(1e-3..1e5).contains(&a) {
        return format!("{:e}", v);
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_ticks() {
        assert_eq!(decades(-1, 1), vec![0.1, 1.0, 10.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(0.001), "0.001");
        assert_eq!(format_tick(1.0), "1");
        assert_eq!(format_tick(870.0), "870");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(1e-5), "1e-5");
    }
}
