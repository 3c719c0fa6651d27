//! Axis tick placement and formatting.

/// Round tick values covering `[min, max]` at a 1-2-5 step, aiming for
/// roughly `target` ticks.
pub(crate) fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(max > min) || !min.is_finite() || !max.is_finite() {
        return vec![min];
    }
    let raw_step = (max - min) / target.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    } * magnitude;

    let mut ticks = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max + step * 1e-9 {
        // Snap near-zero steps accumulated from repeated addition.
        ticks.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
        v += step;
    }
    ticks
}

/// Compact label for a tick value.
pub(crate) fn format_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e9 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.3}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_range_in_fives() {
        let ticks = nice_ticks(0.0, 35.0, 8);
        assert_eq!(ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
    }

    #[test]
    fn negative_depth_range() {
        let ticks = nice_ticks(-48.0, 0.0, 5);
        assert_eq!(ticks, vec![-40.0, -30.0, -20.0, -10.0, 0.0]);
        assert!(ticks.iter().all(|t| *t >= -48.0 && *t <= 0.0));
    }

    #[test]
    fn degenerate_range_yields_one_tick() {
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(5.0), "5");
        assert_eq!(format_tick(-20.0), "-20");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(1.5), "1.5");
    }
}
