//! Cell-center to cell-edge coordinate conversion.

use crate::error::{HovmollerError, Result};

/// Derive cell edges from cell centers.
///
/// Every center is shifted back by half the first spacing, and one extra
/// trailing edge is appended by extrapolating with the last spacing. Given
/// `n` centers the result has `n + 1` edges, and for monotone input center
/// `i` lies between `edges[i]` and `edges[i + 1]`.
///
/// Mesh rendering consumes these edges: each data value colors the
/// rectangular cell its center represents.
pub fn cell_edges(centers: &[f64]) -> Result<Vec<f64>> {
    if centers.len() < 2 {
        return Err(HovmollerError::Render(format!(
            "need at least two coordinate values to derive cell edges, got {}",
            centers.len()
        )));
    }

    let n = centers.len();
    let half_step = (centers[1] - centers[0]) / 2.0;
    let last_step = centers[n - 1] - centers[n - 2];

    let mut edges = Vec::with_capacity(n + 1);
    for &c in centers {
        edges.push(c - half_step);
    }
    edges.push(centers[n - 1] + last_step - half_step);
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_depth_centers() {
        let edges = cell_edges(&[-1.0, -3.0, -5.0]).unwrap();
        assert_eq!(edges, vec![0.0, -2.0, -4.0, -6.0]);
    }

    #[test]
    fn edge_count_is_centers_plus_one() {
        let centers: Vec<f64> = (0..48).map(|i| i as f64 * 3600.0).collect();
        let edges = cell_edges(&centers).unwrap();
        assert_eq!(edges.len(), centers.len() + 1);
    }

    #[test]
    fn centers_lie_between_their_edges() {
        let centers = [0.5, 1.5, 2.5, 4.0];
        let edges = cell_edges(&centers).unwrap();
        for (i, &c) in centers.iter().enumerate() {
            let (lo, hi) = (edges[i].min(edges[i + 1]), edges[i].max(edges[i + 1]));
            assert!(lo < c && c < hi, "center {} not in ({}, {})", c, lo, hi);
        }
    }

    #[test]
    fn trailing_edge_uses_last_spacing() {
        // Uneven tail: last spacing is 3, first spacing is 1.
        let centers = [0.0, 1.0, 2.0, 5.0];
        let edges = cell_edges(&centers).unwrap();
        assert_eq!(edges[4] - edges[3], 3.0);
    }

    #[test]
    fn too_few_centers_is_an_error() {
        assert!(cell_edges(&[1.0]).is_err());
        assert!(cell_edges(&[]).is_err());
    }
}
