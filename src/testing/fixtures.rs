use crate::core::Dataset;
use crate::features::DEFAULT_IMAGE_SIDE;

/// Three-pixel rows whose pixels add up to the given sum.
pub fn sum_rows(samples: &[(f64, i64)]) -> Dataset {
    let rows: Vec<Vec<f64>> = samples
        .iter()
        .map(|&(sum, _)| vec![sum * 0.5, sum * 0.25, sum * 0.25])
        .collect();
    let labels = samples.iter().map(|&(_, label)| label).collect();
    Dataset::from_rows(&rows, labels).expect("fixture rows are well formed")
}

/// A 28x28 image with one full-intensity bar at `position`.
pub fn bar_image(horizontal: bool, position: usize) -> Vec<f64> {
    let side = DEFAULT_IMAGE_SIDE;
    let mut pixels = vec![0.0; side * side];
    for k in 0..side {
        let (r, c) = if horizontal {
            (position, k)
        } else {
            (k, position)
        };
        pixels[r * side + c] = 255.0;
    }
    pixels
}
