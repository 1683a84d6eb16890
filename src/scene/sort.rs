/// Anything with a camera-space depth (`rotatedZ`).
pub trait Depth {
    fn depth(&self) -> f64;
}

/// Painter's order: stable ascending sort by camera-space depth, so equal
/// depths keep their insertion order. NaN depths sort first.
pub fn depth_sort<T: Depth>(items: &mut [T]) {
    items.sort_by(|a, b| sort_key(a.depth()).total_cmp(&sort_key(b.depth())));
}

fn sort_key(depth: f64) -> f64 {
    if depth.is_nan() {
        f64::NEG_INFINITY
    } else {
        // folds -0.0 into +0.0 so signed zeros tie
        depth + 0.0
    }
}
