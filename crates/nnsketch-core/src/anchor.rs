//! Connection anchor placement along a node's vertical edge.
//!
//! Anchors are the points where connection curves attach to a node. A node
//! with one anchor on a side attaches everything at its vertical middle; a
//! node with several anchors spreads them evenly from the top edge to the
//! bottom edge, both included.

/// Computes `count` evenly distributed offsets along an edge.
///
/// - `count == 0` gives no anchors.
/// - `count == 1` gives the midpoint `base_offset + edge_length / 2`.
/// - `count > 1` gives `base_offset + i * edge_length / (count - 1)`; the first
///   value is exactly `base_offset` and the last exactly `base_offset + edge_length`.
///
/// # Examples
///
/// ```
/// # use nnsketch_core::anchor::anchor_offsets;
/// assert_eq!(anchor_offsets(3, 50.0, 100.0), vec![100.0, 125.0, 150.0]);
/// assert_eq!(anchor_offsets(1, 50.0, 100.0), vec![125.0]);
/// assert!(anchor_offsets(0, 50.0, 100.0).is_empty());
/// ```
pub fn anchor_offsets(count: usize, edge_length: f32, base_offset: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![base_offset + edge_length / 2.0],
        _ => {
            let last = count - 1;
            let spacing = edge_length / last as f32;
            (0..count)
                .map(|i| match i {
                    0 => base_offset,
                    i if i == last => base_offset + edge_length,
                    i => base_offset + i as f32 * spacing,
                })
                .collect()
        }
    }
}
