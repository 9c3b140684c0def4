/// Contour extraction over a gradient map
///
/// Strong-edge pixels are grouped into 8-connected components by a
/// stack-based flood fill. A shared `visited` bitmap makes every pixel join
/// at most one contour, bounding total work by the pixel count.
use super::edges::GradientMap;
use super::shape::BoundingBox;
use crate::assert_invariant;
use serde::{Deserialize, Serialize};

/// Neighbor offsets in push order. The last one pushed is explored first.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// One connected component of strong-edge pixels.
///
/// Point order is traversal order; only membership carries meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<(u32, u32)>,
}

impl Contour {
    pub fn new(points: Vec<(u32, u32)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(u32, u32)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
    }
}

/// Find every contour of pixels whose magnitude exceeds `threshold`.
///
/// Seeds are taken in row-major order over the interior pixels.
pub fn find_contours(edges: &GradientMap, threshold: f32) -> Vec<Contour> {
    let (width, height) = (edges.width(), edges.height());
    let mut visited = vec![false; width * height];
    let mut contours = Vec::new();

    if width < 3 || height < 3 {
        return contours;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            if edges.get(x, y) > threshold && !visited[idx] {
                contours.push(trace_contour(edges, &mut visited, x, y, threshold));
            }
        }
    }

    assert_invariant!(
        contours.iter().map(Contour::len).sum::<usize>()
            == visited.iter().filter(|&&v| v).count(),
        "Each visited pixel belongs to exactly one contour",
        "quality::contour"
    );

    log::debug!(
        "Contours: {} found over {}x{} gradient map",
        contours.len(),
        width,
        height
    );
    contours
}

/// Flood fill from `(start_x, start_y)`.
///
/// In-bounds neighbors are pushed without looking at them; a popped pixel
/// that is already visited or not a strong edge is skipped.
fn trace_contour(
    edges: &GradientMap,
    visited: &mut [bool],
    start_x: usize,
    start_y: usize,
    threshold: f32,
) -> Contour {
    let (width, height) = (edges.width() as i64, edges.height() as i64);
    let mut points = Vec::new();
    let mut stack = vec![(start_x as i64, start_y as i64)];

    while let Some((x, y)) = stack.pop() {
        let idx = (y * width + x) as usize;
        if visited[idx] || edges.get(x as usize, y as usize) <= threshold {
            continue;
        }

        visited[idx] = true;
        points.push((x as u32, y as u32));

        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if nx >= 0 && nx < width && ny >= 0 && ny < height {
                stack.push((nx, ny));
            }
        }
    }

    Contour::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Gradient map from an ASCII sketch: `#` is a strong edge.
    fn sketch(rows: &[&str]) -> GradientMap {
        let height = rows.len();
        let width = rows[0].len();
        let magnitudes = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| if c == '#' { 100.0 } else { 0.0 }))
            .collect();
        GradientMap::from_magnitudes(width, height, magnitudes).unwrap()
    }

    fn as_set(contour: &Contour) -> HashSet<(u32, u32)> {
        contour.points().iter().copied().collect()
    }

    #[test]
    fn test_empty_map_has_no_contours() {
        let map = sketch(&[".....", ".....", "....."]);
        assert!(find_contours(&map, 50.0).is_empty());
    }

    #[test]
    fn test_diagonal_pixels_are_connected() {
        let map = sketch(&[
            "......", //
            ".#....", //
            "..#...", //
            "...#..", //
            "......",
        ]);
        let contours = find_contours(&map, 50.0);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            as_set(&contours[0]),
            HashSet::from([(1, 1), (2, 2), (3, 3)])
        );
    }

    #[test]
    fn test_separate_components() {
        let map = sketch(&[
            ".......", //
            ".##..#.", //
            ".#...#.", //
            ".....#.", //
            ".......",
        ]);
        let contours = find_contours(&map, 50.0);
        assert_eq!(contours.len(), 2);
        assert_eq!(as_set(&contours[0]), HashSet::from([(1, 1), (2, 1), (1, 2)]));
        assert_eq!(as_set(&contours[1]), HashSet::from([(5, 1), (5, 2), (5, 3)]));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut magnitudes = vec![0.0; 9];
        magnitudes[4] = 50.0;
        let map = GradientMap::from_magnitudes(3, 3, magnitudes).unwrap();
        assert!(find_contours(&map, 50.0).is_empty());
        assert_eq!(find_contours(&map, 49.9).len(), 1);
    }

    #[test]
    fn test_seeds_ignore_border_but_fill_reaches_it() {
        // Only interior pixels seed a contour; the fill itself may step onto
        // strong border pixels of a hand-made map.
        let map = sketch(&[
            "#....", //
            ".#...", //
            ".....", //
            "....#",
        ]);
        let contours = find_contours(&map, 50.0);
        assert_eq!(contours.len(), 1);
        assert_eq!(as_set(&contours[0]), HashSet::from([(1, 1), (0, 0)]));
    }

    #[test]
    fn test_ring_is_single_contour() {
        let map = sketch(&[
            ".........", //
            ".#######.", //
            ".#.....#.", //
            ".#.....#.", //
            ".#######.", //
            ".........",
        ]);
        let contours = find_contours(&map, 50.0);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].len(), 7 * 2 + 2 * 2);

        let bbox = contours[0].bounding_box().unwrap();
        assert_eq!((bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y), (1, 7, 1, 4));
    }
}
