//! Region quadtree over screen-space rectangles.
//!
//! Every rendered scatter point registers its pixel bounding box here during
//! the draw pass, and pointer hover resolves against the tree instead of
//! scanning thousands of points. The tree is cleared on each redraw, never
//! updated incrementally.

/// Objects a node holds before it splits.
pub const MAX_OBJECTS: usize = 10;
/// Depth below which nodes stop splitting.
pub const MAX_LEVELS: u8 = 4;

/// Pixel bounding box of a drawn point, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Plot series index.
    pub series: usize,
    /// Data index within the series.
    pub index: usize,
}

impl HitRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64, series: usize, index: usize) -> Self {
        Self {
            x,
            y,
            w,
            h,
            series,
            index,
        }
    }

    /// Closed axis-aligned bounds check.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    level: u8,
    objects: Vec<HitRect>,
    // NE, NW, SW, SE
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::with_level(x, y, w, h, 0)
    }

    fn with_level(x: f64, y: f64, w: f64, h: f64, level: u8) -> Self {
        Self {
            x,
            y,
            w,
            h,
            level,
            objects: Vec::new(),
            children: None,
        }
    }

    /// Drop all rectangles and children, keeping the bounds.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children = None;
    }

    /// Clear and move the root to new bounds (plot area resized).
    pub fn reset(&mut self, x: f64, y: f64, w: f64, h: f64) {
        *self = Self::new(x, y, w, h);
    }

    fn split(&mut self) {
        let (x, y) = (self.x, self.y);
        let (w, h) = (self.w / 2.0, self.h / 2.0);
        let level = self.level + 1;
        self.children = Some(Box::new([
            Self::with_level(x + w, y, w, h, level),
            Self::with_level(x, y, w, h, level),
            Self::with_level(x, y + h, w, h, level),
            Self::with_level(x + w, y + h, w, h, level),
        ]));
    }

    /// Which children a box touches. Edges on a midline count for both sides,
    /// so every box lands in at least one child.
    fn quads(&self, x: f64, y: f64, w: f64, h: f64) -> [bool; 4] {
        let hz_mid = self.x + self.w / 2.0;
        let vt_mid = self.y + self.h / 2.0;
        let start_north = y < vt_mid;
        let start_west = x < hz_mid;
        let end_east = x + w >= hz_mid;
        let end_south = y + h >= vt_mid;
        [
            start_north && end_east,
            start_west && start_north,
            start_west && end_south,
            end_east && end_south,
        ]
    }

    pub fn add(&mut self, rect: HitRect) {
        let mask = self.quads(rect.x, rect.y, rect.w, rect.h);
        if let Some(children) = self.children.as_mut() {
            for (child, touches) in children.iter_mut().zip(mask) {
                if touches {
                    child.add(rect);
                }
            }
            return;
        }

        self.objects.push(rect);
        if self.objects.len() > MAX_OBJECTS && self.level < MAX_LEVELS {
            self.split();
            for object in std::mem::take(&mut self.objects) {
                self.add(object);
            }
        }
    }

    /// First rectangle containing `(px, py)`, if any.
    pub fn hover(&self, px: f64, py: f64) -> Option<&HitRect> {
        if let Some(found) = self.objects.iter().find(|o| o.contains(px, py)) {
            return Some(found);
        }
        let children = self.children.as_ref()?;
        let mask = self.quads(px, py, 0.0, 0.0);
        children
            .iter()
            .zip(mask)
            .filter(|(_, touches)| *touches)
            .find_map(|(child, _)| child.hover(px, py))
    }

    /// Stored entries, counting a rectangle once per leaf it lives in.
    pub fn len(&self) -> usize {
        self.objects.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(Quadtree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the deepest node, the root being 0.
    pub fn depth(&self) -> u8 {
        self.children
            .as_ref()
            .map_or(self.level, |c| c.iter().map(Quadtree::depth).max().unwrap_or(self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// `cols x rows` grid of 8x8 boxes on a 10px pitch.
    fn grid(cols: usize, rows: usize) -> Vec<HitRect> {
        (0..rows)
            .flat_map(|r| {
                (0..cols).map(move |c| {
                    HitRect::new(c as f64 * 10.0, r as f64 * 10.0, 8.0, 8.0, 1, r * cols + c)
                })
            })
            .collect()
    }

    #[test]
    fn test_hover_finds_each_rect() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let rects = grid(10, 10);
        for r in &rects {
            qt.add(*r);
        }
        for r in &rects {
            let hit = qt.hover(r.x + 4.0, r.y + 4.0).copied();
            assert_eq!(hit, Some(*r));
        }
    }

    #[test]
    fn test_hover_in_gap_is_none() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for r in grid(10, 10) {
            qt.add(r);
        }
        assert!(qt.hover(9.0, 9.0).is_none());
        assert!(qt.hover(59.0, 3.0).is_none());
        assert!(qt.hover(150.0, 150.0).is_none());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        let r = HitRect::new(10.0, 10.0, 5.0, 5.0, 2, 7);
        qt.add(r);
        assert_eq!(qt.hover(10.0, 10.0), Some(&r));
        assert_eq!(qt.hover(15.0, 15.0), Some(&r));
        assert!(qt.hover(15.1, 15.0).is_none());
    }

    #[test]
    fn test_split_and_depth_limit() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for r in grid(MAX_OBJECTS + 1, 1) {
            qt.add(r);
        }
        assert!(qt.depth() >= 1);

        // Pile many boxes on one pixel: depth stops growing at MAX_LEVELS
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for i in 0..200 {
            qt.add(HitRect::new(1.0, 1.0, 1.0, 1.0, 1, i));
        }
        assert_eq!(qt.depth(), MAX_LEVELS);
        assert_eq!(qt.hover(1.5, 1.5).map(|r| r.index), Some(0));
    }

    #[test]
    fn test_straddling_rect_found_from_both_sides() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for r in grid(4, 4) {
            qt.add(HitRect::new(r.x + 60.0, r.y + 60.0, r.w, r.h, r.series, r.index));
        }
        let wide = HitRect::new(40.0, 40.0, 20.0, 20.0, 2, 99);
        qt.add(wide);
        assert_eq!(qt.hover(45.0, 45.0).map(|r| r.index), Some(99));
        assert_eq!(qt.hover(55.0, 55.0).map(|r| r.index), Some(99));
    }

    #[test]
    fn test_clear_empties_tree() {
        let mut qt = Quadtree::new(0.0, 0.0, 100.0, 100.0);
        for r in grid(10, 10) {
            qt.add(r);
        }
        assert!(!qt.is_empty());
        qt.clear();
        assert!(qt.is_empty());
        assert_eq!(qt.depth(), 0);
        assert!(qt.hover(4.0, 4.0).is_none());
    }

    proptest! {
        #[test]
        fn hover_matches_linear_scan(
            cols in 1usize..20,
            rows in 1usize..20,
            px in 0.0f64..200.0,
            py in 0.0f64..200.0,
        ) {
            let mut qt = Quadtree::new(0.0, 0.0, 200.0, 200.0);
            let rects = grid(cols, rows);
            for r in &rects {
                qt.add(*r);
            }
            let expected = rects.iter().find(|r| r.contains(px, py));
            prop_assert_eq!(qt.hover(px, py), expected);
        }
    }
}
