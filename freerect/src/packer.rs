use crate::geometry::{Interval, Rect};

/// Packs rectangles into a fixed-size surface by tracking the free regions
/// left between placements.
///
/// The packer keeps two lists: rectangles that have been handed out
/// (append-only) and candidate free rectangles. Free rectangles may overlap
/// each other after a placement splits them; redundancy is trimmed by a
/// containment prune after every insertion. The packer never moves a
/// rectangle once placed and never grows the surface.
#[derive(Debug, Clone)]
pub struct AtlasPacker {
    size: (i32, i32),
    free_rects: Vec<Rect>,
    used_rects: Vec<Rect>,
}

impl AtlasPacker {
    /// Creates a packer whose surface spans `(0, 0)` to `size`.
    pub fn new(size: (i32, i32)) -> Self {
        assert!(
            size.0 > 0 && size.1 > 0,
            "packer surface must have positive size"
        );

        Self {
            size,
            free_rects: vec![Rect::from_min_size((0, 0), size)],
            used_rects: Vec::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// The rectangles handed out so far, in insertion order.
    pub fn used_rects(&self) -> &[Rect] {
        &self.used_rects
    }

    /// The current free-space candidates. Candidates can overlap one
    /// another, but their union is exactly the unplaced portion of the
    /// surface.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free_rects
    }

    /// Requests a placement for a rectangle of the given size.
    ///
    /// Returns the placed rectangle, or `None` if the request was degenerate
    /// (zero or negative on either axis) or no free region can hold it. A
    /// failed request leaves the packer untouched, so the caller can skip
    /// the item and keep inserting.
    pub fn insert(&mut self, size: (i32, i32)) -> Option<Rect> {
        let (width, height) = size;

        if width <= 0 || height <= 0 {
            return None;
        }

        let placed = match self.find_placement(width, height) {
            Some(placed) => placed,
            None => {
                log::trace!("No free rectangle fits {}x{}", width, height);
                return None;
            }
        };

        log::trace!(
            "Placed {}x{} rectangle at {:?}",
            width,
            height,
            placed.min()
        );

        self.used_rects.push(placed);
        self.split_free_rects(&placed);
        self.prune_free_rects();

        log::trace!(
            "{} free rectangles remain after split and prune",
            self.free_rects.len()
        );

        Some(placed)
    }

    /// Scans every free rectangle for the best-area-fit placement: the
    /// candidate leaving the least leftover area wins, with the smaller
    /// leftover short side breaking ties. The placement is anchored at the
    /// winning candidate's minimum corner.
    fn find_placement(&self, width: i32, height: i32) -> Option<Rect> {
        let mut best: Option<(i64, i32, Rect)> = None;

        for free in &self.free_rects {
            if free.width() < width || free.height() < height {
                continue;
            }

            let area_fit = free.area() - width as i64 * height as i64;
            let short_side_fit = (free.width() - width).min(free.height() - height);

            let improves = match best {
                None => true,
                Some((best_area, best_short, _)) => {
                    area_fit < best_area || (area_fit == best_area && short_side_fit < best_short)
                }
            };

            if improves {
                let candidate = Rect::from_min_size(free.min(), (width, height));
                best = Some((area_fit, short_side_fit, candidate));
            }
        }

        best.map(|(_, _, placed)| placed)
    }

    /// Replaces every free rectangle the placement overlaps with up to four
    /// maximal slivers: the strips left of, right of, above, and below the
    /// placement, clipped to the original free rectangle. The slivers can
    /// overlap each other; the prune pass removes the fully redundant ones.
    ///
    /// The free list is rebuilt from a snapshot rather than edited while
    /// being walked.
    fn split_free_rects(&mut self, placed: &Rect) {
        let mut next_free = Vec::with_capacity(self.free_rects.len() + 4);

        for free in &self.free_rects {
            if !free.overlaps(placed) {
                next_free.push(*free);
                continue;
            }

            if placed.x.min > free.x.min {
                next_free.push(Rect::new(Interval::new(free.x.min, placed.x.min), free.y));
            }

            if placed.x.max < free.x.max {
                next_free.push(Rect::new(Interval::new(placed.x.max, free.x.max), free.y));
            }

            if placed.y.min > free.y.min {
                next_free.push(Rect::new(free.x, Interval::new(free.y.min, placed.y.min)));
            }

            if placed.y.max < free.y.max {
                next_free.push(Rect::new(free.x, Interval::new(placed.y.max, free.y.max)));
            }
        }

        self.free_rects = next_free;
    }

    /// Drops every free rectangle that lies entirely inside another one.
    /// Survivors are marked first and removed in a second pass so that no
    /// pairing is skipped; of two identical rectangles exactly one is kept.
    fn prune_free_rects(&mut self) {
        let rects = &self.free_rects;
        let mut keep = vec![true; rects.len()];

        for i in 0..rects.len() {
            if !keep[i] {
                continue;
            }

            for j in 0..rects.len() {
                if i == j || !keep[j] {
                    continue;
                }

                if rects[j].contains(&rects[i]) {
                    keep[i] = false;
                    break;
                }
            }
        }

        let mut index = 0;
        self.free_rects.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    }
}
