//! Greedy label placement for map markers.
//!
//! All geometry here is in percent-of-image space, so a layout computed for
//! one render pass stays valid while the image is scaled by CSS.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Location,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Candidate order tested by the placer.
pub const CANDIDATE_ORDER: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

impl Side {
    pub fn as_class(&self) -> &'static str {
        match self {
            Side::Top => "label-top",
            Side::Right => "label-right",
            Side::Bottom => "label-bottom",
            Side::Left => "label-left",
        }
    }
}

impl LabelKind {
    pub fn preferred_side(&self) -> Side {
        match self {
            LabelKind::Location => Side::Top,
            LabelKind::Character => Side::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Accept the first free candidate in `CANDIDATE_ORDER`.
    #[default]
    ListOrder,
    /// Try the preferred side first, then the rest in `CANDIDATE_ORDER`.
    PreferredFirst,
}

/// Label box dimensions and spacing, in percent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub location_size: (f64, f64),
    pub character_size: (f64, f64),
    /// Distance between the anchor and the nearest label edge.
    pub gap: f64,
    /// Applied on every side of a box before the overlap test.
    pub padding: f64,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        LabelMetrics {
            location_size: (12.0, 2.4),
            character_size: (10.0, 2.0),
            // Must exceed half a label height plus twice the padding, so the
            // four candidates around one anchor never collide with each other.
            gap: 2.0,
            padding: 0.2,
        }
    }
}

impl LabelMetrics {
    pub fn size_for(&self, kind: LabelKind) -> (f64, f64) {
        match kind {
            LabelKind::Location => self.location_size,
            LabelKind::Character => self.character_size,
        }
    }
}

/// A placed label box. Only lives for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub side: Side,
}

impl LabelPlacement {
    fn padded(&self, pad: f64) -> LabelPlacement {
        LabelPlacement {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + 2.0 * pad,
            height: self.height + 2.0 * pad,
            side: self.side,
        }
    }
}

/// Open-interval rectangle intersection: boxes that only touch do not overlap.
pub fn overlaps(a: &LabelPlacement, b: &LabelPlacement) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Box for `side` around `anchor`.
pub fn candidate(anchor: (f64, f64), size: (f64, f64), gap: f64, side: Side) -> LabelPlacement {
    let (ax, ay) = anchor;
    let (w, h) = size;
    let (x, y) = match side {
        Side::Top => (ax - w / 2.0, ay - h - gap),
        Side::Right => (ax + gap, ay - h / 2.0),
        Side::Bottom => (ax - w / 2.0, ay + gap),
        Side::Left => (ax - w - gap, ay - h / 2.0),
    };
    LabelPlacement { x, y, width: w, height: h, side }
}

/// Placement state for one render pass.
#[derive(Debug, Clone, Default)]
pub struct LabelPlacer {
    policy: PlacementPolicy,
    metrics: LabelMetrics,
    placed: Vec<LabelPlacement>,
}

impl LabelPlacer {
    pub fn new(policy: PlacementPolicy, metrics: LabelMetrics) -> Self {
        LabelPlacer { policy, metrics, placed: Vec::new() }
    }

    pub fn placed(&self) -> &[LabelPlacement] {
        &self.placed
    }

    fn is_free(&self, label: &LabelPlacement) -> bool {
        let pad = self.metrics.padding;
        let probe = label.padded(pad);
        !self.placed.iter().any(|p| overlaps(&probe, &p.padded(pad)))
    }

    /// Choose a label box for a marker at `anchor` and record it.
    ///
    /// Falls back to the preferred side, overlapping, when every candidate is taken.
    pub fn place(&mut self, anchor: (f64, f64), kind: LabelKind) -> LabelPlacement {
        let size = self.metrics.size_for(kind);
        let gap = self.metrics.gap;
        let preferred = kind.preferred_side();

        let order: Vec<Side> = match self.policy {
            PlacementPolicy::ListOrder => CANDIDATE_ORDER.to_vec(),
            PlacementPolicy::PreferredFirst => std::iter::once(preferred)
                .chain(CANDIDATE_ORDER.into_iter().filter(|s| *s != preferred))
                .collect(),
        };

        let chosen = order
            .into_iter()
            .map(|side| candidate(anchor, size, gap, side))
            .find(|c| self.is_free(c))
            .unwrap_or_else(|| candidate(anchor, size, gap, preferred));

        self.placed.push(chosen);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> LabelPlacement {
        LabelPlacement { x, y, width: w, height: h, side: Side::Top }
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 5.0, 10.0, 10.0)),
            (rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 5.0, 5.0)),
            (rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 1.0, 1.0)),
            (rect(0.0, 0.0, 10.0, 10.0), rect(10.0, 0.0, 5.0, 5.0)),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &rect(10.0, 0.0, 5.0, 5.0)));
        assert!(!overlaps(&a, &rect(0.0, 10.0, 5.0, 5.0)));
        assert!(overlaps(&a, &rect(9.99, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        assert!(overlaps(&rect(0.0, 0.0, 10.0, 10.0), &rect(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_candidate_geometry() {
        let top = candidate((50.0, 50.0), (10.0, 2.0), 1.0, Side::Top);
        assert!((top.x - 45.0).abs() < 1e-9);
        assert!((top.y - 47.0).abs() < 1e-9);
        let right = candidate((50.0, 50.0), (10.0, 2.0), 1.0, Side::Right);
        assert!((right.x - 51.0).abs() < 1e-9);
        assert!((right.y - 49.0).abs() < 1e-9);
        let bottom = candidate((50.0, 50.0), (10.0, 2.0), 1.0, Side::Bottom);
        assert!((bottom.y - 51.0).abs() < 1e-9);
        let left = candidate((50.0, 50.0), (10.0, 2.0), 1.0, Side::Left);
        assert!((left.x - 39.0).abs() < 1e-9);
    }

    #[test]
    fn test_list_order_ignores_preferred_side() {
        let mut placer = LabelPlacer::default();
        let p = placer.place((50.0, 50.0), LabelKind::Character);
        assert_eq!(p.side, Side::Top);
    }

    #[test]
    fn test_preferred_first_policy() {
        let mut placer = LabelPlacer::new(PlacementPolicy::PreferredFirst, LabelMetrics::default());
        assert_eq!(placer.place((50.0, 50.0), LabelKind::Character).side, Side::Bottom);
        assert_eq!(placer.place((20.0, 20.0), LabelKind::Location).side, Side::Top);
    }

    #[test]
    fn test_crowded_anchor_walks_candidates_then_falls_back() {
        let mut placer = LabelPlacer::default();
        let anchor = (50.0, 50.0);
        let sides: Vec<Side> = (0..4)
            .map(|_| placer.place(anchor, LabelKind::Location).side)
            .collect();
        assert_eq!(sides, vec![Side::Top, Side::Right, Side::Bottom, Side::Left]);

        // Every slot is taken: preferred side, overlap allowed
        let fallback = placer.place(anchor, LabelKind::Location);
        assert_eq!(fallback.side, Side::Top);
        let fallback = placer.place(anchor, LabelKind::Character);
        assert_eq!(fallback.side, Side::Bottom);
        assert_eq!(placer.placed().len(), 6);
    }

    #[test]
    fn test_placed_labels_never_overlap_when_space_is_free() {
        let mut placer = LabelPlacer::default();
        let metrics = LabelMetrics::default();
        let first = placer.place((30.0, 30.0), LabelKind::Location);
        let second = placer.place((31.0, 30.5), LabelKind::Location);
        assert_ne!(first.side, second.side);
        assert!(!overlaps(&first.padded(metrics.padding), &second.padded(metrics.padding)));
    }

    #[test]
    fn test_distant_labels_keep_first_candidate() {
        let mut placer = LabelPlacer::default();
        assert_eq!(placer.place((10.0, 10.0), LabelKind::Location).side, Side::Top);
        assert_eq!(placer.place((80.0, 80.0), LabelKind::Location).side, Side::Top);
    }
}
