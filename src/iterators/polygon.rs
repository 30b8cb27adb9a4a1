use glam::{DVec2, IVec2};

/// Distance (in cells) within which a cell center counts as lying on an edge.
/// Centers on an edge are covered.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Iterator over all lattice cells whose centers lie inside (or on the
/// boundary of) a convex polygon.
///
/// Points are expected in continuous cell units (world meters divided by the
/// resolution). Cells are not clipped to any grid, so offsets around an origin
/// cell can be negative.
pub struct PolygonIterator {
    points: Vec<DVec2>,
    y: i32,
    y_max: i32,
    x: i32,
    x_end: i32,
    has_span: bool,
}

impl PolygonIterator {
    pub fn new(points: Vec<DVec2>) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min_y, max_y), p| {
                (min_y.min(p.y), max_y.max(p.y))
            });
        if !min_y.is_finite() || !max_y.is_finite() {
            return None;
        }
        // Rows whose center line `y + 0.5` falls inside [min_y, max_y].
        let y_min = (min_y - 0.5 - TIE_TOLERANCE).ceil() as i32;
        let y_max = (max_y - 0.5 + TIE_TOLERANCE).floor() as i32;

        Some(Self {
            points,
            y: y_min - 1,
            y_max,
            x: 0,
            x_end: -1,
            has_span: false,
        })
    }

    /// Build from world-frame vertices and the cell size.
    pub fn from_world(points: &[DVec2], resolution: f64) -> Option<Self> {
        Self::new(points.iter().map(|p| *p / resolution).collect())
    }

    fn advance_row(&mut self) -> bool {
        while self.y <= self.y_max {
            let y_scan = self.y as f64 + 0.5;
            let mut x_min = f64::INFINITY;
            let mut x_max = f64::NEG_INFINITY;

            for i in 0..self.points.len() {
                let p0 = self.points[i];
                let p1 = self.points[(i + 1) % self.points.len()];
                if (p0.y - p1.y).abs() < f64::EPSILON {
                    continue;
                }
                let (lo, hi) = if p0.y < p1.y { (p0.y, p1.y) } else { (p1.y, p0.y) };
                if y_scan >= lo - TIE_TOLERANCE && y_scan <= hi + TIE_TOLERANCE {
                    let t = ((y_scan - p0.y) / (p1.y - p0.y)).clamp(0.0, 1.0);
                    let x = p0.x + t * (p1.x - p0.x);
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                }
            }

            if x_min <= x_max {
                let x_start = (x_min - 0.5 - TIE_TOLERANCE).ceil() as i32;
                let x_end = (x_max - 0.5 + TIE_TOLERANCE).floor() as i32;
                if x_start <= x_end {
                    self.x = x_start;
                    self.x_end = x_end;
                    self.has_span = true;
                    return true;
                }
            }

            self.y += 1;
        }

        false
    }
}

impl Iterator for PolygonIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.has_span && self.x <= self.x_end {
                let cell = IVec2::new(self.x, self.y);
                self.x += 1;
                return Some(cell);
            }

            self.has_span = false;
            self.y += 1;
            if !self.advance_row() {
                return None;
            }
        }
    }
}
