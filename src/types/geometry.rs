//! Continuous poses, robot footprints and lattice discretization helpers.

use std::f64::consts::TAU;

use glam::DVec2;

/// Robot pose in world coordinates (meters, radians).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: DVec2,
    pub theta: f64,
}

impl Pose2 {
    pub fn new(position: DVec2, theta: f64) -> Self {
        Self { position, theta }
    }

    /// Continuous pose at the center of a lattice cell with a discrete heading.
    pub fn from_lattice(x: i32, y: i32, heading: usize, num_headings: usize, resolution: f64) -> Self {
        Self {
            position: DVec2::new(disc_to_cont(x, resolution), disc_to_cont(y, resolution)),
            theta: disc_theta_to_cont(heading, num_headings),
        }
    }
}

/// Robot cross-section polygon in the robot frame (meters).
///
/// A footprint with at most one vertex describes a point robot: only the cell
/// under the robot center is covered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footprint {
    pub points: Vec<DVec2>,
}

impl Footprint {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    pub fn point() -> Self {
        Self {
            points: vec![DVec2::ZERO],
        }
    }

    /// Axis-aligned rectangle centered on the robot, `length` along the heading.
    pub fn rectangle(length: f64, width: f64) -> Self {
        let hl = 0.5 * length;
        let hw = 0.5 * width;
        Self {
            points: vec![
                DVec2::new(hl, hw),
                DVec2::new(-hl, hw),
                DVec2::new(-hl, -hw),
                DVec2::new(hl, -hw),
            ],
        }
    }

    pub fn square(side: f64) -> Self {
        Self::rectangle(side, side)
    }

    /// True when the footprint only covers the center cell.
    pub fn is_point(&self) -> bool {
        self.points.len() <= 1
    }

    /// True when the footprint is a polygon that can be rasterized.
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    /// Footprint vertices in world coordinates for the given pose.
    pub fn transform(&self, pose: Pose2) -> Vec<DVec2> {
        let rotation = DVec2::from_angle(pose.theta);
        self.points
            .iter()
            .map(|p| pose.position + rotation.rotate(*p))
            .collect()
    }
}

/// Center of a discrete cell index in world coordinates.
#[inline]
pub fn disc_to_cont(cell: i32, resolution: f64) -> f64 {
    cell as f64 * resolution + 0.5 * resolution
}

/// Cell index containing a world coordinate.
#[inline]
pub fn cont_to_disc(value: f64, resolution: f64) -> i32 {
    (value / resolution).floor() as i32
}

/// Heading angle (radians) of a discrete heading index. A lattice without
/// headings only has angle zero.
#[inline]
pub fn disc_theta_to_cont(heading: usize, num_headings: usize) -> f64 {
    if num_headings == 0 {
        return 0.0;
    }
    heading as f64 * TAU / num_headings as f64
}

/// Nearest discrete heading index for an angle in radians. Always 0 when
/// `num_headings` is 0.
pub fn cont_theta_to_disc(theta: f64, num_headings: usize) -> usize {
    if num_headings == 0 {
        return 0;
    }
    let bin = TAU / num_headings as f64;
    let normalized = (theta + 0.5 * bin).rem_euclid(TAU);
    ((normalized / bin) as usize) % num_headings
}
