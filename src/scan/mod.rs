//! Offset grids for mapping a small patch of sky around a pointing centre.
//!
//! Both patterns cover the `(2n+1) x (2n+1)` grid of integer offsets around
//! the origin. What happens at the origin is controlled by [`OriginPolicy`].

use serde::Serialize;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScanPoint {
    pub x: i32,
    pub y: i32,
}

impl ScanPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Angular offset for a grid spacing of `spacing_deg`.
    pub fn scaled(&self, spacing_deg: f64) -> (f64, f64) {
        (self.x as f64 * spacing_deg, self.y as f64 * spacing_deg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum OriginPolicy {
    /// Start and finish exactly on the origin.
    Include,
    /// Visit the origin once, without the diagonal legs back to it.
    Exclude,
    /// Leave the origin out; the caller points there separately.
    Omit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum ScanPattern {
    Spiral,
    Zigzag,
}

pub fn generate(pattern: ScanPattern, n: u32, origin: OriginPolicy) -> Vec<ScanPoint> {
    match pattern {
        ScanPattern::Spiral => spiral(n, origin),
        ScanPattern::Zigzag => zigzag(n, origin),
    }
}

/// Square spiral outwards from the origin.
///
/// For `n = 1` the visiting order is
///
/// ```text
/// 2 1 8
/// 3 0 7
/// 4 5 6
/// ```
///
/// with [`OriginPolicy::Include`] adding a final step back to `0`.
pub fn spiral(n: u32, origin: OriginPolicy) -> Vec<ScanPoint> {
    let (mut x, mut y) = (0i32, 0i32);
    let (mut dx, mut dy) = (-1i32, 1i32);
    let mut scan = Vec::new();

    if origin != OriginPolicy::Omit {
        scan.push(ScanPoint::new(x, y));
    }

    let mut m = 0;
    for _ in 0..2 * n {
        m += 1;
        for _ in 0..m {
            y += dy;
            scan.push(ScanPoint::new(x, y));
        }
        for _ in 0..m {
            x += dx;
            scan.push(ScanPoint::new(x, y));
        }
        dx = -dx;
        dy = -dy;
    }
    for _ in 0..m {
        y += dy;
        scan.push(ScanPoint::new(x, y));
    }

    let diagonal = match origin {
        OriginPolicy::Include => n,
        OriginPolicy::Omit => n.saturating_sub(1),
        OriginPolicy::Exclude => 0,
    };
    for _ in 0..diagonal {
        x += dx;
        y -= dy;
        scan.push(ScanPoint::new(x, y));
    }

    scan
}

/// Column-by-column boustrophedon over the grid.
///
/// For `n = 1` the visiting order is
///
/// ```text
/// 0 5 6
/// 1 4 7
/// 2 3 8
/// ```
///
/// [`OriginPolicy::Include`] walks diagonally in from the origin to the first
/// corner and back out from the last one.
pub fn zigzag(n: u32, origin: OriginPolicy) -> Vec<ScanPoint> {
    let n = n as i32;
    let mut scan = Vec::new();

    let lead = match origin {
        OriginPolicy::Include => 0..n,
        OriginPolicy::Omit => 1..n,
        OriginPolicy::Exclude => 0..0,
    };
    scan.extend(lead.map(|j| ScanPoint::new(-j, j)));

    let mut dy = 1;
    for i in -n..=n {
        dy = -dy;
        scan.extend((-n..=n).map(|j| ScanPoint::new(i, j * dy)));
    }

    let trail = match origin {
        OriginPolicy::Include => 0..n,
        OriginPolicy::Omit => 1..n,
        OriginPolicy::Exclude => 0..0,
    };
    scan.extend(trail.rev().map(|i| ScanPoint::new(i, i * dy)));

    scan
}
