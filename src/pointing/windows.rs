use chrono::{DateTime, Utc};
use strum_macros::Display;

use super::error::PointingError;
use super::types::{CorrectedSample, Trajectory};

pub const CLOCKWISE_LIMIT_DEG: f64 = 51.0;
pub const COUNTER_CLOCKWISE_LIMIT_DEG: f64 = 41.0;
pub const CABLE_WRAP_MARGIN_DEG: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum HazardBoundary {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    ElevationEntry,
    ElevationExit,
    HazardEntry(HazardBoundary),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowEvent {
    pub kind: WindowEventKind,
    pub index: usize,
    pub timestamp: DateTime<Utc>,
}

/// Azimuth thresholds guarding the cable wrap.
///
/// Driving through `clockwise_deg` with increasing azimuth, or through
/// `counter_clockwise_deg` with decreasing azimuth, may wind the cables past
/// their mechanical limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardBounds {
    pub clockwise_deg: f64,
    pub counter_clockwise_deg: f64,
}

impl HazardBounds {
    pub fn from_limits(
        clockwise_limit_deg: f64,
        counter_clockwise_limit_deg: f64,
        margin_deg: f64,
    ) -> Self {
        Self {
            clockwise_deg: clockwise_limit_deg - margin_deg,
            counter_clockwise_deg: counter_clockwise_limit_deg + margin_deg,
        }
    }
}

impl Default for HazardBounds {
    fn default() -> Self {
        Self::from_limits(
            CLOCKWISE_LIMIT_DEG,
            COUNTER_CLOCKWISE_LIMIT_DEG,
            CABLE_WRAP_MARGIN_DEG,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    /// Sorted by sample index.
    pub events: Vec<WindowEvent>,
    /// The first sample is already above the floor, so there is no entry event for it.
    pub starts_in_range: bool,
    pub ends_in_range: bool,
    pub max_elevation_deg: f64,
}

impl WindowReport {
    pub fn entries(&self) -> impl Iterator<Item = &WindowEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == WindowEventKind::ElevationEntry)
    }

    pub fn exits(&self) -> impl Iterator<Item = &WindowEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == WindowEventKind::ElevationExit)
    }

    /// Cable wrap advisories. These never stop a schedule from being written.
    pub fn hazards(&self) -> impl Iterator<Item = &WindowEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, WindowEventKind::HazardEntry(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Rising,
    Falling,
}

/// Indices where `values` move across `threshold`, flagged at the later sample.
///
/// A value equal to the threshold counts as below it.
fn crossings<I>(values: I, threshold: f64) -> Vec<(usize, Crossing)>
where
    I: IntoIterator<Item = f64>,
{
    let mut found = Vec::new();
    let mut previous: Option<bool> = None;

    for (i, value) in values.into_iter().enumerate() {
        let above = value - threshold > 0.0;
        match previous {
            Some(false) if above => found.push((i, Crossing::Rising)),
            Some(true) if !above => found.push((i, Crossing::Falling)),
            _ => {}
        }
        previous = Some(above);
    }

    found
}

pub fn detect_windows(
    trajectory: &Trajectory,
    corrected: &[CorrectedSample],
    elevation_floor_deg: f64,
    hazard: &HazardBounds,
) -> Result<WindowReport, PointingError> {
    if corrected.len() != trajectory.len() {
        return Err(PointingError::LengthMismatch {
            expected: trajectory.len(),
            corrected: corrected.len(),
        });
    }

    let max_elevation_deg = corrected
        .iter()
        .map(|s| s.elevation_deg)
        .fold(f64::NEG_INFINITY, f64::max);
    if max_elevation_deg <= elevation_floor_deg {
        return Err(PointingError::NotVisible {
            floor_deg: elevation_floor_deg,
            max_elevation_deg,
        });
    }

    let timestamps: Vec<DateTime<Utc>> = trajectory.timestamps().collect();
    let event = |kind: WindowEventKind, index: usize| WindowEvent {
        kind,
        index,
        timestamp: timestamps[index],
    };

    let mut events: Vec<WindowEvent> =
        crossings(corrected.iter().map(|s| s.elevation_deg), elevation_floor_deg)
            .into_iter()
            .map(|(i, crossing)| match crossing {
                Crossing::Rising => event(WindowEventKind::ElevationEntry, i),
                Crossing::Falling => event(WindowEventKind::ElevationExit, i),
            })
            .collect();

    let azimuths = || corrected.iter().map(|s| s.azimuth_deg);
    events.extend(
        crossings(azimuths(), hazard.clockwise_deg)
            .into_iter()
            .filter(|(_, c)| *c == Crossing::Rising)
            .map(|(i, _)| event(WindowEventKind::HazardEntry(HazardBoundary::Clockwise), i)),
    );
    events.extend(
        crossings(azimuths(), hazard.counter_clockwise_deg)
            .into_iter()
            .filter(|(_, c)| *c == Crossing::Falling)
            .map(|(i, _)| {
                event(
                    WindowEventKind::HazardEntry(HazardBoundary::CounterClockwise),
                    i,
                )
            }),
    );
    // Stable, so elevation events stay ahead of hazards at the same index.
    events.sort_by_key(|e| e.index);

    let above = |s: &CorrectedSample| s.elevation_deg > elevation_floor_deg;
    Ok(WindowReport {
        events,
        starts_in_range: corrected.first().is_some_and(above),
        ends_in_range: corrected.last().is_some_and(above),
        max_elevation_deg,
    })
}
