use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::error::PlanError;
use crate::config::simplify_source_name;
use crate::fazel;
use crate::pointing::{
    correct_trajectory, detect_windows, CorrectedSample, Feed, HazardBounds, Trajectory,
    WindowReport,
};
use crate::sky::{EquatorialCoord, HorizontalTransform};

/// Everything needed to build one pointing schedule.
#[derive(Debug, Clone)]
pub struct ObservationRequest {
    /// Name as typed by the user; goes into the file header.
    pub source_name: String,
    pub source: EquatorialCoord,
    /// UTC date of the observation.
    pub date: NaiveDate,
    /// Whole hours after midnight UTC.
    pub hour_start: u32,
    pub duration: Duration,
    pub step: Duration,
    pub feed: Feed,
}

impl ObservationRequest {
    pub fn start(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::default()).and_utc()
            + Duration::hours(i64::from(self.hour_start))
    }

    /// The pointing instants.
    ///
    /// The run is split into `duration / step` (rounded down) equal intervals,
    /// so the actual spacing is stretched when `step` does not divide
    /// `duration`. The end of the run is not included.
    pub fn instants(&self) -> Result<Vec<DateTime<Utc>>, PlanError> {
        if self.step <= Duration::zero() {
            return Err(PlanError::InvalidRequest(format!(
                "time step must be positive, got {}",
                self.step
            )));
        }
        if self.duration <= Duration::zero() {
            return Err(PlanError::InvalidRequest(format!(
                "observation length must be positive, got {}",
                self.duration
            )));
        }

        let (duration_ns, step_ns) = match (
            self.duration.num_nanoseconds(),
            self.step.num_nanoseconds(),
        ) {
            (Some(d), Some(s)) => (d, s),
            _ => {
                return Err(PlanError::InvalidRequest(
                    "observation length out of range".to_string(),
                ))
            }
        };

        let count = duration_ns / step_ns;
        if count == 0 {
            return Err(PlanError::InvalidRequest(format!(
                "time step {} is longer than the observation",
                self.step
            )));
        }

        let spacing = Duration::nanoseconds(duration_ns / count);
        let mut cursor = self.start();
        let mut instants = Vec::with_capacity(count as usize);
        for _ in 0..count {
            instants.push(cursor);
            cursor += spacing;
        }
        Ok(instants)
    }

    pub fn header(&self) -> String {
        format!(
            "#{} Fazel for {} feed, {}, (yyyy.ddd.hh:mm:ss.SSS azimuthal_angle 0.1 elevation_angle 0.4)",
            self.source_name, self.feed, self.date
        )
    }

    /// `fazel_<source>_<date>_<feed>.txt`
    pub fn default_filename(&self) -> String {
        format!(
            "fazel_{}_{}_{}.txt",
            simplify_source_name(&self.source_name),
            self.date,
            self.feed
        )
    }
}

/// A computed schedule, ready to be written.
#[derive(Debug, Clone)]
pub struct Plan {
    pub request: ObservationRequest,
    pub trajectory: Trajectory,
    pub corrected: Vec<CorrectedSample>,
    pub report: WindowReport,
}

impl Plan {
    pub fn build<T: HorizontalTransform>(
        request: ObservationRequest,
        transform: &T,
        hazard: &HazardBounds,
    ) -> Result<Self, PlanError> {
        let instants = request.instants()?;
        log::debug!(
            "Planning {} for {} feed: {} pointings from {}",
            request.source_name,
            request.feed,
            instants.len(),
            request.start()
        );

        let trajectory = transform.transform(&request.source, &instants)?;
        let params = request.feed.params();
        let corrected = correct_trajectory(&trajectory, &params)?;
        let report = detect_windows(&trajectory, &corrected, params.elevation_floor_deg, hazard)?;

        Ok(Self {
            request,
            trajectory,
            corrected,
            report,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), PlanError> {
        fazel::write_file(path, &self.request.header(), &self.corrected)?;
        log::info!(
            "Wrote {} pointings for {} to {}",
            self.corrected.len(),
            self.request.source_name,
            path.display()
        );
        Ok(())
    }
}

/// Builds a plan and writes it to `path`. Nothing is written if planning fails.
pub fn write_schedule<T: HorizontalTransform>(
    request: ObservationRequest,
    transform: &T,
    hazard: &HazardBounds,
    path: &Path,
) -> Result<Plan, PlanError> {
    let plan = Plan::build(request, transform, hazard)?;
    plan.write(path)?;
    Ok(plan)
}
