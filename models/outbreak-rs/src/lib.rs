pub mod cohort;
pub mod error;
pub mod output;
pub mod parameters;
pub mod stepper;

use mrp::Environment;
use tracing::info;

pub use error::{OutbreakError, OutbreakResult};
use output::{DayReport, TOTAL_FILE, TRAJECTORY_FILE};
use parameters::Parameters;
use stepper::EpidemicStepper;

/// Runs the model for the loaded input, writes its output and returns the
/// total for the requested day.
pub fn run(env: &Environment<Parameters>) -> OutbreakResult<u128> {
    let parameters = env
        .input
        .as_ref()
        .ok_or_else(|| OutbreakError::MalformedInput("run envelope has no input".to_string()))?;
    info!(
        days = parameters.days,
        trajectory = parameters.trajectory,
        "running outbreak model"
    );

    if parameters.trajectory {
        let reports = EpidemicStepper::trajectory(parameters.days)?;
        let rows: Vec<Vec<String>> = reports.iter().map(DayReport::to_row).collect();
        env.write_csv(TRAJECTORY_FILE, &DayReport::HEADERS, &rows)?;
        let total = reports.last().map_or(0, |report| report.total);
        info!(total, rows = rows.len(), "wrote trajectory");
        Ok(total)
    } else {
        let total = EpidemicStepper::simulate(parameters.days)?;
        env.write(TOTAL_FILE, format!("{total}\n").as_bytes())?;
        info!(total, "wrote total");
        Ok(total)
    }
}
