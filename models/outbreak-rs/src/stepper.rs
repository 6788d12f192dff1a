use tracing::{debug, trace};

use crate::{
    cohort::CohortWindow,
    error::{OutbreakError, OutbreakResult},
    output::DayReport,
};

pub const LATENT_DAYS: usize = 5;
pub const SYMPTOMATIC_DAYS: usize = 5;
/// New infections caused by each symptomatic individual per day.
pub const INFECTIONS_PER_DAY: u128 = 3;

/// Day-by-day outbreak state: a single patient enters the latent stage on
/// day 1, turns symptomatic after `LATENT_DAYS` days, infects
/// `INFECTIONS_PER_DAY` people on each of its `SYMPTOMATIC_DAYS` symptomatic
/// days and is then cured.
#[derive(Debug, Clone)]
pub struct EpidemicStepper {
    day: u64,
    latent: CohortWindow<LATENT_DAYS>,
    symptomatic: CohortWindow<SYMPTOMATIC_DAYS>,
    cured_today: u128,
    total: u128,
}

impl Default for EpidemicStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl EpidemicStepper {
    pub fn new() -> Self {
        Self {
            day: 1,
            latent: CohortWindow::seeded(1),
            symptomatic: CohortWindow::default(),
            cured_today: 0,
            total: 1,
        }
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn latent(&self) -> &[u128] {
        self.latent.slots()
    }

    pub fn symptomatic(&self) -> &[u128] {
        self.symptomatic.slots()
    }

    pub fn latent_total(&self) -> u128 {
        self.latent.total()
    }

    pub fn symptomatic_total(&self) -> u128 {
        self.symptomatic.total()
    }

    /// Currently infected individuals, latent plus symptomatic.
    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn report(&self) -> DayReport {
        DayReport {
            day: self.day,
            latent: self.latent.total(),
            symptomatic: self.symptomatic.total(),
            new_infections: self.latent.newest(),
            cured: self.cured_today,
            total: self.total(),
        }
    }

    /// Advances one day and returns the new day's total.
    ///
    /// On overflow the stepper keeps the previous day's state.
    pub fn step(&mut self) -> OutbreakResult<u128> {
        let day = self.day + 1;
        let overflow = || OutbreakError::Overflow { day };

        let mut latent = self.latent;
        let mut symptomatic = self.symptomatic;

        // The latent cohort finishing today becomes symptomatic, and the
        // oldest symptomatic cohort is cured.
        let cured = symptomatic.advance(latent.oldest()).ok_or_else(overflow)?;
        // New infections use the symptomatic population after that move.
        let new_infections = symptomatic
            .total()
            .checked_mul(INFECTIONS_PER_DAY)
            .ok_or_else(overflow)?;
        latent.advance(new_infections).ok_or_else(overflow)?;
        let total = latent
            .total()
            .checked_add(symptomatic.total())
            .ok_or_else(overflow)?;

        self.day = day;
        self.latent = latent;
        self.symptomatic = symptomatic;
        self.cured_today = cured;
        self.total = total;

        trace!(day, new_infections, cured, total, "stepped");
        Ok(total)
    }

    /// Total infected on day `days`.
    pub fn simulate(days: i64) -> OutbreakResult<u128> {
        let days = check_days(days)?;
        let mut stepper = Self::new();
        let mut total = stepper.total();
        while stepper.day() < days {
            total = stepper.step()?;
        }
        debug!(days, total, "simulation finished");
        Ok(total)
    }

    /// Reports for every day from 1 through `days`.
    pub fn trajectory(days: i64) -> OutbreakResult<Vec<DayReport>> {
        let days = check_days(days)?;
        let mut stepper = Self::new();
        let mut reports = vec![stepper.report()];
        while stepper.day() < days {
            stepper.step()?;
            reports.push(stepper.report());
        }
        debug!(days, "trajectory finished");
        Ok(reports)
    }
}

fn check_days(days: i64) -> OutbreakResult<u64> {
    u64::try_from(days)
        .ok()
        .filter(|&days| days >= 1)
        .ok_or(OutbreakError::InvalidDayCount(days))
}
