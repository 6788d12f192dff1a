//! Fixed-length window of day-cohorts for one disease stage.

/// Counts of individuals on each day of a stage. Slot 0 holds the cohort
/// that entered today, slot `DAYS - 1` the cohort on its last day.
///
/// The running total is kept alongside the slots and only ever adjusted by
/// the entering and retiring cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CohortWindow<const DAYS: usize> {
    slots: [u128; DAYS],
    total: u128,
}

impl<const DAYS: usize> Default for CohortWindow<DAYS> {
    fn default() -> Self {
        Self {
            slots: [0; DAYS],
            total: 0,
        }
    }
}

impl<const DAYS: usize> CohortWindow<DAYS> {
    /// A window holding a single cohort on its first day.
    pub fn seeded(count: u128) -> Self {
        let mut window = Self::default();
        window.slots[0] = count;
        window.total = count;
        window
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    /// Cohort on its last day of the stage; it leaves on the next advance.
    pub fn oldest(&self) -> u128 {
        self.slots[DAYS - 1]
    }

    pub fn newest(&self) -> u128 {
        self.slots[0]
    }

    pub fn slots(&self) -> &[u128] {
        &self.slots
    }

    /// Ages every cohort by one day, admits `entering` as the new first-day
    /// cohort and returns the cohort pushed out of the window.
    ///
    /// Returns `None` without touching the window if the new total does not
    /// fit in a `u128`.
    pub fn advance(&mut self, entering: u128) -> Option<u128> {
        let retired = self.oldest();
        let total = (self.total - retired).checked_add(entering)?;
        self.slots.rotate_right(1);
        self.slots[0] = entering;
        self.total = total;
        Some(retired)
    }
}
