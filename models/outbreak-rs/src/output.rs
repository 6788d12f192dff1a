pub const TOTAL_FILE: &str = "total.txt";
pub const TRAJECTORY_FILE: &str = "outbreak_trajectory.csv";

/// Snapshot of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReport {
    pub day: u64,
    pub latent: u128,
    pub symptomatic: u128,
    /// Cohort that entered the latent stage today.
    pub new_infections: u128,
    /// Symptomatic cohort removed today after its last infectious day.
    pub cured: u128,
    pub total: u128,
}

impl DayReport {
    pub const HEADERS: [&'static str; 6] = [
        "day",
        "latent",
        "symptomatic",
        "new_infections",
        "cured",
        "total",
    ];

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.day.to_string(),
            self.latent.to_string(),
            self.symptomatic.to_string(),
            self.new_infections.to_string(),
            self.cured.to_string(),
            self.total.to_string(),
        ]
    }
}
