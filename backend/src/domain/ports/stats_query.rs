//! Driving port for collection statistics.

use async_trait::async_trait;

use crate::domain::Error;

/// Number of stored accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCount {
    pub count: u64,
}

/// Summary over the accounts that reported an age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSummary {
    pub reported: u64,
    pub youngest: Option<u32>,
    pub oldest: Option<u32>,
    pub mean: Option<f64>,
}

impl AgeSummary {
    /// Summarise `ages`; the optional figures are `None` for an empty slice.
    pub fn from_ages(ages: &[u32]) -> Self {
        let reported = ages.len() as u64;
        let total: u64 = ages.iter().map(|age| u64::from(*age)).sum();
        let mean = (reported > 0).then(|| total as f64 / reported as f64);
        Self {
            reported,
            youngest: ages.iter().copied().min(),
            oldest: ages.iter().copied().max(),
            mean,
        }
    }
}

/// Number of stored pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetCount {
    pub count: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    async fn user_count(&self) -> Result<UserCount, Error>;
    async fn user_ages(&self) -> Result<AgeSummary, Error>;
    async fn pet_count(&self) -> Result<PetCount, Error>;
}
