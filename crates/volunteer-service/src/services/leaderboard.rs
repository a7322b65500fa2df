//! Leaderboard service

use tracing::instrument;

use crate::dto::{LeaderboardEntry, LeaderboardResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Number of volunteers shown on the leaderboard
pub const LEADERBOARD_SIZE: usize = 20;

/// Leaderboard service
pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    /// Create a new LeaderboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Top volunteers by points; ties go to the older account
    #[instrument(skip(self))]
    pub async fn top(&self) -> ServiceResult<LeaderboardResponse> {
        let users = self
            .ctx
            .user_repo()
            .top_volunteers(LEADERBOARD_SIZE as i64)
            .await?;

        let leaderboard: Vec<LeaderboardEntry> = users
            .iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry::ranked(i + 1, user))
            .collect();

        Ok(LeaderboardResponse {
            count: leaderboard.len(),
            leaderboard,
        })
    }
}
