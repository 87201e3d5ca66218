//! Records for the simulated community and timeline routes.
//!
//! Nothing here is backed by real data; see `cardio_core::insights`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommunityStat {
    pub label: String,
    pub value: String,
    pub percentile: String,
    pub better: bool,
}

/// Response body of `GET /api/community-stats`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommunityStatsRes {
    pub community_stats: Vec<CommunityStat>,
}

/// Response body of `GET /api/health-timeline`. The three series are parallel, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthTimelineRes {
    pub labels: Vec<String>,
    pub risk_scores: Vec<i64>,
    pub fitness_scores: Vec<i64>,
}
