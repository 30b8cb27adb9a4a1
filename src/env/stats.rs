/// Counters for edge-cost queries, owned by the caller and threaded through
/// [`MultiLevelEnvironment::action_cost_with_stats`](super::MultiLevelEnvironment::action_cost_with_stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Calls to `action_cost_with_stats`.
    pub action_cost_queries: u64,
    /// Full swept-footprint checks against a level grid.
    pub swept_checks: u64,
    /// Edges that came back as `INFINITE_COST`.
    pub pruned_edges: u64,
}

impl QueryStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accumulate counters from another episode.
    pub fn merge(&mut self, other: &QueryStats) {
        self.action_cost_queries += other.action_cost_queries;
        self.swept_checks += other.swept_checks;
        self.pruned_edges += other.pruned_edges;
    }
}
