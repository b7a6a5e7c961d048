//! Prometheus metrics for the ledger.
//!
//! [`LedgerMetrics`] owns a dedicated [`Registry`]; the daemon encodes it into
//! the Prometheus text exposition format after a replay.

use prometheus::{
    register_int_counter_vec_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Encoder, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use crate::ledger::LedgerSummary;

/// Central collection of all ledger-level Prometheus metrics.
pub struct LedgerMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Blocks run through the block processor.
    pub blocks_processed: IntCounter,
    /// Transactions committed, by operation.
    pub calls_applied: IntCounterVec,
    /// Transactions rejected, by operation and error kind.
    pub calls_rejected: IntCounterVec,

    // ── Gauges ──────────────────────────────────────────────────────────
    pub challenge_count: IntGauge,
    pub video_count: IntGauge,
    pub tokens_minted: IntGauge,
}

impl LedgerMetrics {
    /// Create a fresh set of metrics, all registered under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let blocks_processed = register_int_counter_with_registry!(
            Opts::new("pulse_blocks_processed_total", "Total blocks processed"),
            registry
        )
        .expect("failed to register blocks_processed counter");

        let calls_applied = register_int_counter_vec_with_registry!(
            Opts::new("pulse_calls_applied_total", "Transactions committed to the ledger"),
            &["op"],
            registry
        )
        .expect("failed to register calls_applied counter");

        let calls_rejected = register_int_counter_vec_with_registry!(
            Opts::new("pulse_calls_rejected_total", "Transactions rejected without side effects"),
            &["op", "kind"],
            registry
        )
        .expect("failed to register calls_rejected counter");

        let challenge_count = register_int_gauge_with_registry!(
            Opts::new("pulse_challenges", "Challenges ever created"),
            registry
        )
        .expect("failed to register challenge_count gauge");

        let video_count = register_int_gauge_with_registry!(
            Opts::new("pulse_videos", "Videos ever submitted"),
            registry
        )
        .expect("failed to register video_count gauge");

        let tokens_minted = register_int_gauge_with_registry!(
            Opts::new("pulse_reward_tokens", "Reward tokens minted"),
            registry
        )
        .expect("failed to register tokens_minted gauge");

        Self {
            registry,
            blocks_processed,
            calls_applied,
            calls_rejected,
            challenge_count,
            video_count,
            tokens_minted,
        }
    }

    /// Refresh the gauges from a ledger summary.
    pub fn observe_summary(&self, summary: &LedgerSummary) {
        self.challenge_count.set(summary.challenges as i64);
        self.video_count.set(summary.videos as i64);
        self.tokens_minted.set(summary.tokens as i64);
    }

    /// Encode every metric in the Prometheus text format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for LedgerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
