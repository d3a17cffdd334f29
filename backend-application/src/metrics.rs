use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    schedule_refreshes: AtomicU64,
    off_season_cycles: AtomicU64,
    pollers_started: AtomicU64,
    pollers_stopped: AtomicU64,
    feed_polls: AtomicU64,
    feed_poll_failures: AtomicU64,
    writes_enqueued: AtomicU64,
    writes_applied: AtomicU64,
    write_retries: AtomicU64,
    writes_dropped: AtomicU64,
}

impl Metrics {
    pub fn record_schedule_refresh(&self) {
        self.schedule_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_off_season_cycle(&self) {
        self.off_season_cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poller_started(&self) {
        self.pollers_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poller_stopped(&self) {
        self.pollers_stopped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_poll(&self) {
        self.feed_polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_poll_failure(&self) {
        self.feed_poll_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_enqueued(&self) {
        self.writes_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_applied(&self) {
        self.writes_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_retry(&self) {
        self.write_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write_dropped(&self) {
        self.writes_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pollers_running(&self) -> u64 {
        let started = self.pollers_started.load(Ordering::Relaxed);
        let stopped = self.pollers_stopped.load(Ordering::Relaxed);
        started.saturating_sub(stopped)
    }

    pub fn writes_applied(&self) -> u64 {
        self.writes_applied.load(Ordering::Relaxed)
    }

    pub fn writes_dropped(&self) -> u64 {
        self.writes_dropped.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("statwatch_schedule_refreshes_total", &self.schedule_refreshes),
            ("statwatch_off_season_cycles_total", &self.off_season_cycles),
            ("statwatch_pollers_started_total", &self.pollers_started),
            ("statwatch_pollers_stopped_total", &self.pollers_stopped),
            ("statwatch_feed_polls_total", &self.feed_polls),
            ("statwatch_feed_poll_failures_total", &self.feed_poll_failures),
            ("statwatch_writes_enqueued_total", &self.writes_enqueued),
            ("statwatch_writes_applied_total", &self.writes_applied),
            ("statwatch_write_retries_total", &self.write_retries),
            ("statwatch_writes_dropped_total", &self.writes_dropped),
        ];

        let mut out = String::new();
        for (name, counter) in counters {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                counter.load(Ordering::Relaxed)
            ));
        }
        out.push_str(&format!(
            "# TYPE statwatch_pollers_running gauge\nstatwatch_pollers_running {}\n",
            self.pollers_running()
        ));
        out
    }
}
