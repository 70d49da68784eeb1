use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// 單一階段（extract / transform / load）的耗時
#[derive(Debug, Clone)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
}

/// 追蹤一次匯入流程的階段耗時；CLI 建置下另外取樣行程記憶體
pub struct RunMonitor {
    enabled: bool,
    started: Instant,
    phase_started: Instant,
    timings: Vec<PhaseTiming>,
    peak_memory_mb: u64,
    #[cfg(feature = "cli")]
    system: Option<(System, Pid)>,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            phase_started: now,
            timings: Vec::new(),
            peak_memory_mb: 0,
            #[cfg(feature = "cli")]
            system: if enabled {
                sysinfo::get_current_pid().ok().map(|pid| (System::new(), pid))
            } else {
                None
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 結束目前階段並開始計時下一階段
    pub fn finish_phase(&mut self, phase: &str) {
        if !self.enabled {
            return;
        }

        let elapsed = self.phase_started.elapsed();
        self.phase_started = Instant::now();
        let memory_mb = self.sample_memory_mb();

        tracing::info!(
            "📊 {} - Time: {:?}, Memory: {}MB, Peak: {}MB",
            phase,
            elapsed,
            memory_mb,
            self.peak_memory_mb
        );

        self.timings.push(PhaseTiming {
            phase: phase.to_string(),
            elapsed,
        });
    }

    pub fn timings(&self) -> &[PhaseTiming] {
        &self.timings
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                self.peak_memory_mb
            );
        }
    }

    #[cfg(feature = "cli")]
    fn sample_memory_mb(&mut self) -> u64 {
        let Some((system, pid)) = self.system.as_mut() else {
            return 0;
        };
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[*pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let memory_mb = system
            .process(*pid)
            .map(|p| p.memory() / 1024 / 1024)
            .unwrap_or(0);
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
        memory_mb
    }

    #[cfg(not(feature = "cli"))]
    fn sample_memory_mb(&mut self) -> u64 {
        0
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let mut monitor = RunMonitor::new(false);
        monitor.finish_phase("extract");
        assert!(monitor.timings().is_empty());
        assert!(!monitor.is_enabled());
    }

    #[test]
    fn test_enabled_monitor_records_phases_in_order() {
        let mut monitor = RunMonitor::new(true);
        monitor.finish_phase("extract");
        monitor.finish_phase("transform");
        let phases: Vec<&str> = monitor.timings().iter().map(|t| t.phase.as_str()).collect();
        assert_eq!(phases, vec!["extract", "transform"]);
    }
}
