use std::ops::ControlFlow;

use crate::sim::body::Body;
use crate::sim::statistics::Report;

/// Consumer of per-tick output. Rendering lives behind this trait.
///
/// Returning `ControlFlow::Break` asks the driver to stop.
pub trait VisualizationSink {
    fn present(&mut self, bodies: &[Body], report: &Report) -> ControlFlow<()>;
}

/// Writes the statistics report through `log` every `report_every` ticks.
#[derive(Clone, Debug)]
pub struct LogSink {
    report_every: u64,
}

impl LogSink {
    pub fn new(report_every: u64) -> LogSink {
        LogSink {
            report_every: report_every.max(1),
        }
    }

    fn is_due(&self, tick: u64) -> bool {
        tick % self.report_every == 0
    }
}

impl VisualizationSink for LogSink {
    fn present(&mut self, bodies: &[Body], report: &Report) -> ControlFlow<()> {
        if self.is_due(report.tick) {
            log::info!("tick {} ({} bodies)\n{}", report.tick, bodies.len(), report);
        }
        ControlFlow::Continue(())
    }
}

impl<F> VisualizationSink for F
where
    F: FnMut(&[Body], &Report) -> ControlFlow<()>,
{
    fn present(&mut self, bodies: &[Body], report: &Report) -> ControlFlow<()> {
        self(bodies, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::statistics::StatisticsSnapshot;

    fn report(tick: u64) -> Report {
        Report {
            tick,
            years_elapsed: 0.,
            statistics: StatisticsSnapshot::default(),
        }
    }

    #[test]
    fn log_sink_reports_on_schedule() {
        let sink = LogSink::new(10);
        assert!(sink.is_due(10));
        assert!(sink.is_due(20));
        assert!(!sink.is_due(15));
    }

    #[test]
    fn zero_interval_reports_every_tick() {
        let mut sink = LogSink::new(0);
        for tick in 1..5 {
            assert!(sink.is_due(tick));
            assert_eq!(sink.present(&[], &report(tick)), ControlFlow::Continue(()));
        }
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = vec![];
        let mut sink = |_: &[Body], report: &Report| {
            seen.push(report.tick);
            if report.tick >= 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        assert_eq!(sink.present(&[], &report(1)), ControlFlow::Continue(()));
        assert_eq!(sink.present(&[], &report(2)), ControlFlow::Break(()));
        assert_eq!(seen, vec![1, 2]);
    }
}
