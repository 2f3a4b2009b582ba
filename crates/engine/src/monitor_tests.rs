// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::report::load_report;
use hy_adapters::{ApiError, FakeHydraClient, HydraCall};
use hy_core::test_support::build;
use hy_core::{BuildId, Evaluation, FakeClock};
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingObserver {
    messages: Mutex<Vec<String>>,
    progress: Mutex<Vec<(JobCounters, bool)>>,
}

impl ProgressObserver for RecordingObserver {
    fn message(&self, line: &str) {
        self.messages.lock().push(line.to_string());
    }

    fn progress(&self, status: &JobsetStatus, jobs: Option<&JobsetJobs>) {
        self.progress.lock().push((status.counters(), jobs.is_some()));
    }
}

fn snapshot(succeeded: u64, failed: u64, scheduled: u64, total: u64) -> JobsetStatus {
    JobsetStatus::builder()
        .name("v1")
        .project("ros")
        .succeeded(succeeded)
        .failed(failed)
        .scheduled(scheduled)
        .total(total)
        .build()
}

fn config() -> MonitorConfig {
    MonitorConfig {
        timeout: Some(Duration::from_secs(3600)),
        poll_interval: Duration::from_secs(30),
        ..MonitorConfig::new("ros", "v1")
    }
}

#[tokio::test]
async fn success_exits_zero_with_one_report_entry() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(1, 0, 4, 5)]);
    hydra.push_listing("ros", vec![snapshot(5, 0, 0, 5)]);
    hydra.set_evals("ros", "v1", vec![Evaluation { id: 1, builds: vec![BuildId(10)] }]);
    hydra.add_build(build(10, Some(0), vec![]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let clock = FakeClock::new();
    let observer = RecordingObserver::default();

    let result = Monitor::new(&hydra, clock.clone(), config())
        .with_report(Some(ReportSink::new(&path, "Build")))
        .run(&observer)
        .await
        .unwrap();

    assert_eq!(result.outcome, MonitorOutcome::Succeeded);
    assert_eq!(result.outcome.exit_code(), 0);
    assert_eq!(result.message, "Job reports success 🎉 (took 30.0s) for https://hydra.test/jobset/ros/v1");
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(30)]);

    let entries = load_report(&path).unwrap();
    assert_eq!(entries.len(), 1);
    let report: MonitorReport = serde_json::from_value(entries[0].1.clone()).unwrap();
    assert_eq!(report.exit_code, 0);
    assert_eq!(report.jobset_url, "https://hydra.test/jobset/ros/v1");
    assert_eq!(report.duration, 30.0);
    assert_eq!(report.end - report.start, 30.0);
    assert_eq!(report.job.map(|j| j.succeeded), Some(5));
    assert!(report.hydra_jobset_jobs.is_some_and(|j| j.builds.contains_key(&BuildId(10))));
    assert!(hydra.mutations().is_empty());
}

#[tokio::test]
async fn pending_past_timeout_cancels_and_exits_four() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(1, 0, 4, 5)]);
    hydra.set_evals("ros", "v1", vec![Evaluation { id: 1, builds: vec![BuildId(10), BuildId(11)] }]);
    hydra.add_build(build(10, Some(0), vec![]));
    hydra.add_build(build(11, None, vec![]));
    let clock = FakeClock::new();
    let observer = RecordingObserver::default();
    let config = MonitorConfig { timeout: Some(Duration::from_secs(60)), ..config() };

    let result = Monitor::new(&hydra, clock.clone(), config).run(&observer).await.unwrap();

    assert_eq!(result.outcome, MonitorOutcome::TimedOut);
    assert_eq!(result.outcome.exit_code(), 4);
    assert_eq!(hydra.mutations(), vec![HydraCall::CancelBuild { id: BuildId(11) }]);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(30), Duration::from_secs(30)]);
    assert!(result.message.starts_with("Job exceeded allowed runtime (took 60.0s)"));
    let messages = observer.messages.lock().clone();
    assert_eq!(messages.first().map(String::as_str), Some("https://hydra.test/jobset/ros/v1"));
    assert_eq!(messages.last(), Some(&result.message));
}

#[tokio::test]
async fn vanished_jobset_exits_two() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(1, 0, 4, 5)]);
    hydra.push_listing("ros", vec![]);
    let clock = FakeClock::new();

    let result = Monitor::new(&hydra, clock, config()).run(&SilentObserver).await.unwrap();

    assert_eq!(result.outcome, MonitorOutcome::Disappeared);
    assert_eq!(result.outcome.exit_code(), 2);
    assert!(result.message.starts_with("Job 'v1' disappeared (took 30.0s)"));
    assert_eq!(result.job.map(|j| j.scheduled), Some(4));
}

#[tokio::test]
async fn partial_failure_exits_three() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(3, 2, 0, 5)]);
    let clock = FakeClock::new();

    let result = Monitor::new(&hydra, clock.clone(), config()).run(&SilentObserver).await.unwrap();

    assert_eq!(result.outcome, MonitorOutcome::Failed);
    assert_eq!(result.outcome.exit_code(), 3);
    assert_eq!(
        result.message,
        "Job reports failure 🟧 (took 0.0s), reporting failure for https://hydra.test/jobset/ros/v1"
    );
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn progress_only_on_counter_change() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![JobsetStatus { last_checked: None, ..snapshot(0, 0, 0, 0) }]);
    hydra.push_listing("ros", vec![snapshot(1, 0, 2, 3)]);
    hydra.push_listing("ros", vec![snapshot(1, 0, 2, 3)]);
    hydra.push_listing("ros", vec![snapshot(3, 0, 0, 3)]);
    let observer = RecordingObserver::default();

    Monitor::new(&hydra, FakeClock::new(), config()).run(&observer).await.unwrap();

    let progress: Vec<JobCounters> = observer.progress.lock().iter().map(|(c, _)| *c).collect();
    assert_eq!(
        progress,
        vec![
            JobCounters { succeeded: 1, failed: 0, scheduled: 2 },
            JobCounters { succeeded: 3, failed: 0, scheduled: 0 },
        ]
    );
}

#[tokio::test]
async fn progress_repeats_after_report_interval() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(1, 0, 2, 3)]);
    let observer = RecordingObserver::default();
    let config = MonitorConfig {
        timeout: Some(Duration::from_secs(100)),
        report_interval: Duration::from_secs(45),
        ..config()
    };

    let result = Monitor::new(&hydra, FakeClock::new(), config).run(&observer).await.unwrap();

    assert_eq!(result.outcome, MonitorOutcome::TimedOut);
    // Ticks at 0, 30, 60, 90; the interval is exceeded at 60
    assert_eq!(observer.progress.lock().len(), 2);
}

#[tokio::test]
async fn definitive_api_error_aborts() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(1, 0, 2, 3)]);
    hydra.fail_next(ApiError::Status {
        method: "GET".into(),
        path: "/api/jobsets?project=ros".into(),
        status: 403,
        body: String::new(),
    });

    let err = Monitor::new(&hydra, FakeClock::new(), config()).run(&SilentObserver).await.unwrap_err();

    assert!(matches!(err, EngineError::Api(ref e) if e.status() == Some(403)));
}

#[tokio::test]
async fn report_without_evaluations_has_no_jobs() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![snapshot(2, 0, 0, 2)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("r.json");

    Monitor::new(&hydra, FakeClock::new(), config())
        .with_report(Some(ReportSink::new(&path, "Build")))
        .run(&SilentObserver)
        .await
        .unwrap();

    let entries = load_report(&path).unwrap();
    assert_eq!(entries[0].1["hydra_jobset_jobs"], serde_json::Value::Null);
    assert_eq!(entries[0].1["exit_code"], 0);
}
