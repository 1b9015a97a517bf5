use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use batchdash::application::services::PeriodicTask;

fn counting_task(period: Duration) -> (PeriodicTask, Arc<AtomicUsize>) {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let task = PeriodicTask::spawn("counter", period, move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    (task, ticks)
}

#[tokio::test(start_paused = true)]
async fn given_spawned_task_when_time_passes_then_ticks_immediately_and_every_period() {
    let (task, ticks) = counting_task(Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);

    task.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_cancelled_task_when_time_passes_then_stops_ticking() {
    let (task, ticks) = counting_task(Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(1500)).await;

    task.cancel();
    assert!(task.is_cancelled());
    let seen = ticks.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn given_dropped_handle_when_time_passes_then_stops_ticking() {
    let (task, ticks) = counting_task(Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(1500)).await;

    drop(task);
    tokio::time::sleep(Duration::from_millis(1)).await;
    let seen = ticks.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn given_slow_tick_when_shutting_down_then_in_flight_tick_is_abandoned() {
    let finished = Arc::new(AtomicUsize::new(0));
    let counter = finished.clone();
    let task = PeriodicTask::spawn("slow", Duration::from_secs(1), move || {
        let counter = counter.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(task.name(), "slow");
    task.shutdown().await;

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}
