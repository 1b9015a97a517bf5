use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use tokio::sync::mpsc;

use crate::application::services::PeriodicTask;

/// Server-sent event stream fed by a periodic poll.
///
/// The stream owns the poll handle: when the client goes away the stream is
/// dropped and the poll is cancelled with it.
pub fn poll_stream<F, Fut>(
    name: &'static str,
    period: Duration,
    mut fetch: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Event> + Send + 'static,
{
    let (sender, mut receiver) = mpsc::channel::<Event>(4);

    let task = PeriodicTask::spawn(name, period, move || {
        let sender = sender.clone();
        let next = fetch();
        async move {
            if sender.send(next.await).await.is_err() {
                tracing::debug!(task = name, "Event stream receiver gone");
            }
        }
    });

    let stream = async_stream::stream! {
        let _task = task;
        while let Some(event) = receiver.recv().await {
            yield Ok::<_, Infallible>(event);
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// JSON payload event, or an `error` event naming what failed.
pub fn json_event<T: serde::Serialize>(kind: &'static str, payload: Option<&T>) -> Event {
    let Some(payload) = payload else {
        return Event::default().event("error").data(kind);
    };
    Event::default()
        .event(kind)
        .json_data(payload)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, event = kind, "Failed to encode event payload");
            Event::default().event("error").data(kind)
        })
}
