//! Display event loop tests on Tokio's paused clock.
//!
//! Input lines are fed through an mpsc channel and output is captured in a `Vec<u8>`,
//! so the loop runs exactly as in the terminal minus stdin and stdout.
use std::future::pending;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quote_client::RefreshController;
use quote_client::display::{PLACEHOLDER, drive};
use quote_common::{Quote, QuoteSource, Result};
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Source answering every call after `delay` with a quote whose id is the call number.
struct SlowSource {
    calls: AtomicU64,
    delay: Duration,
}

impl SlowSource {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU64::new(0),
            delay,
        })
    }
}

#[async_trait]
impl QuoteSource for SlowSource {
    async fn fetch_random_quote(&self) -> Result<Quote> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        Ok(quote(call))
    }
}

fn quote(id: u64) -> Quote {
    Quote {
        id,
        text: format!("quote number {id}"),
        author: "Tester".into(),
    }
}

/// Helper: let spawned cycle tasks and the loop catch up at the current instant.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn closed_input_stops_the_timer() {
    let controller = RefreshController::new(SlowSource::new(Duration::ZERO));
    let (tx, rx) = mpsc::channel(4);
    drop(tx);

    drive(controller.clone(), rx, pending(), Vec::new())
        .await
        .unwrap();

    assert!(!controller.is_running());
    assert_eq!(controller.cycles_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn quit_command_stops_the_timer() {
    let controller = RefreshController::new(SlowSource::new(Duration::ZERO));
    let (tx, rx) = mpsc::channel(4);
    tx.send("q".to_string()).await.unwrap();

    drive(controller.clone(), rx, pending(), Vec::new())
        .await
        .unwrap();

    assert!(!controller.is_running());

    // Nothing fires afterwards even though the input side is still open.
    sleep(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(controller.cycles_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_signal_stops_the_timer() {
    let controller = RefreshController::new(SlowSource::new(Duration::ZERO));
    let (_tx, rx) = mpsc::channel::<String>(4);

    drive(
        controller.clone(),
        rx,
        sleep(Duration::from_secs(25)),
        Vec::new(),
    )
    .await
    .unwrap();

    // The immediate cycle plus the ticks at 10 s and 20 s.
    assert_eq!(controller.cycles_started(), 3);
    assert!(!controller.is_running());
}

#[tokio::test(start_paused = true)]
async fn refresh_is_ignored_while_a_fetch_is_in_flight() {
    let controller = RefreshController::new(SlowSource::new(Duration::from_secs(5)));
    let (tx, rx) = mpsc::channel(4);
    tx.send("r".to_string()).await.unwrap();
    tx.send("q".to_string()).await.unwrap();

    drive(controller.clone(), rx, pending(), Vec::new())
        .await
        .unwrap();

    assert_eq!(controller.cycles_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn renders_each_new_quote_once() {
    let controller = RefreshController::new(SlowSource::new(Duration::ZERO));
    let (tx, rx) = mpsc::channel(4);
    let mut out = Vec::new();

    let input = async {
        settle().await;
        tx.send(String::new()).await.unwrap();
        settle().await;
        tx.send("q".to_string()).await.unwrap();
    };
    let (result, ()) = tokio::join!(drive(controller.clone(), rx, pending(), &mut out), input);
    result.unwrap();

    assert_eq!(controller.cycles_started(), 2);

    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected output: {printed:?}");
    assert_eq!(lines[0], PLACEHOLDER);
    assert!(lines[1].ends_with(&quote(1).to_string()));
    assert!(lines[2].ends_with(&quote(2).to_string()));
}
