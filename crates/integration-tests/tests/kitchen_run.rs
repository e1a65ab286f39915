//! End-to-end kitchen runs through the coordinator

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use brigade_core::application::{Coordinator, KitchenConfig, KitchenDeps, ShutdownMode};
use brigade_core::domain::{Menu, MenuItem, WorkItem};
use brigade_core::port::id_provider::mocks::SequentialIdProvider;
use brigade_core::port::order_handler::mocks::{PanickingHandler, RecordingHandler};
use brigade_core::port::pacer::mocks::RecordingPacer;
use brigade_core::port::priority_source::mocks::ScriptedPriority;
use brigade_core::port::time_provider::mocks::FixedTimeProvider;
use brigade_core::port::{OrderHandler, RandomPriority};

fn menu() -> Menu {
    Menu::new(vec![
        MenuItem::new(1, "Burger", 10, 15),
        MenuItem::new(2, "Salad", 5, 10),
        MenuItem::new(3, "Soup", 4, 6),
    ])
    .unwrap()
}

fn deps(handler: Arc<dyn OrderHandler>) -> KitchenDeps {
    KitchenDeps {
        catalog: Arc::new(menu()),
        priorities: Arc::new(RandomPriority::seeded(1..=5, 11).unwrap()),
        pacer: Arc::new(RecordingPacer::new()),
        handler,
        id_provider: Arc::new(SequentialIdProvider::new("order")),
        time_provider: Arc::new(FixedTimeProvider {
            current_time: 1_000,
        }),
    }
}

#[test]
fn test_every_order_is_served_exactly_once() {
    let handler = Arc::new(RecordingHandler::with_delay(Duration::from_millis(2)));
    let coordinator =
        Coordinator::new(KitchenConfig::new(3, 30, 4), deps(handler.clone())).unwrap();

    let orders: Vec<u32> = (0..30).map(|i| (i % 3) + 1).collect();
    let summary = coordinator.run(orders).unwrap();

    assert!(summary.rejected.is_empty());
    assert_eq!(summary.receipts.len(), 30);
    assert_eq!(summary.total_processed(), 30);

    let placed: HashSet<_> = summary.receipts.iter().map(|r| r.ticket.clone()).collect();
    let served: Vec<_> = handler
        .handled_items()
        .iter()
        .map(|i| i.ticket().to_string())
        .collect();
    let served_set: HashSet<_> = served.iter().cloned().collect();
    assert_eq!(served.len(), served_set.len(), "no order served twice");
    assert_eq!(placed, served_set, "no order lost");

    assert!(summary.stats.high_water_mark <= 3);
    assert!(summary.receipts.iter().all(|r| (1..=5).contains(&r.priority)));
}

#[test]
fn test_invalid_dish_is_reported_not_queued() {
    let handler = Arc::new(RecordingHandler::new());
    let coordinator =
        Coordinator::new(KitchenConfig::new(2, 3, 1), deps(handler.clone())).unwrap();

    let summary = coordinator.run(vec![1, 42, 2]).unwrap();

    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].producer_id, 2);
    assert_eq!(summary.rejected[0].item_id, 42);
    assert!(summary.rejected[0].reason.contains("No such menu item"));
    assert_eq!(summary.stats.pushed, 2);
    assert!(handler.handled_items().iter().all(|i| i.item_id() != 42));
}

#[test]
fn test_single_server_prefers_urgent_orders() {
    // The first order keeps the only server busy while the rest queue up
    let handler = Arc::new(RecordingHandler::with_delay(Duration::from_millis(150)));
    let mut deps = deps(handler.clone());
    deps.priorities = Arc::new(ScriptedPriority::new([5], 3));
    // The client keeps eating long enough for the kitchen to stay open
    deps.pacer = Arc::new(RecordingPacer::with_delay(Duration::from_millis(400)));

    let coordinator = Coordinator::new(KitchenConfig::new(4, 1, 1), deps).unwrap();
    let queue = coordinator.queue();

    // The single client's order is popped at once by the idle server
    let runner = thread::spawn(move || coordinator.run(vec![1]));
    let deadline = Instant::now() + Duration::from_secs(5);
    while handler.handled().is_empty() {
        assert!(Instant::now() < deadline, "server never picked up the first order");
        thread::sleep(Duration::from_millis(1));
    }

    // While the server is busy, two more orders arrive directly
    queue
        .push(WorkItem::new("late-low", 9, 2, Duration::ZERO, 4, 0))
        .unwrap();
    queue
        .push(WorkItem::new("late-high", 9, 3, Duration::ZERO, 1, 0))
        .unwrap();

    let summary = runner.join().unwrap().unwrap();
    assert_eq!(summary.total_processed(), 3);

    let served: Vec<_> = handler
        .handled_items()
        .iter()
        .map(|i| i.ticket().to_string())
        .collect();
    assert_eq!(served, vec!["order-1", "late-high", "late-low"]);
}

#[test]
fn test_abort_releases_blocked_clients_and_reports_leftovers() {
    let handler = Arc::new(RecordingHandler::with_delay(Duration::from_millis(50)));
    let coordinator =
        Coordinator::new(KitchenConfig::new(1, 8, 1), deps(handler.clone())).unwrap();
    let stop = coordinator.stop_handle();
    let queue = coordinator.queue();

    let runner = thread::spawn(move || coordinator.run(vec![1; 8]));

    // Wait until the kitchen is busy, then pull the plug
    let deadline = Instant::now() + Duration::from_secs(5);
    while queue.stats().pushed < 2 {
        assert!(Instant::now() < deadline, "kitchen never got busy");
        thread::sleep(Duration::from_millis(1));
    }
    stop.stop(ShutdownMode::Abort);

    let summary = runner.join().unwrap().unwrap();
    assert!(summary.aborted);
    assert!(stop.is_stopped());

    // Every client either got a receipt or was turned away
    assert_eq!(summary.receipts.len() + summary.rejected.len(), 8);
    assert!(summary
        .rejected
        .iter()
        .all(|r| r.reason.contains("closed")));

    // Every accepted order was either served or handed back
    assert_eq!(
        summary.receipts.len(),
        summary.total_processed() + summary.abandoned.len()
    );
    assert!(summary.abandoned.len() <= 1, "capacity is 1");
}

#[test]
fn test_abort_while_server_busy_reports_every_queued_order() {
    let handler = Arc::new(RecordingHandler::with_delay(Duration::from_millis(100)));
    let mut deps = deps(handler.clone());
    // Clients stay at the table, so the queue is still open when the abort lands
    deps.pacer = Arc::new(RecordingPacer::with_delay(Duration::from_millis(400)));
    let coordinator = Coordinator::new(KitchenConfig::new(4, 3, 1), deps).unwrap();
    let stop = coordinator.stop_handle();
    let queue = coordinator.queue();

    let runner = thread::spawn(move || coordinator.run(vec![1, 2, 3]));

    let deadline = Instant::now() + Duration::from_secs(5);
    while queue.stats().pushed < 3 || queue.stats().popped < 1 {
        assert!(Instant::now() < deadline, "orders never reached the server");
        thread::sleep(Duration::from_millis(1));
    }
    stop.stop(ShutdownMode::Abort);

    let summary = runner.join().unwrap().unwrap();
    assert!(summary.aborted);
    assert_eq!(summary.receipts.len(), 3);
    assert_eq!(summary.total_processed(), 1);
    assert_eq!(summary.abandoned.len(), 2);
    assert_eq!(
        summary.receipts.len(),
        summary.total_processed() + summary.abandoned.len()
    );
}

#[test]
fn test_panicking_order_is_contained() {
    let handler = Arc::new(PanickingHandler::new(3));
    let coordinator =
        Coordinator::new(KitchenConfig::new(2, 4, 2), deps(handler.clone())).unwrap();

    let summary = coordinator.run(vec![1, 3, 2, 3]).unwrap();

    assert_eq!(summary.total_failed(), 2);
    assert_eq!(summary.total_processed(), 2);
    assert_eq!(handler.inner.handled().len(), 2);
}
