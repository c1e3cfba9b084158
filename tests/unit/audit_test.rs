//! Tests for audit sinks

use pool_gate::core::{
    build_audit_event, AuditSink, InMemoryAuditSink, Pool, PoolSlotsAvailableDep,
    SharedAuditSink, TaskInstanceRequest, TaskInstanceState, TiDep,
};
use pool_gate::infra::InMemoryPoolStore;

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event("evt1", "task1", "pool1", "admit", Some("reason".to_string()));

    sink.record(event);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, "evt1");
    assert_eq!(events[0].task_id, "task1");
    assert_eq!(events[0].action, "admit");
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("evt1", "task1", "pool1", "admit", None));
    sink.record(build_audit_event("evt2", "task2", "pool1", "refuse", None));
    sink.record(build_audit_event("evt3", "task3", "pool1", "admit", None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_id, "evt2"); // First one popped
    assert_eq!(events[1].event_id, "evt3");
}

#[test]
fn test_zero_capacity_sink_keeps_nothing() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event("evt1", "task1", "pool1", "admit", None));
    assert!(sink.events().is_empty());
}

#[test]
fn test_dep_records_each_decision() {
    let store = InMemoryPoolStore::new();
    store.create_pool(Pool::new("test_pool", 1, false).unwrap()).unwrap();
    let audit = SharedAuditSink::new(16);
    let dep = PoolSlotsAvailableDep::new(store).with_audit(Box::new(audit.clone()));

    let ok = TaskInstanceRequest::new("t1", "test_pool", 1, TaskInstanceState::Scheduled).unwrap();
    let missing = ok.clone().with_pool("nonexistent_pool");
    assert!(dep.is_met(&ok).unwrap());
    assert!(!dep.is_met(&missing).unwrap());

    let events = audit.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "admit");
    assert_eq!(events[0].pool, "test_pool");
    assert_eq!(events[1].action, "refuse");
    assert_eq!(events[1].pool, "nonexistent_pool");
    assert_ne!(events[0].event_id, events[1].event_id);
    assert!(events[1].payload.as_deref().unwrap().contains("non-existent pool"));
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event("evt1", "task1", "pool1", "refuse", Some("full".to_string()));

    assert_eq!(event.event_id, "evt1");
    assert_eq!(event.task_id, "task1");
    assert_eq!(event.pool, "pool1");
    assert_eq!(event.action, "refuse");
    assert_eq!(event.payload, Some("full".to_string()));
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_audited_dep_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let store = InMemoryPoolStore::new();
    store.create_pool(Pool::new("test_pool", 1, false).unwrap()).unwrap();
    let audit = SharedAuditSink::new(64);
    let dep = PoolSlotsAvailableDep::new(store).with_audit(Box::new(audit.clone()));
    assert_send_sync(&dep);

    let ti = TaskInstanceRequest::new("t1", "test_pool", 1, TaskInstanceState::Scheduled).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..8 {
                    assert!(dep.is_met(&ti).unwrap());
                }
            });
        }
    });
    assert_eq!(audit.events().len(), 32);
}
