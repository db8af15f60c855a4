//! Concurrent writers against one hub.
//!
//! Every session and the sink must observe accepted updates in the single
//! order the store applied them, and the last one observed must be the
//! stored document.

use profile_document::{Document, RecordingSink};
use serde_json::json;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use sync_hub::{ServerMessage, SyncHub, UpdateOutcome};

const WRITERS: usize = 8;
const UPDATES_PER_WRITER: usize = 200;
const WATCHERS: usize = 4;
const TOTAL: usize = WRITERS * UPDATES_PER_WRITER;

fn update(writer: usize, seq: usize) -> serde_json::Value {
    json!({
        "currentProfile": format!("W{}", writer),
        "lastModified": format!("{}:{}", writer, seq),
        "profiles": { format!("W{}", writer): [{ "seq": seq }] }
    })
}

#[test]
fn concurrent_updates_share_one_order() {
    let sink = Arc::new(RecordingSink::new());
    let hub = Arc::new(SyncHub::new(Document::default(), sink.clone(), None));

    let watchers: Vec<_> = (0..WATCHERS)
        .map(|_| {
            let mut session = hub.connect();
            assert!(matches!(
                session.try_recv().as_deref(),
                Some(ServerMessage::InitData(_))
            ));
            thread::spawn(move || {
                let deadline = Instant::now() + Duration::from_secs(30);
                let mut seen = Vec::with_capacity(TOTAL);
                while seen.len() < TOTAL {
                    assert!(Instant::now() < deadline, "watcher stalled at {}", seen.len());
                    match session.try_recv() {
                        Some(message) => match &*message {
                            ServerMessage::SyncUpdate(document) => seen.push(document.clone()),
                            other => panic!("unexpected message {:?}", other.event_name()),
                        },
                        None => thread::yield_now(),
                    }
                }
                seen
            })
        })
        .collect();

    let writers: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let session = hub.connect();
            thread::spawn(move || {
                for seq in 0..UPDATES_PER_WRITER {
                    let outcome = session.submit(update(writer, seq));
                    assert!(matches!(outcome, UpdateOutcome::Applied { .. }));
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    let observed: Vec<Vec<Document>> = watchers
        .into_iter()
        .map(|watcher| watcher.join().unwrap())
        .collect();

    let order = &observed[0];
    assert_eq!(order.len(), TOTAL);
    for other in &observed[1..] {
        assert_eq!(other, order);
    }
    assert_eq!(order.last(), Some(&hub.snapshot()));
    assert_eq!(&sink.documents(), order);

    // Each writer's own updates keep their submission order.
    for writer in 0..WRITERS {
        let mine: Vec<_> = order
            .iter()
            .filter(|doc| doc.active_profile_name() == Some(format!("W{}", writer).as_str()))
            .cloned()
            .collect();
        let expected: Vec<_> = (0..UPDATES_PER_WRITER)
            .map(|seq| Document::from_candidate(update(writer, seq)).unwrap())
            .collect();
        assert_eq!(mine, expected);
    }
}
