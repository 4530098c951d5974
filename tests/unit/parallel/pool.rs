use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;

#[test]
fn auto_size_is_clamped() {
    let pool = ThreadPool::new(0).unwrap();
    assert!((1..=MAX_AUTO_THREADS).contains(&pool.size()));

    let pool = ThreadPool::new(3).unwrap();
    assert_eq!(pool.size(), 3);
}

#[test]
fn ids_strictly_increase() {
    let pool = ThreadPool::new(2).unwrap();
    let a = pool.add(|| {});
    let b = pool.add(|| {});
    let c = pool.add(|| {});
    assert!(a < b && b < c);
    pool.wait_all(&[a, b, c]);
}

#[test]
fn wait_blocks_until_task_finishes() {
    let pool = ThreadPool::new(2).unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    let id = pool.add(move || {
        std::thread::sleep(Duration::from_millis(20));
        h.fetch_add(1, Ordering::SeqCst);
    });
    pool.wait(id);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn wait_all_covers_more_tasks_than_workers() {
    let pool = ThreadPool::new(1).unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let ids: Vec<TaskId> = (0..16)
        .map(|_| {
            let h = Arc::clone(&hits);
            pool.add(move || {
                h.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    pool.wait_all(&ids);
    assert_eq!(hits.load(Ordering::SeqCst), 16);
}

#[test]
fn drop_waits_for_pending_tasks() {
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let pool = ThreadPool::new(2).unwrap();
        for _ in 0..4 {
            let h = Arc::clone(&hits);
            pool.add(move || {
                std::thread::sleep(Duration::from_millis(5));
                h.fetch_add(1, Ordering::SeqCst);
            });
        }
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn drop_joins_every_worker() {
    let pool = ThreadPool::new(3).unwrap();
    let live = Arc::clone(&pool.join.0);
    let id = pool.add(|| std::thread::sleep(Duration::from_millis(5)));
    pool.wait(id);
    assert_eq!(*live.count.lock(), 3);

    drop(pool);
    assert_eq!(*live.count.lock(), 0);
}

#[test]
fn scoped_tasks_borrow_stack_data() {
    let pool = ThreadPool::new(4).unwrap();
    let mut chunks = vec![vec![0u32; 8]; 5];
    pool.scope(|s| {
        let ids: Vec<TaskId> = chunks
            .iter_mut()
            .enumerate()
            .map(|(i, chunk)| {
                s.add(move || {
                    for v in chunk.iter_mut() {
                        *v = i as u32;
                    }
                })
            })
            .collect();
        s.wait_all(&ids);
    });
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.iter().all(|&v| v == i as u32));
    }
}

#[test]
fn scope_returns_body_value_and_shares_id_sequence() {
    let pool = ThreadPool::new(1).unwrap();
    let before = pool.add(|| {});
    let inner = pool.scope(|s| {
        let id = s.add(|| {});
        s.wait(id);
        id
    });
    assert!(inner > before);
    pool.wait(before);
}
