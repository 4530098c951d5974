use std::ops::Range;

use super::pool::ThreadPool;

/// Split `rows` into `parts` contiguous ranges whose lengths differ by at most one.
///
/// Always returns exactly `parts` ranges (some may be empty) so every participant of a
/// rendezvous gets a slot. Earlier ranges take the remainder.
pub(crate) fn split_even(rows: Range<usize>, parts: usize) -> Vec<Range<usize>> {
    assert!(parts > 0, "cannot split rows into zero parts");
    let total = rows.len();
    let (base, extra) = (total / parts, total % parts);
    let mut start = rows.start;
    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Run `work` once per item: all but the last on pool workers, the last on the caller.
///
/// Returns after every item has been processed. With `pool.size() + 1` items every worker
/// and the caller run exactly one item at the same time, which rendezvous barriers rely on.
pub(crate) fn fan_out<T, F>(pool: &ThreadPool, items: Vec<T>, work: F)
where
    T: Send,
    F: Fn(T) + Sync,
{
    let work = &work;
    pool.scope(|s| {
        let mut items = items.into_iter();
        let last = items.next_back();
        let ids: Vec<_> = items.map(|item| s.add(move || work(item))).collect();
        if let Some(item) = last {
            work(item);
        }
        s.wait_all(&ids);
    });
}

#[cfg(test)]
#[path = "../../tests/unit/parallel/bands.rs"]
mod tests;
