//! Splitting per-particle work across scoped threads

use std::thread;

/// Number of worker threads to use for a step.
pub fn worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fill `out[i] = compute(i)` using up to `workers` threads.
///
/// Each worker owns one contiguous chunk of `out`, so results do not depend
/// on the number of workers.
pub fn fill_parallel<T, F>(out: &mut [T], workers: usize, compute: F)
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let workers = workers.max(1);
    if workers == 1 || out.len() < workers * 2 {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = compute(i);
        }
        return;
    }

    let chunk_len = out.len().div_ceil(workers);
    let compute = &compute;
    thread::scope(|scope| {
        for (chunk_index, chunk) in out.chunks_mut(chunk_len).enumerate() {
            scope.spawn(move || {
                let base = chunk_index * chunk_len;
                for (offset, slot) in chunk.iter_mut().enumerate() {
                    *slot = compute(base + offset);
                }
            });
        }
    });
}
