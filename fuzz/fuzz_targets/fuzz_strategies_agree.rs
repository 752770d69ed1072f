#![no_main]

use libfuzzer_sys::fuzz_target;

use fibmemo_core::engine::FibEngine;
use fibmemo_core::observers::NoOpObserver;
use fibmemo_core::progress::CancellationToken;
use fibmemo_core::strategy::Strategy;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    // Two bytes of index (capped for speed) and one of recursion depth.
    let n = u64::from(u16::from_le_bytes([data[0], data[1]])) % 5_000;
    let max_depth = usize::from(data[2]) + 1;

    let mut iterative = FibEngine::new();
    let mut recursive = FibEngine::with_strategy(Strategy::Recursive { max_depth });
    let expected = iterative.fib_owned(n);
    assert_eq!(recursive.fib(n), &expected, "F({n}) with depth {max_depth}");

    let mut observed = FibEngine::with_strategy(Strategy::Recursive { max_depth });
    let value = observed
        .compute(n, &CancellationToken::new(), &NoOpObserver::new())
        .unwrap();
    assert_eq!(value, &expected);
    assert_eq!(observed.cache().len(), n.max(10) + 1);
});
