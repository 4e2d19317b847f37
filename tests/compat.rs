//! Compatibility-cache behavior across types and threads.

use std::any::Any;
use std::sync::{Arc, Barrier};
use std::thread;

use guardpost::testing::{BufferedByteStream, ByteStream, Stream, TextStream};
use guardpost::{is_compatible, Arg, Compatible, FaultKind};

// ============================================================================
// VALUE TYPES AND OPTION WRAPPERS
// ============================================================================

#[test]
fn value_types_need_an_exact_present_match() {
    assert!(is_compatible::<i32, _>(&5i32));
    assert!(!is_compatible::<i32, _>(&"x"));
    assert!(!is_compatible::<i32, _>(&5.0f64));
    assert!(!is_compatible::<i32, _>(&None::<i32>));
}

#[test]
fn option_targets_accept_absence_and_the_inner_type() {
    assert!(is_compatible::<Option<i32>, _>(&None::<i32>));
    assert!(is_compatible::<Option<i32>, _>(&Some(5i32)));
    assert!(is_compatible::<Option<i32>, _>(&5i32));
    assert!(!is_compatible::<Option<i32>, _>(&"x"));
}

// ============================================================================
// DECLARED WIDENING
// ============================================================================

#[test]
fn widening_respects_the_declared_closure() {
    // Direct edge.
    assert!(is_compatible::<dyn Stream, _>(&ByteStream));
    assert!(is_compatible::<dyn Stream, _>(&TextStream));

    // Transitive edge: BufferedByteStream -> ByteStream -> dyn Stream.
    assert!(is_compatible::<dyn Stream, _>(&BufferedByteStream));
    assert!(is_compatible::<ByteStream, _>(&BufferedByteStream));

    // Unrelated and reversed edges stay incompatible.
    assert!(!is_compatible::<ByteStream, _>(&TextStream));
    assert!(!is_compatible::<BufferedByteStream, _>(&ByteStream));
    assert!(!is_compatible::<String, _>(&ByteStream));
}

#[test]
fn erased_candidates_use_their_runtime_type() {
    let slot: Box<dyn Any> = Box::new(TextStream);
    assert!(is_compatible::<dyn Stream, _>(&slot));
    assert!(is_compatible::<TextStream, _>(&slot));
    assert!(!is_compatible::<ByteStream, _>(&slot));
}

#[test]
fn widening_flows_through_chain_type_checks() {
    let arg = Arg::new(BufferedByteStream, "stream")
        .compatible_with::<dyn Stream>()
        .unwrap();
    let fault = arg.compatible_with::<TextStream>().unwrap_err();
    assert_eq!(fault.kind, FaultKind::Type);
    assert_eq!(fault.name, "stream");
}

// ============================================================================
// CROSS-THREAD AGREEMENT
// ============================================================================

#[test]
fn concurrent_first_queries_agree_everywhere() {
    #[derive(Debug)]
    struct FreshTarget;
    impl Compatible for FreshTarget {}

    guardpost::impl_inspect!(FreshTarget);

    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (
                    is_compatible::<FreshTarget, _>(&FreshTarget),
                    is_compatible::<FreshTarget, _>(&5i32),
                )
            })
        })
        .collect();

    for handle in handles {
        let (exact, unrelated) = handle.join().unwrap();
        assert!(exact);
        assert!(!unrelated);
    }

    // Later queries still agree with the installed predicate.
    assert!(is_compatible::<FreshTarget, _>(&FreshTarget));
}

#[test]
fn distinct_targets_never_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(is_compatible::<u64, _>(&7u64));
                    assert!(is_compatible::<Option<u64>, _>(&None::<u64>));
                    assert!(!is_compatible::<u64, _>(&(i as u32)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
