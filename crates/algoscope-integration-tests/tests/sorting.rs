//! Sorting runs through the engine, end to end.

use std::time::Duration;

use algoscope_core::{PaceTier, RunEvent, RunStatus};
use algoscope_engine::{AlgorithmId, Engine, Input, SortAlgorithm};
use algoscope_integration_tests::{assert_well_formed, collect, seeded_sequence};

#[tokio::test]
async fn every_sort_completes_with_a_well_formed_stream() {
    let _ = algoscope_logging::init_for_tests();
    let engine = Engine::new();
    let input = seeded_sequence(1, 300);
    let mut expected = input.clone();
    expected.sort();

    for sort in SortAlgorithm::ALL {
        let handle = engine
            .start(AlgorithmId::Sort(sort), Input::Sequence(input.clone()), PaceTier::Benchmark.pace())
            .unwrap();
        let (events, report) = collect(handle).await;

        assert_well_formed(&events);
        assert_eq!(events.last(), Some(&RunEvent::Completed), "{sort}");
        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.sequence.as_deref(), Some(expected.as_slice()), "{sort}");
        assert!(events.contains(&RunEvent::State { values: expected.clone() }));
        if sort == SortAlgorithm::Counting {
            assert_eq!(report.metrics.comparisons, 0);
        } else {
            assert!(report.metrics.comparisons > 0, "{sort}");
        }
    }
}

#[tokio::test]
async fn merge_and_quick_publish_partial_ranges() {
    let engine = Engine::new();
    let input = seeded_sequence(2, 64);
    let fine = algoscope_core::Pace::new(Duration::ZERO, 1);
    for sort in [SortAlgorithm::Merge, SortAlgorithm::Quick] {
        let handle = engine
            .start(AlgorithmId::Sort(sort), Input::Sequence(input.clone()), fine)
            .unwrap();
        let (events, _) = collect(handle).await;
        let partials: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Partial { offset, values } => Some((*offset, values.len())),
                _ => None,
            })
            .collect();
        assert!(!partials.is_empty(), "{sort}");
        assert!(partials.iter().all(|&(offset, len)| offset + len <= input.len()));
    }
}

#[tokio::test]
async fn counters_repeat_for_identical_runs() {
    let engine = Engine::new();
    let input = seeded_sequence(3, 120);
    for sort in SortAlgorithm::ALL {
        let start = || {
            engine
                .start(AlgorithmId::Sort(sort), Input::Sequence(input.clone()), PaceTier::Benchmark.pace())
                .unwrap()
        };
        let (_, a) = collect(start()).await;
        let (_, b) = collect(start()).await;
        assert!(a.metrics.same_counts(&b.metrics), "{sort}");
    }
}

#[tokio::test(start_paused = true)]
async fn cancelled_sorts_leave_a_permutation() {
    let engine = Engine::new();
    let input = seeded_sequence(4, 200);
    let mut expected = input.clone();
    expected.sort();

    for sort in SortAlgorithm::ALL {
        let handle = engine
            .start(AlgorithmId::Sort(sort), Input::Sequence(input.clone()), PaceTier::Slow.pace())
            .unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;
        handle.cancel();
        let (events, report) = collect(handle).await;

        assert_well_formed(&events);
        assert_eq!(events.last(), Some(&RunEvent::Cancelled), "{sort}");
        assert!(!events.contains(&RunEvent::Completed));
        assert_eq!(events[events.len() - 3], RunEvent::Highlight { focus: vec![] });

        let mut left = report.sequence.unwrap();
        left.sort();
        assert_eq!(left, expected, "{sort} lost or duplicated elements");
    }
}
