use proptest::prelude::*;
use stationagg::chunk::split;
use stationagg::{
    aggregate, aggregate_chunk, reference, Executor, Options, StationTable, Summary, Tenths,
};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("A".to_string()),
        Just("Ab".to_string()),
        Just("Abc".to_string()),
        Just("Zürich".to_string()),
        "[a-zA-Z][a-zA-Z ]{0,11}",
    ]
}

fn arb_lines() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec((arb_key(), -999i32..=999), 0..200)
}

fn render(lines: &[(String, i32)]) -> Vec<u8> {
    let mut buf = String::new();
    for (key, value) in lines {
        buf.push_str(&format!("{key};{}\n", Tenths(*value)));
    }
    buf.into_bytes()
}

fn rows<'a>(summary: &'a Summary<'_>) -> Vec<(&'a [u8], u64, i64, Tenths, Tenths)> {
    summary
        .iter()
        .map(|st| (st.key(), st.count(), st.sum(), st.min(), st.max()))
        .collect()
}

proptest! {
    #[test]
    fn chunk_merge_matches_single_pass(lines in arb_lines(), workers in 1usize..12) {
        let buf = render(&lines);
        let single = aggregate_chunk(&buf, 2).into_summary();

        for executor in [Executor::Rayon, Executor::Threads] {
            let options = Options::default()
                .with_executor(executor)
                .with_workers(workers)
                .with_initial_slots(2);
            let merged = aggregate(&buf, &options).unwrap().into_summary();
            prop_assert_eq!(rows(&merged), rows(&single));
        }
    }

    #[test]
    fn merge_order_does_not_matter(lines in arb_lines(), workers in 1usize..8) {
        let buf = render(&lines);
        let single = aggregate_chunk(&buf, 2).into_summary();

        let mut total = StationTable::with_slots(2);
        for chunk in split(&buf, workers).into_iter().rev() {
            total.merge(aggregate_chunk(chunk, 2));
        }
        let merged = total.into_summary();
        prop_assert_eq!(rows(&merged), rows(&single));
    }

    #[test]
    fn reference_agrees_with_table_path(lines in arb_lines()) {
        let buf = render(&lines);
        let fast = aggregate_chunk(&buf, 8).into_summary();
        let slow = reference::aggregate(&buf).unwrap();
        prop_assert_eq!(rows(&fast), rows(&slow));
    }

    #[test]
    fn chunk_cuts_land_after_newlines(lines in arb_lines(), count in 0usize..20) {
        let buf = render(&lines);
        let chunks = split(&buf, count);
        prop_assert_eq!(chunks.len(), count.max(1));
        prop_assert_eq!(chunks.concat(), buf.clone());
        for chunk in &chunks[..chunks.len() - 1] {
            prop_assert!(chunk.is_empty() || chunk.ends_with(b"\n"));
        }
    }
}

#[test]
fn three_line_example_renders() {
    let buf = b"A;1.0\nB;2.0\nA;3.0\n";
    let summary = aggregate(buf, &Options::default()).unwrap().into_summary();
    let mut out = Vec::new();
    summary.write_to(&mut out).unwrap();
    assert_eq!(out, b"{A=1.0/2.0/3.0, B=2.0/2.0/2.0}\n");
}
