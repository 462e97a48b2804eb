// tests/score_tests.rs

// Integration tests for truth-table parsing, scoring, and the full
// decode → extract → score pipeline.

use qca_analysis::{
    Cell, CellArchitecture, CellIndex, CellKind, ExtractionSettings, Layer, LogicFunction,
    LogicState, QcaDesign, ScoreError, SimDuration, SimulationMetadata, TruthRow, analyze_archive,
    analyze_many, encode_archive, extract_truth_table, parse_truth_table, score_rows,
    score_table_text, summarize_timings,
};

use chrono::Local;
use std::collections::HashMap;

use LogicState::{A, B, C, D};

fn row(values: &[Option<LogicState>]) -> TruthRow {
    values.to_vec()
}

// --- Scoring properties over the public API ---

#[test]
fn test_equivalence_folding_before_comparison() {
    let folded = score_rows(&[row(&[Some(D), Some(D)])], LogicFunction::Wire).unwrap();
    let canonical = score_rows(&[row(&[Some(C), Some(C)])], LogicFunction::Wire).unwrap();
    assert_eq!(folded.overall(), 1.0);
    assert_eq!(canonical.overall(), 1.0);
}

#[test]
fn test_wire_partial_credit() {
    let report = score_rows(&[row(&[Some(A), Some(A), Some(B)])], LogicFunction::Wire).unwrap();
    assert_eq!(report.overall(), 0.5);
}

#[test]
fn test_inverter_truth_pairs() {
    let correct = score_rows(&[row(&[Some(B), Some(A)])], LogicFunction::Inverter).unwrap();
    assert_eq!(correct.overall(), 1.0);
    let wrong = score_rows(&[row(&[Some(A), Some(A)])], LogicFunction::Inverter).unwrap();
    assert_eq!(wrong.overall(), 0.0);
}

#[test]
fn test_majority_fixed_table() {
    let correct =
        score_rows(&[row(&[Some(A), Some(B), Some(C), Some(C)])], LogicFunction::Majority)
            .unwrap();
    assert_eq!(correct.overall(), 1.0);
    let wrong =
        score_rows(&[row(&[Some(A), Some(B), Some(C), Some(B)])], LogicFunction::Majority)
            .unwrap();
    assert_eq!(wrong.overall(), 0.0);
}

#[test]
fn test_majority_sentinel_scores_zero() {
    let report =
        score_rows(&[row(&[Some(A), None, Some(C), Some(C)])], LogicFunction::Majority).unwrap();
    assert_eq!(report.row_scores(), &[0.0]);
    // The sentinel row participates in the mean instead of being excluded.
    let mixed = score_rows(
        &[
            row(&[Some(A), None, Some(C), Some(C)]),
            row(&[Some(A), Some(B), Some(C), Some(C)]),
        ],
        LogicFunction::Majority,
    )
    .unwrap();
    assert_eq!(mixed.overall(), 0.5);
}

#[test]
fn test_memory_cell_uses_previous_state_first() {
    // Row [x=A, w=B, q]: the lookup key is (w, x) = (B, A), whose table
    // value is B.
    let retained =
        score_rows(&[row(&[Some(A), Some(B), Some(B)])], LogicFunction::MemoryCell).unwrap();
    assert_eq!(retained.overall(), 1.0);
    let swapped =
        score_rows(&[row(&[Some(A), Some(B), Some(A)])], LogicFunction::MemoryCell).unwrap();
    assert_eq!(swapped.overall(), 0.0);
}

#[test]
fn test_empty_table_scores_one_for_every_function() {
    for function in [
        LogicFunction::Wire,
        LogicFunction::Inverter,
        LogicFunction::Majority,
        LogicFunction::MemoryCell,
    ] {
        assert_eq!(score_rows(&[], function).unwrap().overall(), 1.0);
    }
}

#[test]
fn test_aggregate_is_permutation_invariant() {
    let rows = vec![
        row(&[Some(A), Some(A)]),
        row(&[Some(B), Some(A)]),
        row(&[Some(C), Some(C)]),
    ];
    let forward = score_rows(&rows, LogicFunction::Wire).unwrap();
    let mut shuffled = rows.clone();
    shuffled.rotate_left(1);
    let rotated = score_rows(&shuffled, LogicFunction::Wire).unwrap();
    assert_eq!(forward.overall(), rotated.overall());
}

#[test]
fn test_text_pipeline_with_symbolic_alphabet() {
    let text = "IN\tOUT\t\nB\tA\t\nA\tB\t\nC\tD\t";
    let report = score_table_text(text, LogicFunction::Inverter).unwrap();
    assert_eq!(report.overall(), 1.0);
}

#[test]
fn test_text_pipeline_with_integer_alphabet() {
    // 0→A, 1→B, 2→C, -1→undefined.
    let text = "IN1\tIN2\tIN3\tOUT\t\n0\t1\t2\t2\t\n0\t-1\t2\t2\t";
    let report = score_table_text(text, LogicFunction::Majority).unwrap();
    assert_eq!(report.row_scores(), &[1.0, 0.0]);
    assert_eq!(report.overall(), 0.5);
}

#[test]
fn test_scoring_rejects_foreign_tokens() {
    let result = parse_truth_table("IN\t\nX\t");
    assert!(matches!(result, Err(ScoreError::UnexpectedState { .. })));
}

// --- Full pipeline: encode → decode → extract → score ---

const SAMPLES_PER_CYCLE: usize = 40;
const CYCLES: usize = 4;
const NUM_SAMPLES: usize = SAMPLES_PER_CYCLE * CYCLES;

fn pipeline_design() -> QcaDesign {
    let cell = |label: &str, x: f64| Cell {
        position: [x, 0.0],
        rotation: 0.0,
        typ: CellKind::Normal,
        clock_phase_shift: 0.0,
        dot_probability_distribution: vec![0.25; 8],
        label: Some(label.to_string()),
    };
    let mut layer = Layer::new("main".to_string(), "arch0".to_string(), 0.0);
    layer.cells = vec![cell("IN", 0.0), cell("OUT", 20.0)];
    QcaDesign {
        qca_core_version: "1.0.0".to_string(),
        layers: vec![layer],
        simulation_model_settings: HashMap::new(),
        selected_simulation_model_id: None,
        cell_architectures: HashMap::from([(
            "arch0".to_string(),
            CellArchitecture::new(18.0, 5.0, 8, 6.36),
        )]),
    }
}

fn pipeline_metadata() -> SimulationMetadata {
    SimulationMetadata {
        qca_core_version: "1.0.0".to_string(),
        start_time: Local::now(),
        duration: SimDuration(1, 0),
        num_samples: NUM_SAMPLES,
        stored_cells: vec![CellIndex::new(0, 0), CellIndex::new(0, 1)],
    }
}

// Clock phase p holds high (0.0) for the second half of each cycle,
// shifted a quarter cycle per phase; low is -1.0.
fn clock_series() -> [Vec<f64>; 4] {
    std::array::from_fn(|phase| {
        let shift = phase * SAMPLES_PER_CYCLE / 4;
        (0..NUM_SAMPLES)
            .map(|i| {
                let pos = (i + SAMPLES_PER_CYCLE - shift) % SAMPLES_PER_CYCLE;
                if pos >= SAMPLES_PER_CYCLE / 2 { 0.0 } else { -1.0 }
            })
            .collect()
    })
}

// Two polarization channels holding one logic state per cycle.
fn cell_channels(cycle_states: &[LogicState; CYCLES]) -> Vec<Vec<f64>> {
    let per_sample: Vec<(f64, f64)> = (0..NUM_SAMPLES)
        .map(|i| match cycle_states[i / SAMPLES_PER_CYCLE] {
            LogicState::A => (1.0, 0.0),
            LogicState::B => (-1.0, 0.0),
            LogicState::C => (0.0, 1.0),
            LogicState::D => (0.0, -1.0),
        })
        .collect();
    vec![
        per_sample.iter().map(|(a, _)| *a).collect(),
        per_sample.iter().map(|(_, b)| *b).collect(),
    ]
}

fn pipeline_archive(input: [LogicState; CYCLES], output: [LogicState; CYCLES]) -> Vec<u8> {
    let cell_data = vec![cell_channels(&input), cell_channels(&output)];
    encode_archive(&pipeline_design(), &pipeline_metadata(), &clock_series(), &cell_data)
        .expect("pipeline fixture must encode")
}

#[test]
fn test_extraction_recovers_cycle_states() {
    let bytes = pipeline_archive([A, B, C, D], [A, B, C, D]);
    let decoded = qca_analysis::decode(&bytes).unwrap();
    let cells = decoded.metadata.stored_cells.clone();
    let table = extract_truth_table(
        &decoded,
        &cells,
        &HashMap::new(),
        &ExtractionSettings::default(),
    )
    .unwrap();

    assert_eq!(table.entries.len(), 2);
    assert_eq!(table.entries[0].0, "IN");
    assert_eq!(table.entries[1].0, "OUT");
    assert_eq!(
        table.entries[0].1,
        vec![Some(A), Some(B), Some(C), Some(D)]
    );
    assert_eq!(
        table.entries[1].1,
        vec![Some(A), Some(B), Some(C), Some(D)]
    );
}

#[test]
fn test_pipeline_scores_perfect_wire() {
    let bytes = pipeline_archive([A, B, C, D], [A, B, C, C]);
    // D and C are equivalent readings, so the last cycle still matches.
    let report = analyze_archive(
        &bytes,
        LogicFunction::Wire,
        &HashMap::new(),
        &ExtractionSettings::default(),
    )
    .unwrap();
    assert_eq!(report.overall(), 1.0);
}

#[test]
fn test_pipeline_scores_partial_wire() {
    let bytes = pipeline_archive([A, B, C, D], [A, A, C, D]);
    let report = analyze_archive(
        &bytes,
        LogicFunction::Wire,
        &HashMap::new(),
        &ExtractionSettings::default(),
    )
    .unwrap();
    assert_eq!(report.overall(), 0.75);
}

#[test]
fn test_pipeline_clock_delay_shifts_output_column() {
    let bytes = pipeline_archive([A, B, C, D], [A, B, C, D]);
    let decoded = qca_analysis::decode(&bytes).unwrap();
    let cells = decoded.metadata.stored_cells.clone();
    let delays = HashMap::from([(CellIndex::new(0, 1), 1usize)]);
    let table = extract_truth_table(
        &decoded,
        &cells,
        &delays,
        &ExtractionSettings::default(),
    )
    .unwrap();

    // The delayed column drops its first region and pads the tail.
    assert_eq!(
        table.entries[1].1,
        vec![Some(B), Some(C), Some(D), None]
    );
}

#[test]
fn test_batch_isolates_per_archive_failures() {
    let good = pipeline_archive([A, B, C, D], [A, B, C, D]);
    let mut bad = good.clone();
    bad.truncate(bad.len() / 2);

    let results = analyze_many(
        &[good, bad],
        LogicFunction::Wire,
        &HashMap::new(),
        &ExtractionSettings::default(),
    );
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_timing_summary_over_batch_metadata() {
    let archives = [
        pipeline_archive([A, A, A, A], [A, A, A, A]),
        pipeline_archive([B, B, B, B], [B, B, B, B]),
    ];
    let durations: Vec<SimDuration> = archives
        .iter()
        .map(|bytes| qca_analysis::decode(bytes).unwrap().metadata.duration)
        .collect();
    let summary = summarize_timings(durations).unwrap();
    assert_eq!(summary.count, 2);
    assert!((summary.mean - 1.0).abs() < 1e-12);
    assert_eq!(summary.std_dev, 0.0);
}
