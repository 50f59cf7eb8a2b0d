use super::common::*;
use crate::grading::domain::{DisciplineId, StudentId, Trimester};
use crate::grading::matrix::{MatrixOptions, PautaMatrixBuilder, SummaryGrades};

fn sid(id: &str) -> StudentId {
    StudentId::from(id)
}

fn did(id: &str) -> DisciplineId {
    DisciplineId::from(id)
}

fn roster() -> Vec<crate::grading::domain::StudentRecord> {
    vec![
        student("a-1", "Adilson Campos", Some(2)),
        student("a-2", "Beatriz Neto", Some(1)),
        student("a-3", "Cátia Lemos", None),
        student("a-4", "Dario Mbala", None),
    ]
}

fn math_scores() -> Vec<crate::grading::domain::AssessmentRecord> {
    use Trimester::*;
    vec![
        // a-2, first term: the worked example (13.8).
        score("a-2", "d-mat", Some(First), "MAC", Some(14.0)),
        score("a-2", "d-mat", Some(First), "NPP", Some(16.0)),
        score("a-2", "d-mat", Some(First), "PT", Some(12.0)),
        // a-2, second term: duplicate MAC entries that must average.
        score("a-2", "d-mat", Some(Second), "mac", Some(10.0)),
        score("a-2", "d-mat", Some(Second), "MAC", Some(14.0)),
        score("a-2", "d-mat", Some(Second), "NPP", Some(12.0)),
        score("a-2", "d-mat", Some(Second), "NPT", Some(12.0)),
        // a-2, third term.
        score("a-2", "d-mat", Some(Third), "MAC", Some(12.0)),
        score("a-2", "d-mat", Some(Third), "NPP", Some(12.0)),
        score("a-2", "d-mat", Some(Third), "NPT", Some(12.0)),
        // a-1 has first-term data only.
        score("a-1", "d-mat", Some(First), "MAC", Some(9.0)),
        // Noise the aggregation must shrug off.
        score("a-2", "d-mat", Some(First), "LEGACY", Some(19.0)),
        score("a-3", "d-mat", Some(First), "MAC", None),
        score("a-2", "d-mat", None, "MAC", Some(18.0)),
    ]
}

#[test]
fn roster_orders_by_roll_number_with_nulls_last() {
    let builder = PautaMatrixBuilder::new();
    let matrix = builder
        .build(
            roster(),
            vec![discipline("d-mat", "Matemática")],
            &[],
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let order: Vec<_> = matrix.students().iter().map(|s| s.id.0.as_str()).collect();
    assert_eq!(order, vec!["a-2", "a-1", "a-3", "a-4"]);
}

#[test]
fn term_composites_follow_the_weighted_formula() {
    let builder = PautaMatrixBuilder::new();
    let matrix = builder
        .build(
            roster(),
            vec![discipline("d-mat", "Matemática")],
            &math_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    assert_eq!(
        matrix.term_composite(&sid("a-2"), &did("d-mat"), Trimester::First),
        Some(13.8)
    );
    // Second term: MAC averages to 12, then (12·0.3 + 12·0.3 + 12·0.4) = 12.
    assert_eq!(
        matrix.term_composite(&sid("a-2"), &did("d-mat"), Trimester::Second),
        Some(12.0)
    );
    assert_eq!(
        matrix.final_average(&sid("a-2"), &did("d-mat")),
        Some(12.6)
    );
}

#[test]
fn annual_summary_carries_the_term_composites_and_roll_up() {
    let builder = PautaMatrixBuilder::new();
    let matrix = builder
        .build(
            roster(),
            vec![discipline("d-mat", "Matemática")],
            &math_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let summary = matrix
        .annual_summary(&sid("a-2"), &did("d-mat"))
        .expect("period-mode cell rolls up");
    assert_eq!(summary.period_composites, [Some(13.8), Some(12.0), Some(12.0)]);
    assert_eq!(summary.final_average, Some(12.6));
    assert_eq!(
        summary.final_average,
        matrix.final_average(&sid("a-2"), &did("d-mat")),
    );
}

#[test]
fn missing_terms_stay_null_and_block_the_final_average() {
    let builder = PautaMatrixBuilder::new();
    let matrix = builder
        .build(
            roster(),
            vec![discipline("d-mat", "Matemática")],
            &math_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    // a-1 only has first-term data.
    assert_eq!(
        matrix.term_composite(&sid("a-1"), &did("d-mat"), Trimester::First),
        Some(9.0)
    );
    assert_eq!(
        matrix.term_composite(&sid("a-1"), &did("d-mat"), Trimester::Second),
        None
    );
    assert_eq!(matrix.final_average(&sid("a-1"), &did("d-mat")), None);

    // a-3's only row carries no value; a null never becomes a zero.
    assert_eq!(
        matrix.term_composite(&sid("a-3"), &did("d-mat"), Trimester::First),
        None
    );
}

#[test]
fn period_filter_masks_output_without_touching_computation() {
    let filtered = PautaMatrixBuilder::with_options(MatrixOptions {
        period_filter: Some(Trimester::Second),
    })
    .build(
        roster(),
        vec![discipline("d-mat", "Matemática")],
        &math_scores(),
        &models_for(&[("d-mat", standard_model())]),
    )
    .expect("matrix builds");

    assert_eq!(
        filtered.term_composite(&sid("a-2"), &did("d-mat"), Trimester::First),
        None
    );
    assert_eq!(
        filtered.term_composite(&sid("a-2"), &did("d-mat"), Trimester::Second),
        Some(12.0)
    );
    match filtered.summary(&sid("a-2"), &did("d-mat")) {
        Some(SummaryGrades::Terms { t1, t2, t3 }) => {
            assert_eq!(t1, None);
            assert_eq!(t2, Some(12.0));
            assert_eq!(t3, None);
        }
        other => panic!("expected term summary, got {other:?}"),
    }
    // All periods were still computed: the annual figure survives masking.
    assert_eq!(filtered.final_average(&sid("a-2"), &did("d-mat")), Some(12.6));
}

#[test]
fn annual_mode_produces_a_single_virtual_period() {
    let scores = vec![
        score("a-2", "d-efis", None, "MAC", Some(15.0)),
        score("a-2", "d-efis", None, "NPP", Some(13.0)),
        // A stray trimester tag under annual grading is stale data.
        score("a-2", "d-efis", Some(Trimester::First), "MAC", Some(1.0)),
    ];
    let matrix = PautaMatrixBuilder::new()
        .build(
            roster(),
            vec![discipline("d-efis", "Educação Física")],
            &scores,
            &models_for(&[("d-efis", annual_model())]),
        )
        .expect("matrix builds");

    assert_eq!(
        matrix
            .annual_grade(&sid("a-2"), &did("d-efis"))
            .and_then(|grade| grade.composite),
        Some(14.0)
    );
    assert_eq!(
        matrix.term_composite(&sid("a-2"), &did("d-efis"), Trimester::First),
        None
    );
    match matrix.summary(&sid("a-2"), &did("d-efis")) {
        Some(SummaryGrades::Single { composite }) => assert_eq!(composite, Some(14.0)),
        other => panic!("expected single composite, got {other:?}"),
    }
}

#[test]
fn permuted_input_yields_identical_composites() {
    let models = models_for(&[("d-mat", standard_model())]);
    let disciplines = vec![discipline("d-mat", "Matemática")];

    let forward = PautaMatrixBuilder::new()
        .build(roster(), disciplines.clone(), &math_scores(), &models)
        .expect("matrix builds");
    let mut shuffled = math_scores();
    shuffled.reverse();
    let backward = PautaMatrixBuilder::new()
        .build(roster(), disciplines, &shuffled, &models)
        .expect("matrix builds");

    for student in forward.students() {
        for term in Trimester::ordered() {
            assert_eq!(
                forward.term_composite(&student.id, &did("d-mat"), term),
                backward.term_composite(&student.id, &did("d-mat"), term),
            );
        }
        assert_eq!(
            forward.final_average(&student.id, &did("d-mat")),
            backward.final_average(&student.id, &did("d-mat")),
        );
    }
}

#[test]
fn rebuilding_from_an_unchanged_snapshot_is_idempotent() {
    let models = models_for(&[("d-mat", standard_model())]);
    let disciplines = vec![discipline("d-mat", "Matemática")];

    let first = PautaMatrixBuilder::new()
        .build(roster(), disciplines.clone(), &math_scores(), &models)
        .expect("matrix builds");
    let second = PautaMatrixBuilder::new()
        .build(roster(), disciplines, &math_scores(), &models)
        .expect("matrix builds");

    for student in first.students() {
        assert_eq!(
            first.cell(&student.id, &did("d-mat")),
            second.cell(&student.id, &did("d-mat")),
        );
    }
}
