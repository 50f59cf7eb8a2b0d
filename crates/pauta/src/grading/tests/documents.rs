use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::common::*;
use crate::grading::domain::Trimester;
use crate::grading::matrix::{MatrixOptions, PautaMatrixBuilder};
use crate::grading::report::{
    self, class_ledger, detailed_roster, mini_pauta, DocumentKind, DocumentMetadata,
};

fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 20, 10, 0, 0).unwrap()
}

fn metadata(kind: DocumentKind, period: Option<Trimester>) -> DocumentMetadata {
    DocumentMetadata::issue(kind, &school(), &class_profile(), period, issued_at())
}

fn term_scores() -> Vec<crate::grading::domain::AssessmentRecord> {
    use Trimester::*;
    vec![
        score("a-1", "d-mat", Some(First), "MAC", Some(14.0)),
        score("a-1", "d-mat", Some(First), "NPP", Some(16.0)),
        score("a-1", "d-mat", Some(First), "PT", Some(12.0)),
    ]
}

#[test]
fn mini_pauta_rows_carry_term_keys_for_period_disciplines() {
    let record = discipline("d-mat", "Matemática");
    let matrix = PautaMatrixBuilder::new()
        .build(
            vec![student("a-1", "Adilson Campos", Some(1))],
            vec![record.clone()],
            &term_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let document = mini_pauta(&matrix, &record, metadata(DocumentKind::MiniPauta, None));
    let json = serde_json::to_value(&document).expect("serializes");

    let row = &json["rows"][0];
    assert_eq!(row["t1"], Value::from(13.8));
    assert_eq!(row["t2"], Value::Null);
    assert_eq!(row["t3"], Value::Null);
    assert!(row.get("composite").is_none());
}

#[test]
fn mini_pauta_rows_for_annual_disciplines_have_no_term_keys() {
    let record = discipline("d-efis", "Educação Física");
    let scores = vec![score("a-1", "d-efis", None, "MAC", Some(16.0))];
    let matrix = PautaMatrixBuilder::new()
        .build(
            vec![student("a-1", "Adilson Campos", Some(1))],
            vec![record.clone()],
            &scores,
            &models_for(&[("d-efis", annual_model())]),
        )
        .expect("matrix builds");

    let document = mini_pauta(&matrix, &record, metadata(DocumentKind::MiniPauta, None));
    let json = serde_json::to_value(&document).expect("serializes");

    let row = &json["rows"][0];
    assert!(row.get("t1").is_none());
    assert!(row.get("t2").is_none());
    assert!(row.get("t3").is_none());
    assert_eq!(row["composite"], Value::from(16.0));
}

#[test]
fn detailed_roster_exposes_component_columns_for_one_period() {
    let record = discipline("d-mat", "Matemática");
    let matrix = PautaMatrixBuilder::with_options(MatrixOptions {
        period_filter: Some(Trimester::First),
    })
    .build(
        vec![student("a-1", "Adilson Campos", Some(1))],
        vec![record.clone()],
        &term_scores(),
        &models_for(&[("d-mat", standard_model())]),
    )
    .expect("matrix builds");

    let document = detailed_roster(
        &matrix,
        &record,
        crate::grading::domain::EvaluationMode::Period,
        Trimester::First,
        metadata(DocumentKind::DetailedRoster, Some(Trimester::First)),
    );

    assert_eq!(document.period, Some(1));
    let row = &document.rows[0];
    assert_eq!(row.roll_number, Some(1));
    assert_eq!(row.components.get("MAC"), Some(&Some(14.0)));
    assert_eq!(row.components.get("NPT"), Some(&Some(12.0)));
    assert_eq!(row.composite, Some(13.8));

    // A null cell serializes as null, never 0.
    let json = serde_json::to_value(&document).expect("serializes");
    assert_eq!(json["metadata"]["period"], Value::from(1));
}

#[test]
fn ledger_stays_numerically_consistent_with_the_summary() {
    let record = discipline("d-mat", "Matemática");
    let students = vec![
        student("a-1", "Adilson Campos", Some(1)),
        student("a-2", "Beatriz Neto", None),
    ];
    let matrix = PautaMatrixBuilder::new()
        .build(
            students,
            vec![record.clone()],
            &term_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let ledger = class_ledger(&matrix, metadata(DocumentKind::ClassLedger, None));
    let summary = mini_pauta(&matrix, &record, metadata(DocumentKind::MiniPauta, None));

    let ledger_json = serde_json::to_value(&ledger).expect("serializes");
    let summary_json = serde_json::to_value(&summary).expect("serializes");

    let ledger_t1 = &ledger_json["students"][0]["disciplines"]["d-mat"]["t1"]["mt"];
    assert_eq!(ledger_t1, &summary_json["rows"][0]["t1"]);
    assert_eq!(ledger_t1, &Value::from(13.8));

    // No data for a-2 anywhere: every figure must read null.
    let empty = &ledger_json["students"][1]["disciplines"]["d-mat"];
    assert_eq!(empty["t1"]["mt"], Value::Null);
    assert_eq!(empty["mfd"], Value::Null);
    assert_eq!(summary_json["rows"][1]["t1"], Value::Null);
}

#[test]
fn ledger_rows_carry_roster_metadata() {
    let record = discipline("d-mat", "Matemática");
    let matrix = PautaMatrixBuilder::new()
        .build(
            vec![student("a-1", "Adilson Campos", Some(7))],
            vec![record],
            &[],
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let ledger = class_ledger(&matrix, metadata(DocumentKind::ClassLedger, None));
    let row = &ledger.students[0];
    assert_eq!(row.roll_number, Some(7));
    // Born 2011-03-14, issued 2026-07-20.
    assert_eq!(row.age, Some(15));
    assert_eq!(row.sex, Some("F"));
    assert_eq!(ledger.metadata.school_year, "2025/2026");
    assert_eq!(ledger.metadata.verification_code.len(), 16);
}

#[test]
fn document_assemblers_do_not_recompute() {
    // Two assemblies from one matrix must agree bit for bit.
    let record = discipline("d-mat", "Matemática");
    let matrix = PautaMatrixBuilder::new()
        .build(
            vec![student("a-1", "Adilson Campos", Some(1))],
            vec![record.clone()],
            &term_scores(),
            &models_for(&[("d-mat", standard_model())]),
        )
        .expect("matrix builds");

    let first = report::mini_pauta(&matrix, &record, metadata(DocumentKind::MiniPauta, None));
    let second = report::mini_pauta(&matrix, &record, metadata(DocumentKind::MiniPauta, None));
    assert_eq!(
        serde_json::to_value(&first).expect("serializes"),
        serde_json::to_value(&second).expect("serializes"),
    );
}
