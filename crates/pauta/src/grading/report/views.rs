//! Serialized payload shapes for the three report documents.
//!
//! Assemblers fill these from a [`PautaMatrix`](super::super::matrix::PautaMatrix);
//! nothing here computes. Missing grades stay `null` in the JSON, never `0`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::super::domain::{DisciplineId, StudentId};
use super::metadata::DocumentMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisciplineView {
    pub id: DisciplineId,
    pub name: String,
}

/// Quick roster: one composite line per student for a single discipline.
#[derive(Debug, Clone, Serialize)]
pub struct MiniPautaDocument {
    pub metadata: DocumentMetadata,
    pub discipline: DisciplineView,
    pub rows: Vec<MiniPautaRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MiniPautaRow {
    pub student: StudentId,
    pub name: String,
    pub photo: Option<String>,
    #[serde(flatten)]
    pub grades: SummaryGradesView,
}

/// Trimester-graded rows carry `t1/t2/t3`; annually graded rows carry a
/// lone `composite` and no term keys at all.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum SummaryGradesView {
    Terms {
        t1: Option<f64>,
        t2: Option<f64>,
        t3: Option<f64>,
    },
    Single {
        composite: Option<f64>,
    },
}

/// Detailed roster: per-component values plus the composite for one period
/// of one discipline. `period` is absent for annually graded disciplines.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRosterDocument {
    pub metadata: DocumentMetadata,
    pub discipline: DisciplineView,
    pub period: Option<u8>,
    pub rows: Vec<DetailedRosterRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedRosterRow {
    pub student: StudentId,
    pub name: String,
    pub photo: Option<String>,
    pub roll_number: Option<u32>,
    pub components: BTreeMap<String, Option<f64>>,
    pub composite: Option<f64>,
}

/// Full class ledger across all disciplines and periods.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerDocument {
    pub metadata: DocumentMetadata,
    pub disciplines: Vec<DisciplineView>,
    pub students: Vec<LedgerStudentRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerStudentRow {
    pub roll_number: Option<u32>,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Option<&'static str>,
    pub disciplines: BTreeMap<DisciplineId, LedgerDisciplineGrades>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LedgerDisciplineGrades {
    Terms {
        t1: LedgerPeriodGrades,
        t2: LedgerPeriodGrades,
        t3: LedgerPeriodGrades,
        /// Final annual average (MFD); requires all three term composites.
        mfd: Option<f64>,
    },
    Single {
        components: BTreeMap<String, Option<f64>>,
        composite: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerPeriodGrades {
    pub components: BTreeMap<String, Option<f64>>,
    /// Period composite (MT).
    pub mt: Option<f64>,
}
