//! Per-student × per-discipline × per-period grade matrix.
//!
//! The builder always computes every period from the full snapshot; a
//! `period_filter` only masks what the accessors hand out, so the same
//! inputs can serve differently filtered documents without recomputation
//! drift.

use std::collections::{BTreeMap, HashMap};

use super::aggregate::{annual_composite, AggregatedPeriodGrade, AnnualSummary};
use super::codes::{CodeAliasTable, ComponentCode};
use super::domain::{
    AssessmentRecord, DisciplineId, DisciplineRecord, EvaluationMode, StudentId, StudentRecord,
    Trimester,
};
use super::resolver::ResolvedModelContext;
use super::weights::{ComponentWeightIndex, WeightConfigError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixOptions {
    /// Restrict *output* to one trimester; internal computation is
    /// unaffected.
    pub period_filter: Option<Trimester>,
}

/// All computed grades for one (student, discipline) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum DisciplineCell {
    /// Trimester-graded discipline: three term grades plus the annual
    /// roll-up (present only when all three terms have composites).
    Terms {
        grades: Box<[AggregatedPeriodGrade; 3]>,
        final_average: Option<f64>,
    },
    /// Annually graded discipline: one virtual period that already is the
    /// annual figure.
    Annual { grade: AggregatedPeriodGrade },
}

/// Term composites as a summary document sees them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryGrades {
    Terms {
        t1: Option<f64>,
        t2: Option<f64>,
        t3: Option<f64>,
    },
    Single {
        composite: Option<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct PautaMatrix {
    students: Vec<StudentRecord>,
    disciplines: Vec<DisciplineRecord>,
    cells: HashMap<(StudentId, DisciplineId), DisciplineCell>,
    period_filter: Option<Trimester>,
}

impl PautaMatrix {
    /// Roster in pauta order: roll number ascending, students without one
    /// last, ties in input order.
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn disciplines(&self) -> &[DisciplineRecord] {
        &self.disciplines
    }

    pub fn period_filter(&self) -> Option<Trimester> {
        self.period_filter
    }

    pub fn cell(&self, student: &StudentId, discipline: &DisciplineId) -> Option<&DisciplineCell> {
        self.cells.get(&(student.clone(), discipline.clone()))
    }

    fn term_visible(&self, term: Trimester) -> bool {
        self.period_filter.map_or(true, |filter| filter == term)
    }

    /// Full term grade, `None` when the cell is annual-mode or the term is
    /// masked by the filter.
    pub fn term_grade(
        &self,
        student: &StudentId,
        discipline: &DisciplineId,
        term: Trimester,
    ) -> Option<&AggregatedPeriodGrade> {
        if !self.term_visible(term) {
            return None;
        }
        match self.cell(student, discipline)? {
            DisciplineCell::Terms { grades, .. } => Some(&grades[term.index()]),
            DisciplineCell::Annual { .. } => None,
        }
    }

    pub fn term_composite(
        &self,
        student: &StudentId,
        discipline: &DisciplineId,
        term: Trimester,
    ) -> Option<f64> {
        self.term_grade(student, discipline, term)?.composite
    }

    /// The single virtual-period grade of an annual-mode cell.
    pub fn annual_grade(
        &self,
        student: &StudentId,
        discipline: &DisciplineId,
    ) -> Option<&AggregatedPeriodGrade> {
        match self.cell(student, discipline)? {
            DisciplineCell::Annual { grade } => Some(grade),
            DisciplineCell::Terms { .. } => None,
        }
    }

    /// Year-level figure: the MFD for trimester grading, the lone composite
    /// for annual grading.
    pub fn final_average(&self, student: &StudentId, discipline: &DisciplineId) -> Option<f64> {
        match self.cell(student, discipline)? {
            DisciplineCell::Terms { final_average, .. } => *final_average,
            DisciplineCell::Annual { grade } => grade.composite,
        }
    }

    /// Year roll-up of a period-mode cell as one value object. `None` for
    /// annual-mode cells, whose single composite already is the annual
    /// figure.
    pub fn annual_summary(
        &self,
        student: &StudentId,
        discipline: &DisciplineId,
    ) -> Option<AnnualSummary> {
        match self.cell(student, discipline)? {
            DisciplineCell::Terms { grades, .. } => Some(AnnualSummary::from_terms(
                student.clone(),
                discipline.clone(),
                [
                    grades[0].composite,
                    grades[1].composite,
                    grades[2].composite,
                ],
            )),
            DisciplineCell::Annual { .. } => None,
        }
    }

    /// Composites shaped for the summary roster, with the period filter
    /// applied.
    pub fn summary(&self, student: &StudentId, discipline: &DisciplineId) -> Option<SummaryGrades> {
        match self.cell(student, discipline)? {
            DisciplineCell::Terms { grades, .. } => {
                let composite_of = |term: Trimester| {
                    self.term_visible(term)
                        .then(|| grades[term.index()].composite)
                        .flatten()
                };
                Some(SummaryGrades::Terms {
                    t1: composite_of(Trimester::First),
                    t2: composite_of(Trimester::Second),
                    t3: composite_of(Trimester::Third),
                })
            }
            DisciplineCell::Annual { grade } => Some(SummaryGrades::Single {
                composite: grade.composite,
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PautaMatrixBuilder {
    options: MatrixOptions,
}

impl PautaMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatrixOptions) -> Self {
        Self { options }
    }

    pub fn build(
        &self,
        students: Vec<StudentRecord>,
        disciplines: Vec<DisciplineRecord>,
        assessments: &[AssessmentRecord],
        models: &HashMap<DisciplineId, ResolvedModelContext>,
    ) -> Result<PautaMatrix, WeightConfigError> {
        let aliases = CodeAliasTable::builtin();

        let mut indexes: HashMap<DisciplineId, (EvaluationMode, ComponentWeightIndex)> =
            HashMap::with_capacity(models.len());
        for (discipline, context) in models {
            let index = ComponentWeightIndex::build_with_aliases(&context.model, &aliases)?;
            indexes.insert(discipline.clone(), (context.model.mode, index));
        }

        let students = order_roster(students);
        let grouped = group_scores(assessments, &indexes, &aliases);

        let mut cells = HashMap::new();
        for student in &students {
            for discipline in &disciplines {
                let Some((mode, index)) = indexes.get(&discipline.id) else {
                    continue;
                };
                let key = (student.id.clone(), discipline.id.clone());
                let by_period = grouped.get(&key);
                let cell = match mode {
                    EvaluationMode::Period => build_terms_cell(student, discipline, by_period, index),
                    EvaluationMode::Annual => build_annual_cell(student, discipline, by_period, index),
                };
                cells.insert(key, cell);
            }
        }

        Ok(PautaMatrix {
            students,
            disciplines,
            cells,
            period_filter: self.options.period_filter,
        })
    }
}

type GroupedScores =
    HashMap<(StudentId, DisciplineId), BTreeMap<Option<Trimester>, BTreeMap<ComponentCode, Vec<f64>>>>;

fn order_roster(mut students: Vec<StudentRecord>) -> Vec<StudentRecord> {
    // Stable sort keeps input order among equal rolls and among the
    // unnumbered tail.
    students.sort_by_key(|student| (student.roll_number.is_none(), student.roll_number));
    students
}

fn group_scores(
    assessments: &[AssessmentRecord],
    indexes: &HashMap<DisciplineId, (EvaluationMode, ComponentWeightIndex)>,
    aliases: &CodeAliasTable,
) -> GroupedScores {
    let mut grouped: GroupedScores = HashMap::new();

    for record in assessments {
        let Some((mode, index)) = indexes.get(&record.discipline) else {
            continue;
        };
        let Some(code) = aliases.normalize(&record.component_code) else {
            continue;
        };
        // Stale or unconfigured assessment types never reach aggregation.
        if !index.is_active(&code) {
            continue;
        }
        // Period-mode scores must carry a trimester; annual-mode scores must
        // not. Anything else is left over from a mode change and is skipped.
        let slot = match (mode, record.period) {
            (EvaluationMode::Period, Some(term)) => Some(term),
            (EvaluationMode::Annual, None) => None,
            _ => continue,
        };
        let Some(value) = record.value else {
            continue;
        };

        grouped
            .entry((record.student.clone(), record.discipline.clone()))
            .or_default()
            .entry(slot)
            .or_default()
            .entry(code)
            .or_default()
            .push(value);
    }

    grouped
}

fn build_terms_cell(
    student: &StudentRecord,
    discipline: &DisciplineRecord,
    by_period: Option<&BTreeMap<Option<Trimester>, BTreeMap<ComponentCode, Vec<f64>>>>,
    index: &ComponentWeightIndex,
) -> DisciplineCell {
    let empty = BTreeMap::new();
    let grades = Trimester::ordered().map(|term| {
        let scores = by_period
            .and_then(|periods| periods.get(&Some(term)))
            .unwrap_or(&empty);
        AggregatedPeriodGrade::from_grouped(
            student.id.clone(),
            discipline.id.clone(),
            Some(term),
            scores,
            index,
        )
    });
    let final_average = annual_composite([
        grades[0].composite,
        grades[1].composite,
        grades[2].composite,
    ]);

    DisciplineCell::Terms {
        grades: Box::new(grades),
        final_average,
    }
}

fn build_annual_cell(
    student: &StudentRecord,
    discipline: &DisciplineRecord,
    by_period: Option<&BTreeMap<Option<Trimester>, BTreeMap<ComponentCode, Vec<f64>>>>,
    index: &ComponentWeightIndex,
) -> DisciplineCell {
    let empty = BTreeMap::new();
    let scores = by_period
        .and_then(|periods| periods.get(&None))
        .unwrap_or(&empty);
    let grade = AggregatedPeriodGrade::from_grouped(
        student.id.clone(),
        discipline.id.clone(),
        None,
        scores,
        index,
    );

    DisciplineCell::Annual { grade }
}
