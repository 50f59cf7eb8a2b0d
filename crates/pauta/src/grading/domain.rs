use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(
    /// Identifier wrapper for a school.
    SchoolId
);
id_newtype!(
    /// Identifier wrapper for a course (curso).
    CourseId
);
id_newtype!(
    /// Identifier wrapper for a class/turma within a course.
    ClassId
);
id_newtype!(
    /// Identifier wrapper for a discipline.
    DisciplineId
);
id_newtype!(
    /// Identifier wrapper for an enrolled student.
    StudentId
);
id_newtype!(
    /// Identifier wrapper for a curriculum-matrix row.
    CurriculumEntryId
);

/// One of the three school terms. Absent entirely under annual-mode grading,
/// where assessments carry no period at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub const fn number(self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Trimester::First),
            2 => Some(Trimester::Second),
            3 => Some(Trimester::Third),
            _ => None,
        }
    }

    pub const fn ordered() -> [Trimester; 3] {
        [Trimester::First, Trimester::Second, Trimester::Third]
    }

    /// Zero-based index into per-term arrays.
    pub const fn index(self) -> usize {
        (self.number() - 1) as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Trimester::First => "1º trimestre",
            Trimester::Second => "2º trimestre",
            Trimester::Third => "3º trimestre",
        }
    }
}

/// Whether a discipline is graded per trimester or once for the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    Period,
    Annual,
}

/// One scoring component of an evaluation model, as configured upstream.
/// The `code` is raw configuration text; normalization happens when the
/// weight index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationComponent {
    pub code: String,
    pub weight: Option<f64>,
    #[serde(default)]
    pub required: bool,
}

/// A school's configured evaluation model for some scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationModel {
    pub mode: EvaluationMode,
    pub components: Vec<EvaluationComponent>,
}

impl EvaluationModel {
    /// Models with no components are indistinguishable from absent ones:
    /// resolution treats them as not configured.
    pub fn is_configured(&self) -> bool {
        !self.components.is_empty()
    }
}

/// Raw assessment score row handed in by the storage layer. Multiple rows may
/// share the same (student, discipline, period, component) key; they are
/// repeated assessments of the same type and get averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub student: StudentId,
    pub discipline: DisciplineId,
    pub period: Option<Trimester>,
    pub component_code: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }
}

/// Roster row for one enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub roll_number: Option<u32>,
    pub photo: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub remarks: Option<String>,
}

impl StudentRecord {
    /// Completed years at `on`, when a birth date is on file.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        on.years_since(self.birth_date?)
    }
}

/// A discipline taught to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineRecord {
    pub id: DisciplineId,
    pub name: String,
}

/// Class metadata attached to generated documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassProfile {
    pub id: ClassId,
    pub name: String,
    pub course: CourseId,
    pub course_name: String,
    pub school_year: String,
    pub class_teacher: Option<String>,
}

/// School metadata attached to generated documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolProfile {
    pub id: SchoolId,
    pub name: String,
    pub director: Option<String>,
}
