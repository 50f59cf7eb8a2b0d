use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::super::domain::{ClassProfile, SchoolProfile, Trimester};

/// Which of the three document shapes a metadata block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    MiniPauta,
    DetailedRoster,
    ClassLedger,
}

impl DocumentKind {
    const fn tag(self) -> &'static str {
        match self {
            DocumentKind::MiniPauta => "mini-pauta",
            DocumentKind::DetailedRoster => "pauta-detalhada",
            DocumentKind::ClassLedger => "livro-de-turma",
        }
    }
}

/// Issuance metadata stamped onto every generated document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub school: String,
    pub director: Option<String>,
    pub class_name: String,
    pub course_name: String,
    pub school_year: String,
    pub class_teacher: Option<String>,
    pub period: Option<u8>,
    pub issued_at: DateTime<Utc>,
    pub verification_code: String,
}

impl DocumentMetadata {
    pub fn issue(
        kind: DocumentKind,
        school: &SchoolProfile,
        class: &ClassProfile,
        period: Option<Trimester>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let verification_code = verification_code(kind, school, class, issued_at);
        Self {
            school: school.name.clone(),
            director: school.director.clone(),
            class_name: class.name.clone(),
            course_name: class.course_name.clone(),
            school_year: class.school_year.clone(),
            class_teacher: class.class_teacher.clone(),
            period: period.map(Trimester::number),
            issued_at,
            verification_code,
        }
    }
}

/// Short code a reader can use to confirm a printed document against the
/// issuing system. Deterministic for identical issuance inputs.
fn verification_code(
    kind: DocumentKind,
    school: &SchoolProfile,
    class: &ClassProfile,
    issued_at: DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.tag().as_bytes());
    hasher.update(school.id.0.as_bytes());
    hasher.update(class.id.0.as_bytes());
    hasher.update(issued_at.to_rfc3339().as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8]).to_ascii_uppercase()
}
