use crate::infra::demo_service;
use chrono::Utc;
use clap::{Args, ValueEnum};
use pauta::error::AppError;
use pauta::grading::report::views::{
    DetailedRosterDocument, LedgerDisciplineGrades, LedgerDocument, MiniPautaDocument,
    SummaryGradesView,
};
use pauta::grading::{ClassId, DisciplineId, Trimester};

const DEMO_CLASS: &str = "t-10a";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Restrict the walkthrough to one discipline of the demo class.
    #[arg(long)]
    pub(crate) discipline: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PautaReportArgs {
    /// Which document to generate
    #[arg(long, value_enum, default_value_t = ReportKind::Mini)]
    pub(crate) document: ReportKind,
    /// Discipline identifier within the demo class
    #[arg(long, default_value = "d-mat")]
    pub(crate) discipline: String,
    /// Trimester for the detailed roster
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub(crate) period: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportKind {
    /// Summary of composites per trimester
    Mini,
    /// Per-component breakdown for one trimester
    Detalhada,
    /// Full class ledger across every discipline
    Livro,
}

pub(crate) fn run_pauta_report(args: PautaReportArgs) -> Result<(), AppError> {
    let service = demo_service();
    let class = ClassId::from(DEMO_CLASS);
    let discipline = DisciplineId::from(args.discipline.as_str());
    let issued_at = Utc::now();

    match args.document {
        ReportKind::Mini => {
            let document = service.summary_roster(&class, &discipline, issued_at)?;
            render_mini_pauta(&document);
        }
        ReportKind::Detalhada => {
            // clap already bounds the period to 1..=3.
            let period = Trimester::from_number(args.period).unwrap_or(Trimester::First);
            let document = service.detailed_roster(&class, &discipline, period, issued_at)?;
            render_detailed_roster(&document);
        }
        ReportKind::Livro => {
            let document = service.class_ledger(&class, issued_at)?;
            render_ledger(&document);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = demo_service();
    let class = ClassId::from(DEMO_CLASS);
    let issued_at = Utc::now();

    println!("Pauta engine demo");

    let ledger = service.class_ledger(&class, issued_at)?;
    let disciplines: Vec<_> = ledger
        .disciplines
        .iter()
        .filter(|view| {
            args.discipline
                .as_deref()
                .map_or(true, |wanted| view.id.as_str() == wanted)
        })
        .cloned()
        .collect();

    for view in &disciplines {
        let discipline = DisciplineId::from(view.id.as_str());
        let document = service.summary_roster(&class, &discipline, issued_at)?;
        render_mini_pauta(&document);
        print_summary_stats(&document);
    }

    println!();
    render_ledger(&ledger);
    Ok(())
}

fn print_summary_stats(document: &MiniPautaDocument) {
    let composites: Vec<f64> = document
        .rows
        .iter()
        .filter_map(|row| match &row.grades {
            SummaryGradesView::Terms { t1, .. } => *t1,
            SummaryGradesView::Single { composite } => *composite,
        })
        .collect();
    let graded = composites.len();
    let total = document.rows.len();
    if graded > 0 {
        let mean = composites.iter().sum::<f64>() / graded as f64;
        println!("  {graded}/{total} students graded, first-column mean {mean:.2}");
    } else {
        println!("  0/{total} students graded so far");
    }
}

fn fmt_grade(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:>5.2}"),
        None => String::from("   --"),
    }
}

fn render_mini_pauta(document: &MiniPautaDocument) {
    println!(
        "\nMini-pauta | {} | {} | emitida {} | cód. {}",
        document.metadata.class_name,
        document.discipline.name,
        document.metadata.issued_at.format("%Y-%m-%d"),
        document.metadata.verification_code,
    );
    for row in &document.rows {
        match &row.grades {
            SummaryGradesView::Terms { t1, t2, t3 } => println!(
                "  {:<24} 1ºT {}  2ºT {}  3ºT {}",
                row.name,
                fmt_grade(*t1),
                fmt_grade(*t2),
                fmt_grade(*t3),
            ),
            SummaryGradesView::Single { composite } => {
                println!("  {:<24} nota {}", row.name, fmt_grade(*composite))
            }
        }
    }
}

fn render_detailed_roster(document: &DetailedRosterDocument) {
    let period = document
        .period
        .and_then(Trimester::from_number)
        .map(Trimester::label)
        .unwrap_or("avaliação anual");
    println!(
        "\nPauta detalhada | {} | {} | {}",
        document.metadata.class_name, document.discipline.name, period,
    );
    for row in &document.rows {
        let components: Vec<String> = row
            .components
            .iter()
            .map(|(code, value)| format!("{code} {}", fmt_grade(*value).trim_start()))
            .collect();
        println!(
            "  {:<24} {}  => {}",
            row.name,
            components.join("  "),
            fmt_grade(row.composite).trim_start(),
        );
    }
}

fn render_ledger(document: &LedgerDocument) {
    println!(
        "\nLivro de turma | {} | {} | {}",
        document.metadata.school, document.metadata.class_name, document.metadata.school_year,
    );
    for row in &document.students {
        let roll = row
            .roll_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| String::from("--"));
        println!("  nº {:<3} {}", roll, row.name);
        for (discipline, grades) in &row.disciplines {
            match grades {
                LedgerDisciplineGrades::Terms { t1, t2, t3, mfd } => println!(
                    "      {:<8} 1ºT {}  2ºT {}  3ºT {}  MFD {}",
                    discipline.as_str(),
                    fmt_grade(t1.mt),
                    fmt_grade(t2.mt),
                    fmt_grade(t3.mt),
                    fmt_grade(*mfd),
                ),
                LedgerDisciplineGrades::Single { composite, .. } => println!(
                    "      {:<8} nota {}",
                    discipline.as_str(),
                    fmt_grade(*composite),
                ),
            }
        }
    }
}
