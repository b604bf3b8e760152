use crate::infra::{InMemorySubmissionRepository, StaticGuidelineStore};
use clap::Args;
use fedorato::config::{AppConfig, GuidelinesConfig};
use fedorato::error::AppError;
use fedorato::workflows::broker_import::BrokerSubmissionImporter;
use fedorato::workflows::underwriting::{
    CustomerDraft, GuidelineThresholds, MetricsDraft, RepositoryError, SubmissionDraft,
    SubmissionRecord, TriageService, TriageServiceError, TriageSummary,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Guideline thresholds JSON to classify against (defaults to APP_GUIDELINES_PATH or built-ins)
    #[arg(long)]
    pub(crate) guidelines: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Broker export to classify (.csv, or .json holding an array of submissions)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Guideline thresholds JSON to classify against (defaults to APP_GUIDELINES_PATH or built-ins)
    #[arg(long)]
    pub(crate) guidelines: Option<PathBuf>,
}

/// A draft the intake guard or repository refused, reported alongside the inbox.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RejectedDraft {
    pub(crate) position: usize,
    pub(crate) title: String,
    pub(crate) reason: String,
}

#[derive(Debug)]
pub(crate) struct TriageReport {
    pub(crate) records: Vec<SubmissionRecord>,
    pub(crate) rejected: Vec<RejectedDraft>,
    pub(crate) summary: TriageSummary,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let thresholds = resolve_thresholds(args.guidelines, config)?;
    let report = triage_drafts(sample_inbox(), thresholds)?;

    println!("Fedorato demo inbox");
    print!("{}", render_report(&report));
    Ok(())
}

pub(crate) fn run_triage(args: TriageArgs, config: &AppConfig) -> Result<(), AppError> {
    let TriageArgs { input, guidelines } = args;
    let thresholds = resolve_thresholds(guidelines, config)?;
    let drafts = BrokerSubmissionImporter::from_path(&input)?;
    let report = triage_drafts(drafts, thresholds)?;

    println!("Triage of {}", input.display());
    print!("{}", render_report(&report));
    Ok(())
}

fn resolve_thresholds(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<GuidelineThresholds, AppError> {
    let guidelines = match override_path {
        Some(path) => GuidelinesConfig { path: Some(path) },
        None => config.guidelines.clone(),
    };
    Ok(guidelines.resolve()?)
}

/// Submit every draft into a fresh inbox and classify it.
///
/// Validation failures and duplicate ids are collected per draft; storage or guideline
/// failures abort the run.
pub(crate) fn triage_drafts(
    drafts: Vec<SubmissionDraft>,
    thresholds: GuidelineThresholds,
) -> Result<TriageReport, AppError> {
    let service = TriageService::new(
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(StaticGuidelineStore::new(thresholds)),
    );

    let mut rejected = Vec::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        let title = draft
            .title
            .clone()
            .unwrap_or_else(|| "untitled submission".to_string());
        match service.submit(draft) {
            Ok(_) => {}
            Err(err @ TriageServiceError::Validation(_))
            | Err(err @ TriageServiceError::Repository(RepositoryError::Conflict)) => {
                warn!(position = index + 1, error = %err, "submission skipped");
                rejected.push(RejectedDraft {
                    position: index + 1,
                    title,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }

    let records = service.classify_pending()?;
    let summary = service.summary()?;
    Ok(TriageReport {
        records,
        rejected,
        summary,
    })
}

pub(crate) fn render_report(report: &TriageReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Submissions ({})", report.records.len());
    for record in &report.records {
        let view = record.status_view();
        let _ = writeln!(
            out,
            "- [{}] {} | {} -> {} ({})",
            view.submission_id,
            view.title,
            view.broker,
            view.verdict.map(|verdict| verdict.label()).unwrap_or("PENDING"),
            view.score
        );
        let _ = writeln!(out, "    {}", view.reasoning);
        for advisory in &view.advisories {
            let _ = writeln!(out, "    note: {}", advisory);
        }
    }

    if !report.rejected.is_empty() {
        let _ = writeln!(out, "\nSkipped ({})", report.rejected.len());
        for rejected in &report.rejected {
            let _ = writeln!(
                out,
                "- #{} {}: {}",
                rejected.position, rejected.title, rejected.reason
            );
        }
    }

    let summary = &report.summary;
    let _ = writeln!(
        out,
        "\nSummary: {} SAFE ({:.1}%) | {} NOT SAFE ({:.1}%) | {} pending",
        summary.safe, summary.safe_pct, summary.not_safe, summary.not_safe_pct, summary.pending
    );
    for (rule, count) in &summary.rejections_by_rule {
        let _ = writeln!(out, "  - {}: {}", rule.label(), count);
    }

    out
}

/// The four submissions from the dashboard's sample inbox.
pub(crate) fn sample_inbox() -> Vec<SubmissionDraft> {
    vec![
        sample_draft(SampleSubmission {
            id: "1",
            title: "Acme Corp - General Liability",
            broker: "Broker: Marsh",
            dates: ("09/01/2025", "09/01/2026"),
            customer: ("Acme Corp", "123 Main St, Anytown, USA", "CA"),
            tiv: 50_000_000.0,
            total_premium: 200_000.0,
            revenue: "$100M",
            employee_count: "500",
            claims_history: "No claims in last 3 years",
            construction_type: "frame",
            oldest_building: 1985,
            winnability: 90,
            missing_data: &["Employee count", "Revenue last 5 years"],
        }),
        sample_draft(SampleSubmission {
            id: "2",
            title: "Cyberdyne Systems - Cyber Security",
            broker: "Broker: Aon",
            dates: ("10/15/2025", "10/15/2026"),
            customer: ("Cyberdyne Systems", "456 Tech Rd, Future City, USA", "TX"),
            tiv: 80_000_000.0,
            total_premium: 300_000.0,
            revenue: "$5B",
            employee_count: "10000",
            claims_history: "1 claim in last 5 years",
            construction_type: "concrete",
            oldest_building: 2005,
            winnability: 95,
            missing_data: &["Cyber security audit report"],
        }),
        sample_draft(SampleSubmission {
            id: "3",
            title: "Stark Industries - Property",
            broker: "Broker: Willis Towers Watson",
            dates: ("11/01/2025", "11/01/2026"),
            customer: ("Stark Industries", "10880 Malibu Point, Malibu, USA", "CA"),
            tiv: 120_000_000.0,
            total_premium: 1_000_000.0,
            revenue: "$200B",
            employee_count: "50000",
            claims_history: "5 claims in last 5 years",
            construction_type: "steel",
            oldest_building: 2010,
            winnability: 40,
            missing_data: &["Building blueprints", "Fire safety inspection report"],
        }),
        sample_draft(SampleSubmission {
            id: "4",
            title: "Wayne Enterprises - Umbrella",
            broker: "Broker: Gallagher",
            dates: ("12/01/2025", "12/01/2026"),
            customer: ("Wayne Enterprises", "1007 Mountain Drive, Gotham, USA", "NY"),
            tiv: 90_000_000.0,
            total_premium: 150_000.0,
            revenue: "$150B",
            employee_count: "40000",
            claims_history: "2 claims in last 5 years",
            construction_type: "masonry",
            oldest_building: 1995,
            winnability: 40,
            missing_data: &[],
        }),
    ]
}

struct SampleSubmission {
    id: &'static str,
    title: &'static str,
    broker: &'static str,
    dates: (&'static str, &'static str),
    customer: (&'static str, &'static str, &'static str),
    tiv: f64,
    total_premium: f64,
    revenue: &'static str,
    employee_count: &'static str,
    claims_history: &'static str,
    construction_type: &'static str,
    oldest_building: i64,
    winnability: i64,
    missing_data: &'static [&'static str],
}

fn sample_draft(sample: SampleSubmission) -> SubmissionDraft {
    let (effective_date, expiration_date) = sample.dates;
    let (name, address, jurisdiction) = sample.customer;
    SubmissionDraft {
        id: Some(sample.id.to_string()),
        title: Some(sample.title.to_string()),
        broker: Some(sample.broker.to_string()),
        line_of_business: sample
            .title
            .split_once(" - ")
            .map(|(_, line)| line.to_string()),
        effective_date: Some(effective_date.to_string()),
        expiration_date: Some(expiration_date.to_string()),
        customer: CustomerDraft {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
            jurisdiction: Some(jurisdiction.to_string()),
        },
        metrics: MetricsDraft {
            tiv: Some(sample.tiv),
            total_premium: Some(sample.total_premium),
            revenue: Some(sample.revenue.to_string()),
            employee_count: Some(sample.employee_count.to_string()),
            claims_history: Some(sample.claims_history.to_string()),
        },
        construction_type: Some(sample.construction_type.to_string()),
        oldest_building: Some(sample.oldest_building),
        winnability: Some(sample.winnability),
        missing_data: sample
            .missing_data
            .iter()
            .map(|field| field.to_string())
            .collect(),
    }
}
