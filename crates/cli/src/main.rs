use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pathway_catalog::{CatalogEntry, ProcedureCatalog, ProcedureStep, Venue};
use pathway_engine::{PathwayEngine, PathwayRecommendation};
use pathway_intake::{IntakeDraft, Jurisdiction};
use pathway_journey::{JourneyState, JourneyTracker};
use response::CliResponse;
use serde::Serialize;
use sources::Sources;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod response;
mod sources;

#[derive(Parser)]
#[command(name = "pathway")]
#[command(about = "Route a legal problem to its venue, score it and lay out the procedure", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Procedure catalog file, JSON or TOML (overrides PATHWAY_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Scoring profile file, JSON or TOML (overrides PATHWAY_PROFILE)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and score a case, and print its recommended pathway
    Assess(IntakeArgs),

    /// List catalog venues, or show one venue's procedure
    Catalog(CatalogArgs),

    /// Build a pathway, start a journey and apply step completions
    Journey(JourneyArgs),
}

#[derive(Args)]
struct IntakeArgs {
    /// What happened, in the person's own words
    #[arg(short, long, required_unless_present = "input")]
    description: Option<String>,

    /// Province or territory code (ON, BC, QC, ...)
    #[arg(short, long, required_unless_present = "input")]
    jurisdiction: Option<String>,

    #[arg(long)]
    municipality: Option<String>,

    /// Statute or section the person already relies on
    #[arg(long)]
    law_citation: Option<String>,

    /// Number of evidence items on file
    #[arg(short, long, default_value_t = 0)]
    evidence: u32,

    /// Day the problem happened (YYYY-MM-DD); dates fixed filing deadlines
    #[arg(long, value_name = "DATE")]
    incident_date: Option<NaiveDate>,

    /// Date deadlines against this day instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,

    /// Read the intake as JSON from a file, or '-' for stdin
    #[arg(long, conflicts_with_all = ["description", "jurisdiction", "incident_date"])]
    input: Option<PathBuf>,
}

impl IntakeArgs {
    fn assess(self, engine: &PathwayEngine) -> Result<PathwayRecommendation> {
        let as_of = self.as_of;
        let draft = self.into_draft()?;
        let pathway = match as_of {
            Some(day) => engine.assess_as_of(draft, day)?,
            None => engine.assess(draft)?,
        };
        Ok(pathway)
    }

    fn into_draft(self) -> Result<IntakeDraft> {
        if let Some(path) = self.input {
            return read_draft(&path);
        }
        Ok(IntakeDraft {
            description: self.description.unwrap_or_default(),
            jurisdiction: self.jurisdiction.unwrap_or_default(),
            municipality: self.municipality,
            law_citation: self.law_citation,
            evidence_count: self.evidence,
            incident_date: self.incident_date,
        })
    }
}

#[derive(Args)]
struct CatalogArgs {
    /// Venue slug or alias (landlord-tenant, ltb, hrto, ...)
    #[arg(long)]
    venue: Option<String>,

    /// Show names, time limits and statutes for this province or territory
    #[arg(short, long)]
    jurisdiction: Option<String>,
}

#[derive(Args)]
struct JourneyArgs {
    #[command(flatten)]
    intake: IntakeArgs,

    /// Case identifier the journey is tracked under
    #[arg(long, default_value = "cli-case")]
    case_id: String,

    /// Step id to mark completed (repeatable)
    #[arg(long = "complete", value_name = "STEP_ID")]
    complete: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let pretty = cli.pretty;
    let sources = Sources::resolve(cli.catalog, cli.profile);
    let response = match run(cli.command, &sources) {
        Ok(response) => response,
        Err(err) => {
            log::error!("{err:#}");
            CliResponse::error(&err)
        }
    };

    println!("{}", response.render(pretty));
    if response.is_error() {
        std::process::exit(1);
    }
}

fn run(command: Commands, sources: &Sources) -> Result<CliResponse> {
    match command {
        Commands::Assess(args) => run_assess(args, sources),
        Commands::Catalog(args) => run_catalog(args, sources),
        Commands::Journey(args) => run_journey(args, sources),
    }
}

fn run_assess(args: IntakeArgs, sources: &Sources) -> Result<CliResponse> {
    let engine = sources.engine()?;
    CliResponse::ok(args.assess(&engine)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VenueSummary {
    venue: Venue,
    name: String,
    title: String,
    time_limit: String,
    step_count: usize,
    deadline_steps: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VenueDetail<'a> {
    venue: Venue,
    name: String,
    title: String,
    subtitle: String,
    time_limit: String,
    helpful_links: &'a [pathway_catalog::HelpfulLink],
    #[serde(skip_serializing_if = "Option::is_none")]
    laws: Option<Vec<String>>,
    procedure: &'a [ProcedureStep],
}

fn run_catalog(args: CatalogArgs, sources: &Sources) -> Result<CliResponse> {
    let catalog = sources.catalog()?;
    let jurisdiction = args
        .jurisdiction
        .as_deref()
        .map(Jurisdiction::parse)
        .transpose()?;

    match args.venue {
        Some(slug) => {
            let venue = Venue::parse(&slug)?;
            let entry = catalog
                .entry(venue)
                .with_context(|| format!("Catalog has no entry for venue '{venue}'"))?;
            CliResponse::ok(venue_detail(entry, jurisdiction))
        }
        None => CliResponse::ok(venue_summaries(&catalog, jurisdiction)),
    }
}

/// Display fields for `jurisdiction`, or the neutral text without one
fn display_text(
    entry: &CatalogEntry,
    jurisdiction: Option<Jurisdiction>,
) -> (String, String, String, String) {
    match jurisdiction {
        Some(j) => (
            entry.name_for(j),
            entry.title_for(j),
            entry.subtitle_for(j),
            entry.time_limit_for(j),
        ),
        None => (
            entry.name().to_string(),
            entry.title().to_string(),
            entry.subtitle().to_string(),
            entry.time_limit().to_string(),
        ),
    }
}

fn venue_summaries(
    catalog: &ProcedureCatalog,
    jurisdiction: Option<Jurisdiction>,
) -> Vec<VenueSummary> {
    catalog
        .venues()
        .filter_map(|venue| catalog.entry(venue))
        .map(|entry| {
            let (name, title, _, time_limit) = display_text(entry, jurisdiction);
            VenueSummary {
                venue: entry.venue(),
                name,
                title,
                time_limit,
                step_count: entry.steps().len(),
                deadline_steps: entry.steps().iter().filter(|s| s.deadline_flag).count(),
            }
        })
        .collect()
}

fn venue_detail(entry: &CatalogEntry, jurisdiction: Option<Jurisdiction>) -> VenueDetail<'_> {
    let (name, title, subtitle, time_limit) = display_text(entry, jurisdiction);
    VenueDetail {
        venue: entry.venue(),
        name,
        title,
        subtitle,
        time_limit,
        helpful_links: entry.helpful_links(),
        laws: jurisdiction.map(|j| entry.laws().for_jurisdiction(j)),
        procedure: entry.steps(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JourneyOutput {
    pathway: PathwayRecommendation,
    journey: JourneyState,
    remaining_step_ids: Vec<String>,
}

fn run_journey(args: JourneyArgs, sources: &Sources) -> Result<CliResponse> {
    let engine = sources.engine()?;
    let pathway = args.intake.assess(&engine)?;

    let tracker = JourneyTracker::in_memory(engine.catalog().clone());
    let mut journey = tracker.start(&args.case_id, &pathway)?;
    for step_id in &args.complete {
        journey = tracker
            .complete(&args.case_id, step_id)
            .with_context(|| format!("Cannot complete step '{step_id}'"))?;
    }

    let remaining_step_ids = journey
        .remaining_step_ids(&pathway.procedure)
        .into_iter()
        .map(str::to_string)
        .collect();
    CliResponse::ok(JourneyOutput {
        pathway,
        journey,
        remaining_step_ids,
    })
}

fn read_draft(path: &Path) -> Result<IntakeDraft> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read intake from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read intake {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Intake must be a JSON object")
}
