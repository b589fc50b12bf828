use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use care_schedule::application::time::{date_range, ClockTime};
use care_schedule::domain::layout::{working_staff, ScheduleLayout, ViewPeriod};
use care_schedule::domain::missed::collect_missed_tasks;
use care_schedule::domain::models::{Person, Task};
use care_schedule::domain::shift_assign::assign_unit_day;
use care_schedule::domain::validation::{validate_shift_compatibility, validate_task_overlap};
use care_schedule::{HttpScheduleApi, ScheduleApi, ScheduleConfig, TaskStore};

#[derive(Parser)]
#[command(name = "shift_tools")]
#[command(version = "0.1.0")]
#[command(about = "Inspect care unit shifts, task validation and timeline layout", long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints every staff member's shift in a unit
    Assign {
        #[arg(short, long)]
        unit: String,

        /// YYYY-MM-DD, today when omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Roster JSON file; fetched from the backend when omitted
        #[arg(short, long)]
        roster: Option<PathBuf>,
    },

    /// Checks a proposed task time for one person
    Validate {
        #[arg(short, long)]
        person: String,

        #[arg(short, long)]
        date: NaiveDate,

        #[arg(long)]
        start: ClockTime,

        #[arg(long)]
        end: ClockTime,

        /// JSON list of existing tasks
        #[arg(short, long)]
        tasks: PathBuf,

        /// Task being edited, left out of the overlap check
        #[arg(long)]
        exclude: Option<String>,

        #[arg(short, long)]
        roster: Option<PathBuf>,
    },

    /// Prints timeline geometry for a unit's day
    Layout {
        #[arg(short, long)]
        unit: String,

        #[arg(short, long)]
        date: NaiveDate,

        #[arg(short, long)]
        tasks: PathBuf,

        /// day or night
        #[arg(long, default_value = "day")]
        period: ViewPeriod,

        /// Container width in pixels
        #[arg(long, default_value_t = 1440.0)]
        width: f64,

        #[arg(short, long)]
        roster: Option<PathBuf>,
    },

    /// Lists tasks left open past their end time
    Missed {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        #[arg(short, long)]
        tasks: PathBuf,

        #[arg(short, long)]
        roster: Option<PathBuf>,
    },

    /// Lists the units known to the backend
    Units,

    /// Loads a unit's day from the backend
    Fetch {
        #[arg(short, long)]
        unit: String,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

async fn load_roster(path: Option<&Path>, config: &ScheduleConfig) -> anyhow::Result<Vec<Person>> {
    match path {
        Some(path) => read_json(path),
        None => {
            let api = HttpScheduleApi::from_config(config)?;
            let staff = api.fetch_staff().await.context("fetch staff")?;
            info!(count = staff.len(), "roster fetched");
            Ok(staff)
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn assign(unit: &str, date: NaiveDate, roster: Option<&Path>, config: &ScheduleConfig) -> anyhow::Result<()> {
    let roster = load_roster(roster, config).await?;

    println!("{} {}", unit, date);
    for (person, role) in assign_unit_day(unit, date, &roster) {
        let info = role.info(config.language);
        println!("  {:<10} {:<24} {:<14} {}", person.id, person.name, info.label, info.time);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn validate(
    person: &str,
    date: NaiveDate,
    start: ClockTime,
    end: ClockTime,
    tasks: &Path,
    exclude: Option<&str>,
    roster: Option<&Path>,
    config: &ScheduleConfig,
) -> anyhow::Result<()> {
    let roster = load_roster(roster, config).await?;
    let tasks: Vec<Task> = read_json(tasks)?;

    let shift = validate_shift_compatibility(person, date, start, end, &roster, config.language);
    let overlap = validate_task_overlap(person, date, start, end, &tasks, exclude, &roster);

    for (check, result) in [("shift", &shift), ("overlap", &overlap)] {
        match result.error() {
            None => println!("{check}: ok"),
            Some(message) => println!("{check}: {message}"),
        }
    }
    Ok(())
}

async fn layout(
    unit: &str,
    date: NaiveDate,
    tasks: &Path,
    period: ViewPeriod,
    width: f64,
    roster: Option<&Path>,
    config: &ScheduleConfig,
) -> anyhow::Result<()> {
    let roster = load_roster(roster, config).await?;
    let tasks: Vec<Task> = read_json(tasks)?;
    let layout = ScheduleLayout::new(period, width, &config.layout, config.language.is_rtl());

    let rows: Vec<_> = working_staff(date, &roster, config.language)
        .into_iter()
        .filter(|(person, _)| person.unit_id.as_deref() == Some(unit))
        .map(|(person, shift)| {
            let blocks: Vec<_> = layout
                .row_tasks(&person.id, &shift, &tasks)
                .into_iter()
                .map(|task| json!({ "task": task.id, "geometry": layout.task_geometry(task) }))
                .collect();

            json!({
                "person": person.id,
                "shift": shift,
                "bar": shift.window().and_then(|window| layout.shift_bar(window)),
                "tasks": blocks,
            })
        })
        .collect();

    let output = json!({
        "period": period,
        "hours": period.hour_labels(),
        "hourWidth": layout.hour_width,
        "timelineWidth": layout.timeline_width(),
        "rows": rows,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn missed(
    from: NaiveDate,
    to: NaiveDate,
    tasks: &Path,
    roster: Option<&Path>,
    config: &ScheduleConfig,
) -> anyhow::Result<()> {
    let roster = load_roster(roster, config).await?;
    let tasks: Vec<Task> = read_json(tasks)?;

    // the file carries one status per task
    let status_of = |task_id: &str, _: NaiveDate| {
        tasks
            .iter()
            .find(|task| task.id == task_id)
            .map(|task| task.status)
            .unwrap_or_default()
    };

    let dates = date_range(from, to);
    let missed = collect_missed_tasks(&dates, &tasks, &roster, status_of, Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&missed)?);
    Ok(())
}

async fn units(config: &ScheduleConfig) -> anyhow::Result<()> {
    let api = HttpScheduleApi::from_config(config)?;
    let units = api.fetch_units().await.context("fetch units")?;
    info!(count = units.len(), "units fetched");

    for unit in &units {
        println!("  {:<10} {:<24} {}", unit.id, unit.name, unit.kind.as_deref().unwrap_or("-"));
    }
    Ok(())
}

async fn fetch(unit: &str, date: NaiveDate, config: &ScheduleConfig) -> anyhow::Result<()> {
    let api = HttpScheduleApi::from_config(config)?;
    let store = TaskStore::new(api, config.signer_id.clone());

    let outcome = store.load_day(date, unit).await;
    info!(?outcome, "load finished");

    let now = Local::now().naive_local();
    let tasks: Vec<_> = store
        .tasks()
        .iter()
        .map(|task| json!({ "task": task, "status": store.effective_status(task, date, now) }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => ScheduleConfig::load(path).with_context(|| format!("load config {}", path.display()))?,
        None => ScheduleConfig::default(),
    };

    match args.command {
        Commands::Assign { unit, date, roster } => {
            assign(&unit, date.unwrap_or_else(today), roster.as_deref(), &config).await
        }
        Commands::Validate { person, date, start, end, tasks, exclude, roster } => {
            validate(&person, date, start, end, &tasks, exclude.as_deref(), roster.as_deref(), &config).await
        }
        Commands::Layout { unit, date, tasks, period, width, roster } => {
            layout(&unit, date, &tasks, period, width, roster.as_deref(), &config).await
        }
        Commands::Missed { from, to, tasks, roster } => missed(from, to, &tasks, roster.as_deref(), &config).await,
        Commands::Units => units(&config).await,
        Commands::Fetch { unit, date } => fetch(&unit, date.unwrap_or_else(today), &config).await,
    }
}
