//! `visits`: terminal front end for the visit calendar.
//!
//! Reads `visits.toml` (or the path given with `--config`), loads the visit
//! list from JSON and either prints one view or runs an interactive shell.
//!
//! # Usage
//!
//! ```
//! visits calendar --view month --step -1
//! visits act v-1042 confirm
//! visits shell
//! ```

mod app;
mod settings;
mod ui;

use std::{
  io::Write as _,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use app::App;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use settings::Settings;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use visit_calendar::{
  BannerEvent, BannerTimer, CalendarState, Direction, StatusFilter, SurveyorFilter,
  ViewMode, engine,
};
use visit_core::{VisitAction, VisitStatus, VisitStore as _};
use visit_store::MemoryStore;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Visit calendar for site inspections")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "visits.toml")]
  config: PathBuf,

  /// Visit list to load; overrides `data_path` from the config.
  #[arg(short, long, env = "VISITS_DATA")]
  data: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the calendar for a range of days.
  Calendar {
    /// Reference date (default: today).
    #[arg(long)]
    date:     Option<NaiveDate>,
    /// today, working-week, week or month (default: from config).
    #[arg(long)]
    view:     Option<ViewMode>,
    /// `all` or a status such as `waiting-for-confirmation`.
    #[arg(long, default_value = "all")]
    status:   StatusFilter,
    /// `all` or an exact surveyor name.
    #[arg(long, default_value = "all")]
    surveyor: String,
    /// Move the range this many steps forward (negative for back).
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    step:     i32,
  },
  /// List allocated visits that have a due date but no slot.
  Unscheduled,
  /// List the surveyors with scheduled visits.
  Surveyors,
  /// Show one visit in full.
  Show { id: String },
  /// Overwrite a visit's status and save.
  SetStatus { id: String, status: VisitStatus },
  /// Confirm, decline or reschedule a visit awaiting confirmation, and save.
  Act { id: String, action: VisitAction },
  /// Show the awaiting-confirmation banner until it expires or Ctrl-C.
  Banner {
    /// Override `banner_duration_ms` from the config.
    #[arg(long)]
    duration_ms: Option<u64>,
  },
  /// Interactive shell.
  Shell,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs on stderr; stdout carries rendered output.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let data_path = cli.data.unwrap_or_else(|| settings.data_path.clone());

  let mut store = MemoryStore::open(&data_path)
    .with_context(|| format!("loading visits from {}", data_path.display()))?;
  tracing::debug!(path = %data_path.display(), visits = store.len(), "loaded visits");

  match cli.command {
    Command::Calendar {
      date,
      view,
      status,
      surveyor,
      step,
    } => {
      let today = engine::today();
      let mut state = CalendarState::new(date.unwrap_or(today))
        .with_view_mode(view.unwrap_or(settings.default_view));
      state.status_filter = status;
      state.surveyor_filter = SurveyorFilter::from(surveyor.as_str());

      let direction = if step < 0 { Direction::Previous } else { Direction::Next };
      for _ in 0..step.unsigned_abs() {
        state.navigate(direction);
      }

      let view = state.view(store.visits(), today);
      print!("{}", ui::calendar::render(&view, &state));
    }

    Command::Unscheduled => {
      print!("{}", ui::unscheduled(&engine::unscheduled_visits(store.visits())));
    }

    Command::Surveyors => {
      print!("{}", ui::surveyors(&engine::distinct_surveyor_names(store.visits())));
    }

    Command::Show { id } => {
      let visit = store
        .get(&id)
        .with_context(|| format!("no visit with id {id:?}"))?;
      print!("{}", ui::visit_detail::render(visit));
    }

    Command::SetStatus { id, status } => {
      if store.get(&id).is_none() {
        tracing::warn!(visit_id = %id, "no visit with this id, nothing to change");
        return Ok(());
      }
      store.on_visit_status_change(&id, status);
      save(&store, &data_path)?;
    }

    Command::Act { id, action } => {
      store.apply_action(&id, action)?;
      println!("{}", action.success_message());
      save(&store, &data_path)?;
    }

    Command::Banner { duration_ms } => {
      let duration = Duration::from_millis(duration_ms.unwrap_or(settings.banner_duration_ms));
      run_banner(store.awaiting_confirmation_count(), duration).await;
    }

    Command::Shell => {
      let duration = Duration::from_millis(settings.banner_duration_ms);
      run_shell(store, data_path, settings.default_view, duration).await?;
    }
  }

  Ok(())
}

fn save(store: &MemoryStore, path: &Path) -> anyhow::Result<()> {
  store
    .save(path)
    .with_context(|| format!("saving visits to {}", path.display()))?;
  tracing::info!(path = %path.display(), "saved visits");
  Ok(())
}

// ─── Banner ───────────────────────────────────────────────────────────────────

async fn run_banner(count: usize, duration: Duration) {
  let (mut timer, mut events) = BannerTimer::new(duration);
  timer.arm(count);
  match ui::banner(&timer.snapshot()) {
    Some(line) => println!("{line}"),
    None => {
      println!("No visits awaiting confirmation");
      return;
    }
  }

  loop {
    tokio::select! {
      event = events.recv() => match event {
        Some(BannerEvent::Fading) => println!("(fading)"),
        Some(BannerEvent::Dismissed(how)) => {
          tracing::debug!(?how, "banner dismissed");
          break;
        }
        None => break,
      },
      _ = tokio::signal::ctrl_c() => {
        timer.dismiss();
      }
    }
  }
}

// ─── Shell ────────────────────────────────────────────────────────────────────

async fn run_shell(
  store: MemoryStore,
  data_path: PathBuf,
  default_view: ViewMode,
  banner_duration: Duration,
) -> anyhow::Result<()> {
  let (mut app, mut events) =
    App::new(store, data_path, engine::today(), default_view, banner_duration);
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  app.render();
  flush(&mut app)?;

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line.context("reading stdin")? else { break };
        app.today = engine::today();
        let keep_going = app.handle_line(&line);
        flush(&mut app)?;
        if !keep_going? {
          break;
        }
      }
      Some(event) = events.recv() => {
        app.handle_banner_event(event);
        flush(&mut app)?;
      }
    }
  }

  Ok(())
}

fn flush(app: &mut App) -> anyhow::Result<()> {
  let mut stdout = std::io::stdout().lock();
  write!(stdout, "{}> ", app.take_output()).context("writing to stdout")?;
  stdout.flush().context("flushing stdout")
}
