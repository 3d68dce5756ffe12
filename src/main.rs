use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use training_log::config::Config;
use training_log::form::{EditScript, IntervalForm};
use training_log::session::SessionPayload;

const USAGE: &str = "usage: training-log [--config <path>] [--session <payload.json>] <script.json>";

struct Args {
    config: PathBuf,
    session: Option<PathBuf>,
    script: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut config = PathBuf::from("config.toml");
    let mut session = None;
    let mut script = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = args.next().map(PathBuf::from).context(USAGE)?;
            }
            "--session" => {
                session = Some(args.next().map(PathBuf::from).context(USAGE)?);
            }
            "-h" | "--help" => bail!(USAGE),
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument '{}'\n{}", arg, USAGE),
        }
    }

    let script = script.context(USAGE)?;
    Ok(Args { config, session, script })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::default()
    };

    let log_file = std::fs::File::create(Path::new(&config.logging.log_file))
        .with_context(|| format!("Failed to create log file: {}", config.logging.log_file))?;
    tracing_subscriber::fmt()
        .with_env_filter(config.logging.filter.as_str())
        .with_writer(log_file)
        .init();

    let disabled = config.reconciler.disable_auto_regeneration;
    let (mut form, date, notes) = match &args.session {
        Some(path) => {
            let session = SessionPayload::load(path)?;
            (
                IntervalForm::from_session(&session, disabled),
                session.date,
                session.notes.clone(),
            )
        }
        None => (
            IntervalForm::new(config.defaults.controls(), disabled),
            chrono::Local::now().date_naive(),
            None,
        ),
    };

    let script = EditScript::load(&args.script)?;
    let summary = script.replay(&mut form);
    if summary.rejected_edits > 0 {
        tracing::warn!(rejected = summary.rejected_edits, "some step edits did not match a step");
    }

    let payload = form.to_payload(date, notes);
    println!("{}", payload.to_json_pretty()?);

    tracing::debug!("done");
    Ok(())
}
