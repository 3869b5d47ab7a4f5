use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::CommandFactory;

use appbuild::application::{BuildPipeline, BuildSummary};
use appbuild::config::{load_project, resolve, EnvOverrides};
use appbuild::presentation::Cli;
use appbuild::{BackendRegistry, FailureKind, Reporter};

use crate::ui::context::UiContext;
use crate::ui::json::events::{ConfigWarningEvent, SummaryEvent};
use crate::ui::json::{emit_event, JsonReporter};
use crate::ui::views::config::render_config_warnings;
use crate::ui::views::status_line::StatusLine;
use crate::ui::views::summary::render_summary;

pub async fn cmd_build(cli: &Cli) -> Result<ExitCode> {
    let working_dir = std::env::current_dir().context("cannot determine working directory")?;
    let ui = UiContext::new(cli);

    let (project, warnings) = load_project(&working_dir, cli.config.as_deref())?;
    if ui.json {
        for warning in &warnings {
            emit_event(&ConfigWarningEvent::from(warning))?;
        }
    } else {
        eprint!("{}", render_config_warnings(&warnings, ui.color, ui.unicode));
    }

    let registry = BackendRegistry::with_commands(&project.backend_commands());
    let reporter: Arc<dyn Reporter> = if ui.json {
        Arc::new(JsonReporter::stdout(cli.verbose))
    } else {
        Arc::new(StatusLine::new(ui))
    };
    let pipeline = BuildPipeline::new(registry).with_reporter(reporter);

    let env = EnvOverrides::from_env();
    let overrides = cli.to_overrides();
    let mut summary = BuildSummary::new();
    let mut usage_shown = false;

    for app in cli.app_names() {
        let config = resolve(&app, &overrides, &env, &project, &working_dir);
        let outcome = pipeline.run(&config).await?;

        let missing_target =
            outcome.first_failure().map(|failure| failure.kind) == Some(FailureKind::MissingTarget);
        if missing_target && !ui.json && !usage_shown {
            print_usage(pipeline.registry())?;
            usage_shown = true;
        }

        summary.push(&outcome, config.verbose);
    }

    summary.finish();
    if ui.json {
        emit_event(&SummaryEvent::new(&summary))?;
    } else {
        println!("{}", render_summary(&summary, ui.color));
    }

    Ok(ExitCode::from(summary.exit_code() as u8))
}

fn print_usage(registry: &BackendRegistry) -> io::Result<()> {
    let mut err = io::stderr().lock();
    writeln!(err, "{}", Cli::command().render_usage())?;
    writeln!(
        err,
        "\nA target is required to compile: -t <{}>",
        registry.ids().join("|")
    )
}
