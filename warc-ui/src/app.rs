use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use warc_core::{
    FormController, FormError, Irrigation, LeakDetection, Page, PageKind, PredictionService,
    RainwaterHarvesting, ScenarioGenerator, ServiceRegistry, Status,
};
use warc_http::HttpServiceFactory;

use crate::{config::DashboardConfig, csv_loader, prompt, render};

/// Registry with every backend this binary ships.
pub fn build_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(HttpServiceFactory));
    registry
}

/// Where a submission's field values come from, applied in this order:
/// assignments, then prompts. CSV input replaces both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    pub assignments: Vec<(String, String)>,
    pub interactive: bool,
    pub csv: Option<PathBuf>,
}

/// Parses a `key=value` assignment from the command line.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Outcome counts of one `submit` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Forms rejected before any request was sent.
    pub invalid: usize,
}

/// Fills, submits and renders one page.
pub async fn submit_page(
    kind: PageKind,
    config: &DashboardConfig,
    service: &dyn PredictionService,
    options: &SubmitOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<SubmitSummary> {
    let endpoint = config.endpoint(kind);
    match kind {
        PageKind::LeakDetection => {
            run::<LeakDetection>(endpoint, service, options, input, output).await
        }
        PageKind::Irrigation => run::<Irrigation>(endpoint, service, options, input, output).await,
        PageKind::Rainwater => {
            run::<RainwaterHarvesting>(endpoint, service, options, input, output).await
        }
        PageKind::Scenarios => {
            run::<ScenarioGenerator>(endpoint, service, options, input, output).await
        }
    }
}

async fn run<P: Page>(
    endpoint: &str,
    service: &dyn PredictionService,
    options: &SubmitOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<SubmitSummary> {
    let mut controller = FormController::<P>::new(endpoint);
    writeln!(output, "{}", P::KIND.title())?;

    let mut summary = SubmitSummary::default();

    if let Some(path) = &options.csv {
        let forms = csv_loader::load_forms_from_file(path, P::SCHEMA)
            .with_context(|| format!("failed to load forms from {}", path.display()))?;
        info!(page = %P::KIND, rows = forms.len(), "Loaded CSV forms");

        for form in forms {
            controller.reset();
            for (name, value) in form.values {
                controller.update_field(name, value)?;
            }
            writeln!(output, "\nRow {}", form.row)?;
            submit_once(&mut controller, service, output, &mut summary).await?;
        }
        return Ok(summary);
    }

    for (name, value) in &options.assignments {
        controller
            .update_field(name, value.as_str())
            .with_context(|| format!("cannot set '{name}' on the {} page", P::KIND))?;
    }
    if options.interactive {
        prompt::fill_form(&mut controller, input, output)?;
    }

    submit_once(&mut controller, service, output, &mut summary).await?;
    if summary.invalid > 0 {
        bail!("the {} form is incomplete", P::KIND);
    }
    Ok(summary)
}

async fn submit_once<P: Page>(
    controller: &mut FormController<P>,
    service: &dyn PredictionService,
    output: &mut impl Write,
    summary: &mut SubmitSummary,
) -> Result<()> {
    let submission = match controller.begin_submit() {
        Ok(submission) => submission,
        Err(FormError::Invalid(errors)) => {
            debug!(page = %P::KIND, count = errors.len(), "Form rejected");
            writeln!(output, "Please fix the following before submitting:")?;
            for error in errors {
                writeln!(output, "  - {error}")?;
            }
            summary.invalid += 1;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    writeln!(output, "{}", render::status_line(controller.status(), None))?;
    output.flush()?;

    let completion = submission.dispatch(service).await;
    controller.complete(completion);

    writeln!(
        output,
        "{}",
        render::status_line(controller.status(), controller.error())
    )?;
    match controller.view() {
        Some(view) if controller.status() == Status::Success => {
            writeln!(output)?;
            write!(output, "{}", render::result_view(&view))?;
            summary.succeeded += 1;
        }
        _ => summary.failed += 1,
    }
    Ok(())
}
