use crate::cli::{OutputFormat, RunArgs};
use crate::client::ApiClient;
use crate::config::Context;
use crate::output::{print_info, print_report, print_scenarios};
use crate::photo::PhotoFixtures;
use crate::scenario::{self, Report, RunOptions, ScenarioContext};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run the selected scenarios and print the report.
pub async fn execute(ctx: &Context, args: RunArgs) -> Result<Report> {
    let scenarios = scenario::select(&args.scenarios)?;
    let credentials = ctx.credentials()?;
    let client = ApiClient::new(ctx)?;
    let suite = ScenarioContext::new(client, credentials, PhotoFixtures::new(ctx.images_dir()));
    let options = RunOptions {
        fail_fast: args.fail_fast,
    };

    let format = ctx.output_format();
    let report = if format == OutputFormat::Table {
        print_info(&format!(
            "Running {} scenario(s) against {}",
            scenarios.len(),
            ctx.api_url()
        ));

        let progress = ProgressBar::new(scenarios.len() as u64);
        progress.set_style(ProgressStyle::with_template(
            "{spinner:.cyan} [{pos}/{len}] {msg}",
        )?);
        progress.enable_steady_tick(Duration::from_millis(100));

        let report = scenario::runner::run_all_with(&suite, &scenarios, options, |s| {
            progress.inc(1);
            progress.set_message(s.name);
        })
        .await;
        progress.finish_and_clear();
        report
    } else {
        scenario::runner::run_all(&suite, &scenarios, options).await
    };

    print_report(format, &report)?;
    Ok(report)
}

/// List the scenario catalogue.
pub fn list(ctx: &Context) -> Result<()> {
    let scenarios = scenario::catalogue();
    match ctx.output_format() {
        OutputFormat::Table => {
            print_scenarios(&scenarios);
            Ok(())
        }
        format => {
            let names: Vec<_> = scenarios
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "description": s.description,
                        "known_defect": matches!(s.expectation, scenario::Expectation::KnownDefect(_)),
                    })
                })
                .collect();
            crate::output::print_single(format, &names)
        }
    }
}
