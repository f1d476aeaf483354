use crate::cli::OutputFormat;
use crate::client::ApiResponse;
use crate::models::Pet;
use crate::scenario::{Expectation, Outcome, Report, Scenario};
use console::{Style, style};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Print data as a table
pub fn print_table<T: Tabled>(data: Vec<T>) {
    if data.is_empty() {
        println!("{}", style("No items found").dim());
        return;
    }
    let table = Table::new(data).to_string();
    println!("{}", table);
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    print!("{}", yaml);
    Ok(())
}

/// Print a single item as JSON or YAML; table mode falls back to pretty JSON.
pub fn print_single<T: Serialize>(format: OutputFormat, data: &T) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => print_json(data),
        OutputFormat::Yaml => print_yaml(data),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", style("!").yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

pub fn outcome_style(outcome: &Outcome) -> Style {
    match outcome {
        Outcome::Passed => Style::new().green(),
        Outcome::Failed { .. } => Style::new().red().bold(),
        Outcome::KnownDefect { .. } => Style::new().yellow(),
        Outcome::UnexpectedPass { .. } => Style::new().cyan().bold(),
    }
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "SCENARIO")]
    name: String,
    #[tabled(rename = "OUTCOME")]
    outcome: String,
    #[tabled(rename = "TIME")]
    duration: String,
    #[tabled(rename = "NOTE")]
    note: String,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "NAME")]
    name: &'static str,
    #[tabled(rename = "EXPECTATION")]
    expectation: &'static str,
    #[tabled(rename = "DESCRIPTION")]
    description: &'static str,
}

pub fn print_report(format: OutputFormat, report: &Report) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => return print_json(report),
        OutputFormat::Yaml => return print_yaml(report),
        OutputFormat::Table => {}
    }

    let rows = report
        .results
        .iter()
        .map(|r| ReportRow {
            name: r.name.clone(),
            outcome: outcome_style(&r.outcome)
                .apply_to(r.outcome.label())
                .to_string(),
            duration: format!("{}ms", r.duration_ms),
            note: r.outcome.detail().unwrap_or_default().to_string(),
        })
        .collect();
    print_table(rows);

    let s = &report.summary;
    println!();
    let line = format!(
        "{} passed, {} failed, {} known defects, {} unexpected passes, {} skipped ({} total)",
        s.passed, s.failed, s.known_defects, s.unexpected_passes, s.skipped, s.total
    );
    if report.is_success() {
        print_success(&line);
    } else {
        print_error(&line);
    }
    if s.unexpected_passes > 0 {
        print_warning("Some known defects no longer reproduce; the service may have been fixed");
    }
    Ok(())
}

pub fn print_scenarios(scenarios: &[Scenario]) {
    let rows = scenarios
        .iter()
        .map(|s| ScenarioRow {
            name: s.name,
            expectation: match s.expectation {
                Expectation::Pass => "pass",
                Expectation::KnownDefect(_) => "known defect",
            },
            description: s.description,
        })
        .collect();
    print_table(rows);
}

/// Print a raw API response: status line, then body.
pub fn print_response(format: OutputFormat, response: &ApiResponse) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return print_single(format, response);
    }
    let status = response.status_code();
    let line = format!("HTTP {}", status);
    if response.is_success() {
        print_success(&line);
    } else {
        print_error(&line);
    }
    match response.json() {
        Some(value) => print_json(value)?,
        None => {
            let text = response.text();
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    }
    Ok(())
}

/// Print a pet list response; non-list bodies fall back to the raw response.
pub fn print_pets(format: OutputFormat, response: &ApiResponse) -> anyhow::Result<()> {
    if format != OutputFormat::Table || !response.is_success() {
        return print_response(format, response);
    }
    match response.pets() {
        Some(list) => {
            let pets: Vec<Pet> = list.pets;
            print_table(pets);
            Ok(())
        }
        None => print_response(format, response),
    }
}
