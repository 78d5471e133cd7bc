use std::fs;
use std::path::Path;

use anyhow::Context;
use pricebook_core::config::{AppConfig, LoadOptions};
use pricebook_core::pricing::sheet::{price_sheet, PriceSheet, PriceSheetRequest, SheetSummary};
use pricebook_core::pricing::DeterministicPriceResolver;
use pricebook_core::{ApplicationError, PriceClass, PriceSource};
use serde::Serialize;
use tracing::{info, warn};

use super::{display_amount, load_config, CommandResult, EXIT_INPUT};

const COMMAND: &str = "sheet";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum LineOutcome {
    Ok { stock_id: String, amount: i64, source: PriceSource, display_amount: String },
    Error {
        stock_id: String,
        error_class: &'static str,
        interface_kind: &'static str,
        message: String,
        user_message: &'static str,
    },
}

#[derive(Debug, Serialize)]
struct SheetOutcome {
    command: &'static str,
    status: &'static str,
    currency: String,
    price_class: Option<PriceClass>,
    lines: Vec<LineOutcome>,
    summary: SheetSummary,
}

pub fn run(options: &LoadOptions, input: &Path) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let request = match read_request(input) {
        Ok(request) => request,
        Err(error) => {
            warn!(
                event_name = "pricing.sheet.input_rejected",
                input = %input.display(),
                error = %format!("{error:#}"),
                "price sheet request could not be loaded"
            );
            let error = ApplicationError::Input(format!("{error:#}"));
            return CommandResult::failure(COMMAND, error, input.display().to_string(), EXIT_INPUT);
        }
    };

    let sheet = price_sheet(&request, &DeterministicPriceResolver);
    if let Some(label) = &sheet.unrecognised_price_class {
        warn!(
            event_name = "pricing.price_class.unrecognised",
            input = %input.display(),
            label = %label,
            "customer price class is not a known tier; tier pricing skipped"
        );
    }
    let summary = sheet.summary();
    info!(
        event_name = "pricing.sheet.completed",
        input = %input.display(),
        lines = sheet.lines.len(),
        failed = summary.failed,
        "price sheet resolved"
    );

    CommandResult::payload(0, &render(&config, &sheet, summary))
}

fn read_request(input: &Path) -> anyhow::Result<PriceSheetRequest> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("could not read `{}`", input.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("`{}` is not a valid price sheet request", input.display()))
}

fn render(config: &AppConfig, sheet: &PriceSheet, summary: SheetSummary) -> SheetOutcome {
    let lines = sheet
        .lines
        .iter()
        .map(|line| match &line.outcome {
            Ok(price) => LineOutcome::Ok {
                stock_id: line.stock_id.0.clone(),
                amount: price.amount,
                source: price.source,
                display_amount: display_amount(price.amount, config.pricing.minor_unit_digits),
            },
            Err(error) => {
                warn!(
                    event_name = "pricing.sheet.line_failed",
                    stock_id = %line.stock_id.0,
                    error_class = error.error_class(),
                    "sheet line could not be priced"
                );
                let interface =
                    ApplicationError::from(error.clone()).into_interface(line.stock_id.0.clone());
                LineOutcome::Error {
                    stock_id: line.stock_id.0.clone(),
                    error_class: error.error_class(),
                    interface_kind: interface.kind(),
                    message: error.to_string(),
                    user_message: interface.user_message(),
                }
            }
        })
        .collect();

    SheetOutcome {
        command: COMMAND,
        status: "ok",
        currency: config.pricing.currency.clone(),
        price_class: sheet.price_class,
        lines,
        summary,
    }
}
