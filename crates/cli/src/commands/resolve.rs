use std::fs;
use std::path::Path;

use pricebook_core::config::LoadOptions;
use pricebook_core::graphql::get_product_prices::ResponseData;
use pricebook_core::pricing::{DeterministicPriceResolver, PriceResolver};
use pricebook_core::{ApplicationError, PriceSource, ResolutionTrace, StepOutcome, TracedPrice};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{display_amount, load_config, CommandResult, EXIT_INPUT, EXIT_PRICING};

const COMMAND: &str = "resolve";

#[derive(Debug, Serialize)]
struct ResolveOutcome {
    command: &'static str,
    status: &'static str,
    amount: i64,
    source: PriceSource,
    currency: String,
    display_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<ResolutionTrace>,
}

pub fn run(options: &LoadOptions, input: &Path, include_trace: bool) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let traced = match resolve_file(input) {
        Ok(traced) => traced,
        Err(error) => {
            warn!(
                event_name = "pricing.resolve.failed",
                input = %input.display(),
                error_class = error.error_class(),
                retryable = error.is_retryable(),
                error = %error,
                "price resolution failed"
            );
            let exit_code =
                if matches!(error, ApplicationError::Input(_)) { EXIT_INPUT } else { EXIT_PRICING };
            return CommandResult::failure(COMMAND, error, input.display().to_string(), exit_code);
        }
    };

    log_trace(&traced.trace);
    info!(
        event_name = "pricing.resolve.completed",
        input = %input.display(),
        source = %traced.price.source,
        amount = traced.price.amount,
        "price resolved"
    );

    let outcome = ResolveOutcome {
        command: COMMAND,
        status: "ok",
        amount: traced.price.amount,
        source: traced.price.source,
        display_amount: display_amount(traced.price.amount, config.pricing.minor_unit_digits),
        currency: config.pricing.currency,
        trace: include_trace.then_some(traced.trace),
    };
    CommandResult::payload(0, &outcome)
}

fn resolve_file(input: &Path) -> Result<TracedPrice, ApplicationError> {
    let raw = fs::read_to_string(input).map_err(|error| {
        ApplicationError::Input(format!("could not read `{}`: {error}", input.display()))
    })?;

    let inputs = ResponseData::from_json(&raw)?.into_inputs()?;
    if let Some(label) = &inputs.unrecognised_price_class {
        warn!(
            event_name = "pricing.price_class.unrecognised",
            label = %label,
            "customer price class is not a known tier; tier pricing skipped"
        );
    }

    Ok(DeterministicPriceResolver.resolve_with_trace(&inputs)?)
}

fn log_trace(trace: &ResolutionTrace) {
    for step in &trace.steps {
        if let StepOutcome::Skipped(reason) = step.outcome {
            debug!(
                event_name = "pricing.resolve.stage_skipped",
                stage = %step.stage,
                reason = %reason,
                "precedence stage skipped"
            );
        }
    }
}
