use pricebook_core::config::{AppConfig, LoadOptions};
use pricebook_core::pricing::{DeterministicPriceResolver, PriceResolver, PricingInputs};
use pricebook_core::{
    CustomerOverride, EffectivePrice, PriceClass, PriceSource, PricingError, StockPriceRecord,
    TierPrices,
};
use serde::Serialize;

use super::{CommandResult, EXIT_DOCTOR};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

struct Scenario {
    name: &'static str,
    inputs: PricingInputs,
    expected: Result<EffectivePrice, PricingError>,
}

pub fn run(options: &LoadOptions, json_output: bool) -> CommandResult {
    let report = build_report(options);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_DOCTOR };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            serde_json::json!({
                "overall_status": "fail",
                "summary": "doctor serialization failed",
                "error": error.to_string(),
            })
            .to_string()
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: &LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options.clone()) {
        Ok(config) => checks.push(DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: format!(
                "configuration loaded (currency {}, {} minor unit digits)",
                config.pricing.currency, config.pricing.minor_unit_digits
            ),
        }),
        Err(error) => checks.push(DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        }),
    }

    checks.extend(scenarios().into_iter().map(check_scenario));

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_scenario(scenario: Scenario) -> DoctorCheck {
    let actual = DeterministicPriceResolver.resolve(&scenario.inputs);
    if actual == scenario.expected {
        DoctorCheck {
            name: scenario.name,
            status: CheckStatus::Pass,
            details: format!("resolved to {}", describe(&actual)),
        }
    } else {
        DoctorCheck {
            name: scenario.name,
            status: CheckStatus::Fail,
            details: format!(
                "expected {} but resolved to {}",
                describe(&scenario.expected),
                describe(&actual)
            ),
        }
    }
}

fn describe(outcome: &Result<EffectivePrice, PricingError>) -> String {
    match outcome {
        Ok(price) => format!("{} from {}", price.amount, price.source),
        Err(error) => error.error_class().to_string(),
    }
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "resolver_override_precedence",
            inputs: PricingInputs {
                stock: Some(
                    StockPriceRecord::new(200)
                        .with_campaign(Some(100), true)
                        .with_tiers(TierPrices::new().with(PriceClass::A, 120)),
                ),
                overrides: vec![CustomerOverride::priced(150)],
                price_class: Some(PriceClass::A),
                unrecognised_price_class: None,
            },
            expected: Ok(EffectivePrice::new(150, PriceSource::Override)),
        },
        Scenario {
            name: "resolver_campaign_precedence",
            inputs: PricingInputs {
                stock: Some(
                    StockPriceRecord::new(200)
                        .with_campaign(Some(90), true)
                        .with_tiers(TierPrices::new().with(PriceClass::B, 110)),
                ),
                overrides: vec![CustomerOverride::default()],
                price_class: Some(PriceClass::B),
                unrecognised_price_class: None,
            },
            expected: Ok(EffectivePrice::new(90, PriceSource::Campaign)),
        },
        Scenario {
            name: "resolver_tier_precedence",
            inputs: PricingInputs {
                stock: Some(
                    StockPriceRecord::new(200)
                        .with_tiers(TierPrices::new().with(PriceClass::C, 95)),
                ),
                overrides: Vec::new(),
                price_class: Some(PriceClass::C),
                unrecognised_price_class: None,
            },
            expected: Ok(EffectivePrice::new(95, PriceSource::Tier)),
        },
        Scenario {
            name: "resolver_base_fallback",
            inputs: PricingInputs {
                stock: Some(StockPriceRecord::new(150).with_campaign(None, true)),
                overrides: Vec::new(),
                price_class: None,
                unrecognised_price_class: None,
            },
            expected: Ok(EffectivePrice::new(150, PriceSource::Base)),
        },
        Scenario {
            name: "resolver_ambiguous_override",
            inputs: PricingInputs {
                stock: Some(StockPriceRecord::new(200)),
                overrides: vec![CustomerOverride::priced(150), CustomerOverride::priced(150)],
                price_class: None,
                unrecognised_price_class: None,
            },
            expected: Err(PricingError::AmbiguousOverride { rows: 2 }),
        },
    ]
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
