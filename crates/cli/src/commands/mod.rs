pub mod config;
pub mod doctor;
pub mod resolve;
pub mod sheet;

use pricebook_core::config::{AppConfig, LoadOptions};
use pricebook_core::ApplicationError;
use rust_decimal::Decimal;
use serde::Serialize;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_PRICING: u8 = 3;
pub const EXIT_INPUT: u8 = 4;
pub const EXIT_DOCTOR: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: &'static str,
    error_class: &'static str,
    interface_kind: &'static str,
    message: String,
    user_message: &'static str,
    correlation_id: String,
}

impl CommandResult {
    /// Failure payload carrying both the internal error class and the
    /// caller-facing interface mapping.
    pub fn failure(
        command: &str,
        error: ApplicationError,
        correlation_id: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let error_class = error.error_class();
        let message = error.to_string();
        let interface = error.into_interface(correlation_id);
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error",
            error_class,
            interface_kind: interface.kind(),
            message,
            user_message: interface.user_message(),
            correlation_id: interface.correlation_id().to_string(),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }

    pub fn payload(exit_code: u8, payload: &impl Serialize) -> Self {
        Self { exit_code, output: serialize_payload(payload) }
    }
}

pub(crate) fn load_config(
    command: &str,
    options: &LoadOptions,
) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options.clone()).map_err(|error| {
        let error = ApplicationError::Configuration(error.to_string());
        tracing::error!(
            event_name = "cli.config.invalid",
            command,
            error = %error,
            "configuration failed to load"
        );
        CommandResult::failure(command, error, command, EXIT_CONFIG)
    })
}

/// Renders minor units as an exact major-unit decimal, `150` with 2 digits is `1.50`.
pub fn display_amount(amount: i64, minor_unit_digits: u32) -> String {
    Decimal::new(amount, minor_unit_digits).to_string()
}

fn serialize_payload(payload: &impl Serialize) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        serde_json::json!({
            "command": "unknown",
            "status": "error",
            "error_class": "serialization",
            "message": error.to_string(),
        })
        .to_string()
    })
}
