//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that variable names are usable and do not collide
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NlbConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::NlbConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("headers.{0} must not be empty")]
    EmptyKey(&'static str),

    #[error("headers.{input} ({name}) collides with output headers.{output}")]
    InputIsOutput {
        input: &'static str,
        output: &'static str,
        name: String,
    },

    #[error("headers.{first} and headers.{second} both write {name}")]
    DuplicateOutput {
        first: &'static str,
        second: &'static str,
        name: String,
    },

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &NlbConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let keys = &config.headers;

    for (field, name) in keys.inputs().into_iter().chain(keys.outputs()) {
        if name.is_empty() {
            errors.push(ValidationError::EmptyKey(field));
        }
    }

    for (input, input_name) in keys.inputs() {
        for (output, output_name) in keys.outputs() {
            if !input_name.is_empty() && input_name.eq_ignore_ascii_case(output_name) {
                errors.push(ValidationError::InputIsOutput {
                    input,
                    output,
                    name: input_name.to_string(),
                });
            }
        }
    }

    let outputs = keys.outputs();
    for (i, &(field, name)) in outputs.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        if let Some(&(first, _)) = outputs[..i]
            .iter()
            .find(|(_, other)| other.eq_ignore_ascii_case(name))
        {
            errors.push(ValidationError::DuplicateOutput {
                first,
                second: field,
                name: name.to_string(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
