//! CloudFormation-backed stack orchestration.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::types::{Capability, Parameter};
use aws_sdk_cloudformation::Client;
use tracing::{debug, info};

use crate::providers::traits::{
    BackendError, StackBackend, StackDescription, StackOutput, StackParameter, StackSpec,
    StackStatus, StackSummary,
};

/// Default interval between status polls while waiting for steady state.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// CloudFormation implementation of [`StackBackend`].
#[derive(Clone)]
pub struct AwsCloudFormation {
    client: Client,
    poll_interval: Duration,
}

impl AwsCloudFormation {
    /// Wrap an already-configured CloudFormation client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the status poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[async_trait]
impl StackBackend for AwsCloudFormation {
    async fn validate_template(&self, body: &str) -> Result<(), BackendError> {
        debug!(bytes = body.len(), "validating template");
        self.client
            .validate_template()
            .template_body(body)
            .send()
            .await
            .map_err(|err| validation_fault(&err))?;
        Ok(())
    }

    async fn list_stacks(&self) -> Result<Vec<StackSummary>, BackendError> {
        let mut stacks = Vec::new();
        let mut pages = self.client.list_stacks().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| stack_fault(&err))?;
            for summary in page.stack_summaries() {
                let Some(name) = summary.stack_name() else {
                    continue;
                };
                stacks.push(StackSummary {
                    name: name.to_string(),
                    status: summary
                        .stack_status()
                        .map_or(StackStatus::Unknown, |s| map_status(s.as_str())),
                });
            }
        }
        debug!(count = stacks.len(), "enumerated stacks");
        Ok(stacks)
    }

    async fn create_stack(&self, spec: &StackSpec) -> Result<String, BackendError> {
        info!(stack = %spec.name, parameters = spec.parameters.len(), "submitting create");
        let output = self
            .client
            .create_stack()
            .stack_name(&spec.name)
            .template_body(&spec.template_body)
            .set_parameters(Some(
                spec.parameters.iter().map(to_sdk_parameter).collect(),
            ))
            .capabilities(Capability::CapabilityIam)
            .send()
            .await
            .map_err(|err| stack_fault(&err))?;
        output
            .stack_id()
            .map(ToString::to_string)
            .ok_or_else(|| BackendError::Api {
                code: "MissingStackId".to_string(),
                message: format!("create of {} returned no stack id", spec.name),
            })
    }

    async fn update_stack(&self, spec: &StackSpec) -> Result<String, BackendError> {
        info!(stack = %spec.name, parameters = spec.parameters.len(), "submitting update");
        let output = self
            .client
            .update_stack()
            .stack_name(&spec.name)
            .template_body(&spec.template_body)
            .set_parameters(Some(
                spec.parameters.iter().map(to_sdk_parameter).collect(),
            ))
            .capabilities(Capability::CapabilityIam)
            .send()
            .await
            .map_err(|err| stack_fault(&err))?;
        output
            .stack_id()
            .map(ToString::to_string)
            .ok_or_else(|| BackendError::Api {
                code: "MissingStackId".to_string(),
                message: format!("update of {} returned no stack id", spec.name),
            })
    }

    async fn describe_stack(&self, name: &str) -> Result<StackDescription, BackendError> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
            .map_err(|err| stack_fault(&err))?;
        let stack = output
            .stacks()
            .first()
            .ok_or_else(|| BackendError::NotFound(format!("stack {name}")))?;
        Ok(StackDescription {
            id: stack.stack_id().unwrap_or_default().to_string(),
            name: stack.stack_name().unwrap_or(name).to_string(),
            status: stack
                .stack_status()
                .map_or(StackStatus::Unknown, |s| map_status(s.as_str())),
            status_reason: stack.stack_status_reason().map(ToString::to_string),
            outputs: stack
                .outputs()
                .iter()
                .filter_map(|output| {
                    Some(StackOutput {
                        key: output.output_key()?.to_string(),
                        value: output.output_value()?.to_string(),
                    })
                })
                .collect(),
        })
    }

    async fn wait_for_steady_state(&self, name: &str) -> Result<StackDescription, BackendError> {
        info!(stack = %name, "waiting for stack to settle");
        loop {
            let description = self.describe_stack(name).await?;
            debug!(stack = %name, status = %description.status, "polling stack status");

            if description.status.is_steady() {
                info!(stack = %name, status = %description.status, "stack settled");
                return Ok(description);
            }
            if description.status.is_terminal() {
                return Err(BackendError::OperationFailed {
                    name: name.to_string(),
                    status: description.status,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn to_sdk_parameter(parameter: &StackParameter) -> Parameter {
    Parameter::builder()
        .parameter_key(&parameter.key)
        .parameter_value(&parameter.value)
        .build()
}

/// Map a raw status string onto our lifecycle enum. Update-rollback statuses
/// collapse into the plain rollback variants.
fn map_status(raw: &str) -> StackStatus {
    match raw {
        "CREATE_IN_PROGRESS" => StackStatus::CreateInProgress,
        "CREATE_COMPLETE" => StackStatus::CreateComplete,
        "CREATE_FAILED" => StackStatus::CreateFailed,
        "UPDATE_IN_PROGRESS" | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => {
            StackStatus::UpdateInProgress
        }
        "UPDATE_COMPLETE" => StackStatus::UpdateComplete,
        "UPDATE_FAILED" => StackStatus::UpdateFailed,
        "ROLLBACK_IN_PROGRESS"
        | "UPDATE_ROLLBACK_IN_PROGRESS"
        | "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS" => StackStatus::RollbackInProgress,
        "ROLLBACK_COMPLETE" | "UPDATE_ROLLBACK_COMPLETE" => StackStatus::RollbackComplete,
        "ROLLBACK_FAILED" | "UPDATE_ROLLBACK_FAILED" => StackStatus::RollbackFailed,
        "DELETE_IN_PROGRESS" => StackStatus::DeleteInProgress,
        "DELETE_COMPLETE" => StackStatus::DeleteComplete,
        "DELETE_FAILED" => StackStatus::DeleteFailed,
        "REVIEW_IN_PROGRESS" => StackStatus::ReviewInProgress,
        _ => StackStatus::Unknown,
    }
}

/// The backend reports a no-op update as a plain validation error; the
/// message text is the only discriminator the API exposes.
fn is_noop(code: &str, message: &str) -> bool {
    code == "ValidationError" && message.contains("No updates are to be performed")
}

fn is_missing_stack(code: &str, message: &str) -> bool {
    code == "ValidationError" && message.contains("does not exist")
}

enum Fault {
    Transient(String),
    Service { code: String, message: String },
}

fn fault<E, R>(err: &SdkError<E, R>) -> Fault
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Fault::Transient(err.to_string())
        }
        _ => Fault::Service {
            code: err.code().unwrap_or("Unknown").to_string(),
            message: err.message().unwrap_or("no message from backend").to_string(),
        },
    }
}

/// Error mapping for template validation calls.
fn validation_fault<E, R>(err: &SdkError<E, R>) -> BackendError
where
    E: ProvideErrorMetadata,
{
    match fault(err) {
        Fault::Transient(message) => BackendError::Transient(message),
        Fault::Service { code, message } if code == "ValidationError" => {
            BackendError::Validation(message)
        }
        Fault::Service { code, message } => BackendError::Api { code, message },
    }
}

/// Error mapping for stack lifecycle calls.
fn stack_fault<E, R>(err: &SdkError<E, R>) -> BackendError
where
    E: ProvideErrorMetadata,
{
    match fault(err) {
        Fault::Transient(message) => BackendError::Transient(message),
        Fault::Service { code, message } if is_noop(&code, &message) => BackendError::NoChanges,
        Fault::Service { code, message } if is_missing_stack(&code, &message) => {
            BackendError::NotFound(message)
        }
        Fault::Service { code, message } => BackendError::Api { code, message },
    }
}
