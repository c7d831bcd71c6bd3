//! Resource service: send one mutation, then resync UI state.
//!
//! DESIGN
//! ======
//! A `ResourceService` carries a single `RequestSpec` for the lifetime of
//! one save/destroy call. Resource-specific behavior (what to write into
//! the store once the mutation lands) is passed in as an `OnSuccess`
//! closure, so snippets and labels share one code path.
//!
//! Every completed mutation is followed by a full refetch of the default
//! state. The resource callback runs only after that refetch succeeded, so
//! it always sees refreshed global data.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is returned as an error. Transport failures are logged with
//! their detail and shown to the user as the configured generic message;
//! `completed: false` replies are shown with the server's reasons appended.
//! The returned `Outcome` only reports which path was taken.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::time::Duration;

use tracing::{error, warn};

use crate::net::{HttpMethod, RequestSpec, ServerResponse, Transport, TransportError};
use crate::state::{StateSink, Ui};

/// Display time for every error toast.
pub const ERROR_MESSAGE_DURATION: Duration = Duration::from_millis(6000);
/// Endpoint returning the consolidated application state.
pub const DEFAULT_STATE_PATH: &str = "/api/v1/data/default-state";
/// Shown when the post-mutation refresh fails.
pub const STATE_REFRESH_ERROR: &str = "Unable to update application state.";

/// Resource-specific store update, run with the original mutation reply.
pub type OnSuccess<'a> = Box<dyn FnOnce(&mut dyn StateSink, &ServerResponse) + Send + 'a>;

/// Which terminal path a call took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Mutation completed and state was refreshed.
    Completed,
    /// Server answered with `completed: false`.
    Rejected,
    /// The mutation request itself failed.
    TransportFailed,
    /// Mutation completed but the default-state refetch failed.
    StateRefreshFailed,
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct ResourceService<'t, T: Transport + ?Sized> {
    transport: &'t T,
    spec: RequestSpec,
}

impl<'t, T: Transport + ?Sized> ResourceService<'t, T> {
    pub fn new(transport: &'t T, spec: RequestSpec) -> Self {
        Self { transport, spec }
    }

    /// Send the configured create/update request with its body.
    pub async fn save(&self, ui: &mut Ui<'_>, on_success: Option<OnSuccess<'_>>) -> Outcome {
        let method = self.spec.method.http_method();
        let response = match self.send(method, self.spec.body.as_ref()).await {
            Ok(response) => response,
            Err(e) => return self.transport_failed(ui, method, &e),
        };

        if response.completed {
            return self.update_state(ui, on_success, &response).await;
        }

        warn!(path = %self.spec.path, errors = ?response.errors, "mutation rejected by server");
        let message = rejection_message(&self.spec.messages.error, response.errors.as_deref());
        ui.notifier.error(&message, ERROR_MESSAGE_DURATION);
        Outcome::Rejected
    }

    /// Send a bodiless DELETE to the configured path.
    ///
    /// An empty 2xx reply counts as a completed delete; only an explicit
    /// `completed: false` body is a rejection.
    pub async fn destroy(&self, ui: &mut Ui<'_>, on_success: Option<OnSuccess<'_>>) -> Outcome {
        let method = HttpMethod::Delete;
        let reply = match self.transport.request(method, &self.spec.path, None).await {
            Ok(reply) => reply,
            Err(e) => return self.transport_failed(ui, method, &e),
        };

        let response = if reply.is_null() {
            ServerResponse { completed: true, ..ServerResponse::default() }
        } else {
            match parse_reply(reply) {
                Ok(response) => response,
                Err(e) => return self.transport_failed(ui, method, &e),
            }
        };

        if response.completed {
            return self.update_state(ui, on_success, &response).await;
        }

        warn!(path = %self.spec.path, "delete rejected by server");
        ui.notifier.error(&self.spec.messages.error, ERROR_MESSAGE_DURATION);
        Outcome::Rejected
    }

    /// Refetch the default state and dispatch it, then run `on_success`
    /// with the mutation reply `response`.
    pub async fn update_state(
        &self,
        ui: &mut Ui<'_>,
        on_success: Option<OnSuccess<'_>>,
        response: &ServerResponse,
    ) -> Outcome {
        let data = match self.transport.request(HttpMethod::Get, DEFAULT_STATE_PATH, None).await {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "default state refresh failed");
                ui.notifier.error(STATE_REFRESH_ERROR, ERROR_MESSAGE_DURATION);
                return Outcome::StateRefreshFailed;
            }
        };

        ui.store.set_data(data);
        if let Some(on_success) = on_success {
            on_success(&mut *ui.store, response);
        }
        ui.store.set_default_active_entities();
        ui.notifier.success(&self.spec.messages.success);
        Outcome::Completed
    }

    async fn send(&self, method: HttpMethod, body: Option<&serde_json::Value>) -> Result<ServerResponse, TransportError> {
        let reply = self.transport.request(method, &self.spec.path, body).await?;
        parse_reply(reply)
    }

    fn transport_failed(&self, ui: &mut Ui<'_>, method: HttpMethod, e: &TransportError) -> Outcome {
        error!(error = %e, %method, path = %self.spec.path, "resource request failed");
        ui.notifier.error(&self.spec.messages.error, ERROR_MESSAGE_DURATION);
        Outcome::TransportFailed
    }
}

fn parse_reply(reply: serde_json::Value) -> Result<ServerResponse, TransportError> {
    ServerResponse::from_value(reply).map_err(|e| TransportError::Parse(e.to_string()))
}

/// Error toast text for a `completed: false` reply.
///
/// With an `errors` list present, each reason is appended on its own line
/// after a blank line, each terminated with a period.
#[must_use]
pub fn rejection_message(error: &str, errors: Option<&[String]>) -> String {
    let mut message = error.to_owned();
    if let Some(errors) = errors {
        message.push_str("<br/><br/>");
        for reason in errors {
            message.push_str(reason);
            message.push_str(".<br/>");
        }
    }
    message
}
