//! Entry points for UI actions against the Snibox API.
//!
//! Each function builds the `RequestSpec` for one action (fixed path,
//! verb, and toast text), wires the resource-specific store update, and
//! runs it through `ResourceService`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Value, json};

use crate::net::{Messages, Mutation, RequestSpec, ServerResponse, Transport};
use crate::service::{OnSuccess, Outcome, ResourceService};
use crate::state::{StateSink, Ui, empty_snippet};

pub const SNIPPETS_PATH: &str = "/api/v1/snippets";
pub const LABELS_PATH: &str = "/api/v1/labels";

fn member_path(collection: &str, id: Option<u64>) -> String {
    match id {
        Some(id) => format!("{collection}/{id}"),
        None => format!("{collection}/"),
    }
}

// =============================================================================
// DRAFTS
// =============================================================================

/// Snippet fields as currently shown in the editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    /// Server id; `None` for a snippet that was never saved.
    pub id: Option<u64>,
    /// Contents of the editable title field.
    pub title: String,
    /// Editor buffer.
    pub content: String,
    pub language: Option<String>,
    pub tabs: Option<u32>,
    /// Contents of the editable label-name field.
    pub label_name: String,
}

impl SnippetDraft {
    /// Request body for create/update. Unset optional fields are left out
    /// so an update does not overwrite them.
    #[must_use]
    pub fn payload(&self) -> Value {
        let mut snippet = json!({
            "title": self.title,
            "content": self.content,
            "label_attributes": { "name": self.label_name },
        });
        if let Some(id) = self.id {
            snippet["id"] = json!(id);
        }
        if let Some(language) = &self.language {
            snippet["language"] = json!(language);
        }
        if let Some(tabs) = self.tabs {
            snippet["tabs"] = json!(tabs);
        }
        json!({ "snippet": snippet })
    }
}

/// Label fields as currently shown in the label editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelDraft {
    pub id: Option<u64>,
    /// Contents of the editable name field.
    pub name: String,
}

impl LabelDraft {
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({ "label": { "name": self.name } })
    }
}

// =============================================================================
// SNIPPETS
// =============================================================================

pub mod snippet {
    use super::*;

    /// `POST /api/v1/snippets`.
    pub async fn create<T: Transport + ?Sized>(transport: &T, ui: &mut Ui<'_>, draft: &SnippetDraft) -> Outcome {
        let spec = RequestSpec::new(
            SNIPPETS_PATH,
            Mutation::Create,
            Messages::new("Snippet created!", "Unable to create snippet."),
        );
        save(transport, ui, spec, draft).await
    }

    /// `PATCH /api/v1/snippets/:id`.
    pub async fn update<T: Transport + ?Sized>(transport: &T, ui: &mut Ui<'_>, draft: &SnippetDraft) -> Outcome {
        let spec = RequestSpec::new(
            member_path(SNIPPETS_PATH, draft.id),
            Mutation::Update,
            Messages::new("Snippet updated!", "Unable to update snippet."),
        );
        save(transport, ui, spec, draft).await
    }

    /// `DELETE /api/v1/snippets/:id`; clears the active snippet on success.
    pub async fn destroy<T: Transport + ?Sized>(transport: &T, ui: &mut Ui<'_>, draft: &SnippetDraft) -> Outcome {
        let spec = RequestSpec::new(
            member_path(SNIPPETS_PATH, draft.id),
            Mutation::Delete,
            Messages::new("Snippet removed!", "Unable to delete snippet."),
        );
        ResourceService::new(transport, spec)
            .destroy(ui, Some(reset_active_snippet()))
            .await
    }

    async fn save<T: Transport + ?Sized>(
        transport: &T,
        ui: &mut Ui<'_>,
        spec: RequestSpec,
        draft: &SnippetDraft,
    ) -> Outcome {
        let spec = spec.with_body(draft.payload());
        ResourceService::new(transport, spec)
            .save(ui, Some(apply_saved_snippet()))
            .await
    }

    fn apply_saved_snippet() -> OnSuccess<'static> {
        Box::new(|store: &mut dyn StateSink, response: &ServerResponse| {
            store.set_active_snippet(response.entity.clone().unwrap_or(Value::Null));
        })
    }

    fn reset_active_snippet() -> OnSuccess<'static> {
        Box::new(|store: &mut dyn StateSink, _response: &ServerResponse| {
            store.set_active_snippet(empty_snippet());
        })
    }
}

// =============================================================================
// LABELS
// =============================================================================

pub mod label {
    use super::*;

    /// `PATCH /api/v1/labels/:id`; makes the saved label active and leaves
    /// edit mode.
    pub async fn update<T: Transport + ?Sized>(transport: &T, ui: &mut Ui<'_>, draft: &LabelDraft) -> Outcome {
        let spec = RequestSpec::new(
            member_path(LABELS_PATH, draft.id),
            Mutation::Update,
            Messages::new("Label updated!", "Unable to update label."),
        )
        .with_body(draft.payload());

        let on_success: OnSuccess<'static> = Box::new(|store: &mut dyn StateSink, response: &ServerResponse| {
            store.set_active_label(response.entity.clone().unwrap_or(Value::Null));
            store.close_label_edit();
        });
        ResourceService::new(transport, spec).save(ui, Some(on_success)).await
    }
}

// =============================================================================
// DATA
// =============================================================================

pub mod data {
    use super::*;
    use crate::net::HttpMethod;

    /// Plain GET of `link`. `callback` receives the parsed body on success;
    /// failures are only logged. Returns whether the callback ran.
    pub async fn get<T, F>(transport: &T, link: &str, callback: F) -> bool
    where
        T: Transport + ?Sized,
        F: FnOnce(Value),
    {
        match transport.request(HttpMethod::Get, link, None).await {
            Ok(body) => {
                callback(body);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, link, "data fetch failed");
                false
            }
        }
    }
}
