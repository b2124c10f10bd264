use std::collections::HashMap;

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::fmt::{FormatterOutcome, build_args, resolve_config_path, run_formatter};
use crate::lsp::FORMAT_COMMAND;
use crate::lsp::backend::Backend;
use crate::lsp::document::replace_all_edit;

/// Trait for handling document formatting requests
#[tower_lsp::async_trait]
pub trait HandleFormatting {
    async fn handle_formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>>;
}

/// Trait for handling the manual format command
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>>;
}

/// Trait for running one text-to-text trip through the external formatter
#[tower_lsp::async_trait]
pub trait FormatText {
    async fn format_text(&self, text: &str) -> Option<String>;
}

#[tower_lsp::async_trait]
impl FormatText for Backend {
    /// Resolve configuration, invoke fprettify, and surface failures.
    ///
    /// All failure is absorbed here: the user gets one error notification
    /// and the caller gets `None`, leaving the document unchanged.
    async fn format_text(&self, text: &str) -> Option<String> {
        let (formatter, explicit_config) = {
            let config = self.config.lock().await;
            (config.formatter.clone(), config.cli_config_file.clone())
        };

        let config_path = match explicit_config {
            Some(explicit) => Some(explicit),
            None => {
                let root = self.workspace_root.lock().await.clone();
                resolve_config_path(root.as_deref())
            }
        };

        let args = build_args(config_path.as_deref());
        log::debug!("running {} with args {:?}", formatter.display(), args);

        match run_formatter(&formatter, &args, text).await {
            FormatterOutcome::Formatted(formatted) => Some(formatted),
            FormatterOutcome::Failed(message) => {
                self.client
                    .show_message(MessageType::ERROR, message)
                    .await;
                None
            }
        }
    }
}

#[tower_lsp::async_trait]
impl HandleFormatting for Backend {
    async fn handle_formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;

        let text = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(state) => state.content.clone(),
                // Untracked document: nothing to format
                None => return Ok(None),
            }
        };

        // On bridge failure, decline silently with zero edits.
        match self.format_text(&text).await {
            Some(formatted) => Ok(Some(vec![replace_all_edit(&text, formatted)])),
            None => Ok(Some(Vec::new())),
        }
    }
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>> {
        if params.command != FORMAT_COMMAND {
            log::warn!("unknown command: {}", params.command);
            return Ok(None);
        }

        // The client passes the target document URI as the first argument.
        // Without one there is nothing to format; stay silent.
        let uri = match params
            .arguments
            .first()
            .and_then(|arg| arg.as_str())
            .and_then(|raw| Url::parse(raw).ok())
        {
            Some(uri) => uri,
            None => return Ok(None),
        };

        let text = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(state) => state.content.clone(),
                None => return Ok(None),
            }
        };

        let formatted = match self.format_text(&text).await {
            Some(formatted) => formatted,
            None => return Ok(None),
        };

        // Push the replacement to the live editor rather than returning edits
        let mut changes = HashMap::new();
        changes.insert(uri, vec![replace_all_edit(&text, formatted)]);
        let edit = WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        };

        match self.client.apply_edit(edit).await {
            Ok(response) if !response.applied => {
                log::warn!(
                    "client declined workspace edit: {}",
                    response.failure_reason.unwrap_or_default()
                );
            }
            Ok(_) => {}
            Err(e) => log::warn!("applyEdit request failed: {}", e),
        }

        Ok(None)
    }
}
