use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::Config;
use crate::lsp::FORMAT_COMMAND;
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleExecuteCommand, HandleFormatting};

/// Client-supplied settings, passed through `initializationOptions`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    /// Formatter executable override
    pub formatter: Option<PathBuf>,
    /// Explicit configuration file override
    pub config_file: Option<PathBuf>,
}

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub workspace_root: Arc<Mutex<Option<PathBuf>>>,
    pub config: Arc<Mutex<Config>>,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            documents: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            config: Arc::new(Mutex::new(config)),
        }
    }

    /// First workspace folder reported by the client, if any
    fn extract_workspace_root(params: &InitializeParams) -> Option<PathBuf> {
        if let Some(folders) = &params.workspace_folders {
            if let Some(first) = folders.first() {
                return first.uri.to_file_path().ok();
            }
        }

        // Older clients send root_uri instead of workspace folders
        #[allow(deprecated)]
        let root_uri = params.root_uri.as_ref();
        root_uri.and_then(|uri| uri.to_file_path().ok())
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        let root = Self::extract_workspace_root(&params);
        if let Some(ref root) = root {
            log::info!("workspace root: {}", root.display());
        }
        *self.workspace_root.lock().await = root;

        if let Some(raw) = params.initialization_options {
            match serde_json::from_value::<InitializationOptions>(raw) {
                Ok(options) => {
                    let mut config = self.config.lock().await;
                    if let Some(formatter) = options.formatter {
                        config.formatter = formatter;
                    }
                    if let Some(config_file) = options.config_file {
                        config.cli_config_file = Some(config_file);
                    }
                }
                Err(e) => log::warn!("ignoring malformed initializationOptions: {}", e),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                document_formatting_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![FORMAT_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "fprettify-language-server initialized")
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Vec<TextEdit>>> {
        self.handle_formatting(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<serde_json::Value>> {
        self.handle_execute_command(params).await
    }

    // Track open documents so both formatting entry points can read their text
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;

        let mut docs = self.documents.lock().await;
        docs.insert(uri, DocumentState { content });
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            docs.insert(uri, DocumentState {
                content: change.text,
            });
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut docs = self.documents.lock().await;
        docs.remove(&params.text_document.uri);
    }
}
