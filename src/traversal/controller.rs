use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc;

use crate::authorized::AuthorizationTable;
use crate::encoding::encode_stream;
use crate::error::ControllerError;
use crate::file_info::{FileKind, IndexedName};
use crate::notification::{EncodedImage, Inbound, ListRequest, Outbound, RetrieveRequest};
use crate::transport::{Connector, RemoteSession};

use super::path_selection::{OperationKind, select_path};
use super::TraversalState;

pub struct TraversalController<C: Connector> {
    connector: C,
    table: AuthorizationTable,
    state: TraversalState,
    outbound: mpsc::UnboundedSender<Outbound>,
    read_chunk_size: usize,
    io_timeout: Duration,
}

impl<C: Connector> TraversalController<C> {
    pub fn new(
        connector: C,
        table: AuthorizationTable,
        outbound: mpsc::UnboundedSender<Outbound>,
        read_chunk_size: usize,
        io_timeout: Duration,
    ) -> Self {
        Self {
            connector,
            table,
            state: TraversalState::default(),
            outbound,
            read_chunk_size,
            io_timeout,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// Processes one request to completion. Transport and pipeline failures
    /// reset the traversal before the error is returned.
    pub async fn handle(&mut self, request: Inbound) -> Result<(), ControllerError> {
        info!("{} received", request.name());

        match request {
            Inbound::List(request) => self.handle_list(request).await,
            Inbound::Retrieve(request) => self.handle_retrieve(request).await,
            Inbound::NextDir => {
                self.advance();
                Ok(())
            }
        }
    }

    /// Moves the cursor to the next discovered subdirectory. No I/O.
    pub fn advance(&mut self) {
        self.state.cursor += 1;
        debug!("cursor advanced to {}", self.state.cursor);
    }

    /// Discards all traversal state and tells the caller to start over.
    pub fn reset(&mut self) {
        warn!("Resetting traversal state");
        self.state.reset();
        self.emit(Outbound::Reset);
    }

    async fn handle_list(&mut self, request: ListRequest) -> Result<(), ControllerError> {
        self.state.files.clear();

        let authorized = match request.authorized_directories() {
            Ok(names) => names.to_vec(),
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };
        self.state.authorized_directory_names = Some(authorized);

        let result = self.list(&request).await;
        self.settle(result)
    }

    async fn handle_retrieve(&mut self, request: RetrieveRequest) -> Result<(), ControllerError> {
        if let Some(previous) = self.state.last_image.take() {
            debug!("Discarding previous image ({} base64 chars)", previous.data.len());
        }

        let file_name = match request.file_name() {
            Ok(name) => name.to_string(),
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        let result = self.retrieve(&request, &file_name).await;
        self.settle(result)
    }

    fn settle(&mut self, result: Result<(), ControllerError>) -> Result<(), ControllerError> {
        if let Err(e) = &result {
            warn!("Request failed: {}", e);
            if e.requires_reset() {
                self.reset();
            }
        }
        result
    }

    async fn list(&mut self, request: &ListRequest) -> Result<(), ControllerError> {
        let mut session = self.connector.connect(&request.connection).await?;
        // l'albero ha due livelli: solo il listing della radice ricostruisce le sottodirectory
        let at_root = self.state.cursor <= 0;

        self.enter_directory(
            &mut session,
            OperationKind::List,
            request.default_dir_path.as_deref(),
            request.finish(),
        )
        .await?;

        let entries = session.list().await?;

        self.state.files.clear();
        if at_root {
            self.state.subdirectories.clear();
        }

        for entry in &entries {
            match entry.kind {
                FileKind::File if self.table.is_authorized_image(&entry.name) => {
                    IndexedName::push(&mut self.state.files, &entry.name);
                }
                FileKind::Directory
                    if at_root
                        && !entry.is_dot_entry()
                        && self.state.is_directory_authorized(&entry.name) =>
                {
                    IndexedName::push(&mut self.state.subdirectories, &entry.name);
                }
                _ => {}
            }
        }

        info!(
            "Listed {} entries: {} images, {} directories",
            entries.len(),
            self.state.files.len(),
            self.state.subdirectories.len()
        );

        Self::close(session).await;
        self.emit(Outbound::ListName(self.state.files.clone()));
        Ok(())
    }

    async fn retrieve(
        &mut self,
        request: &RetrieveRequest,
        file_name: &str,
    ) -> Result<(), ControllerError> {
        let mut session = self.connector.connect(&request.connection).await?;

        self.enter_directory(
            &mut session,
            OperationKind::Retrieve,
            request.default_dir_path.as_deref(),
            request.finish(),
        )
        .await?;

        let reader = session.retrieve(file_name).await?;
        let data = encode_stream(reader, self.read_chunk_size, self.io_timeout).await?;

        // la sessione si chiude solo dopo la fine dello stream
        Self::close(session).await;

        let image = EncodedImage {
            data,
            mime_type: self.table.mime_type_for(file_name).to_string(),
        };
        info!(
            "Retrieved {} ({} base64 chars, mime '{}')",
            file_name,
            image.data.len(),
            image.mime_type
        );

        self.state.last_image = Some(image.clone());
        self.emit(Outbound::Base64(image));
        Ok(())
    }

    async fn enter_directory(
        &mut self,
        session: &mut C::Session,
        kind: OperationKind,
        default_dir_path: Option<&str>,
        finish: bool,
    ) -> Result<(), ControllerError> {
        match select_path(&mut self.state, kind, default_dir_path, finish)? {
            Some(path) => {
                info!("Moving to directory {}", path);
                session.change_dir(&path).await?;
            }
            None => debug!("Staying in the connection directory"),
        }
        Ok(())
    }

    async fn close(session: C::Session) {
        if let Err(e) = session.close().await {
            warn!("Failed to close remote session: {}", e);
        }
    }

    fn emit(&self, notification: Outbound) {
        if self.outbound.send(notification).is_err() {
            warn!("Gateway writer is gone, notification dropped");
        }
    }
}
