//! Line-oriented JSON gateway between the host runtime and the controller.
//!
//! Each input line is an envelope `{"notification": ..., "payload": ...}`.
//! Requests run one at a time; the notifications a request produced are
//! written, one per line, before the next line is read.

use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::mpsc;

use crate::error::GatewayError;
use crate::notification::{Envelope, Inbound, Outbound};
use crate::transport::Connector;
use crate::traversal::TraversalController;

pub struct Gateway<C: Connector, R, W> {
    controller: TraversalController<C>,
    notifications: mpsc::UnboundedReceiver<Outbound>,
    input: Lines<BufReader<R>>,
    output: W,
}

impl<C, R, W> Gateway<C, R, W>
where
    C: Connector,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        controller: TraversalController<C>,
        notifications: mpsc::UnboundedReceiver<Outbound>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            controller,
            notifications,
            input: BufReader::new(input).lines(),
            output,
        }
    }

    /// Runs until the input is exhausted. An unknown notification name stops
    /// the loop with an error.
    pub async fn run(&mut self) -> Result<(), GatewayError> {
        while let Some(line) = self.input.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let envelope: Envelope = match serde_json::from_str(line) {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!("Discarding malformed line: {}", e);
                    continue;
                }
            };
            let name = envelope.notification.clone();

            let request = match Inbound::from_envelope(envelope) {
                Ok(request) => request,
                Err(e @ GatewayError::UnknownNotification(_)) => {
                    error!("{}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Invalid {} payload: {}", name, e);
                    continue;
                }
            };

            if let Err(e) = self.controller.handle(request).await {
                error!("{} failed: {}", name, e);
            }

            self.flush().await?;
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), GatewayError> {
        while let Ok(notification) = self.notifications.try_recv() {
            let mut line = serde_json::to_vec(&notification)?;
            line.push(b'\n');
            self.output.write_all(&line).await?;
        }
        self.output.flush().await?;
        Ok(())
    }
}
