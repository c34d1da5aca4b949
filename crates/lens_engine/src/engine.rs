use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use lens_core::{ExtractionRequest, ItemId, SessionId};

use crate::extract::{ExtractSettings, Extractor, GeminiExtractor};
use crate::{EngineEvent, ExtractError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build extraction client: {0}")]
    Client(#[from] ExtractError),
}

enum EngineCommand {
    Extract {
        session: SessionId,
        item: ItemId,
        request: ExtractionRequest,
    },
}

/// Runs extraction commands on a background thread, strictly one at a time.
///
/// Each call is awaited to completion before the next command is read, so the
/// engine never has two extractions in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ExtractSettings) -> Result<Self, EngineError> {
        let extractor = GeminiExtractor::new(settings)?;
        Self::with_extractor(Arc::new(extractor))
    }

    pub fn with_extractor(extractor: Arc<dyn Extractor>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(extractor.as_ref(), command, &event_tx));
            }
            engine_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, session: SessionId, item: ItemId, request: ExtractionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Extract {
            session,
            item,
            request,
        });
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    extractor: &dyn Extractor,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Extract {
            session,
            item,
            request,
        } => {
            engine_info!(
                "Extract session={} item={} model={} mime={} payload_len={}",
                session,
                item,
                request.model,
                request.mime_type,
                request.base64.len()
            );
            let _ = event_tx.send(EngineEvent::ExtractionStarted { session, item });
            let result = extractor.extract(&request).await;
            let _ = event_tx.send(EngineEvent::ExtractionCompleted {
                session,
                item,
                result,
            });
        }
    }
}
