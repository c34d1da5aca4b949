use engine_logging::{engine_debug, engine_info, engine_warn};
use lens_core::{Effect, ExtractionFailure, Msg};
use lens_engine::{EngineEvent, EngineHandle, FailureKind};

/// Bridges core effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Extract {
                    session,
                    item,
                    request,
                } => {
                    engine_debug!("Dispatch session={} item={}", session, item);
                    self.engine.enqueue(session, item, request);
                }
                Effect::SessionSettled { session } => {
                    engine_info!("Session {} settled", session);
                }
            }
        }
    }

    /// Blocks for the next engine event. `None` when the engine has stopped.
    pub fn next_msg(&self) -> Option<Msg> {
        let msg = match self.engine.recv()? {
            EngineEvent::ExtractionStarted { session, item } => {
                engine_debug!("Started session={} item={}", session, item);
                Msg::Tick
            }
            EngineEvent::ExtractionCompleted {
                session,
                item,
                result,
            } => Msg::ExtractionFinished {
                session,
                item,
                result: result.map_err(|err| {
                    engine_warn!("Item {} failed: {}", item, err);
                    map_failure(err.kind)
                }),
            },
        };
        Some(msg)
    }
}

pub fn map_failure(kind: FailureKind) -> ExtractionFailure {
    match kind {
        FailureKind::Unauthorized => ExtractionFailure::AuthOrPermission,
        FailureKind::Overloaded => ExtractionFailure::ServiceOverloaded,
        FailureKind::HttpStatus(_)
        | FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::MalformedResponse => ExtractionFailure::Unknown,
    }
}
