use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::view_model::SubmissionReport;
use crate::{
    normalize, AppState, Effect, ExtractionRequest, Msg, RawFile, SessionPhase, SubmissionError,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is the only place session state changes. Every call ends with the
/// dispatch step, which starts the next pending item when nothing is in flight.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::FilesSubmitted(files) => submit(&mut state, files),
        Msg::ModelSelected(model) => state.set_model(model),
        Msg::ResetClicked => {
            if let Some(session) = state.discard_session() {
                engine_info!("Session {} reset", session);
            }
        }
        Msg::ItemSelected(index) => state.select(index),
        Msg::ViewModeToggled => state.toggle_view_mode(),
        Msg::ExtractionFinished {
            session,
            item,
            result,
        } => {
            let failed = result.is_err();
            if !state.apply_completion(session, item, result) {
                engine_warn!(
                    "Discarding stale completion session={} item={}",
                    session,
                    item
                );
                return (state, effects);
            }
            engine_debug!("Item {} finished failed={}", item, failed);
            if state.phase() == SessionPhase::Settled {
                engine_info!("Session {} settled", session);
                effects.push(Effect::SessionSettled { session });
            }
        }
        Msg::Tick | Msg::NoOp => {}
    }

    effects.extend(dispatch_next(&mut state));
    (state, effects)
}

fn submit(state: &mut AppState, files: Vec<RawFile>) {
    let candidates = files.len();
    match normalize(files, state.next_item_id_mut()) {
        Err(err) => {
            let SubmissionError::TotalSizeExceeded { observed_bytes } = err;
            state.set_last_submission(SubmissionReport::Rejected { observed_bytes });
        }
        Ok(normalized) => {
            let excluded = normalized
                .warning
                .map(|warning| warning.problems)
                .unwrap_or_default();
            if normalized.items.is_empty() {
                engine_warn!("No usable files among {} candidates", candidates);
                state.set_last_submission(SubmissionReport::Empty { excluded });
                return;
            }
            let accepted = normalized.items.len();
            let session = state.start_session(normalized.items);
            engine_info!(
                "Session {} started with {} items ({} excluded)",
                session,
                accepted,
                excluded.len()
            );
            state.set_last_submission(SubmissionReport::Accepted { accepted, excluded });
        }
    }
}

fn dispatch_next(state: &mut AppState) -> Option<Effect> {
    let model = state.model();
    let session = state.session_mut()?;
    let session_id = session.id();
    let effect = session.begin_next().map(|item| Effect::Extract {
        session: session_id,
        item: item.id(),
        request: ExtractionRequest {
            base64: item.payload().base64.clone(),
            mime_type: item.payload().mime_type.clone(),
            model,
        },
    })?;
    state.mark_dirty();
    Some(effect)
}
