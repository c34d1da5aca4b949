use std::process::ExitCode;

use anyhow::{bail, Context};
use engine_logging::engine_info;
use lens_core::{
    copy_all_text, update, AppState, Effect, Msg, SessionPhase, SubmissionReport,
};
use lens_engine::{AtomicFileWriter, EngineHandle};

use crate::cli::Args;
use crate::effects::EffectRunner;
use crate::input::read_files;
use crate::render;

const TRANSCRIPT_FILENAME: &str = "transcript.txt";

pub fn run(args: Args) -> anyhow::Result<ExitCode> {
    let (files, unreadable) = read_files(&args.files);
    for skipped in &unreadable {
        eprintln!("Skipping {}: {}", skipped.path.display(), skipped.reason);
    }

    let engine = EngineHandle::new(args.extract_settings()).context("starting engine")?;
    let runner = EffectRunner::new(engine);

    let mut state = AppState::with_model(args.model);
    if args.raw {
        state = update(state, Msg::ViewModeToggled).0;
    }

    let (next, effects) = update(state, Msg::FilesSubmitted(files));
    state = next;
    if let Some(report) = state.view().last_submission {
        for line in render::submission_lines(&report) {
            eprintln!("{line}");
        }
        if matches!(report, SubmissionReport::Rejected { .. }) {
            return Ok(ExitCode::from(2));
        }
    }
    if state.phase() != SessionPhase::Running {
        return Ok(ExitCode::FAILURE);
    }
    state.consume_dirty();
    eprintln!("{}", render::progress_line(&state.view()));
    runner.execute(effects);

    // Single writer: only this loop feeds `update`.
    loop {
        let Some(msg) = runner.next_msg() else {
            bail!("extraction engine stopped unexpectedly");
        };
        let (next, effects) = update(state, msg);
        state = next;
        if state.consume_dirty() {
            eprintln!("{}", render::progress_line(&state.view()));
        }
        let settled = effects
            .iter()
            .any(|effect| matches!(effect, Effect::SessionSettled { .. }));
        runner.execute(effects);
        if settled {
            break;
        }
    }

    let state = print_results(state);
    let view = state.view();

    if let Some(dir) = &args.output {
        let transcript = copy_all_text(&view.items);
        let path = AtomicFileWriter::new(dir.clone())
            .write(TRANSCRIPT_FILENAME, &transcript)
            .context("writing transcript")?;
        eprintln!("Transcript of {} items written to {}", view.succeeded, path.display());
    }

    engine_info!(
        "Finished: {} succeeded, {} failed of {}",
        view.succeeded,
        view.failed,
        view.total
    );
    Ok(if view.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Walks the selection over every item; the view derives each item's rows.
fn print_results(mut state: AppState) -> AppState {
    let total = state.view().total;
    for index in 0..total {
        state = update(state, Msg::ItemSelected(index)).0;
        let view = state.view();
        let row = &view.items[index];
        println!(
            "{}",
            render::item_block(row, view.view_mode, &view.selected_rows)
        );
    }
    state
}
