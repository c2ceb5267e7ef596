//! Interactive drivers for the dashboard, document, and practice views.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use lawzy_core::CaseAnalysis;
use lawzy_session::smoother::{Clock, DEFAULT_FLOOR, DEFAULT_STATUS_INTERVAL};
use lawzy_session::{
    Advance, DraftState, LoadingSmoother, PracticeState, Session, SessionEvent, StatusRotation,
    SystemClock,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::display;

type Input = Lines<BufReader<Stdin>>;

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

async fn prompt(input: &mut Input, text: &str) -> anyhow::Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|l| l.trim().to_string()))
}

/// Submit `query` and wait for the analysis to be stored.
pub async fn analyze(session: &mut Session, query: &str) -> anyhow::Result<Arc<CaseAnalysis>> {
    session.submit(query)?;
    eprintln!("Scanning Bharatiya Nyaya Sanhita...");
    while let Some(event) = session.next_event().await {
        match event {
            SessionEvent::AnalysisReady(analysis) => return Ok(analysis),
            SessionEvent::AnalysisFailed(e) => {
                return Err(e).context("could not analyse the query; is the backend running?");
            }
            _ => {}
        }
    }
    bail!("analysis finished without a result")
}

/// Show suggestions (after the loading floor), draft the chosen one, export it.
pub async fn documents(
    session: &mut Session,
    select: Option<usize>,
    out: &Path,
) -> anyhow::Result<()> {
    wait_for_suggestions(session).await;
    display::print_suggestions(session.suggestions());
    if session.suggestions().is_empty() {
        return Ok(());
    }

    let mut input = stdin_lines();
    let count = session.suggestions().len();
    let mut choice = select;
    loop {
        let index = match choice.take() {
            Some(n) => n,
            None => {
                let text = format!("Select a document [1-{count}], or Enter to finish: ");
                match prompt(&mut input, &text).await? {
                    Some(line) if !line.is_empty() => match line.parse::<usize>() {
                        Ok(n) => n,
                        Err(_) => {
                            eprintln!("Not a number: {line}");
                            continue;
                        }
                    },
                    _ => return Ok(()),
                }
            }
        };
        let picked = index.checked_sub(1).and_then(|i| session.suggestions().get(i));
        let Some(suggestion) = picked else {
            eprintln!("No suggestion numbered {index}");
            continue;
        };
        let title = suggestion.title.clone();

        if !session.select_document(&title)? {
            eprintln!("{title} is already drafted.");
        }
        wait_for_draft(session).await;

        match session.draft_state() {
            DraftState::Ready(draft) => {
                display::print_draft(draft);
                if let Some(path) = session.export_draft(out)? {
                    println!("Saved {}", path.display());
                }
                return Ok(());
            }
            DraftState::Failed { title, reason } => {
                eprintln!("Could not draft {title}: {reason}");
                eprintln!("Select it again to retry.");
            }
            DraftState::Idle | DraftState::Generating { .. } => return Ok(()),
        }
    }
}

/// Walk the practice cards one at a time.
pub async fn practice(session: &mut Session) -> anyhow::Result<()> {
    eprintln!("Preparing interrogation simulation...");
    while matches!(session.practice_state(), PracticeState::Loading) {
        if session.next_event().await.is_none() {
            break;
        }
    }

    let PracticeState::Ready(_) = session.practice_state() else {
        println!("No practice questions for this case.");
        return Ok(());
    };

    let mut input = stdin_lines();
    loop {
        if let PracticeState::Ready(practice) = session.practice_state() {
            let last = practice.is_last();
            display::print_card(practice.current(), practice.progress(), practice.is_revealed());
            let hint = if last { "Complete Briefing" } else { "Confirm & Next" };
            let text = format!("[r] reveal tactical insight  [Enter] {hint}  [q] quit: ");
            match prompt(&mut input, &text).await?.as_deref() {
                Some("r") => {
                    session.reveal_card();
                }
                Some("q") | None => return Ok(()),
                _ => {
                    if let Some(Advance::Complete) = session.advance_card() {
                        println!("Briefing complete.");
                        return Ok(());
                    }
                }
            }
        } else {
            return Ok(());
        }
    }
}

/// Drive the session while the suggestion list is busy, showing rotating
/// status text for at least the loading floor.
async fn wait_for_suggestions(session: &mut Session) {
    session.ensure_suggestions();
    let clock = SystemClock;
    let gate = LoadingSmoother::start(&clock, DEFAULT_FLOOR);
    let status = StatusRotation::with_defaults(gate.started());
    let mut ticker = tokio::time::interval(DEFAULT_STATUS_INTERVAL / 4);

    loop {
        let now = clock.now();
        let loading = session.suggestions_loading();
        let busy = gate.display_busy(loading, now);
        match status.label_while(busy, now) {
            Some(label) => eprint!("\r{label:<40}"),
            None => break,
        }
        tokio::select! {
            event = session.next_event(), if loading => {
                if event.is_none() {
                    break;
                }
            }
            _ = ticker.tick() => {}
        }
    }
    eprintln!("\r{:<40}", "");
}

async fn wait_for_draft(session: &mut Session) {
    eprintln!("Drafting...");
    while session.draft_state().is_generating() {
        if session.next_event().await.is_none() {
            break;
        }
    }
}
