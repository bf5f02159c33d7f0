//! The player loop.

use std::time::Duration;

use folio_core::navigation::ChapterSwitch;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::config::OutputFormat;
use crate::error::AppError;
use crate::input::parse_line;
use crate::render::Renderer;
use crate::state::{Flow, PlayerState};

/// Drives `state` until the input ends or asks to quit.
///
/// Each turn handles, in order of priority, a pending chapter switch, an
/// input line, or the visible chapter's next timer deadline. A frame is
/// written after every turn that changed the view.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input or writing output fails.
pub async fn run<R, W>(
    state: &mut PlayerState,
    input: R,
    mut output: W,
    format: OutputFormat,
    mut switches: UnboundedReceiver<ChapterSwitch>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut renderer = Renderer::new(format);
    emit(&mut renderer, state, &mut output, false).await?;

    loop {
        let wait = state
            .next_deadline()
            .map(|deadline| state.clock().until(deadline));

        let force = tokio::select! {
            biased;
            Some(request) = switches.recv() => {
                debug!(from = %request.from, to = %request.to, "chapter switch");
                state.apply_switch(&request);
                false
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("input closed");
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(input)) => match state.dispatch(input) {
                        Flow::Continue => false,
                        Flow::Render => true,
                        Flow::Quit => break,
                    },
                    Ok(None) => false,
                    Err(e) => {
                        warn!(error = %e, "ignoring input line");
                        false
                    }
                }
            }
            () = sleep_or_pending(wait) => {
                state.tick();
                false
            }
        };
        emit(&mut renderer, state, &mut output, force).await?;
    }

    output.flush().await?;
    Ok(())
}

async fn sleep_or_pending(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

async fn emit<W>(
    renderer: &mut Renderer,
    state: &PlayerState,
    output: &mut W,
    force: bool,
) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    let Some(view) = state.view() else {
        return Ok(());
    };
    let frame = if force {
        Some(renderer.format_view(&view))
    } else {
        renderer.frame(&view)
    };
    if let Some(frame) = frame {
        output.write_all(frame.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
