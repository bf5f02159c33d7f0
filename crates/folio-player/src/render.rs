//! Writing chapter views to the terminal.

use std::fmt::Write as _;

use folio_chapters::application::view::ChapterView;
use folio_chapters::domain::sequencer::Phase;

use crate::config::OutputFormat;

/// Decides which views are worth writing and formats them.
#[derive(Debug)]
pub struct Renderer {
    format: OutputFormat,
    last: Option<ChapterView>,
}

impl Renderer {
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self { format, last: None }
    }

    /// The output for `view`, or `None` if it would repeat the last frame.
    /// JSON output reports every change; text output only reports changes of
    /// position, phase or playback so typing does not flood the terminal.
    pub fn frame(&mut self, view: &ChapterView) -> Option<String> {
        let changed = match (&self.last, self.format) {
            (None, _) => true,
            (Some(last), OutputFormat::Json) => last != view,
            (Some(last), OutputFormat::Text) => milestone(last) != milestone(view),
        };
        if !changed {
            return None;
        }
        self.last = Some(view.clone());
        Some(self.format_view(view))
    }

    /// Formats `view` unconditionally.
    #[must_use]
    pub fn format_view(&self, view: &ChapterView) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string(view).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
            }
            OutputFormat::Text => text_frame(view),
        }
    }
}

type Milestone<'a> = (&'a str, usize, usize, Phase, bool, bool, u64, usize);

fn milestone(view: &ChapterView) -> Milestone<'_> {
    (
        view.chapter_key.as_str(),
        view.stage_index,
        view.step_index,
        view.phase,
        view.is_playing,
        view.is_transitioning,
        view.generation,
        view.answers.len(),
    )
}

fn text_frame(view: &ChapterView) -> String {
    let status = if view.is_transitioning {
        "fading"
    } else if view.show_replay_button {
        "replay"
    } else if view.is_playing {
        "playing"
    } else {
        "paused"
    };
    let cursor = |on: bool| if on { "▌" } else { "" };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} · step {}/{} · {}",
        view.chapter_title,
        view.stage_label,
        view.step_index + 1,
        view.step_count,
        status
    );
    if !view.title.is_empty() || view.show_title_cursor {
        let _ = writeln!(out, "  # {}{}", view.title, cursor(view.show_title_cursor));
    }
    for line in view.body.lines() {
        let _ = writeln!(out, "  {line}");
    }
    if view.show_body_cursor {
        let _ = writeln!(out, "  {}", cursor(true));
    }
    for (quiz_id, answer) in &view.answers {
        let verdict = if answer.correct { "correct" } else { "wrong" };
        let _ = writeln!(out, "  {quiz_id}: option {} ({verdict})", answer.selected);
    }
    let nav: Vec<String> = view
        .nav_items
        .iter()
        .map(|item| {
            if item.is_active {
                format!("[{}]", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect();
    let _ = write!(out, "  {}", nav.join(" | "));
    out
}
