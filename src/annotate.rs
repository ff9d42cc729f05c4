//! Headless annotation driver
//!
//! Feeds key presses and playback commands into a [`Session`] bound to a
//! [`PlaybackSource`]. One command per line:
//!
//! - a key (`b`, `u`, `q`, `e`, `s`, `f`, `left`, `right`, `,`, `.`, `space`, `ctrl+s`)
//! - `t <seconds>`: the player reports this time
//! - `wait <seconds>`: let a playing local video run
//! - `load <url or path>`: switch video (resets the session)
//! - `rm-mark <n>`, `rm-cycle <n>`: remove by 1-based position
//! - `clear`, `stats`, `save`

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ScoutConfig;
use crate::constants::MSG_SAVE_FAILED;
use crate::core::{
    frame_index, player_readiness, EmbeddedPlayer, MediaClock, PlaybackSource, StepDirection, TimeSource,
    VideoSource,
};
use crate::error::{Result, ScoutError};
use crate::hotkeys::{handle_key_press, HotkeyAction, HotkeyContext, HotkeyResult, KeyPress};
use crate::state::{MetadataForm, Session, ShotType};
use crate::store::{save_session, DocumentStore, MetadataId};
use crate::utils::{format_time, parse_position_input, parse_seconds_input};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Key(KeyPress),
    ReportTime(f64),
    Wait(f64),
    Load(String),
    RemoveMark(usize),
    RemoveCycle(usize),
    Clear,
    Stats,
    Save,
}

impl ScriptCommand {
    /// `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let seconds = |rest: &str| {
            parse_seconds_input(rest)
                .ok_or_else(|| ScoutError::Validation(format!("Expected seconds after `{}`", word)))
        };
        let position = |rest: &str| {
            parse_position_input(rest)
                .ok_or_else(|| ScoutError::Validation(format!("Expected a position after `{}`", word)))
        };
        let command = match word {
            "t" | "time" => ScriptCommand::ReportTime(seconds(rest)?),
            "wait" => ScriptCommand::Wait(seconds(rest)?),
            "load" => ScriptCommand::Load(rest.to_string()),
            "rm-mark" => ScriptCommand::RemoveMark(position(rest)?),
            "rm-cycle" => ScriptCommand::RemoveCycle(position(rest)?),
            "clear" => ScriptCommand::Clear,
            "stats" => ScriptCommand::Stats,
            "save" => ScriptCommand::Save,
            _ => KeyPress::parse(line)
                .map(ScriptCommand::Key)
                .ok_or_else(|| ScoutError::Validation(format!("Unknown command: {}", line)))?,
        };
        Ok(Some(command))
    }
}

/// Embedded player whose clock only moves when told to.
#[derive(Debug, Default)]
struct ScriptedPlayer {
    time: f64,
    video_id: Option<String>,
}

impl EmbeddedPlayer for ScriptedPlayer {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.time = seconds;
    }

    fn load_video_by_id(&mut self, video_id: &str) {
        if self.video_id.as_deref() != Some(video_id) {
            self.time = 0.0;
        }
        self.video_id = Some(video_id.to_string());
    }

    fn destroy(&mut self) {
        self.video_id = None;
    }
}

/// A session, its playback source and where saves go.
pub struct Annotator<S: DocumentStore> {
    session: Session,
    source: PlaybackSource,
    video: Option<VideoSource>,
    form: MetadataForm,
    store: S,
    fps: f64,
    seek_step_seconds: f64,
    user_id: String,
}

impl<S: DocumentStore> Annotator<S> {
    pub fn new(config: &ScoutConfig, form: MetadataForm, store: S) -> Self {
        Self::with_session(Session::new(), config, form, store)
    }

    pub fn with_session(session: Session, config: &ScoutConfig, form: MetadataForm, store: S) -> Self {
        Self {
            session,
            source: PlaybackSource::default(),
            video: None,
            form,
            store,
            fps: config.fps,
            seek_step_seconds: config.seek_step_seconds,
            user_id: config.user_id.clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &PlaybackSource {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve `input` as a YouTube link, or as a local file if it names one.
    pub fn resolve_video(input: &str) -> Result<VideoSource> {
        let path = Path::new(input.trim());
        if !input.trim().is_empty() && path.exists() {
            return VideoSource::local(path);
        }
        VideoSource::from_url(input)
    }

    /// Switch to `video`, clearing all marks and cycles.
    pub async fn load(&mut self, video: VideoSource) {
        self.session.clear_all();
        match &video {
            VideoSource::LocalFile { .. } => self.source.load_media(MediaClock::new()),
            VideoSource::YouTube { video_id, .. } => {
                let reuse = matches!(&self.source, PlaybackSource::Embedded(slot) if slot.is_ready());
                self.source.load_embedded(video_id);
                if !reuse {
                    let (notifier, pending) = player_readiness::<Box<dyn EmbeddedPlayer>>();
                    tokio::spawn(async move {
                        if notifier.notify(Box::new(ScriptedPlayer::default())).is_err() {
                            debug!("Player ready after the waiter left");
                        }
                    });
                    if let Some(player) = pending.wait().await {
                        self.source.attach_player(player);
                    }
                }
            }
        }
        debug!(video = %video.display_url(), "Video loaded");
        self.video = Some(video);
    }

    fn hotkey_context(&self) -> HotkeyContext {
        HotkeyContext {
            input_focused: false,
            has_source: self.source.has_source(),
            video_focused: matches!(self.source, PlaybackSource::Media(_)),
        }
    }

    fn now(&self) -> Option<f64> {
        self.source.current_time()
    }

    fn position_line(&self) -> Option<String> {
        self.now()
            .map(|now| format!("At {} (frame {})", format_time(now), frame_index(now, self.fps)))
    }

    /// Run one command, returning text to show the user.
    pub async fn execute(&mut self, command: ScriptCommand) -> Result<Option<String>> {
        match command {
            ScriptCommand::Key(press) => match handle_key_press(&press, &self.hotkey_context()) {
                HotkeyResult::Action(action) => self.apply_action(action),
                HotkeyResult::NoMatch | HotkeyResult::Suppressed => Ok(None),
            },
            ScriptCommand::ReportTime(seconds) => {
                self.source.seek(seconds);
                Ok(self.position_line())
            }
            ScriptCommand::Wait(seconds) => {
                if let Some(clock) = self.source.media_mut() {
                    clock.advance(seconds);
                }
                Ok(self.position_line())
            }
            ScriptCommand::Load(input) => {
                let video = Self::resolve_video(&input)?;
                self.load(video).await;
                Ok(Some(format!("Loaded {}", input.trim())))
            }
            ScriptCommand::RemoveMark(index) => {
                let Some(mark) = self.session.marks().as_slice().get(index).copied() else {
                    return Err(ScoutError::NotFound(format!("mark {}", index + 1)));
                };
                self.session.remove_mark(mark.id);
                Ok(Some(format!("Removed mark at {}", format_time(mark.time))))
            }
            ScriptCommand::RemoveCycle(index) => {
                let Some(id) = self.session.cycles().as_slice().get(index).map(|cycle| cycle.id) else {
                    return Err(ScoutError::NotFound(format!("cycle {}", index + 1)));
                };
                let removed = self.session.remove_cycle(id);
                Ok(removed.map(|removed| {
                    format!(
                        "Removed cycle {} and {} marks",
                        index + 1,
                        removed.marks.len()
                    )
                }))
            }
            ScriptCommand::Clear => {
                self.session.clear_all();
                Ok(Some("Cleared marks and cycles".to_string()))
            }
            ScriptCommand::Stats => Ok(Some(self.stats())),
            ScriptCommand::Save => self.save().map(|id| Some(format!("Saved session {}", id))),
        }
    }

    fn apply_action(&mut self, action: HotkeyAction) -> Result<Option<String>> {
        let message = match action {
            HotkeyAction::MarkShot => self.session.mark_shot(&self.source).map(|mark| {
                format!(
                    "Mark {} at {} ({})",
                    self.session.marks().len(),
                    format_time(mark.time),
                    mark.shot_type
                )
            }),
            HotkeyAction::UndoLastMark => self
                .session
                .undo_last_mark()
                .map(|mark| format!("Undid mark at {}", format_time(mark.time))),
            HotkeyAction::StartCycle => {
                let now = self.now();
                self.session
                    .start_cycle(now)
                    .then(|| format!("Cycle started at {}", format_time(now.unwrap_or_default())))
            }
            HotkeyAction::EndCycle => {
                let now = self.now();
                self.session.end_cycle(now).map(|cycle| {
                    format!(
                        "Cycle {} closed: {} - {}, {} marks, {}",
                        self.session.cycles().len(),
                        format_time(cycle.start_time),
                        format_time(cycle.end_time),
                        cycle.mark_count,
                        cycle.tag
                    )
                })
            }
            HotkeyAction::SelectShooting => self.select(ShotType::Shooting),
            HotkeyAction::SelectFeeding => self.select(ShotType::Feeding),
            HotkeyAction::SeekBackward => {
                self.source.jump(-self.seek_step_seconds);
                self.position_line()
            }
            HotkeyAction::SeekForward => {
                self.source.jump(self.seek_step_seconds);
                self.position_line()
            }
            HotkeyAction::StepBackward => {
                self.source.step_frame(StepDirection::Backward, self.fps);
                self.position_line()
            }
            HotkeyAction::StepForward => {
                self.source.step_frame(StepDirection::Forward, self.fps);
                self.position_line()
            }
            HotkeyAction::PlayPause => self.source.media_mut().map(|clock| {
                clock.toggle_play();
                let state = if clock.is_playing() { "Playing" } else { "Paused" };
                state.to_string()
            }),
            HotkeyAction::SaveSession => {
                let id = self.save()?;
                Some(format!("Saved session {}", id))
            }
        };
        Ok(message)
    }

    fn select(&mut self, shot_type: ShotType) -> Option<String> {
        self.session.set_shot_type(shot_type);
        Some(format!("Category: {}", shot_type))
    }

    /// Validate the form and write the session to the store.
    ///
    /// In-memory marks and cycles are left untouched whether or not this succeeds.
    pub fn save(&mut self) -> Result<MetadataId> {
        let video_url = self
            .video
            .as_ref()
            .map(VideoSource::display_url)
            .unwrap_or_default();
        let metadata = self.form.clone().into_metadata(
            &video_url,
            self.user_id.clone(),
            self.session.average_rate(),
        )?;
        let request = self.session.save_request(metadata);
        save_session(&mut self.store, request).map_err(|err| {
            warn!("{}", err);
            ScoutError::Store(MSG_SAVE_FAILED.to_string())
        })
    }

    /// Per-cycle breakdown plus totals.
    pub fn stats(&self) -> String {
        let mut lines = Vec::new();
        for summary in self.session.cycle_summaries() {
            lines.push(format!(
                "#{} {} - {} ({:.2}s) {} marks, {:.2}/s {}",
                summary.number,
                format_time(summary.start_time),
                format_time(summary.end_time),
                summary.duration,
                summary.mark_count,
                summary.rate,
                summary.shot_type
            ));
        }
        if let Some(start) = self.session.active_cycle_start() {
            lines.push(format!(
                "Active cycle from {}: {} marks so far",
                format_time(start),
                self.session.active_cycle_marks(self.now())
            ));
        }
        lines.push(format!(
            "Marks: {}  Cycles: {}  Average rate: {:.2} marks/s",
            self.session.marks().len(),
            self.session.cycles().len(),
            self.session.average_rate()
        ));
        lines.join("\n")
    }

    /// Execute every line of `input`, writing results to `out`.
    ///
    /// Bad commands are reported and skipped.
    pub async fn run_script<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let outcome = match ScriptCommand::parse(&line) {
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => Ok(None),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(Some(message)) => writeln!(out, "{}", message)?,
                Ok(None) => {}
                Err(err) => writeln!(out, "error: {}", err)?,
            }
        }
        Ok(())
    }
}
