//! Terminal fifteen-puzzle runner (default binary).
//!
//! This is the primary gameplay entrypoint. It owns the loop the core never
//! sees: crossterm input, the fixed timestep that drives the session's
//! delayed shuffle, rendering, and the level catalog / progress store glue.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_fifteen::core::{FeedbackSink, PuzzleSession, PuzzleSnapshot};
use tui_fifteen::input::{handle_key_event, should_quit, CursorTracker};
use tui_fifteen::levels::{FileProgress, LevelCatalog};
use tui_fifteen::term::{FrameBuffer, HudView, PuzzleView, TerminalRenderer, Viewport};
use tui_fifteen::types::{BoardEvent, PuzzleAction, FLASH_MS, SHUFFLE_DELAY_MS, TICK_MS};

/// Command-line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    levels_path: Option<PathBuf>,
    progress_path: PathBuf,
    start_level: usize,
    seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels_path: None,
            progress_path: PathBuf::from("tui-fifteen-progress.txt"),
            start_level: 0,
            seed: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--levels" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --levels"))?;
                config.levels_path = Some(PathBuf::from(v));
            }
            "--progress" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --progress"))?;
                config.progress_path = PathBuf::from(v);
            }
            "--level" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --level"))?;
                let n: usize = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --level value: {}", v))?;
                if n == 0 {
                    bail!("--level is 1-based");
                }
                config.start_level = n - 1;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                bail!("unknown argument: {}", other);
            }
        }
        i += 1;
    }
    Ok(config)
}

/// Feedback sink for the terminal: remembers the latest cue so the HUD can
/// flash it briefly.
#[derive(Debug, Default)]
struct TermFeedback {
    last: Option<(BoardEvent, Instant)>,
}

impl TermFeedback {
    fn note(&mut self, event: BoardEvent) {
        self.last = Some((event, Instant::now()));
    }

    fn current(&self) -> Option<BoardEvent> {
        self.last
            .filter(|(_, at)| at.elapsed() < Duration::from_millis(FLASH_MS as u64))
            .map(|(event, _)| event)
    }

    fn clear(&mut self) {
        self.last = None;
    }
}

impl FeedbackSink for TermFeedback {
    fn on_move_applied(&mut self) {
        self.note(BoardEvent::MoveApplied);
    }
    fn on_move_rejected(&mut self) {
        self.note(BoardEvent::MoveRejected);
    }
    fn on_solved(&mut self) {
        self.note(BoardEvent::Solved);
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let catalog = match &config.levels_path {
        Some(path) => LevelCatalog::load(path)?,
        None => LevelCatalog::builtin(),
    };
    let mut progress = FileProgress::load(&config.progress_path)?;
    if config.start_level >= catalog.len() {
        bail!(
            "level {} does not exist (catalog has {})",
            config.start_level + 1,
            catalog.len()
        );
    }
    if !progress.progress().is_unlocked(config.start_level) {
        bail!("level {} is still locked", config.start_level + 1);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &catalog, &mut progress, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn session_seed(fixed: Option<u32>) -> u32 {
    fixed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u32)
            .unwrap_or(1)
    })
}

fn new_session(catalog: &LevelCatalog, index: usize, seed: u32) -> Result<PuzzleSession> {
    let level = catalog
        .get(index)
        .ok_or_else(|| anyhow!("level {} out of range", index + 1))?;
    let mut session = PuzzleSession::new(index, level.size, &level.texture, seed)?;
    session.schedule_shuffle(SHUFFLE_DELAY_MS);
    Ok(session)
}

fn run(
    term: &mut TerminalRenderer,
    catalog: &LevelCatalog,
    progress: &mut FileProgress,
    config: &Config,
) -> Result<()> {
    let mut level_index = config.start_level;
    let mut session = new_session(catalog, level_index, session_seed(config.seed))?;
    let mut cursor = CursorTracker::new(session.board().size());
    let view = PuzzleView::default();
    let mut feedback = TermFeedback::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = PuzzleSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        let movable = session.board().movable_slots();
        let hud = HudView {
            cursor: Some(cursor.slot()),
            movable: movable.as_slice(),
            unlocked: progress.progress().unlocked_count().min(catalog.len()),
            level_count: catalog.len(),
            flash: feedback.current(),
        };
        view.render_into(&snap, &hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        // Report an unlock that failed to persist on the way out.
                        if let Some(err) = progress.take_save_error() {
                            return Err(err);
                        }
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            PuzzleAction::Restart => {
                                session.restart();
                                feedback.clear();
                            }
                            PuzzleAction::NextLevel => {
                                let next = level_index + 1;
                                if next < catalog.len() && progress.progress().is_unlocked(next) {
                                    level_index = next;
                                    session =
                                        new_session(catalog, next, session_seed(config.seed))?;
                                    cursor.set_board_size(session.board().size());
                                    feedback.clear();
                                }
                            }
                            other => {
                                if let Some(slot) = cursor.apply(other) {
                                    session.tap(slot, &mut feedback, progress);
                                }
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let size = session.board().size();
                        if let Some(slot) =
                            view.hit_test(size, viewport, mouse.column, mouse.row)
                        {
                            cursor.jump_to_slot(slot);
                            session.tap(slot, &mut feedback, progress);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Feed real elapsed time into the session so the delayed shuffle
        // fires on schedule.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis() as u32);
        }
    }
}
