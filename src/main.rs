use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cube_shooter::compute::{
    init_state, player_fire, primary_fire, rotate_player, tick, turn_player, TickInput,
};
use cube_shooter::config::{self, Config};
use cube_shooter::consts::{MAX_DT, SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE};
use cube_shooter::display::{self, Canvas};
use cube_shooter::entities::GameStatus;

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms) at 60 Hz is
/// refreshed before expiry while the key keeps repeating.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Letter keys arrive as either case depending on Shift / Caps Lock.
fn is_letter_held(key_frame: &HashMap<KeyCode, u64>, letter: char, frame: u64) -> bool {
    is_held(key_frame, &KeyCode::Char(letter.to_ascii_lowercase()), frame)
        || is_held(key_frame, &KeyCode::Char(letter.to_ascii_uppercase()), frame)
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> TickInput {
    TickInput {
        forward: is_letter_held(key_frame, 'w', frame),
        back: is_letter_held(key_frame, 's', frame),
        left: is_letter_held(key_frame, 'a', frame),
        right: is_letter_held(key_frame, 'd', frame),
        up: is_letter_held(key_frame, 'q', frame),
        down: is_letter_held(key_frame, 'e', frame),
    }
}

/// -1, 0 or 1 for a pair of opposing keys.
fn axis(key_frame: &HashMap<KeyCode, u64>, neg: KeyCode, pos: KeyCode, frame: u64) -> f32 {
    is_held(key_frame, &pos, frame) as i32 as f32 - is_held(key_frame, &neg, frame) as i32 as f32
}

// ── Pointer capture ───────────────────────────────────────────────────────────

fn set_pointer_capture<W: Write>(out: &mut W, captured: bool) -> std::io::Result<()> {
    if captured {
        out.execute(EnableMouseCapture)?;
    } else {
        out.execute(DisableMouseCapture)?;
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until ESC or Ctrl-C.
///
/// Frame order is input → update → render.  One-shot actions (fire, deflect,
/// restart) apply as their events are drained; held movement keys are
/// sampled once per frame and handed to `tick`.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);
    let mut state = init_state(rng);
    set_pointer_capture(out, true)?;

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut last_mouse: Option<(u16, u16)> = None;
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start
            .duration_since(last_tick)
            .as_secs_f32()
            .min(MAX_DT);
        last_tick = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let playing = state.status == GameStatus::Playing;
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') if !playing => {
                                state = init_state(rng);
                                set_pointer_capture(out, true)?;
                                info!("restarted");
                            }
                            KeyCode::Char('f') | KeyCode::Char('F') if playing => {
                                state = player_fire(&state);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code.clone(), frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        if let (Some((prev_col, prev_row)), true) = (last_mouse, playing) {
                            let dx = (column as f32 - prev_col as f32) * SCREEN_WIDTH
                                / canvas.cols().max(1) as f32;
                            let dy = (row as f32 - prev_row as f32) * SCREEN_HEIGHT
                                / canvas.rows().max(1) as f32;
                            state.player = rotate_player(&state.player, dx, dy, config.sensitivity);
                        }
                        last_mouse = Some((column, row));
                    }
                    MouseEventKind::Down(MouseButton::Left) if playing => {
                        state = primary_fire(&state);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                _ => {}
            }
        }

        // ── Apply held-key actions and advance the simulation ─────────────────
        if state.status == GameStatus::Playing {
            let yaw = axis(&key_frame, KeyCode::Left, KeyCode::Right, frame);
            let pitch = axis(&key_frame, KeyCode::Down, KeyCode::Up, frame);
            if yaw != 0.0 || pitch != 0.0 {
                let step = config.look_speed * dt;
                state.player = turn_player(&state.player, yaw * step, pitch * step);
            }

            let input = held_input(&key_frame, frame);
            state = tick(&state, &input, dt, rng);

            if state.status == GameStatus::GameOver {
                set_pointer_capture(out, false)?;
                last_mouse = None;
            }
        }

        display::render(out, &mut canvas, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> cube_shooter::Result<()> {
    let config = Config::parse();
    config::init_logging(&config)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("starting (seed {:?})", config.seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.queue(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("shutting down");
    result.map_err(Into::into)
}
