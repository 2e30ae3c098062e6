/// Entry point and menu loop.

mod config;
mod nav;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::KeyCode;

use config::{Frontend, ShellConfig};
use nav::event::NavEvent;
use nav::navigator::Navigator;
use nav::screen::Screen;
use ui::console;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

// ── Key Constants ──

const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_CLOSE: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = ShellConfig::load();

    let frontend = match parse_args(std::env::args().skip(1)) {
        Ok(Some(choice)) => choice,
        Ok(None) => config.frontend,
        Err(arg) => {
            eprintln!("Unknown argument: {arg}");
            eprintln!("Usage: towerdef [--screen | --console]");
            return;
        }
    };

    let mut nav = Navigator::new();

    match frontend {
        Frontend::Console => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            if let Err(e) = console::run_console(&mut nav, &mut stdin.lock(), &mut stdout.lock()) {
                eprintln!("Console error: {e}");
            }
        }
        Frontend::Screen => {
            let mut renderer = Renderer::new();
            if let Err(e) = renderer.init() {
                eprintln!("Terminal init failed: {e}");
                return;
            }

            let sound = SoundEngine::new();

            let result = screen_loop(&mut nav, &mut renderer, sound.as_ref(), &config);

            if let Err(e) = renderer.cleanup() {
                eprintln!("Terminal cleanup failed: {e}");
            }
            if let Err(e) = result {
                eprintln!("Shell error: {e}");
            }
        }
    }
}

/// `--console` / `--screen` override the configured front-end.
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Frontend>, String> {
    let mut choice = None;
    for arg in args {
        match arg.as_str() {
            "--console" | "-c" => choice = Some(Frontend::Console),
            "--screen" => choice = Some(Frontend::Screen),
            other => return Err(other.to_string()),
        }
    }
    Ok(choice)
}

fn screen_loop(
    nav: &mut Navigator,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &ShellConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = InputState::new();
    let mut gamepad = GamepadState::new();
    gamepad.load_button_config(&config.gamepad);
    let frame_sleep = Duration::from_millis(config.screen.frame_sleep_ms);

    loop {
        input.drain_events();
        gamepad.update();

        // The close signal works from every screen.
        if input.ctrl_c_pressed()
            || input.any_pressed(KEYS_CLOSE)
            || (gamepad.cancel_pressed() && nav.current() == Screen::Menu)
        {
            break;
        }

        if let Some(event) = step_navigation(nav, &input, &gamepad, renderer) {
            play_event(sound, event);
        }

        if nav.current().is_terminal() {
            break;
        }

        let hover = input
            .pointer()
            .and_then(|(col, row)| renderer.canvas_pos(col, row))
            .and_then(|(x, y)| nav.hovered(x, y));
        renderer.render(nav, hover)?;

        std::thread::sleep(frame_sleep);
    }

    Ok(())
}

/// Apply at most one navigation update from this frame's input sample.
fn step_navigation(
    nav: &mut Navigator,
    input: &InputState,
    gamepad: &GamepadState,
    renderer: &Renderer,
) -> Option<NavEvent> {
    if input.any_pressed(KEYS_UP) || gamepad.up_pressed() {
        return nav.focus_prev();
    }
    if input.any_pressed(KEYS_DOWN) || gamepad.down_pressed() {
        return nav.focus_next();
    }
    if input.any_pressed(KEYS_CONFIRM) || gamepad.confirm_pressed() {
        return Some(nav.activate_focus());
    }
    if gamepad.cancel_pressed() {
        return nav.back();
    }
    if input.click_released() {
        let (x, y) = input
            .pointer()
            .and_then(|(col, row)| renderer.canvas_pos(col, row))?;
        return nav.handle_click(x, y);
    }
    None
}

fn play_event(sound: Option<&SoundEngine>, event: NavEvent) {
    let Some(sfx) = sound else { return };
    match event {
        NavEvent::FocusMoved => sfx.play_move(),
        NavEvent::Entered(Screen::Menu) => sfx.play_back(),
        NavEvent::Entered(_) => sfx.play_select(),
        NavEvent::Rejected => sfx.play_deny(),
    }
}
