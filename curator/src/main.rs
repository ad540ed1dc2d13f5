//! curator — dataset curation and PR review TUI.
//!
//! Entry point for the `curator` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), the API worker task
//! (`api`), the rendering module (`ui`), and the theme system (`theme`).
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config and theme from XDG config — read-only, safe before
//!    terminal init.
//! 2. `install_panic_hook()` — installed first so it is the innermost
//!    hook. Restores the terminal before the panic message prints.
//! 3. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the
//!    event loop.
//! 4. `init_tui()` — enters alternate screen and enables raw mode.
//! 5. Create event channel and `spawn_event_task()`.
//! 6. Build the `ApiClient`, spawn the API worker, and activate the
//!    Datasets tab so the first frame already has a load in flight.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit,
//! SIGTERM, or channel close). The `?` operator is only used before
//! `init_tui()` or inside the Render arm — draw errors propagate out of
//! the loop and reach `restore_tui()` after `break`. The panic hook
//! covers unexpected panics.

mod api;
mod app;
mod config;
mod event;
mod review;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::time::Instant;

use curator_core::client::ApiClient;
use tokio::sync::mpsc;

use ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: load config and theme — read-only, safe before terminal init.
    let cfg = config::load();
    let theme = theme::Theme::from_name(&cfg.theme);
    let mut state = app::AppState::default();

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: create event channel and spawn the background event task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Step 5: spawn the API worker and kick off the first load.
    let client = ApiClient::new(&cfg.server_url, cfg.token.clone());
    let (api_tx, api_rx) = mpsc::unbounded_channel();
    api::worker::spawn_api_worker(client, api_rx, handler.tx.clone());
    state.api_tx = Some(api_tx);
    state.activate_tab(app::Tab::Datasets);

    // Event loop — exits only via `break`, never via `?`, so
    // `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state, &theme) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        if handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Tick) => {
                        state.handle_tick(Instant::now());
                    }
                    Some(event::AppEvent::Api(outcome)) => {
                        state.apply_api_outcome(*outcome, &theme);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // ratatui picks up the new size on the next Render.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, so quit latency is
                // at most one event cycle rather than 50ms.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop.
    tui::restore_tui()?;
    Ok(())
}
