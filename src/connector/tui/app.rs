use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::ExecutableCommand;
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::session::{update, Effect, Msg, SessionState};
use crate::domain::{DomainError, SearchResult};
use crate::SearchImagesUseCase;

use super::render::{draw, FrameContext};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const PAGE_SCROLL: u16 = 10;

type SearchOutcome = Result<SearchResult, String>;

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    Scroll(i32),
    Quit,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Dispatch(Msg::NoOp);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('u') if ctrl => KeyAction::Dispatch(Msg::ClearInput),
        KeyCode::Char(_) if ctrl => KeyAction::Dispatch(Msg::NoOp),
        KeyCode::Char(c) => KeyAction::Dispatch(Msg::CharTyped(c)),
        KeyCode::Backspace => KeyAction::Dispatch(Msg::Backspace),
        KeyCode::Enter => KeyAction::Dispatch(Msg::SubmitPressed),
        KeyCode::Up => KeyAction::Scroll(-1),
        KeyCode::Down => KeyAction::Scroll(1),
        KeyCode::PageUp => KeyAction::Scroll(-(PAGE_SCROLL as i32)),
        KeyCode::PageDown => KeyAction::Scroll(PAGE_SCROLL as i32),
        _ => KeyAction::Dispatch(Msg::NoOp),
    }
}

/// Pasted text is appended to the query as a single line, so a pasted
/// newline never submits part of the paste.
pub fn paste_message(current: &str, pasted: &str) -> Msg {
    let flattened = pasted.lines().collect::<Vec<_>>().join(" ");
    Msg::InputChanged(format!("{current}{flattened}"))
}

/// Terminal front end: owns the session state and runs its effects.
pub struct TuiApp {
    use_case: Arc<SearchImagesUseCase>,
    state: SessionState,
    scroll: u16,
    /// Furthest scroll offset of the answer as last drawn.
    max_scroll: u16,
    tick: usize,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl TuiApp {
    pub fn new(use_case: SearchImagesUseCase) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            use_case: Arc::new(use_case),
            state: SessionState::new(),
            scroll: 0,
            max_scroll: 0,
            tick: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Take over the terminal until the user quits. The terminal is restored
    /// whether the loop ends cleanly or with an error.
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        if let Err(e) = std::io::stdout().execute(EnableBracketedPaste) {
            warn!("Bracketed paste unavailable: {e}");
        }
        info!("TUI started (model={})", self.use_case.model_name());
        let result = self.event_loop(&mut terminal).await;
        if let Err(e) = std::io::stdout().execute(DisableBracketedPaste) {
            debug!("Could not disable bracketed paste: {e}");
        }
        ratatui::restore();
        if let Err(e) = &result {
            error!("TUI stopped with error: {e:#}");
        }
        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        loop {
            let model = self.use_case.model_name().to_string();
            let view = self.state.view();
            let ctx = FrameContext {
                model: &model,
                scroll: self.scroll,
                tick: self.tick,
            };
            let mut max_scroll = 0;
            terminal.draw(|frame| max_scroll = draw(frame, &view, &ctx))?;
            self.max_scroll = max_scroll;
            self.scroll = self.scroll.min(max_scroll);

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if !self.handle_key(key) {
                            break;
                        }
                    }
                    Some(Ok(Event::Paste(text))) => self.paste(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(outcome) = self.outcome_rx.recv() => {
                    self.dispatch(Msg::SearchFinished(outcome));
                }
                _ = ticker.tick() => {
                    if self.state.lifecycle().is_loading() {
                        self.tick = self.tick.wrapping_add(1);
                    }
                }
            }
        }

        info!("TUI exiting");
        Ok(())
    }

    /// Returns `false` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match map_key(key) {
            KeyAction::Quit => return false,
            KeyAction::Dispatch(msg) => self.dispatch(msg),
            KeyAction::Scroll(delta) => self.scroll_by(delta),
        }
        true
    }

    pub fn paste(&mut self, pasted: &str) {
        let msg = paste_message(self.state.input(), pasted);
        self.dispatch(msg);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let (next, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = next;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RunSearch(query) => {
                self.scroll = 0;
                let use_case = Arc::clone(&self.use_case);
                let tx = self.outcome_tx.clone();
                let handle = tokio::spawn(async move {
                    use_case.execute(&query).await.map_err(|e| e.to_string())
                });

                // A panicking search must still resolve the session.
                tokio::spawn(async move {
                    let outcome = match handle.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            Err(DomainError::internal(format!("search task failed: {e}")).to_string())
                        }
                    };
                    if tx.send(outcome).is_err() {
                        debug!("Search finished after the UI closed");
                    }
                });
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll as i32);
        self.scroll = next as u16;
    }

    /// Wait for the in-flight search, if any, and apply its outcome.
    pub async fn settle(&mut self) {
        if !self.state.lifecycle().is_loading() {
            return;
        }
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.dispatch(Msg::SearchFinished(outcome));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::{
        GeminiClient, GeminiConfig, MockSearchClient, MISSING_API_KEY_MESSAGE,
    };
    use crate::domain::LifecycleState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            assert!(app.handle_key(press(KeyCode::Char(c))));
        }
    }

    #[test]
    fn keys_map_to_messages() {
        assert_eq!(
            map_key(press(KeyCode::Enter)),
            KeyAction::Dispatch(Msg::SubmitPressed)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            KeyAction::Dispatch(Msg::CharTyped('a'))
        );
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            KeyAction::Dispatch(Msg::ClearInput)
        );
        assert_eq!(map_key(press(KeyCode::PageDown)), KeyAction::Scroll(10));
    }

    #[tokio::test]
    async fn submit_runs_mock_search_to_success() {
        let mut app = TuiApp::new(SearchImagesUseCase::new(Arc::new(MockSearchClient::new())));
        type_text(&mut app, "red fox");
        app.handle_key(press(KeyCode::Enter));
        assert!(app.state().lifecycle().is_loading());

        app.settle().await;

        let result = app.state().lifecycle().result().expect("search succeeded");
        assert!(result.text().contains("red fox"));
        assert_eq!(result.sources().len(), 2);
    }

    #[tokio::test]
    async fn missing_key_ends_in_failed_state() {
        let client = GeminiClient::new(GeminiConfig::default());
        let mut app = TuiApp::new(SearchImagesUseCase::new(Arc::new(client)));
        type_text(&mut app, "cats");
        app.handle_key(press(KeyCode::Enter));
        app.settle().await;

        match app.state().lifecycle() {
            LifecycleState::Failed(message) => {
                assert!(message.contains(MISSING_API_KEY_MESSAGE));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    fn mock_app() -> TuiApp {
        TuiApp::new(SearchImagesUseCase::new(Arc::new(MockSearchClient::new())))
    }

    #[test]
    fn scroll_stays_within_rendered_bounds() {
        let mut app = mock_app();
        app.max_scroll = 3;
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.scroll, 0);
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.scroll, 2);

        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.scroll, 3);
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.scroll, 2);
    }

    #[test]
    fn nothing_to_scroll_before_an_answer_is_drawn() {
        let mut app = mock_app();
        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn unmapped_keys_dispatch_noop() {
        assert_eq!(map_key(press(KeyCode::Tab)), KeyAction::Dispatch(Msg::NoOp));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            KeyAction::Dispatch(Msg::NoOp)
        );
    }

    #[test]
    fn paste_appends_as_a_single_line() {
        assert_eq!(
            paste_message("red ", "fox\nin snow\r\n"),
            Msg::InputChanged("red fox in snow".to_string())
        );
    }

    #[test]
    fn pasted_newline_does_not_submit() {
        let mut app = mock_app();
        type_text(&mut app, "misty ");
        app.paste("pine\nforest");

        assert_eq!(app.state().input(), "misty pine forest");
        assert_eq!(app.state().lifecycle(), &LifecycleState::Idle);
    }

    #[tokio::test]
    async fn paste_is_ignored_while_loading() {
        let mut app = mock_app();
        type_text(&mut app, "cats");
        app.handle_key(press(KeyCode::Enter));
        app.paste(" and dogs");
        assert_eq!(app.state().input(), "cats");
        app.settle().await;
    }
}
