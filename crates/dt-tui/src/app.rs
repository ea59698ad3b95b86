//! Dice tray state and key handling.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use dt_core::{DiceGroup, DieKind, RollRequest};
use dt_engine::DiceEngine;

/// Application state for the dice tray.
pub struct DiceApp {
    engine: DiceEngine,
    die_index: usize,
    count: u32,
    modifier: i32,
    groups: Vec<DiceGroup>,
    notice: Option<String>,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl DiceApp {
    /// Largest count selectable with the arrow keys.
    pub const MAX_COUNT: u32 = 99;
    /// Largest modifier magnitude selectable with `+`/`-`.
    pub const MAX_MODIFIER: i32 = 99;

    /// Wrap an engine; the selector starts on the engine's current die.
    pub fn new(engine: DiceEngine) -> Self {
        let die_index = DieKind::ALL
            .iter()
            .position(|k| *k == engine.die())
            .unwrap_or(0);
        Self {
            engine,
            die_index,
            count: 1,
            modifier: 0,
            groups: Vec::new(),
            notice: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// The roll engine.
    pub fn engine(&self) -> &DiceEngine {
        &self.engine
    }

    /// The die kind under the selector.
    pub fn selected_die(&self) -> DieKind {
        DieKind::ALL[self.die_index]
    }

    /// Dice count under the selector.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Flat modifier for the next roll.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Groups added with `a`.
    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    /// Last error or status message.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The selector as a dice group.
    pub fn selection(&self) -> DiceGroup {
        DiceGroup::new(self.selected_die().id(), self.count)
    }

    /// What the next roll will use: the added groups, or the selector alone
    /// when nothing has been added.
    pub fn pending(&self) -> Vec<DiceGroup> {
        if self.groups.is_empty() {
            vec![self.selection()]
        } else {
            self.groups.clone()
        }
    }

    /// The next roll's request.
    pub fn pending_request(&self) -> Result<RollRequest, String> {
        self.engine
            .compose_request(&self.pending(), self.modifier)
            .map_err(|e| e.to_string())
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Char('h') => self.shift_die(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_die(1),
            KeyCode::Up | KeyCode::Char('k') => {
                self.count = (self.count + 1).min(Self::MAX_COUNT);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.count = self.count.saturating_sub(1).max(1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.modifier = (self.modifier + 1).min(Self::MAX_MODIFIER);
            }
            KeyCode::Char('-') => {
                self.modifier = (self.modifier - 1).max(-Self::MAX_MODIFIER);
            }
            KeyCode::Char('a') => self.add_group(),
            KeyCode::Char('c') => self.clear(),
            KeyCode::Enter | KeyCode::Char(' ') => self.roll(),
            _ => {}
        }
    }

    /// Advance the engine by one measured frame.
    pub fn tick(&mut self, dt: Duration) {
        self.engine.tick_with(dt);
    }

    fn shift_die(&mut self, step: isize) {
        if self.engine.phase().is_rolling() {
            return;
        }
        let last = DieKind::ALL.len() - 1;
        self.die_index = self.die_index.saturating_add_signed(step).min(last);
        self.engine.preview_die(self.selected_die());
    }

    fn add_group(&mut self) {
        let selection = self.selection();
        match self
            .groups
            .iter_mut()
            .find(|g| g.die_id == selection.die_id)
        {
            Some(group) => {
                group.count = (group.count + selection.count).min(RollRequest::MAX_DICE_PER_GROUP);
            }
            None => self.groups.push(selection),
        }
        self.notice = None;
    }

    fn clear(&mut self) {
        self.groups.clear();
        self.count = 1;
        self.modifier = 0;
        self.notice = None;
        self.engine.reset();
    }

    fn roll(&mut self) {
        if self.engine.phase().is_rolling() {
            return;
        }
        let request = match self.pending_request() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e);
                return;
            }
        };
        match self.engine.begin_roll(request) {
            Ok(_) => self.notice = None,
            Err(e) => self.notice = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use dt_core::RollPhase;
    use dt_engine::EngineConfig;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> DiceApp {
        let config = EngineConfig::default()
            .with_seed(42)
            .with_spin_duration(Duration::from_millis(160));
        DiceApp::new(DiceEngine::new(config).unwrap())
    }

    fn press(app: &mut DiceApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn settle(app: &mut DiceApp) {
        for _ in 0..1_000 {
            if !app.engine().phase().is_rolling() {
                return;
            }
            app.tick(FRAME);
        }
        panic!("roll did not settle");
    }

    #[test]
    fn starts_on_d20() {
        let app = app();
        assert_eq!(app.selected_die(), DieKind::D20);
        assert_eq!(app.pending(), vec![DiceGroup::new("d20", 1)]);
    }

    #[test]
    fn arrows_move_selector_within_bounds() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected_die(), DieKind::D100);
        assert_eq!(app.engine().die(), DieKind::D100);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_die(), DieKind::D4);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.count(), 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.count(), 3);
    }

    #[test]
    fn modifier_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.modifier(), 1);
        assert_eq!(app.pending_request().unwrap().expression(), "1d20 + 1");
    }

    #[test]
    fn add_merges_same_die() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            app.groups(),
            &[DiceGroup::new("d20", 4), DiceGroup::new("d12", 1)]
        );
        assert_eq!(app.pending_request().unwrap().expression(), "4d20 + 1d12");
    }

    #[test]
    fn space_rolls_and_settles_into_history() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.engine().phase(), RollPhase::Spinning);
        settle(&mut app);
        assert_eq!(app.engine().phase(), RollPhase::Settled);
        assert_eq!(app.engine().history().len(), 1);
        assert!(app.engine().displayed_outcome().is_some());
    }

    #[test]
    fn roll_ignored_while_rolling() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let request = app.engine().request().cloned();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.engine().request().cloned(), request);
        assert_eq!(app.selected_die(), DieKind::D20);
        assert!(app.notice().is_none());
    }

    #[test]
    fn clear_resets_engine_but_keeps_history() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.groups().is_empty());
        assert_eq!(app.modifier(), 0);
        assert_eq!(app.engine().phase(), RollPhase::Idle);
        assert_eq!(app.engine().history().len(), 1);
    }

    #[test]
    fn clear_mid_roll_stops_it() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        app.tick(FRAME);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.engine().phase(), RollPhase::Idle);
        for _ in 0..100 {
            app.tick(FRAME);
        }
        assert!(app.engine().history().is_empty());
    }

    #[test]
    fn help_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.groups().is_empty());
    }
}
