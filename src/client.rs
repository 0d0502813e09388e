use crate::ui;
use color_eyre::eyre::Result;
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};
use spin_decide::{
    EntryRegistry,
    RegistryError,
    SpinResult,
    coin::{
        AUTOFLIP_INTERVAL,
        AUTOFLIP_KEY,
        CoinFlip,
        FAST_MODE_KEY,
        FlipOutcome,
        Side,
        Streak,
        time_ago,
    },
    config::{
        AppConfig,
        StartTab,
    },
    history::{
        HistoryRecord,
        HistoryStore,
        LocalStoreHistoryStorage,
    },
    store::LocalStore,
    wheel::{
        self,
        SpinPlan,
    },
};
use std::time::{
    Duration,
    Instant,
};
use tokio::time;
use tracing::error;

const FRAME_INTERVAL: Duration = Duration::from_millis(40);
const MAX_ERRORS: usize = 50;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Tab {
    #[default]
    Wheel,
    Coin,
}

impl From<StartTab> for Tab {
    fn from(tab: StartTab) -> Self {
        match tab {
            StartTab::Wheel => Tab::Wheel,
            StartTab::Coin => Tab::Coin,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntryRow {
    pub name: String,
    pub weight: u32,
    pub valid: bool,
    pub segment: Option<wheel::Segment>,
    pub share: f64,
}

#[derive(Clone, Debug)]
pub struct CoinView {
    pub total: u64,
    pub heads: u64,
    pub tails: u64,
    pub heads_pct: f64,
    pub tails_pct: f64,
    pub streak: Option<Streak>,
    pub prediction: Side,
    pub luck_score: u32,
    pub recent: Vec<(Side, String)>,
    pub fast_mode: bool,
    pub autoflip: bool,
    pub flipping: bool,
    pub last: Option<FlipOutcome>,
}

#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub text: String,
    pub rows: Vec<EntryRow>,
    pub ratio_mode: bool,
    pub single_entry_mode: bool,
    pub confirmed: bool,
    pub valid_count: usize,
    pub min_entries: usize,
    pub max_entries: usize,
    pub total_weight: u32,
    pub ratio_total: u32,
    pub problem: Option<String>,
    pub rotation: f64,
    pub spinning: bool,
    pub pointer_index: Option<usize>,
    pub revealed: Option<String>,
    pub signature: String,
    pub history: HistoryRecord,
    pub coin: CoinView,
    pub status: String,
    pub errors: Vec<String>,
}

struct ActiveSpin {
    plan: SpinPlan,
    started: Instant,
    result: SpinResult,
}

struct PendingFlip {
    side: Side,
    started: Instant,
    delay: Duration,
}

pub struct AppController {
    registry: EntryRegistry,
    history: HistoryStore<LocalStoreHistoryStorage>,
    coin: CoinFlip,
    store: LocalStore,
    rng: StdRng,
    rotation: f64,
    active_spin: Option<ActiveSpin>,
    revealed: Option<SpinResult>,
    pending_flip: Option<PendingFlip>,
    last_flip: Option<FlipOutcome>,
    pub status: String,
    errors: Vec<String>,
}

impl AppController {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let store = LocalStore::new(&config.store_path);
        let history = HistoryStore::open(LocalStoreHistoryStorage::new(store.clone()));
        let mut registry = EntryRegistry::new(config.registry);
        if config.single_entry_mode {
            registry.set_single_entry_mode(true);
        } else if config.ratio_mode {
            registry.set_ratio_mode(true)?;
        }
        let mut coin = CoinFlip::new();
        let mut errors = Vec::new();
        // fast mode always starts off; autoflip keeps its saved value
        if let Err(e) = store.set_bool(FAST_MODE_KEY, false) {
            errors.push(format!("saving preferences: {e}"));
        }
        match store.get_bool(AUTOFLIP_KEY) {
            Ok(autoflip) => coin.set_autoflip(autoflip.unwrap_or(false)),
            Err(e) => errors.push(format!("loading preferences: {e}")),
        }
        tracing::info!(store = %config.store_path.display(), "controller ready");
        Ok(Self {
            registry,
            history,
            coin,
            store,
            rng: StdRng::from_os_rng(),
            rotation: 0.0,
            active_spin: None,
            revealed: None,
            pending_flip: None,
            last_flip: None,
            status: String::from("Ready"),
            errors,
        })
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let modes = self.registry.modes();
        let config = self.registry.config();
        let segments = self.registry.segments();
        let shares = self.registry.shares();
        let mut valid_idx = 0;
        let rows = self
            .registry
            .entries()
            .entries()
            .iter()
            .map(|e| {
                let valid = e.is_valid();
                let (segment, share) = if valid {
                    let out = (
                        segments.get(valid_idx).copied(),
                        shares.get(valid_idx).copied().unwrap_or(0.0),
                    );
                    valid_idx += 1;
                    out
                } else {
                    (None, 0.0)
                };
                EntryRow {
                    name: e.name.clone(),
                    weight: e.weight,
                    valid,
                    segment,
                    share,
                }
            })
            .collect();
        let signature = self.registry.signature();
        let now = chrono::Utc::now();
        let coin = CoinView {
            total: self.coin.total(),
            heads: self.coin.count(Side::Heads),
            tails: self.coin.count(Side::Tails),
            heads_pct: self.coin.percentage(Side::Heads),
            tails_pct: self.coin.percentage(Side::Tails),
            streak: self.coin.streak(),
            prediction: self.coin.prediction(),
            luck_score: self.coin.luck_score(),
            recent: self
                .coin
                .recent()
                .map(|r| (r.side, time_ago(r.at, now)))
                .collect(),
            fast_mode: self.coin.fast_mode(),
            autoflip: self.coin.autoflip(),
            flipping: self.pending_flip.is_some(),
            last: self.last_flip,
        };
        AppSnapshot {
            text: self.registry.text(),
            rows,
            ratio_mode: modes.ratio_mode,
            single_entry_mode: modes.single_entry_mode,
            confirmed: modes.confirmed,
            valid_count: self.registry.entries().valid_count(),
            min_entries: config.min_entries,
            max_entries: config.max_entries,
            total_weight: self.registry.total_weight(),
            ratio_total: config.ratio_total,
            problem: self.registry.validate().err().map(|e| e.to_string()),
            rotation: self.rotation,
            spinning: self.active_spin.is_some(),
            pointer_index: wheel::segment_at_pointer(&segments, self.rotation),
            revealed: self.revealed.as_ref().map(|r| r.winner.entry.name.clone()),
            history: self.history.query(&signature),
            signature,
            coin,
            status: self.status.clone(),
            errors: self.errors.iter().rev().take(5).cloned().collect(),
        }
    }

    /// Advances animations. Returns true while something is moving or just finished.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(spin) = &self.active_spin {
            let elapsed = now.saturating_duration_since(spin.started);
            self.rotation = spin.plan.rotation_at(elapsed);
            changed = true;
            if spin.plan.is_finished(elapsed) {
                self.finish_spin();
            }
        }
        if let Some(flip) = &self.pending_flip {
            if now.saturating_duration_since(flip.started) >= flip.delay {
                let outcome = self.coin.score(flip.side);
                self.pending_flip = None;
                self.last_flip = Some(outcome);
                self.status = if outcome.correct {
                    format!("{}! WINNER", outcome.side)
                } else {
                    format!("{}! LOSER", outcome.side)
                };
                changed = true;
            }
        }
        changed
    }

    fn finish_spin(&mut self) {
        let Some(spin) = self.active_spin.take() else {
            return;
        };
        self.rotation = spin.plan.final_rotation;
        self.history
            .record(&spin.result.signature, &spin.result.winner.entry.name);
        self.status = format!("Winner: {}", spin.result.winner.entry.name);
        self.revealed = Some(spin.result);
    }

    fn report(&mut self, action: &str, res: Result<(), RegistryError>) {
        match res {
            Ok(()) => self.status = action.to_string(),
            Err(RegistryError::EmptySelection) => {
                self.status = String::from("Could not determine a winner");
                self.push_errors(vec![format!("{action}: selection had nothing to pick")]);
            }
            Err(e) => self.status = format!("{action} failed: {e}"),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        if let Err(e) = self.registry.set_text(text) {
            self.status = e.to_string();
        }
    }

    pub fn toggle_single_entry_mode(&mut self) {
        if self.active_spin.is_some() {
            return;
        }
        let on = !self.registry.modes().single_entry_mode;
        self.registry.set_single_entry_mode(on);
        self.status = if on {
            String::from("Single entry mode on")
        } else {
            String::from("Single entry mode off")
        };
    }

    pub fn toggle_ratio_mode(&mut self) {
        let modes = self.registry.modes();
        if modes.single_entry_mode {
            self.status = String::from("Ratio mode is forced off in single entry mode");
            return;
        }
        let on = !modes.ratio_mode;
        let res = self.registry.set_ratio_mode(on);
        self.report(if on { "Ratio mode on" } else { "Ratio mode off" }, res);
    }

    pub fn toggle_confirm(&mut self) {
        if self.active_spin.is_some() {
            return;
        }
        if self.registry.modes().confirmed {
            self.registry.cancel();
            self.status = String::from("Confirmation cancelled");
        } else {
            let res = self.registry.confirm();
            self.report("Entries confirmed", res);
        }
    }

    pub fn shuffle(&mut self) {
        let res = self.registry.shuffle(&mut self.rng);
        self.report("Shuffled", res);
    }

    pub fn sort(&mut self) {
        let res = self.registry.sort();
        self.report("Sorted", res);
    }

    pub fn add_single_entry(&mut self, text: &str) -> bool {
        let res = self.registry.add_single_entry(text);
        let ok = res.is_ok();
        self.report("Entry added", res);
        ok
    }

    pub fn delete_entry(&mut self, index: usize) {
        let res = self.registry.delete_entry(index).map(|_| ());
        self.report("Entry removed", res);
    }

    pub fn spin(&mut self) {
        if self.active_spin.is_some() {
            return;
        }
        let result = match self.registry.spin(&mut self.rng) {
            Ok(result) => result,
            Err(e) => {
                self.report("Spin", Err(e));
                return;
            }
        };
        let jitter: f64 = self.rng.random_range(0.0..1.0);
        let plan = SpinPlan::new(self.rotation, result.segment, jitter);
        self.revealed = None;
        self.active_spin = Some(ActiveSpin {
            plan,
            started: Instant::now(),
            result,
        });
        self.status = String::from("Spinning...");
    }

    pub fn dismiss_result(&mut self) {
        self.revealed = None;
    }

    pub fn reset_history(&mut self) {
        let signature = self.registry.signature();
        if self.history.reset(&signature) {
            self.status = String::from("History reset for these entries");
        } else {
            self.status = String::from("No history for these entries");
        }
    }

    pub fn flip_coin(&mut self) {
        if self.pending_flip.is_some() {
            return;
        }
        let side = self.coin.flip(&mut self.rng);
        self.pending_flip = Some(PendingFlip {
            side,
            started: Instant::now(),
            delay: self.coin.reveal_delay(),
        });
        self.status = String::from("Flipping...");
    }

    pub fn predict(&mut self, side: Side) {
        self.coin.predict(side);
        self.status = format!("Predicting {side}");
    }

    pub fn toggle_fast_mode(&mut self) {
        let on = !self.coin.fast_mode();
        self.coin.set_fast_mode(on);
        if let Err(e) = self.store.set_bool(FAST_MODE_KEY, on) {
            self.push_errors(vec![format!("saving fast mode: {e}")]);
        }
        self.status = if on {
            String::from("Fast mode on")
        } else {
            String::from("Fast mode off")
        };
    }

    pub fn autoflip(&self) -> bool {
        self.coin.autoflip()
    }

    pub fn toggle_autoflip(&mut self) {
        let on = !self.coin.autoflip();
        self.coin.set_autoflip(on);
        if let Err(e) = self.store.set_bool(AUTOFLIP_KEY, on) {
            self.push_errors(vec![format!("saving autoflip: {e}")]);
        }
        tracing::info!(on, "autoflip toggled");
        self.status = if on {
            String::from("Autoflip on")
        } else {
            String::from("Autoflip off")
        };
    }

    fn push_errors(&mut self, mut items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        for item in &items {
            error!("{}", item);
        }
        self.errors.append(&mut items);
        if self.errors.len() > MAX_ERRORS {
            let drain = self.errors.len() - MAX_ERRORS;
            self.errors.drain(0..drain);
        }
    }
}

pub async fn run_app(config: AppConfig) -> Result<()> {
    let mut controller = AppController::new(&config)?;
    let mut ui_state = ui::UiState::new(config.start_tab.into());
    let mut input_events = ui::input_event_stream();

    tracing::info!("Starting UI");
    ui::terminal_enter(&mut ui_state)?;
    let res = run_loop(&mut controller, &mut ui_state, &mut input_events).await;
    ui::terminal_exit()?;
    res
}

async fn run_loop(
    controller: &mut AppController,
    ui_state: &mut ui::UiState,
    input_events: &mut ui::InputEventReceiver,
) -> Result<()> {
    let mut ticker = time::interval(FRAME_INTERVAL);
    let mut autoflip_ticker = time::interval(AUTOFLIP_INTERVAL);
    autoflip_ticker.reset();
    ui::draw(ui_state, &controller.snapshot())?;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => { break; }
            _ = ticker.tick() => {
                if controller.tick(Instant::now()) {
                    ui::draw(ui_state, &controller.snapshot())?;
                }
            }
            _ = autoflip_ticker.tick() => {
                if controller.autoflip() {
                    controller.flip_coin();
                    ui::draw(ui_state, &controller.snapshot())?;
                }
            }
            raw_ev = ui::next_raw_event(input_events) => {
                let event = raw_ev?;
                let Some(ev) = ui::interpret_event(ui_state, event) else {
                    continue;
                };
                match ev {
                    ui::UserEvent::Quit => break,
                    ui::UserEvent::Redraw => {}
                    ui::UserEvent::TextChanged(text) => controller.set_text(&text),
                    ui::UserEvent::AddSingleEntry(text) => {
                        if controller.add_single_entry(&text) {
                            ui_state.clear_single_input();
                        }
                    }
                    ui::UserEvent::DeleteEntry(index) => controller.delete_entry(index),
                    ui::UserEvent::ToggleSingleMode => controller.toggle_single_entry_mode(),
                    ui::UserEvent::ToggleRatioMode => controller.toggle_ratio_mode(),
                    ui::UserEvent::ToggleConfirm => controller.toggle_confirm(),
                    ui::UserEvent::Shuffle => controller.shuffle(),
                    ui::UserEvent::Sort => controller.sort(),
                    ui::UserEvent::Spin => controller.spin(),
                    ui::UserEvent::DismissResult => controller.dismiss_result(),
                    ui::UserEvent::ResetHistory => controller.reset_history(),
                    ui::UserEvent::Flip => controller.flip_coin(),
                    ui::UserEvent::Predict(side) => controller.predict(side),
                    ui::UserEvent::ToggleFastMode => controller.toggle_fast_mode(),
                    ui::UserEvent::ToggleAutoflip => {
                        controller.toggle_autoflip();
                        autoflip_ticker.reset();
                    }
                }
                ui::draw(ui_state, &controller.snapshot())?;
            }
        }
    }
    Ok(())
}
