//! Arena state machine
//!
//! Idle -> Triggered -> Fighting -> (Break ->) Fighting -> ... -> Complete,
//! with Dead reachable from inside the arena. The controller owns the arena
//! state and at most one combat engine; every mutation happens inside one of
//! its methods.

use serde::{Deserialize, Serialize};

use super::boss::{BOSS_SEQUENCE, BossType};
use super::combat::{Boss, BossCombatEngine, DamageOutcome, DefeatReport};
use super::error::{ArenaError, ArenaResult};
use super::events::ArenaEvent;
use super::mode::{GameMode, SequenceEnd};
use super::scaling::{self, Reward};
use crate::persistence::{ArenaCompletionRecord, BossDefeatRecord, Submission};
use crate::ticks_to_seconds;
use crate::tuning::ArenaTuning;

const SEQUENCE_LEN: u32 = BOSS_SEQUENCE.len() as u32;

/// Arena lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    /// Waiting for the run to reach the trigger distance
    Idle,
    /// Transient: entry recorded, first boss not yet spawned
    Triggered,
    Fighting,
    /// Story-mode pause between bosses
    Break,
    Complete,
    /// Player died in the arena; absorbing
    Dead,
}

/// Authoritative arena state for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossArenaState {
    pub phase: ArenaPhase,
    pub is_active: bool,
    /// Position within the three-boss sequence (resets each endless wave)
    pub current_boss_index: u32,
    /// Append-only, one entry per boss whose health reached zero
    pub bosses_defeated: Vec<BossType>,
    pub break_timer: u32,
    pub total_rewards: Reward,
    pub arena_start_distance: f32,
    /// Sticky: once set the arena never resumes
    pub has_died: bool,
    pub is_rush_mode: bool,
    pub is_endless_mode: bool,
    pub endless_wave: u32,
    /// Run tick at which the arena was entered
    pub start_tick: u64,
    /// Ticks spent inside the arena (fighting or on a break)
    pub elapsed_ticks: u64,
}

impl BossArenaState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            phase: ArenaPhase::Idle,
            is_active: false,
            current_boss_index: 0,
            bosses_defeated: Vec::new(),
            break_timer: 0,
            total_rewards: Reward::default(),
            arena_start_distance: 0.0,
            has_died: false,
            is_rush_mode: mode.is_rush(),
            is_endless_mode: mode.is_endless(),
            endless_wave: 0,
            start_tick: 0,
            elapsed_ticks: 0,
        }
    }

    /// Run-wide boss position: never decreases, unlike `current_boss_index`
    pub fn sequence_position(&self) -> u64 {
        self.endless_wave as u64 * SEQUENCE_LEN as u64 + self.current_boss_index as u64
    }

    pub fn elapsed_seconds(&self) -> f64 {
        ticks_to_seconds(self.elapsed_ticks)
    }
}

/// Terminal result handed to persistence when the run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: GameMode,
    pub total_rewards: Reward,
    pub bosses_defeated: Vec<BossType>,
    pub completion_time_seconds: f64,
    pub died: bool,
}

pub struct ArenaController {
    state: BossArenaState,
    mode: GameMode,
    tuning: ArenaTuning,
    seed: u64,
    engine: Option<BossCombatEngine>,
    next_boss_id: u32,
    events: Vec<ArenaEvent>,
    outbox: Vec<Submission>,
}

impl ArenaController {
    pub fn new(mode: GameMode, tuning: ArenaTuning, seed: u64) -> Self {
        Self {
            state: BossArenaState::new(mode),
            mode,
            tuning,
            seed,
            engine: None,
            next_boss_id: 1,
            events: Vec::new(),
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &BossArenaState {
        &self.state
    }

    pub fn phase(&self) -> ArenaPhase {
        self.state.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn tuning(&self) -> &ArenaTuning {
        &self.tuning
    }

    /// True while fighting or on a break
    pub fn in_arena(&self) -> bool {
        matches!(self.state.phase, ArenaPhase::Fighting | ArenaPhase::Break)
    }

    pub fn engine(&self) -> Option<&BossCombatEngine> {
        self.engine.as_ref()
    }

    pub fn active_boss(&self) -> Option<&Boss> {
        self.engine.as_ref().map(|e| e.boss())
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the persistence submissions raised since the last drain
    pub fn drain_submissions(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.outbox)
    }

    fn rush_multiplier(&self) -> bool {
        self.mode.profile().rush_multiplier
    }

    fn scaling_wave(&self) -> u32 {
        if self.mode.profile().wave_scaling {
            self.state.endless_wave
        } else {
            0
        }
    }

    /// Enter the arena once `distance` reaches the mode's trigger distance.
    ///
    /// Only acts while Idle; returns whether the arena was entered.
    pub fn check_trigger(&mut self, distance: f32, now_tick: u64) -> bool {
        if self.state.phase != ArenaPhase::Idle {
            return false;
        }
        if distance < self.mode.trigger_distance(0, 0.0) {
            return false;
        }

        self.state.phase = ArenaPhase::Triggered;
        self.state.is_active = true;
        self.state.arena_start_distance = distance;
        self.state.start_tick = now_tick;
        self.state.current_boss_index = 0;
        log::info!("Entered {} arena at distance {:.0}", self.mode.as_str(), distance);
        self.events.push(ArenaEvent::ArenaEntered {
            mode: self.mode,
            distance,
        });

        self.spawn_current();
        true
    }

    /// Spawn the boss at the current index, replacing any previous engine
    fn spawn_current(&mut self) {
        let index = self.state.current_boss_index;
        let wave = self.scaling_wave();
        let boss_type = BossType::at_index(index);
        let config = scaling::scale(boss_type, index, self.rush_multiplier(), wave);

        let position = self.state.sequence_position();
        let seed = self
            .seed
            .wrapping_add(position.wrapping_mul(2654435761));
        let id = self.next_boss_id;
        self.next_boss_id += 1;

        self.engine = Some(BossCombatEngine::spawn(config, id, seed));
        self.state.phase = ArenaPhase::Fighting;
        self.events.push(ArenaEvent::BossSpawned {
            boss_type,
            index,
            wave: self.state.endless_wave,
            max_health: config.health,
        });
    }

    /// Advance the arena by one tick at the given run distance
    pub fn tick(&mut self, distance: f32) -> ArenaResult<()> {
        match self.state.phase {
            ArenaPhase::Fighting => {
                self.state.elapsed_ticks += 1;
                let Some(engine) = self.engine.as_mut() else {
                    return Err(ArenaError::NotFighting {
                        phase: self.state.phase,
                    });
                };
                let result = engine.tick(&self.tuning)?;
                if result.fired > 0 {
                    self.events.push(ArenaEvent::BossAttack {
                        boss_type: engine.boss().boss_type,
                        projectiles: result.fired,
                    });
                }
                Ok(())
            }
            ArenaPhase::Break => {
                self.state.elapsed_ticks += 1;
                self.state.break_timer = self.state.break_timer.saturating_sub(1);
                if self.state.break_timer == 0 {
                    self.advance();
                }
                Ok(())
            }
            // Terminal phases ignore further ticks
            ArenaPhase::Dead | ArenaPhase::Complete => Ok(()),
            phase => Err(ArenaError::NotFighting { phase }),
        }
    }

    /// Forward a player hit to the live boss.
    ///
    /// A killing blow is booked here: the boss joins `bosses_defeated`, its
    /// reward is granted and the arena moves on before this returns.
    pub fn apply_attack(&mut self, damage: u32, distance: f32) -> ArenaResult<DamageOutcome> {
        let phase = self.state.phase;
        if phase != ArenaPhase::Fighting {
            return Err(ArenaError::NotFighting { phase });
        }
        let engine = self
            .engine
            .as_mut()
            .ok_or(ArenaError::NotFighting { phase })?;

        let outcome = engine.apply_damage(damage, &self.tuning)?;
        self.events.push(ArenaEvent::BossHealthChanged {
            health: outcome.health,
            max_health: outcome.max_health,
        });
        if let Some(phase) = outcome.phase_changed {
            log::debug!("{} entered phase {}", engine.boss().boss_type, phase);
            self.events.push(ArenaEvent::BossPhaseChanged { phase });
        }
        if let Some(report) = engine.take_defeat() {
            self.on_boss_defeated(report, distance);
        }
        Ok(outcome)
    }

    fn on_boss_defeated(&mut self, report: DefeatReport, distance: f32) {
        self.engine = None;

        let index = self.state.current_boss_index;
        let reward = scaling::reward(
            report.boss_type,
            index,
            self.rush_multiplier(),
            self.scaling_wave(),
        );
        self.state.bosses_defeated.push(report.boss_type);
        self.state.total_rewards += reward;

        let kill_time_seconds = ticks_to_seconds(report.kill_ticks);
        log::info!(
            "{} defeated in {:.1}s (+{} coins, +{} xp)",
            report.boss_type,
            kill_time_seconds,
            reward.coins,
            reward.xp
        );
        self.events.push(ArenaEvent::BossDefeated {
            boss_type: report.boss_type,
            kill_time_seconds,
            distance,
            reward,
        });
        self.outbox.push(Submission::BossDefeat(BossDefeatRecord {
            boss_type: report.boss_type,
            kill_time_seconds,
            distance_at_defeat: distance,
        }));

        let break_ticks = self.tuning.break_duration_ticks;
        if self.mode.profile().breaks_enabled && break_ticks > 0 {
            self.state.phase = ArenaPhase::Break;
            self.state.break_timer = break_ticks;
            self.events.push(ArenaEvent::BreakStarted { ticks: break_ticks });
        } else {
            self.state.break_timer = 0;
            self.advance();
        }
    }

    /// Move to the next boss, the next endless wave, or completion
    fn advance(&mut self) {
        self.state.break_timer = 0;
        self.state.current_boss_index += 1;
        if self.state.current_boss_index < SEQUENCE_LEN {
            self.spawn_current();
            return;
        }

        match self.mode.profile().sequence_end {
            SequenceEnd::Complete => self.complete(),
            SequenceEnd::NextWave => {
                self.state.endless_wave += 1;
                self.state.current_boss_index = 0;
                let wave = self.state.endless_wave;
                let trigger_distance = self
                    .mode
                    .trigger_distance(wave, self.state.arena_start_distance);
                log::info!("Endless wave {} begins", wave);
                self.events.push(ArenaEvent::WaveStarted {
                    wave,
                    trigger_distance,
                });
                self.spawn_current();
            }
        }
    }

    fn complete(&mut self) {
        self.engine = None;
        self.state.phase = ArenaPhase::Complete;
        self.state.is_active = false;
        log::info!(
            "Arena complete: {} bosses, {} coins in {:.1}s",
            self.state.bosses_defeated.len(),
            self.state.total_rewards.coins,
            self.state.elapsed_seconds()
        );
        self.events.push(ArenaEvent::ArenaComplete {
            total_rewards: self.state.total_rewards,
            bosses_defeated: self.state.bosses_defeated.len(),
        });
        if self.mode.submits_completion() {
            self.submit_completion();
        }
    }

    fn submit_completion(&mut self) {
        self.outbox
            .push(Submission::ArenaCompletion(self.completion_record()));
    }

    /// Record in the backend's format for the current arena result
    pub fn completion_record(&self) -> ArenaCompletionRecord {
        ArenaCompletionRecord {
            completion_time_seconds: self.state.elapsed_seconds(),
            total_score: self.state.total_rewards.coins,
            bosses_defeated: self.state.bosses_defeated.clone(),
            is_endless_mode: self.state.is_endless_mode,
        }
    }

    /// Player died. Accepted while fighting or on a break; terminal.
    pub fn report_death(&mut self) -> ArenaResult<()> {
        if !self.in_arena() {
            return Err(ArenaError::NotInArena {
                phase: self.state.phase,
            });
        }

        self.engine = None;
        self.state.has_died = true;
        self.state.is_active = false;
        self.state.break_timer = 0;
        self.state.phase = ArenaPhase::Dead;
        log::info!(
            "Died in arena after {} bosses",
            self.state.bosses_defeated.len()
        );
        self.events.push(ArenaEvent::ArenaFailed {
            total_rewards: self.state.total_rewards,
            bosses_defeated: self.state.bosses_defeated.len(),
        });
        // Endless runs only ever end this way (or by exit)
        if self.mode.is_endless() {
            self.submit_completion();
        }
        Ok(())
    }

    /// Leave an endless arena voluntarily, banking the result
    pub fn exit(&mut self) -> ArenaResult<()> {
        if !self.in_arena() {
            return Err(ArenaError::NotInArena {
                phase: self.state.phase,
            });
        }
        if !self.mode.is_endless() {
            return Err(ArenaError::NotFighting {
                phase: self.state.phase,
            });
        }
        self.complete();
        Ok(())
    }

    /// Terminal result for the persistence collaborator
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            mode: self.mode,
            total_rewards: self.state.total_rewards,
            bosses_defeated: self.state.bosses_defeated.clone(),
            completion_time_seconds: self.state.elapsed_seconds(),
            died: self.state.has_died,
        }
    }
}
