//! Fixed timestep run tick
//!
//! Inbound drive for the arena: distance, attack input and death arrive here
//! once per frame and are applied in a fixed order.

use super::arena::ArenaPhase;
use super::events::ArenaEvent;
use super::state::RunState;
use crate::persistence::Submission;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Distance travelled since the last tick
    pub distance_delta: f32,
    /// Damage of the player's attack this tick, if one landed (weapon-dependent)
    pub attack: Option<u32>,
    /// Player died this tick
    pub player_died: bool,
    /// Player chose to leave an endless arena
    pub exit: bool,
}

/// Everything the tick produced for collaborators
#[derive(Debug, Default)]
pub struct TickOutput {
    pub events: Vec<ArenaEvent>,
    pub submissions: Vec<Submission>,
}

/// Advance the run by one fixed timestep
pub fn tick(run: &mut RunState, input: &TickInput) -> TickOutput {
    if run.finished {
        return TickOutput::default();
    }

    run.time_ticks += 1;
    run.distance += input.distance_delta.max(0.0);

    let arena = &mut run.arena;

    // Death cancels everything else this tick
    if input.player_died {
        if arena.in_arena() {
            if let Err(e) = arena.report_death() {
                log::warn!("Death report rejected: {e}");
            }
        }
        run.finished = true;
        return drain(run);
    }

    if arena.phase() == ArenaPhase::Idle {
        arena.check_trigger(run.distance, run.time_ticks);
    }

    if let Some(damage) = input.attack {
        // Attacks outside a fight hit the runner's obstacles, not a boss
        if arena.phase() == ArenaPhase::Fighting {
            if let Err(e) = arena.apply_attack(damage, run.distance) {
                log::warn!("Attack ignored: {e}");
            }
        }
    }

    if arena.in_arena() {
        if let Err(e) = arena.tick(run.distance) {
            log::warn!("Arena tick rejected: {e}");
        }
    }

    if input.exit && arena.in_arena() {
        match arena.exit() {
            Ok(()) => run.finished = true,
            Err(e) => log::warn!("Exit ignored: {e}"),
        }
    }

    drain(run)
}

fn drain(run: &mut RunState) -> TickOutput {
    TickOutput {
        events: run.arena.drain_events(),
        submissions: run.arena.drain_submissions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BossType, GameMode};

    fn run_distance(run: &mut RunState, ticks: u32, delta: f32) -> Vec<ArenaEvent> {
        let input = TickInput {
            distance_delta: delta,
            ..Default::default()
        };
        (0..ticks).flat_map(|_| tick(run, &input).events).collect()
    }

    #[test]
    fn test_story_arena_triggers_by_distance() {
        let mut run = RunState::new(1, GameMode::Story);
        let events = run_distance(&mut run, 99, 10.0);
        assert!(events.is_empty());
        assert_eq!(run.arena.phase(), ArenaPhase::Idle);

        let events = run_distance(&mut run, 1, 10.0);
        assert!(matches!(events[0], ArenaEvent::ArenaEntered { .. }));
        assert!(matches!(
            events[1],
            ArenaEvent::BossSpawned {
                boss_type: BossType::Mech,
                ..
            }
        ));
        assert_eq!(run.arena.state().start_tick, 100);
    }

    #[test]
    fn test_attack_reaches_boss() {
        let mut run = RunState::new(1, GameMode::Rush);
        tick(&mut run, &TickInput::default());
        let out = tick(
            &mut run,
            &TickInput {
                attack: Some(2),
                ..Default::default()
            },
        );
        assert!(out.events.contains(&ArenaEvent::BossHealthChanged {
            health: 4,
            max_health: 6,
        }));
    }

    #[test]
    fn test_defeat_emits_submission() {
        let mut run = RunState::new(1, GameMode::Rush);
        tick(&mut run, &TickInput::default());
        let out = tick(
            &mut run,
            &TickInput {
                distance_delta: 5.0,
                attack: Some(100),
                ..Default::default()
            },
        );
        assert_eq!(out.submissions.len(), 1);
        assert_eq!(run.arena.state().bosses_defeated, vec![BossType::Mech]);
    }

    #[test]
    fn test_death_finishes_run() {
        let mut run = RunState::new(1, GameMode::Rush);
        tick(&mut run, &TickInput::default());
        let out = tick(
            &mut run,
            &TickInput {
                player_died: true,
                attack: Some(100),
                ..Default::default()
            },
        );
        assert!(run.finished);
        assert!(run.arena.state().has_died);
        // The killing blow in the same tick does not land
        assert!(run.arena.state().bosses_defeated.is_empty());
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, ArenaEvent::ArenaFailed { .. })));

        let ticks = run.time_ticks;
        let after = tick(
            &mut run,
            &TickInput {
                attack: Some(100),
                distance_delta: 50.0,
                ..Default::default()
            },
        );
        assert!(after.events.is_empty());
        assert_eq!(run.time_ticks, ticks);
    }

    #[test]
    fn test_death_before_arena() {
        let mut run = RunState::new(1, GameMode::Story);
        tick(
            &mut run,
            &TickInput {
                player_died: true,
                ..Default::default()
            },
        );
        assert!(run.finished);
        assert_eq!(run.arena.phase(), ArenaPhase::Idle);
    }

    #[test]
    fn test_endless_exit() {
        let mut run = RunState::new(1, GameMode::Endless);
        run_distance(&mut run, 1, 1000.0);
        let out = tick(
            &mut run,
            &TickInput {
                exit: true,
                ..Default::default()
            },
        );
        assert!(run.finished);
        assert_eq!(out.submissions.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs produce identical arenas
        let mut a = RunState::new(99999, GameMode::Endless);
        let mut b = RunState::new(99999, GameMode::Endless);
        for i in 0..3000u32 {
            let input = TickInput {
                distance_delta: 8.0,
                attack: (i % 11 == 0).then_some(1),
                ..Default::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.arena.state(), b.arena.state());
        assert_eq!(
            a.arena.active_boss().map(|b| b.projectiles.clone()),
            b.arena.active_boss().map(|b| b.projectiles.clone())
        );
    }
}
