//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes commands, runs all
//! systems, and produces `GameStateSnapshot`s. It is completely headless, so
//! a run is reproducible from its seed, layout and input sequence.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use auber_core::commands::{PlayerInput, SimCommand};
use auber_core::components::{Debuffs, Hitbox, Player, Position, Rotation, Velocity};
use auber_core::config::Tuning;
use auber_core::constants::MAX_HEALTH;
use auber_core::enums::{DebuffKind, GamePhase, NpcKind};
use auber_core::error::RecordError;
use auber_core::events::SimEvent;
use auber_core::record::{EntityRecord, PlayerRecord};
use auber_core::state::{GameStateSnapshot, ScoreView};
use auber_core::types::{EntityId, SimTime};
use auber_map::{StationLayout, TeleporterPad, TileGrid};
use auber_nav::{FleePointNavigator, Navigator};

use crate::debuff::{self, EffectClock};
use crate::systems;
use crate::systems::player::Medbay;
use crate::systems::teleporter::ShotContext;
use crate::timers::TimerQueue;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    tuning: Tuning,
    command_queue: VecDeque<SimCommand>,
    input: PlayerInput,
    timers: TimerQueue,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    map: TileGrid,
    navigator: Box<dyn Navigator + Send>,
    medbay: Medbay,
    teleporters: Vec<TeleporterPad>,
    player: Entity,
    next_id: u32,
    score: ScoreView,
}

impl SimulationEngine {
    /// Create an engine with the station populated from `layout`.
    pub fn new(config: SimConfig, layout: &StationLayout) -> Self {
        let mut world = World::new();
        let mut next_id = 0;
        let player = world_setup::setup_station(&mut world, layout, &mut next_id);
        let infiltrators = layout
            .npcs
            .iter()
            .filter(|(kind, _)| *kind == NpcKind::Infiltrator)
            .count() as u32;

        info!(
            "simulation started: seed {}, {} npcs ({} infiltrators)",
            config.seed,
            layout.npcs.len(),
            infiltrators
        );

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            command_queue: VecDeque::new(),
            input: PlayerInput::default(),
            timers: TimerQueue::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            map: layout.grid.clone(),
            navigator: Box::new(FleePointNavigator::new(layout.flee_points.clone())),
            medbay: Medbay {
                spawn: layout.player_spawn,
                area: layout.medbay,
            },
            teleporters: layout.teleporters.clone(),
            player,
            next_id,
            score: ScoreView {
                infiltrators_total: infiltrators,
                ..ScoreView::default()
            },
        }
    }

    /// Replace the navigation service.
    pub fn set_navigator(&mut self, navigator: Box<dyn Navigator + Send>) {
        self.navigator = navigator;
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Latch the input read by every following tick.
    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.time,
            self.phase,
            events,
            &self.score,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn map(&self) -> &TileGrid {
        &self.map
    }

    /// The player entity.
    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn score(&self) -> &ScoreView {
        &self.score
    }

    /// Number of timer actions still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Look up a live entity by id.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        world_setup::find_entity(&self.world, id)
    }

    /// Bounding-box centre of a live entity.
    pub fn entity_center(&self, id: EntityId) -> Option<Vec2> {
        let entity = self.entity(id)?;
        let mut query = self.world.query_one::<(&Position, &Hitbox)>(entity).ok()?;
        let (pos, hitbox) = query.get()?;
        Some(hitbox.center(pos.0))
    }

    /// Snapshot of the player's persisted fields.
    pub fn export_player_record(&self) -> PlayerRecord {
        let Ok(mut query) = self
            .world
            .query_one::<(&Position, &Rotation, &Player, &Debuffs)>(self.player)
        else {
            return PlayerRecord::default();
        };
        let Some((pos, rotation, state, debuffs)) = query.get() else {
            return PlayerRecord::default();
        };
        PlayerRecord {
            base: EntityRecord {
                x: pos.0.x,
                y: pos.0.y,
                rotation: rotation.0,
            },
            health: state.health,
            confused: debuffs.confused,
            slowed: debuffs.slowed,
            blinded: debuffs.blinded,
        }
    }

    /// Load persisted fields into the player. Debuffs that were active are
    /// re-armed for a full duration; the rest are cleared. A record holding
    /// non-finite numbers is rejected and the player left untouched.
    pub fn restore_player_record(&mut self, record: &PlayerRecord) -> Result<(), RecordError> {
        record.validate()?;
        let Ok((pos, vel, rotation, state, debuffs)) = self.world.query_one_mut::<(
            &mut Position,
            &mut Velocity,
            &mut Rotation,
            &mut Player,
            &mut Debuffs,
        )>(self.player) else {
            return Ok(());
        };
        pos.0 = Vec2::new(record.base.x, record.base.y);
        vel.0 = Vec2::ZERO;
        rotation.0 = record.base.rotation;
        state.health = record.health.clamp(0.0, MAX_HEALTH);

        let mut clock = EffectClock {
            now: self.time.tick,
            tuning: &self.tuning,
            timers: &mut self.timers,
        };
        for kind in DebuffKind::ALL {
            let active = match kind {
                DebuffKind::Confuse => record.confused,
                DebuffKind::Slow => record.slowed,
                DebuffKind::Blind => record.blinded,
            };
            if active {
                debuff::apply_debuff(debuffs, self.player, kind, &mut clock, &mut self.events);
            } else {
                debuffs.set(kind, false);
                debuffs.bump(kind);
            }
        }
        info!("player restored at ({}, {})", record.base.x, record.base.y);
        Ok(())
    }

    /// Encode the player as a save line.
    pub fn save_player(&self) -> String {
        self.export_player_record().to_string()
    }

    /// Decode a save line and restore the player from it.
    pub fn load_player(&mut self, data: &str) -> Result<(), RecordError> {
        let record: PlayerRecord = data.parse()?;
        self.restore_player_record(&record)
    }

    /// Spawn a projectile directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        center: Vec2,
        velocity: Vec2,
        action: DebuffKind,
    ) -> EntityId {
        let (_, id) = world_setup::spawn_projectile(
            &mut self.world,
            center,
            velocity,
            action,
            None,
            &mut self.next_id,
        );
        id
    }

    /// Mutable world access (for tests that stage a situation directly).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Respawn => {
                systems::player::respawn(
                    &mut self.world,
                    self.player,
                    &self.medbay,
                    &mut self.events,
                );
            }
            SimCommand::ArmStunShot => {
                if let Ok(mut state) = self.world.get::<&mut Player>(self.player) {
                    state.stun_shot = true;
                }
            }
            SimCommand::FireProjectile {
                shooter,
                target,
                action,
            } => {
                let Some(origin) = self.entity_center(shooter) else {
                    warn!("projectile requested from unknown entity {}", shooter.0);
                    return;
                };
                let action = action.unwrap_or_else(|| DebuffKind::random(&mut self.rng));
                systems::projectile::launch(
                    &mut self.world,
                    origin,
                    target,
                    self.tuning.projectile_speed,
                    action,
                    Some(shooter),
                    &mut self.next_id,
                    &mut self.events,
                );
            }
            SimCommand::SetVisible { visible } => {
                if let Ok(mut state) = self.world.get::<&mut Player>(self.player) {
                    state.visible = visible;
                }
            }
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.tick;

        // 1. Timer actions that came due
        systems::scheduled::run(
            &mut self.world,
            &mut self.timers,
            now,
            &self.tuning,
            &mut self.events,
        );
        // 2. Player respawn, healing, steering and teleporter pads
        systems::player::run(
            &mut self.world,
            self.player,
            &self.input,
            &self.medbay,
            &self.teleporters,
            &self.tuning,
            &mut self.events,
        );

        let mut clock = EffectClock {
            now,
            tuning: &self.tuning,
            timers: &mut self.timers,
        };
        // 3. Teleporter charge / fire, ray impact and noise
        let mut shot = ShotContext {
            map: &self.map,
            navigator: self.navigator.as_ref(),
            despawn_buffer: &mut self.despawn_buffer,
            score: &mut self.score,
        };
        systems::teleporter::run(
            &mut self.world,
            self.player,
            &self.input,
            &mut shot,
            &mut clock,
            &mut self.events,
        );
        // 4. NPC flee steering
        systems::npc::run(&mut self.world);
        // 5. Exposed infiltrators shoot back
        systems::hostile_fire::run(
            &mut self.world,
            self.player,
            &mut self.rng,
            &self.tuning,
            &mut self.next_id,
            &mut self.events,
        );
        // 6. Movement integration with tile collision
        systems::movement::run(&mut self.world, &self.map);
        // 7. Projectile flight and impact
        systems::projectile::run(
            &mut self.world,
            &self.map,
            self.player,
            &mut clock,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
        );
        // 8. Deferred removal
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
