//! The game facade.
//!
//! [`Game`] pairs the command [`Dispatcher`] with the [`GameState`] its
//! handlers mutate. Every entry point returns text: commands, ticks, and
//! combat rounds never surface an error to the caller.

use std::sync::Arc;

use delve_engine::{CombatEngine, GameMessage, MessageBus, MessageKind, Realm, RoundTicket, SubscriptionId, TickScheduler};
use delve_foundation::{Error, ErrorContext, ErrorKind, Result, Stylist};
use delve_parser::{CommandContext, CommandSpec, Dispatcher};
use delve_storage::{AreaSource, Player, PlayerState, SkillBook, WorldStore};
use tracing::{debug, info, warn};

use crate::actions::{self, ActionGroups};
use crate::commands;
use crate::config::GameConfig;
use crate::save::{self, KeyValueStore, SaveGame};

/// Everything a command handler may touch.
pub struct GameState {
    pub(crate) realm: Realm,
    pub(crate) combat: CombatEngine,
    pub(crate) scheduler: TickScheduler,
    pub(crate) bus: MessageBus,
    pub(crate) config: GameConfig,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("realm", &self.realm)
            .field("combat", &self.combat)
            .field("scheduler", &self.scheduler)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CommandContext for GameState {
    fn player_state(&self) -> PlayerState {
        self.realm.player.state
    }

    fn in_combat(&self) -> bool {
        self.combat.is_active()
    }
}

/// Loads the start area and creates a fresh character in it.
fn fresh_start(config: &GameConfig, source: Arc<dyn AreaSource>, name: &str) -> Result<(WorldStore, Player)> {
    let mut world = WorldStore::new(source);
    world.load_area(&config.start_area)?;
    let start = config.start_room_id();
    if world.room(&start).is_none() {
        return Err(Error::room_not_found(&start));
    }
    Ok((world, Player::new(name, start)))
}

impl GameState {
    /// Builds a new session: loads the start area and the skill table and
    /// creates a level 1 character.
    ///
    /// # Errors
    ///
    /// Fails if the start area or skill table cannot be loaded, or the
    /// start room does not exist.
    pub fn new(config: GameConfig, source: Arc<dyn AreaSource>, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let (world, mut player) = fresh_start(&config, source, &config.player_name)?;
        let skills = world.load_skills()?;
        player.learn_unlocked_skills(&skills);

        let realm = Realm::new(world, player, skills, config.seed);
        Ok(Self {
            realm,
            combat: CombatEngine::new(config.combat_rules()),
            scheduler: TickScheduler::new(config.wander_chance),
            bus: MessageBus::new(),
            config,
            store,
        })
    }

    /// World, player, skills, and the random source.
    #[must_use]
    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    /// Mutable access to the realm.
    pub fn realm_mut(&mut self) -> &mut Realm {
        &mut self.realm
    }

    /// The player character.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.realm.player
    }

    /// The world store.
    #[must_use]
    pub fn world(&self) -> &WorldStore {
        &self.realm.world
    }

    /// The combat engine.
    #[must_use]
    pub fn combat(&self) -> &CombatEngine {
        &self.combat
    }

    /// The tick scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Skill definitions.
    #[must_use]
    pub fn skills(&self) -> &SkillBook {
        &self.realm.skills
    }

    /// Delivers messages to bus subscribers.
    pub(crate) fn emit(&mut self, messages: &[GameMessage]) {
        self.bus.emit_all(messages);
    }

    /// Full description of the player's room.
    #[must_use]
    pub fn describe_room(&self) -> String {
        let here = self.realm.player_room();
        match self.realm.world.room(here) {
            Some(room) => room.full_description(
                &self.realm.world,
                self.realm.stylist.as_ref(),
                self.config.wrap_width,
            ),
            None => format!("You are adrift somewhere outside the world ({here})."),
        }
    }

    /// Replaces the world and the player with a fresh start. Skills, the
    /// random source, and the stylist carry over.
    ///
    /// # Errors
    ///
    /// Fails if the start area cannot be loaded. The current game is left
    /// untouched in that case.
    pub fn new_game(&mut self, name: Option<&str>) -> Result<()> {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .map_or_else(|| self.config.player_name.clone(), |n| n.trim().to_string());
        let source = Arc::clone(self.realm.world.source());
        let (world, mut player) = fresh_start(&self.config, source, &name)?;
        player.learn_unlocked_skills(&self.realm.skills);

        self.combat.clear();
        self.scheduler.reset();
        self.realm.world = world;
        self.realm.player = player;
        info!(player = %self.realm.player.name, "new game started");
        Ok(())
    }

    /// Writes the current game to the save store.
    ///
    /// # Errors
    ///
    /// Fails if encoding or the store fails.
    pub fn save(&self) -> Result<()> {
        let key = &self.config.save_key;
        let snapshot = SaveGame::capture(&self.realm.player, &self.realm.world);
        let bytes = save::to_bytes(&snapshot, self.config.save_format)?;
        self.store
            .put(key, &bytes)
            .map_err(|e| e.with_context(ErrorContext::new().with_source(key.clone())))?;
        info!(%key, bytes = bytes.len(), "game saved");
        Ok(())
    }

    /// Replaces the current game with the saved one.
    ///
    /// The saved world is rebuilt from the area documents off to the side
    /// and only swapped in once it is complete, so any failure leaves the
    /// current game exactly as it was. Dead hostile NPCs are queued to
    /// respawn in their home rooms.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NoSavedGame`] when nothing is stored under the save
    /// key; otherwise decoding or area loading failures.
    pub fn load(&mut self) -> Result<()> {
        let key = self.config.save_key.clone();
        let context = || ErrorContext::new().with_source(key.clone());
        let bytes = self
            .store
            .get(&key)
            .map_err(|e| e.with_context(context()))?
            .ok_or_else(|| Error::new(ErrorKind::NoSavedGame(key.clone())))?;
        let snapshot = save::from_bytes(&bytes).map_err(|e| e.with_context(context()))?;

        let mut world = WorldStore::new(Arc::clone(self.realm.world.source()));
        restore_world(&mut world, &snapshot).map_err(|e| e.with_context(context().with_frame("restore world")))?;
        let mut player = snapshot.player;
        if world.room(&player.current_room).is_none() {
            return Err(Error::room_not_found(&player.current_room).with_context(context()));
        }
        if player.state == PlayerState::Fighting {
            player.state = PlayerState::Idle;
        }

        self.combat.clear();
        self.scheduler.reset();
        self.realm.world = world;
        self.realm.player = player;

        let dead: Vec<_> = self
            .realm
            .world
            .npcs()
            .filter(|npc| npc.is_hostile() && !npc.is_alive())
            .filter_map(|npc| npc.home_room.clone().map(|home| (npc.id.clone(), home)))
            .collect();
        for (npc, home) in &dead {
            self.scheduler
                .schedule_npc_respawn(&self.realm.world, npc, home, self.config.respawn_delay_ticks);
        }
        info!(%key, respawns = dead.len(), "game loaded");
        Ok(())
    }
}

/// Reloads the saved areas into `world` and overlays the saved state.
fn restore_world(world: &mut WorldStore, snapshot: &SaveGame) -> Result<()> {
    for area in &snapshot.loaded_area_ids {
        world.load_area(area)?;
    }
    let state = &snapshot.world_state;
    for (id, npc) in &state.npcs {
        match world.npc_mut(id) {
            Some(live) => live.set_hit_points(npc.hit_points),
            None => warn!(npc = %id, "saved npc no longer exists"),
        }
    }
    for (id, room) in &state.rooms {
        if world.room(id).is_none() {
            warn!(room = %id, "saved room no longer exists");
            continue;
        }
        world.set_room_items(id, room.items.clone())?;
    }
    world.set_npc_locations(state.npc_locations.iter().cloned());
    world.sync_rooms_from_npc_map();
    Ok(())
}

/// A running game: the dispatcher and the state it drives.
pub struct Game {
    dispatcher: Dispatcher<GameState>,
    state: GameState,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("dispatcher", &self.dispatcher)
            .field("state", &self.state)
            .finish()
    }
}

impl Game {
    /// Creates a game with the standard command set plus one verb per
    /// skill.
    ///
    /// # Errors
    ///
    /// Fails if the start area or skill table cannot be loaded.
    pub fn new(config: GameConfig, source: Arc<dyn AreaSource>, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let state = GameState::new(config, source, store)?;
        let mut dispatcher = Dispatcher::new();
        commands::register_all(&mut dispatcher, &state.config);

        for skill in state.realm.skills.iter() {
            if dispatcher.has_command(&skill.id) {
                warn!(skill = %skill.id, "skill id shadows a command; use 'skill {}' instead", skill.id);
                continue;
            }
            dispatcher.register(
                CommandSpec::new(skill.id.as_str(), skill.description.as_str(), commands::combat::skill_verb).hidden(),
            );
            dispatcher.allow_in_combat(skill.id.as_str());
        }
        debug!(commands = dispatcher.command_names().count(), "dispatcher ready");
        Ok(Self { dispatcher, state })
    }

    /// Replaces the formatting hook.
    #[must_use]
    pub fn with_stylist(mut self, stylist: Box<dyn Stylist>) -> Self {
        self.state.realm.stylist = stylist;
        self
    }

    /// The state handlers operate on.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the state, for tests and tooling.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// The command dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<GameState> {
        &self.dispatcher
    }

    /// Greeting plus the starting room.
    #[must_use]
    pub fn welcome(&self) -> String {
        format!(
            "Welcome, {}! Type 'help' for a list of commands.\n\n{}",
            self.state.realm.player.name,
            self.state.describe_room()
        )
    }

    /// Runs one line of player input and returns the reply.
    pub fn process_command(&mut self, input: &str) -> String {
        self.dispatcher.execute(&mut self.state, input)
    }

    /// Advances the world by one tick. The messages are also emitted on
    /// the bus.
    pub fn tick(&mut self) -> Vec<String> {
        let target = self.state.combat.target().cloned();
        let messages = self
            .state
            .scheduler
            .advance_tick(&mut self.state.realm, target.as_ref());
        self.state.emit(&messages);
        messages.into_iter().map(|m| m.text).collect()
    }

    /// Ticket for the next combat round, while an encounter is running.
    #[must_use]
    pub fn pending_round(&self) -> Option<RoundTicket> {
        self.state.combat.pending_round()
    }

    /// Resolves one combat round. The messages are also emitted on the
    /// bus. A stale ticket yields nothing.
    pub fn run_round(&mut self, ticket: RoundTicket) -> Vec<String> {
        let state = &mut self.state;
        let report = state
            .combat
            .advance_round(ticket, &mut state.realm, &mut state.scheduler);
        let messages: Vec<GameMessage> = report
            .messages
            .iter()
            .map(|text| GameMessage::new(MessageKind::Combat, text.as_str()))
            .collect();
        state.emit(&messages);
        if let Some(outcome) = report.outcome {
            info!(%outcome, "combat ended");
        }
        report.messages
    }

    /// Actions that make sense right now, for an action-picker UI.
    #[must_use]
    pub fn available_actions(&self) -> ActionGroups {
        actions::available_actions(&self.state)
    }

    /// Registers a bus subscriber.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameMessage) + 'static) -> SubscriptionId {
        self.state.bus.subscribe(subscriber)
    }

    /// Removes a bus subscriber.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.bus.unsubscribe(id)
    }

    /// Words the REPL offers for completion: commands and direction names.
    #[must_use]
    pub fn vocabulary(&self) -> Vec<String> {
        let mut words: Vec<String> = self.dispatcher.command_names().map(String::from).collect();
        words.extend(delve_parser::stdlib::DIRECTIONS.iter().map(|d| d.name.to_string()));
        words.sort();
        words.dedup();
        words
    }
}
