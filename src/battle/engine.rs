//! The transition model: one player move plus the folded-in opponent reply.

use crate::battle::ai::OpponentPolicy;
use crate::battle::calculators::{CombatResolver, AVERAGE_ROLL};
use crate::battle::replay::{AttackTarget, Attacker, BattleEvent, EventBus, PokemonRef, SwitchedPokemon};
use crate::battle::state::{BattleState, MoveRef, SideId};

/// A state reachable in one ply, the player move that leads there and the
/// damage that move resolved to before clamping.
#[derive(Debug, Clone)]
pub struct Successor {
    pub state: BattleState,
    pub action: MoveRef,
    pub damage: u16,
}

impl Successor {
    pub fn move_name(&self) -> &str {
        self.state.player().move_name(self.action).unwrap_or_default()
    }
}

/// Produces successor states. Holds only shared references, so it is
/// `Copy` and can be handed to every strategy.
#[derive(Clone, Copy)]
pub struct Engine<'a> {
    resolver: &'a dyn CombatResolver,
    policy: &'a dyn OpponentPolicy,
}

impl<'a> Engine<'a> {
    pub fn new(resolver: &'a dyn CombatResolver, policy: &'a dyn OpponentPolicy) -> Self {
        Self { resolver, policy }
    }

    pub fn resolver(&self) -> &'a dyn CombatResolver {
        self.resolver
    }

    /// Every non-zero-damage ply from `state`, in move slot order. Empty for
    /// terminal states, and for live states where nothing the player has
    /// left can hurt the opponent.
    pub fn successors(&self, state: &BattleState) -> Vec<Successor> {
        if state.is_terminal() {
            return Vec::new();
        }
        let successors: Vec<Successor> = state
            .player()
            .usable_slots()
            .filter_map(|slot| self.apply(state, slot))
            .collect();

        tracing::trace!(state = %state.key(), count = successors.len(), "expanded state");
        successors
    }

    /// Play the move in `slot` of the player's active Pokemon. `None` if the
    /// state is terminal, the slot is empty or out of PP, or the move would
    /// deal no damage.
    pub fn apply(&self, state: &BattleState, slot: usize) -> Option<Successor> {
        self.resolve_turn(state, slot, None)
    }

    /// Same as [`Engine::apply`], recording what happened on `bus`.
    pub fn play_turn(&self, state: &BattleState, slot: usize, bus: &mut EventBus) -> Option<Successor> {
        self.resolve_turn(state, slot, Some(bus))
    }

    fn resolve_turn(
        &self,
        state: &BattleState,
        slot: usize,
        mut bus: Option<&mut EventBus>,
    ) -> Option<Successor> {
        if state.is_terminal() {
            return None;
        }

        let player = state.player();
        let move_used = player.usable_move(slot)?;
        let damage = self.resolver.resolve(
            player.active_pokemon(),
            state.opponent().active_pokemon(),
            move_used,
            Some(false),
            Some(AVERAGE_ROLL),
        );
        if damage == 0 {
            return None;
        }

        let turn = state.turn + 1;
        let action = MoveRef {
            member: player.active_index() as u8,
            slot: slot as u8,
        };

        let mut next = state.clone();
        self.strike(&mut next, SideId::Player, slot, damage, turn, bus.as_deref_mut());

        if next.opponent().active_fainted() {
            self.handle_faint(&mut next, SideId::Opponent, turn, bus.as_deref_mut());
        } else if !next.is_terminal() {
            self.counter_attack(&mut next, turn, bus.as_deref_mut());
        }

        next.turn = turn;
        Some(Successor {
            state: next,
            action,
            damage,
        })
    }

    fn counter_attack(&self, state: &mut BattleState, turn: u32, mut bus: Option<&mut EventBus>) {
        let Some(slot) = self.policy.select_move(state) else {
            return;
        };
        let Some(move_used) = state.opponent().usable_move(slot) else {
            return;
        };
        let damage = self.resolver.resolve(
            state.opponent().active_pokemon(),
            state.player().active_pokemon(),
            move_used,
            Some(false),
            Some(AVERAGE_ROLL),
        );

        self.strike(state, SideId::Opponent, slot, damage, turn, bus.as_deref_mut());
        if state.player().active_fainted() {
            self.handle_faint(state, SideId::Player, turn, bus);
        }
    }

    /// Apply an attack from `side`'s active Pokemon to the other side's active
    /// Pokemon and spend the move's PP.
    fn strike(
        &self,
        state: &mut BattleState,
        side: SideId,
        slot: usize,
        damage: u16,
        turn: u32,
        bus: Option<&mut EventBus>,
    ) {
        let target = side.other();
        let hp_before = state.side(target).active_hp();
        let dealt = state.side_mut(target).damage_active(damage);
        state.side_mut(side).spend_pp(slot);

        let Some(bus) = bus else {
            return;
        };
        let attacker_side = state.side(side);
        let defender_side = state.side(target);
        let attacker = attacker_side.active_pokemon();
        let defender = defender_side.active_pokemon();
        let Some(move_used) = attacker.move_at(slot) else {
            return;
        };
        let (primary, secondary) = defender.type_pair();
        let effectiveness = self.resolver.effectiveness(move_used.move_type, primary, secondary);

        let attacker = Attacker {
            name: attacker.name.clone(),
            hp: attacker_side.active_hp(),
            max_hp: attacker.max_hp(),
        };
        let defender = AttackTarget {
            name: defender.name.clone(),
            hp_before,
            hp_after: defender_side.active_hp(),
            max_hp: defender.max_hp(),
        };
        let move_name = move_used.name.clone();
        bus.push(match side {
            SideId::Player => BattleEvent::PlayerAttack {
                turn,
                attacker,
                defender,
                move_name,
                damage: dealt,
                effectiveness,
            },
            SideId::Opponent => BattleEvent::OpponentAttack {
                turn,
                attacker,
                defender,
                move_name,
                damage: dealt,
                effectiveness,
            },
        });
    }

    fn handle_faint(&self, state: &mut BattleState, side: SideId, turn: u32, bus: Option<&mut EventBus>) {
        let fainted = state.side(side).active_index();
        let switched_to = state.side_mut(side).auto_switch();

        let Some(bus) = bus else {
            return;
        };
        let team = state.side(side);
        bus.push(BattleEvent::Faint {
            turn,
            pokemon: PokemonRef {
                name: team.pokemon(fainted).name.clone(),
                team: side,
            },
        });
        if let Some(member) = switched_to {
            bus.push(BattleEvent::Switch {
                turn,
                pokemon: SwitchedPokemon {
                    name: team.pokemon(member).name.clone(),
                    hp: team.hp(member),
                    max_hp: team.max_hp(member),
                    team: side,
                },
            });
        }
    }
}
