//! Turn-by-turn battle log. Replaying a move sequence re-walks it through
//! the engine against a fresh copy of the initial state; it never feeds back
//! into a search.

use crate::battle::engine::Engine;
use crate::battle::state::{BattleState, MoveRef, Outcome, SideId};
use crate::battle::type_chart::effectiveness_text;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attacker {
    pub name: String,
    pub hp: u16,
    pub max_hp: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackTarget {
    pub name: String,
    pub hp_before: u16,
    pub hp_after: u16,
    pub max_hp: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRef {
    pub name: String,
    pub team: SideId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchedPokemon {
    pub name: String,
    pub hp: u16,
    pub max_hp: u16,
    pub team: SideId,
}

/// Something that happened during a replayed turn. Damage is the HP the
/// defender actually lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum BattleEvent {
    PlayerAttack {
        turn: u32,
        attacker: Attacker,
        defender: AttackTarget,
        #[serde(rename = "move")]
        move_name: String,
        damage: u16,
        effectiveness: f32,
    },
    OpponentAttack {
        turn: u32,
        attacker: Attacker,
        defender: AttackTarget,
        #[serde(rename = "move")]
        move_name: String,
        damage: u16,
        effectiveness: f32,
    },
    Faint {
        turn: u32,
        pokemon: PokemonRef,
    },
    Switch {
        turn: u32,
        pokemon: SwitchedPokemon,
    },
    BattleEnd {
        turn: u32,
        winner: SideId,
    },
}

impl BattleEvent {
    pub fn turn(&self) -> u32 {
        match self {
            BattleEvent::PlayerAttack { turn, .. }
            | BattleEvent::OpponentAttack { turn, .. }
            | BattleEvent::Faint { turn, .. }
            | BattleEvent::Switch { turn, .. }
            | BattleEvent::BattleEnd { turn, .. } => *turn,
        }
    }

    /// Battle text for this event.
    pub fn format(&self) -> String {
        match self {
            BattleEvent::PlayerAttack {
                attacker,
                defender,
                move_name,
                damage,
                effectiveness,
                ..
            }
            | BattleEvent::OpponentAttack {
                attacker,
                defender,
                move_name,
                damage,
                effectiveness,
                ..
            } => {
                let mut text = format!(
                    "{} used {}! {} took {} damage ({}/{} HP)",
                    attacker.name, move_name, defender.name, damage, defender.hp_after, defender.max_hp
                );
                if let Some(note) = effectiveness_text(*effectiveness) {
                    text.push(' ');
                    text.push_str(note);
                }
                text
            }
            BattleEvent::Faint { pokemon, .. } => format!("{} fainted!", pokemon.name),
            BattleEvent::Switch { pokemon, .. } => match pokemon.team {
                SideId::Player => format!("Go, {}! ({}/{} HP)", pokemon.name, pokemon.hp, pokemon.max_hp),
                SideId::Opponent => format!(
                    "The opponent sent out {}! ({}/{} HP)",
                    pokemon.name, pokemon.hp, pokemon.max_hp
                ),
            },
            BattleEvent::BattleEnd { winner, .. } => match winner {
                SideId::Player => "You won the battle!".to_string(),
                SideId::Opponent => "You lost the battle...".to_string(),
            },
        }
    }
}

/// Collects battle events in the order they happen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Print each event as battle text, grouped by turn.
    pub fn print_formatted(&self) {
        let mut current_turn = None;
        for event in &self.events {
            if current_turn != Some(event.turn()) {
                current_turn = Some(event.turn());
                println!("Turn {}:", event.turn());
            }
            println!("  {}", event.format());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl FromIterator<BattleEvent> for EventBus {
    fn from_iter<I: IntoIterator<Item = BattleEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event.format())?;
        }
        Ok(())
    }
}

/// Result of re-walking a move sequence.
#[derive(Debug, Clone)]
pub struct Replay {
    pub events: EventBus,
    pub final_state: BattleState,
    pub turns_played: usize,
}

impl Replay {
    pub fn outcome(&self) -> Option<Outcome> {
        self.final_state.outcome()
    }
}

/// Re-walk `actions` from a fresh copy of `initial`. Stops early at a
/// terminal state, or at an action that no longer applies (wrong active
/// member, exhausted PP, zero damage). Ends with a `BattleEnd` event when
/// the battle is decided.
pub fn replay(engine: &Engine<'_>, initial: &BattleState, actions: &[MoveRef]) -> Replay {
    let mut bus = EventBus::new();
    let mut state = initial.clone();
    let mut turns_played = 0;

    for action in actions {
        if state.is_terminal() {
            break;
        }
        if state.player().active_index() != action.member as usize {
            tracing::warn!(
                expected = action.member,
                active = state.player().active_index(),
                "replay diverged: a different player Pokemon is active"
            );
            break;
        }
        match engine.play_turn(&state, action.slot as usize, &mut bus) {
            Some(successor) => {
                state = successor.state;
                turns_played += 1;
            }
            None => {
                tracing::warn!(slot = action.slot, turn = state.turn, "replay diverged: move no longer applies");
                break;
            }
        }
    }

    if let Some(outcome) = state.outcome() {
        let winner = match outcome {
            Outcome::Victory => SideId::Player,
            Outcome::Defeat => SideId::Opponent,
        };
        bus.push(BattleEvent::BattleEnd {
            turn: state.turn,
            winner,
        });
    }

    Replay {
        events: bus,
        final_state: state,
        turns_played,
    }
}
