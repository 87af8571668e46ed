use crate::errors::{TeamError, TeamResult};
use crate::moves::Move;
use crate::pokemon::{Pokemon, MAX_MOVES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const MAX_TEAM_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideId {
    Player,
    Opponent,
}

impl SideId {
    pub fn other(self) -> SideId {
        match self {
            SideId::Player => SideId::Opponent,
            SideId::Opponent => SideId::Player,
        }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideId::Player => write!(f, "player"),
            SideId::Opponent => write!(f, "opponent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    pub fn is_victory(self) -> bool {
        self == Outcome::Victory
    }
}

/// Which move a player action used: team member and move slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRef {
    pub member: u8,
    pub slot: u8,
}

/// One team in battle. The roster is shared and never mutated; HP and PP
/// live in fixed-size arrays so cloning a side is a value copy plus a
/// reference-count bump.
#[derive(Debug, Clone)]
pub struct Side {
    roster: Arc<[Pokemon]>,
    hp: [u16; MAX_TEAM_SIZE],
    pp: [[u8; MAX_MOVES]; MAX_TEAM_SIZE],
    active: usize,
}

impl Side {
    pub fn new(id: SideId, team: Vec<Pokemon>) -> TeamResult<Self> {
        if team.is_empty() {
            return Err(TeamError::Empty { side: id });
        }
        if team.len() > MAX_TEAM_SIZE {
            return Err(TeamError::TooLarge {
                side: id,
                size: team.len(),
            });
        }

        let mut hp = [0; MAX_TEAM_SIZE];
        let mut pp = [[0; MAX_MOVES]; MAX_TEAM_SIZE];
        for (member, pokemon) in team.iter().enumerate() {
            hp[member] = pokemon.current_hp.min(pokemon.max_hp());
            for (slot, mv) in pokemon.known_moves() {
                pp[member][slot] = mv.pp;
            }
        }

        let mut side = Self {
            roster: team.into(),
            hp,
            pp,
            active: 0,
        };
        if side.is_fainted(0) {
            side.auto_switch();
        }
        Ok(side)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn roster(&self) -> &[Pokemon] {
        &self.roster
    }

    pub fn pokemon(&self, member: usize) -> &Pokemon {
        &self.roster[member]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_pokemon(&self) -> &Pokemon {
        &self.roster[self.active]
    }

    pub fn hp(&self, member: usize) -> u16 {
        self.hp[member]
    }

    pub fn active_hp(&self) -> u16 {
        self.hp[self.active]
    }

    pub fn max_hp(&self, member: usize) -> u16 {
        self.roster[member].max_hp()
    }

    pub fn hp_values(&self) -> &[u16] {
        &self.hp[..self.len()]
    }

    pub fn is_fainted(&self, member: usize) -> bool {
        self.hp[member] == 0
    }

    pub fn active_fainted(&self) -> bool {
        self.is_fainted(self.active)
    }

    pub fn all_fainted(&self) -> bool {
        self.hp_values().iter().all(|&hp| hp == 0)
    }

    pub fn pp(&self, member: usize, slot: usize) -> u8 {
        self.pp[member][slot]
    }

    /// The active member's move in `slot`, if it exists and has PP left.
    pub fn usable_move(&self, slot: usize) -> Option<&Move> {
        let mv = self.active_pokemon().move_at(slot)?;
        (self.pp[self.active][slot] > 0).then_some(mv)
    }

    /// Usable move slots of the active member in slot order.
    pub fn usable_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_MOVES).filter(move |&slot| self.usable_move(slot).is_some())
    }

    pub fn move_name(&self, action: MoveRef) -> Option<&str> {
        self.roster
            .get(action.member as usize)?
            .move_at(action.slot as usize)
            .map(|mv| mv.name.as_str())
    }

    /// Apply damage to the active member, clamped at zero. Returns HP lost.
    pub fn damage_active(&mut self, damage: u16) -> u16 {
        let current = &mut self.hp[self.active];
        let dealt = damage.min(*current);
        *current -= dealt;
        dealt
    }

    pub fn spend_pp(&mut self, slot: usize) {
        let pp = &mut self.pp[self.active][slot];
        *pp = pp.saturating_sub(1);
    }

    /// Make the first non-fainted member other than the current one active,
    /// lowest index first. Leaves the index alone if nobody is left.
    pub fn auto_switch(&mut self) -> Option<usize> {
        let next = (0..self.len()).find(|&member| member != self.active && !self.is_fainted(member))?;
        self.active = next;
        Some(next)
    }

    /// Sum of (max - current) HP over the whole team.
    pub fn damage_taken(&self) -> u32 {
        self.roster
            .iter()
            .zip(self.hp_values())
            .map(|(pokemon, &hp)| pokemon.max_hp().saturating_sub(hp) as u32)
            .sum()
    }

    /// Current roster with live HP and PP written back, for reporting.
    pub fn snapshot(&self) -> Vec<Pokemon> {
        self.roster
            .iter()
            .enumerate()
            .map(|(member, pokemon)| {
                let mut pokemon = pokemon.clone();
                pokemon.current_hp = self.hp[member];
                for (slot, mv) in pokemon.moves.iter_mut().enumerate() {
                    if let Some(mv) = mv {
                        mv.pp = self.pp[member][slot];
                    }
                }
                pokemon
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn set_hp(&mut self, member: usize, hp: u16) {
        self.hp[member] = hp.min(self.max_hp(member));
    }

    #[cfg(test)]
    pub(crate) fn set_pp(&mut self, member: usize, slot: usize, pp: u8) {
        self.pp[member][slot] = pp;
    }
}

/// Snapshot of both teams, the active indices and the turn counter.
#[derive(Debug, Clone)]
pub struct BattleState {
    player: Side,
    opponent: Side,
    pub turn: u32,
}

impl BattleState {
    pub fn new(player_team: Vec<Pokemon>, opponent_team: Vec<Pokemon>) -> TeamResult<Self> {
        Ok(Self {
            player: Side::new(SideId::Player, player_team)?,
            opponent: Side::new(SideId::Opponent, opponent_team)?,
            turn: 0,
        })
    }

    pub fn player(&self) -> &Side {
        &self.player
    }

    pub fn opponent(&self) -> &Side {
        &self.opponent
    }

    pub fn side(&self, id: SideId) -> &Side {
        match id {
            SideId::Player => &self.player,
            SideId::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut Side {
        match id {
            SideId::Player => &mut self.player,
            SideId::Opponent => &mut self.opponent,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.player.all_fainted() || self.opponent.all_fainted()
    }

    /// Won iff the opponent is wiped and the player is not.
    pub fn player_won(&self) -> bool {
        self.opponent.all_fainted() && !self.player.all_fainted()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            None
        } else if self.player_won() {
            Some(Outcome::Victory)
        } else {
            Some(Outcome::Defeat)
        }
    }

    pub fn total_damage_dealt(&self) -> u32 {
        self.opponent.damage_taken()
    }

    pub fn key(&self) -> StateKey {
        StateKey::of(self)
    }
}

/// Canonical identity of a battle state: both HP vectors, both active
/// indices and the turn counter. PP is not part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    player_hp: [u16; MAX_TEAM_SIZE],
    opponent_hp: [u16; MAX_TEAM_SIZE],
    player_len: u8,
    opponent_len: u8,
    player_active: u8,
    opponent_active: u8,
    turn: u32,
}

impl StateKey {
    fn of(state: &BattleState) -> Self {
        Self {
            player_hp: state.player.hp,
            opponent_hp: state.opponent.hp,
            player_len: state.player.len() as u8,
            opponent_len: state.opponent.len() as u8,
            player_active: state.player.active as u8,
            opponent_active: state.opponent.active as u8,
            turn: state.turn,
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |hp: &[u16]| hp.iter().map(u16::to_string).collect::<Vec<_>>().join(",");
        write!(
            f,
            "P:{}|O:{}|PA:{}|OA:{}|T:{}",
            join(&self.player_hp[..self.player_len as usize]),
            join(&self.opponent_hp[..self.opponent_len as usize]),
            self.player_active,
            self.opponent_active,
            self.turn
        )
    }
}
