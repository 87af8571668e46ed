//! Preset boss trainers compiled from `data/trainers.ron`.

use crate::battle::state::SideId;
use crate::errors::{DataError, DataResult, TeamError};
use crate::move_data::{resolve_selected_moves, trainer_position, TRAINER_TABLE};
use crate::pokemon::Pokemon;
use schema::{Dvs, TrainerRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub team: Vec<Pokemon>,
}

/// Listing entry for a boss, without the built team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummary {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub team_size: usize,
}

impl From<&TrainerRecord> for TrainerSummary {
    fn from(record: &TrainerRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            team_size: record.team.len(),
        }
    }
}

/// Build a boss at full health. Every member gets perfect DVs.
pub fn boss_trainer(id: &str) -> DataResult<Trainer> {
    let record = trainer_position(&id.trim().to_lowercase())
        .and_then(|position| TRAINER_TABLE.get(position))
        .ok_or_else(|| DataError::TrainerNotFound(id.to_string()))?;

    let team = record
        .team
        .iter()
        .enumerate()
        .map(|(index, member)| {
            Pokemon::new(
                member.name.clone(),
                member.types.clone(),
                member.level,
                member.base_stats,
                Dvs::default(),
                resolve_selected_moves(&member.moves),
            )
            .map_err(|source| DataError::MalformedTrainer {
                trainer: record.id.clone(),
                source: TeamError::Member {
                    side: SideId::Opponent,
                    index,
                    source,
                },
            })
        })
        .collect::<DataResult<Vec<_>>>()?;

    tracing::debug!(trainer = %record.id, members = team.len(), "loaded boss trainer");
    Ok(Trainer {
        id: record.id.clone(),
        name: record.name.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        team,
    })
}

pub fn list_boss_trainers() -> Vec<TrainerSummary> {
    TRAINER_TABLE.iter().map(TrainerSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_lists_every_boss() {
        let ids: Vec<String> = list_boss_trainers().into_iter().map(|summary| summary.id).collect();
        assert_eq!(ids, vec!["blue", "giovanni", "lance"]);
    }

    #[rstest]
    #[case("blue")]
    #[case("Giovanni")]
    #[case(" lance ")]
    fn test_boss_teams_are_battle_ready(#[case] id: &str) {
        let trainer = boss_trainer(id).expect("boss exists");

        assert!(!trainer.team.is_empty() && trainer.team.len() <= 6);
        for member in &trainer.team {
            assert_eq!(member.current_hp, member.max_hp());
            assert!(member.move_count() >= 1);
            assert_eq!(member.dvs, Dvs::perfect());
        }
    }

    #[test]
    fn test_blue_leads_with_pidgeot() {
        let trainer = boss_trainer("blue").expect("boss exists");
        let lead = &trainer.team[0];

        assert_eq!(trainer.name, "Champion Blue");
        assert_eq!(lead.name, "Pidgeot");
        assert_eq!(lead.level, 61);
        assert_eq!(lead.move_at(0).map(|mv| mv.name.as_str()), Some("Wing Attack"));
    }

    #[test]
    fn test_unknown_boss() {
        assert_eq!(
            boss_trainer("brock"),
            Err(DataError::TrainerNotFound("brock".to_string()))
        );
    }
}
