//! Activation-time target checks.

use crate::core::action::Targets;
use crate::core::entity::InstanceId;
use crate::core::error::ActivationBlock;
use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::zones::{Location, ZoneKind};

use super::effect::{Effect, SummonSource, TargetRule};

/// Where a summon source pile is.
#[must_use]
pub fn source_location(source: SummonSource) -> Location {
    match source {
        SummonSource::Hand => Location::Hand,
        SummonSource::Graveyard => Location::Graveyard,
        SummonSource::Deck => Location::Deck,
    }
}

/// Check the targets chosen for an effect activated by `controller` from
/// the card `source`.
pub fn validate_targets(
    state: &MatchState,
    controller: PlayerId,
    source: InstanceId,
    effect: Option<Effect>,
    targets: &Targets,
) -> Result<(), ActivationBlock> {
    let rule = effect.map_or(TargetRule::None, Effect::target_rule);

    match rule {
        TargetRule::None => {
            if !targets.is_empty() {
                return Err(ActivationBlock::UnexpectedTargets);
            }
        }
        TargetRule::FieldCards { max } => {
            if targets.is_empty() {
                return Err(ActivationBlock::MissingTargets);
            }
            if targets.len() > max as usize {
                return Err(ActivationBlock::UnexpectedTargets);
            }
            for (i, &target) in targets.iter().enumerate() {
                if target == source || targets[..i].contains(&target) {
                    return Err(ActivationBlock::InvalidTarget(target));
                }
                match state.locate(target) {
                    Some((_, loc)) if loc.is_field() => {}
                    _ => return Err(ActivationBlock::InvalidTarget(target)),
                }
            }
        }
        TargetRule::OwnMonsterIn(from) => {
            let side = state.participant(controller);
            if side.first_empty(ZoneKind::Monster).is_none() {
                return Err(ActivationBlock::NoFreeZone);
            }
            match targets.as_slice() {
                [] => {}
                [target] => {
                    let ok = side.card(*target).is_some_and(|c| {
                        c.location == source_location(from) && c.definition.is_monster() && c.id != source
                    });
                    if !ok {
                        return Err(ActivationBlock::InvalidTarget(*target));
                    }
                }
                _ => return Err(ActivationBlock::UnexpectedTargets),
            }
        }
    }
    Ok(())
}
