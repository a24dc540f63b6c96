//! Staff-room shop purchases and consumable tool use.

use std::fmt;

use tracing::debug;

use super::*;
use crate::tuning::{MAX_SPEED_BOOSTS, REPELLENT_DURATION_TICKS, TRACKER_DURATION_TICKS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShopError {
    SessionOver,
    NotNearStaff,
    InsufficientEgo { cost: f32, available: f32 },
    NoCharges(ToolKind),
    MaxedOut(UpgradeKind),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionOver => write!(f, "the session is over"),
            Self::NotNearStaff => write!(f, "no staff member close enough to trade with"),
            Self::InsufficientEgo { cost, available } => {
                write!(f, "costs {cost:.0} ego but only {available:.0} is available")
            }
            Self::NoCharges(tool) => write!(f, "no {tool:?} charges left"),
            Self::MaxedOut(kind) => write!(f, "{} cannot be bought again", kind.name()),
        }
    }
}

impl std::error::Error for ShopError {}

impl Game {
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<(), ShopError> {
        if self.is_over() {
            return Err(ShopError::SessionOver);
        }
        if !self.is_near_staff() {
            return Err(ShopError::NotNearStaff);
        }
        if kind == UpgradeKind::SpeedBoost && self.state.player.speed_boosts >= MAX_SPEED_BOOSTS {
            return Err(ShopError::MaxedOut(kind));
        }
        let cost = kind.cost();
        let player = &mut self.state.player;
        if player.ego < cost {
            return Err(ShopError::InsufficientEgo { cost, available: player.ego });
        }

        player.ego -= cost;
        match kind.tool() {
            Some(tool) => *player.tool_charges_mut(tool) += 1,
            None => player.speed_boosts += 1,
        }
        self.log.push(LogEvent::UpgradePurchased { kind });
        debug!(?kind, ego_left = self.state.player.ego, "upgrade purchased");
        Ok(())
    }

    pub fn use_tool(&mut self, tool: ToolKind) -> Result<(), ShopError> {
        if self.is_over() {
            return Err(ShopError::SessionOver);
        }
        let charges = self.state.player.tool_charges_mut(tool);
        if *charges == 0 {
            return Err(ShopError::NoCharges(tool));
        }
        *charges -= 1;

        let effects = &mut self.state.effects;
        match tool {
            ToolKind::Assignment => {
                effects.repellent_until = Some(self.tick + REPELLENT_DURATION_TICKS);
            }
            ToolKind::GptTracker => {
                effects.tracker_until = Some(self.tick + TRACKER_DURATION_TICKS);
            }
        }
        self.log.push(LogEvent::ToolUsed { kind: tool });
        Ok(())
    }
}
