//! Newtype wrappers and small enums shared by the graph, agents and walker.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the two sides of an n-wins game.
///
/// The numeric codes match the `acting_side` column of value artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameSide {
    SideA,
    SideB,
}

impl GameSide {
    /// The side that moves after this one.
    pub fn opponent(self) -> Self {
        match self {
            GameSide::SideA => GameSide::SideB,
            GameSide::SideB => GameSide::SideA,
        }
    }

    /// Numeric code as written in value artifacts.
    pub fn code(self) -> u8 {
        match self {
            GameSide::SideA => 1,
            GameSide::SideB => 2,
        }
    }
}

impl TryFrom<u8> for GameSide {
    type Error = crate::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(GameSide::SideA),
            2 => Ok(GameSide::SideB),
            _ => Err(crate::Error::InvalidSide { code }),
        }
    }
}

impl fmt::Display for GameSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameSide::SideA => "side A",
            GameSide::SideB => "side B",
        };
        f.write_str(label)
    }
}

/// The column a move drops its stone into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(u32);

impl Action {
    pub fn new(column: u32) -> Self {
        Action(column)
    }

    /// Get the column index.
    pub fn column(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Action {
    fn from(column: u32) -> Self {
        Action(column)
    }
}

impl From<Action> for u32 {
    fn from(action: Action) -> Self {
        action.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Learning algorithm that produced a value artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AgentKind {
    #[default]
    SimpleQl,
    DoubleQl,
    DynaQl,
    SarsaLambda,
}

impl AgentKind {
    /// Numeric agent type code used by the trained-model store.
    pub fn code(self) -> u8 {
        match self {
            AgentKind::SimpleQl => 1,
            AgentKind::DoubleQl => 2,
            AgentKind::DynaQl => 3,
            AgentKind::SarsaLambda => 4,
        }
    }

    /// Name used by the training tooling, e.g. `SimpleQL`.
    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::SimpleQl => "SimpleQL",
            AgentKind::DoubleQl => "DoubleQL",
            AgentKind::DynaQl => "DynaQL",
            AgentKind::SarsaLambda => "SarsaLambda",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AgentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "simple-ql" | "simpleql" | "1" => Ok(AgentKind::SimpleQl),
            "double-ql" | "doubleql" | "2" => Ok(AgentKind::DoubleQl),
            "dyna-ql" | "dynaql" | "3" => Ok(AgentKind::DynaQl),
            "sarsa-lambda" | "sarsalambda" | "4" => Ok(AgentKind::SarsaLambda),
            _ => Err(crate::Error::ParseAgentKind {
                input: s.to_string(),
                expected: "simple-ql, double-ql, dyna-ql, sarsa-lambda".to_string(),
            }),
        }
    }
}

/// Which trained agent is playing which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub kind: AgentKind,
    pub side: GameSide,
}

impl AgentIdentity {
    pub fn new(kind: AgentKind, side: GameSide) -> Self {
        Self { kind, side }
    }
}

impl fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_codes_round_trip() {
        for side in [GameSide::SideA, GameSide::SideB] {
            assert_eq!(GameSide::try_from(side.code()).unwrap(), side);
        }
        assert!(GameSide::try_from(0).is_err());
        assert!(GameSide::try_from(3).is_err());
    }

    #[test]
    fn opponent_flips_side() {
        assert_eq!(GameSide::SideA.opponent(), GameSide::SideB);
        assert_eq!(GameSide::SideB.opponent().opponent(), GameSide::SideB);
    }

    #[test]
    fn agent_kind_accepts_training_names() {
        assert_eq!("SimpleQL".parse::<AgentKind>().unwrap(), AgentKind::SimpleQl);
        assert_eq!("double-ql".parse::<AgentKind>().unwrap(), AgentKind::DoubleQl);
        assert_eq!("sarsa_lambda".parse::<AgentKind>().unwrap(), AgentKind::SarsaLambda);
        assert_eq!("3".parse::<AgentKind>().unwrap(), AgentKind::DynaQl);
        assert!("montecarlo".parse::<AgentKind>().is_err());
    }

    #[test]
    fn agent_kind_codes_match_model_store() {
        let codes: Vec<u8> = [
            AgentKind::SimpleQl,
            AgentKind::DoubleQl,
            AgentKind::DynaQl,
            AgentKind::SarsaLambda,
        ]
        .iter()
        .map(|kind| kind.code())
        .collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn identity_display_names_kind_and_side() {
        let id = AgentIdentity::new(AgentKind::DynaQl, GameSide::SideB);
        assert_eq!(id.to_string(), "DynaQL (side B)");
    }
}
