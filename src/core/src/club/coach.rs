use crate::shared::FullName;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoachingStyle {
    Possession,
    Counter,
    Pressing,
}

impl CoachingStyle {
    pub const ALL: [CoachingStyle; 3] = [
        CoachingStyle::Possession,
        CoachingStyle::Counter,
        CoachingStyle::Pressing,
    ];

    /// Pressing beats Possession, Possession beats Counter, Counter beats Pressing.
    pub fn beats(&self, other: CoachingStyle) -> bool {
        matches!(
            (self, other),
            (CoachingStyle::Pressing, CoachingStyle::Possession)
                | (CoachingStyle::Possession, CoachingStyle::Counter)
                | (CoachingStyle::Counter, CoachingStyle::Pressing)
        )
    }
}

impl Display for CoachingStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            CoachingStyle::Possession => "Possession",
            CoachingStyle::Counter => "Counter",
            CoachingStyle::Pressing => "Pressing",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub name: FullName,
    pub style: CoachingStyle,
    pub age: u8,
}

impl Coach {
    pub fn new(name: FullName, style: CoachingStyle, age: u8) -> Self {
        Coach { name, style, age }
    }
}
