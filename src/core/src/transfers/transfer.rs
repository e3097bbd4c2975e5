use crate::club::{ClubId, Player, PlayerId};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Permanent,
    Free,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTransfer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub from_club_id: Option<ClubId>,
    pub from_club_name: String,
    pub to_club_id: ClubId,
    pub to_club_name: String,
    pub fee: i64,
    pub transfer_type: TransferType,
    pub season_year: i32,
}

impl Display for CompletedTransfer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.transfer_type {
            TransferType::Free => write!(f, "{} signs for {} as a free agent", self.player_name, self.to_club_name),
            _ => write!(
                f,
                "{}: {} -> {} for {}",
                self.player_name, self.from_club_name, self.to_club_name, self.fee
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDealReason {
    NoTarget,
    InsufficientFunds,
    RosterFull,
    SalaryCap,
    SellerSquadTooSmall,
    NoClubAvailable,
}

impl Display for NoDealReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoDealReason::NoTarget => "no suitable target",
            NoDealReason::InsufficientFunds => "insufficient funds",
            NoDealReason::RosterFull => "roster full",
            NoDealReason::SalaryCap => "over the salary cap",
            NoDealReason::SellerSquadTooSmall => "seller squad too small",
            NoDealReason::NoClubAvailable => "no club available",
        };
        f.write_str(text)
    }
}

/// A transaction that was considered and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoDeal {
    pub club_id: Option<ClubId>,
    pub player_id: Option<PlayerId>,
    pub reason: NoDealReason,
}

impl NoDeal {
    pub fn new(club_id: Option<ClubId>, player_id: Option<PlayerId>, reason: NoDealReason) -> Self {
        NoDeal {
            club_id,
            player_id,
            reason,
        }
    }
}

/// A roster move decided during the collection phase, applied afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingMove {
    Purchase {
        player_id: PlayerId,
        from: ClubId,
        to: ClubId,
        fee: i64,
        transfer_type: TransferType,
    },
    Signing {
        player: Player,
        to: ClubId,
    },
}
