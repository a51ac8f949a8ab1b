use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Friend, FriendId, Payer, Standing};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendSummary {
    #[serde(flatten)]
    pub friend: Friend,
    pub standing: Standing,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFriendFormSummary {
    pub open: bool,
    pub name: String,
    pub image_ref: String,
}

/// Result of running the split calculation over the current form values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub friend_share: Decimal,
    pub balance_delta: Decimal,
    pub projected_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitFormSummary {
    pub friend_id: FriendId,
    pub friend_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by_user: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_by_friend: Option<Decimal>,
    pub payer: Payer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<SplitOutcome>,
}

/// Owned copy of everything the view draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub friends: Vec<FriendSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<FriendId>,
    pub add_friend_form: AddFriendFormSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_form: Option<SplitFormSummary>,
}

impl AppSnapshot {
    pub fn friend(&self, id: FriendId) -> Option<&FriendSummary> {
        self.friends.iter().find(|summary| summary.friend.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StateChange {
    FriendAdded {
        friend_id: FriendId,
    },
    BalanceAdjusted {
        friend_id: FriendId,
        balance: Decimal,
    },
    SelectionChanged {
        #[serde(default)]
        selected: Option<FriendId>,
    },
    AddFriendFormToggled {
        open: bool,
    },
    AddFriendFormEdited,
    SplitFormEdited,
    BillSplit {
        friend_id: FriendId,
        outcome: SplitOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEvent {
    pub revision: u64,
    pub change: StateChange,
    pub snapshot: AppSnapshot,
}
