//! Bill split inputs and the calculation derived from them.

use rust_decimal::Decimal;
use shared::{
    domain::{Friend, FriendId, Payer},
    error::LedgerError,
    protocol::{SplitFormSummary, SplitOutcome},
};
use tracing::debug;

/// Whether an edit at the form boundary took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Applied,
    Rejected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitInputs {
    pub bill_total: Option<Decimal>,
    pub paid_by_user: Option<Decimal>,
    pub payer: Payer,
}

impl SplitInputs {
    /// `bill_total - paid_by_user`, once a bill has been entered.
    pub fn paid_by_friend(&self) -> Option<Decimal> {
        self.bill_total?
            .checked_sub(self.paid_by_user.unwrap_or_default())
    }
}

/// `None` until a bill is entered, and also when the projected balance does
/// not fit in a `Decimal`.
pub fn calculate_split(inputs: &SplitInputs, selected_friend_balance: Decimal) -> Option<SplitOutcome> {
    let paid_by_user = inputs.paid_by_user.unwrap_or_default();
    let friend_share = inputs.paid_by_friend()?;
    let balance_delta = match inputs.payer {
        Payer::User => friend_share,
        Payer::Friend => -paid_by_user,
    };
    let projected_balance = selected_friend_balance.checked_add(balance_delta)?;

    Some(SplitOutcome {
        friend_share,
        balance_delta,
        projected_balance,
    })
}

/// Split form bound to one selected friend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitForm {
    friend_id: FriendId,
    inputs: SplitInputs,
}

impl SplitForm {
    pub fn new(friend_id: FriendId) -> Self {
        Self {
            friend_id,
            inputs: SplitInputs::default(),
        }
    }

    pub fn friend_id(&self) -> FriendId {
        self.friend_id
    }

    pub fn inputs(&self) -> &SplitInputs {
        &self.inputs
    }

    /// Points the form at another friend, keeping the entered amounts.
    pub fn rebind(&mut self, friend_id: FriendId) {
        self.friend_id = friend_id;
    }

    pub fn set_bill_total(&mut self, bill_total: Option<Decimal>) -> Result<FieldEdit, LedgerError> {
        if bill_total.is_some_and(|bill| bill < Decimal::ZERO) {
            return Err(LedgerError::validation("bill", "must not be negative"));
        }
        self.inputs.bill_total = bill_total;
        Ok(FieldEdit::Applied)
    }

    /// Rejects values above the current bill and keeps the previous value.
    pub fn set_paid_by_user(&mut self, paid_by_user: Decimal) -> Result<FieldEdit, LedgerError> {
        if paid_by_user < Decimal::ZERO {
            return Err(LedgerError::validation("expense", "must not be negative"));
        }
        if paid_by_user > self.inputs.bill_total.unwrap_or_default() {
            debug!(%paid_by_user, bill_total = ?self.inputs.bill_total, "expense edit rejected");
            return Ok(FieldEdit::Rejected);
        }
        self.inputs.paid_by_user = Some(paid_by_user);
        Ok(FieldEdit::Applied)
    }

    pub fn set_payer(&mut self, payer: Payer) -> FieldEdit {
        if self.inputs.payer == payer {
            return FieldEdit::Rejected;
        }
        self.inputs.payer = payer;
        FieldEdit::Applied
    }

    /// Outcome to apply on "Split bill", or why it cannot be applied yet.
    pub fn commit_outcome(&self, friend: &Friend) -> Result<SplitOutcome, LedgerError> {
        let bill_total = self
            .inputs
            .bill_total
            .ok_or(LedgerError::validation("bill", "must be entered"))?;
        if self.inputs.paid_by_user.unwrap_or_default() > bill_total {
            return Err(LedgerError::validation("expense", "exceeds the bill"));
        }
        calculate_split(&self.inputs, friend.balance())
            .ok_or(LedgerError::validation("balance", "out of range"))
    }

    pub fn summary(&self, friend: &Friend) -> SplitFormSummary {
        SplitFormSummary {
            friend_id: self.friend_id,
            friend_name: friend.name().to_string(),
            bill_total: self.inputs.bill_total,
            paid_by_user: self.inputs.paid_by_user,
            paid_by_friend: self.inputs.paid_by_friend(),
            payer: self.inputs.payer,
            preview: calculate_split(&self.inputs, friend.balance()),
        }
    }
}
