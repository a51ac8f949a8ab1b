use crossbeam_channel::Receiver;
use rust_decimal::Decimal;
use shared::{
    domain::{Friend, FriendId, Payer},
    error::LedgerError,
    protocol::{AppSnapshot, FriendSummary, SplitOutcome, StateChange, StateEvent},
};
use tracing::{debug, info};

pub mod add_friend_form;
pub mod events;
pub mod ledger;
pub mod selection;
pub mod split;

pub use add_friend_form::AddFriendForm;
pub use events::EventHub;
pub use ledger::{BalanceLedger, DEFAULT_AVATAR_BASE};
pub use selection::SelectionState;
pub use split::{calculate_split, FieldEdit, SplitForm, SplitInputs};

/// Owns the whole widget state. Every observable change is published to
/// subscribers as a [`StateEvent`] carrying a fresh [`AppSnapshot`].
#[derive(Debug)]
pub struct FriendsApp {
    ledger: BalanceLedger,
    selection: SelectionState,
    add_friend_form: AddFriendForm,
    split_form: Option<SplitForm>,
    avatar_base: String,
    events: EventHub,
    revision: u64,
}

impl FriendsApp {
    pub fn new(ledger: BalanceLedger, avatar_base: impl Into<String>) -> Self {
        let avatar_base = avatar_base.into();
        Self {
            ledger,
            selection: SelectionState::default(),
            add_friend_form: AddFriendForm::new(avatar_base.clone()),
            split_form: None,
            avatar_base,
            events: EventHub::default(),
            revision: 0,
        }
    }

    pub fn with_seed(avatar_base: impl Into<String>) -> Self {
        Self::new(BalanceLedger::seeded(), avatar_base)
    }

    pub fn subscribe(&mut self) -> Receiver<StateEvent> {
        self.events.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn avatar_base(&self) -> &str {
        &self.avatar_base
    }

    pub fn friends(&self) -> &[Friend] {
        self.ledger.list_friends()
    }

    pub fn friend(&self, id: FriendId) -> Result<&Friend, LedgerError> {
        self.ledger.get(id)
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection
            .current()
            .and_then(|id| self.ledger.get(id).ok())
    }

    pub fn add_friend_form(&self) -> &AddFriendForm {
        &self.add_friend_form
    }

    pub fn split_form(&self) -> Option<&SplitForm> {
        self.split_form.as_ref()
    }

    pub fn split_preview(&self) -> Option<SplitOutcome> {
        let form = self.split_form.as_ref()?;
        let friend = self.ledger.get(form.friend_id()).ok()?;
        calculate_split(form.inputs(), friend.balance())
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let friends = self
            .ledger
            .list_friends()
            .iter()
            .map(|friend| FriendSummary {
                friend: friend.clone(),
                standing: friend.standing(),
                selected: self.selection.is_selected(friend.id()),
            })
            .collect();
        let split_form = self.split_form.as_ref().and_then(|form| {
            self.ledger
                .get(form.friend_id())
                .ok()
                .map(|friend| form.summary(friend))
        });

        AppSnapshot {
            friends,
            selected: self.selection.current(),
            add_friend_form: self.add_friend_form.summary(),
            split_form,
        }
    }

    /// Strict entry point: empty fields come back as a validation error.
    pub fn add_friend(&mut self, name: &str, image_base: &str) -> Result<Friend, LedgerError> {
        let friend = self.ledger.add_friend(name, image_base)?;
        self.add_friend_form.close();
        self.reset_selection();
        self.publish(StateChange::FriendAdded {
            friend_id: friend.id(),
        });
        Ok(friend)
    }

    pub fn toggle_add_friend_form(&mut self) -> bool {
        let open = self.add_friend_form.toggle();
        self.publish(StateChange::AddFriendFormToggled { open });
        open
    }

    pub fn edit_friend_name(&mut self, name: impl Into<String>) {
        self.add_friend_form.set_name(name);
        self.publish(StateChange::AddFriendFormEdited);
    }

    pub fn edit_friend_image(&mut self, image_ref: impl Into<String>) {
        self.add_friend_form.set_image_ref(image_ref);
        self.publish(StateChange::AddFriendFormEdited);
    }

    /// Form submit: incomplete input is ignored and the fields are kept.
    pub fn submit_add_friend(&mut self) -> Option<Friend> {
        if !self.add_friend_form.is_complete() {
            debug!("add-friend submit ignored; form is incomplete");
            return None;
        }

        let name = self.add_friend_form.name().to_string();
        let image_base = self.add_friend_form.image_ref().to_string();
        let friend = self.ledger.add_friend(&name, &image_base).ok()?;
        self.add_friend_form.reset();
        self.add_friend_form.close();
        self.reset_selection();
        self.publish(StateChange::FriendAdded {
            friend_id: friend.id(),
        });
        Some(friend)
    }

    /// Toggles selection of `id`. Moving straight from one friend to another
    /// keeps the split inputs; the form starts empty after no selection.
    pub fn select_friend(&mut self, id: FriendId) -> Result<Option<FriendId>, LedgerError> {
        if !self.ledger.contains(id) {
            return Err(LedgerError::NotFound(id));
        }

        let selected = self.selection.select(id);
        self.split_form = match (selected, self.split_form.take()) {
            (Some(id), Some(mut form)) => {
                form.rebind(id);
                Some(form)
            }
            (Some(id), None) => Some(SplitForm::new(id)),
            (None, _) => None,
        };
        self.add_friend_form.close();
        self.publish(StateChange::SelectionChanged { selected });
        Ok(selected)
    }

    pub fn clear_selection(&mut self) {
        if self.selection.current().is_none() {
            return;
        }
        self.reset_selection();
        self.publish(StateChange::SelectionChanged { selected: None });
    }

    pub fn set_bill_total(&mut self, bill_total: Option<Decimal>) -> Result<FieldEdit, LedgerError> {
        let edit = self.split_form_mut()?.set_bill_total(bill_total)?;
        self.publish_split_edit(edit);
        Ok(edit)
    }

    pub fn set_paid_by_user(&mut self, paid_by_user: Decimal) -> Result<FieldEdit, LedgerError> {
        let edit = self.split_form_mut()?.set_paid_by_user(paid_by_user)?;
        self.publish_split_edit(edit);
        Ok(edit)
    }

    pub fn set_payer(&mut self, payer: Payer) -> Result<FieldEdit, LedgerError> {
        let edit = self.split_form_mut()?.set_payer(payer);
        self.publish_split_edit(edit);
        Ok(edit)
    }

    /// Applies the split to the selected friend's balance and closes the form.
    pub fn split_bill(&mut self) -> Result<SplitOutcome, LedgerError> {
        let form = self.split_form.as_ref().ok_or(LedgerError::NoSelection)?;
        let friend_id = form.friend_id();
        let outcome = form.commit_outcome(self.ledger.get(friend_id)?)?;

        self.ledger.adjust_balance(friend_id, outcome.balance_delta)?;
        self.reset_selection();
        info!(
            %friend_id,
            friend_share = %outcome.friend_share,
            balance_delta = %outcome.balance_delta,
            "bill split"
        );
        self.publish(StateChange::BillSplit { friend_id, outcome });
        Ok(outcome)
    }

    pub fn adjust_balance(&mut self, id: FriendId, delta: Decimal) -> Result<Decimal, LedgerError> {
        let balance = self.ledger.adjust_balance(id, delta)?;
        self.publish(StateChange::BalanceAdjusted {
            friend_id: id,
            balance,
        });
        Ok(balance)
    }

    fn split_form_mut(&mut self) -> Result<&mut SplitForm, LedgerError> {
        self.split_form.as_mut().ok_or(LedgerError::NoSelection)
    }

    fn reset_selection(&mut self) {
        self.selection.clear();
        self.split_form = None;
    }

    fn publish_split_edit(&mut self, edit: FieldEdit) {
        if edit == FieldEdit::Applied {
            self.publish(StateChange::SplitFormEdited);
        }
    }

    fn publish(&mut self, change: StateChange) {
        self.revision += 1;
        debug!(revision = self.revision, ?change, "state changed");
        if self.events.subscriber_count() == 0 {
            return;
        }
        let event = StateEvent {
            revision: self.revision,
            change,
            snapshot: self.snapshot(),
        };
        self.events.publish(&event);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
