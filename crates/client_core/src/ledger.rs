//! Ordered friend list with signed running balances.

use rust_decimal::Decimal;
use shared::{
    domain::{avatar_ref, Friend, FriendId},
    error::LedgerError,
};
use tracing::info;

pub const DEFAULT_AVATAR_BASE: &str = "https://i.pravatar.cc/48";

const SEED_FRIENDS: [(u128, &str, i64); 3] = [
    (118836, "Clark", -7),
    (933372, "Sarah", 20),
    (499476, "Anthony", 0),
];

#[derive(Debug, Clone, Default)]
pub struct BalanceLedger {
    friends: Vec<Friend>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding the three built-in friends.
    pub fn seeded() -> Self {
        let friends = SEED_FRIENDS
            .iter()
            .map(|&(seed, name, balance)| {
                Friend::new(
                    FriendId::from_seed(seed),
                    name,
                    format!("{DEFAULT_AVATAR_BASE}?u={seed}"),
                    Decimal::from(balance),
                )
            })
            .collect();
        Self { friends }
    }

    pub fn add_friend(&mut self, name: &str, image_base: &str) -> Result<Friend, LedgerError> {
        let name = name.trim();
        let image_base = image_base.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("name", "must not be empty"));
        }
        if image_base.is_empty() {
            return Err(LedgerError::validation("image", "must not be empty"));
        }

        let mut id = FriendId::generate();
        while self.contains(id) {
            id = FriendId::generate();
        }

        let friend = Friend::new(id, name, avatar_ref(image_base, id), Decimal::ZERO);
        self.friends.push(friend.clone());
        info!(friend_id = %id, name, "friend added");
        Ok(friend)
    }

    pub fn list_friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn get(&self, id: FriendId) -> Result<&Friend, LedgerError> {
        self.friends
            .iter()
            .find(|friend| friend.id() == id)
            .ok_or(LedgerError::NotFound(id))
    }

    pub fn contains(&self, id: FriendId) -> bool {
        self.friends.iter().any(|friend| friend.id() == id)
    }

    pub fn adjust_balance(&mut self, id: FriendId, delta: Decimal) -> Result<Decimal, LedgerError> {
        let friend = self
            .friends
            .iter_mut()
            .find(|friend| friend.id() == id)
            .ok_or(LedgerError::NotFound(id))?;
        let balance = friend.adjust_balance(delta)?;
        info!(friend_id = %id, %delta, %balance, "balance adjusted");
        Ok(balance)
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Standing;

    #[test]
    fn seeded_ledger_keeps_display_order() {
        let ledger = BalanceLedger::seeded();
        let names: Vec<_> = ledger.list_friends().iter().map(Friend::name).collect();
        assert_eq!(names, ["Clark", "Sarah", "Anthony"]);
        assert_eq!(
            ledger.list_friends()[0].image_ref(),
            "https://i.pravatar.cc/48?u=118836"
        );
    }

    #[test]
    fn add_friend_appends_with_zero_balance() {
        let mut ledger = BalanceLedger::seeded();
        let before: Vec<_> = ledger.list_friends().iter().map(Friend::id).collect();

        let friend = ledger
            .add_friend("Dana", DEFAULT_AVATAR_BASE)
            .expect("add friend");

        assert_eq!(friend.balance(), Decimal::ZERO);
        assert_eq!(friend.standing(), Standing::Even);
        assert!(!before.contains(&friend.id()));
        assert_eq!(ledger.len(), before.len() + 1);
        assert_eq!(ledger.list_friends().last(), Some(&friend));
        assert_eq!(
            friend.image_ref(),
            format!("{DEFAULT_AVATAR_BASE}?u={}", friend.id())
        );
    }

    #[test]
    fn add_friend_rejects_empty_fields() {
        let mut ledger = BalanceLedger::seeded();

        assert_eq!(
            ledger.add_friend("", DEFAULT_AVATAR_BASE),
            Err(LedgerError::validation("name", "must not be empty"))
        );
        assert_eq!(
            ledger.add_friend("Dana", "   "),
            Err(LedgerError::validation("image", "must not be empty"))
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn adjust_balance_accumulates() {
        let mut ledger = BalanceLedger::seeded();
        let clark = FriendId::from_seed(118836);

        assert_eq!(
            ledger.adjust_balance(clark, Decimal::from(60)),
            Ok(Decimal::from(53))
        );
        assert_eq!(
            ledger.adjust_balance(clark, Decimal::from(-53)),
            Ok(Decimal::ZERO)
        );
        assert_eq!(ledger.get(clark).map(Friend::balance), Ok(Decimal::ZERO));
    }

    #[test]
    fn overflowing_adjustment_is_rejected() {
        let mut ledger = BalanceLedger::seeded();
        let sarah = FriendId::from_seed(933372);

        assert_eq!(
            ledger.adjust_balance(sarah, Decimal::MAX),
            Err(LedgerError::validation("balance", "out of range"))
        );
        assert_eq!(ledger.get(sarah).map(Friend::balance), Ok(Decimal::from(20)));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut ledger = BalanceLedger::new();
        let id = FriendId::from_seed(1);

        assert!(ledger.is_empty());
        assert_eq!(
            ledger.adjust_balance(id, Decimal::ONE),
            Err(LedgerError::NotFound(id))
        );
        assert_eq!(ledger.get(id).err(), Some(LedgerError::NotFound(id)));
    }
}
