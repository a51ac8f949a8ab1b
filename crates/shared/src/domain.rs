use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(FriendId);

impl FriendId {
    /// Fixed id for the built-in seed friends.
    pub const fn from_seed(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

/// Who fronts the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

/// Three-way reading of a balance from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Standing {
    UserOwes(Decimal),
    FriendOwes(Decimal),
    Even,
}

impl Standing {
    pub fn of(balance: Decimal) -> Self {
        match balance.cmp(&Decimal::ZERO) {
            Ordering::Less => Standing::UserOwes(balance.abs()),
            Ordering::Greater => Standing::FriendOwes(balance),
            Ordering::Equal => Standing::Even,
        }
    }
}

/// A friend row in the ledger. Everything but the balance is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    id: FriendId,
    name: String,
    image_ref: String,
    balance: Decimal,
}

impl Friend {
    pub fn new(
        id: FriendId,
        name: impl Into<String>,
        image_ref: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
            balance,
        }
    }

    pub fn id(&self) -> FriendId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn standing(&self) -> Standing {
        Standing::of(self.balance)
    }

    /// Adds `delta` to the balance and returns the new value. The balance is
    /// left untouched when the sum does not fit.
    pub fn adjust_balance(&mut self, delta: Decimal) -> Result<Decimal, LedgerError> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::validation("balance", "out of range"))?;
        Ok(self.balance)
    }
}

/// Builds the avatar reference for a freshly created friend.
pub fn avatar_ref(base: &str, id: FriendId) -> String {
    format!("{base}?u={id}")
}
