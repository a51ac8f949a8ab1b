//! Text rendering of an [`AppSnapshot`].

use std::fmt;

use rust_decimal::Decimal;
use shared::{
    domain::{Payer, Standing},
    protocol::{AddFriendFormSummary, AppSnapshot, FriendSummary, SplitFormSummary},
};

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn field(value: Option<Decimal>) -> String {
    value.map(amount).unwrap_or_default()
}

pub fn standing_line(name: &str, standing: Standing) -> String {
    match standing {
        Standing::UserOwes(owed) => format!("You owe {name} ${}.", amount(owed)),
        Standing::FriendOwes(owed) => format!("{name} owes you ${}.", amount(owed)),
        Standing::Even => format!("You and {name} are even."),
    }
}

fn render_friend(f: &mut fmt::Formatter<'_>, position: usize, summary: &FriendSummary) -> fmt::Result {
    let marker = if summary.selected { '>' } else { ' ' };
    let button = if summary.selected { "Close" } else { "Select" };
    let friend = &summary.friend;
    writeln!(
        f,
        "{marker} {position}. {name:<12} {line:<32} [{button}]",
        name = friend.name(),
        line = standing_line(friend.name(), summary.standing),
    )
}

fn render_add_friend_form(f: &mut fmt::Formatter<'_>, form: &AddFriendFormSummary) -> fmt::Result {
    if form.open {
        writeln!(f, "  -- Add friend --")?;
        writeln!(f, "  Friend name: {}", form.name)?;
        writeln!(f, "  Image URL:   {}", form.image_ref)?;
        writeln!(f, "  [Add]")?;
    }
    let toggle = if form.open { "Close Form" } else { "Add Friend" };
    writeln!(f, "  [{toggle}]")
}

fn render_split_form(f: &mut fmt::Formatter<'_>, form: &SplitFormSummary) -> fmt::Result {
    let name = &form.friend_name;
    let payer = match form.payer {
        Payer::User => "You",
        Payer::Friend => name.as_str(),
    };
    writeln!(f)?;
    writeln!(f, "Split a bill with {name}.")?;
    writeln!(f, "  Bill value:           {}", field(form.bill_total))?;
    writeln!(f, "  Your expense:         {}", field(form.paid_by_user))?;
    writeln!(f, "  {:<22}{}", format!("{name}'s expense:"), field(form.paid_by_friend))?;
    writeln!(f, "  Who is paying:        {payer}")?;
    if let Some(preview) = form.preview {
        writeln!(
            f,
            "  After split:          {}",
            standing_line(name, Standing::of(preview.projected_balance))
        )?;
    }
    writeln!(f, "  [Split bill]")
}

/// Text view of a snapshot.
pub struct View<'a>(pub &'a AppSnapshot);

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        if snapshot.friends.is_empty() {
            writeln!(f, "  (no friends yet)")?;
        }
        for (index, summary) in snapshot.friends.iter().enumerate() {
            render_friend(f, index + 1, summary)?;
        }
        render_add_friend_form(f, &snapshot.add_friend_form)?;
        if let Some(form) = &snapshot.split_form {
            render_split_form(f, form)?;
        }
        Ok(())
    }
}

pub fn render(snapshot: &AppSnapshot) -> String {
    View(snapshot).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{FriendsApp, DEFAULT_AVATAR_BASE};
    use shared::domain::FriendId;

    #[test]
    fn seed_friends_render_with_their_standing() {
        let view = render(&FriendsApp::with_seed(DEFAULT_AVATAR_BASE).snapshot());
        assert!(view.contains("You owe Clark $7."));
        assert!(view.contains("Sarah owes you $20."));
        assert!(view.contains("You and Anthony are even."));
        assert!(view.contains("[Add Friend]"));
        assert!(!view.contains("Split a bill"));
    }

    #[test]
    fn selected_friend_shows_close_and_split_form() {
        let mut app = FriendsApp::with_seed(DEFAULT_AVATAR_BASE);
        app.select_friend(FriendId::from_seed(933372)).expect("select");
        app.set_bill_total(Some(Decimal::new(10050, 2))).expect("bill");
        app.set_paid_by_user(Decimal::from(50)).expect("paid");

        let view = render(&app.snapshot());
        assert!(view.contains("[Close]"));
        assert!(view.contains("Split a bill with Sarah."));
        assert!(view.contains("Sarah's expense:"));
        assert!(view.contains("50.5"));
        assert!(view.contains("Who is paying:        You"));
    }

    #[test]
    fn maximal_bill_renders_without_projection() {
        let mut app = FriendsApp::with_seed(DEFAULT_AVATAR_BASE);
        app.select_friend(FriendId::from_seed(933372)).expect("select");
        app.set_bill_total(Some(Decimal::MAX)).expect("bill");

        let snapshot = app.snapshot();
        let view = render(&snapshot);
        assert!(view.contains(&format!("Bill value:           {}", Decimal::MAX)));
        assert!(!view.contains("After split:"));
        assert_eq!(view, format!("{}", View(&snapshot)));
    }

    #[test]
    fn open_add_form_changes_toggle_label() {
        let mut app = FriendsApp::new(Default::default(), DEFAULT_AVATAR_BASE);
        app.toggle_add_friend_form();
        let view = render(&app.snapshot());
        assert!(view.contains("(no friends yet)"));
        assert!(view.contains("Image URL:   https://i.pravatar.cc/48"));
        assert!(view.contains("[Close Form]"));
    }
}
