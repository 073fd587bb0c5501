//! The expense collection shown on the dashboard.
//!
//! Every change arrives as a [LedgerAction] built from a successful backend
//! response, and is applied to the latest state in the order responses
//! complete.

use std::{cell::Cell, rc::Rc};

use yew::Reducible;

use crate::model::Expense;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub expenses: Vec<Expense>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LedgerAction {
    /// A fetch finished: the list replaces whatever was shown.
    Replace(Vec<Expense>),
    /// Records created by an add or a scan.
    Append(Vec<Expense>),
    /// The backend confirmed the deletion of this id.
    Remove(String),
    /// The backend confirmed a bulk delete.
    Clear,
}

impl Ledger {
    pub fn apply(&self, action: LedgerAction) -> Self {
        let expenses = match action {
            LedgerAction::Replace(expenses) => expenses,
            LedgerAction::Append(created) => {
                let mut next = self.expenses.clone();
                next.extend(created);
                next
            }
            LedgerAction::Remove(id) => self
                .expenses
                .iter()
                .filter(|expense| expense.id != id)
                .cloned()
                .collect(),
            LedgerAction::Clear => Vec::new(),
        };

        Self { expenses }
    }
}

impl Reducible for Ledger {
    type Action = LedgerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Marks a fetch as the latest one until it is retired by a newer fetch.
///
/// Clones share the same flag, so the copy moved into the request future
/// sees the retirement done by the effect destructor.
#[derive(Clone, Debug)]
pub struct FetchTicket(Rc<Cell<bool>>);

impl FetchTicket {
    pub fn issue() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn retire(&self) {
        self.0.set(false);
    }

    pub fn is_current(&self) -> bool {
        self.0.get()
    }

    /// The action for a list received under this ticket, or `None` when a
    /// newer fetch has been issued since.
    pub fn replace(&self, expenses: Vec<Expense>) -> Option<LedgerAction> {
        self.is_current().then(|| LedgerAction::Replace(expenses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, category: &str, amount: f64) -> Expense {
        Expense {
            id: id.to_string(),
            category: category.to_string(),
            amount: Some(amount),
        }
    }

    fn ids(ledger: &Ledger) -> Vec<&str> {
        ledger.expenses.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn replace_discards_previous_list() {
        let ledger = Ledger {
            expenses: vec![expense("a", "Food", 1.0), expense("b", "Rent", 2.0)],
        };

        let next = ledger.apply(LedgerAction::Replace(vec![expense("c", "Fuel", 3.0)]));

        assert_eq!(ids(&next), ["c"]);
    }

    #[test]
    fn append_keeps_order_and_adds_exactly_the_new_records() {
        let ledger = Ledger {
            expenses: vec![expense("a", "Food", 1.0)],
        };
        let created = expense("b", "Coffee", 4.5);

        let next = ledger.apply(LedgerAction::Append(vec![created.clone()]));

        assert_eq!(ids(&next), ["a", "b"]);
        assert_eq!(next.expenses[1], created);
    }

    #[test]
    fn remove_only_drops_matching_id() {
        let ledger = Ledger {
            expenses: vec![
                expense("a", "Food", 1.0),
                expense("b", "Food", 1.0),
                expense("c", "Food", 1.0),
            ],
        };

        let next = ledger.apply(LedgerAction::Remove("b".to_string()));

        assert_eq!(ids(&next), ["a", "c"]);
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let ledger = Ledger {
            expenses: vec![expense("a", "Food", 1.0)],
        };

        assert_eq!(ledger.apply(LedgerAction::Remove("zzz".to_string())), ledger);
    }

    #[test]
    fn clear_empties_the_list() {
        let ledger = Ledger {
            expenses: vec![expense("a", "Food", 1.0)],
        };

        assert!(ledger.apply(LedgerAction::Clear).expenses.is_empty());
    }

    #[test]
    fn reducer_applies_to_latest_state() {
        let ledger = Rc::new(Ledger::default());

        let ledger = ledger.reduce(LedgerAction::Append(vec![expense("a", "Food", 1.0)]));
        let ledger = ledger.reduce(LedgerAction::Append(vec![expense("b", "Food", 2.0)]));

        assert_eq!(ids(&ledger), ["a", "b"]);
    }

    #[test]
    fn current_fetch_replaces_list() {
        let ticket = FetchTicket::issue();

        let action = ticket.replace(vec![expense("a", "Food", 1.0)]);

        assert_eq!(action, Some(LedgerAction::Replace(vec![expense("a", "Food", 1.0)])));
    }

    #[test]
    fn retired_fetch_is_dropped() {
        let ticket = FetchTicket::issue();
        let in_flight = ticket.clone();

        ticket.retire();

        assert!(!in_flight.is_current());
        assert_eq!(in_flight.replace(vec![expense("a", "Food", 1.0)]), None);
    }

    #[test]
    fn only_latest_of_two_fetches_lands() {
        let ledger = Ledger {
            expenses: vec![expense("old", "Rent", 9.0)],
        };
        let monthly = FetchTicket::issue();
        let weekly = {
            monthly.retire();
            FetchTicket::issue()
        };

        // The weekly response arrives first, the stale monthly one after it.
        let ledger = weekly
            .replace(vec![expense("w", "Food", 1.0)])
            .map_or(ledger.clone(), |action| ledger.apply(action));
        let ledger = monthly
            .replace(vec![expense("m", "Taxi", 2.0)])
            .map_or(ledger.clone(), |action| ledger.apply(action));

        assert_eq!(ids(&ledger), ["w"]);
    }
}
