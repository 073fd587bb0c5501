//! The add-expense form and its in-flight flag.

use std::rc::Rc;

use yew::Reducible;

use crate::model::ExpenseForm;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseDraft {
    pub form: ExpenseForm,
    /// An add request is outstanding.
    pub saving: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DraftAction {
    Edit(ExpenseForm),
    /// A validated add request was sent.
    Start,
    /// The backend stored the expense.
    Added,
    Failed,
}

impl ExpenseDraft {
    pub fn apply(&self, action: DraftAction) -> Self {
        match action {
            DraftAction::Edit(form) => Self {
                form,
                saving: self.saving,
            },
            DraftAction::Start => Self {
                form: self.form.clone(),
                saving: true,
            },
            DraftAction::Added => Self::default(),
            DraftAction::Failed => Self {
                form: self.form.clone(),
                saving: false,
            },
        }
    }
}

impl Reducible for ExpenseDraft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}
