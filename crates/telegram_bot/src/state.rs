//! Per-chat conversation state.
//!
//! Every chat owns a `Session`: the current dialogue state plus the scratch
//! values collected so far. Sessions live behind their own mutex; a handler
//! locks the chat's session for its whole run, so events from one chat are
//! applied strictly in arrival order while other chats stay unblocked.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use engine::Period;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::texts::Language;

/// The discrete dialogue states, grouped by flow. `Start` is the rest state
/// every flow begins from and returns to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ChatState {
    #[default]
    Start,
    // registration
    RegWaitingLanguage,
    RegWaitingCurrency,
    RegWaitingCategories,
    // add expense
    AddEnteringAmount,
    AddEnteringName,
    AddSelectingCategory,
    AddConfirmingExpense,
    // settings
    SettingsMenu,
    CategorySettingsMenu,
    AddingCategories,
    RemovingCategory,
    ChangingCurrency,
    ChangingLanguage,
    // statistics
    StatsChoosingPeriod,
    StatsEnteringStartDate,
    StatsEnteringEndDate,
    StatsSelectingCategories,
    StatsViewingPages,
}

/// Scratch values collected over a dialogue. Each flow touches only its own
/// fields and clears them on the way out through `SafeExit`.
#[derive(Clone, Debug, Default)]
pub(crate) struct SessionData {
    // registration
    pub reg_language: Option<Language>,
    pub reg_currency: Option<String>,
    pub reg_categories: Vec<String>,
    // add expense
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub expense_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    // settings
    pub new_categories: Vec<String>,
    // statistics
    pub period: Option<Period>,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    pub selected_categories: Vec<(i64, String)>,
    pub stats_pages: Vec<String>,
    // category picker pager (shared by one flow at a time)
    pub categories: Vec<(String, i64)>,
    pub current_page: usize,
    pub last_page: usize,
    pub pager_message_id: Option<MessageId>,
    // statistics pages pager
    pub stats_current_page: usize,
    pub stats_last_page: usize,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Session {
    pub state: ChatState,
    pub data: SessionData,
}

/// Per-flow recovery: drop the flow's scratch data and put the conversation
/// back into the rest state. Invoking it twice is the same as invoking it
/// once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SafeExit {
    Registration,
    AddExpense,
    Settings,
    Statistics,
}

impl SafeExit {
    /// The flow that owns a given state, if any.
    pub(crate) fn for_state(state: ChatState) -> Option<SafeExit> {
        match state {
            ChatState::Start => None,
            ChatState::RegWaitingLanguage
            | ChatState::RegWaitingCurrency
            | ChatState::RegWaitingCategories => Some(SafeExit::Registration),
            ChatState::AddEnteringAmount
            | ChatState::AddEnteringName
            | ChatState::AddSelectingCategory
            | ChatState::AddConfirmingExpense => Some(SafeExit::AddExpense),
            ChatState::SettingsMenu
            | ChatState::CategorySettingsMenu
            | ChatState::AddingCategories
            | ChatState::RemovingCategory
            | ChatState::ChangingCurrency
            | ChatState::ChangingLanguage => Some(SafeExit::Settings),
            ChatState::StatsChoosingPeriod
            | ChatState::StatsEnteringStartDate
            | ChatState::StatsEnteringEndDate
            | ChatState::StatsSelectingCategories
            | ChatState::StatsViewingPages => Some(SafeExit::Statistics),
        }
    }

    pub(crate) fn invoke(&self, session: &mut Session) {
        let data = &mut session.data;
        match self {
            SafeExit::Registration => {
                data.reg_language = None;
                data.reg_currency = None;
                data.reg_categories.clear();
            }
            SafeExit::AddExpense => {
                data.currency = None;
                data.amount = None;
                data.expense_name = None;
                data.category_id = None;
                data.category_name = None;
                Self::clear_pager(data);
            }
            SafeExit::Settings => {
                data.new_categories.clear();
                Self::clear_pager(data);
            }
            SafeExit::Statistics => {
                data.period = None;
                data.custom_start = None;
                data.custom_end = None;
                data.selected_categories.clear();
                data.stats_pages.clear();
                data.stats_current_page = 0;
                data.stats_last_page = 0;
                Self::clear_pager(data);
            }
        }
        session.state = ChatState::Start;
    }

    fn clear_pager(data: &mut SessionData) {
        data.categories.clear();
        data.current_page = 0;
        data.last_page = 0;
        data.pager_message_id = None;
    }
}

#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<Mutex<HashMap<ChatId, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    /// Lock the session of one chat for the duration of a handler. The outer
    /// map lock is held only long enough to fetch the chat's own mutex.
    pub(crate) async fn lock(&self, chat_id: ChatId) -> OwnedMutexGuard<Session> {
        let cell = {
            let mut guard = self.inner.lock().await;
            guard.entry(chat_id).or_default().clone()
        };
        cell.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_statistics_session() -> Session {
        let mut session = Session::default();
        session.state = ChatState::StatsSelectingCategories;
        session.data.period = Some(Period::Week);
        session.data.selected_categories = vec![(3, "Food".to_string())];
        session.data.categories = vec![("Food".to_string(), 3)];
        session.data.current_page = 1;
        session.data.last_page = 2;
        session
    }

    #[test]
    fn safe_exit_clears_flow_and_resets_state() {
        let mut session = mid_statistics_session();
        SafeExit::Statistics.invoke(&mut session);

        assert_eq!(session.state, ChatState::Start);
        assert!(session.data.period.is_none());
        assert!(session.data.selected_categories.is_empty());
        assert_eq!(session.data.current_page, 0);
    }

    #[test]
    fn safe_exit_is_idempotent() {
        let mut session = mid_statistics_session();
        SafeExit::Statistics.invoke(&mut session);
        let after_first = session.clone();
        SafeExit::Statistics.invoke(&mut session);

        assert_eq!(session.state, after_first.state);
        assert_eq!(
            session.data.selected_categories,
            after_first.data.selected_categories
        );
    }

    #[test]
    fn safe_exit_leaves_other_flows_alone() {
        let mut session = Session::default();
        session.state = ChatState::AddConfirmingExpense;
        session.data.amount = Some(12.5);
        session.data.reg_categories = vec!["Food".to_string()];

        SafeExit::AddExpense.invoke(&mut session);
        assert!(session.data.amount.is_none());
        assert_eq!(session.data.reg_categories, vec!["Food".to_string()]);
    }

    #[test]
    fn every_flow_state_has_an_owner() {
        for state in [
            ChatState::RegWaitingLanguage,
            ChatState::AddEnteringAmount,
            ChatState::SettingsMenu,
            ChatState::StatsViewingPages,
        ] {
            assert!(SafeExit::for_state(state).is_some());
        }
        assert!(SafeExit::for_state(ChatState::Start).is_none());
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_chat() {
        let store = SessionStore::default();
        {
            let mut a = store.lock(ChatId(1)).await;
            a.state = ChatState::AddEnteringAmount;
        }
        let b = store.lock(ChatId(2)).await;
        assert_eq!(b.state, ChatState::Start);

        let a = store.lock(ChatId(1)).await;
        assert_eq!(a.state, ChatState::AddEnteringAmount);
    }
}
