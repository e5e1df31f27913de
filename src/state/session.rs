//! Session state machine: admin flag, pool selection, and the active tab.
//!
//! The session is an immutable value; every user action or load side effect
//! is an event applied through [`Session::apply`], which returns the next
//! session. Transitions consult the current pool list but never mutate it.

use uuid::Uuid;

use crate::state::pool::{Pool, PoolStatus};

/// Tabs the host UI can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Participant list and forms.
    #[default]
    Participants,
    /// Financial ledger and summary cards.
    Financial,
    /// AI bet-suggestion generator.
    Generator,
    /// Static FAQ content; the only useful view when no pool exists.
    Faq,
}

/// Which pool, if any, the session is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected: the collection is empty, or only closed pools exist
    /// for a non-admin viewer.
    None,
    /// Several active pools exist and the viewer has not picked one yet.
    /// Every tab except the prompt stays locked until they do.
    EntryPrompt,
    /// One pool is selected.
    Pool(Uuid),
}

/// Events that can be applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The initial remote load resolved; pick a starting selection.
    CollectionLoaded,
    /// The viewer explicitly picked a pool.
    PoolChosen(Uuid),
    /// A pool was just created; it becomes the selection.
    PoolCreated(Uuid),
    /// A pool was deleted. The pool list passed alongside no longer contains it.
    PoolDeleted(Uuid),
    /// Admin mode was unlocked.
    AdminEnabled,
    /// Admin mode was turned off.
    AdminDisabled,
    /// The viewer switched tabs.
    TabChanged(Tab),
}

/// Immutable snapshot of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    /// Whether mutation-capable admin mode is on.
    pub admin: bool,
    /// Current pool selection.
    pub selection: Selection,
    /// Currently active tab.
    pub tab: Tab,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::None
    }
}

impl Session {
    /// Id of the selected pool, if one is selected.
    pub fn selected_pool(&self) -> Option<Uuid> {
        match self.selection {
            Selection::Pool(id) => Some(id),
            _ => None,
        }
    }

    /// Whether tabs other than the entry prompt are usable.
    pub fn tabs_unlocked(&self) -> bool {
        !matches!(self.selection, Selection::EntryPrompt)
    }

    /// Apply an event and return the next session. `pools` is the collection
    /// content after the triggering mutation, in stored order.
    pub fn apply(self, event: SessionEvent, pools: &[Pool]) -> Session {
        match event {
            SessionEvent::CollectionLoaded => self.on_loaded(pools),
            SessionEvent::PoolChosen(id) => self.on_chosen(id, pools),
            SessionEvent::PoolCreated(id) => Session {
                selection: Selection::Pool(id),
                tab: Tab::Participants,
                ..self
            },
            SessionEvent::PoolDeleted(id) => self.on_deleted(id, pools),
            SessionEvent::AdminEnabled => self.on_admin_enabled(pools),
            SessionEvent::AdminDisabled => self.on_admin_disabled(pools),
            SessionEvent::TabChanged(tab) => {
                if self.tabs_unlocked() {
                    Session { tab, ..self }
                } else {
                    self
                }
            }
        }
    }

    fn on_loaded(self, pools: &[Pool]) -> Session {
        if pools.is_empty() {
            return Session {
                selection: Selection::None,
                tab: Tab::Faq,
                ..self
            };
        }

        let mut active = pools.iter().filter(|p| p.status == PoolStatus::Active);
        let selection = match (active.next(), active.next()) {
            (Some(only), None) => Selection::Pool(only.id),
            (Some(_), Some(_)) => Selection::EntryPrompt,
            // Only closed pools remain. Non-admins get no selection; admins
            // browse through the selector, which is also a no-selection start.
            (None, _) => Selection::None,
        };

        Session { selection, ..self }
    }

    fn on_chosen(self, id: Uuid, pools: &[Pool]) -> Session {
        let Some(pool) = pools.iter().find(|p| p.id == id) else {
            // Stale target; keep the current session untouched.
            return self;
        };
        if !self.admin && pool.status == PoolStatus::Closed {
            return self;
        }
        let tab = if self.tabs_unlocked() {
            self.tab
        } else {
            Tab::Participants
        };
        Session {
            selection: Selection::Pool(id),
            tab,
            ..self
        }
    }

    fn on_deleted(self, id: Uuid, pools: &[Pool]) -> Session {
        if self.selection != Selection::Pool(id) {
            return self;
        }
        let selection = pools
            .first()
            .map(|p| Selection::Pool(p.id))
            .unwrap_or(Selection::None);
        Session { selection, ..self }
    }

    fn on_admin_enabled(self, pools: &[Pool]) -> Session {
        let selection = match self.selection {
            Selection::None => pools
                .first()
                .map(|p| Selection::Pool(p.id))
                .unwrap_or(Selection::None),
            other => other,
        };
        Session {
            admin: true,
            selection,
            ..self
        }
    }

    fn on_admin_disabled(self, pools: &[Pool]) -> Session {
        let selection = match self.selection {
            Selection::Pool(id)
                if pools
                    .iter()
                    .find(|p| p.id == id)
                    .is_none_or(|p| p.status == PoolStatus::Closed) =>
            {
                pools
                    .iter()
                    .find(|p| p.status == PoolStatus::Active)
                    .map(|p| Selection::Pool(p.id))
                    .unwrap_or(Selection::None)
            }
            other => other,
        };
        Session {
            admin: false,
            selection,
            ..self
        }
    }
}
