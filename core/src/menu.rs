//! Collapsible menu state machine.
//!
//! ```text
//!            toggle
//!   Closed ─────────► Open
//!     ▲                 │ toggle | close | outside pointer-down | navigation
//!     └─────────────────┘
//! ```
//!
//! Every other event is a no-op. There is no terminal state.

use navspy_types::MenuState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    Close,
    PointerDown { inside_header: bool },
    NavigationSelected,
}

#[derive(Debug, Clone, Default)]
pub struct MenuStateMachine {
    state: MenuState,
}

impl MenuStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Apply `event`. Returns the new state when it changed.
    pub fn apply(&mut self, event: MenuEvent) -> Option<MenuState> {
        let next = match (self.state, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (
                MenuState::Open,
                MenuEvent::Toggle
                | MenuEvent::Close
                | MenuEvent::NavigationSelected
                | MenuEvent::PointerDown {
                    inside_header: false,
                },
            ) => MenuState::Closed,
            (state, event) => {
                tracing::trace!(?state, ?event, "Menu event ignored");
                return None;
            }
        };
        self.state = next;
        Some(next)
    }
}
