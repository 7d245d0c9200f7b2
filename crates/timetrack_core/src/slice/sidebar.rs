//! UI-only sidebar container. Never in the default persistence allow-list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    Toggle,
    SetCollapsed(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub collapsed: bool,
}

impl SidebarState {
    pub fn reduce(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Toggle => self.collapsed = !self.collapsed,
            SidebarAction::SetCollapsed(collapsed) => self.collapsed = collapsed,
        }
    }
}
