//! Action overflow resolution
//!
//! Normalizes an actions configuration into per-row resolved actions and
//! lays them out as inline controls plus an optional overflow menu. Named
//! slots resolve in fixed priority order (view, edit, toggle, delete),
//! followed by custom entries in array order. Every resolved action counts
//! toward the overflow threshold, including custom entries that bring
//! their own render function.

use std::sync::Arc;
use tracing::trace;

/// Maximum number of actions that can render inline without a menu.
pub const MAX_ACTIONS: usize = 4;

/// Number of inline actions kept when the overflow menu appears.
pub const VISIBLE_ACTIONS: usize = 3;

/// Per-row side-effecting callback supplied by the dispatch collaborator.
pub type RowCallback<R> = Arc<dyn Fn(&R)>;

/// Reads a boolean off a record, e.g. an active/inactive flag.
pub type RowPredicate<R> = Arc<dyn Fn(&R) -> bool>;

/// Fully custom control rendering, bypassing the standard label+icon form.
pub type CustomRenderFn<R> = Arc<dyn Fn(&R) -> String>;

/// A plain named action slot (view, edit).
pub struct ActionSlot<R> {
    pub label: String,
    pub icon: String,
    pub on_activate: Option<RowCallback<R>>,
}

/// Toggle slot: the icon tracks the row's current boolean state, the label
/// does not.
pub struct ToggleSlot<R> {
    pub label: String,
    pub icon_on: String,
    pub icon_off: String,
    pub state: RowPredicate<R>,
    pub on_activate: Option<RowCallback<R>>,
}

/// Delete slot; always confirmation-gated.
pub struct DeleteSlot<R> {
    pub label: String,
    pub icon: String,
    pub confirm_title: String,
    pub confirm_description: String,
    pub on_activate: Option<RowCallback<R>>,
}

/// Caller-defined action appended after the named slots.
pub struct CustomAction<R> {
    pub label: String,
    pub icon: String,
    pub on_activate: Option<RowCallback<R>>,
    pub render: Option<CustomRenderFn<R>>,
}

/// Declarative actions configuration: optional named slots plus an ordered
/// list of custom entries.
pub struct ActionsConfig<R> {
    pub view: Option<ActionSlot<R>>,
    pub edit: Option<ActionSlot<R>>,
    pub toggle: Option<ToggleSlot<R>>,
    pub delete: Option<DeleteSlot<R>>,
    pub custom: Vec<CustomAction<R>>,
}

impl<R> ActionsConfig<R> {
    pub fn new() -> Self {
        Self {
            view: None,
            edit: None,
            toggle: None,
            delete: None,
            custom: Vec::new(),
        }
    }

    pub fn view(mut self, label: impl Into<String>, on_activate: impl Fn(&R) + 'static) -> Self {
        self.view = Some(ActionSlot {
            label: label.into(),
            icon: "👁".to_string(),
            on_activate: Some(Arc::new(on_activate)),
        });
        self
    }

    pub fn edit(mut self, label: impl Into<String>, on_activate: impl Fn(&R) + 'static) -> Self {
        self.edit = Some(ActionSlot {
            label: label.into(),
            icon: "✎".to_string(),
            on_activate: Some(Arc::new(on_activate)),
        });
        self
    }

    pub fn toggle(
        mut self,
        label: impl Into<String>,
        state: impl Fn(&R) -> bool + 'static,
        on_activate: impl Fn(&R) + 'static,
    ) -> Self {
        self.toggle = Some(ToggleSlot {
            label: label.into(),
            icon_on: "●".to_string(),
            icon_off: "○".to_string(),
            state: Arc::new(state),
            on_activate: Some(Arc::new(on_activate)),
        });
        self
    }

    pub fn delete(
        mut self,
        label: impl Into<String>,
        confirm_title: impl Into<String>,
        confirm_description: impl Into<String>,
        on_activate: impl Fn(&R) + 'static,
    ) -> Self {
        self.delete = Some(DeleteSlot {
            label: label.into(),
            icon: "✗".to_string(),
            confirm_title: confirm_title.into(),
            confirm_description: confirm_description.into(),
            on_activate: Some(Arc::new(on_activate)),
        });
        self
    }

    pub fn custom(
        mut self,
        label: impl Into<String>,
        icon: impl Into<String>,
        on_activate: impl Fn(&R) + 'static,
    ) -> Self {
        self.custom.push(CustomAction {
            label: label.into(),
            icon: icon.into(),
            on_activate: Some(Arc::new(on_activate)),
            render: None,
        });
        self
    }

    pub fn custom_rendered(
        mut self,
        label: impl Into<String>,
        render: impl Fn(&R) -> String + 'static,
        on_activate: impl Fn(&R) + 'static,
    ) -> Self {
        self.custom.push(CustomAction {
            label: label.into(),
            icon: String::new(),
            on_activate: Some(Arc::new(on_activate)),
            render: Some(Arc::new(render)),
        });
        self
    }

    /// True when no slot and no custom entry is configured.
    pub fn is_empty(&self) -> bool {
        self.view.is_none()
            && self.edit.is_none()
            && self.toggle.is_none()
            && self.delete.is_none()
            && self.custom.is_empty()
    }
}

/// Which configuration entry a resolved action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Edit,
    Toggle,
    Delete,
    Custom(usize),
}

/// How a confirmation is presented, depending on where the action landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStyle {
    /// Confirmation control rendered in place of the inline action.
    Inline,
    /// Blocking prompt, used for actions reached through the overflow menu.
    Modal,
}

/// Confirmation metadata attached to destructive actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub title: String,
    pub description: String,
    pub style: ConfirmStyle,
}

/// Normalized action descriptor, built once per row render.
pub struct ResolvedAction<R> {
    pub kind: ActionKind,
    pub label: String,
    pub icon: String,
    pub handler: Option<RowCallback<R>>,
    pub confirm: Option<Confirmation>,
    /// Output of a fully custom render function, already evaluated against
    /// the row this action was resolved for.
    pub custom_render: Option<String>,
}

impl<R> ResolvedAction<R> {
    pub fn requires_confirmation(&self) -> bool {
        self.confirm.is_some()
    }

    /// Activate the action directly. Refuses confirmation-gated actions
    /// and treats a missing handler as a no-op. Returns whether a handler
    /// actually ran.
    pub fn activate(&self, row: &R) -> bool {
        if self.requires_confirmation() {
            trace!(target: "actions", "blocked unconfirmed activation of {:?}", self.kind);
            return false;
        }
        match &self.handler {
            Some(handler) => {
                handler(row);
                true
            }
            None => false,
        }
    }

    /// Activate after the caller has collected an explicit confirmation.
    pub fn activate_confirmed(&self, row: &R) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(row);
                true
            }
            None => false,
        }
    }
}

/// Final per-row layout: inline controls plus the overflow menu contents.
pub struct ActionLayout<R> {
    pub inline: Vec<ResolvedAction<R>>,
    pub overflow: Vec<ResolvedAction<R>>,
}

impl<R> ActionLayout<R> {
    pub fn total(&self) -> usize {
        self.inline.len() + self.overflow.len()
    }

    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

/// Resolve the configuration against one record and lay the result out.
pub fn resolve_actions<R>(config: &ActionsConfig<R>, row: &R) -> ActionLayout<R> {
    let mut resolved: Vec<ResolvedAction<R>> = Vec::new();

    if let Some(slot) = &config.view {
        resolved.push(ResolvedAction {
            kind: ActionKind::View,
            label: slot.label.clone(),
            icon: slot.icon.clone(),
            handler: slot.on_activate.clone(),
            confirm: None,
            custom_render: None,
        });
    }

    if let Some(slot) = &config.edit {
        resolved.push(ResolvedAction {
            kind: ActionKind::Edit,
            label: slot.label.clone(),
            icon: slot.icon.clone(),
            handler: slot.on_activate.clone(),
            confirm: None,
            custom_render: None,
        });
    }

    if let Some(slot) = &config.toggle {
        let icon = if (slot.state)(row) {
            slot.icon_on.clone()
        } else {
            slot.icon_off.clone()
        };
        resolved.push(ResolvedAction {
            kind: ActionKind::Toggle,
            label: slot.label.clone(),
            icon,
            handler: slot.on_activate.clone(),
            confirm: None,
            custom_render: None,
        });
    }

    if let Some(slot) = &config.delete {
        resolved.push(ResolvedAction {
            kind: ActionKind::Delete,
            label: slot.label.clone(),
            icon: slot.icon.clone(),
            handler: slot.on_activate.clone(),
            confirm: Some(Confirmation {
                title: slot.confirm_title.clone(),
                description: slot.confirm_description.clone(),
                style: ConfirmStyle::Inline,
            }),
            custom_render: None,
        });
    }

    for (index, custom) in config.custom.iter().enumerate() {
        resolved.push(ResolvedAction {
            kind: ActionKind::Custom(index),
            label: custom.label.clone(),
            icon: custom.icon.clone(),
            handler: custom.on_activate.clone(),
            confirm: None,
            custom_render: custom.render.as_ref().map(|render| render(row)),
        });
    }

    let total = resolved.len();
    let (inline, overflow): (Vec<_>, Vec<_>) = if total <= MAX_ACTIONS {
        (resolved, Vec::new())
    } else {
        let overflow = resolved.split_off(VISIBLE_ACTIONS);
        (resolved, overflow)
    };

    // Confirmations reached through the menu cannot use the inline control.
    let overflow: Vec<ResolvedAction<R>> = overflow
        .into_iter()
        .map(|mut action| {
            if let Some(confirm) = &mut action.confirm {
                confirm.style = ConfirmStyle::Modal;
            }
            action
        })
        .collect();

    trace!(
        target: "actions",
        "resolved {} actions: {} inline, {} overflowed",
        total,
        inline.len(),
        overflow.len()
    );

    ActionLayout { inline, overflow }
}
