//! The editor capability — the seam between gesture land and the vector
//! editing surface.
//!
//! The editor's rendering, undo history, and shape model are external;
//! this trait covers exactly what the pipeline needs: pointer-event
//! dispatch, tool selection, and two input-state queries.

// ════════════════════════════════════════════════════════════════════════════
// PointerEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Modifier keys carried on `pointer_move` events, mirroring whatever the
/// editor currently reports as held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A synthesized pointer interaction in Dispatch Space pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub pointer_id: u8,
    pub button: u8,
    pub modifiers: ModifierKeys,
}

impl PointerEvent {
    /// Primary-button event at (x, y) with no modifiers.
    pub fn primary(kind: PointerEventKind, x: f32, y: f32) -> Self {
        PointerEvent {
            kind,
            x,
            y,
            pointer_id: 0,
            button: 0,
            modifiers: ModifierKeys::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Editor trait
// ════════════════════════════════════════════════════════════════════════════

/// Output capability accepting pointer events and tool-selection commands.
pub trait Editor {
    fn dispatch(&mut self, event: PointerEvent);

    /// Identifier of the currently active tool (e.g. `"draw"`).
    fn current_tool(&self) -> String;

    fn set_current_tool(&mut self, tool: &str);

    /// True while the editor reports the primary button as already active —
    /// used to suppress duplicate `pointer_down` events.
    fn is_primary_button_held(&self) -> bool;

    /// Modifier keys the editor currently reports as held.
    fn held_modifiers(&self) -> ModifierKeys {
        ModifierKeys::default()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NullEditor — no-op backend
// ════════════════════════════════════════════════════════════════════════════

/// Backend used when no editor is registered: every feature that needs an
/// editor silently no-ops for the tick instead of failing it.
pub struct NullEditor;

impl Editor for NullEditor {
    fn dispatch(&mut self, _event: PointerEvent) {}
    fn current_tool(&self) -> String {
        String::new()
    }
    fn set_current_tool(&mut self, _tool: &str) {}
    fn is_primary_button_held(&self) -> bool {
        false
    }
}
