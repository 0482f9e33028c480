//! Leptos DragDrop Utilities
//!
//! Row reordering for Leptos lists with mouse and keyboard sensors.
//! A mouse drag only starts after a movement threshold so clicks keep
//! working; a keyboard drag is lifted and dropped from the row's handle.
//! Both sensors end in the same `(active, over)` drop callback.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set, so the click that follows a drop
/// can be ignored
const JUST_ENDED_MS: u64 = 100;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Row currently under the dragged one; never the dragged row itself
    pub over_id_read: ReadSignal<Option<u32>>,
    pub over_id_write: WriteSignal<Option<u32>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Drag was lifted from the keyboard
    pub keyboard_read: ReadSignal<bool>,
    pub keyboard_write: WriteSignal<bool>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (over_id_read, over_id_write) = signal(None::<u32>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (keyboard_read, keyboard_write) = signal(false);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        over_id_read,
        over_id_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        keyboard_read,
        keyboard_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self, id: u32) -> bool {
        self.dragging_id_read.get() == Some(id)
    }

    pub fn is_over(&self, id: u32) -> bool {
        self.over_id_read.get() == Some(id)
    }

    pub fn active(&self) -> bool {
        self.dragging_id_read.get().is_some()
    }
}

/// True once the pointer moved far enough from the mousedown position
pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Keyboard sensor command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Space/Enter: lift when idle, drop when lifted
    Toggle,
    Move(Step),
    Cancel,
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" | "Enter" => Some(KeyAction::Toggle),
        "ArrowUp" => Some(KeyAction::Move(Step::Up)),
        "ArrowDown" => Some(KeyAction::Move(Step::Down)),
        "Escape" | "Esc" => Some(KeyAction::Cancel),
        _ => None,
    }
}

/// Next drop target when stepping through `ids` with the arrow keys.
///
/// Starts from `current` (or the active row), skips the active row and
/// stays put at either end.
pub fn step_over(ids: &[u32], active: u32, current: Option<u32>, step: Step) -> Option<u32> {
    let from = current.unwrap_or(active);
    let Some(start) = ids.iter().position(|id| *id == from) else {
        return current;
    };
    let delta: isize = match step {
        Step::Up => -1,
        Step::Down => 1,
    };
    let mut pos = start as isize;
    loop {
        pos += delta;
        if pos < 0 || pos >= ids.len() as isize {
            return current;
        }
        let id = ids[pos as usize];
        if id != active {
            return Some(id);
        }
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.over_id_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.keyboard_write.set(false);
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    set_timeout(move || clear.set(false), Duration::from_millis(JUST_ENDED_MS));
}

/// Finish a drag: emit `(active, over)` when both exist, then reset.
fn finish_drag<F: Fn(u32, u32)>(dnd: &DndSignals, on_drop: &F) {
    let dragging = dnd.dragging_id_read.get_untracked();
    let over = dnd.over_id_read.get_untracked();
    end_drag(dnd);
    if let (Some(active), Some(over)) = (dragging, over) {
        on_drop(active, over);
    }
}

/// Create mousedown handler for draggable rows.
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || dnd.keyboard_read.get_untracked() {
            return;
        }
        // Ignore inputs and buttons inside the row
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mouseenter handler for rows
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            if dragging != item_id && !dnd.keyboard_read.get_untracked() {
                dnd.over_id_write.set(Some(item_id));
            }
        }
    }
}

/// Keyboard sensor for a row's drag handle.
///
/// `ids` yields the displayed row order at the time of the key press.
pub fn make_on_handle_keydown<I, F>(
    dnd: DndSignals,
    item_id: u32,
    ids: I,
    on_drop: F,
) -> impl Fn(web_sys::KeyboardEvent) + 'static
where
    I: Fn() -> Vec<u32> + 'static,
    F: Fn(u32, u32) + 'static,
{
    move |ev: web_sys::KeyboardEvent| {
        let Some(action) = key_action(&ev.key()) else {
            return;
        };
        let lifted = dnd.dragging_id_read.get_untracked();
        match (action, lifted) {
            (KeyAction::Toggle, None) => {
                ev.prevent_default();
                dnd.pending_id_write.set(None);
                dnd.keyboard_write.set(true);
                dnd.over_id_write.set(None);
                dnd.dragging_id_write.set(Some(item_id));
            }
            (KeyAction::Toggle, Some(_)) => {
                ev.prevent_default();
                finish_drag(&dnd, &on_drop);
            }
            (KeyAction::Move(step), Some(active)) => {
                ev.prevent_default();
                let next = step_over(&ids(), active, dnd.over_id_read.get_untracked(), step);
                dnd.over_id_write.set(next);
            }
            (KeyAction::Cancel, Some(_)) => {
                ev.prevent_default();
                end_drag(&dnd);
            }
            _ => {}
        }
    }
}

/// Bind window mousemove/mouseup handlers for the lifetime of the calling
/// component; they are removed when its owner is cleaned up.
pub fn bind_global_listeners<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, u32) + 'static,
{
    let mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();
        if pending.is_none() || dnd.dragging_id_read.get_untracked().is_some() {
            return;
        }
        let dx = ev.client_x() - dnd.start_x_read.get_untracked();
        let dy = ev.client_y() - dnd.start_y_read.get_untracked();
        if exceeds_threshold(dx, dy) {
            dnd.dragging_id_write.set(pending);
        }
    });

    let mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        if dnd.keyboard_read.get_untracked() {
            return;
        }
        if dnd.dragging_id_read.get_untracked().is_some() {
            finish_drag(&dnd, &on_drop);
        } else {
            // Plain click; the click event fires on the element by itself
            dnd.pending_id_write.set(None);
        }
    });

    on_cleanup(move || {
        mousemove.remove();
        mouseup.remove();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold(5, -5));
        assert!(exceeds_threshold(6, 0));
        assert!(exceeds_threshold(0, -6));
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(key_action(" "), Some(KeyAction::Toggle));
        assert_eq!(key_action("Enter"), Some(KeyAction::Toggle));
        assert_eq!(key_action("ArrowDown"), Some(KeyAction::Move(Step::Down)));
        assert_eq!(key_action("Escape"), Some(KeyAction::Cancel));
        assert_eq!(key_action("a"), None);
    }

    #[test]
    fn test_step_from_active_row() {
        let ids = [1, 2, 3, 4];
        assert_eq!(step_over(&ids, 2, None, Step::Down), Some(3));
        assert_eq!(step_over(&ids, 2, None, Step::Up), Some(1));
    }

    #[test]
    fn test_step_skips_active_row() {
        let ids = [1, 2, 3, 4];
        assert_eq!(step_over(&ids, 2, Some(3), Step::Up), Some(1));
        assert_eq!(step_over(&ids, 2, Some(1), Step::Down), Some(3));
    }

    #[test]
    fn test_step_clamps_at_ends() {
        let ids = [1, 2, 3, 4];
        assert_eq!(step_over(&ids, 2, Some(4), Step::Down), Some(4));
        assert_eq!(step_over(&ids, 1, None, Step::Up), None);
        assert_eq!(step_over(&ids, 4, Some(1), Step::Up), Some(1));
    }

    #[test]
    fn test_single_row_has_no_target() {
        assert_eq!(step_over(&[7], 7, None, Step::Down), None);
        assert_eq!(step_over(&[7], 7, None, Step::Up), None);
    }
}
