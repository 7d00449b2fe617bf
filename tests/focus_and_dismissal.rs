//! Integration tests for focus containment, focus restore, scroll locking,
//! and dismissal by key and pointer.

mod common;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use modal_await::{FocusKey, ModalConfig, ModalManager, modal::CLOSE_BUTTON_ID};

fn in_dialog(manager: &ModalManager, id: &modal_await::ModalId, focus: modal_await::FocusId) -> Option<FocusKey> {
    let container = manager.dialog(id).unwrap().container;
    Some(FocusKey::in_container(container, focus))
}

#[test]
fn test_first_focusable_gets_focus_after_mount() {
    let manager = page_manager(ModalManager::default());
    let pending = manager.open::<FormView>(form("Focus"));

    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));
    manager.tick();
    assert_eq!(manager.focused(), in_dialog(&manager, pending.id(), CLOSE_BUTTON_ID));
}

#[test]
fn test_tab_wraps_at_both_ends() {
    let manager = page_manager(ModalManager::default());
    let pending = manager.open::<FormView>(form("Wrap"));
    manager.tick();
    let id = pending.id().clone();

    manager.dispatch_key(key(KeyCode::BackTab)).unwrap();
    assert_eq!(manager.focused(), in_dialog(&manager, &id, OK));

    manager.dispatch_key(key(KeyCode::Tab)).unwrap();
    assert_eq!(manager.focused(), in_dialog(&manager, &id, CLOSE_BUTTON_ID));

    // some terminals report Shift+Tab as Tab with the shift modifier
    manager
        .dispatch_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT))
        .unwrap();
    assert_eq!(manager.focused(), in_dialog(&manager, &id, OK));
}

#[test]
fn test_focus_returns_to_opener_on_close() {
    let manager = page_manager(ModalManager::default());
    let pending = manager.open::<FormView>(form("Restore"));
    manager.tick();
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();

    manager.cancel(pending.id(), None);
    manager.tick();
    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));
}

#[test]
fn test_focus_not_restored_to_removed_element() {
    let manager = page_manager(ModalManager::default());
    let pending = manager.open::<FormView>(form("Gone"));
    manager.tick();

    // the opener disappears while the dialog is open
    manager.set_page_focusables(vec![HELP]);
    manager.cancel(pending.id(), None);
    manager.tick();
    assert_eq!(manager.focused(), None);
}

#[test]
fn test_stacked_dialogs_restore_in_turn() {
    let manager = page_manager(ModalManager::default());
    let lower = manager.open::<FormView>(form("Lower"));
    manager.tick();
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();
    let lower_field = in_dialog(&manager, lower.id(), FIELD);
    assert_eq!(manager.focused(), lower_field);

    let upper = manager.open::<FormView>(form("Upper"));
    manager.tick();
    assert_eq!(manager.focused(), in_dialog(&manager, upper.id(), CLOSE_BUTTON_ID));

    manager.dispatch_key(key(KeyCode::Esc)).unwrap();
    manager.tick();
    assert!(manager.is_open(lower.id()));
    assert_eq!(manager.focused(), lower_field);
    assert!(manager.is_scroll_locked());

    manager.dispatch_key(key(KeyCode::Esc)).unwrap();
    manager.tick();
    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));
    assert!(!manager.is_scroll_locked());
}

/// Closing a dialog underneath the top one must not pull focus out of the top
#[test]
fn test_closing_lower_dialog_keeps_focus_in_top() {
    let manager = page_manager(ModalManager::default());
    let lower = manager.open::<FormView>(form("Lower"));
    manager.tick();
    let upper = manager.open::<FormView>(form("Upper"));
    manager.tick();
    let upper_close = in_dialog(&manager, upper.id(), CLOSE_BUTTON_ID);
    assert_eq!(manager.focused(), upper_close);

    manager.cancel(lower.id(), None);
    manager.tick();
    assert!(manager.is_open(upper.id()));
    assert_eq!(manager.focused(), upper_close);

    manager.dispatch_key(key(KeyCode::Tab)).unwrap();
    assert_eq!(manager.focused(), in_dialog(&manager, upper.id(), FIELD));

    // the top dialog now returns focus to where the lower one came from
    manager.dispatch_key(key(KeyCode::Esc)).unwrap();
    manager.tick();
    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));
    assert!(!manager.is_scroll_locked());
}

#[test]
fn test_dialog_without_focusables_leaves_focus_alone() {
    let manager = page_manager(ModalManager::default());
    let _pending = manager.open::<NoticeView>(());
    manager.tick();
    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));

    manager.dispatch_key(key(KeyCode::Tab)).unwrap();
    let focused = manager.focused();
    assert!(focused.is_none() || focused.is_some_and(|k| k.scope == modal_await::Scope::Page));
}

#[test]
fn test_auto_focus_disabled() {
    let config = ModalConfig::builder().auto_focus(false).build();
    let manager = page_manager(ModalManager::new(config));
    let _pending = manager.open::<FormView>(form("Manual"));
    manager.tick();
    assert_eq!(manager.focused(), Some(FocusKey::page(OPENER)));
}

#[test]
fn test_restore_focus_disabled() {
    let config = ModalConfig::builder().restore_focus(false).build();
    let manager = page_manager(ModalManager::new(config));
    let pending = manager.open::<FormView>(form("No restore"));
    manager.tick();

    manager.cancel(pending.id(), None);
    manager.tick();
    assert_eq!(manager.focused(), None);
}

#[test]
fn test_scroll_locked_until_last_dialog_closes() {
    let manager = ModalManager::default();
    assert!(manager.scroll_page(2));

    let first = manager.open::<NoticeView>(());
    let second = manager.open::<NoticeView>(());
    assert!(manager.is_scroll_locked());
    assert!(!manager.scroll_page(1));

    manager.cancel(first.id(), None);
    manager.tick();
    assert!(manager.is_scroll_locked());

    manager.cancel(second.id(), None);
    manager.tick();
    assert!(!manager.is_scroll_locked());
    assert!(manager.scroll_page(1));
    assert_eq!(manager.scroll_offset(), 3);
}

#[test]
fn test_scroll_lock_can_be_disabled() {
    let manager = ModalManager::new(ModalConfig::builder().lock_scroll(false).build());
    let _pending = manager.open::<NoticeView>(());
    assert!(!manager.is_scroll_locked());
    assert!(manager.scroll_page(1));
}

#[tokio::test]
async fn test_backdrop_click_dismisses() {
    let manager = ModalManager::default();
    let pending = manager.open::<FormView>(form("Backdrop"));
    manager.tick();
    draw(&manager);

    let layout = manager.dialog_layout(pending.id()).unwrap();
    // inside the panel but not on a control
    assert!(manager.dispatch_mouse(left_click(layout.content.x + 1, layout.content.y + 1)).unwrap());
    assert!(manager.is_open(pending.id()));

    assert!(manager.dispatch_mouse(left_click(0, 0)).unwrap());
    assert_eq!(pending.await, None);
}

#[tokio::test]
async fn test_clicking_a_button_presses_it() {
    let manager = ModalManager::default();
    let pending = manager.open::<FormView>(form("Click"));
    manager.tick();
    draw(&manager);

    let ok = manager.dialog_layout(pending.id()).unwrap().rect_of(&OK).unwrap();
    manager.dispatch_mouse(left_click(ok.x + 1, ok.y + 1)).unwrap();
    assert_eq!(
        pending.await,
        Some(Outcome {
            ok: true,
            value: String::new()
        })
    );
}

#[tokio::test]
async fn test_clicking_close_button_cancels() {
    let manager = ModalManager::default();
    let pending = manager.open::<FormView>(form("Close"));
    manager.tick();
    draw(&manager);

    let close = manager
        .dialog_layout(pending.id())
        .unwrap()
        .rect_of(&CLOSE_BUTTON_ID)
        .unwrap();
    manager.dispatch_mouse(left_click(close.x + 1, close.y + 1)).unwrap();
    assert_eq!(pending.await, None);
}

#[tokio::test]
async fn test_strict_config_ignores_backdrop_but_honours_escape() {
    let manager = ModalManager::new(ModalConfig::strict());
    let mut pending = manager.open::<FormView>(form("Strict"));
    manager.tick();
    draw(&manager);

    manager.dispatch_mouse(left_click(0, 0)).unwrap();
    assert_eq!(pending.try_take(), None);

    manager.dispatch_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(pending.await, None);
}

#[tokio::test]
async fn test_custom_cancel_key() {
    let config = ModalConfig::builder().cancel_key("f2").build();
    let manager = ModalManager::new(config);
    let mut pending = manager.open::<FormView>(form("F2"));
    manager.tick();

    manager.dispatch_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(pending.try_take(), None);

    manager.dispatch_key(key(KeyCode::F(2))).unwrap();
    assert_eq!(pending.await, None);
}

#[tokio::test]
async fn test_character_cancel_key_is_typed_inside_field() {
    let manager = ModalManager::new(ModalConfig::builder().cancel_key("q").build());
    let pending = manager.open::<FormView>(form("Q"));
    manager.tick();
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();

    for c in "quit".chars() {
        manager.dispatch_key(key(KeyCode::Char(c))).unwrap();
    }
    assert!(manager.is_open(pending.id()));
    assert!(manager.dialog(pending.id()).unwrap().dialog.contains_text("quit"));

    // outside the field the same key dismisses
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();
    manager.dispatch_key(key(KeyCode::Char('q'))).unwrap();
    assert_eq!(pending.await, None);
}

#[test]
fn test_backspace_cancel_key_edits_field() {
    let manager = ModalManager::new(ModalConfig::builder().cancel_key("backspace").build());
    let pending = manager.open::<FormView>(form("Backspace"));
    manager.tick();
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();

    manager.dispatch_key(key(KeyCode::Backspace)).unwrap();
    assert!(manager.is_open(pending.id()));
}

#[test]
fn test_typing_in_field_never_dismisses() {
    let manager = ModalManager::default();
    let pending = manager.open::<FormView>(form("Type"));
    manager.tick();
    manager.dispatch_key(key(KeyCode::Tab)).unwrap();

    for c in "quit now".chars() {
        manager.dispatch_key(key(KeyCode::Char(c))).unwrap();
    }
    assert!(manager.is_open(pending.id()));
    assert!(manager.dialog(pending.id()).unwrap().dialog.contains_text("quit now"));
}

#[test]
fn test_page_keys_pass_through_without_dialogs() {
    let manager = page_manager(ModalManager::default());
    assert!(!manager.dispatch_key(key(KeyCode::Tab)).unwrap());
    assert!(!manager.dispatch_mouse(left_click(0, 0)).unwrap());

    manager.focus_step(modal_await::TabDirection::Forward);
    assert_eq!(manager.focused(), Some(FocusKey::page(HELP)));
}
