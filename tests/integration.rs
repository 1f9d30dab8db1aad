//! Integration tests for cardwall.
//!
//! These exercise the public API from outside the crate: a full panel over
//! the headless FakeHost, driven by the Pilot — rendering, reconciliation,
//! keyboard navigation, scrolling, settings changes.

use pretty_assertions::assert_eq;

use cardwall::event::Key;
use cardwall::geometry::Size;
use cardwall::testing::{sample_cards, Pilot};
use cardwall::{CardHeight, CardId, LayoutKind, PanelSettings, RenderHost, StateFlag};

fn grid_pilot() -> Pilot {
    // Content area 960x560 at the default settings: 3 derived columns.
    Pilot::new(1000.0, 600.0)
}

// ---------------------------------------------------------------------------
// Rendering and reconciliation
// ---------------------------------------------------------------------------

#[test]
fn grid_places_seven_cards_in_three_columns() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(7));

    let rows: Vec<usize> = (0..7)
        .map(|i| {
            let id = CardId::new(format!("card-{i}.md"));
            let element = pilot.host().element_for_card(&id).unwrap();
            let rect = pilot.host().element_rect(element).unwrap();
            (rect.y / 320.0) as usize
        })
        .collect();
    assert_eq!(rows, vec![0, 0, 0, 1, 1, 1, 2]);

    // The last card wraps to column 0 of row 2.
    let last = pilot
        .host()
        .element_for_card(&CardId::new("card-6.md"))
        .unwrap();
    assert_eq!(pilot.host().element_rect(last).unwrap().x, 0.0);
}

#[test]
fn initial_render_journal_is_minimal() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(2));
    insta::assert_snapshot!(pilot.host().journal().join("\n"), @r"
    create card-0.md
    content card-0.md rich
    position card-0.md (0,0 300x300)
    create card-1.md
    content card-1.md rich
    position card-1.md (320,0 300x300)
    ");
}

#[test]
fn rerender_with_unchanged_cards_is_position_only() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(12));

    pilot.host_mut().clear_journal();
    pilot.render(sample_cards(12));

    let journal = pilot.host().journal().join("\n");
    assert!(!journal.contains("create"), "{journal}");
    assert!(!journal.contains("content"), "{journal}");
    assert!(!journal.contains("remove"), "{journal}");
}

#[test]
fn disjoint_card_sets_leave_no_orphans() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(6));

    let replacement: Vec<_> = (100..103)
        .map(|i| cardwall::Card::new(format!("note-{i}.md"), format!("Note {i}")))
        .collect();
    pilot.render(replacement);

    assert_eq!(pilot.host().element_count(), 3);
    for i in 0..6 {
        let id = CardId::new(format!("card-{i}.md"));
        assert!(pilot.host().element_for_card(&id).is_none());
    }
}

#[test]
fn large_set_renders_fully_across_batches() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(57));
    assert_eq!(pilot.panel().card_count(), 57);
    assert_eq!(pilot.host().element_count(), 57);
}

// ---------------------------------------------------------------------------
// Keyboard navigation
// ---------------------------------------------------------------------------

#[test]
fn first_arrow_press_acquires_focus() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(9));

    assert_eq!(pilot.focused_index(), None);
    pilot.press_key(Key::Right);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(0));

    pilot.press_key(Key::Right);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(1));
}

#[test]
fn grid_navigation_moves_in_two_dimensions() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(9));
    pilot.press_key(Key::Down); // acquires focus at 0
    pilot.settle();

    pilot.press_key(Key::Down);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(3));

    pilot.press_key(Key::Right);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(4));

    pilot.press_key(Key::Up);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(1));

    // Left from column 0 wraps to the previous row's last column.
    pilot.press_key(Key::Down);
    pilot.press_key(Key::Left);
    pilot.press_key(Key::Left);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(2));
}

#[test]
fn focus_does_not_wrap_past_the_ends() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(5));
    pilot.press_key(Key::Left); // acquires focus at 0
    pilot.settle();

    pilot.press_key(Key::Left);
    pilot.press_key(Key::Up);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(0));

    pilot.press_key(Key::End);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(4));
    pilot.press_key(Key::Right);
    pilot.press_key(Key::Down);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(4));
}

#[test]
fn page_down_steps_by_one_measured_viewport() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(12));
    pilot.press_key(Key::Down); // focus 0
    pilot.settle();

    // 600px container, 300px cards, 20px gap: one full row fits, times
    // three columns = 3 cards per page.
    pilot.press_key(Key::PageDown);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(3));

    // Paging past the last card snaps to it.
    for _ in 0..5 {
        pilot.press_key(Key::PageDown);
        pilot.settle();
    }
    assert_eq!(pilot.focused_index(), Some(11));

    pilot.press_key(Key::PageUp);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(8));
}

#[test]
fn enter_opens_the_focused_document() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(3));
    pilot.press_key(Key::Down);
    pilot.settle();

    pilot.press_key(Key::Enter);
    pilot.settle();
    assert_eq!(pilot.host().opened, vec!["card-0.md".to_owned()]);
}

#[test]
fn escape_blurs_and_clears_the_focus_ring() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(3));
    pilot.press_key(Key::Down);
    pilot.settle();

    let element = pilot
        .host()
        .element_for_card(&CardId::new("card-0.md"))
        .unwrap();
    assert!(pilot.host().has_flag(element, StateFlag::Focused));

    pilot.press_key(Key::Escape);
    pilot.settle();
    assert!(!pilot.host().has_flag(element, StateFlag::Focused));
    assert_eq!(pilot.focused_index(), None);
}

#[test]
fn focus_survives_rerenders_and_clamps_to_shrunk_sets() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(10));
    pilot.press_key(Key::Down);
    pilot.press_key(Key::End);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(9));

    // The data source shrinks to 5 cards: focus clamps to the new last.
    pilot.render(sample_cards(5));
    assert_eq!(pilot.focused_index(), Some(4));

    // The highlight moved with it.
    let element = pilot
        .host()
        .element_for_card(&CardId::new("card-4.md"))
        .unwrap();
    assert!(pilot.host().has_flag(element, StateFlag::Focused));
}

// ---------------------------------------------------------------------------
// Active card
// ---------------------------------------------------------------------------

#[test]
fn active_card_is_flagged_and_preferred_for_focus() {
    let mut pilot = grid_pilot();
    let active = CardId::new("card-7.md");
    pilot.render_with(sample_cards(9), None, Some(active.clone()));

    let element = pilot.host().element_for_card(&active).unwrap();
    assert!(pilot.host().has_flag(element, StateFlag::Active));

    // Acquiring focus lands on the active card, not the first visible one.
    pilot.press_key(Key::Down);
    pilot.settle();
    assert_eq!(pilot.focused_index(), Some(7));
}

// ---------------------------------------------------------------------------
// Scrolling
// ---------------------------------------------------------------------------

#[test]
fn centering_focused_card_scrolls_the_container() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(12));
    pilot.press_key(Key::Down); // focus 0, already centered enough
    pilot.settle();

    pilot.press_key(Key::Down); // row 1: content center y = 470
    pilot.settle();

    // Visible area (padding 20) center is 300; the offset settles at 170.
    assert_eq!(pilot.host().scroll_offset().y, 170.0);
}

#[test]
fn scroll_to_active_card_centers_it() {
    let mut pilot = grid_pilot();
    let active = CardId::new("card-9.md");
    pilot.render_with(sample_cards(12), None, Some(active));

    pilot.panel_mut().scroll_to_active_card();
    pilot.settle();

    // card-9 sits in row 3: content center y = 3*320 + 150 = 1110,
    // so the offset settles at 810.
    assert_eq!(pilot.host().scroll_offset().y, 810.0);
}

#[test]
fn directional_scroll_moves_by_card_strides() {
    let mut pilot = Pilot::with_settings(
        1000.0,
        600.0,
        PanelSettings::new().with_scroll_animation(false),
    );
    pilot.render(sample_cards(30));

    pilot.panel_mut().scroll_down(2);
    pilot.settle();
    assert_eq!(pilot.host().scroll_offset().y, 640.0);

    pilot.panel_mut().scroll_up(1);
    pilot.settle();
    assert_eq!(pilot.host().scroll_offset().y, 320.0);
}

// ---------------------------------------------------------------------------
// Settings and resize
// ---------------------------------------------------------------------------

#[test]
fn switching_layouts_repositions_without_recreating() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(6));

    pilot.host_mut().clear_journal();
    let masonry = PanelSettings::new().with_layout(LayoutKind::Masonry);
    pilot.panel_mut().apply_settings(masonry);
    pilot.settle();

    let journal = pilot.host().journal().join("\n");
    assert!(!journal.contains("create"), "{journal}");
    assert!(!journal.contains("content"), "{journal}");
    assert!(journal.contains("position"), "{journal}");
    assert_eq!(pilot.host().element_count(), 6);
}

#[test]
fn resize_is_debounced_and_reflows() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(4));

    // A storm of resize notifications collapses into one reflow. The final
    // width fits a single 300px column (460px of content).
    pilot.resize(700.0, 600.0);
    pilot.resize(620.0, 600.0);
    pilot.resize(500.0, 600.0);
    pilot.settle();

    for i in 0..4 {
        let id = CardId::new(format!("card-{i}.md"));
        let element = pilot.host().element_for_card(&id).unwrap();
        let rect = pilot.host().element_rect(element).unwrap();
        assert_eq!(rect.x, 0.0, "card {i} not in the single column");
    }
    assert_eq!(pilot.panel().config().container, Size::new(500.0, 600.0));
}

#[test]
fn card_size_reports_measured_then_configured() {
    let mut pilot = grid_pilot();
    assert_eq!(pilot.panel().card_size(), Size::new(300.0, 300.0));

    pilot.render(sample_cards(1));
    assert_eq!(pilot.panel().card_size(), Size::new(300.0, 300.0));
}

#[test]
fn file_from_card_resolves_the_source_path() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(2));
    let element = pilot
        .host()
        .element_for_card(&CardId::new("card-1.md"))
        .unwrap();
    assert_eq!(pilot.panel().file_from_card(element), Some("card-1.md"));
}

// ---------------------------------------------------------------------------
// Masonry with auto heights
// ---------------------------------------------------------------------------

#[test]
fn masonry_repacks_with_measured_heights() {
    let settings = PanelSettings::new()
        .with_layout(LayoutKind::Masonry)
        .with_card_height(CardHeight::Auto)
        .with_align_card_height(false)
        .with_scroll_animation(false)
        .with_gap(10.0);
    let mut pilot = Pilot::with_settings(1000.0, 600.0, settings);
    pilot.render(sample_cards(3));

    // Content settles at different heights, then a fourth card arrives:
    // the repack reads the measured extents and fills the shortest column.
    for (i, height) in [300.0, 100.0, 200.0].iter().enumerate() {
        let id = CardId::new(format!("card-{i}.md"));
        let element = pilot.host().element_for_card(&id).unwrap();
        let mut rect = pilot.host().element_rect(element).unwrap();
        rect.height = *height;
        pilot.host_mut().set_element_content_rect(element, rect);
    }
    pilot.render(sample_cards(4));

    let id = CardId::new("card-3.md");
    let element = pilot.host().element_for_card(&id).unwrap();
    let rect = pilot.host().element_rect(element).unwrap();
    // Column 1 (x = 310) was shortest at height 100.
    assert_eq!(rect.x, 310.0);
    assert_eq!(rect.y, 110.0);
}

// ---------------------------------------------------------------------------
// Teardown
// ---------------------------------------------------------------------------

#[test]
fn dispose_empties_the_container() {
    let mut pilot = grid_pilot();
    pilot.render(sample_cards(8));
    pilot.press_key(Key::Down);
    pilot.settle();

    pilot.panel_mut().dispose();
    assert_eq!(pilot.host().element_count(), 0);
    assert_eq!(pilot.focused_index(), None);
    assert!(!pilot.panel().has_pending_work());
}
