use approx::assert_relative_eq;
use chart_panes::api::{ChartEngine, ChartEngineConfig};
use chart_panes::core::{
    LayoutRegion, PaneId, PaneKind, PaneOptions, PaneOptionsUpdate, PaneState, Viewport,
};
use chart_panes::extensions::FixedAxisProvider;
use chart_panes::interaction::InteractionMode;
use chart_panes::render::NullRenderer;

/// Candle 350, `rsi` 120 (min 30), `vol` 100 (min 50) in a 570px content area.
fn build_engine() -> (ChartEngine<NullRenderer>, PaneId, PaneId) {
    let config = ChartEngineConfig::new(Viewport::new(800, 600)).with_separator(0.0, false);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let rsi = engine
        .add_pane(
            PaneKind::Indicator,
            Some(PaneId::new("rsi")),
            PaneOptions {
                height: Some(120.0),
                ..PaneOptions::default()
            },
        )
        .expect("rsi pane");
    let vol = engine
        .add_pane(
            PaneKind::Script,
            Some(PaneId::new("vol")),
            PaneOptions {
                height: Some(100.0),
                min_height: Some(50.0),
                ..PaneOptions::default()
            },
        )
        .expect("vol pane");
    engine.flush();
    (engine, rsi, vol)
}

fn root_height(engine: &ChartEngine<NullRenderer>, pane_id: &PaneId) -> f64 {
    engine
        .bounding(Some(pane_id), LayoutRegion::Root)
        .expect("pane bounding")
        .height
}

fn state(engine: &ChartEngine<NullRenderer>, pane_id: &PaneId) -> PaneState {
    engine.pane_options(pane_id).expect("pane").state
}

#[test]
fn maximized_pane_fills_content_area_and_hides_the_rest() {
    let (mut engine, rsi, vol) = build_engine();
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 350.0);

    assert!(engine.maximize_pane(&rsi));
    engine.flush();

    let root = engine
        .bounding(Some(&rsi), LayoutRegion::Root)
        .expect("rsi bounding");
    assert_relative_eq!(root.top, 0.0);
    assert_relative_eq!(root.height, 570.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 0.0);
    assert_relative_eq!(root_height(&engine, &vol), 0.0);

    let snapshot = engine.layout_snapshot();
    let hidden = snapshot.pane(&vol).expect("vol layout");
    assert!(!hidden.visible);
    assert_eq!(hidden.state, PaneState::Normal);
    assert_relative_eq!(snapshot.occupied_height(), 600.0);
    assert_eq!(engine.renderer().last_painted_panes, 2);
}

#[test]
fn only_one_pane_can_be_maximized() {
    let (mut engine, rsi, vol) = build_engine();
    assert!(engine.maximize_pane(&rsi));
    assert!(!engine.maximize_pane(&vol));
    assert!(!engine.maximize_pane(&rsi));
    assert!(!engine.set_pane_state(&PaneId::time_axis(), PaneState::Maximized));
    assert!(!engine.set_pane_state(&PaneId::new("missing"), PaneState::Minimized));

    let maximized = engine
        .panes()
        .into_iter()
        .filter(|pane| pane.state == PaneState::Maximized)
        .count();
    assert_eq!(maximized, 1);
}

#[test]
fn restoring_a_maximized_pane_brings_back_the_previous_layout() {
    let (mut engine, rsi, vol) = build_engine();
    engine.maximize_pane(&rsi);
    engine.flush();

    assert!(engine.restore_pane(&rsi));
    engine.flush();

    assert_eq!(state(&engine, &rsi), PaneState::Normal);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 350.0);
    assert_relative_eq!(root_height(&engine, &rsi), 120.0);
    assert_relative_eq!(root_height(&engine, &vol), 100.0);
    assert!(engine.panes().iter().all(|pane| pane.visible));
}

#[test]
fn minimizing_another_pane_first_restores_the_maximized_one() {
    let (mut engine, rsi, vol) = build_engine();
    engine.maximize_pane(&rsi);
    engine.flush();

    assert!(engine.minimize_pane(&vol));
    engine.flush();

    assert_eq!(state(&engine, &rsi), PaneState::Normal);
    assert_eq!(state(&engine, &vol), PaneState::Minimized);
    assert_relative_eq!(root_height(&engine, &rsi), 120.0);
    assert_relative_eq!(root_height(&engine, &vol), 30.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 420.0);
}

#[test]
fn maximized_pane_follows_container_resize() {
    let (mut engine, rsi, _vol) = build_engine();
    engine.maximize_pane(&rsi);
    engine.resize(800, 700);
    engine.flush();

    assert_relative_eq!(root_height(&engine, &rsi), 670.0);
    assert_relative_eq!(engine.layout_snapshot().occupied_height(), 700.0);
}

#[test]
fn maximized_pane_follows_time_axis_height_change() {
    let (mut engine, rsi, _vol) = build_engine();
    engine.maximize_pane(&rsi);
    engine.flush();

    engine.set_axis_provider(Box::new(FixedAxisProvider {
        time_axis_height: 20.0,
        value_axis_width: 60.0,
    }));
    engine.flush();

    assert_relative_eq!(root_height(&engine, &rsi), 580.0);
    assert_relative_eq!(root_height(&engine, &PaneId::time_axis()), 20.0);
    assert_relative_eq!(engine.layout_snapshot().occupied_height(), 600.0);
}

#[test]
fn shrinking_container_keeps_every_pane_at_its_min_height() {
    let (mut engine, rsi, vol) = build_engine();
    assert!(engine.resize(800, 250));
    engine.flush();

    assert_relative_eq!(root_height(&engine, &rsi), 120.0);
    assert_relative_eq!(root_height(&engine, &vol), 70.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 30.0);
    assert_relative_eq!(engine.layout_snapshot().occupied_height(), 250.0);
}

#[test]
fn minimize_is_rejected_when_no_normal_pane_is_left() {
    let (mut engine, rsi, vol) = build_engine();
    assert!(engine.minimize_pane(&PaneId::candle()));
    assert!(engine.minimize_pane(&rsi));
    engine.flush();

    assert!(!engine.minimize_pane(&vol));
    engine.flush();

    assert_eq!(state(&engine, &vol), PaneState::Normal);
    assert_relative_eq!(root_height(&engine, &vol), 510.0);
    assert_relative_eq!(root_height(&engine, &rsi), 30.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 30.0);
    assert_relative_eq!(engine.layout_snapshot().occupied_height(), 600.0);
}

#[test]
fn removing_maximized_pane_shows_remaining_panes() {
    let (mut engine, rsi, vol) = build_engine();
    engine.maximize_pane(&vol);
    engine.flush();

    assert!(engine.remove_pane(&vol));
    engine.flush();

    assert!(engine.panes().iter().all(|pane| pane.visible));
    assert_relative_eq!(root_height(&engine, &rsi), 120.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 450.0);
}

#[test]
fn state_change_through_options_update() {
    let (mut engine, rsi, _vol) = build_engine();
    assert!(engine.set_pane_options(
        &rsi,
        PaneOptionsUpdate {
            state: Some(PaneState::Minimized),
            ..PaneOptionsUpdate::default()
        }
    ));
    engine.flush();

    assert_eq!(state(&engine, &rsi), PaneState::Minimized);
    assert_relative_eq!(root_height(&engine, &rsi), 30.0);
}

#[test]
fn raising_min_height_grows_a_smaller_pane() {
    let (mut engine, rsi, _vol) = build_engine();
    assert!(engine.set_pane_options(
        &rsi,
        PaneOptionsUpdate {
            min_height: Some(200.0),
            ..PaneOptionsUpdate::default()
        }
    ));
    engine.flush();

    assert_relative_eq!(root_height(&engine, &rsi), 200.0);
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 270.0);
}

#[test]
fn unchanged_min_height_schedules_no_pass() {
    let (mut engine, _rsi, vol) = build_engine();
    let generation = engine.layout_snapshot().generation;

    assert!(!engine.set_pane_options(
        &vol,
        PaneOptionsUpdate {
            min_height: Some(50.0),
            ..PaneOptionsUpdate::default()
        }
    ));
    assert!(!engine.flush());
    assert_eq!(engine.layout_snapshot().generation, generation);
}

#[test]
fn separator_drag_moves_height_between_neighbours() {
    let (mut engine, rsi, vol) = build_engine();

    assert!(engine.begin_separator_drag(&rsi));
    assert_eq!(engine.interaction_mode(), InteractionMode::SeparatorDrag);

    assert!(engine.drag_separator(50.0));
    engine.flush();
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 400.0);
    assert_relative_eq!(root_height(&engine, &rsi), 70.0);
    assert_relative_eq!(root_height(&engine, &vol), 100.0);

    assert!(engine.drag_separator(-400.0));
    engine.flush();
    assert_relative_eq!(root_height(&engine, &PaneId::candle()), 30.0);
    assert_relative_eq!(root_height(&engine, &rsi), 440.0);
    assert!(!engine.drag_separator(-500.0));

    assert!(engine.end_separator_drag());
    assert!(!engine.end_separator_drag());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(!engine.drag_separator(10.0));
}

#[test]
fn separator_drag_respects_bottom_min_height() {
    let (mut engine, rsi, vol) = build_engine();
    assert!(engine.begin_separator_drag(&vol));

    assert!(engine.drag_separator(100.0));
    engine.flush();
    assert_relative_eq!(root_height(&engine, &rsi), 170.0);
    assert_relative_eq!(root_height(&engine, &vol), 50.0);
}

#[test]
fn separator_drag_needs_two_normal_visible_neighbours() {
    let (mut engine, rsi, vol) = build_engine();

    assert!(!engine.begin_separator_drag(&PaneId::candle()));

    engine.minimize_pane(&vol);
    engine.flush();
    assert!(!engine.begin_separator_drag(&vol));
    assert!(engine.begin_separator_drag(&rsi));

    engine.minimize_pane(&rsi);
    assert!(engine.separator_drag().is_none());
}
