use chart_panes::api::{ChartEngine, ChartEngineConfig};
use chart_panes::core::{
    PaneId, PaneKind, PaneOptions, PaneOptionsUpdate, PaneState, Viewport,
};
use chart_panes::extensions::FixedAxisProvider;
use chart_panes::render::NullRenderer;
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::test_runner::TestCaseError;

const CONTAINER_HEIGHT: f64 = 900.0;
const TIME_AXIS_HEIGHT: f64 = 30.0;
const SEPARATOR_SIZE: f64 = 1.0;

#[derive(Debug, Clone)]
enum PaneOp {
    Minimize(Index),
    Maximize(Index),
    Restore(Index),
    Remove(Index),
    SetHeight(Index, f64),
    Drag(Index, f64),
    Resize(u32),
    TimeAxisHeight(f64),
}

fn pane_op() -> impl Strategy<Value = PaneOp> {
    prop_oneof![
        any::<Index>().prop_map(PaneOp::Minimize),
        any::<Index>().prop_map(PaneOp::Maximize),
        any::<Index>().prop_map(PaneOp::Restore),
        any::<Index>().prop_map(PaneOp::Remove),
        (any::<Index>(), 20.0f64..400.0).prop_map(|(pane, height)| PaneOp::SetHeight(pane, height)),
        (any::<Index>(), -200.0f64..200.0).prop_map(|(pane, distance)| PaneOp::Drag(pane, distance)),
        (300u32..1_200).prop_map(PaneOp::Resize),
        (10.0f64..60.0).prop_map(PaneOp::TimeAxisHeight),
    ]
}

fn build_engine(panes: &[(f64, f64)]) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, CONTAINER_HEIGHT as u32))
        .with_separator(SEPARATOR_SIZE, false)
        .with_axis_sizes(TIME_AXIS_HEIGHT, 60.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    for (index, (height, min_height)) in panes.iter().enumerate() {
        let kind = if index % 2 == 0 {
            PaneKind::Indicator
        } else {
            PaneKind::Script
        };
        engine
            .add_pane(
                kind,
                None,
                PaneOptions {
                    height: Some(*height),
                    min_height: Some(*min_height),
                    ..PaneOptions::default()
                },
            )
            .expect("generated pane");
        engine.flush();
    }
    engine.flush();
    engine
}

fn content_pane_ids(engine: &ChartEngine<NullRenderer>) -> Vec<PaneId> {
    engine
        .pane_ids()
        .into_iter()
        .filter(|pane_id| !pane_id.is_time_axis())
        .collect()
}

/// Container and time-axis heights the layout must fill.
#[derive(Debug, Clone, Copy)]
struct Frame {
    container: f64,
    time_axis: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            container: CONTAINER_HEIGHT,
            time_axis: TIME_AXIS_HEIGHT,
        }
    }
}

fn apply(engine: &mut ChartEngine<NullRenderer>, frame: &mut Frame, op: &PaneOp) {
    let ids = content_pane_ids(engine);
    match op {
        PaneOp::Minimize(index) => {
            engine.minimize_pane(index.get(&ids));
        }
        PaneOp::Maximize(index) => {
            engine.maximize_pane(index.get(&ids));
        }
        PaneOp::Restore(index) => {
            engine.restore_pane(index.get(&ids));
        }
        PaneOp::Remove(index) => {
            engine.remove_pane(index.get(&ids));
        }
        PaneOp::SetHeight(index, height) => {
            engine.set_pane_options(
                index.get(&ids),
                PaneOptionsUpdate {
                    height: Some(*height),
                    ..PaneOptionsUpdate::default()
                },
            );
        }
        PaneOp::Drag(index, distance) => {
            if engine.begin_separator_drag(index.get(&ids)) {
                engine.drag_separator(*distance);
                engine.end_separator_drag();
            }
        }
        PaneOp::Resize(height) => {
            engine.resize(800, *height);
            frame.container = f64::from(*height);
        }
        PaneOp::TimeAxisHeight(height) => {
            engine.set_axis_provider(Box::new(FixedAxisProvider {
                time_axis_height: *height,
                value_axis_width: 60.0,
            }));
            frame.time_axis = *height;
        }
    }
    engine.flush();
}

fn check_layout(engine: &ChartEngine<NullRenderer>, frame: Frame) -> Result<(), TestCaseError> {
    let snapshot = engine.layout_snapshot();
    prop_assert!((snapshot.occupied_height() - frame.container).abs() <= 1e-6);

    let time_axis = snapshot.pane(&PaneId::time_axis()).expect("time axis layout");
    prop_assert!((time_axis.root.top - (frame.container - frame.time_axis)).abs() <= 1e-6);
    prop_assert!((time_axis.root.height - frame.time_axis).abs() <= 1e-6);

    let panes = engine.panes();
    let maximized = panes
        .iter()
        .filter(|pane| pane.state == PaneState::Maximized)
        .count();
    prop_assert!(maximized <= 1);

    let separators: f64 = snapshot
        .panes
        .iter()
        .filter_map(|layout| layout.separator.map(|separator| separator.height))
        .sum();
    let floors: f64 = panes
        .iter()
        .filter(|pane| pane.kind != PaneKind::TimeAxis && pane.visible)
        .map(|pane| match pane.state {
            PaneState::Minimized if pane.kind != PaneKind::Candle => pane.height,
            _ => pane.min_height,
        })
        .sum();
    let floors_fit = floors + separators <= frame.container - frame.time_axis + 1e-6;

    for pane in panes.iter().filter(|pane| pane.kind != PaneKind::TimeAxis) {
        let layout = snapshot.pane(&pane.id).expect("pane layout");
        if floors_fit && pane.state == PaneState::Normal && pane.visible {
            prop_assert!(
                layout.root.height + 1e-6 >= pane.min_height,
                "pane {} laid out at {} below min {}",
                pane.id,
                layout.root.height,
                pane.min_height
            );
        }
        if !pane.visible {
            prop_assert_eq!(layout.root.height, 0.0);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pane_operations_keep_layout_invariants(
        panes in prop::collection::vec((40.0f64..150.0, 10.0f64..=30.0), 0..=4),
        ops in prop::collection::vec(pane_op(), 1..24)
    ) {
        let mut engine = build_engine(&panes);
        let mut frame = Frame::default();
        check_layout(&engine, frame)?;
        for op in &ops {
            apply(&mut engine, &mut frame, op);
            check_layout(&engine, frame)?;
        }
    }

    #[test]
    fn minimize_restore_round_trip_returns_to_previous_heights(
        panes in prop::collection::vec((40.0f64..150.0, 10.0f64..=30.0), 1..=4),
        pick in any::<Index>()
    ) {
        let mut engine = build_engine(&panes);
        let ids = content_pane_ids(&engine);
        let target = pick.get(&ids[1..]).clone();
        let before: Vec<f64> = engine.panes().iter().map(|pane| pane.height).collect();

        prop_assert!(engine.minimize_pane(&target));
        engine.flush();
        prop_assert!(engine.restore_pane(&target));
        engine.flush();

        let after: Vec<f64> = engine.panes().iter().map(|pane| pane.height).collect();
        prop_assert_eq!(before, after);
    }
}
