//! Trace companion: loading, static plot and animation

use std::thread;
use std::time::Duration;

use spring_study::output::plot_trace;
use spring_study::trace::{
    load_trace, render_trace_gif, AnimationConfig, Pacing, PenCommand, RecordingSurface,
    StopToken, TraceAnimator,
};
use spring_study::StudyError;

mod common;
use common::write_trace_csv;

fn square() -> Vec<(f64, f64)> {
    vec![(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)]
}

#[test]
fn test_load_trace_with_extra_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_trace_csv(dir.path(), &square());

    let trace = load_trace(&path).unwrap();
    assert_eq!(trace.points, square());
}

#[test]
fn test_missing_y_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "x,z\n1,2\n").unwrap();

    let err = load_trace(&path).unwrap_err();
    assert!(matches!(err, StudyError::MissingColumn(ref c) if c == "y"));
}

#[test]
fn test_plot_and_animate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let trace = load_trace(write_trace_csv(dir.path(), &square())).unwrap();

    let png = dir.path().join("movement.png");
    plot_trace(&trace, &png, None).unwrap();
    assert!(png.exists());

    let gif = dir.path().join("movement.gif");
    let summary = render_trace_gif(&trace, &AnimationConfig::default(), &gif, 2).unwrap();
    assert_eq!(summary.loops_completed, 2);
    assert_eq!(summary.points_drawn, 8);
    assert!(gif.exists());
}

#[test]
fn test_max_loops_respected() {
    let dir = tempfile::tempdir().unwrap();
    let trace = load_trace(write_trace_csv(dir.path(), &square())).unwrap();
    let config = AnimationConfig::default().loops(4).pacing(Pacing::Surface);

    let mut surface = RecordingSurface::new();
    let summary = TraceAnimator::new(config)
        .run(&trace, &mut surface, &StopToken::new())
        .unwrap();

    assert_eq!(summary.loops_completed, 4);
    assert_eq!(summary.points_drawn, 16);
    let clears = surface
        .commands
        .iter()
        .filter(|c| matches!(c, PenCommand::Clear))
        .count();
    assert_eq!(clears, 4);
}

#[test]
fn test_each_loop_restarts_from_origin() {
    let dir = tempfile::tempdir().unwrap();
    let trace = load_trace(write_trace_csv(dir.path(), &square())).unwrap();
    let config = AnimationConfig::default().loops(2).pacing(Pacing::Surface);

    let mut surface = RecordingSurface::new();
    TraceAnimator::new(config)
        .run(&trace, &mut surface, &StopToken::new())
        .unwrap();

    let restarts: Vec<usize> = surface
        .commands
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] == PenCommand::PenUp && w[1] == PenCommand::Goto(-400.0, 0.0))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(restarts.len(), 2);
    assert_eq!(restarts[0], 0);
}

#[test]
fn test_unbounded_animation_stops_from_other_thread() {
    let dir = tempfile::tempdir().unwrap();
    let trace = load_trace(write_trace_csv(dir.path(), &square())).unwrap();
    let config = AnimationConfig::default()
        .delays(Duration::from_millis(1), Duration::from_millis(1));

    let stop = StopToken::new();
    let controller = stop.clone();
    let animation = thread::spawn(move || {
        let mut surface = RecordingSurface::new();
        TraceAnimator::new(config).run(&trace, &mut surface, &stop)
    });

    thread::sleep(Duration::from_millis(100));
    controller.stop();

    let summary = animation.join().unwrap().unwrap();
    assert!(summary.stopped);
    assert!(summary.points_drawn > 0);
}
