//! End-to-end gestures driven through the editor facade

use approx::assert_relative_eq;
use donut_core::{
    Axis, DrawCommand, Editor, EditorConfig, InputEvent, InteractionState, Mesh, MeshChange, Stroke,
    VertexId,
};
use nalgebra::Point2;

fn editor_with(vertices: &[[f32; 3]], edges: &[(usize, usize)]) -> (Editor, Vec<DrawCommand>) {
    let mesh = Mesh::from_lists(vertices, edges).unwrap();
    let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
    let mut canvas = Vec::new();
    editor.redraw(&mut canvas);
    (editor, canvas)
}

#[test]
fn release_in_empty_space_adds_nothing() {
    let (mut editor, mut canvas) = editor_with(&[[0.0, 0.0, 0.0]], &[]);
    assert_eq!(
        editor.screen_position(VertexId::from_index(0)),
        Some(Point2::new(250.0, 250.0))
    );

    editor
        .handle(InputEvent::LeftClick(Point2::new(250.0, 250.0)), &mut canvas)
        .unwrap();
    assert!(matches!(editor.state(), InteractionState::Dragging { .. }));

    canvas.clear();
    let change = editor
        .handle(InputEvent::Release(Point2::new(260.0, 260.0)), &mut canvas)
        .unwrap();

    assert_eq!(change, None);
    assert!(editor.mesh().edges().is_empty());
    assert_eq!(*editor.state(), InteractionState::Idle);
    assert!(!canvas
        .iter()
        .any(|c| matches!(c, DrawCommand::Line(_, _, Stroke::Preview))));
}

#[test]
fn drag_between_vertices_adds_one_edge() {
    // Screen positions (100, 100) and (200, 200) on the default 500x500 canvas
    let (mut editor, mut canvas) = editor_with(&[[-150.0, -150.0, 0.0], [-50.0, -50.0, 0.0]], &[]);

    editor
        .handle(InputEvent::LeftClick(Point2::new(100.0, 100.0)), &mut canvas)
        .unwrap();
    editor
        .handle(InputEvent::Drag(Point2::new(150.0, 150.0)), &mut canvas)
        .unwrap();
    let change = editor
        .handle(InputEvent::Release(Point2::new(200.0, 200.0)), &mut canvas)
        .unwrap();

    let Some(MeshChange::EdgeAdded(edge)) = change else {
        panic!("expected an edge, got {change:?}");
    };
    assert_eq!(edge.indices(), (0, 1));
    assert_eq!(editor.mesh().edge_indices(), vec![(0, 1)]);
    assert!(canvas.contains(&DrawCommand::Line(
        Point2::new(100.0, 100.0),
        Point2::new(200.0, 200.0),
        Stroke::Edge
    )));
}

#[test]
fn right_click_at_center_adds_origin_vertex() {
    let (mut editor, mut canvas) = editor_with(&[], &[]);

    let change = editor
        .handle(InputEvent::RightClick(Point2::new(250.0, 250.0)), &mut canvas)
        .unwrap();

    assert_eq!(change, Some(MeshChange::VertexAdded(VertexId::from_index(0))));
    let vertex = editor.mesh().vertices()[0];
    assert_relative_eq!(vertex.initial.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(vertex.initial.y, 0.0, epsilon = 1e-4);
    assert!(canvas.contains(&DrawCommand::Point(Point2::new(250.0, 250.0))));
    assert!(canvas
        .iter()
        .any(|c| matches!(c, DrawCommand::Label(at, _) if *at == Point2::new(260.0, 240.0))));
}

#[test]
fn added_vertex_can_be_connected() {
    let (mut editor, mut canvas) = editor_with(&[[0.0, 0.0, 0.0]], &[]);

    editor
        .handle(InputEvent::RightClick(Point2::new(350.0, 250.0)), &mut canvas)
        .unwrap();
    editor
        .handle(InputEvent::LeftClick(Point2::new(350.0, 250.0)), &mut canvas)
        .unwrap();
    let change = editor
        .handle(InputEvent::Release(Point2::new(252.0, 248.0)), &mut canvas)
        .unwrap();

    assert!(matches!(change, Some(MeshChange::EdgeAdded(_))));
    assert_eq!(editor.mesh().edge_indices(), vec![(1, 0)]);
}

#[test]
fn hit_testing_follows_rotation() {
    let (mut editor, mut canvas) = editor_with(&[[100.0, 0.0, 0.0], [0.0, 0.0, 0.0]], &[]);

    // Z is applied by the rotation pass and again by the projection: 45 + 45
    editor
        .handle(InputEvent::SliderChanged(Axis::Z, 45.0), &mut canvas)
        .unwrap();
    let moved = editor.screen_position(VertexId::from_index(0)).unwrap();
    assert_relative_eq!(moved.x, 250.0, epsilon = 1e-3);
    assert_relative_eq!(moved.y, 350.0, epsilon = 1e-3);

    // The old screen spot no longer hits anything
    editor
        .handle(InputEvent::LeftClick(Point2::new(350.0, 250.0)), &mut canvas)
        .unwrap();
    assert_eq!(*editor.state(), InteractionState::Idle);

    editor
        .handle(InputEvent::LeftClick(Point2::new(250.0, 350.0)), &mut canvas)
        .unwrap();
    let change = editor
        .handle(InputEvent::Release(Point2::new(250.0, 250.0)), &mut canvas)
        .unwrap();
    assert_eq!(change.map(|c| matches!(c, MeshChange::EdgeAdded(_))), Some(true));
    assert_eq!(editor.mesh().edge_indices(), vec![(0, 1)]);
}

#[test]
fn zero_rotation_keeps_initial_positions() {
    let (mut editor, mut canvas) = editor_with(&[[10.0, -20.0, 30.0]], &[]);
    editor
        .handle(InputEvent::SliderChanged(Axis::Y, 360.0), &mut canvas)
        .unwrap();

    let vertex = editor.mesh().vertices()[0];
    assert_eq!(vertex.current, vertex.initial);
}

#[test]
fn fresh_editor_hits_vertices_before_first_redraw() {
    let mesh = Mesh::from_lists(&[[-150.0, -150.0, 0.0], [-50.0, -50.0, 0.0]], &[]).unwrap();
    let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
    let mut canvas = Vec::new();

    assert_eq!(
        editor.screen_position(VertexId::from_index(1)),
        Some(Point2::new(200.0, 200.0))
    );

    editor
        .handle(InputEvent::LeftClick(Point2::new(100.0, 100.0)), &mut canvas)
        .unwrap();
    let change = editor
        .handle(InputEvent::Release(Point2::new(200.0, 200.0)), &mut canvas)
        .unwrap();

    assert!(matches!(change, Some(MeshChange::EdgeAdded(_))));
    assert_eq!(editor.mesh().edge_indices(), vec![(0, 1)]);
}
