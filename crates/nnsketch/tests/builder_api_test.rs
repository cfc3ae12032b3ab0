//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works and is usable.

use float_cmp::assert_approx_eq;

use nnsketch::{
    DiagramBuilder, NnsketchError,
    config::{AppConfig, LabelConfig, LayoutConfig, StyleConfig},
    draw::RecordingSurface,
    label::{LatexService, LinkedImages},
};

const TWO_THEN_THREE: &str = r#"
    [[layers]]
    nodes = 2
    connect = {}

    [[layers]]
    nodes = 3
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_simple_description() {
    let builder = DiagramBuilder::default();
    let result = builder.parse(TWO_THEN_THREE);
    assert!(
        result.is_ok(),
        "Should parse valid description: {:?}",
        result.err()
    );
    assert_eq!(result.unwrap().layers.len(), 2);
}

#[test]
fn test_parse_invalid_toml_returns_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("this is not [valid toml");
    assert!(matches!(result, Err(NnsketchError::Description(_))));
}

#[test]
fn test_built_layers_follow_layout_rules() {
    let builder = DiagramBuilder::default();
    let description = builder.parse(TWO_THEN_THREE).unwrap();
    let diagram = builder.build(&description).unwrap();

    let first: Vec<f32> = diagram.layers()[0]
        .layer()
        .nodes()
        .iter()
        .map(|node| node.y())
        .collect();
    let second: Vec<f32> = diagram.layers()[1]
        .layer()
        .nodes()
        .iter()
        .map(|node| node.y())
        .collect();
    assert_eq!(first, vec![0.0, 60.0]);
    assert_eq!(second, vec![0.0, 60.0, 120.0]);

    let mut surface = RecordingSurface::new();
    let summary = diagram
        .draw(&mut surface, &LinkedImages, &LatexService::default())
        .unwrap();
    assert_eq!(summary.edges, 6);

    let segments = surface.bezier_segments();
    assert_eq!(segments.len(), 6);
    for (start, c1, _, end) in &segments {
        assert_eq!(start.x(), 155.0);
        assert_eq!(end.x(), 310.0);
        assert_approx_eq!(f32, c1.x(), 255.0);
    }
}

#[test]
fn test_render_simple_diagram() {
    let builder = DiagramBuilder::default();
    let description = builder.parse(TWO_THEN_THREE).unwrap();
    let result = builder.render_svg(&description);

    if let Ok(svg) = result {
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");
        // 5 nodes with two regions, each filled and stroked, plus 6 edges
        assert_eq!(svg.matches("<path").count(), 5 * 4 + 6);
    } else {
        panic!("Failed to render: {:?}", result.err());
    }
}

#[test]
fn test_render_with_labels_links_latex_images() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default(),
        LabelConfig::new("https://latex.example/render?"),
    );
    let builder = DiagramBuilder::new(config);
    let description = builder
        .parse(
            r#"
            [[layers]]
            nodes = 2
            bias = true
            labels = { pre = "x_{III}", index_base = 0 }
            "#,
        )
        .unwrap();

    let svg = builder.render_svg(&description).unwrap();
    assert_eq!(svg.matches("<image").count(), 2);
    assert!(svg.contains("https://latex.example/render?"), "{svg}");
}

#[test]
fn test_background_and_margin_from_config() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::new(Some("white".to_string()), 0.0),
        LabelConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let description = builder.parse("[[layers]]\nnodes = 1\n").unwrap();

    let svg = builder.render_svg(&description).unwrap();
    assert!(svg.contains("<rect"), "{svg}");
    // border strokes are not part of the bounds; the body spans 165 x 50
    assert!(svg.contains("viewBox=\"0 0 165 50\""), "{svg}");
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse(TWO_THEN_THREE).unwrap();
    let svg1 = builder.render_svg(&first).unwrap();

    let second = builder
        .parse("[[layers]]\nnodes = 4\ntheme = \"purple\"\n")
        .unwrap();
    let svg2 = builder.render_svg(&second).unwrap();

    assert!(svg1.contains("<svg"), "First SVG should be valid");
    assert!(svg2.contains("<svg"), "Second SVG should be valid");
}

#[test]
fn test_fanned_shortage_is_draw_error() {
    let builder = DiagramBuilder::default();
    let description = builder
        .parse(
            r#"
            [[layers]]
            nodes = 2
            connect = { fan_source = true }

            [[layers]]
            nodes = 3
            "#,
        )
        .unwrap();

    assert!(matches!(
        builder.render_svg(&description),
        Err(NnsketchError::Draw(_))
    ));
}
