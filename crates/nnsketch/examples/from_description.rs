//! Example: Creating a diagram from a description built in code
//!
//! This example builds a small 3-4-2 network without writing any TOML,
//! using the description types directly.

use nnsketch::{
    DiagramBuilder,
    description::{
        ColorsDescription, ConnectDescription, DiagramDescription, LabelsDescription,
        LayerDescription, ThemeDescription,
    },
    label::LabelSize,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram from a description...\n");

    // Input layer with a bias node, wired with per-target colors
    let mut inputs = LayerDescription::new(3);
    inputs.theme = ThemeDescription::Single("input_grey".to_string());
    inputs.bias = true;
    inputs.labels = Some(LabelsDescription {
        pre: Some("x_{III}".to_string()),
        post: None,
        size: LabelSize::Large,
        index_base: 0,
    });
    inputs.connect = Some(ConnectDescription {
        target_theme_colors: true,
        skip_target_bias: true,
        ..ConnectDescription::default()
    });

    // Hidden layer, one theme per node
    let mut hidden = LayerDescription::new(4);
    hidden.theme = ThemeDescription::PerNode(
        ["green", "orange", "purple", "blue"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
    );
    hidden.labels = Some(LabelsDescription {
        pre: Some("z_{III}^{(LLL)}".to_string()),
        post: Some("a_{III}^{(LLL)}".to_string()),
        size: LabelSize::Normal,
        index_base: 1,
    });
    hidden.connect = Some(ConnectDescription {
        colors: Some(ColorsDescription::Single("#AAAAAA".to_string())),
        ..ConnectDescription::default()
    });

    let mut outputs = LayerDescription::new(2);
    outputs.theme = ThemeDescription::Single("tangerine".to_string());

    let description = DiagramDescription {
        layers: vec![inputs, hidden, outputs],
        ..DiagramDescription::default()
    };

    println!("Created description:");
    println!("  Layers: {}", description.layers.len());
    println!();

    // Render the description to SVG using DiagramBuilder
    println!("Rendering to SVG...");
    let builder = DiagramBuilder::default();
    let svg = builder.render_svg(&description)?;

    println!("SVG generated successfully!");
    println!("SVG length: {} bytes", svg.len());

    let output_path = "from_description_output.svg";
    std::fs::write(output_path, &svg)?;
    println!("SVG written to: {}", output_path);

    Ok(())
}
