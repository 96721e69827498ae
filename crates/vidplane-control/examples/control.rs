//! Basic control plane example
//!
//! This example demonstrates:
//! - Creating the dispatcher with a custom initial configuration
//! - Flipping variables the way a UI or IPC host would
//! - Draining the translated commands the way the pipeline would
//!
//! Run with: cargo run --example control

use vidplane_control::{
    command_channel, ChainKind, ControlConfig, ControlDispatcher, FilterRegistry, VarId,
};

/// A host module registry that knows two filters.
struct DemoRegistry;

impl FilterRegistry for DemoRegistry {
    fn classify(&self, module: &str) -> Option<ChainKind> {
        match module {
            "deinterlace" | "adjust" => Some(ChainKind::VideoFilter),
            "marquee" => Some(ChainKind::SubSource),
            _ => None,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== vidplane-control Example ===\n");

    let (commands, pipeline) = command_channel();
    let config = ControlConfig::builder()
        .crop("16:9")
        .custom_aspect_ratios("64:27")
        .build();
    let dispatcher = ControlDispatcher::new(config, commands)?;

    println!("Initial replay to the pipeline:");
    for command in pipeline.drain() {
        println!("  {:?}", command);
    }

    println!("\nAvailable zoom choices:");
    for choice in dispatcher.choices(VarId::Zoom) {
        println!("  {} ({})", choice.value, choice.label);
    }

    // A UI flips some switches...
    dispatcher.set_float(VarId::Zoom, 0.5)?;
    dispatcher.set_string(VarId::AspectRatio, "64:27")?;
    dispatcher.set_bool(VarId::Fullscreen, true)?;
    dispatcher.toggle_filter(&DemoRegistry, "deinterlace", true, None)?;

    // ...and a bad crop string from the CLI is survived
    dispatcher.set_string(VarId::Crop, "sideways")?;

    println!("\nCommands the pipeline drains:");
    for command in pipeline.drain() {
        println!("  {:?}", command);
    }

    println!(
        "\nCrop value kept after the bad input: {:?}",
        dispatcher.get(VarId::Crop)?
    );
    Ok(())
}
