//! Show configuration and environment.

use swingman_common::config::{config_file_path, AppConfig};

pub fn run() -> anyhow::Result<()> {
    println!("Swingman Environment Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!("[--] Config file: {} (using defaults)", config_path.display());
    }

    let config = AppConfig::load();
    if config.output_dir.exists() {
        println!("[OK] Output directory: {}", config.output_dir.display());
    } else {
        println!(
            "[--] Output directory: {} (created on first export)",
            config.output_dir.display()
        );
    }
    if std::env::var("SWINGMAN_OUTPUT_DIR").is_ok() {
        println!("     (overridden by SWINGMAN_OUTPUT_DIR)");
    }

    println!();
    println!("Tracking defaults:");
    println!(
        "  frame:            {}x{}",
        config.tracking.frame_width, config.tracking.frame_height
    );
    println!("  smoothing window: {}", config.tracking.smoothing_window);
    println!("  max jump:         {} px/frame", config.tracking.max_jump_px);
    println!(
        "  max speed:        {} px/s",
        config.tracking.max_expected_speed
    );
    println!(
        "  heatmap grid:     {}x{}",
        config.tracking.heatmap_cols, config.tracking.heatmap_rows
    );

    Ok(())
}
