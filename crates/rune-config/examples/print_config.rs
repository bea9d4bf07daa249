/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::RuneLineConfig::load();

    println!("=== rune-line Configuration ===\n");

    println!("Font Settings:");
    println!("  Path: {:?}", config.font.path);
    println!("  Index: {}", config.font.index);
    println!("  Pixel Size: {}", config.font.pixel_size);
    println!();

    println!("Text Settings:");
    println!("  Path: {:?}", config.text.path);
    println!("  Encoding: {:?}", config.text.encoding);
    println!("  Language: {:?}", config.text.language);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
