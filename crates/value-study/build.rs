use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Inverse sRGB transfer with the WCAG 2.0 threshold (0.03928).
fn srgb_to_linear_exact(srgb: f64) -> f64 {
    if srgb <= 0.03928 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("gamma_lut.rs");
    let mut file = File::create(&dest_path).unwrap();

    // One entry per 8-bit channel value. `{:?}` prints the shortest string
    // that round-trips, so the table holds the exact f64 results.
    writeln!(file, "/// Lookup table for 8-bit sRGB to linear conversion").unwrap();
    writeln!(file, "/// Index: 8-bit channel value, Value: linear light (0.0..=1.0)").unwrap();
    writeln!(file, "pub static SRGB8_TO_LINEAR: [f64; 256] = [").unwrap();
    for i in 0..256 {
        let linear = srgb_to_linear_exact(i as f64 / 255.0);
        if i > 0 && i % 4 == 0 {
            writeln!(file).unwrap();
        }
        write!(file, "    {:?},", linear).unwrap();
    }
    writeln!(file, "\n];").unwrap();

    println!("cargo::rerun-if-changed=build.rs");
}
