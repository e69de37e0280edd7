//! Пример: чтение pulse stream файла через PulseStreamReader
//!
//! Демонстрирует:
//! - открытие файла и валидацию заголовка
//! - итерацию записей и обнаружение оборванного хвоста
//! - сверку числа записей с размером файла
//!
//! Запуск: `cargo run -p pulse-core --example read_pulse_stream -- run1.bin`

use std::fs::File;

use pulse_core::{expected_layout, read_all_pulses, PulseStreamReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "run1.bin".to_string());

    let file = File::open(&input_path)?;
    let file_len = file.metadata()?.len();

    let mut reader = PulseStreamReader::new(file)?;
    let h = *reader.header();

    println!("✓ Header validated");
    println!("  Version       : {}", h.version);
    println!("  Sweep         : {} ns", h.sweep_in_nanoseconds);
    println!("  Sample speed  : {} GHz", h.sample_speed_in_ghz);
    println!("  Sample points : {}", h.number_of_sample_points);

    let layout = expected_layout(file_len, &h)?;
    let pulses = read_all_pulses(&mut reader)?;

    println!("\n✓ Read complete");
    println!("  Records       : {}", pulses.len());
    println!("  Expected      : {}", layout.records);
    println!("  Trailing bytes: {}", reader.stats().trailing_bytes);

    if let Some(first) = pulses.first() {
        let peak = first
            .voltage
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        println!("\nFirst pulse: {} samples, peak {peak} V", first.sample_count());
    }

    Ok(())
}
