//! Пример: запись pulse stream файла с синтетическими импульсами
//!
//! Демонстрирует:
//! - запуск сессии и запись заголовка
//! - запись одиночных импульсов и пар (два канала одного триггера)
//! - итоговую сводку при stop_and_save()
//!
//! Запуск: `cargo run -p pulse-recorder --example write_pulse_stream`

use pulse_recorder::{PulseStreamWriter, StreamParams};

/// Импульс ФЭУ: быстрый фронт и экспоненциальный спад.
fn synthetic_pulse(
    params: &StreamParams,
    amplitude: f32,
    onset_ns: f32,
) -> (Vec<f32>, Vec<f32>) {
    let n = params.number_of_sample_points as usize;
    let dt = (1.0 / params.sample_speed_in_ghz) as f32;
    let rise = 0.8_f32;
    let decay = 6.0_f32;

    let time: Vec<f32> = (0..n).map(|i| i as f32 * dt).collect();
    let voltage = time
        .iter()
        .map(|&t| {
            let x = t - onset_ns;
            if x < 0.0 {
                0.0
            } else {
                -amplitude * (1.0 - (-x / rise).exp()) * (-x / decay).exp()
            }
        })
        .collect();

    (time, voltage)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let output_path = "run1.bin";
    let params = StreamParams::new(200.0, 2.5, 500);

    let mut writer = PulseStreamWriter::new();
    writer.start(output_path, &params)?;

    for k in 0..100 {
        let (time, voltage) = synthetic_pulse(&params, 0.2 + 0.002 * k as f32, 40.0);
        writer.write_pulse(&time, &voltage)?;
    }

    // Совпадения: старт и стоп импульсы в двух каналах
    for k in 0..50 {
        let (t1, v1) = synthetic_pulse(&params, 0.3, 40.0);
        let (t2, v2) = synthetic_pulse(&params, 0.25, 40.0 + 0.5 * k as f32);
        writer.write_pulse_pair(&t1, &v1, &t2, &v2)?;
    }

    println!(
        "Streamed {} bytes to {:?}",
        writer.streamed_content_in_bytes(),
        writer.file_name()
    );

    if let Some(summary) = writer.stop_and_save()? {
        println!("\n{summary}");
    }

    Ok(())
}
