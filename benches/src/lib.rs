//! Бенчмарки записи и чтения pulse stream. См. `benches/`.
