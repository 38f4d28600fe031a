/// Arithmetic mean; `NaN` for no values
pub fn mean(values: &[f32]) -> f32 { values.iter().sum::<f32>() / values.len() as f32 }

/// Population variance; `NaN` for no values
pub fn variance(values: &[f32]) -> f32 {
    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
}
