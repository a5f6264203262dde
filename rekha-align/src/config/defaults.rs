//! Default value functions for serde deserialization.

pub fn canvas_width() -> f64 {
    800.0
}

pub fn canvas_height() -> f64 {
    600.0
}

pub fn gap() -> f64 {
    20.0
}

pub fn flatten_tolerance() -> f64 {
    crate::core::outline::DEFAULT_FLATTEN_TOLERANCE
}
