pub mod json;
pub mod text;

pub fn format_score(v: f64) -> String {
    format!("{v:.2}")
}

pub fn format_delta(v: f64) -> String {
    if v > 0.0 {
        format!("+{v:.2}")
    } else if v < 0.0 {
        format!("{v:.2}")
    } else {
        "0.00".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
