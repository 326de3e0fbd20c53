use std::fmt::Display;

/// Join items into a comma separated string.
pub fn fmt_vec_output<T: Display>(v: &[T]) -> String {
    let mut res = String::new();
    if let Some(last) = v.len().checked_sub(1) {
        for n in &v[..last] {
            res.push_str(format!("{}", n).as_str());
            res.push_str(", ");
        }
        res.push_str(format!("{}", &v[last]).as_str());
    }
    res
}

pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
