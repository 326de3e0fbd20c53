use crate::data::CategoricalData;
use crate::errors::DecisionTreeError;

/// Fraction of predictions equal to the true label.
/// * `y` - True labels.
/// * `yhat` - Predicted labels, co-indexed with `y`.
pub fn accuracy<L: CategoricalData>(y: &[L], yhat: &[L]) -> Result<f64, DecisionTreeError> {
    if y.len() != yhat.len() {
        return Err(DecisionTreeError::ShapeMismatch(y.len(), yhat.len()));
    }
    if y.is_empty() {
        return Err(DecisionTreeError::EmptyInput);
    }
    let correct = y.iter().zip(yhat).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y.len() as f64)
}
