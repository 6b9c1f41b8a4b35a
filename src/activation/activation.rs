use crate::error::{NnError, NnResult};
use crate::math::vector::Vector;

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid, evaluated from the pre-activation value.
pub fn dsigmoid(x: f32) -> f32 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

fn map_into(op: &'static str, out: &mut Vector, v: &Vector, f: fn(f32) -> f32) -> NnResult<()> {
    if out.len() != v.len() {
        return Err(NnError::shape(op, out.shape(), v.shape()));
    }
    for (o, &x) in out.as_mut_slice().iter_mut().zip(v.as_slice()) {
        *o = f(x);
    }
    Ok(())
}

/// `out[i] = sigmoid(v[i])`.
pub fn sigmoid_vec(out: &mut Vector, v: &Vector) -> NnResult<()> {
    map_into("sigmoid_vec", out, v, sigmoid)
}

/// `out[i] = dsigmoid(v[i])`.
pub fn dsigmoid_vec(out: &mut Vector, v: &Vector) -> NnResult<()> {
    map_into("dsigmoid_vec", out, v, dsigmoid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(dsigmoid(0.0), 0.25);
    }

    #[test]
    fn vector_forms_apply_element_wise() {
        let z = Vector::from_vec(vec![0.0, 1.0]);
        let mut a = Vector::zeros(2).unwrap();
        sigmoid_vec(&mut a, &z).unwrap();
        assert_eq!(a[0], 0.5);
        assert!((a[1] - 0.731_058_6).abs() < 1e-6);

        dsigmoid_vec(&mut a, &z).unwrap();
        assert_eq!(a[0], 0.25);
        assert!((a[1] - 0.196_611_93).abs() < 1e-6);
    }

    #[test]
    fn vector_forms_check_length() {
        let mut out = Vector::zeros(3).unwrap();
        assert!(sigmoid_vec(&mut out, &Vector::from_vec(vec![0.0])).is_err());
    }

    proptest! {
        #[test]
        fn derivative_matches_closed_form(x in -30.0f32..30.0) {
            let s = sigmoid(x);
            prop_assert_eq!(dsigmoid(x), s * (1.0 - s));
        }

        #[test]
        fn sigmoid_is_bounded(x in -15.0f32..15.0) {
            let s = sigmoid(x);
            prop_assert!(s > 0.0 && s < 1.0);
        }

        #[test]
        fn sigmoid_is_monotonic(x in -30.0f32..30.0, dx in 0.0f32..5.0) {
            prop_assert!(sigmoid(x + dx) >= sigmoid(x));
        }
    }
}
