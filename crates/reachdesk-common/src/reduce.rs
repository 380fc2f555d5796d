//! Small pure reducers shared by the derived-metric code paths
//! (campaign KPIs and proposal budgets).

use std::iter::Sum;

/// Sum a numeric field over a collection.
pub fn sum_by<'a, T, N, F>(items: impl IntoIterator<Item = &'a T>, field: F) -> N
where
    T: 'a,
    N: Sum<N>,
    F: FnMut(&'a T) -> N,
{
    items.into_iter().map(field).sum()
}

/// Arithmetic mean of a field; 0.0 for an empty collection, never NaN.
pub fn mean_by<'a, T, F>(items: impl IntoIterator<Item = &'a T>, mut field: F) -> f64
where
    T: 'a,
    F: FnMut(&'a T) -> f64,
{
    let (sum, count) = items
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), item| (sum + field(item), count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Cents;

    struct Line {
        price: Cents,
        qty: u32,
    }

    #[test]
    fn test_sum_by_money() {
        let lines = vec![
            Line { price: Cents(1_000), qty: 2 },
            Line { price: Cents(250), qty: 4 },
        ];
        let total: Cents = sum_by(&lines, |l| l.price * l.qty);
        assert_eq!(total, Cents(3_000));
    }

    #[test]
    fn test_mean_of_nothing_is_zero() {
        let empty: Vec<f64> = vec![];
        assert_eq!(mean_by(&empty, |v| *v), 0.0);
        assert_eq!(mean_by(&[2.0, 4.0], |v| *v), 3.0);
    }
}
