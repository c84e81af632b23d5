//! Dense factors over boolean scopes and their algebra.

use bn_core::{bit, pack_bits, Observation, VarId};

/// Non-negative table over every assignment of an ordered variable scope.
///
/// Bit `j` of a table index holds the value of `scope[j]`. Factors are
/// values: every operation returns a new factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    scope: Vec<VarId>,
    table: Vec<f64>,
}

impl Factor {
    /// Creates a factor from its scope and table.
    ///
    /// # Panics
    ///
    /// Panics when `table.len() != 2^scope.len()`.
    pub fn new(scope: Vec<VarId>, table: Vec<f64>) -> Self {
        assert_eq!(
            table.len(),
            1usize << scope.len(),
            "factor table must cover every assignment of its scope"
        );
        Self { scope, table }
    }

    /// Factor with an empty scope and table `[1.0]`, the identity of
    /// [`Factor::multiply`].
    pub fn unit() -> Self {
        Self {
            scope: Vec::new(),
            table: vec![1.0],
        }
    }

    /// Ordered scope of the factor.
    pub fn scope(&self) -> &[VarId] {
        &self.scope
    }

    /// Raw table in index order.
    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Returns whether `var` is in scope.
    pub fn contains(&self, var: VarId) -> bool {
        self.scope.contains(&var)
    }

    /// Position of `var` within the scope.
    pub fn position(&self, var: VarId) -> Option<usize> {
        self.scope.iter().position(|candidate| *candidate == var)
    }

    /// Value at the assignment given in scope order.
    pub fn value(&self, values: &[bool]) -> f64 {
        debug_assert_eq!(values.len(), self.scope.len());
        self.table[pack_bits(values)]
    }

    /// Value at a raw table index.
    pub fn value_at(&self, index: usize) -> f64 {
        self.table[index]
    }

    /// Sum of the whole table.
    pub fn total(&self) -> f64 {
        self.table.iter().sum()
    }

    /// Returns whether table row `index` agrees with every observation whose
    /// variable is in scope. Observations outside the scope are ignored.
    pub fn matches(&self, index: usize, observations: &[Observation]) -> bool {
        observations.iter().all(|obs| match self.position(obs.var) {
            Some(pos) => bit(index, pos) == obs.value,
            None => true,
        })
    }

    /// Pointwise product over the union scope: `self`'s variables followed by
    /// `other`'s variables not already present.
    pub fn multiply(&self, other: &Factor) -> Factor {
        let mut scope = self.scope.clone();
        let other_positions: Vec<usize> = other
            .scope
            .iter()
            .map(|var| match scope.iter().position(|candidate| candidate == var) {
                Some(pos) => pos,
                None => {
                    scope.push(*var);
                    scope.len() - 1
                }
            })
            .collect();
        let self_mask = (1usize << self.scope.len()) - 1;

        let table = (0..1usize << scope.len())
            .map(|index| {
                let other_index = other_positions
                    .iter()
                    .enumerate()
                    .fold(0usize, |acc, (pos, union_pos)| {
                        acc | (usize::from(bit(index, *union_pos)) << pos)
                    });
                self.table[index & self_mask] * other.table[other_index]
            })
            .collect();
        Factor { scope, table }
    }

    /// Marginalizes `var` out by summing its two rows. A factor that does not
    /// mention `var` is returned unchanged.
    pub fn sum_out(&self, var: VarId) -> Factor {
        let Some(pos) = self.position(var) else {
            return self.clone();
        };
        let mut scope = self.scope.clone();
        scope.remove(pos);
        let low_mask = (1usize << pos) - 1;
        let table = (0..1usize << scope.len())
            .map(|index| {
                let low = index & low_mask;
                let high = (index & !low_mask) << 1;
                let with_false = high | low;
                let with_true = with_false | (1 << pos);
                self.table[with_false] + self.table[with_true]
            })
            .collect();
        Factor { scope, table }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: u32) -> VarId {
        VarId::from_raw(raw)
    }

    #[test]
    fn multiply_aligns_shared_variables() {
        // f1(a, b), f2(b, c)
        let f1 = Factor::new(vec![v(0), v(1)], vec![0.1, 0.2, 0.3, 0.4]);
        let f2 = Factor::new(vec![v(1), v(2)], vec![0.5, 0.6, 0.7, 0.8]);
        let product = f1.multiply(&f2);
        assert_eq!(product.scope(), &[v(0), v(1), v(2)]);
        // a=true, b=false, c=true
        let expected = f1.value(&[true, false]) * f2.value(&[false, true]);
        assert!((product.value(&[true, false, true]) - expected).abs() < 1e-12);
    }

    #[test]
    fn sum_out_middle_variable() {
        let factor = Factor::new(
            vec![v(0), v(1), v(2)],
            (0..8).map(|i| i as f64).collect(),
        );
        let reduced = factor.sum_out(v(1));
        assert_eq!(reduced.scope(), &[v(0), v(2)]);
        // a=true, c=true: rows 0b101 and 0b111
        assert_eq!(reduced.value(&[true, true]), 5.0 + 7.0);
        assert_eq!(reduced.total(), factor.total());
    }

    #[test]
    fn sum_out_absent_variable_is_identity() {
        let factor = Factor::new(vec![v(3)], vec![0.25, 0.75]);
        assert_eq!(factor.sum_out(v(9)), factor);
    }

    #[test]
    fn matches_ignores_out_of_scope_observations() {
        let factor = Factor::new(vec![v(0), v(1)], vec![1.0; 4]);
        let observations = [Observation::new(v(1), true), Observation::new(v(7), false)];
        assert!(factor.matches(0b10, &observations));
        assert!(!factor.matches(0b01, &observations));
    }

    #[test]
    fn unit_is_multiplicative_identity() {
        let factor = Factor::new(vec![v(2)], vec![0.4, 0.6]);
        assert_eq!(Factor::unit().multiply(&factor), factor);
        assert_eq!(factor.multiply(&Factor::unit()), factor);
    }
}
