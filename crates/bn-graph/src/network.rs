use std::fmt::{self, Display};

use bn_core::{Assignment, BnError, VarId};
use indexmap::IndexMap;
use tracing::debug;

use crate::cpt::Cpt;

/// A boolean random variable inside a network arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    parents: Vec<VarId>,
    cpt: Cpt,
}

impl Variable {
    pub(crate) fn new(name: String, parents: Vec<VarId>) -> Self {
        let cpt = Cpt::new(parents.len());
        Self { name, parents, cpt }
    }

    /// Unique name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parents in declaration order; this order fixes the CPT bit packing.
    pub fn parents(&self) -> &[VarId] {
        &self.parents
    }

    /// Conditional probability table of the variable.
    pub fn cpt(&self) -> &Cpt {
        &self.cpt
    }

    pub(crate) fn cpt_mut(&mut self) -> &mut Cpt {
        &mut self.cpt
    }
}

/// Incrementally declares variables, wires parents and fills CPTs.
///
/// Parents must be declared before their children, so every built network is
/// acyclic and identifier order is a valid ancestral order.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    variables: Vec<Variable>,
    names: IndexMap<String, VarId>,
}

impl NetworkBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with the given parents.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        parents: &[VarId],
    ) -> Result<VarId, BnError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(
                BnError::graph("duplicate-variable", "variable name already declared")
                    .with_context("name", &name),
            );
        }
        for (pos, parent) in parents.iter().enumerate() {
            if parent.index() >= self.variables.len() {
                return Err(BnError::graph("unknown-parent", "parent is not declared")
                    .with_context("name", &name)
                    .with_context("parent", parent.as_raw()));
            }
            if parents[..pos].contains(parent) {
                return Err(BnError::graph("duplicate-parent", "parent listed twice")
                    .with_context("name", &name)
                    .with_context("parent", parent.as_raw()));
            }
        }
        let id = VarId::from_index(self.variables.len());
        self.variables.push(Variable::new(name.clone(), parents.to_vec()));
        self.names.insert(name, id);
        Ok(id)
    }

    /// Declares a parentless variable with `P(var = true) = probability`.
    pub fn add_root(&mut self, name: impl Into<String>, probability: f64) -> Result<VarId, BnError> {
        let id = self.add_variable(name, &[])?;
        self.set_prior(id, probability)?;
        Ok(id)
    }

    /// Stores `P(var = true | parent_values)`.
    pub fn set_probability(
        &mut self,
        var: VarId,
        parent_values: &[bool],
        probability: f64,
    ) -> Result<(), BnError> {
        let variable = self.variables.get_mut(var.index()).ok_or_else(|| {
            BnError::graph("unknown-variable", "variable is not declared")
                .with_context("var", var.as_raw())
        })?;
        let name = variable.name.clone();
        variable
            .cpt_mut()
            .set(parent_values, probability)
            .map_err(|err| err.with_context("name", name))
    }

    /// Stores `P(var = true)` for a parentless variable.
    pub fn set_prior(&mut self, var: VarId, probability: f64) -> Result<(), BnError> {
        self.set_probability(var, &[], probability)
    }

    /// Looks up a declared variable by name.
    pub fn var(&self, name: &str) -> Option<VarId> {
        self.names.get(name).copied()
    }

    /// Freezes the builder, deriving child adjacency.
    pub fn build(self) -> Network {
        let mut children = vec![Vec::new(); self.variables.len()];
        for (index, variable) in self.variables.iter().enumerate() {
            for parent in &variable.parents {
                children[parent.index()].push(VarId::from_index(index));
            }
        }
        debug!(variables = self.variables.len(), "network frozen");
        Network {
            variables: self.variables,
            children,
            names: self.names,
        }
    }
}

/// Frozen, acyclic boolean Bayesian network.
///
/// The arena is never mutated after [`NetworkBuilder::build`]; inference
/// state lives in call-local [`Assignment`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    variables: Vec<Variable>,
    children: Vec<Vec<VarId>>,
    names: IndexMap<String, VarId>,
}

impl Network {
    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns whether the network has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Identifiers in declaration order, which is also an ancestral order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = VarId> + '_ {
        (0..self.variables.len()).map(VarId::from_index)
    }

    /// Looks up a variable by name.
    pub fn var(&self, name: &str) -> Option<VarId> {
        self.names.get(name).copied()
    }

    /// Looks up a variable by name, failing when it is absent.
    pub fn require(&self, name: &str) -> Result<VarId, BnError> {
        self.var(name).ok_or_else(|| {
            BnError::query("unknown-variable", "no variable with this name")
                .with_context("name", name)
        })
    }

    /// Returns the variable record.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this network.
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    /// Returns the variable name.
    pub fn name(&self, id: VarId) -> &str {
        self.variable(id).name()
    }

    /// Returns the parents of `id` in declaration order.
    pub fn parents(&self, id: VarId) -> &[VarId] {
        self.variable(id).parents()
    }

    /// Returns the children of `id` in identifier order.
    pub fn children(&self, id: VarId) -> &[VarId] {
        &self.children[id.index()]
    }

    /// CPT index selected by the parent values in `assignment`.
    pub fn parent_index(&self, id: VarId, assignment: &Assignment) -> usize {
        self.parents(id)
            .iter()
            .enumerate()
            .fold(0usize, |index, (pos, parent)| {
                index | (usize::from(assignment.get(*parent)) << pos)
            })
    }

    /// `P(id = true | parents as in assignment)`.
    pub fn probability_true(&self, id: VarId, assignment: &Assignment) -> Result<f64, BnError> {
        let index = self.parent_index(id, assignment);
        self.variable(id)
            .cpt()
            .get(index)
            .map_err(|err| err.with_context("name", self.name(id)))
    }

    /// `P(id = value | parents as in assignment)`.
    pub fn conditional(
        &self,
        id: VarId,
        value: bool,
        assignment: &Assignment,
    ) -> Result<f64, BnError> {
        let p_true = self.probability_true(id, assignment)?;
        Ok(if value { p_true } else { 1.0 - p_true })
    }

    /// Fails with the first CPT entry that was never set.
    pub fn validate_complete(&self) -> Result<(), BnError> {
        for variable in &self.variables {
            if let Some(index) = variable.cpt().missing().first() {
                return Err(BnError::model(
                    "missing-cpt-entry",
                    "conditional probability was never set",
                )
                .with_context("name", variable.name())
                .with_context("index", index));
            }
        }
        Ok(())
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bayesian network ({} variables)", self.len())?;
        for id in self.ids() {
            let variable = self.variable(id);
            let parent_names: Vec<&str> = variable
                .parents()
                .iter()
                .map(|parent| self.name(*parent))
                .collect();
            if parent_names.is_empty() {
                writeln!(f, "{}", variable.name())?;
            } else {
                writeln!(f, "{} <- {}", variable.name(), parent_names.join(", "))?;
            }
            for (index, entry) in variable.cpt().entries().iter().enumerate() {
                let given: Vec<String> = parent_names
                    .iter()
                    .enumerate()
                    .map(|(pos, name)| format!("{name}={}", bn_core::bit(index, pos)))
                    .collect();
                let rendered = match entry {
                    Some(p) => format!("{p}"),
                    None => "?".to_string(),
                };
                if given.is_empty() {
                    writeln!(f, "  P({}) = {rendered}", variable.name())?;
                } else {
                    writeln!(
                        f,
                        "  P({} | {}) = {rendered}",
                        variable.name(),
                        given.join(", ")
                    )?;
                }
            }
        }
        Ok(())
    }
}
