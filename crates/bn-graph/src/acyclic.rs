use bn_core::BnError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    NotVisited,
    Visiting,
    Visited,
}

/// Orders declarations so that every parent precedes its children.
///
/// `parents[i]` lists the declaration indices of the parents of declaration
/// `i`. Ties keep the listed order; a directed cycle is an error.
pub(crate) fn ancestral_order(
    names: &[String],
    parents: &[Vec<usize>],
) -> Result<Vec<usize>, BnError> {
    let mut states = vec![VisitState::NotVisited; parents.len()];
    let mut order = Vec::with_capacity(parents.len());
    for start in 0..parents.len() {
        visit(start, parents, &mut states, &mut order).map_err(|node| {
            BnError::graph("would-create-cycle", "parent relation contains a directed cycle")
                .with_context("name", &names[node])
        })?;
    }
    Ok(order)
}

fn visit(
    node: usize,
    parents: &[Vec<usize>],
    states: &mut [VisitState],
    order: &mut Vec<usize>,
) -> Result<(), usize> {
    match states[node] {
        VisitState::Visiting => Err(node),
        VisitState::Visited => Ok(()),
        VisitState::NotVisited => {
            states[node] = VisitState::Visiting;
            for parent in &parents[node] {
                visit(*parent, parents, states, order)?;
            }
            states[node] = VisitState::Visited;
            order.push(node);
            Ok(())
        }
    }
}
