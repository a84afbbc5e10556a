use crate::{
    change::Change,
    model::{Board, FunctionFlow},
    repository::{BoardRecord, Repository},
    types::Id,
};
use proptest::prelude::*;

const NAMES: [&str; 5] = ["alpha", "beta", "delta", "omega", "sigma"];

/// One abstract edit. Entity operands are pool indices resolved against
/// whatever the board holds when the op is materialized, so generated
/// sequences stay valid no matter what ran before them.
#[derive(Clone, Copy, Debug)]
enum EditOp {
    AddFunction(u8),
    RemoveFunction(u8),
    RenameFunction(u8, u8),
    AddFlow(u8, u8),
    RemoveFlow(u8),
    LinkFlowToFunction(u8, u8),
    LinkFlowToExternal(u8, u8),
    UnlinkFlow(u8),
    AddExternalFlow(u8),
    RemoveExternalFlow(u8),
}

fn arb_op() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        any::<u8>().prop_map(EditOp::AddFunction),
        any::<u8>().prop_map(EditOp::RemoveFunction),
        (any::<u8>(), any::<u8>())
            .prop_map(|(function, name)| EditOp::RenameFunction(function, name)),
        (any::<u8>(), any::<u8>()).prop_map(|(function, name)| EditOp::AddFlow(function, name)),
        any::<u8>().prop_map(EditOp::RemoveFlow),
        (any::<u8>(), any::<u8>())
            .prop_map(|(flow, target)| EditOp::LinkFlowToFunction(flow, target)),
        (any::<u8>(), any::<u8>())
            .prop_map(|(flow, target)| EditOp::LinkFlowToExternal(flow, target)),
        any::<u8>().prop_map(EditOp::UnlinkFlow),
        any::<u8>().prop_map(EditOp::AddExternalFlow),
        any::<u8>().prop_map(EditOp::RemoveExternalFlow),
    ]
}

const fn name(pick: u8) -> &'static str {
    NAMES[pick as usize % NAMES.len()]
}

fn pick<K>(ids: &[Id<K>], index: u8) -> Option<Id<K>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index as usize % ids.len()])
    }
}

fn flows_on(board: &Board) -> Vec<Id<FunctionFlow>> {
    board
        .functions
        .iter()
        .flat_map(|function| board.function(*function).flows.iter().copied())
        .collect()
}

/// Resolve op operands against the current board. `None` means the op has
/// nothing to act on yet (no functions to remove, no flows to link).
fn materialize(board: &Board, op: EditOp) -> Option<Change> {
    match op {
        EditOp::AddFunction(n) => Some(Change::add_function_unbound(board, name(n))),
        EditOp::RemoveFunction(f) => {
            pick(&board.functions, f).map(|function| Change::remove_function(board, function))
        }
        EditOp::RenameFunction(f, n) => pick(&board.functions, f)
            .map(|function| Change::rename_function(board, function, name(n))),
        EditOp::AddFlow(f, n) => pick(&board.functions, f)
            .map(|function| Change::add_flow(board, function, name(n), None)),
        EditOp::RemoveFlow(s) => {
            pick(&flows_on(board), s).map(|flow| Change::remove_flow(board, flow))
        }
        EditOp::LinkFlowToFunction(s, t) => {
            match (pick(&flows_on(board), s), pick(&board.functions, t)) {
                (Some(flow), Some(target)) => {
                    Some(Change::link_flow_to_function(board, flow, target))
                }
                _ => None,
            }
        }
        EditOp::LinkFlowToExternal(s, t) => {
            match (pick(&flows_on(board), s), pick(&board.external_flows, t)) {
                (Some(flow), Some(target)) => {
                    Some(Change::link_flow_to_external_flow(board, flow, target))
                }
                _ => None,
            }
        }
        EditOp::UnlinkFlow(s) => {
            pick(&flows_on(board), s).map(|flow| Change::unlink_flow(board, flow))
        }
        EditOp::AddExternalFlow(n) => Some(Change::add_external_flow(board, name(n), None)),
        EditOp::RemoveExternalFlow(t) => pick(&board.external_flows, t)
            .map(|target| Change::remove_external_flow(board, target)),
    }
}

proptest! {
    /// Reverting every applied change in reverse order lands back on the
    /// empty board, and replaying the same plans reproduces the edited
    /// board, flow links and all.
    #[test]
    fn edit_sequences_revert_and_replay_exactly(
        ops in prop::collection::vec(arb_op(), 0..32),
    ) {
        let repository = Repository::new();
        let mut board = Board::default();
        let mut applied: Vec<Change> = Vec::new();

        for op in ops {
            let Some(change) = materialize(&board, op) else {
                continue;
            };
            let change = board.edit(change);
            if change.is_applied() {
                applied.push(change);
            }
        }

        let mut probe = board.clone();
        let after_edits = repository.store(&mut probe);

        for change in applied.iter_mut().rev() {
            change.revert(&mut board);
        }
        let mut probe = board.clone();
        prop_assert_eq!(repository.store(&mut probe), BoardRecord::default());

        for change in &mut applied {
            change.apply(&mut board);
        }
        let mut probe = board.clone();
        prop_assert_eq!(repository.store(&mut probe), after_edits);
    }
}
