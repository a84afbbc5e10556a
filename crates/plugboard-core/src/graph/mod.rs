//! Connection protocol: typed edges with exactly two endpoints.
//!
//! Contract:
//! - `connect` installs an edge into its source entity's single-valued slot
//!   and its target entity's inbound list. An occupied slot is displaced:
//!   the prior edge keeps its endpoint fields but is no longer live, and
//!   stays in the target's inbound list until explicitly removed
//!   (replace-not-merge; callers wanting a clean evict remove first).
//! - `remove` clears both back-pointers but never nulls the edge's own
//!   fields, so the same id can be re-`connect`ed verbatim. Change revert
//!   relies on this.
//! - No cycle detection anywhere: boards legitimately contain cycles
//!   (a flow may call back into its own namespace).

use crate::{
    model::Board,
    traits::{Entity, Path},
    types::{Arena, Id},
};

///
/// ConnectionKind
///
/// One typed edge kind: its endpoint kinds, its arena on the board, the
/// single-valued slot on the source side and the inbound list on the
/// target side. Implemented per kind by `connection_kind!`.
///

pub trait ConnectionKind: Path + Sized + 'static {
    type Source: Entity + 'static;
    type Target: Entity + 'static;

    /// The edge's endpoint ids. Set at construction, never nulled.
    fn endpoints(&self) -> (Id<Self::Source>, Id<Self::Target>);

    fn arena(board: &Board) -> &Arena<Self>;
    fn arena_mut(board: &mut Board) -> &mut Arena<Self>;
    fn source_arena(board: &Board) -> &Arena<Self::Source>;
    fn source_arena_mut(board: &mut Board) -> &mut Arena<Self::Source>;
    fn target_arena_mut(board: &mut Board) -> &mut Arena<Self::Target>;

    /// The single-valued slot on the source entity.
    fn slot(source: &Self::Source) -> Option<Id<Self>>;
    fn slot_mut(source: &mut Self::Source) -> &mut Option<Id<Self>>;

    /// The inbound list on the target entity.
    fn inbound_mut(target: &mut Self::Target) -> &mut Vec<Id<Self>>;
}

/// Allocate an edge and immediately connect it. Returns the edge id.
pub fn form<C: ConnectionKind>(board: &mut Board, edge: C) -> Id<C> {
    let conn = C::arena_mut(board).alloc(edge);
    connect(board, conn);

    conn
}

/// Install `conn` into both endpoints' slot storage.
///
/// Displaces any prior occupant of the source slot (see module docs).
/// Connecting an already-live edge is a no-op.
pub fn connect<C: ConnectionKind>(board: &mut Board, conn: Id<C>) {
    let (source, target) = C::arena(board)[conn].endpoints();

    *C::slot_mut(&mut C::source_arena_mut(board)[source]) = Some(conn);

    let inbound = C::inbound_mut(&mut C::target_arena_mut(board)[target]);
    if !inbound.contains(&conn) {
        inbound.push(conn);
    }
}

/// Clear both endpoints' back-pointers to `conn`.
///
/// The source slot is only cleared when it still points at `conn`; a
/// displaced edge must not evict its displacer. The edge itself keeps its
/// endpoint fields and remains a valid handle for re-connection.
pub fn remove<C: ConnectionKind>(board: &mut Board, conn: Id<C>) {
    let (source, target) = C::arena(board)[conn].endpoints();

    let slot = C::slot_mut(&mut C::source_arena_mut(board)[source]);
    if *slot == Some(conn) {
        *slot = None;
    }

    C::inbound_mut(&mut C::target_arena_mut(board)[target]).retain(|id| *id != conn);
}

/// Returns `true` while `conn` occupies its source slot.
pub fn formed<C: ConnectionKind>(board: &Board, conn: Id<C>) -> bool {
    let (source, _) = C::arena(board)[conn].endpoints();

    C::slot(&C::source_arena(board)[source]) == Some(conn)
}

/// Implement `Path` + `ConnectionKind` for one edge kind.
macro_rules! connection_kind {
    (
        $conn:ty => $path:literal {
            arena: $arena:ident,
            source: $src:ty { arena: $src_arena:ident, slot: $slot:ident },
            target: $tgt:ty { arena: $tgt_arena:ident, inbound: $inbound:ident },
        }
    ) => {
        impl $crate::traits::Path for $conn {
            const PATH: &'static str = $path;
        }

        impl $crate::graph::ConnectionKind for $conn {
            type Source = $src;
            type Target = $tgt;

            fn endpoints(
                &self,
            ) -> (
                $crate::types::Id<Self::Source>,
                $crate::types::Id<Self::Target>,
            ) {
                (self.source, self.target)
            }

            fn arena(board: &$crate::model::Board) -> &$crate::types::Arena<Self> {
                &board.$arena
            }

            fn arena_mut(board: &mut $crate::model::Board) -> &mut $crate::types::Arena<Self> {
                &mut board.$arena
            }

            fn source_arena(board: &$crate::model::Board) -> &$crate::types::Arena<Self::Source> {
                &board.$src_arena
            }

            fn source_arena_mut(
                board: &mut $crate::model::Board,
            ) -> &mut $crate::types::Arena<Self::Source> {
                &mut board.$src_arena
            }

            fn target_arena_mut(
                board: &mut $crate::model::Board,
            ) -> &mut $crate::types::Arena<Self::Target> {
                &mut board.$tgt_arena
            }

            fn slot(source: &Self::Source) -> Option<$crate::types::Id<Self>> {
                source.$slot
            }

            fn slot_mut(source: &mut Self::Source) -> &mut Option<$crate::types::Id<Self>> {
                &mut source.$slot
            }

            fn inbound_mut(target: &mut Self::Target) -> &mut Vec<$crate::types::Id<Self>> {
                &mut target.$inbound
            }
        }
    };
}

pub(crate) use connection_kind;

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, FlowToFunctionLink, Function, FunctionFlow};

    // Two functions, the first owning one flow. Returns the flow and both
    // function ids.
    fn flow_board() -> (
        Board,
        Id<FunctionFlow>,
        Id<Function>,
        Id<Function>,
    ) {
        let mut board = Board::default();
        let owner = board.function_arena.alloc(Function::new("alpha"));
        let target_a = board.function_arena.alloc(Function::new("beta"));
        let flow = board
            .flow_arena
            .alloc(FunctionFlow::new(owner, "success", None));
        board.function_arena[owner].flows.push(flow);
        board.functions.extend([owner, target_a]);

        (board, flow, owner, target_a)
    }

    #[test]
    fn connect_sets_both_back_pointers() {
        let (mut board, flow, _, target) = flow_board();
        let conn = form(
            &mut board,
            FlowToFunctionLink {
                source: flow,
                target,
            },
        );

        assert!(formed(&board, conn));
        assert_eq!(board.flow_arena[flow].function_link, Some(conn));
        assert_eq!(board.function_arena[target].inbound_flow_links, vec![conn]);
    }

    #[test]
    fn remove_keeps_edge_reusable() {
        let (mut board, flow, _, target) = flow_board();
        let conn = form(
            &mut board,
            FlowToFunctionLink {
                source: flow,
                target,
            },
        );

        remove(&mut board, conn);
        assert!(!formed(&board, conn));
        assert_eq!(board.flow_arena[flow].function_link, None);
        assert!(board.function_arena[target].inbound_flow_links.is_empty());

        // The handle still carries its endpoints; revert is a re-connect.
        connect(&mut board, conn);
        assert!(formed(&board, conn));
        assert_eq!(board.function_arena[target].inbound_flow_links, vec![conn]);
    }

    #[test]
    fn occupied_slot_displaces_prior_edge() {
        let (mut board, flow, _, target_a) = flow_board();
        let target_b = board.function_arena.alloc(Function::new("gamma"));
        board.functions.push(target_b);

        let first = form(
            &mut board,
            FlowToFunctionLink {
                source: flow,
                target: target_a,
            },
        );
        let second = form(
            &mut board,
            FlowToFunctionLink {
                source: flow,
                target: target_b,
            },
        );

        // Exactly one live edge; the displaced one dangles until removed.
        assert!(!formed(&board, first));
        assert!(formed(&board, second));
        assert_eq!(board.flow_arena[flow].function_link, Some(second));
        assert_eq!(
            board.function_arena[target_a].inbound_flow_links,
            vec![first]
        );

        // Removing the dangling edge must not evict the displacer.
        remove(&mut board, first);
        assert!(formed(&board, second));
        assert!(board.function_arena[target_a].inbound_flow_links.is_empty());
    }
}
