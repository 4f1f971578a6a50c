//! Role/count-conditional field visibility.

use std::collections::BTreeSet;

use crate::{ClusterRole, ParamId, OPERATOR_RECORD_SLOTS};

/// The set of parameters visible for a role and operator count.
///
/// Pure: the same `(role, num_operators)` always yields the same set, and
/// callers must recompute it whenever either input changes. Rendering
/// layers only query this function; they never decide visibility
/// themselves. A field absent from the set is treated as blank during
/// validation even if a stale value remains stored.
pub fn visible_params(role: ClusterRole, num_operators: u8) -> BTreeSet<ParamId> {
    let mut visible = BTreeSet::from([
        ParamId::Enabled,
        ParamId::ClusterRole,
        ParamId::ContainerTag,
        ParamId::P2pPort,
        ParamId::ClusterDefinitionUrl,
    ]);
    if role == ClusterRole::Creator {
        visible.insert(ParamId::ClusterName);
        visible.insert(ParamId::NumValidators);
        visible.insert(ParamId::NumOperators);
        // One record slot per member operator: the local node fills the
        // remaining seat itself.
        let slots = num_operators.saturating_sub(1).min(OPERATOR_RECORD_SLOTS as u8);
        for slot in 1..=slots {
            visible.insert(ParamId::OperatorRecord(slot));
        }
    }
    visible
}
