use itertools::Itertools;
use std::collections::BTreeSet;

/// Computes the deterministic Verilog identifier for a net's output port:
/// `hint_iid_port`, where `hint` is either `v` (no hints) or the net's name
/// hints joined with `_` in lexicographic order.
///
/// Because callers store hints in a [`BTreeSet`], the set is already sorted,
/// so this function never needs to sort anything itself -- the ordering
/// invariant is encoded in the data structure rather than enforced here.
pub fn wire_name(hints: &BTreeSet<String>, iid: u64, port: usize) -> String {
    if hints.is_empty() {
        format!("v_{iid}_{port}")
    } else {
        let joined = hints.iter().join("_");
        format!("{joined}_{iid}_{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hints_uses_v_prefix() {
        let hints = BTreeSet::new();
        assert_eq!(wire_name(&hints, 2, 0), "v_2_0");
    }

    #[test]
    fn hints_are_sorted_before_joining() {
        let mut hints = BTreeSet::new();
        hints.insert("zeta".to_string());
        hints.insert("alpha".to_string());
        assert_eq!(wire_name(&hints, 9, 1), "alpha_zeta_9_1");
    }
}
