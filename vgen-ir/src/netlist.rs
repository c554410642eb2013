//! Read-only access to nets by identifier, and derivation of module-level
//! inputs/outputs from the netlist's `Input`/`Output` primitives.
use crate::net::{InstId, Net, NetInput};
use crate::primitive::{Primitive, Width};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vgen_utils::{Error, Result};

/// A sparse mapping from instance id to net. Iteration order for code
/// generation is ascending instance id, which a [`BTreeMap`] gives for
/// free -- no explicit sort needed anywhere downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist(BTreeMap<InstId, Net>);

impl Netlist {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, net: Net) {
        self.0.insert(net.id, net);
    }

    pub fn get(&self, id: InstId) -> Option<&Net> {
        self.0.get(&id)
    }

    /// Nets in ascending instance-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Net> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every `Input` net's `(width, name)`, de-duplicated by that pair and
    /// preserving first-seen (ascending instance-id) order.
    pub fn inputs(&self) -> Vec<(Width, String)> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for net in self.iter() {
            if let Primitive::Input { width, name } = &net.prim {
                let key = (*width, name.clone());
                if seen.insert(key.clone()) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Every `Output` net's `(width, name)`, de-duplicated the same way as
    /// [`Netlist::inputs`].
    pub fn outputs(&self) -> Vec<(Width, String)> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for net in self.iter() {
            if let Primitive::Output { width, name } = &net.prim {
                let key = (*width, name.clone());
                if seen.insert(key.clone()) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Checks the structural invariants spec'd for a well-formed netlist:
    /// every `Wire` resolves, arities/widths match each primitive's
    /// declared shape, `RegFileMake` precedes its readers/writers, and
    /// `Input`/`Output` names are unique after de-dup. Called once, before
    /// any code is emitted.
    pub fn validate(&self) -> Result<()> {
        let mut regfiles_seen = std::collections::HashSet::new();

        for net in self.iter() {
            self.validate_net_input_shape(net)?;

            for input in &net.inputs {
                self.validate_net_input_tree(net.id, input)?;
            }

            match &net.prim {
                Primitive::RegFileMake { id, .. } => {
                    regfiles_seen.insert(*id);
                }
                Primitive::RegFileRead { id, .. }
                | Primitive::RegFileWrite { id, .. } => {
                    if !regfiles_seen.contains(id) {
                        return Err(Error::malformed_netlist(
                            net.id.0,
                            format!(
                                "RegFile id {id} used before its RegFileMake"
                            ),
                        ));
                    }
                }
                _ => {}
            }
        }

        self.validate_name_uniqueness()?;
        Ok(())
    }

    fn validate_name_uniqueness(&self) -> Result<()> {
        // Repeated (width, name) `Input` pairs are the documented
        // de-duplication case, not an error; only `Output` names must be
        // unique, since two nets driving the same output name would race.
        let mut output_names = std::collections::HashSet::new();
        for net in self.iter() {
            if let Primitive::Output { name, .. } = &net.prim {
                if !output_names.insert(name.clone()) {
                    return Err(Error::malformed_netlist(
                        net.id.0,
                        format!("duplicate Output name `{name}`"),
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_net_input_shape(&self, net: &Net) -> Result<()> {
        let shape = net.prim.input_shape();
        if shape.len() != net.inputs.len() {
            return Err(Error::malformed_netlist(
                net.id.0,
                format!(
                    "{} expects {} input(s), got {}",
                    net.prim.tag(),
                    shape.len(),
                    net.inputs.len()
                ),
            ));
        }
        for (expected, input) in shape.iter().zip(&net.inputs) {
            let Some(expected_width) = expected else {
                continue;
            };
            let actual = self.input_width(net.id, input)?;
            if actual != *expected_width {
                return Err(Error::malformed_netlist(
                    net.id.0,
                    format!(
                        "{} expected input of width {expected_width}, got {actual}",
                        net.prim.tag()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Resolves the width of a `NetInput`, recursing into `Tree`s.
    fn input_width(&self, owner: InstId, input: &NetInput) -> Result<Width> {
        match input {
            NetInput::Wire(id, port) => {
                let target = self.get(*id).ok_or_else(|| {
                    Error::malformed_netlist(
                        owner.0,
                        format!("Wire references missing net {id}"),
                    )
                })?;
                let widths = target.prim.output_widths();
                widths.get(*port).copied().ok_or_else(|| {
                    Error::malformed_netlist(
                        owner.0,
                        format!(
                            "Wire references port {port} of net {id}, which has {} output(s)",
                            widths.len()
                        ),
                    )
                })
            }
            NetInput::Tree(prim, _) => {
                let widths = prim.output_widths();
                widths.first().copied().ok_or_else(|| {
                    Error::malformed_netlist(
                        owner.0,
                        format!("{} has no output to use as an input", prim.tag()),
                    )
                })
            }
        }
    }

    /// Recursively validates a `Tree`'s own input shape and arity.
    fn validate_net_input_tree(&self, owner: InstId, input: &NetInput) -> Result<()> {
        let NetInput::Tree(prim, children) = input else {
            return Ok(());
        };
        let shape = prim.input_shape();
        if shape.len() != children.len() {
            return Err(Error::malformed_netlist(
                owner.0,
                format!(
                    "inlined {} expects {} input(s), got {}",
                    prim.tag(),
                    shape.len(),
                    children.len()
                ),
            ));
        }
        for (expected, child) in shape.iter().zip(children) {
            if let Some(expected_width) = expected {
                let actual = self.input_width(owner, child)?;
                if actual != *expected_width {
                    return Err(Error::malformed_netlist(
                        owner.0,
                        format!(
                            "inlined {} expected input of width {expected_width}, got {actual}",
                            prim.tag()
                        ),
                    ));
                }
            }
            self.validate_net_input_tree(owner, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;

    fn input(w: Width, name: &str) -> Primitive {
        Primitive::Input {
            width: w,
            name: name.to_string(),
        }
    }

    #[test]
    fn ascending_iteration_order() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(3u64, input(1, "c"), vec![]));
        nl.insert(Net::new(1u64, input(1, "a"), vec![]));
        nl.insert(Net::new(2u64, input(1, "b"), vec![]));
        let ids: Vec<u64> = nl.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn dangling_wire_is_malformed() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(
            0u64,
            Primitive::Not(4),
            vec![NetInput::Wire(InstId(99), 0)],
        ));
        assert!(nl.validate().is_err());
    }

    #[test]
    fn regfile_read_before_make_is_malformed() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(
            0u64,
            Primitive::RegFileRead { width: 8, id: 1 },
            vec![NetInput::Tree(
                Primitive::Const {
                    width: 4,
                    value: 0,
                },
                vec![],
            )],
        ));
        assert!(nl.validate().is_err());
    }

    #[test]
    fn input_deduplication_by_width_and_name() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, input(1, "clk_en"), vec![]));
        nl.insert(Net::new(1u64, input(1, "clk_en"), vec![]));
        assert_eq!(nl.inputs(), vec![(1, "clk_en".to_string())]);
    }
}
