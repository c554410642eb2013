//! Wire-name generation for a net's output ports.
//!
//! Most primitives use the `hint_iid_port` scheme from
//! [`vgen_utils::wire_name`]. `Custom` is the one exception: its
//! declaration names each output `name_iid_k`, where `name` is the custom
//! primitive's own name rather than a user hint, so that generated
//! instantiations read as `<prim>_<net>_<port>` regardless of whether a
//! hint was ever attached.
use vgen_ir::Net;
use vgen_utils::wire_name;

/// The wire name for output `port` of `net`.
pub fn output_name(net: &Net, port: usize) -> String {
    wire_name(&net.name_hints, net.id.0, port)
}

/// The wire name for output `port` of a `Custom` net instantiating
/// `prim_name`. Honors `net.output_names` as an explicit override when
/// elaboration supplied one, falling back to `<prim_name>_<iid>_<port>`.
pub fn custom_output_name(net: &Net, prim_name: &str, port: usize) -> String {
    if let Some(names) = &net.output_names {
        if let Some(name) = names.get(port) {
            return name.clone();
        }
    }
    format!("{prim_name}_{}_{port}", net.id.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_ir::{InstId, Primitive};

    #[test]
    fn custom_falls_back_to_name_iid_port() {
        let net = Net::new(
            3u64,
            Primitive::Custom {
                name: "mbox".into(),
                in_sigs: vec![],
                out_sigs: vec![],
                params: vec![],
                clocked: false,
            },
            vec![],
        );
        assert_eq!(custom_output_name(&net, "mbox", 1), "mbox_3_1");
        let _ = InstId(3);
    }

    #[test]
    fn custom_honors_explicit_override() {
        let net = Net::new(
            3u64,
            Primitive::Custom {
                name: "mbox".into(),
                in_sigs: vec![],
                out_sigs: vec![],
                params: vec![],
                clocked: false,
            },
            vec![],
        )
        .with_output_names(vec!["dout".into()]);
        assert_eq!(custom_output_name(&net, "mbox", 0), "dout");
    }
}
