//! Scaffolding for the component's `src/lib.rs`.
//!
//! The output is deliberately incomplete: every decode and encode step
//! carries an `XXX` accessor (and `YYY` value) that the author replaces
//! with real contract fields before the component builds.

use crate::core::contracts::ContractSet;
use crate::core::template::{Bindings, Template};
use crate::domain::model::{ComponentName, ExtraPorts, PortGroupKind, PortGroups, PortMap};
use crate::utils::error::Result;
use std::collections::BTreeMap;

const STUB: Template = Template::new(
    "src/lib.rs",
    r#"#[macro_use]
extern crate rustfbp;
extern crate capnp;
{{?externs}}

component! {
  {{name}}, contracts({{contracts}})
  {{ports}}
  {{extra_ports}}
  fn run(&mut self) -> Result<()> {
{{?receivers}}
{{?builders}}
{{?sends}}
    Ok(())
  }
}
"#,
);

fn extern_declarations(cargo_deps: &BTreeMap<String, String>) -> String {
    cargo_deps
        .keys()
        .map(|name| format!("extern crate {};", name.replace('-', "_")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn port_declarations(ports: &PortGroups) -> String {
    ports
        .iter()
        .map(|(kind, group)| {
            let listed = group
                .iter()
                .map(|(port, contract)| format!("{}: {}", port, contract))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({}),", kind.label(), listed)
        })
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn extra_port_declarations(extra: &ExtraPorts) -> String {
    let mut rendered = format!("option({}),\n  acc({}),", extra.option, extra.acc);
    if extra.portal {
        rendered.push_str(" portal()");
    }
    rendered
}

fn receive_block(port: &str, contract: &str) -> String {
    format!(
        r#"    let mut ip_{port} = self.ports.recv("{port}")?;
    let {port} = {{
        let {port}_reader: {contract}::Reader = ip_{port}.get_root()?;
        {port}_reader.get_XXX() // read contract: {contract} to replace XXX
    }};"#
    )
}

fn build_block(port: &str, contract: &str) -> String {
    format!(
        r#"    let mut out_ip_{port} = IP::new();
    {{
        let mut variable = out_ip_{port}.init_root::<{contract}::Builder>();
        variable.set_XXX(YYY); // read contract: {contract} to replace XXX
    }}"#
    )
}

fn send_statement(port: &str) -> String {
    format!(r#"    self.ports.send("{port}", out_ip_{port})?;"#)
}

fn fan_out_loop(port: &str) -> String {
    format!(
        r#"    for p in self.ports.get_output_selections("{port}")? {{
        self.ports.send_array("{port}", &p, out_ip_{port}.clone())?;
    }}"#
    )
}

fn blocks<'a>(groups: impl IntoIterator<Item = &'a PortMap>, render: fn(&str, &str) -> String) -> String {
    groups
        .into_iter()
        .flat_map(|group| group.iter())
        .map(|(port, contract)| render(port, contract))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sends(ports: &PortGroups) -> String {
    let scalar = ports
        .group(PortGroupKind::Outputs)
        .keys()
        .map(|port| send_statement(port));
    let fanned = ports
        .group(PortGroupKind::OutputsArray)
        .keys()
        .map(|port| fan_out_loop(port));
    scalar.chain(fanned).collect::<Vec<_>>().join("\n")
}

pub fn generate_stub(
    name: &ComponentName,
    ports: &PortGroups,
    cargo_deps: &BTreeMap<String, String>,
    extra_ports: &ExtraPorts,
) -> Result<String> {
    let contracts = ContractSet::from_ports(ports);

    STUB.render(
        &Bindings::new()
            .set("externs", extern_declarations(cargo_deps))
            .set("name", name.ident())
            .set("contracts", contracts.rust_contracts())
            .set("ports", port_declarations(ports))
            .set("extra_ports", extra_port_declarations(extra_ports))
            .set(
                "receivers",
                blocks([&ports.inputs, &ports.inputs_array], receive_block),
            )
            .set(
                "builders",
                blocks([&ports.outputs, &ports.outputs_array], build_block),
            )
            .set("sends", sends(ports)),
    )
}
