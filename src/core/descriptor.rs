use crate::core::contracts::ContractSet;
use crate::core::dependencies::ExternalDependencySet;
use crate::core::template::{Bindings, Template};
use crate::domain::model::{ComponentName, PortGroups};
use crate::utils::error::Result;
use std::collections::BTreeMap;

pub const DEPS_SHA256_PLACEHOLDER: &str = "2m6n74fm7k99pp13j5d5yyp4j0znc0s10958hhyyh3shq9rj8862";
pub const HOMEPAGE_BASE: &str = "https://gitlab.com/fractalide/fractalide/tree/master/components";

const DESCRIPTOR: Template = Template::new(
    "default.nix",
    r#"{ stdenv, buildFractalideComponent, genName, upkeepers
{{?contracts_header}}
{{?dependencies_comment}}
, ...}:

buildFractalideComponent rec {
  name = genName ./.;
  src = ./.;
  contracts = [{{contracts}}];
  depsSha256 = "{{deps_sha256}}";
  {{?build_inputs}}
  meta = with stdenv.lib; {
    description = "Component: {{description}}";
    homepage = {{homepage}};
    license = with licenses; [ mpl20 ];
    maintainers = with upkeepers; [ dmichiels sjmackenzie ];
  };
}
"#,
);

pub fn generate_descriptor(
    name: &ComponentName,
    description: &str,
    ports: &PortGroups,
    external_deps: &BTreeMap<String, Vec<String>>,
) -> Result<String> {
    let contracts = ContractSet::from_ports(ports);
    let externals = ExternalDependencySet::from_groups(external_deps);

    DESCRIPTOR.render(
        &Bindings::new()
            .set("contracts_header", contracts.nix_header())
            .set("dependencies_comment", externals.comment_listing())
            .set("contracts", contracts.nix_contracts())
            .set("deps_sha256", DEPS_SHA256_PLACEHOLDER)
            .set("build_inputs", externals.build_inputs())
            .set("description", description)
            .set("homepage", format!("{}/{}", HOMEPAGE_BASE, name.nix_path())),
    )
}
